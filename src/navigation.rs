/*!
 * Traversal algorithms over a timeline's node tree.
 *
 * Duration, time lookup and clip offset all share one eligibility rule: a
 * parallel contributes its clip duration only when it has an audio clip and
 * its text (if any, and if resolved) lives in the timeline's content document.
 * Ordinal lookup ignores eligibility and counts every parallel.
 */

use crate::document::DocumentId;
use crate::node::{clip_duration_ms, Arena, NodeData, ParallelData};

/// Read-only walker bound to one arena and its content document
#[derive(Clone, Copy)]
pub(crate) struct Navigator<'a> {
    arena: &'a Arena,
    content: DocumentId,
}

impl<'a> Navigator<'a> {
    pub fn new(arena: &'a Arena, content: DocumentId) -> Self {
        Self { arena, content }
    }

    /// Clip duration a parallel contributes, `None` when it is not eligible
    pub fn contribution(&self, par: &ParallelData) -> Option<u32> {
        let audio = self.arena.audio(par.audio?)?;

        if let Some(text) = par.text.and_then(|index| self.arena.text(index)) {
            // unresolved text references do not disqualify the parallel
            if text.media.document.is_some_and(|doc| doc != self.content) {
                return None;
            }
        }

        Some(clip_duration_ms(audio.clip_begin_ms, audio.clip_end_ms))
    }

    /// Sum of eligible contributions below `seq`
    pub fn duration_ms(&self, seq: u32) -> u32 {
        let Some(data) = self.arena.sequence(seq) else {
            return 0;
        };

        data.children.iter().fold(0u32, |total, &child| {
            let part = match &self.arena.entry(child).data {
                NodeData::Parallel(par) => self.contribution(par).unwrap_or(0),
                NodeData::Sequence(_) => self.duration_ms(child),
                _ => 0,
            };
            total.saturating_add(part)
        })
    }

    /// Parallel playing at `time_ms`, measured from the start of `seq`.
    ///
    /// The end of a clip is inclusive: a time exactly on a boundary belongs
    /// to the clip that ends there.
    pub fn active_parallel(&self, seq: u32, time_ms: u32) -> Option<u32> {
        let data = self.arena.sequence(seq)?;
        let mut offset = 0u32;

        for &child in &data.children {
            let adjusted = time_ms.checked_sub(offset)?;

            match &self.arena.entry(child).data {
                NodeData::Parallel(par) => {
                    let Some(clip) = self.contribution(par) else {
                        continue;
                    };
                    if clip > 0 && adjusted <= clip {
                        return Some(child);
                    }
                    offset = offset.saturating_add(clip);
                }
                NodeData::Sequence(_) => {
                    if let Some(found) = self.active_parallel(child, adjusted) {
                        return Some(found);
                    }
                    offset = offset.saturating_add(self.duration_ms(child));
                }
                _ => {}
            }
        }

        None
    }

    /// Accumulate contributions preceding `target` into `offset`.
    ///
    /// Returns true once `target` is reached; `offset` then holds its start.
    pub fn clip_offset(&self, seq: u32, target: u32, offset: &mut u32) -> bool {
        let Some(data) = self.arena.sequence(seq) else {
            return false;
        };

        for &child in &data.children {
            match &self.arena.entry(child).data {
                NodeData::Parallel(par) => {
                    if child == target {
                        return true;
                    }
                    if let Some(clip) = self.contribution(par) {
                        *offset = offset.saturating_add(clip);
                    }
                }
                NodeData::Sequence(_) => {
                    if self.clip_offset(child, target, offset) {
                        return true;
                    }
                }
                _ => {}
            }
        }

        false
    }
}

/// Depth-first walk over every parallel below a sequence, in document order
#[derive(Debug, Clone)]
pub(crate) struct ParallelWalk<'a> {
    arena: &'a Arena,
    // (sequence, next child position)
    stack: Vec<(u32, usize)>,
}

impl<'a> ParallelWalk<'a> {
    pub fn new(arena: &'a Arena, start: Option<u32>) -> Self {
        Self {
            arena,
            stack: start.map(|seq| vec![(seq, 0)]).unwrap_or_default(),
        }
    }
}

impl Iterator for ParallelWalk<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while let Some(frame) = self.stack.last_mut() {
            let Some(seq) = self.arena.sequence(frame.0) else {
                self.stack.pop();
                continue;
            };
            let Some(&child) = seq.children.get(frame.1) else {
                self.stack.pop();
                continue;
            };
            frame.1 += 1;

            match &self.arena.entry(child).data {
                NodeData::Parallel(_) => return Some(child),
                NodeData::Sequence(_) => self.stack.push((child, 0)),
                _ => {}
            }
        }
        None
    }
}
