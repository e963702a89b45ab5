/*!
 * The timeline aggregate: one frozen timing tree plus its metadata.
 *
 * All queries are pure traversals; nothing is cached. Handles issued by a
 * different timeline never resolve here, so every query degrades to `None`
 * or zero on them.
 */

use crate::document::DocumentId;
use crate::navigation::{Navigator, ParallelWalk};
use crate::node::{Arena, AudioId, NodeId, NodeKind, ParallelId, SequenceId, TextId};
use crate::view::{AudioRef, ContainerRef, ParallelRef, Parallels, SequenceRef, TextRef};

/// Synchronized narration timeline of one content document.
#[derive(Debug)]
pub struct Timeline {
    pub(crate) arena: Arena,
    overlay_document: DocumentId,
    content_document: DocumentId,
    declared_duration_ms: u32,
}

impl Timeline {
    pub(crate) fn new(
        arena: Arena,
        overlay_document: DocumentId,
        content_document: DocumentId,
        declared_duration_ms: u32,
    ) -> Self {
        Self {
            arena,
            overlay_document,
            content_document,
            declared_duration_ms,
        }
    }

    pub(crate) fn navigator(&self) -> Navigator<'_> {
        Navigator::new(&self.arena, self.content_document)
    }

    /// The overlay document this timeline was built from
    pub fn overlay_document(&self) -> DocumentId {
        self.overlay_document
    }

    /// The content document being narrated
    pub fn content_document(&self) -> DocumentId {
        self.content_document
    }

    /// Duration as declared in the overlay metadata; may disagree with
    /// [`Timeline::computed_duration_ms`].
    pub fn declared_duration_ms(&self) -> u32 {
        self.declared_duration_ms
    }

    /// Sum of all eligible clip durations
    pub fn computed_duration_ms(&self) -> u32 {
        match self.arena.root {
            Some(root) => self.navigator().duration_ms(root),
            None => 0,
        }
    }

    /// The body sequence, `None` for an empty overlay
    pub fn root(&self) -> Option<SequenceRef<'_>> {
        SequenceRef::new(self, self.arena.root?)
    }

    /// Whether the overlay has no body
    pub fn is_empty(&self) -> bool {
        self.arena.root.is_none()
    }

    /// Total number of nodes, including leaves
    pub fn node_count(&self) -> usize {
        self.arena.nodes.len()
    }

    /// Number of parallels reachable from the body
    pub fn parallel_count(&self) -> usize {
        self.parallels().count()
    }

    /// Kind of the node behind `id`
    pub fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        let index = self.arena.index_of(id)?;
        Some(self.arena.entry(index).data.kind())
    }

    /// Container behind `id`, `None` for leaves and foreign handles
    pub fn container(&self, id: NodeId) -> Option<ContainerRef<'_>> {
        ContainerRef::new(self, self.arena.index_of(id)?)
    }

    pub fn sequence(&self, id: SequenceId) -> Option<SequenceRef<'_>> {
        SequenceRef::new(self, self.arena.index_of(id.0)?)
    }

    pub fn parallel(&self, id: ParallelId) -> Option<ParallelRef<'_>> {
        ParallelRef::new(self, self.arena.index_of(id.0)?)
    }

    pub fn audio(&self, id: AudioId) -> Option<AudioRef<'_>> {
        AudioRef::new(self, self.arena.index_of(id.0)?)
    }

    pub fn text(&self, id: TextId) -> Option<TextRef<'_>> {
        TextRef::new(self, self.arena.index_of(id.0)?)
    }

    /// Every parallel in document order (depth-first, left to right)
    pub fn parallels(&self) -> Parallels<'_> {
        Parallels::new(self, ParallelWalk::new(&self.arena, self.arena.root))
    }

    /// Parallel playing at `time_ms` from the start of the timeline.
    ///
    /// A time exactly at the end of a clip belongs to that clip. Times past
    /// the computed duration find nothing.
    pub fn find_active_parallel(&self, time_ms: u32) -> Option<ParallelRef<'_>> {
        let index = self.navigator().active_parallel(self.arena.root?, time_ms)?;
        ParallelRef::new(self, index)
    }

    /// The `ordinal`-th parallel in document order, counting from 1.
    ///
    /// Eligibility is not applied: parallels without audio are counted too.
    /// Ordinal 0 never matches.
    pub fn find_nth_parallel(&self, ordinal: u32) -> Option<ParallelRef<'_>> {
        let position = ordinal.checked_sub(1)?;
        self.parallels().nth(position as usize)
    }

    /// 1-based ordinal of `target`, the inverse of [`Timeline::find_nth_parallel`]
    pub fn ordinal_of(&self, target: ParallelId) -> Option<u32> {
        let index = self.arena.index_of(target.0)?;
        ParallelWalk::new(&self.arena, self.arena.root)
            .position(|candidate| candidate == index)
            .map(|position| position as u32 + 1)
    }

    /// Start of `target` on the timeline, in ms.
    ///
    /// Zero when `target` is not part of this timeline.
    pub fn find_offset_ms(&self, target: ParallelId) -> u32 {
        let (Some(root), Some(index)) = (self.arena.root, self.arena.index_of(target.0)) else {
            return 0;
        };

        let mut offset = 0;
        if self.navigator().clip_offset(root, index, &mut offset) {
            offset
        } else {
            0
        }
    }
}
