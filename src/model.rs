/*!
 * Publication-level aggregate of media overlay timelines.
 *
 * `OverlayModel` owns one timeline per narrated content document, in reading
 * order. Consumers that outlive the model hold a `TimelineHandle`: a weak
 * reference whose every query first checks that the timeline is still alive
 * and otherwise answers with `None` or zero.
 */

use std::sync::{Arc, Weak};

use log::{debug, trace};

use crate::document::DocumentId;
use crate::node::ParallelId;
use crate::timeline::Timeline;

/// A point on the publication-wide narration timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Index of the timeline in reading order
    pub timeline_index: usize,
    /// 1-based ordinal of the parallel within that timeline
    pub ordinal: u32,
    /// Milliseconds elapsed inside that parallel's clip
    pub offset_ms: u32,
}

/// All media overlay timelines of one publication
#[derive(Debug, Default)]
pub struct OverlayModel {
    timelines: Vec<Arc<Timeline>>,
    declared_duration_ms: Option<u32>,
}

impl OverlayModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the publication-wide duration declared in package metadata
    pub fn with_declared_duration(mut self, duration_ms: u32) -> Self {
        self.declared_duration_ms = Some(duration_ms);
        self
    }

    /// Take ownership of the next timeline in reading order
    pub fn push(&mut self, timeline: Timeline) -> TimelineHandle {
        debug!(
            "Adding overlay timeline #{} for {}",
            self.timelines.len(),
            timeline.content_document()
        );
        let timeline = Arc::new(timeline);
        let handle = TimelineHandle(Arc::downgrade(&timeline));
        self.timelines.push(timeline);
        handle
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn timeline(&self, index: usize) -> Option<&Timeline> {
        self.timelines.get(index).map(Arc::as_ref)
    }

    /// Weak handle to the timeline at `index`
    pub fn handle(&self, index: usize) -> Option<TimelineHandle> {
        self.timelines
            .get(index)
            .map(|timeline| TimelineHandle(Arc::downgrade(timeline)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.iter().map(Arc::as_ref)
    }

    /// Timeline narrating `content`, with its reading-order index
    pub fn timeline_for_content(&self, content: DocumentId) -> Option<(usize, &Timeline)> {
        self.iter()
            .enumerate()
            .find(|(_, timeline)| timeline.content_document() == content)
    }

    /// Publication duration from package metadata, if declared
    pub fn declared_duration_ms(&self) -> Option<u32> {
        self.declared_duration_ms
    }

    /// Sum of the computed durations of all timelines
    pub fn computed_duration_ms(&self) -> u32 {
        self.iter()
            .fold(0u32, |total, timeline| total.saturating_add(timeline.computed_duration_ms()))
    }

    /// Percentage of the whole narration elapsed at `offset_ms` into the
    /// `ordinal`-th parallel of timeline `timeline_index`.
    pub fn position_to_percent(&self, timeline_index: usize, ordinal: u32, offset_ms: u32) -> Option<f64> {
        let timeline = self.timeline(timeline_index)?;
        let par = timeline.find_nth_parallel(ordinal)?;

        let total = self.computed_duration_ms();
        if total == 0 {
            return None;
        }

        let preceding: u64 = self.timelines[..timeline_index]
            .iter()
            .map(|t| u64::from(t.computed_duration_ms()))
            .sum();
        let elapsed = preceding + u64::from(timeline.find_offset_ms(par.id())) + u64::from(offset_ms);

        let percent = (elapsed as f64 / f64::from(total)) * 100.0;
        trace!(
            "Position ({}, {}, {}ms) is {:.2}%",
            timeline_index, ordinal, offset_ms, percent
        );
        Some(percent)
    }

    /// Position playing at `percent` (0 to 100) of the whole narration.
    ///
    /// A time exactly on the boundary between two timelines belongs to the
    /// earlier one, matching the inclusive clip ends of time lookup.
    pub fn percent_to_position(&self, percent: f64) -> Option<Position> {
        if !(0.0..=100.0).contains(&percent) {
            return None;
        }

        let total = self.computed_duration_ms();
        let mut time_ms = (f64::from(total) * percent / 100.0) as u32;

        for (timeline_index, timeline) in self.iter().enumerate() {
            let duration = timeline.computed_duration_ms();
            if duration == 0 || duration < time_ms {
                time_ms -= duration.min(time_ms);
                continue;
            }

            let par = timeline.find_active_parallel(time_ms)?;
            let start = timeline.find_offset_ms(par.id());
            let position = Position {
                timeline_index,
                ordinal: par.ordinal()?,
                offset_ms: time_ms.saturating_sub(start),
            };
            trace!("{:.2}% is at {:?}", percent, position);
            return Some(position);
        }

        None
    }
}

/// Non-owning reference to a timeline held by an [`OverlayModel`].
///
/// Once the model (and with it the timeline) is dropped every query answers
/// `None` or zero.
#[derive(Debug, Clone)]
pub struct TimelineHandle(Weak<Timeline>);

impl TimelineHandle {
    /// Whether the timeline is still alive
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Temporarily pin the timeline, `None` after teardown
    pub fn upgrade(&self) -> Option<Arc<Timeline>> {
        self.0.upgrade()
    }

    pub fn content_document(&self) -> Option<DocumentId> {
        let timeline = self.upgrade()?;
        Some(timeline.content_document())
    }

    pub fn declared_duration_ms(&self) -> u32 {
        let Some(timeline) = self.upgrade() else {
            return 0;
        };
        timeline.declared_duration_ms()
    }

    pub fn computed_duration_ms(&self) -> u32 {
        let Some(timeline) = self.upgrade() else {
            return 0;
        };
        timeline.computed_duration_ms()
    }

    pub fn find_active_parallel(&self, time_ms: u32) -> Option<ParallelId> {
        let timeline = self.upgrade()?;
        timeline.find_active_parallel(time_ms).map(|par| par.id())
    }

    pub fn find_nth_parallel(&self, ordinal: u32) -> Option<ParallelId> {
        let timeline = self.upgrade()?;
        timeline.find_nth_parallel(ordinal).map(|par| par.id())
    }

    pub fn find_offset_ms(&self, target: ParallelId) -> u32 {
        let Some(timeline) = self.upgrade() else {
            return 0;
        };
        timeline.find_offset_ms(target)
    }
}
