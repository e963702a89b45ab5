/*!
 * Bottom-up construction of timelines.
 *
 * Every container is created with its parent and registers itself there
 * immediately: sequences and parallels are appended to the parent sequence,
 * leaves occupy the audio or text slot of their parallel. Handles are typed,
 * so a parallel can only be attached to a sequence and a leaf only to a
 * parallel. Once `build` is called the tree is frozen.
 */

use log::{debug, warn};

use crate::config::{BuildConfig, SlotPolicy};
use crate::document::{DocumentId, MediaRef};
use crate::errors::{BuildError, ConfigError, OverlayError, Slot};
use crate::node::{
    Arena, AudioData, AudioId, NodeData, NodeKind, ParallelData, ParallelId, SequenceData,
    SequenceId, TextData, TextId,
};
use crate::timeline::Timeline;

/// Builds one timeline. Consumed by [`TimelineBuilder::build`].
#[derive(Debug)]
pub struct TimelineBuilder {
    arena: Arena,
    config: BuildConfig,
    overlay_document: DocumentId,
    content_document: DocumentId,
    declared_duration_ms: u32,
}

impl TimelineBuilder {
    /// Start a timeline for the overlay document `overlay_document` narrating
    /// `content_document`, with the duration declared in its metadata.
    pub fn new(overlay_document: DocumentId, content_document: DocumentId, declared_duration_ms: u32) -> Self {
        Self {
            arena: Arena::new(),
            config: BuildConfig::default(),
            overlay_document,
            content_document,
            declared_duration_ms,
        }
    }

    /// Use a non-default build configuration
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the build configuration from JSON.
    pub fn with_config_json(self, json: &str) -> Result<Self, OverlayError> {
        let config = BuildConfig::from_json(json).map_err(|err| match err.downcast::<ConfigError>() {
            Ok(config_err) => OverlayError::Config(config_err),
            Err(other) => OverlayError::from(other),
        })?;
        Ok(self.with_config(config))
    }

    /// Create the root (body) sequence.
    pub fn root(&mut self, type_attr: &str, text_ref: Option<MediaRef>) -> Result<SequenceId, BuildError> {
        if self.arena.root.is_some() {
            return Err(BuildError::RootAlreadySet);
        }
        let index = self.arena.push(
            None,
            1,
            NodeData::Sequence(SequenceData {
                type_attr: type_attr.to_string(),
                text_ref,
                children: Vec::new(),
            }),
        );
        self.arena.root = Some(index);
        Ok(SequenceId(self.arena.id_of(index)))
    }

    /// Create a sequence appended to `parent`.
    pub fn sequence(
        &mut self,
        parent: SequenceId,
        type_attr: &str,
        text_ref: Option<MediaRef>,
    ) -> Result<SequenceId, BuildError> {
        let parent_index = self.sequence_index(parent)?;
        let depth = self.arena.entry(parent_index).depth + 1;
        if depth > self.config.max_nesting_depth {
            return Err(BuildError::TooDeep {
                depth,
                max: self.config.max_nesting_depth,
            });
        }

        let index = self.arena.push(
            Some(parent_index),
            depth,
            NodeData::Sequence(SequenceData {
                type_attr: type_attr.to_string(),
                text_ref,
                children: Vec::new(),
            }),
        );
        self.append_child(parent_index, index);
        Ok(SequenceId(self.arena.id_of(index)))
    }

    /// Create a parallel appended to `parent`.
    pub fn parallel(&mut self, parent: SequenceId, type_attr: &str) -> Result<ParallelId, BuildError> {
        let parent_index = self.sequence_index(parent)?;
        let depth = self.arena.entry(parent_index).depth + 1;
        let index = self.arena.push(
            Some(parent_index),
            depth,
            NodeData::Parallel(ParallelData {
                type_attr: type_attr.to_string(),
                audio: None,
                text: None,
            }),
        );
        self.append_child(parent_index, index);
        Ok(ParallelId(self.arena.id_of(index)))
    }

    /// Put an audio clip into the audio slot of `parent`.
    ///
    /// Under [`SlotPolicy::Overwrite`] an occupied slot is replaced in place:
    /// the returned handle is the one issued for the previous clip.
    pub fn audio(
        &mut self,
        parent: ParallelId,
        media: MediaRef,
        clip_begin_ms: u32,
        clip_end_ms: u32,
    ) -> Result<AudioId, BuildError> {
        let parent_index = self.parallel_index(parent)?;
        let data = NodeData::Audio(AudioData {
            media,
            clip_begin_ms,
            clip_end_ms,
        });
        let index = self.fill_slot(parent_index, Slot::Audio, data)?;
        Ok(AudioId(self.arena.id_of(index)))
    }

    /// Put a text fragment into the text slot of `parent`.
    ///
    /// Occupied slots are handled as in [`TimelineBuilder::audio`].
    pub fn text(&mut self, parent: ParallelId, media: MediaRef) -> Result<TextId, BuildError> {
        let parent_index = self.parallel_index(parent)?;
        let index = self.fill_slot(parent_index, Slot::Text, NodeData::Text(TextData { media }))?;
        Ok(TextId(self.arena.id_of(index)))
    }

    /// Freeze the tree into a timeline.
    pub fn build(self) -> Timeline {
        let timeline = Timeline::new(
            self.arena,
            self.overlay_document,
            self.content_document,
            self.declared_duration_ms,
        );

        let computed = timeline.computed_duration_ms();
        debug!(
            "Built timeline for {}: {} nodes, {} parallels, computed {}ms, declared {}ms",
            timeline.content_document(),
            timeline.node_count(),
            timeline.parallel_count(),
            computed,
            timeline.declared_duration_ms()
        );

        if self.config.log_drift {
            let drift = computed.abs_diff(timeline.declared_duration_ms());
            if drift > self.config.duration_drift_tolerance_ms {
                warn!(
                    "Declared duration of overlay {} is off by {}ms (declared {}ms, computed {}ms)",
                    timeline.overlay_document(),
                    drift,
                    timeline.declared_duration_ms(),
                    computed
                );
            }
        }

        timeline
    }

    fn sequence_index(&self, id: SequenceId) -> Result<u32, BuildError> {
        let index = self
            .arena
            .index_of(id.0)
            .ok_or(BuildError::ForeignParent { kind: NodeKind::Sequence })?;
        match self.arena.sequence(index) {
            Some(_) => Ok(index),
            None => Err(BuildError::ParentKindMismatch {
                index: index as usize,
                expected: NodeKind::Sequence,
            }),
        }
    }

    fn parallel_index(&self, id: ParallelId) -> Result<u32, BuildError> {
        let index = self
            .arena
            .index_of(id.0)
            .ok_or(BuildError::ForeignParent { kind: NodeKind::Parallel })?;
        match self.arena.parallel(index) {
            Some(_) => Ok(index),
            None => Err(BuildError::ParentKindMismatch {
                index: index as usize,
                expected: NodeKind::Parallel,
            }),
        }
    }

    fn append_child(&mut self, parent_index: u32, child: u32) {
        if let NodeData::Sequence(seq) = &mut self.arena.entry_mut(parent_index).data {
            seq.children.push(child);
        }
    }

    fn fill_slot(&mut self, parent_index: u32, slot: Slot, data: NodeData) -> Result<u32, BuildError> {
        let occupant = match self.arena.parallel(parent_index) {
            Some(par) => match slot {
                Slot::Audio => par.audio,
                Slot::Text => par.text,
            },
            None => None,
        };

        if let Some(existing) = occupant {
            return match self.config.slot_policy {
                SlotPolicy::Reject => Err(BuildError::SlotOccupied {
                    index: parent_index as usize,
                    slot,
                }),
                SlotPolicy::Overwrite => {
                    debug!("Replacing {} slot of parallel #{}", slot, parent_index);
                    self.arena.entry_mut(existing).data = data;
                    Ok(existing)
                }
            };
        }

        let depth = self.arena.entry(parent_index).depth + 1;
        let index = self.arena.push(Some(parent_index), depth, data);
        if let NodeData::Parallel(par) = &mut self.arena.entry_mut(parent_index).data {
            match slot {
                Slot::Audio => par.audio = Some(index),
                Slot::Text => par.text = Some(index),
            }
        }
        Ok(index)
    }
}
