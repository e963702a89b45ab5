/*!
 * Borrowed, read-only views over timeline nodes.
 *
 * A view pairs a timeline with the arena slot of one node. Narrowing a
 * container to a sequence or a parallel goes through [`ContainerRef`], a
 * plain enum, so a mismatch is an ordinary `None`.
 */

use std::fmt;

use crate::document::{DocumentId, MediaRef};
use crate::navigation::ParallelWalk;
use crate::node::{
    clip_duration_ms, AudioData, AudioId, NodeKind, ParallelData, ParallelId, SequenceData,
    SequenceId, TextData, TextId,
};
use crate::timeline::Timeline;

/// Split a space-separated type attribute into its tags
fn split_tags(type_attr: &str) -> impl Iterator<Item = &str> {
    type_attr.split_whitespace()
}

/// A sequence container
#[derive(Clone, Copy)]
pub struct SequenceRef<'a> {
    timeline: &'a Timeline,
    index: u32,
    data: &'a SequenceData,
}

impl<'a> SequenceRef<'a> {
    pub(crate) fn new(timeline: &'a Timeline, index: u32) -> Option<Self> {
        let data = timeline.arena.sequence(index)?;
        Some(Self { timeline, index, data })
    }

    pub fn id(&self) -> SequenceId {
        SequenceId(self.timeline.arena.id_of(self.index))
    }

    /// Raw space-separated type attribute
    pub fn type_attr(&self) -> &'a str {
        &self.data.type_attr
    }

    pub fn type_tags(self) -> impl Iterator<Item = &'a str> {
        split_tags(&self.data.type_attr)
    }

    /// Alternate text document narrated by this subtree, if any
    pub fn text_ref(&self) -> Option<&'a MediaRef> {
        self.data.text_ref.as_ref()
    }

    pub fn text_ref_file(&self) -> Option<&'a str> {
        self.text_ref().map(|media| media.src_file.as_str())
    }

    pub fn text_ref_fragment_id(&self) -> Option<&'a str> {
        self.text_ref().map(|media| media.fragment_id.as_str())
    }

    pub fn text_ref_document(&self) -> Option<DocumentId> {
        self.text_ref().and_then(|media| media.document)
    }

    pub fn child_count(&self) -> usize {
        self.data.children.len()
    }

    /// Child at position `i`, `None` when out of range
    pub fn child(&self, i: usize) -> Option<ContainerRef<'a>> {
        let index = *self.data.children.get(i)?;
        ContainerRef::new(self.timeline, index)
    }

    pub fn children(self) -> impl Iterator<Item = ContainerRef<'a>> + 'a {
        let timeline = self.timeline;
        self.data
            .children
            .iter()
            .filter_map(move |&index| ContainerRef::new(timeline, index))
    }

    /// Enclosing sequence, `None` for the body
    pub fn parent(&self) -> Option<SequenceRef<'a>> {
        let parent = self.timeline.arena.entry(self.index).parent?;
        SequenceRef::new(self.timeline, parent)
    }

    pub fn is_root(&self) -> bool {
        self.timeline.arena.root == Some(self.index)
    }

    /// Nesting depth; the body is at depth 1
    pub fn depth(&self) -> usize {
        self.timeline.arena.entry(self.index).depth
    }

    /// Sum of eligible clip durations in this subtree
    pub fn duration_ms(&self) -> u32 {
        self.timeline.navigator().duration_ms(self.index)
    }

    /// Parallel playing at `time_ms`, measured from the start of this subtree
    pub fn find_active_parallel(&self, time_ms: u32) -> Option<ParallelRef<'a>> {
        let index = self.timeline.navigator().active_parallel(self.index, time_ms)?;
        ParallelRef::new(self.timeline, index)
    }

    /// Parallels of this subtree in document order
    pub fn parallels(&self) -> Parallels<'a> {
        Parallels::new(self.timeline, ParallelWalk::new(&self.timeline.arena, Some(self.index)))
    }
}

/// A parallel container: at most one audio clip and one text fragment
#[derive(Clone, Copy)]
pub struct ParallelRef<'a> {
    timeline: &'a Timeline,
    index: u32,
    data: &'a ParallelData,
}

impl<'a> ParallelRef<'a> {
    pub(crate) fn new(timeline: &'a Timeline, index: u32) -> Option<Self> {
        let data = timeline.arena.parallel(index)?;
        Some(Self { timeline, index, data })
    }

    pub fn id(&self) -> ParallelId {
        ParallelId(self.timeline.arena.id_of(self.index))
    }

    pub fn type_attr(&self) -> &'a str {
        &self.data.type_attr
    }

    pub fn type_tags(self) -> impl Iterator<Item = &'a str> {
        split_tags(&self.data.type_attr)
    }

    pub fn audio(&self) -> Option<AudioRef<'a>> {
        AudioRef::new(self.timeline, self.data.audio?)
    }

    pub fn text(&self) -> Option<TextRef<'a>> {
        TextRef::new(self.timeline, self.data.text?)
    }

    pub fn parent_sequence(&self) -> Option<SequenceRef<'a>> {
        let parent = self.timeline.arena.entry(self.index).parent?;
        SequenceRef::new(self.timeline, parent)
    }

    /// Whether this parallel counts towards durations and time lookup
    pub fn is_eligible(&self) -> bool {
        self.timeline.navigator().contribution(self.data).is_some()
    }

    /// Duration this parallel adds to the timeline (0 when not eligible)
    pub fn contribution_ms(&self) -> u32 {
        self.timeline.navigator().contribution(self.data).unwrap_or(0)
    }

    /// Start of this parallel on the timeline
    pub fn offset_ms(&self) -> u32 {
        self.timeline.find_offset_ms(self.id())
    }

    /// 1-based position among all parallels in document order
    pub fn ordinal(&self) -> Option<u32> {
        self.timeline.ordinal_of(self.id())
    }
}

/// Either kind of container
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContainerRef<'a> {
    Sequence(SequenceRef<'a>),
    Parallel(ParallelRef<'a>),
}

impl<'a> ContainerRef<'a> {
    pub(crate) fn new(timeline: &'a Timeline, index: u32) -> Option<Self> {
        match timeline.arena.entry(index).data.kind() {
            NodeKind::Sequence => SequenceRef::new(timeline, index).map(Self::Sequence),
            NodeKind::Parallel => ParallelRef::new(timeline, index).map(Self::Parallel),
            NodeKind::Audio | NodeKind::Text => None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Parallel(_) => NodeKind::Parallel,
        }
    }

    pub fn as_sequence(&self) -> Option<SequenceRef<'a>> {
        match self {
            Self::Sequence(seq) => Some(*seq),
            Self::Parallel(_) => None,
        }
    }

    pub fn as_parallel(&self) -> Option<ParallelRef<'a>> {
        match self {
            Self::Parallel(par) => Some(*par),
            Self::Sequence(_) => None,
        }
    }

    pub fn type_attr(&self) -> &'a str {
        match self {
            Self::Sequence(seq) => seq.type_attr(),
            Self::Parallel(par) => par.type_attr(),
        }
    }

    pub fn parent_sequence(&self) -> Option<SequenceRef<'a>> {
        match self {
            Self::Sequence(seq) => seq.parent(),
            Self::Parallel(par) => par.parent_sequence(),
        }
    }
}

/// Audio clip leaf
#[derive(Clone, Copy)]
pub struct AudioRef<'a> {
    timeline: &'a Timeline,
    index: u32,
    data: &'a AudioData,
}

impl<'a> AudioRef<'a> {
    pub(crate) fn new(timeline: &'a Timeline, index: u32) -> Option<Self> {
        let data = timeline.arena.audio(index)?;
        Some(Self { timeline, index, data })
    }

    pub fn id(&self) -> AudioId {
        AudioId(self.timeline.arena.id_of(self.index))
    }

    pub fn media(&self) -> &'a MediaRef {
        &self.data.media
    }

    pub fn src_file(&self) -> &'a str {
        &self.data.media.src_file
    }

    pub fn fragment_id(&self) -> &'a str {
        &self.data.media.fragment_id
    }

    pub fn document(&self) -> Option<DocumentId> {
        self.data.media.document
    }

    pub fn clip_begin_ms(&self) -> u32 {
        self.data.clip_begin_ms
    }

    pub fn clip_end_ms(&self) -> u32 {
        self.data.clip_end_ms
    }

    /// Effective clip length, 0 for empty or inverted windows
    pub fn clip_duration_ms(&self) -> u32 {
        clip_duration_ms(self.data.clip_begin_ms, self.data.clip_end_ms)
    }

    pub fn parent_parallel(&self) -> Option<ParallelRef<'a>> {
        let parent = self.timeline.arena.entry(self.index).parent?;
        ParallelRef::new(self.timeline, parent)
    }
}

/// Text fragment leaf
#[derive(Clone, Copy)]
pub struct TextRef<'a> {
    timeline: &'a Timeline,
    index: u32,
    data: &'a TextData,
}

impl<'a> TextRef<'a> {
    pub(crate) fn new(timeline: &'a Timeline, index: u32) -> Option<Self> {
        let data = timeline.arena.text(index)?;
        Some(Self { timeline, index, data })
    }

    pub fn id(&self) -> TextId {
        TextId(self.timeline.arena.id_of(self.index))
    }

    pub fn media(&self) -> &'a MediaRef {
        &self.data.media
    }

    pub fn src_file(&self) -> &'a str {
        &self.data.media.src_file
    }

    pub fn fragment_id(&self) -> &'a str {
        &self.data.media.fragment_id
    }

    pub fn document(&self) -> Option<DocumentId> {
        self.data.media.document
    }

    pub fn parent_parallel(&self) -> Option<ParallelRef<'a>> {
        let parent = self.timeline.arena.entry(self.index).parent?;
        ParallelRef::new(self.timeline, parent)
    }
}

/// Iterator over parallels in document order
#[derive(Clone)]
pub struct Parallels<'a> {
    timeline: &'a Timeline,
    walk: ParallelWalk<'a>,
}

impl<'a> Parallels<'a> {
    pub(crate) fn new(timeline: &'a Timeline, walk: ParallelWalk<'a>) -> Self {
        Self { timeline, walk }
    }
}

impl<'a> Iterator for Parallels<'a> {
    type Item = ParallelRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.walk.next()?;
        ParallelRef::new(self.timeline, index)
    }
}

// Views compare by node identity, never by content.
macro_rules! impl_view_identity {
    ($($T:ident => $kind:expr),* $(,)?) => {
        $(
            impl PartialEq for $T<'_> {
                fn eq(&self, other: &Self) -> bool {
                    std::ptr::eq(self.timeline, other.timeline) && self.index == other.index
                }
            }

            impl Eq for $T<'_> {}

            impl fmt::Debug for $T<'_> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}#{}", $kind, self.index)
                }
            }
        )*
    };
}

impl_view_identity!(
    SequenceRef => NodeKind::Sequence,
    ParallelRef => NodeKind::Parallel,
    AudioRef => NodeKind::Audio,
    TextRef => NodeKind::Text,
);
