/*!
 * Common test utilities for the media-overlay test suite
 */

use media_overlay::{DocumentId, MediaRef, ParallelId, SequenceId, Timeline, TimelineBuilder};
use rand::Rng;

/// The overlay (SMIL) document itself
pub const SMIL: DocumentId = DocumentId::from_raw(100);

/// The content document narrated by the test timelines
pub const CONTENT: DocumentId = DocumentId::from_raw(1);

/// Some other content document
pub const OTHER: DocumentId = DocumentId::from_raw(2);

/// Route log output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn audio_ref() -> MediaRef {
    MediaRef::new("audio/narration.mp3", "", Some(DocumentId::from_raw(50)))
}

pub fn text_in(document: DocumentId, fragment: &str) -> MediaRef {
    MediaRef::new("chapter.xhtml", fragment, Some(document))
}

/// Add a parallel with an optional clip and an optional text document
pub fn add_par(
    builder: &mut TimelineBuilder,
    parent: SequenceId,
    clip: Option<(u32, u32)>,
    text_doc: Option<DocumentId>,
) -> ParallelId {
    let par = builder.parallel(parent, "").unwrap();
    if let Some((begin, end)) = clip {
        builder.audio(par, audio_ref(), begin, end).unwrap();
    }
    if let Some(doc) = text_doc {
        builder.text(par, text_in(doc, &format!("f{}", par.node().index()))).unwrap();
    }
    par
}

/// Two parallels: P1 with audio 0-1000 and text in `p1_text_doc`, then P2
/// with audio 1000-3000 and no text.
pub fn two_clip_timeline(p1_text_doc: DocumentId) -> (Timeline, ParallelId, ParallelId) {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 3000);
    let body = builder.root("", None).unwrap();
    let p1 = add_par(&mut builder, body, Some((0, 1000)), Some(p1_text_doc));
    let p2 = add_par(&mut builder, body, Some((1000, 3000)), None);
    (builder.build(), p1, p2)
}

/// Random tree with nested sequences, missing audio, foreign text and
/// degenerate clip windows mixed in.
pub fn random_timeline<R: Rng>(rng: &mut R, max_children: usize, max_depth: usize) -> Timeline {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 0);
    let body = builder.root("", None).unwrap();
    fill_sequence(rng, &mut builder, body, max_children, max_depth);
    builder.build()
}

fn fill_sequence<R: Rng>(
    rng: &mut R,
    builder: &mut TimelineBuilder,
    seq: SequenceId,
    max_children: usize,
    depth_left: usize,
) {
    let children = rng.random_range(0..=max_children);
    for _ in 0..children {
        if depth_left > 0 && rng.random_bool(0.25) {
            let inner = builder.sequence(seq, "", None).unwrap();
            fill_sequence(rng, builder, inner, max_children, depth_left - 1);
            continue;
        }

        let clip = if rng.random_bool(0.8) {
            let begin = rng.random_range(0..5_000u32);
            let end = if rng.random_bool(0.9) {
                begin + rng.random_range(0..2_000u32)
            } else {
                rng.random_range(0..=begin)
            };
            Some((begin, end))
        } else {
            None
        };
        let text = match rng.random_range(0..4u8) {
            0 => None,
            1 => Some(OTHER),
            _ => Some(CONTENT),
        };
        add_par(builder, seq, clip, text);
    }
}
