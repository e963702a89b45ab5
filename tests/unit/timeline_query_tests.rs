/*!
 * Tests for the timeline query operations
 */

use media_overlay::{MediaRef, TimelineBuilder};

use crate::common::{self, add_par, two_clip_timeline, CONTENT, OTHER, SMIL};

#[test]
fn test_scenario_withMatchingText_shouldCountBothClips() {
    let (timeline, p1, p2) = two_clip_timeline(CONTENT);

    assert_eq!(timeline.computed_duration_ms(), 3000);
    assert_eq!(timeline.find_active_parallel(500).map(|p| p.id()), Some(p1));
    assert_eq!(timeline.find_active_parallel(1000).map(|p| p.id()), Some(p1));
    assert_eq!(timeline.find_active_parallel(1001).map(|p| p.id()), Some(p2));
    assert_eq!(timeline.find_offset_ms(p2), 1000);
}

#[test]
fn test_scenario_withForeignText_shouldExcludeFirstClip() {
    let (timeline, p1, p2) = two_clip_timeline(OTHER);

    assert_eq!(timeline.computed_duration_ms(), 2000);
    // P1 is skipped, so P2 owns [0, 2000]
    assert_eq!(timeline.find_active_parallel(500).map(|p| p.id()), Some(p2));
    assert_eq!(timeline.find_active_parallel(2000).map(|p| p.id()), Some(p2));
    assert!(timeline.find_active_parallel(2001).is_none());
    assert_eq!(timeline.find_offset_ms(p2), 0);
    // still found by ordinal, eligibility does not apply there
    assert_eq!(timeline.find_nth_parallel(1).map(|p| p.id()), Some(p1));
}

#[test]
fn test_findActiveParallel_atClipEndBoundary_shouldStayInClip() {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 0);
    let body = builder.root("", None).unwrap();
    add_par(&mut builder, body, Some((0, 100)), None);
    let middle = add_par(&mut builder, body, Some((2000, 2150)), Some(CONTENT));
    let last = add_par(&mut builder, body, Some((0, 10)), None);
    let timeline = builder.build();

    // middle occupies [100, 250]
    assert_eq!(timeline.find_offset_ms(middle), 100);
    assert_eq!(timeline.find_active_parallel(250).map(|p| p.id()), Some(middle));
    assert_eq!(timeline.find_active_parallel(251).map(|p| p.id()), Some(last));
    assert_eq!(timeline.find_active_parallel(260).map(|p| p.id()), Some(last));
    assert!(timeline.find_active_parallel(261).is_none());
}

#[test]
fn test_findActiveParallel_beyondTotalDuration_shouldReturnNone() {
    let (timeline, _, _) = two_clip_timeline(CONTENT);
    assert!(timeline.find_active_parallel(3001).is_none());
    assert!(timeline.find_active_parallel(u32::MAX).is_none());
}

#[test]
fn test_parallelWithoutAudio_shouldNeverContributeOrMatch() {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 0);
    let body = builder.root("", None).unwrap();
    let silent = add_par(&mut builder, body, None, Some(CONTENT));
    let spoken = add_par(&mut builder, body, Some((0, 400)), Some(CONTENT));
    let timeline = builder.build();

    assert_eq!(timeline.computed_duration_ms(), 400);
    for t in [0, 1, 200, 400] {
        let active = timeline.find_active_parallel(t).map(|p| p.id());
        assert_ne!(active, Some(silent));
        assert_eq!(active, Some(spoken));
    }
    assert!(!timeline.parallel(silent).unwrap().is_eligible());
}

#[test]
fn test_zeroLengthClip_shouldBeSkippedByTimeLookup() {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 0);
    let body = builder.root("", None).unwrap();
    let empty = add_par(&mut builder, body, Some((500, 500)), None);
    let inverted = add_par(&mut builder, body, Some((900, 100)), None);
    let real = add_par(&mut builder, body, Some((0, 300)), None);
    let timeline = builder.build();

    assert_eq!(timeline.computed_duration_ms(), 300);
    assert_eq!(timeline.find_active_parallel(0).map(|p| p.id()), Some(real));
    assert!(timeline.parallel(empty).unwrap().is_eligible());
    assert_eq!(timeline.parallel(inverted).unwrap().contribution_ms(), 0);
}

#[test]
fn test_unresolvedTextDocument_shouldNotDisqualifyParallel() {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 0);
    let body = builder.root("", None).unwrap();
    let par = builder.parallel(body, "").unwrap();
    builder.audio(par, common::audio_ref(), 0, 750).unwrap();
    builder.text(par, MediaRef::new("missing.xhtml", "x", None)).unwrap();
    let timeline = builder.build();

    assert_eq!(timeline.computed_duration_ms(), 750);
    assert_eq!(timeline.find_active_parallel(10).map(|p| p.id()), Some(par));
}

#[test]
fn test_nestedSequences_shouldAccumulateAcrossLevels() {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 0);
    let body = builder.root("", None).unwrap();
    let a = add_par(&mut builder, body, Some((0, 1000)), None);
    let chapter = builder.sequence(body, "chapter", None).unwrap();
    let b = add_par(&mut builder, chapter, Some((0, 500)), Some(CONTENT));
    let aside = builder.sequence(chapter, "aside", None).unwrap();
    let skipped = add_par(&mut builder, aside, Some((0, 9000)), Some(OTHER));
    let c = add_par(&mut builder, aside, Some((0, 250)), None);
    let d = add_par(&mut builder, body, Some((0, 100)), None);
    let timeline = builder.build();

    assert_eq!(timeline.computed_duration_ms(), 1850);
    assert_eq!(timeline.sequence(chapter).unwrap().duration_ms(), 750);
    assert_eq!(timeline.sequence(aside).unwrap().duration_ms(), 250);

    assert_eq!(timeline.find_offset_ms(a), 0);
    assert_eq!(timeline.find_offset_ms(b), 1000);
    assert_eq!(timeline.find_offset_ms(skipped), 1500);
    assert_eq!(timeline.find_offset_ms(c), 1500);
    assert_eq!(timeline.find_offset_ms(d), 1750);

    assert_eq!(timeline.find_active_parallel(1500).map(|p| p.id()), Some(b));
    assert_eq!(timeline.find_active_parallel(1501).map(|p| p.id()), Some(c));
    assert_eq!(timeline.find_active_parallel(1751).map(|p| p.id()), Some(d));
}

#[test]
fn test_findNthParallel_shouldCountFromOneInDocumentOrder() {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 0);
    let body = builder.root("", None).unwrap();
    let first = add_par(&mut builder, body, None, None);
    let inner = builder.sequence(body, "", None).unwrap();
    let second = add_par(&mut builder, inner, Some((0, 10)), Some(OTHER));
    let third = add_par(&mut builder, body, Some((0, 10)), None);
    let timeline = builder.build();

    assert!(timeline.find_nth_parallel(0).is_none());
    assert_eq!(timeline.find_nth_parallel(1).map(|p| p.id()), Some(first));
    assert_eq!(timeline.find_nth_parallel(2).map(|p| p.id()), Some(second));
    assert_eq!(timeline.find_nth_parallel(3).map(|p| p.id()), Some(third));
    assert!(timeline.find_nth_parallel(4).is_none());

    assert_eq!(timeline.ordinal_of(second), Some(2));
    assert_eq!(timeline.parallel_count(), 3);
}

#[test]
fn test_emptyTimeline_shouldDegradeToEmptyResults() {
    let timeline = TimelineBuilder::new(SMIL, CONTENT, 4200).build();
    let (other, p1, _) = two_clip_timeline(CONTENT);

    assert!(timeline.is_empty());
    assert!(timeline.root().is_none());
    assert_eq!(timeline.computed_duration_ms(), 0);
    assert_eq!(timeline.declared_duration_ms(), 4200);
    assert!(timeline.find_active_parallel(0).is_none());
    assert!(timeline.find_nth_parallel(1).is_none());
    assert_eq!(timeline.find_offset_ms(p1), 0);
    assert!(other.find_nth_parallel(1).is_some());
}

#[test]
fn test_emptyRootSequence_shouldHaveZeroDuration() {
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 0);
    builder.root("", None).unwrap();
    let timeline = builder.build();

    assert!(!timeline.is_empty());
    assert_eq!(timeline.computed_duration_ms(), 0);
    assert!(timeline.find_active_parallel(0).is_none());
}

#[test]
fn test_handlesFromAnotherTimeline_shouldNotResolve() {
    let (first, p1, p2) = two_clip_timeline(CONTENT);
    let (second, _, _) = two_clip_timeline(CONTENT);

    assert!(second.parallel(p1).is_none());
    assert!(second.node_kind(p2.node()).is_none());
    assert_eq!(second.find_offset_ms(p2), 0);
    assert_eq!(second.ordinal_of(p2), None);
    assert_eq!(first.find_offset_ms(p2), 1000);
}

#[test]
fn test_declaredDuration_shouldBeExposedVerbatim() {
    common::init_logging();
    let mut builder = TimelineBuilder::new(SMIL, CONTENT, 99_000);
    let body = builder.root("", None).unwrap();
    add_par(&mut builder, body, Some((0, 1000)), None);
    let timeline = builder.build();

    assert_eq!(timeline.declared_duration_ms(), 99_000);
    assert_eq!(timeline.computed_duration_ms(), 1000);
}
