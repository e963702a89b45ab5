/*!
 * Tests for error types and conversions
 */

use media_overlay::errors::{BuildError, ConfigError, OverlayError, Slot};
use media_overlay::NodeKind;

#[test]
fn test_buildError_slotOccupied_shouldDisplayCorrectly() {
    let error = BuildError::SlotOccupied { index: 3, slot: Slot::Audio };
    let display = format!("{}", error);
    assert!(display.contains("audio slot"));
    assert!(display.contains("#3"));
}

#[test]
fn test_buildError_foreignParent_shouldNameKind() {
    let error = BuildError::ForeignParent { kind: NodeKind::Parallel };
    assert_eq!(error.to_string(), "par parent handle belongs to another timeline");
}

#[test]
fn test_buildError_tooDeep_shouldDisplayLimit() {
    let error = BuildError::TooDeep { depth: 9, max: 8 };
    assert!(error.to_string().contains("limit of 8"));
}

#[test]
fn test_overlayError_fromBuildError_shouldWrapCorrectly() {
    let error: OverlayError = BuildError::RootAlreadySet.into();
    let display = format!("{}", error);
    assert!(display.contains("Build error"));
    assert!(display.contains("root sequence"));
}

#[test]
fn test_overlayError_fromConfigError_shouldWrapCorrectly() {
    let config_error = ConfigError::InvalidValue {
        field: "max_nesting_depth",
        message: "too small".to_string(),
    };
    let error: OverlayError = config_error.into();
    assert!(error.to_string().contains("max_nesting_depth"));
}

#[test]
fn test_overlayError_fromAnyhow_shouldWrapAsUnknown() {
    let error: OverlayError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, OverlayError::Unknown(ref msg) if msg == "something odd"));
}
