/*!
 * # media-overlay - read-aloud timing trees
 *
 * A Rust library modelling the synchronized narration of a publication's
 * content documents: each document gets a timeline, a tree of sequences and
 * parallels whose leaves pair an audio clip with a text fragment.
 *
 * ## Features
 *
 * - Arena-backed timing trees built bottom-up and frozen afterwards
 * - Time to fragment lookup with inclusive clip ends
 * - Computed durations next to the declared metadata duration
 * - Clip start offsets and 1-based ordinal indexing of parallels
 * - Publication-wide percent/position conversion across timelines
 * - Weak timeline handles that degrade to empty results after teardown
 *
 * ## Architecture
 *
 * - `document`: Document handles, href resolution, leaf references
 * - `node`: Arena storage, node kinds and typed handles
 * - `builder`: Construction and attachment protocol
 * - `timeline`: The timeline aggregate and its queries
 * - `view`: Borrowed read-only views over nodes
 * - `navigation`: Duration, lookup and offset traversals
 * - `model`: Publication aggregate and weak handles
 * - `config`: Build configuration
 * - `errors`: Custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod builder;
pub mod config;
pub mod document;
pub mod errors;
pub mod model;
pub mod node;
pub mod timeline;
pub mod view;

mod navigation;

// Re-export main types for easier usage
pub use builder::TimelineBuilder;
pub use config::{BuildConfig, SlotPolicy};
pub use document::{DocumentId, DocumentResolver, ManifestIndex, MediaRef};
pub use errors::{BuildError, ConfigError, OverlayError, Slot};
pub use model::{OverlayModel, Position, TimelineHandle};
pub use node::{clip_duration_ms, AudioId, NodeId, NodeKind, ParallelId, SequenceId, TextId};
pub use timeline::Timeline;
pub use view::{AudioRef, ContainerRef, ParallelRef, Parallels, SequenceRef, TextRef};
