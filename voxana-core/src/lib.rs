//! voxana-core: Core types for per-event voxel and track analysis.
//!
//! This crate provides the data model shared by the analysis algorithms:
//! voxels (discretized 3D energy deposits), tracks (externally built
//! connectivity graphs over significant voxels), diagnostics observers,
//! and the error types for contract violations between collaborators.
//!

pub mod error;
pub mod observer;
pub mod track;
pub mod units;
pub mod voxel;

pub use error::{Error, Result};
pub use observer::{DiagnosticRecord, EventObserver, NullObserver, RecordingObserver};
pub use track::{ScoredTrack, Track, TrackLength};
pub use voxel::{Position, Voxel, VoxelData, VoxelId};
