//! voxana-algorithms: Per-event analysis algorithms.
//!
//! This crate provides the three analysis steps applied to each event:
//! - **EnergyRedistributor** - moves negligible voxels' energy to their
//!   nearest significant neighbor
//! - **VoxelTrackAssociator** - maps significant voxels back to the
//!   track containing them
//! - **TrackSelector** - scores, filters and ranks tracks by energy
//!
#![warn(missing_docs)]

mod associate;
mod length;
mod processing;
mod redistribute;
mod select;
pub mod spatial;

pub use associate::VoxelTrackAssociator;
pub use length::{EdgeLengthSum, EndpointSpan};
pub use processing::{process_event, process_events, EventSummary};
pub use redistribute::EnergyRedistributor;
pub use select::TrackSelector;
pub use spatial::SpatialGrid3;

// Re-export core types used in every signature
pub use voxana_core::{Error, Result, ScoredTrack, Track, TrackLength, Voxel, VoxelData};
