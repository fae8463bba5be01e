//! Error types for voxana-core.

use crate::VoxelId;
use thiserror::Error;

/// Result type alias for voxana operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for per-event analysis.
///
/// All variants signal an internal inconsistency within one event; the
/// caller decides whether to skip the event or abort the run. Empty
/// inputs and empty selection results are valid outcomes, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Every voxel in the event is negligible, so redistribution has no
    /// target to receive their energy.
    #[error("no significant voxel to receive energy from {negligible} negligible voxels")]
    NoSignificantTarget {
        /// Number of negligible voxels left without a target.
        negligible: usize,
    },

    /// A significant voxel belongs to no track, violating the contract
    /// with the track builder.
    #[error("significant voxel {0} is not contained in any track")]
    UnassociatedVoxel(VoxelId),

    /// A voxel carries a non-finite or negative energy.
    #[error("voxel {id} has invalid energy {energy}")]
    InvalidEnergy {
        /// Offending voxel.
        id: VoxelId,
        /// The rejected energy value.
        energy: f64,
    },

    /// Two voxels in the same event share an identifier.
    #[error("duplicate voxel identifier {0} in event")]
    DuplicateVoxelId(VoxelId),
}
