//! Voxel traits and types for detector event data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a voxel, stable and unique within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelId(pub u32);

impl VoxelId {
    /// Creates a new voxel identifier.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VoxelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 3D position in a consistent length unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Computes the squared Euclidean distance to another position.
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Computes the Euclidean distance to another position.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Core data structure for a single voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelData {
    /// Voxel identifier.
    pub id: VoxelId,
    /// Spatial position.
    pub position: Position,
    /// Deposited energy in a consistent energy unit.
    pub energy: f64,
    /// Whether the voxel is below the significance threshold.
    pub negligible: bool,
}

impl VoxelData {
    /// Creates a new voxel.
    #[inline]
    pub fn new(id: u32, x: f64, y: f64, z: f64, energy: f64, negligible: bool) -> Self {
        Self {
            id: VoxelId::new(id),
            position: Position::new(x, y, z),
            energy,
            negligible,
        }
    }

    /// Returns a copy of this voxel with its energy replaced.
    #[inline]
    pub fn with_energy(&self, energy: f64) -> Self {
        Self { energy, ..*self }
    }
}

/// Trait for voxel data from upstream voxelization.
///
/// This trait provides a common interface for different voxel
/// representations (owned values, table rows, bindings) to expose
/// their data in a uniform way.
pub trait Voxel: Send + Sync {
    /// Returns the voxel identifier.
    fn id(&self) -> VoxelId;

    /// Returns the spatial position.
    fn position(&self) -> Position;

    /// Returns the deposited energy.
    fn energy(&self) -> f64;

    /// Returns true if the voxel is flagged negligible.
    fn is_negligible(&self) -> bool;
}

impl Voxel for VoxelData {
    #[inline]
    fn id(&self) -> VoxelId {
        self.id
    }

    #[inline]
    fn position(&self) -> Position {
        self.position
    }

    #[inline]
    fn energy(&self) -> f64 {
        self.energy
    }

    #[inline]
    fn is_negligible(&self) -> bool {
        self.negligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0, 0.0);
        let p2 = Position::new(3.0, 4.0, 0.0);
        assert_relative_eq!(p1.distance_squared(&p2), 25.0);
        assert_relative_eq!(p1.distance(&p2), 5.0);
    }

    #[test]
    fn test_position_distance_symmetric() {
        let p1 = Position::new(1.0, -2.0, 3.5);
        let p2 = Position::new(-4.0, 0.5, 2.0);
        assert_relative_eq!(p1.distance(&p2), p2.distance(&p1));
    }

    #[test]
    fn test_voxel_data() {
        let voxel = VoxelData::new(7, 1.0, 2.0, 3.0, 45.0, false);
        assert_eq!(voxel.id().as_u32(), 7);
        assert_relative_eq!(voxel.energy(), 45.0);
        assert!(!voxel.is_negligible());
    }

    #[test]
    fn test_with_energy_preserves_identity() {
        let voxel = VoxelData::new(3, 1.0, 1.0, 1.0, 10.0, true);
        let updated = voxel.with_energy(0.0);
        assert_eq!(updated.id, voxel.id);
        assert_eq!(updated.position, voxel.position);
        assert!(updated.negligible);
        assert_relative_eq!(updated.energy, 0.0);
    }

    #[test]
    fn test_voxel_id_ordering() {
        assert!(VoxelId::new(2) < VoxelId::new(10));
    }
}
