//! Voxel to track association.

use std::collections::HashMap;

use voxana_core::{Error, Result, Track, Voxel, VoxelId};

/// Associates each significant voxel with the track containing it.
///
/// Association is by voxel identifier: track nodes carry the ids of the
/// voxels they were built from, so membership is a lookup rather than a
/// floating-point position comparison. When a duplicated id appears in
/// several tracks (a builder bug this crate does not verify against),
/// the first track in the input order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoxelTrackAssociator;

impl VoxelTrackAssociator {
    /// Creates a new associator.
    pub fn new() -> Self {
        Self
    }

    /// Returns, per voxel, the index of its containing track in the
    /// input track sequence, or `None` for negligible voxels.
    ///
    /// # Errors
    /// [`Error::UnassociatedVoxel`] if a significant voxel belongs to
    /// no track, which signals a contract violation by the track
    /// builder.
    pub fn associate<V: Voxel>(
        &self,
        voxels: &[V],
        tracks: &[Track],
    ) -> Result<Vec<Option<usize>>> {
        let mut owner: HashMap<VoxelId, usize> = HashMap::new();
        for (index, track) in tracks.iter().enumerate() {
            for node in track.iter() {
                owner.entry(node.id).or_insert(index);
            }
        }

        voxels
            .iter()
            .map(|voxel| {
                if voxel.is_negligible() {
                    return Ok(None);
                }
                owner
                    .get(&voxel.id())
                    .copied()
                    .map(Some)
                    .ok_or(Error::UnassociatedVoxel(voxel.id()))
            })
            .collect()
    }
}
