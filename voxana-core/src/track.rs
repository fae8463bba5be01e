//! Track types and the track-length seam.

use crate::{Position, VoxelData};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A connectivity graph over significant voxels, representing a
/// candidate particle trajectory.
///
/// Tracks are produced by an external graph builder: nodes are copies of
/// the event's significant voxels (identifiers preserved) and edges
/// encode the builder's spatial adjacency as index pairs into `nodes`.
/// This crate never derives adjacency itself.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    /// Voxels belonging to this track.
    pub nodes: Vec<VoxelData>,
    /// Adjacency edges as index pairs into `nodes`.
    pub edges: Vec<(usize, usize)>,
}

impl Track {
    /// Creates an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a track from its nodes and adjacency edges.
    pub fn from_parts(nodes: Vec<VoxelData>, edges: Vec<(usize, usize)>) -> Self {
        Self { nodes, edges }
    }

    /// Returns the number of voxels in the track.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the track has no voxels.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over the track's voxels.
    pub fn iter(&self) -> impl Iterator<Item = &VoxelData> {
        self.nodes.iter()
    }

    /// Total track energy: the sum of its voxels' energies.
    pub fn energy(&self) -> f64 {
        self.nodes.iter().map(|v| v.energy).sum()
    }

    /// Returns the endpoints of an edge, if the pair is in bounds.
    pub fn edge_positions(&self, edge: (usize, usize)) -> Option<(Position, Position)> {
        let a = self.nodes.get(edge.0)?;
        let b = self.nodes.get(edge.1)?;
        Some((a.position, b.position))
    }
}

impl FromIterator<VoxelData> for Track {
    fn from_iter<I: IntoIterator<Item = VoxelData>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
            edges: Vec::new(),
        }
    }
}

/// Trait for geometric track-length models.
///
/// The definition of a track's length (longest path, total edge length,
/// endpoint span, ...) is owned by the collaborator implementing this
/// trait; selection only records the value it returns.
pub trait TrackLength: Send + Sync {
    /// Computes the geometric length of a track over its topology.
    fn length(&self, track: &Track) -> f64;

    /// Returns the name of the length model.
    fn name(&self) -> &'static str;
}

/// A track that passed energy selection, annotated with its score.
///
/// `track` is the index of the track in the input sequence handed to the
/// selector; the input order is the identity space for tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredTrack {
    /// Total track energy after redistribution.
    pub energy: f64,
    /// Geometric length reported by the length model.
    pub length: f64,
    /// Index of the track in the input track sequence.
    pub track: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_node_track() -> Track {
        Track::from_parts(
            vec![
                VoxelData::new(0, 0.0, 0.0, 0.0, 10.0, false),
                VoxelData::new(1, 1.0, 0.0, 0.0, 20.0, false),
                VoxelData::new(2, 2.0, 0.0, 0.0, 30.0, false),
            ],
            vec![(0, 1), (1, 2)],
        )
    }

    #[test]
    fn test_track_energy() {
        let track = three_node_track();
        assert_eq!(track.len(), 3);
        assert_relative_eq!(track.energy(), 60.0);
    }

    #[test]
    fn test_empty_track() {
        let track = Track::new();
        assert!(track.is_empty());
        assert_relative_eq!(track.energy(), 0.0);
    }

    #[test]
    fn test_edge_positions_bounds() {
        let track = three_node_track();
        assert!(track.edge_positions((0, 1)).is_some());
        assert!(track.edge_positions((0, 9)).is_none());
    }

    #[test]
    fn test_track_from_iterator() {
        let track: Track = (0..4)
            .map(|i| VoxelData::new(i, f64::from(i), 0.0, 0.0, 1.0, false))
            .collect();
        assert_eq!(track.len(), 4);
        assert!(track.edges.is_empty());
    }
}
