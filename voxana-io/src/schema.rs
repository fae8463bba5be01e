//! On-disk JSON schema for events and summaries.

use serde::{Deserialize, Serialize};
use voxana_core::ScoredTrack;

/// One voxel as written by the upstream reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoxelRecord {
    /// Voxel identifier, unique within the event.
    pub id: u32,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
    /// Deposited energy.
    pub energy: f64,
    /// Significance flag from upstream voxelization.
    pub negligible: bool,
}

/// One track topology: node ids plus adjacency edges, both produced by
/// the external graph builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Ids of the voxels forming the track.
    pub nodes: Vec<u32>,
    /// Adjacency edges as index pairs into `nodes`.
    pub edges: Vec<(usize, usize)>,
}

/// One event in an input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event number.
    pub id: u64,
    /// Voxels of the event, in upstream order.
    pub voxels: Vec<VoxelRecord>,
    /// Track topologies built from the significant voxels.
    pub tracks: Vec<TrackRecord>,
}

/// Per-event analysis summary written to output files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Event number.
    pub event: u64,
    /// New energy per voxel, in input order.
    pub new_energies: Vec<f64>,
    /// Containing-track index per voxel, null for negligible voxels.
    pub associations: Vec<Option<usize>>,
    /// Selected tracks, ranked descending by energy.
    pub selected: Vec<ScoredTrack>,
}
