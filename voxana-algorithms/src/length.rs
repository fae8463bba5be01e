//! Stock track-length models.
//!
//! The length definition belongs to the collaborator implementing
//! [`TrackLength`]; selection just records the value. Two simple models
//! are provided here, selectable from the CLI.

use voxana_core::{Track, TrackLength};

/// Sum of the Euclidean lengths of the track's adjacency edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeLengthSum;

impl TrackLength for EdgeLengthSum {
    fn length(&self, track: &Track) -> f64 {
        track
            .edges
            .iter()
            .filter_map(|&edge| track.edge_positions(edge))
            .map(|(a, b)| a.distance(&b))
            .sum()
    }

    fn name(&self) -> &'static str {
        "edge-length-sum"
    }
}

/// Maximum distance between any two nodes of the track.
///
/// Ignores the edge topology entirely; a cheap proxy for the track's
/// spatial extent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointSpan;

impl TrackLength for EndpointSpan {
    fn length(&self, track: &Track) -> f64 {
        let mut max = 0.0_f64;
        for (i, a) in track.nodes.iter().enumerate() {
            for b in &track.nodes[i + 1..] {
                max = max.max(a.position.distance(&b.position));
            }
        }
        max
    }

    fn name(&self) -> &'static str {
        "endpoint-span"
    }
}
