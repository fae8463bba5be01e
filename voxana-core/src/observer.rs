//! Diagnostics observer for per-event analysis.
//!
//! The algorithms emit structured records about the decisions they take
//! (energy routing, track discards, final ranking) to an injected
//! observer. Observation is purely diagnostic: computed results are
//! identical whether records are collected, printed, or dropped.

use crate::VoxelId;

/// Sink for structured diagnostic records emitted during analysis.
pub trait EventObserver {
    /// A negligible voxel's energy was routed to its nearest significant
    /// neighbor.
    fn energy_routed(&mut self, from: VoxelId, energy: f64, to: VoxelId);

    /// A track fell below the selection threshold and was discarded.
    fn track_discarded(&mut self, track: usize, energy: f64);

    /// A surviving track was ranked (rank 0 is the most energetic).
    fn track_ranked(&mut self, rank: usize, energy: f64, length: f64);
}

/// Observer that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl EventObserver for NullObserver {
    fn energy_routed(&mut self, _from: VoxelId, _energy: f64, _to: VoxelId) {}
    fn track_discarded(&mut self, _track: usize, _energy: f64) {}
    fn track_ranked(&mut self, _rank: usize, _energy: f64, _length: f64) {}
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagnosticRecord {
    /// Energy moved from a negligible voxel to a significant one.
    EnergyRouted {
        /// Source (negligible) voxel.
        from: VoxelId,
        /// Energy moved, in raw units.
        energy: f64,
        /// Target (significant) voxel.
        to: VoxelId,
    },
    /// A track was discarded by the energy threshold.
    TrackDiscarded {
        /// Index of the track in the input sequence.
        track: usize,
        /// Its total energy, in raw units.
        energy: f64,
    },
    /// A surviving track's final rank.
    TrackRanked {
        /// Rank in the selection output, 0 first.
        rank: usize,
        /// Total track energy, in raw units.
        energy: f64,
        /// Geometric length, in raw units.
        length: f64,
    },
}

/// Observer that collects records in memory, for tests and verbose
/// reporting.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    records: Vec<DiagnosticRecord>,
}

impl RecordingObserver {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records collected so far.
    pub fn records(&self) -> &[DiagnosticRecord] {
        &self.records
    }

    /// Consumes the recorder, returning its records.
    pub fn into_records(self) -> Vec<DiagnosticRecord> {
        self.records
    }
}

impl EventObserver for RecordingObserver {
    fn energy_routed(&mut self, from: VoxelId, energy: f64, to: VoxelId) {
        self.records
            .push(DiagnosticRecord::EnergyRouted { from, energy, to });
    }

    fn track_discarded(&mut self, track: usize, energy: f64) {
        self.records
            .push(DiagnosticRecord::TrackDiscarded { track, energy });
    }

    fn track_ranked(&mut self, rank: usize, energy: f64, length: f64) {
        self.records.push(DiagnosticRecord::TrackRanked {
            rank,
            energy,
            length,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_collects_in_order() {
        let mut observer = RecordingObserver::new();
        observer.energy_routed(VoxelId::new(1), 2.5, VoxelId::new(0));
        observer.track_discarded(3, 7.0);
        observer.track_ranked(0, 80.0, 12.0);

        let records = observer.into_records();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            DiagnosticRecord::EnergyRouted {
                from: VoxelId::new(1),
                energy: 2.5,
                to: VoxelId::new(0),
            }
        );
        assert!(matches!(
            records[2],
            DiagnosticRecord::TrackRanked { rank: 0, .. }
        ));
    }
}
