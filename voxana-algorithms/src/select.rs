//! Track scoring, filtering and ranking.

use voxana_core::{Error, EventObserver, Result, ScoredTrack, Track, TrackLength};

/// Selects tracks above an energy threshold and ranks them.
///
/// Each track is scored by total energy (post-redistribution). Tracks
/// strictly below the threshold are discarded with a diagnostic record;
/// survivors get a geometric length from the injected model and are
/// sorted descending by energy. The sort is stable, so equal-energy
/// tracks keep their input order. An empty result is a valid outcome.
#[derive(Debug, Clone, Copy)]
pub struct TrackSelector {
    threshold: f64,
}

impl TrackSelector {
    /// Creates a selector with the given energy threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Returns the energy threshold.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Scores and ranks the given tracks.
    ///
    /// The `track` field of each result is the index of the track in
    /// `tracks`.
    ///
    /// # Errors
    /// [`Error::InvalidEnergy`] if a track node carries a non-finite
    /// energy, which would poison the threshold comparison.
    pub fn select(
        &self,
        tracks: &[Track],
        length_model: &dyn TrackLength,
        observer: &mut dyn EventObserver,
    ) -> Result<Vec<ScoredTrack>> {
        let mut selected = Vec::new();

        for (index, track) in tracks.iter().enumerate() {
            if let Some(node) = track.iter().find(|v| !v.energy.is_finite()) {
                return Err(Error::InvalidEnergy {
                    id: node.id,
                    energy: node.energy,
                });
            }

            let energy = track.energy();
            if energy >= self.threshold {
                selected.push(ScoredTrack {
                    energy,
                    length: length_model.length(track),
                    track: index,
                });
            } else {
                observer.track_discarded(index, energy);
            }
        }

        // Stable: equal energies keep input order.
        selected.sort_by(|a, b| b.energy.total_cmp(&a.energy));

        for (rank, scored) in selected.iter().enumerate() {
            observer.track_ranked(rank, scored.energy, scored.length);
        }

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::EdgeLengthSum;
    use approx::assert_relative_eq;
    use voxana_core::{DiagnosticRecord, NullObserver, RecordingObserver, VoxelData};

    fn track_with_energy(id_base: u32, energy: f64) -> Track {
        Track::from_parts(
            vec![
                VoxelData::new(id_base, 0.0, 0.0, 0.0, energy / 2.0, false),
                VoxelData::new(id_base + 1, 1.0, 0.0, 0.0, energy / 2.0, false),
            ],
            vec![(0, 1)],
        )
    }

    #[test]
    fn test_threshold_and_ordering() {
        let tracks = vec![
            track_with_energy(0, 50.0),
            track_with_energy(10, 10.0),
            track_with_energy(20, 80.0),
        ];
        let mut observer = RecordingObserver::new();

        let selected = TrackSelector::new(20.0)
            .select(&tracks, &EdgeLengthSum, &mut observer)
            .unwrap();

        let energies: Vec<f64> = selected.iter().map(|s| s.energy).collect();
        assert_eq!(energies, vec![80.0, 50.0]);
        assert_eq!(selected[0].track, 2);
        assert_eq!(selected[1].track, 0);
        assert!(observer
            .records()
            .contains(&DiagnosticRecord::TrackDiscarded {
                track: 1,
                energy: 10.0
            }));
    }

    #[test]
    fn test_no_track_above_threshold_is_empty_not_error() {
        let tracks = vec![track_with_energy(0, 5.0), track_with_energy(10, 8.0)];
        let selected = TrackSelector::new(20.0)
            .select(&tracks, &EdgeLengthSum, &mut NullObserver)
            .unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let tracks = vec![track_with_energy(0, 20.0)];
        let selected = TrackSelector::new(20.0)
            .select(&tracks, &EdgeLengthSum, &mut NullObserver)
            .unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_stable_order_on_equal_energies() {
        let tracks = vec![
            track_with_energy(0, 30.0),
            track_with_energy(10, 30.0),
            track_with_energy(20, 30.0),
        ];
        let selected = TrackSelector::new(0.0)
            .select(&tracks, &EdgeLengthSum, &mut NullObserver)
            .unwrap();
        let order: Vec<usize> = selected.iter().map(|s| s.track).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_length_comes_from_model() {
        let tracks = vec![track_with_energy(0, 40.0)];
        let selected = TrackSelector::new(0.0)
            .select(&tracks, &EdgeLengthSum, &mut NullObserver)
            .unwrap();
        assert_relative_eq!(selected[0].length, 1.0);
    }

    #[test]
    fn test_non_finite_track_energy_rejected() {
        let mut track = track_with_energy(0, 40.0);
        track.nodes[1].energy = f64::INFINITY;
        let err = TrackSelector::new(0.0)
            .select(&[track], &EdgeLengthSum, &mut NullObserver)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEnergy { .. }));
    }
}
