//! High-level helpers composing the per-event analysis steps.

use rayon::prelude::*;

use voxana_core::{
    EventObserver, NullObserver, Result, ScoredTrack, Track, TrackLength, VoxelData,
};

use crate::{EnergyRedistributor, TrackSelector, VoxelTrackAssociator};

/// Per-event analysis output.
#[derive(Debug, Clone)]
pub struct EventSummary {
    /// New energy per voxel, in input order.
    pub new_energies: Vec<f64>,
    /// Containing-track index per voxel, `None` for negligible voxels.
    pub associations: Vec<Option<usize>>,
    /// Tracks passing the threshold, ranked descending by energy.
    pub selected: Vec<ScoredTrack>,
}

/// Runs the full per-event pipeline in dependency order.
///
/// Track construction is an external concern: `build_tracks` receives
/// the voxels with redistributed energies and returns the event's
/// tracks, whose adjacency this crate never derives.
///
/// # Errors
/// Propagates any redistribution, association or selection error; the
/// caller decides whether to skip the event or abort the run.
pub fn process_event<B>(
    voxels: &[VoxelData],
    build_tracks: B,
    redistributor: &EnergyRedistributor,
    selector: &TrackSelector,
    length_model: &dyn TrackLength,
    observer: &mut dyn EventObserver,
) -> Result<EventSummary>
where
    B: Fn(&[VoxelData]) -> Vec<Track>,
{
    let new_energies = redistributor.redistribute(voxels, observer)?;
    let updated: Vec<VoxelData> = voxels
        .iter()
        .zip(&new_energies)
        .map(|(voxel, &energy)| voxel.with_energy(energy))
        .collect();

    let tracks = build_tracks(&updated);
    let associations = VoxelTrackAssociator::new().associate(&updated, &tracks)?;
    let selected = selector.select(&tracks, length_model, observer)?;

    Ok(EventSummary {
        new_energies,
        associations,
        selected,
    })
}

/// Processes independent events in parallel.
///
/// Events never share data, so they are distributed over the rayon
/// thread pool. Diagnostics are dropped here; use [`process_event`]
/// with an observer when per-decision records are needed.
///
/// # Errors
/// Returns the first event error rayon encounters.
pub fn process_events<B>(
    events: &[Vec<VoxelData>],
    build_tracks: B,
    redistributor: &EnergyRedistributor,
    selector: &TrackSelector,
    length_model: &dyn TrackLength,
) -> Result<Vec<EventSummary>>
where
    B: Fn(&[VoxelData]) -> Vec<Track> + Sync,
{
    events
        .par_iter()
        .map(|voxels| {
            process_event(
                voxels,
                &build_tracks,
                redistributor,
                selector,
                length_model,
                &mut NullObserver,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::EdgeLengthSum;
    use approx::assert_relative_eq;

    /// One track per contiguous run of significant voxels, chained
    /// edges. Stands in for the external graph builder.
    fn chain_builder(voxels: &[VoxelData]) -> Vec<Track> {
        let nodes: Vec<VoxelData> = voxels.iter().filter(|v| !v.negligible).copied().collect();
        if nodes.is_empty() {
            return Vec::new();
        }
        let edges = (0..nodes.len().saturating_sub(1)).map(|i| (i, i + 1)).collect();
        vec![Track::from_parts(nodes, edges)]
    }

    #[test]
    fn test_pipeline_composition() {
        let voxels = vec![
            VoxelData::new(0, 0.0, 0.0, 0.0, 5.0, false),
            VoxelData::new(1, 1.0, 0.0, 0.0, 1.0, true),
            VoxelData::new(2, 10.0, 0.0, 0.0, 3.0, false),
        ];

        let summary = process_event(
            &voxels,
            chain_builder,
            &EnergyRedistributor::new(),
            &TrackSelector::new(0.0),
            &EdgeLengthSum,
            &mut NullObserver,
        )
        .unwrap();

        assert_eq!(summary.new_energies, vec![6.0, 0.0, 3.0]);
        assert_eq!(summary.associations, vec![Some(0), None, Some(0)]);
        assert_eq!(summary.selected.len(), 1);
        assert_relative_eq!(summary.selected[0].energy, 9.0);
    }

    #[test]
    fn test_batch_matches_single_event() {
        let events: Vec<Vec<VoxelData>> = (0..8)
            .map(|e| {
                vec![
                    VoxelData::new(0, f64::from(e), 0.0, 0.0, 10.0, false),
                    VoxelData::new(1, f64::from(e) + 1.0, 0.0, 0.0, 0.5, true),
                ]
            })
            .collect();

        let redistributor = EnergyRedistributor::new();
        let selector = TrackSelector::new(5.0);
        let summaries = process_events(
            &events,
            chain_builder,
            &redistributor,
            &selector,
            &EdgeLengthSum,
        )
        .unwrap();

        assert_eq!(summaries.len(), events.len());
        for (event, summary) in events.iter().zip(&summaries) {
            let single = process_event(
                event,
                chain_builder,
                &redistributor,
                &selector,
                &EdgeLengthSum,
                &mut NullObserver,
            )
            .unwrap();
            assert_eq!(summary.new_energies, single.new_energies);
            assert_eq!(summary.associations, single.associations);
        }
    }
}
