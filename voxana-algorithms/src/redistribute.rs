//! Energy redistribution away from negligible voxels.

use std::collections::HashSet;

use voxana_core::{Error, EventObserver, Position, Result, Voxel, VoxelId};

use crate::spatial::SpatialGrid3;

/// Events at or below this size use the brute-force neighbor scan; the
/// grid only pays off once the O(N*M) scan dominates.
const DEFAULT_GRID_CUTOFF: usize = 128;

/// Redistributes the energy of negligible voxels.
///
/// Each negligible voxel hands its full energy to the nearest
/// significant voxel (Euclidean distance; exact ties resolve to the
/// lowest voxel identifier). The input is never mutated: the result is
/// a new energy value per voxel, in input order, with total event
/// energy conserved.
#[derive(Debug, Clone)]
pub struct EnergyRedistributor {
    grid_cutoff: usize,
}

impl Default for EnergyRedistributor {
    fn default() -> Self {
        Self {
            grid_cutoff: DEFAULT_GRID_CUTOFF,
        }
    }
}

impl EnergyRedistributor {
    /// Creates a redistributor with the default grid cutoff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event size above which the spatial grid is used for
    /// neighbor lookup. Both lookup paths select identical targets.
    pub fn with_grid_cutoff(mut self, cutoff: usize) -> Self {
        self.grid_cutoff = cutoff;
        self
    }

    /// Computes the new energy of every voxel in the event.
    ///
    /// Returns a vector parallel to `voxels`: 0 for negligible voxels,
    /// own energy plus received energy for significant ones.
    ///
    /// # Errors
    /// - [`Error::InvalidEnergy`] if any voxel energy is non-finite or
    ///   negative.
    /// - [`Error::DuplicateVoxelId`] if two voxels share an identifier.
    /// - [`Error::NoSignificantTarget`] if the event has negligible
    ///   voxels but no significant voxel to receive their energy.
    pub fn redistribute<V: Voxel>(
        &self,
        voxels: &[V],
        observer: &mut dyn EventObserver,
    ) -> Result<Vec<f64>> {
        validate(voxels)?;

        let (significant, negligible): (Vec<usize>, Vec<usize>) =
            (0..voxels.len()).partition(|&i| !voxels[i].is_negligible());

        let mut new_energies: Vec<f64> = voxels.iter().map(Voxel::energy).collect();
        if negligible.is_empty() {
            return Ok(new_energies);
        }
        if significant.is_empty() {
            return Err(Error::NoSignificantTarget {
                negligible: negligible.len(),
            });
        }

        let grid = (voxels.len() > self.grid_cutoff).then(|| {
            let mut grid = SpatialGrid3::new(grid_cell_size(voxels, &significant));
            for &i in &significant {
                grid.insert(voxels[i].position(), (voxels[i].id(), i));
            }
            grid
        });

        for &i in &negligible {
            let target = match &grid {
                // Grid is non-empty whenever the significant set is.
                Some(grid) => grid
                    .nearest(&voxels[i].position())
                    .map_or_else(
                        || nearest_significant(voxels, &significant, &voxels[i].position()),
                        |(_, (_, index))| index,
                    ),
                None => nearest_significant(voxels, &significant, &voxels[i].position()),
            };

            let energy = voxels[i].energy();
            new_energies[i] = 0.0;
            new_energies[target] += energy;
            observer.energy_routed(voxels[i].id(), energy, voxels[target].id());
        }

        Ok(new_energies)
    }
}

fn validate<V: Voxel>(voxels: &[V]) -> Result<()> {
    let mut seen = HashSet::with_capacity(voxels.len());
    for voxel in voxels {
        let energy = voxel.energy();
        if !energy.is_finite() || energy < 0.0 {
            return Err(Error::InvalidEnergy {
                id: voxel.id(),
                energy,
            });
        }
        if !seen.insert(voxel.id()) {
            return Err(Error::DuplicateVoxelId(voxel.id()));
        }
    }
    Ok(())
}

/// Brute-force nearest significant voxel, smallest id on exact ties.
fn nearest_significant<V: Voxel>(voxels: &[V], significant: &[usize], query: &Position) -> usize {
    let mut best: Option<(f64, VoxelId, usize)> = None;
    for &j in significant {
        let d2 = query.distance_squared(&voxels[j].position());
        let id = voxels[j].id();
        let closer = match best {
            None => true,
            Some((best_d2, best_id, _)) => d2 < best_d2 || (d2 == best_d2 && id < best_id),
        };
        if closer {
            best = Some((d2, id, j));
        }
    }
    // Caller guarantees `significant` is non-empty.
    best.map_or(0, |(_, _, index)| index)
}

/// Cell edge sized so occupied cells hold a handful of voxels each.
fn grid_cell_size<V: Voxel>(voxels: &[V], significant: &[usize]) -> f64 {
    let mut lo = Position::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut hi = Position::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &i in significant {
        let p = voxels[i].position();
        lo = Position::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z));
        hi = Position::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z));
    }
    let extent = (hi.x - lo.x).max(hi.y - lo.y).max(hi.z - lo.z);
    #[allow(clippy::cast_precision_loss)]
    let divisions = (significant.len() as f64).cbrt().max(1.0);
    if extent > 0.0 {
        extent / divisions
    } else {
        1.0
    }
}
