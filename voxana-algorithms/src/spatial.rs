//! Spatial indexing for nearest-significant-voxel lookup.

use std::collections::HashMap;
use voxana_core::Position;

/// Grid cell index.
type Cell = (i64, i64, i64);

/// Spatial grid for 3D nearest-neighbor queries.
///
/// Space is divided into cubic cells; a query scans cells in expanding
/// Chebyshev shells around the query point and stops once no closer
/// entry can exist in an unscanned shell. Entries carry an ordered
/// payload used to break exact distance ties, so query results do not
/// depend on insertion order.
#[derive(Debug)]
pub struct SpatialGrid3<T> {
    cell_size: f64,
    cells: HashMap<Cell, Vec<(Position, T)>>,
    bounds: Option<(Cell, Cell)>,
}

impl<T: Copy + Ord> SpatialGrid3<T> {
    /// Creates a new grid with the given cell edge length.
    ///
    /// # Panics
    /// Panics if `cell_size` is not strictly positive.
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
            bounds: None,
        }
    }

    fn cell_of(&self, position: &Position) -> Cell {
        (
            (position.x / self.cell_size).floor() as i64,
            (position.y / self.cell_size).floor() as i64,
            (position.z / self.cell_size).floor() as i64,
        )
    }

    /// Returns true if the grid holds no entries.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Inserts an entry at the given position.
    pub fn insert(&mut self, position: Position, value: T) {
        let cell = self.cell_of(&position);
        self.cells.entry(cell).or_default().push((position, value));
        self.bounds = Some(match self.bounds {
            None => (cell, cell),
            Some((lo, hi)) => (
                (lo.0.min(cell.0), lo.1.min(cell.1), lo.2.min(cell.2)),
                (hi.0.max(cell.0), hi.1.max(cell.1), hi.2.max(cell.2)),
            ),
        });
    }

    /// Finds the entry nearest to `query`, returning its squared
    /// distance and payload.
    ///
    /// Exact distance ties resolve to the smallest payload. Returns
    /// `None` only when the grid is empty.
    pub fn nearest(&self, query: &Position) -> Option<(f64, T)> {
        let (lo, hi) = self.bounds?;
        let center = self.cell_of(query);

        // Last shell that can contain an occupied cell.
        let max_shell = [
            (center.0 - lo.0).abs(),
            (center.1 - lo.1).abs(),
            (center.2 - lo.2).abs(),
            (hi.0 - center.0).abs(),
            (hi.1 - center.1).abs(),
            (hi.2 - center.2).abs(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        let mut best: Option<(f64, T)> = None;
        for shell in 0..=max_shell {
            // An entry in shell `s` is at least `(s - 1)` cell widths
            // from the query point. Strict comparison: boundary entries
            // at exactly the best distance must still be scanned so the
            // id tie-break stays order-independent.
            if shell > 0 {
                if let Some((best_d2, _)) = best {
                    let reachable = (shell - 1) as f64 * self.cell_size;
                    if best_d2 < reachable * reachable {
                        break;
                    }
                }
            }
            self.scan_shell(center, shell, query, &mut best);
        }
        best
    }

    fn scan_shell(&self, center: Cell, shell: i64, query: &Position, best: &mut Option<(f64, T)>) {
        for dx in -shell..=shell {
            for dy in -shell..=shell {
                for dz in -shell..=shell {
                    if dx.abs().max(dy.abs()).max(dz.abs()) != shell {
                        continue;
                    }
                    let cell = (center.0 + dx, center.1 + dy, center.2 + dz);
                    let Some(entries) = self.cells.get(&cell) else {
                        continue;
                    };
                    for (position, value) in entries {
                        let d2 = query.distance_squared(position);
                        let closer = match best {
                            None => true,
                            Some((best_d2, best_value)) => {
                                d2 < *best_d2 || (d2 == *best_d2 && *value < *best_value)
                            }
                        };
                        if closer {
                            *best = Some((d2, *value));
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid: SpatialGrid3<u32> = SpatialGrid3::new(10.0);
        assert!(grid.is_empty());
        assert!(grid.nearest(&Position::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_nearest_in_same_cell() {
        let mut grid = SpatialGrid3::new(10.0);
        grid.insert(Position::new(1.0, 1.0, 1.0), 0_u32);
        grid.insert(Position::new(8.0, 8.0, 8.0), 1_u32);

        let (_, value) = grid.nearest(&Position::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn test_nearest_across_cells() {
        let mut grid = SpatialGrid3::new(5.0);
        grid.insert(Position::new(40.0, 0.0, 0.0), 7_u32);
        grid.insert(Position::new(-60.0, 0.0, 0.0), 8_u32);

        let (d2, value) = grid.nearest(&Position::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(value, 7);
        assert!((d2 - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_near_entry_not_shadowed_by_cell_boundary() {
        // Query sits at a cell edge; the nearest entry lives in the
        // adjacent cell while a farther one shares the query's cell.
        let mut grid = SpatialGrid3::new(10.0);
        grid.insert(Position::new(9.0, 0.0, 0.0), 0_u32);
        grid.insert(Position::new(10.5, 0.0, 0.0), 1_u32);

        let (_, value) = grid.nearest(&Position::new(9.9, 0.0, 0.0)).unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn test_exact_tie_prefers_smallest_payload() {
        let mut grid = SpatialGrid3::new(10.0);
        grid.insert(Position::new(3.0, 0.0, 0.0), 5_u32);
        grid.insert(Position::new(-3.0, 0.0, 0.0), 2_u32);

        let (_, value) = grid.nearest(&Position::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(value, 2);
    }
}
