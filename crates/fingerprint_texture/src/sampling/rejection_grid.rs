//! Unbounded spatial hash that enforces a minimum distance between accepted points.
use std::collections::HashMap;
use std::f64::consts::SQRT_2;

use glam::DVec2;

/// Poisson-disc rejection grid.
///
/// Cells are `sqrt(2) * radius` wide, so any point closer than `radius` to a
/// candidate lies in the candidate's cell or one of its eight neighbours.
/// Points are never removed.
#[derive(Debug, Clone)]
pub struct RejectionGrid {
    radius: f64,
    radius_squared: f64,
    /// Inverse cell width: multiply a coordinate by this to get its cell index.
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<DVec2>>,
    len: usize,
}

impl RejectionGrid {
    pub fn new(radius: f64) -> Self {
        debug_assert!(radius > 0.0 && radius.is_finite());
        Self {
            radius,
            radius_squared: radius * radius,
            cell_size: 1.0 / (SQRT_2 * radius),
            cells: HashMap::new(),
            len: 0,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of accepted points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn cell_of(&self, p: DVec2) -> (i64, i64) {
        (
            (p.x * self.cell_size).floor() as i64,
            (p.y * self.cell_size).floor() as i64,
        )
    }

    /// Returns true if an accepted point lies closer than `radius` to `p`.
    ///
    /// Cell indices saturate for coordinates beyond the `i64` range.
    pub fn contains_conflict(&self, p: DVec2) -> bool {
        let (cx, cy) = self.cell_of(p);
        for x in cx.saturating_sub(1)..=cx.saturating_add(1) {
            for y in cy.saturating_sub(1)..=cy.saturating_add(1) {
                let Some(points) = self.cells.get(&(x, y)) else {
                    continue;
                };
                if points
                    .iter()
                    .any(|q| q.distance_squared(p) < self.radius_squared)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Accepts `p` if no stored point is closer than `radius`.
    ///
    /// A rejected point leaves the grid unchanged.
    pub fn insert(&mut self, p: DVec2) -> bool {
        if !p.is_finite() || self.contains_conflict(p) {
            return false;
        }
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(p);
        self.len += 1;
        true
    }

    /// Iterates all accepted points, grouped by cell.
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.cells.values().flat_map(|cell| cell.iter().copied())
    }
}
