//! Square lattice geometry.
//!
//! A position is an integer in `[0, L*L)`; its coordinate is
//! `(x, y) = (p / L, p % L)`, so `x` is the row. Row `0` is the bottom
//! electrode and row `L - 1` the top electrode.
//!
//! The connectivity engine works over `L*L + 2` elements: element `0` is
//! the bottom electrode, element `L*L + 1` the top electrode, and grid
//! position `p` is element `p + 1`.

use serde::Serialize;

/// Classification of a single cell, as handed to rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    /// A particle has been dropped here.
    Occupied,
    /// The cell lies on row `0` or row `L - 1`.
    Electrode,
    Empty,
}

/// Geometry of an `L x L` lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    side: usize,
}

impl Lattice {
    pub fn new(side: usize) -> Self {
        Self { side }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of grid cells, `L*L`.
    pub fn len(&self) -> usize {
        self.side * self.side
    }

    pub fn is_empty(&self) -> bool {
        self.side == 0
    }

    /// Range of positions a particle can be dropped on: every row except
    /// the two electrode rows.
    pub fn interior(&self) -> std::ops::Range<usize> {
        let start = self.side;
        let end = self.len().saturating_sub(self.side).max(start);
        start..end
    }

    /// Number of drawable interior cells, `L*L - 2L`.
    pub fn interior_len(&self) -> usize {
        self.interior().len()
    }

    pub fn coords(&self, position: usize) -> (usize, usize) {
        (position / self.side, position % self.side)
    }

    pub fn position(&self, x: usize, y: usize) -> usize {
        x * self.side + y
    }

    /// `true` for cells on row `0` or row `L - 1`.
    pub fn is_electrode_row(&self, x: usize) -> bool {
        x == 0 || x + 1 == self.side
    }

    /// Union-find element for grid position `position`.
    pub fn element(&self, position: usize) -> usize {
        position + 1
    }

    pub fn bottom_electrode(&self) -> usize {
        0
    }

    pub fn top_electrode(&self) -> usize {
        self.len() + 1
    }

    /// Size of the union-find universe, `L*L + 2`.
    pub fn element_count(&self) -> usize {
        self.len() + 2
    }

    /// Positions in row `0`.
    pub fn bottom_row(&self) -> std::ops::Range<usize> {
        0..self.side
    }

    /// Positions in row `L - 1`.
    pub fn top_row(&self) -> std::ops::Range<usize> {
        self.len() - self.side..self.len()
    }

    /// Cells within squared distance `radius_squared` of `position`,
    /// excluding `position` itself, scanned row by row.
    ///
    /// The scan window is `[x - R, x + R]` clamped to the lattice, and
    /// within it only cells with `(i - x)² + (j - y)² <= R²` are kept.
    pub fn neighbours(
        &self,
        position: usize,
        radius: usize,
        radius_squared: usize,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (x, y) = self.coords(position);
        let reach = |c: usize| c.saturating_add(radius).saturating_add(1).min(self.side);
        let rows = x.saturating_sub(radius)..reach(x);
        let cols = y.saturating_sub(radius)..reach(y);
        rows.flat_map(move |i| cols.clone().map(move |j| (i, j)))
            .filter(move |&(i, j)| {
                (i, j) != (x, y) && i.abs_diff(x).pow(2) + j.abs_diff(y).pow(2) <= radius_squared
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_round_trip() {
        let lattice = Lattice::new(4);
        assert_eq!(lattice.coords(0), (0, 0));
        assert_eq!(lattice.coords(5), (1, 1));
        assert_eq!(lattice.coords(15), (3, 3));
        assert_eq!(lattice.position(2, 3), 11);
    }

    #[test]
    fn test_interior() {
        assert_eq!(Lattice::new(3).interior(), 3..6);
        assert_eq!(Lattice::new(5).interior_len(), 15);
        assert!(Lattice::new(2).interior().is_empty());
    }

    #[test]
    fn test_electrode_layout() {
        let lattice = Lattice::new(3);
        assert_eq!(lattice.element_count(), 11);
        assert_eq!(lattice.bottom_electrode(), 0);
        assert_eq!(lattice.top_electrode(), 10);
        assert_eq!(lattice.bottom_row(), 0..3);
        assert_eq!(lattice.top_row(), 6..9);
        assert!(lattice.is_electrode_row(0));
        assert!(lattice.is_electrode_row(2));
        assert!(!lattice.is_electrode_row(1));
    }

    #[test]
    fn test_neighbours_radius_one_is_von_neumann() {
        let lattice = Lattice::new(3);
        let found: Vec<_> = lattice.neighbours(4, 1, 1).collect();
        assert_eq!(found, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_neighbours_clamped_at_edge() {
        let lattice = Lattice::new(3);
        let found: Vec<_> = lattice.neighbours(3, 1, 1).collect();
        assert_eq!(found, vec![(0, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_neighbours_euclidean_not_chebyshev() {
        let lattice = Lattice::new(7);
        let centre = lattice.position(3, 3);
        // R = 2: the window is 5x5, but the four corners sit at distance² 8.
        let found: Vec<_> = lattice.neighbours(centre, 2, 4).collect();
        assert_eq!(found.len(), 12);
        assert!(!found.contains(&(1, 1)));
        assert!(found.contains(&(1, 3)));
        assert!(found.contains(&(2, 2)));
    }

    #[test]
    fn test_neighbours_huge_radius_covers_lattice() {
        let lattice = Lattice::new(3);
        let found: Vec<_> = lattice.neighbours(4, usize::MAX, usize::MAX).collect();
        assert_eq!(found.len(), 8);
    }
}
