//! Trial parameters and their validation.
//!
//! A [`TrialParams`] can only be obtained through [`TrialParams::new`], so
//! every trial runs on a lattice with `side > 1`, `radius > 0` and
//! `target > 0`.

use crate::lattice::Lattice;

/// Error type for invalid trial parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// The lattice side must be at least 2.
    SideTooSmall(usize),
    /// The bonding radius must be positive.
    RadiusNotPositive,
    /// The target particle count must be positive.
    TargetNotPositive,
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterError::SideTooSmall(side) => {
                write!(f, "invalid trial parameters: side must be > 1, got {side}")
            }
            ParameterError::RadiusNotPositive => {
                write!(f, "invalid trial parameters: radius must be > 0")
            }
            ParameterError::TargetNotPositive => {
                write!(f, "invalid trial parameters: target particle count must be > 0")
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// Lattice side `L`, bonding radius `R` and target particle count `N`.
///
/// # Examples
/// ```
/// use percolate::params::{ParameterError, TrialParams};
///
/// let params = TrialParams::new(10, 2, 40).unwrap();
/// assert_eq!(params.radius_squared(), 4);
/// assert_eq!(TrialParams::new(1, 2, 40), Err(ParameterError::SideTooSmall(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialParams {
    side: usize,
    radius: usize,
    target: usize,
}

impl TrialParams {
    /// Validates and builds a parameter set.
    ///
    /// # Errors
    /// Returns [`ParameterError`] if `side <= 1`, `radius == 0` or
    /// `target == 0`.
    pub fn new(side: usize, radius: usize, target: usize) -> Result<Self, ParameterError> {
        if side <= 1 {
            return Err(ParameterError::SideTooSmall(side));
        }
        if radius == 0 {
            return Err(ParameterError::RadiusNotPositive);
        }
        if target == 0 {
            return Err(ParameterError::TargetNotPositive);
        }
        Ok(Self {
            side,
            radius,
            target,
        })
    }

    /// Returns a copy with a different target particle count.
    ///
    /// # Errors
    /// Returns [`ParameterError::TargetNotPositive`] if `target == 0`.
    pub fn with_target(self, target: usize) -> Result<Self, ParameterError> {
        Self::new(self.side, self.radius, target)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// `R²`, the inclusive bound on squared bond length.
    ///
    /// Saturates at `usize::MAX`, which already admits every cell.
    pub fn radius_squared(&self) -> usize {
        self.radius.saturating_mul(self.radius)
    }

    pub fn lattice(&self) -> Lattice {
        Lattice::new(self.side)
    }

    /// The target capped at the number of drawable interior cells.
    ///
    /// Drops never land on the electrode rows, so a target above the
    /// interior size could never be reached.
    pub fn effective_target(&self) -> usize {
        self.target.min(self.lattice().interior_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        let p = TrialParams::new(5, 1, 3).unwrap();
        assert_eq!((p.side(), p.radius(), p.target()), (5, 1, 3));
    }

    #[test]
    fn test_rejects_small_side() {
        assert_eq!(TrialParams::new(0, 1, 1), Err(ParameterError::SideTooSmall(0)));
        assert_eq!(TrialParams::new(1, 1, 1), Err(ParameterError::SideTooSmall(1)));
        assert!(TrialParams::new(2, 1, 1).is_ok());
    }

    #[test]
    fn test_rejects_zero_radius() {
        assert_eq!(TrialParams::new(4, 0, 1), Err(ParameterError::RadiusNotPositive));
    }

    #[test]
    fn test_rejects_zero_target() {
        assert_eq!(TrialParams::new(4, 1, 0), Err(ParameterError::TargetNotPositive));
        let p = TrialParams::new(4, 1, 2).unwrap();
        assert_eq!(p.with_target(0), Err(ParameterError::TargetNotPositive));
    }

    #[test]
    fn test_with_target_keeps_geometry() {
        let p = TrialParams::new(6, 2, 3).unwrap().with_target(36).unwrap();
        assert_eq!((p.side(), p.radius(), p.target()), (6, 2, 36));
    }

    #[test]
    fn test_effective_target_capped_at_interior() {
        // 6x6 lattice: 36 cells, 12 on the electrode rows.
        let p = TrialParams::new(6, 1, 36).unwrap();
        assert_eq!(p.effective_target(), 24);
        let p = p.with_target(10).unwrap();
        assert_eq!(p.effective_target(), 10);
        let p = TrialParams::new(2, 1, 5).unwrap();
        assert_eq!(p.effective_target(), 0);
    }

    #[test]
    fn test_huge_radius_saturates() {
        let p = TrialParams::new(3, usize::MAX, 1).unwrap();
        assert_eq!(p.radius_squared(), usize::MAX);
        let p = TrialParams::new(3, 1 << 33, 1).unwrap();
        assert_eq!(p.radius_squared(), usize::MAX);
    }

    #[test]
    fn test_error_display() {
        let msg = ParameterError::SideTooSmall(1).to_string();
        assert!(msg.contains("side must be > 1"), "{msg}");
    }
}
