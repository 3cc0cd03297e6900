//! Random number generation and the particle-drop draw seam.
//!
//! Trials never reach for ambient randomness: every draw goes through a
//! [`PositionSource`] handed to [`Trial::run`](crate::trial::Trial::run).
//! Any [`rand::Rng`] is a source, and [`ScriptedDraws`] replays a fixed
//! list of positions so a test can force exactly which cells are filled.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use std::collections::VecDeque;
use std::ops::Range;

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use percolate::random::{create_rng, PositionSource};
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.draw(3..6), b.draw(3..6));
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Creates a generator seeded from the operating system.
pub fn entropy_rng() -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::from_os_rng()
}

/// A source of grid positions for particle drops.
pub trait PositionSource {
    /// Returns a position in `range`. `range` is never empty.
    fn draw(&mut self, range: Range<usize>) -> usize;
}

impl<R: Rng + ?Sized> PositionSource for R {
    fn draw(&mut self, range: Range<usize>) -> usize {
        self.random_range(range)
    }
}

/// Replays a fixed sequence of positions, in order.
///
/// # Examples
/// ```
/// use percolate::random::{PositionSource, ScriptedDraws};
/// let mut draws = ScriptedDraws::new([4, 5]);
/// assert_eq!(draws.draw(3..6), 4);
/// assert_eq!(draws.remaining(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    queue: VecDeque<usize>,
}

impl ScriptedDraws {
    pub fn new(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: positions.into_iter().collect(),
        }
    }

    /// Number of positions not yet drawn.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl PositionSource for ScriptedDraws {
    /// # Panics
    /// Panics if the script is exhausted or the next position lies
    /// outside `range`.
    fn draw(&mut self, range: Range<usize>) -> usize {
        let Some(position) = self.queue.pop_front() else {
            panic!("scripted draws exhausted (requested a position in {range:?})");
        };
        assert!(
            range.contains(&position),
            "scripted position {position} outside {range:?}"
        );
        position
    }
}
