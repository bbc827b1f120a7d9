use rand::{Rng, SeedableRng, rngs::StdRng};

mod kruskal;
mod union_find;

pub use kruskal::{GenerationStats, randomized_kruskal};

use crate::{error::Result, maze::Maze};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Adapts a `rand` generator into the `[0, 1)` source the generator consumes.
pub fn unit_source<R: Rng>(rng: &mut R) -> impl FnMut() -> f64 + '_ {
    move || rng.random::<f64>()
}

/// Scales a draw from `[0, 1)` to an index in `0..len`.
/// Out-of-range draws are clamped rather than trusted.
pub(crate) fn unit_index(v: f64, len: usize) -> usize {
    ((v * len as f64) as usize).min(len - 1)
}

/// Carves `maze` into a perfect maze, drawing randomness from `random`.
pub fn generate_maze<R>(maze: &mut Maze, random: &mut R) -> Result<GenerationStats>
where
    R: FnMut() -> f64,
{
    tracing::debug!(
        "[generate] carving a {}x{} maze",
        maze.rows(),
        maze.cols()
    );
    let stats = randomized_kruskal(maze, random)?;
    tracing::debug!(
        "[generate] finished after {} passes with {} walls removed",
        stats.passes,
        stats.unions
    );
    Ok(stats)
}
