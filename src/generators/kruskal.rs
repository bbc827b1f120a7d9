use crate::{
    error::{MazeError, Result},
    generators::{union_find::UnionFind, unit_index},
    maze::{Direction, Maze},
};

/// Counters describing one generation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    /// Number of shuffle-and-scan passes over the cell queue.
    pub passes: usize,
    /// Walls knocked down, which equals the number of set unions.
    pub unions: usize,
    /// Scanned cells that had no neighbor in another set, summed over all passes.
    pub done: usize,
}

/// Randomized Kruskal-style construction by repeated relaxation.
///
/// Every pass shuffles all cells, then visits each one and, if it has a grid neighbor
/// in another set, knocks down the wall to one of those neighbors chosen at random and
/// merges the two sets. The result is a spanning tree of the cell adjacency graph.
pub fn randomized_kruskal<R>(maze: &mut Maze, random: &mut R) -> Result<GenerationStats>
where
    R: FnMut() -> f64,
{
    maze.reset();

    let n_cells = maze.len();
    let mut uf = UnionFind::new(n_cells)?;
    let mut queue = Vec::new();
    queue
        .try_reserve_exact(n_cells)
        .map_err(|_| MazeError::OutOfMemory {
            what: "cell queue",
        })?;
    queue.extend(0..n_cells);

    let mut stats = GenerationStats::default();
    // Every pass that starts with more than one set performs at least one union,
    // so the union count also bounds the loop.
    while stats.done < n_cells || stats.unions + 1 < n_cells {
        stats.passes += 1;
        shuffle(&mut queue, random);

        for &cur in &queue {
            let adj = uf.cross_set_neighbors(maze, cur);
            let pop = adj.count_ones() as usize;
            if pop == 0 {
                stats.done += 1;
                continue;
            }

            let skip = if pop > 1 { unit_index(random(), pop) } else { 0 };
            let dir = nth_direction(adj, skip);

            let next = maze.remove_wall(maze.unravel_index(cur), dir);
            // Join the neighbor's set onto the one of the cell being scanned
            uf.unite(maze.ravel_index(next), cur);
            stats.unions += 1;
        }

        tracing::trace!(
            "[generate] pass {} done: {} unions, {} settled cells",
            stats.passes,
            stats.unions,
            stats.done
        );
    }

    debug_assert_eq!(uf.num_sets(), 1);
    Ok(stats)
}

/// In-place Fisher-Yates shuffle consuming one draw per position, from the last index down to 1.
fn shuffle<R>(queue: &mut [usize], random: &mut R)
where
    R: FnMut() -> f64,
{
    for i in (1..queue.len()).rev() {
        let exch = unit_index(random(), i + 1);
        queue.swap(i, exch);
    }
}

/// The `skip`-th set bit of `adj`, scanning Up, Right, Down, Left.
fn nth_direction(adj: u8, mut skip: usize) -> Direction {
    let mut last = Direction::Up;
    for dir in Direction::ALL {
        if adj & dir.mask() != 0 {
            if skip == 0 {
                return dir;
            }
            skip -= 1;
            last = dir;
        }
    }
    last
}
