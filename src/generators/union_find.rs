use crate::error::{MazeError, Result};
use crate::maze::{Direction, Maze};

/// Partition of the maze cells into sets of mutually reachable cells.
/// Lives only for the duration of one generation run.
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    /// Creates `size` singleton sets.
    pub fn new(size: usize) -> Result<Self> {
        let mut parent = Vec::new();
        parent
            .try_reserve_exact(size)
            .map_err(|_| MazeError::OutOfMemory {
                what: "path sets",
            })?;
        parent.extend(0..size);
        Ok(UnionFind { parent })
    }

    /// Representative of the set containing `x`, compressing the walked path onto the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merges the set of `x` into the set of `y` by pointing `x`'s root at `y`'s root.
    /// No balancing is done. Returns `false` if they were already in the same set.
    pub fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }
        self.parent[root_x] = root_y;
        true
    }

    /// Bitmask of the directions whose grid-adjacent cell is in a different set than `pos`.
    /// Walls are ignored; only the partition matters.
    pub fn cross_set_neighbors(&mut self, maze: &Maze, pos: usize) -> u8 {
        let coord = maze.unravel_index(pos);
        let set = self.find(pos);
        Direction::ALL.into_iter().fold(0, |mask, dir| {
            match maze.neighbor(coord, dir) {
                Some(next) if self.find(maze.ravel_index(next)) != set => mask | dir.mask(),
                _ => mask,
            }
        })
    }

    /// Number of distinct sets.
    pub fn num_sets(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .count()
    }
}
