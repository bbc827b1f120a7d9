mod wall_follower;

pub use wall_follower::{Phase, wall_follower};

use crate::error::Result;
use crate::maze::Maze;

/// Marks the path between two 0-based cells. See [`wall_follower`].
pub fn find_path(maze: &mut Maze, src: (usize, usize), dst: (usize, usize)) -> Result<usize> {
    wall_follower(maze, src, dst)
}

/// Marks the path from the entrance cell to the exit cell.
pub fn solve_maze(maze: &mut Maze) -> Result<usize> {
    let (start, goal) = maze.exit_cells();
    find_path(maze, start, goal)
}
