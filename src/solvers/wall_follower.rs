//! Wall-following path search for perfect mazes.
//!
//! The walk keeps no stack. Each cell's marker holds the state instead, and its meaning
//! changes once the target is reached:
//!
//! * [`Phase::Search`]: on leaving a cell, its marker is set to the direction taken; on entering
//!   a cell, its marker is set to the way back. At each cell the walk tries directions clockwise
//!   starting just after the marker, so the way back is tried last. In a tree this visits
//!   subtrees one by one and returns from dead ends through the cell they were entered from.
//! * [`Phase::Trace`]: once the target is reached, every cell on the path from the source holds
//!   the direction it was last left in, which is the step toward the target. Following the
//!   markers from the source marks the path; the target itself keeps its way-back marker.

use crate::{
    error::{MazeError, Result},
    maze::{Direction, Maze},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Markers record how each cell was last left.
    Search,
    /// Markers from the source lead to the target.
    Trace,
}

struct WallFollower<'a> {
    maze: &'a mut Maze,
    src: (usize, usize),
    dst: (usize, usize),
    current: (usize, usize),
    phase: Phase,
}

impl<'a> WallFollower<'a> {
    fn new(maze: &'a mut Maze, src: (usize, usize), dst: (usize, usize)) -> Self {
        maze.unmark();
        WallFollower {
            maze,
            src,
            dst,
            current: src,
            phase: Phase::Search,
        }
    }

    /// First open direction clockwise after the current cell's marker.
    fn next_open_direction(&self) -> Option<Direction> {
        let mut dir = self.maze[self.current].marker;
        (0..4).find_map(|_| {
            dir = dir.rotate();
            self.maze.can_move(self.current, dir).then_some(dir)
        })
    }

    fn no_path(&self) -> MazeError {
        MazeError::NoPath {
            from: self.src,
            to: self.dst,
        }
    }

    /// Walks until the target is reached. Returns the number of steps taken.
    fn search(&mut self) -> Result<usize> {
        debug_assert_eq!(self.phase, Phase::Search);
        // Each passage of a tree is crossed at most twice
        let budget = 2 * self.maze.len();
        let mut steps = 0;

        while self.current != self.dst {
            if steps >= budget {
                return Err(self.no_path());
            }
            let dir = self.next_open_direction().ok_or_else(|| self.no_path())?;
            self.maze[self.current].marker = dir;
            let next = self
                .maze
                .neighbor(self.current, dir)
                .ok_or_else(|| self.no_path())?;
            self.maze[next].marker = dir.opposite();
            tracing::trace!("[solve] step {} {:?} -> {:?}", dir, self.current, next);
            self.current = next;
            steps += 1;
        }

        self.phase = Phase::Trace;
        Ok(steps)
    }

    /// Follows the markers from the source, marking every cell up to and including the target.
    /// Returns the number of cells on the path.
    fn trace(&mut self) -> Result<usize> {
        debug_assert_eq!(self.phase, Phase::Trace);
        let mut current = self.src;
        let mut len = 1;
        self.maze[current].visited = true;

        while current != self.dst {
            let next = self
                .maze
                .neighbor(current, self.maze[current].marker)
                .filter(|&next| !self.maze[next].visited)
                .ok_or_else(|| self.no_path())?;
            self.maze[next].visited = true;
            current = next;
            len += 1;
        }

        Ok(len)
    }
}

/// Marks the unique path between `src` and `dst` in a generated maze.
/// Any previous path is cleared first. Returns the number of cells on the path.
///
/// A maze that is not a spanning tree yields [`MazeError::NoPath`] when the walk gets stuck
/// or runs past the number of steps a tree walk can take.
///
/// # Panics
/// If either endpoint is out of bounds.
pub fn wall_follower(maze: &mut Maze, src: (usize, usize), dst: (usize, usize)) -> Result<usize> {
    if !maze.is_in_bounds(src) || !maze.is_in_bounds(dst) {
        panic!(
            "Path endpoints {:?} and {:?} must lie inside the {}x{} maze",
            src,
            dst,
            maze.rows(),
            maze.cols()
        );
    }

    let mut walker = WallFollower::new(maze, src, dst);
    let steps = walker.search()?;
    let len = walker.trace()?;
    tracing::debug!(
        "[solve] reached {:?} from {:?} after {} steps, path has {} cells",
        dst,
        src,
        steps,
        len
    );
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate_maze, get_rng, unit_source};
    use crate::maze::Direction::{Down, Right, Up};

    fn zero_maze() -> Maze {
        let mut maze = Maze::new(3, 3).unwrap();
        generate_maze(&mut maze, &mut || 0.0).unwrap();
        maze
    }

    #[test]
    fn test_same_endpoint_marks_one_cell() {
        let mut maze = zero_maze();
        assert_eq!(wall_follower(&mut maze, (1, 1), (1, 1)).unwrap(), 1);
        assert_eq!(maze.visited_cells(), vec![(1, 1)]);
        assert!(maze.grid().iter().all(|c| c.marker == Up));
    }

    #[test]
    fn test_markers_point_along_path() {
        let mut maze = zero_maze();
        assert_eq!(wall_follower(&mut maze, (0, 0), (2, 2)).unwrap(), 5);
        assert_eq!(
            maze.visited_cells(),
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]
        );
        let markers = maze.grid().iter().map(|c| c.marker).collect::<Vec<_>>();
        assert_eq!(markers, vec![Right, Right, Down, Up, Up, Down, Up, Up, Up]);
    }

    #[test]
    fn test_previous_path_is_cleared() {
        let mut maze = zero_maze();
        wall_follower(&mut maze, (0, 0), (2, 2)).unwrap();
        assert_eq!(wall_follower(&mut maze, (2, 0), (1, 0)).unwrap(), 2);
        assert_eq!(maze.visited_cells(), vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn test_backtracks_out_of_dead_ends() {
        let mut maze = zero_maze();
        // The only route climbs to row 0 and comes back down the last column
        assert_eq!(wall_follower(&mut maze, (2, 0), (2, 2)).unwrap(), 7);
        assert_eq!(maze[(2, 0)].marker, Up);
        assert_eq!(maze[(0, 0)].marker, Right);
        assert!(!maze[(2, 1)].visited);
        assert!(!maze[(1, 1)].visited);
    }

    #[test]
    fn test_walled_start_has_no_path() {
        let mut maze = Maze::new(2, 2).unwrap();
        assert!(matches!(
            wall_follower(&mut maze, (0, 0), (1, 1)),
            Err(MazeError::NoPath { .. })
        ));
    }

    #[test]
    fn test_unreachable_target_terminates() {
        let mut maze = Maze::new(1, 3).unwrap();
        maze.remove_wall((0, 0), Right);
        assert!(wall_follower(&mut maze, (0, 0), (0, 2)).is_err());
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_endpoint_panics() {
        let mut maze = zero_maze();
        let _ = wall_follower(&mut maze, (0, 0), (3, 0));
    }

    #[test]
    fn test_path_in_generated_maze() {
        let mut maze = Maze::new(8, 8).unwrap();
        generate_maze(&mut maze, &mut unit_source(&mut get_rng(Some(5)))).unwrap();
        let len = wall_follower(&mut maze, (7, 7), (0, 0)).unwrap();
        assert_eq!(maze.visited_cells().len(), len);
        assert!(maze[(7, 7)].visited && maze[(0, 0)].visited);
        // The target keeps its way-back marker, which points at a visited cell
        let back = maze.neighbor((0, 0), maze[(0, 0)].marker).unwrap();
        assert!(maze[back].visited);
        assert!(matches!(maze[(0, 0)].marker, Right | Down));
    }
}
