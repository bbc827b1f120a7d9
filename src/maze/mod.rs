pub mod cell;
pub mod grid;

use std::fmt;

pub use cell::{Cell, Direction};
use grid::Grid;

use crate::error::{MazeError, Result};

/// An opening in the outer border: the edge it pierces and its 0-based position along that edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    pub position: usize,
    pub direction: Direction,
}

impl Exit {
    pub fn new(position: usize, direction: Direction) -> Self {
        Exit {
            position,
            direction,
        }
    }

    /// Packs the exit as `(position << 2) | direction`.
    pub fn pack(self) -> usize {
        (self.position << 2) | self.direction.bits() as usize
    }

    pub fn unpack(value: usize) -> Self {
        Exit {
            position: value >> 2,
            direction: Direction::from_bits((value & 3) as u8),
        }
    }

    /// Whether the exit lies on the border of a `rows x cols` maze.
    pub fn fits(self, rows: usize, cols: usize) -> bool {
        match self.direction {
            Direction::Up | Direction::Down => self.position < cols,
            Direction::Left | Direction::Right => self.position < rows,
        }
    }

    /// The border cell the exit opens out of.
    pub fn cell(self, rows: usize, cols: usize) -> (usize, usize) {
        match self.direction {
            Direction::Up => (0, self.position),
            Direction::Down => (rows - 1, self.position),
            Direction::Left => (self.position, 0),
            Direction::Right => (self.position, cols - 1),
        }
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} edge position {}", self.direction, self.position + 1)
    }
}

pub struct Maze {
    grid: Grid<Cell>,
    exit_1: Exit,
    exit_2: Exit,
}

impl Maze {
    /// Creates a fully walled maze with `rows` rows and `cols` columns.
    /// The entrance defaults to the top of the left edge and the exit to the bottom of the right edge.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let grid = Grid::new(rows, cols, Cell::WALLED)?;
        Ok(Maze {
            grid,
            exit_1: Exit::new(0, Direction::Left),
            exit_2: Exit::new(rows - 1, Direction::Right),
        })
    }

    /// Returns the number of rows in the maze.
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Returns the number of columns in the maze.
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Returns the number of cells in the maze.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Always false: a maze has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn exit_1(&self) -> Exit {
        self.exit_1
    }

    pub fn exit_2(&self) -> Exit {
        self.exit_2
    }

    pub fn set_exit_1(&mut self, exit: Exit) -> Result<()> {
        self.exit_1 = self.checked_exit(exit)?;
        Ok(())
    }

    pub fn set_exit_2(&mut self, exit: Exit) -> Result<()> {
        self.exit_2 = self.checked_exit(exit)?;
        Ok(())
    }

    fn checked_exit(&self, exit: Exit) -> Result<Exit> {
        if exit.fits(self.rows(), self.cols()) {
            Ok(exit)
        } else {
            Err(MazeError::ExitOutOfRange {
                exit,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    /// The cells the two exits open out of, as (entrance, exit).
    pub fn exit_cells(&self) -> ((usize, usize), (usize, usize)) {
        (
            self.exit_1.cell(self.rows(), self.cols()),
            self.exit_2.cell(self.rows(), self.cols()),
        )
    }

    /// Returns a reference to the internal grid.
    pub(crate) fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    pub fn is_in_bounds(&self, coord: (usize, usize)) -> bool {
        self.grid.is_in_bounds(coord.0, coord.1)
    }

    /// Linear index of a cell.
    pub fn ravel_index(&self, coord: (usize, usize)) -> usize {
        self.grid.ravel_index(coord.0, coord.1)
    }

    /// Coordinate of a linear index.
    pub fn unravel_index(&self, pos: usize) -> (usize, usize) {
        self.grid.unravel_index(pos)
    }

    /// Puts every wall back and clears all markers.
    pub fn reset(&mut self) {
        self.grid.fill(Cell::WALLED);
    }

    /// Clears the path-finding state of every cell, leaving the walls untouched.
    pub fn unmark(&mut self) {
        self.grid.iter_mut().for_each(Cell::unmark);
    }

    /// The grid-adjacent cell in `dir`, ignoring walls. `None` past the border.
    pub fn neighbor(&self, coord: (usize, usize), dir: Direction) -> Option<(usize, usize)> {
        let (row, col) = coord;
        let next = match dir {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Right => (row, col + 1),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
        };
        self.is_in_bounds(next).then_some(next)
    }

    /// Whether a walker at `coord` can step in `dir` without crossing a wall or the border.
    pub fn can_move(&self, coord: (usize, usize), dir: Direction) -> bool {
        let (row, col) = coord;
        match dir {
            Direction::Up => row > 0 && !self.grid[(row - 1, col)].bottom_wall,
            Direction::Right => col + 1 < self.cols() && !self.grid[coord].right_wall,
            Direction::Down => row + 1 < self.rows() && !self.grid[coord].bottom_wall,
            Direction::Left => col > 0 && !self.grid[(row, col - 1)].right_wall,
        }
    }

    /// Knocks down the wall between `coord` and its neighbor in `dir`, returning the neighbor.
    ///
    /// # Panics
    /// If `coord` is out of bounds or the wall is part of the outer border.
    pub fn remove_wall(&mut self, coord: (usize, usize), dir: Direction) -> (usize, usize) {
        if !self.is_in_bounds(coord) {
            panic!("The given coordinate is out of bounds");
        }
        let Some(next) = self.neighbor(coord, dir) else {
            panic!("Cannot remove the border wall {} of {:?}", dir, coord);
        };
        match dir {
            Direction::Up | Direction::Left => self.wall_mut(next, dir.opposite()),
            Direction::Right | Direction::Down => self.wall_mut(coord, dir),
        }
        next
    }

    fn wall_mut(&mut self, coord: (usize, usize), dir: Direction) {
        let cell = &mut self.grid[coord];
        match dir {
            Direction::Right => cell.right_wall = false,
            Direction::Down => cell.bottom_wall = false,
            _ => unreachable!("only east and south walls are stored"),
        }
    }

    /// Whether the border segment at `position` along edge `dir` is one of the exits.
    pub fn is_exit(&self, dir: Direction, position: usize) -> bool {
        [self.exit_1, self.exit_2]
            .iter()
            .any(|e| e.direction == dir && e.position == position)
    }

    /// Right wall as drawn: stored wall, opened where an exit pierces the right edge.
    pub fn draws_right_wall(&self, coord: (usize, usize)) -> bool {
        let (row, col) = coord;
        self.grid[coord].right_wall
            && !(col + 1 == self.cols() && self.is_exit(Direction::Right, row))
    }

    /// Bottom wall as drawn: stored wall, opened where an exit pierces the bottom edge.
    pub fn draws_bottom_wall(&self, coord: (usize, usize)) -> bool {
        let (row, col) = coord;
        self.grid[coord].bottom_wall
            && !(row + 1 == self.rows() && self.is_exit(Direction::Down, col))
    }

    /// Number of internal walls that have been removed.
    pub fn open_walls(&self) -> usize {
        (0..self.rows())
            .flat_map(|row| (0..self.cols()).map(move |col| (row, col)))
            .map(|coord| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&dir| self.can_move(coord, dir))
                    .count()
            })
            .sum()
    }

    /// Cells marked as lying on the current path, in row-major order.
    pub fn visited_cells(&self) -> Vec<(usize, usize)> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.visited)
            .map(|(pos, _)| self.unravel_index(pos))
            .collect()
    }
}

impl PartialEq for Maze {
    fn eq(&self, other: &Self) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.exit_1 == other.exit_1
            && self.exit_2 == other.exit_2
            && self.grid.iter().eq(other.grid.iter())
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Maze")
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("exit_1", &self.exit_1)
            .field("exit_2", &self.exit_2)
            .finish_non_exhaustive()
    }
}

impl std::ops::Index<(usize, usize)> for Maze {
    type Output = Cell;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.grid[index]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Maze {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.grid[index]
    }
}

/// Get neighbors of a cell.
/// A neighbor is any in-bounds cell one step away in a cardinal direction, walls or not.
pub fn get_neighbors(
    coord: (usize, usize),
    maze: &Maze,
) -> impl Iterator<Item = (Direction, (usize, usize))> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |dir| maze.neighbor(coord, dir).map(|next| (dir, next)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_maze_is_walled() {
        let maze = Maze::new(3, 4).unwrap();
        assert_eq!(maze.rows(), 3);
        assert_eq!(maze.cols(), 4);
        assert!(maze.grid().iter().all(|c| *c == Cell::WALLED));
        assert_eq!(maze.exit_1(), Exit::new(0, Direction::Left));
        assert_eq!(maze.exit_2(), Exit::new(2, Direction::Right));
        assert_eq!(maze.open_walls(), 0);
    }

    #[test]
    fn test_exit_packing() {
        let exit = Exit::new(5, Direction::Down);
        assert_eq!(exit.pack(), 22);
        assert_eq!(Exit::unpack(22), exit);
        assert_eq!(Exit::new(0, Direction::Left).pack(), 3);
        assert_eq!(Exit::unpack(Exit::new(9, Direction::Up).pack()).position, 9);
    }

    #[test]
    fn test_exit_cells() {
        let mut maze = Maze::new(3, 5).unwrap();
        assert_eq!(maze.exit_cells(), ((0, 0), (2, 4)));
        maze.set_exit_1(Exit::new(4, Direction::Up)).unwrap();
        maze.set_exit_2(Exit::new(1, Direction::Down)).unwrap();
        assert_eq!(maze.exit_cells(), ((0, 4), (2, 1)));
    }

    #[test]
    fn test_exit_out_of_range() {
        let mut maze = Maze::new(3, 5).unwrap();
        assert!(matches!(
            maze.set_exit_1(Exit::new(3, Direction::Left)),
            Err(MazeError::ExitOutOfRange { .. })
        ));
        assert!(maze.set_exit_1(Exit::new(4, Direction::Down)).is_ok());
    }

    #[test]
    fn test_remove_wall_and_can_move() {
        let mut maze = Maze::new(3, 3).unwrap();
        assert!(!maze.can_move((1, 1), Direction::Up));
        assert_eq!(maze.remove_wall((1, 1), Direction::Up), (0, 1));
        assert!(!maze[(0, 1)].bottom_wall);
        assert!(maze.can_move((1, 1), Direction::Up));
        assert!(maze.can_move((0, 1), Direction::Down));

        assert_eq!(maze.remove_wall((1, 1), Direction::Left), (1, 0));
        assert!(!maze[(1, 0)].right_wall);
        assert!(maze.can_move((1, 0), Direction::Right));
        assert_eq!(maze.open_walls(), 2);
    }

    #[test]
    fn test_border_blocks_movement() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze[(0, 1)].right_wall = false;
        maze[(1, 0)].bottom_wall = false;
        assert!(!maze.can_move((0, 1), Direction::Right));
        assert!(!maze.can_move((1, 0), Direction::Down));
        assert!(!maze.can_move((0, 0), Direction::Up));
        assert!(!maze.can_move((0, 0), Direction::Left));
    }

    #[test]
    #[should_panic]
    fn test_remove_border_wall_panics() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.remove_wall((0, 0), Direction::Up);
    }

    #[test]
    fn test_get_neighbors() {
        let maze = Maze::new(3, 3).unwrap();
        let corner = get_neighbors((0, 0), &maze).collect::<Vec<_>>();
        assert_eq!(
            corner,
            vec![(Direction::Right, (0, 1)), (Direction::Down, (1, 0))]
        );
        assert_eq!(get_neighbors((1, 1), &maze).count(), 4);
    }

    #[test]
    fn test_unmark_and_reset() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.remove_wall((0, 0), Direction::Right);
        maze[(0, 0)].visited = true;
        maze[(0, 0)].marker = Direction::Right;
        maze.unmark();
        assert!(!maze[(0, 0)].right_wall);
        assert_eq!(maze[(0, 0)].marker, Direction::Up);
        assert!(!maze[(0, 0)].visited);
        maze.reset();
        assert!(maze[(0, 0)].right_wall);
    }

    #[test]
    fn test_drawn_walls_open_at_exits() {
        let mut maze = Maze::new(2, 3).unwrap();
        maze.set_exit_1(Exit::new(1, Direction::Down)).unwrap();
        assert!(maze.draws_right_wall((0, 2)));
        assert!(!maze.draws_right_wall((1, 2)));
        assert!(!maze.draws_bottom_wall((1, 1)));
        assert!(maze.draws_bottom_wall((1, 0)));
        assert!(maze[(1, 2)].right_wall);
    }

    #[test]
    fn test_equality_compares_cells() {
        let a = Maze::new(2, 3).unwrap();
        let mut b = Maze::new(2, 3).unwrap();
        assert_eq!(a, b);
        b[(1, 2)].visited = true;
        assert_ne!(a, b);
        b[(1, 2)].visited = false;
        assert_eq!(a, b);
        assert_ne!(a, Maze::new(3, 2).unwrap());
    }
}
