use crate::error::{MazeError, Result};

/// Row-major storage for a rectangular array of cells.
pub struct Grid<T> {
    data: Box<[T]>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> Grid<T> {
    /// Allocates a `rows x cols` grid filled with `cell`.
    /// Allocation failure is reported instead of aborting the process.
    pub fn new(rows: usize, cols: usize, cell: T) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::EmptyMaze { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(MazeError::OutOfMemory { what: "maze cells" })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MazeError::OutOfMemory { what: "maze cells" })?;
        data.resize(len, cell);
        Ok(Grid {
            data: data.into_boxed_slice(),
            rows,
            cols,
        })
    }

    /// Overwrites every cell with `cell`.
    pub fn fill(&mut self, cell: T) {
        self.data.fill(cell);
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Linear index of `(row, col)`, the addressing scheme shared by the generator and the codec.
    pub fn ravel_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Inverse of [`Grid::ravel_index`].
    pub fn unravel_index(&self, pos: usize) -> (usize, usize) {
        (pos / self.cols, pos % self.cols)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T> std::ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        debug_assert!(self.is_in_bounds(index.0, index.1));
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        debug_assert!(self.is_in_bounds(index.0, index.1));
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}
