use thiserror::Error;

use crate::maze::Exit;

pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Error, Debug)]
pub enum MazeError {
    /// Storage for the grid or the generator's scratch space could not be allocated.
    #[error("insufficient memory to allocate {what}")]
    OutOfMemory { what: &'static str },
    #[error("a maze must have at least one row and one column (got {rows}x{cols})")]
    EmptyMaze { rows: usize, cols: usize },
    #[error("malformed maze input: {0}")]
    MalformedInput(String),
    #[error("exit {exit} does not fit a {rows}x{cols} maze")]
    ExitOutOfRange { exit: Exit, rows: usize, cols: usize },
    /// The wall-following walk could not reach the target, which only happens on a maze
    /// that is not a spanning tree.
    #[error("no path from {from:?} to {to:?}")]
    NoPath {
        from: (usize, usize),
        to: (usize, usize),
    },
    /// A command-line value that parsed but does not fit the maze being built.
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
