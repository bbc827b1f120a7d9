pub mod cli;
pub mod codec;
pub mod error;
pub mod generators;
pub mod maze;
pub mod render;
pub mod solvers;

pub use error::{MazeError, Result};
pub use maze::{Cell, Direction, Exit, Maze};
