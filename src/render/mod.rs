mod eps;
mod png;
mod text;

use std::io::Write;

pub use eps::to_eps;
pub use png::{to_image, to_png};
pub use text::to_text;

use crate::{
    codec,
    error::{MazeError, Result},
    maze::Maze,
};

/// Output formats for a finished maze.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Plain-text drawing
    #[default]
    Text,
    /// Raster image
    Png,
    /// Encapsulated PostScript
    Eps,
    /// Compact stored form, readable with `--load`
    Compact,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Text => write!(f, "Text"),
            Format::Png => write!(f, "PNG"),
            Format::Eps => write!(f, "PostScript"),
            Format::Compact => write!(f, "Compact"),
        }
    }
}

/// Output area in pixels (PNG) or points (EPS). Ignored by text and compact output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub horizontal: u32,
    pub vertical: u32,
}

impl Area {
    /// Largest accepted side, in pixels or points.
    pub const MAX_SIDE: u32 = 8192;

    /// Rejects areas an image back end cannot draw: a zero side, or one past [`Area::MAX_SIDE`].
    pub fn check(&self) -> Result<()> {
        let fits = |side: u32| (1..=Self::MAX_SIDE).contains(&side);
        if fits(self.horizontal) && fits(self.vertical) {
            Ok(())
        } else {
            Err(MazeError::InvalidArgument(format!(
                "output area {}x{} out of range, each side must be between 1 and {}",
                self.horizontal,
                self.vertical,
                Self::MAX_SIDE
            )))
        }
    }
}

impl Default for Area {
    fn default() -> Self {
        Self {
            horizontal: 612,
            vertical: 612,
        }
    }
}

/// Writes `maze` to `out` in `format`. Exits are drawn as openings in the border.
pub fn write_maze<W: Write + ?Sized>(
    maze: &Maze,
    format: Format,
    area: Area,
    color: bool,
    out: &mut W,
) -> Result<()> {
    match format {
        Format::Text => out.write_all(to_text(maze, color).as_bytes())?,
        Format::Png => out.write_all(&to_png(maze, area.horizontal, area.vertical)?)?,
        Format::Eps => out.write_all(to_eps(maze, area.horizontal, area.vertical).as_bytes())?,
        Format::Compact => codec::store(maze, out)?,
    }
    out.flush()?;
    Ok(())
}
