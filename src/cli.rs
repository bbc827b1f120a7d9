//! Command-line options and the driver that ties generation, path marking and output together.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Parser;

use crate::{
    codec,
    error::{MazeError, Result},
    generators::{generate_maze, get_rng, unit_source},
    maze::{Direction, Exit, Maze},
    render::{Area, Format, write_maze},
    solvers::find_path,
};

/// A 1-based `(row, column)` pair as typed on the command line.
pub type CellPos = (usize, usize);

/// Generate, solve and store perfect mazes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze dimensions, rows x columns
    #[arg(short = 'd', long, value_name = "RxC", default_value = "10x10", value_parser = parse_dims)]
    pub dims: (usize, usize),

    /// Output area, horizontal x vertical (pixels for PNG, points for EPS, ignored for text)
    #[arg(short = 'z', long, value_name = "HxV", default_value = "612x612", value_parser = parse_area)]
    pub area: Area,

    /// Random seed (default: a fresh one, reported in the log)
    #[arg(short = 'r', long)]
    pub seed: Option<u64>,

    /// Mark a path between two 1-based cells
    #[arg(short = 'm', long, value_name = "RxC-RxC", value_parser = parse_cell_pair)]
    pub mark: Option<(CellPos, CellPos)>,

    /// Mark the path from the entrance to the exit
    #[arg(short = 's', long, conflicts_with = "mark")]
    pub solve: bool,

    /// Entrance position: an edge (t, l, b, r) followed by a 1-based position along it
    #[arg(short = 'e', long, value_name = "dPOS", value_parser = parse_exit)]
    pub entrance: Option<Exit>,

    /// Exit position: an edge (t, l, b, r) followed by a 1-based position along it
    #[arg(short = 'x', long, value_name = "dPOS", value_parser = parse_exit)]
    pub exit: Option<Exit>,

    /// Load a stored maze instead of generating one (- for standard input)
    #[arg(short = 'L', long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Color the path in text output
    #[arg(long)]
    pub color: bool,

    /// Write logs to this file instead of standard error
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output file (default: standard output)
    pub output: Option<PathBuf>,
}

/// Parses `A x B`, whitespace allowed around both numbers.
fn parse_pair(s: &str) -> std::result::Result<(usize, usize), String> {
    let (a, b) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected AxB, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("'{}' is not a count: {}", v.trim(), e))
    };
    Ok((parse(a)?, parse(b)?))
}

pub fn parse_dims(s: &str) -> std::result::Result<(usize, usize), String> {
    parse_pair(s)
}

pub fn parse_area(s: &str) -> std::result::Result<Area, String> {
    let (horizontal, vertical) = parse_pair(s)?;
    let to_u32 = |v: usize| u32::try_from(v).map_err(|_| format!("{} is too large", v));
    Ok(Area {
        horizontal: to_u32(horizontal)?,
        vertical: to_u32(vertical)?,
    })
}

fn parse_cell(s: &str) -> std::result::Result<CellPos, String> {
    let (row, col) = parse_pair(s)?;
    if row == 0 || col == 0 {
        return Err(format!("cell positions start at 1, got '{}'", s.trim()));
    }
    Ok((row, col))
}

pub fn parse_cell_pair(s: &str) -> std::result::Result<(CellPos, CellPos), String> {
    let (src, dst) = s
        .split_once('-')
        .ok_or_else(|| format!("expected RxC-RxC, got '{}'", s))?;
    Ok((parse_cell(src)?, parse_cell(dst)?))
}

/// Parses an edge letter followed by a 1-based position, e.g. `l1` or `>12`.
pub fn parse_exit(s: &str) -> std::result::Result<Exit, String> {
    let mut chars = s.trim().chars();
    let direction = match chars.next() {
        Some('t' | 'T' | 'u' | 'U' | '^') => Direction::Up,
        Some('l' | 'L' | '<') => Direction::Left,
        Some('r' | 'R' | '>') => Direction::Right,
        Some('b' | 'B' | 'd' | 'D' | 'v') => Direction::Down,
        _ => return Err(format!("'{}' does not start with an edge (t, l, b, r)", s)),
    };
    let position = chars
        .as_str()
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad position in '{}': {}", s, e))?;
    if position == 0 {
        return Err("edge positions start at 1".to_string());
    }
    Ok(Exit::new(position - 1, direction))
}

fn load_maze(path: &Path) -> Result<Maze> {
    if path.as_os_str() == "-" {
        return codec::load(io::stdin().lock());
    }
    let file = File::open(path).map_err(|e| {
        MazeError::InvalidArgument(format!(
            "unable to open input file '{}': {}",
            path.display(),
            e
        ))
    })?;
    codec::load(BufReader::new(file))
}

/// Converts a 1-based cell to 0-based, checking it against the maze.
fn checked_endpoint(maze: &Maze, which: &str, (row, col): CellPos) -> Result<(usize, usize)> {
    let coord = (row - 1, col - 1);
    if maze.is_in_bounds(coord) {
        Ok(coord)
    } else {
        Err(MazeError::InvalidArgument(format!(
            "{} position {}x{} out of range, maze dimensions are {}x{}",
            which,
            row,
            col,
            maze.rows(),
            maze.cols()
        )))
    }
}

/// Builds or loads the maze, marks the requested path and writes the output.
pub fn run(args: Args) -> Result<()> {
    if matches!(args.format, Format::Png | Format::Eps) {
        args.area.check()?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut maze = match &args.load {
        Some(path) => {
            if args.entrance.is_some() || args.exit.is_some() {
                tracing::warn!("Entrance and exit options are ignored when loading a maze");
            }
            let maze = load_maze(path)?;
            tracing::debug!(
                "[codec] loaded a {}x{} maze from {}",
                maze.rows(),
                maze.cols(),
                path.display()
            );
            maze
        }
        None => {
            let (rows, cols) = args.dims;
            let mut maze = Maze::new(rows, cols)?;
            if let Some(entrance) = args.entrance {
                maze.set_exit_1(entrance)?;
            }
            if let Some(exit) = args.exit {
                maze.set_exit_2(exit)?;
            }
            let mut rng = get_rng(Some(seed));
            generate_maze(&mut maze, &mut unit_source(&mut rng))?;
            maze
        }
    };

    let endpoints = if args.solve {
        Some(maze.exit_cells())
    } else {
        match args.mark {
            Some((src, dst)) => Some((
                checked_endpoint(&maze, "Source", src)?,
                checked_endpoint(&maze, "Target", dst)?,
            )),
            None => None,
        }
    };
    if let Some((src, dst)) = endpoints {
        find_path(&mut maze, src, dst)?;
    }

    tracing::info!(
        "Maze parameters: dimensions {}x{}, output area {}x{}, format {}, random seed {}, target {}",
        maze.rows(),
        maze.cols(),
        args.area.horizontal,
        args.area.vertical,
        args.format,
        seed,
        args.output
            .as_ref()
            .map_or("<standard output>".to_string(), |p| p.display().to_string())
    );
    match endpoints {
        Some(((sr, sc), (dr, dc))) => tracing::info!(
            "Solution: ({} x {}) to ({} x {})",
            sr + 1,
            sc + 1,
            dr + 1,
            dc + 1
        ),
        None => tracing::info!("Solution: none"),
    }

    let color = args.color && args.format == Format::Text;
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                MazeError::InvalidArgument(format!(
                    "unable to open output file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let mut out = BufWriter::new(file);
            write_maze(&maze, args.format, args.area, color, &mut out)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            write_maze(&maze, args.format, args.area, color, &mut out)?;
        }
    }
    Ok(())
}
