//! Compact text form of a maze.
//!
//! The first line holds `rows cols exit_1 exit_2` with exits packed as `(position << 2) | direction`.
//! Every cell follows in row-major order as one letter: the low nibble packs
//! `marker << 2 | bottom_wall << 1 | right_wall`, offset from `'A'` for cells on the marked
//! path and from `'a'` otherwise. Lines wrap every 80 cells.

use std::io::{Read, Write};

use crate::{
    error::{MazeError, Result},
    maze::{Cell, Direction, Exit, Maze},
};

const LINE_WIDTH: usize = 80;

/// Encodes one cell as its stored letter.
pub fn encode_cell(cell: &Cell) -> char {
    let v = (cell.marker.bits() << 2) | ((cell.bottom_wall as u8) << 1) | cell.right_wall as u8;
    let base = if cell.visited { b'A' } else { b'a' };
    (base + v) as char
}

/// Decodes a stored letter, or `None` if it is not one of `a..=p` / `A..=P`.
pub fn decode_cell(ch: u8) -> Option<Cell> {
    let (v, visited) = match ch {
        b'a'..=b'p' => (ch - b'a', false),
        b'A'..=b'P' => (ch - b'A', true),
        _ => return None,
    };
    Some(Cell {
        right_wall: v & 1 != 0,
        bottom_wall: (v >> 1) & 1 != 0,
        marker: Direction::from_bits(v >> 2),
        visited,
    })
}

/// Writes the compact form of `maze` to `out`.
pub fn store<W: Write + ?Sized>(maze: &Maze, out: &mut W) -> Result<()> {
    out.write_all(to_compact_string(maze).as_bytes())?;
    Ok(())
}

/// Returns the compact form of `maze`.
pub fn to_compact_string(maze: &Maze) -> String {
    let mut text = format!(
        "{} {} {} {}\n",
        maze.rows(),
        maze.cols(),
        maze.exit_1().pack(),
        maze.exit_2().pack()
    );
    text.reserve(maze.len() + maze.len() / LINE_WIDTH + 1);

    for (pos, cell) in maze.grid().iter().enumerate() {
        text.push(encode_cell(cell));
        if (pos + 1) % LINE_WIDTH == 0 {
            text.push('\n');
        }
    }
    if maze.len() % LINE_WIDTH != 0 {
        text.push('\n');
    }
    text
}

/// Reads a maze in compact form. Anything after the last cell is ignored.
pub fn load<R: Read>(mut input: R) -> Result<Maze> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    from_compact_bytes(&bytes)
}

/// Parses a maze from its compact form.
pub fn from_compact_bytes(bytes: &[u8]) -> Result<Maze> {
    let mut scanner = Scanner { bytes, pos: 0 };

    let mut header = [0usize; 4];
    for (i, field) in header.iter_mut().enumerate() {
        *field = scanner.next_number().ok_or_else(|| {
            MazeError::MalformedInput(format!("missing dimension line (field {} of 4)", i + 1))
        })?;
    }
    let [rows, cols, exit_1, exit_2] = header;
    tracing::debug!(
        "[codec] header: {}x{}, exits {} and {}",
        rows,
        cols,
        exit_1,
        exit_2
    );

    // Every cell takes one byte, so a short stream is rejected before the grid is allocated
    let remaining = scanner.remaining();
    if rows.checked_mul(cols).is_some_and(|cells| cells > remaining) {
        return Err(MazeError::MalformedInput(format!(
            "premature end of input: {} x {} cells declared, {} bytes follow",
            rows, cols, remaining
        )));
    }

    let mut maze = Maze::new(rows, cols).map_err(|e| match e {
        MazeError::EmptyMaze { .. } => MazeError::MalformedInput(e.to_string()),
        e => e,
    })?;
    maze.set_exit_1(Exit::unpack(exit_1))
        .and_then(|_| maze.set_exit_2(Exit::unpack(exit_2)))
        .map_err(|e| MazeError::MalformedInput(e.to_string()))?;

    for pos in 0..maze.len() {
        let (row, col) = maze.unravel_index(pos);
        let ch = scanner.next_non_whitespace().ok_or_else(|| {
            MazeError::MalformedInput(format!(
                "premature end of input at {} x {}",
                row + 1,
                col + 1
            ))
        })?;
        maze[(row, col)] = decode_cell(ch).ok_or_else(|| {
            MazeError::MalformedInput(format!(
                "invalid cell {:?} at {} x {}",
                ch as char,
                row + 1,
                col + 1
            ))
        })?;
    }

    Ok(maze)
}

impl std::str::FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        from_compact_bytes(s.as_bytes())
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    /// Next unsigned decimal number, after any leading whitespace.
    fn next_number(&mut self) -> Option<usize> {
        self.skip_whitespace();
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }

    fn next_non_whitespace(&mut self) -> Option<u8> {
        self.skip_whitespace();
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate_maze, get_rng, unit_source};
    use quickcheck::quickcheck;
    use crate::solvers::find_path;

    fn zero_maze() -> Maze {
        let mut maze = Maze::new(3, 3).unwrap();
        generate_maze(&mut maze, &mut || 0.0).unwrap();
        maze
    }

    #[test]
    fn test_zero_source_conformance() {
        let maze = zero_maze();
        assert_eq!(to_compact_string(&maze), "3 3 3 9\naabbbbddd\n");
    }

    #[test]
    fn test_store_marked_path() {
        let mut maze = zero_maze();
        find_path(&mut maze, (0, 0), (2, 2)).unwrap();
        let mut out = Vec::new();
        store(&maze, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3 3 3 9\nEEJbbJddD\n");
    }

    #[test]
    fn test_encode_decode_cell() {
        let cell = Cell {
            right_wall: true,
            bottom_wall: false,
            marker: Direction::Left,
            visited: true,
        };
        assert_eq!(encode_cell(&cell), 'N');
        assert_eq!(decode_cell(b'N'), Some(cell));
        assert_eq!(encode_cell(&Cell::WALLED), 'd');
        assert_eq!(decode_cell(b'q'), None);
        assert_eq!(decode_cell(b'Q'), None);
        assert_eq!(decode_cell(b'3'), None);
    }

    #[test]
    fn test_line_wrapping() {
        let maze = Maze::new(9, 10).unwrap();
        let text = to_compact_string(&maze);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), 80);
        assert_eq!(lines[2].len(), 10);
        assert!(text.ends_with("dd\n"));

        let exact = to_compact_string(&Maze::new(8, 10).unwrap());
        assert_eq!(exact.lines().count(), 2);
        assert!(exact.ends_with("d\n") && !exact.ends_with("\n\n"));
    }

    #[test]
    fn test_roundtrip_generated_and_solved() {
        let mut maze = Maze::new(17, 23).unwrap();
        maze.set_exit_1(Exit::new(4, Direction::Up)).unwrap();
        generate_maze(&mut maze, &mut unit_source(&mut get_rng(Some(77)))).unwrap();
        find_path(&mut maze, (16, 0), (3, 22)).unwrap();

        let loaded = load(to_compact_string(&maze).as_bytes()).unwrap();
        assert_eq!(loaded, maze);
        assert_eq!(loaded.exit_1(), Exit::new(4, Direction::Up));
        assert_eq!(to_compact_string(&loaded), to_compact_string(&maze));
    }

    /// A maze with every cell and both exits taken from `bits`, cycling when it runs short.
    fn arbitrary_maze(rows: usize, cols: usize, bits: &[u8], exits: (usize, usize)) -> Maze {
        let mut maze = Maze::new(rows, cols).unwrap();
        for pos in 0..maze.len() {
            let b = bits.get(pos % bits.len().max(1)).copied().unwrap_or(0);
            let coord = maze.unravel_index(pos);
            maze[coord] = Cell {
                right_wall: b & 1 != 0,
                bottom_wall: b & 2 != 0,
                marker: Direction::from_bits((b >> 2) & 3),
                visited: b & 16 != 0,
            };
        }
        let exit = |v: usize| {
            let direction = Direction::from_bits((v & 3) as u8);
            let span = match direction {
                Direction::Up | Direction::Down => cols,
                Direction::Left | Direction::Right => rows,
            };
            Exit::new((v >> 2) % span, direction)
        };
        maze.set_exit_1(exit(exits.0)).unwrap();
        maze.set_exit_2(exit(exits.1)).unwrap();
        maze
    }

    quickcheck! {
        fn prop_store_load_roundtrip(rows: u8, cols: u8, bits: Vec<u8>, exit_1: usize, exit_2: usize) -> bool {
            let (rows, cols) = (rows as usize % 40 + 1, cols as usize % 40 + 1);
            let maze = arbitrary_maze(rows, cols, &bits, (exit_1, exit_2));
            load(to_compact_string(&maze).as_bytes()).unwrap() == maze
        }
    }

    #[test]
    fn test_roundtrip_every_cell_letter() {
        let bits = (0..32).collect::<Vec<u8>>();
        let maze = arbitrary_maze(4, 8, &bits, (0, 7));
        let text = to_compact_string(&maze);
        assert_eq!(text, "4 8 0 7
abcdefghijklmnopABCDEFGHIJKLMNOP
");
        assert_eq!(load(text.as_bytes()).unwrap(), maze);
    }

    #[test]
    fn test_short_stream_is_rejected_before_allocating() {
        match load("40000 40000 3 1
".as_bytes()) {
            Err(MazeError::MalformedInput(msg)) => assert!(msg.contains("40000 x 40000")),
            other => panic!("unexpected result {:?}", other.map(|m| m.len())),
        }
        // Dimensions whose product overflows still fail cleanly
        assert!(load(format!("{} 2 3 1\nab\n", usize::MAX).as_bytes()).is_err());
    }

    #[test]
    fn test_load_skips_whitespace_between_cells() {
        let maze: Maze = "3 3 3 9\naab\n bbb\r\n\tddd".parse().unwrap();
        assert_eq!(maze, zero_maze());
    }

    #[test]
    fn test_load_missing_header() {
        for input in ["", "3 3 3", "3 x 3 9\nddd", "   \n"] {
            assert!(
                matches!(load(input.as_bytes()), Err(MazeError::MalformedInput(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_load_premature_end() {
        let err = load("3 3 3 9\naabbbbdd\n".as_bytes()).unwrap_err();
        match err {
            MazeError::MalformedInput(msg) => assert!(msg.contains("3 x 3")),
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn test_load_rejects_bad_cells_and_exits() {
        assert!(matches!(
            load("1 2 3 1\naz\n".as_bytes()),
            Err(MazeError::MalformedInput(_))
        ));
        // Exit on the left edge at row 5 of a 1-row maze
        assert!(matches!(
            load("1 2 23 1\nad\n".as_bytes()),
            Err(MazeError::MalformedInput(_))
        ));
        assert!(matches!(
            load("0 2 3 1\n".as_bytes()),
            Err(MazeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_trailing_data_is_ignored() {
        let maze = load("1 1 3 1\nd\nextra".as_bytes()).unwrap();
        assert_eq!(maze.len(), 1);
        assert_eq!(maze[(0, 0)], Cell::WALLED);
    }
}
