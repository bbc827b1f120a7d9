use std::fmt;

/// One of the four grid directions. The discriminants are the ordinals used by
/// exit packing, adjacency bitmasks and the stored cell format.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in ordinal order, which is also the scan order for adjacency bitmasks.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Decodes the low two bits of `bits`.
    pub fn from_bits(bits: u8) -> Self {
        Direction::ALL[(bits & 3) as usize]
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// The bit standing for this direction in an adjacency mask.
    pub fn mask(self) -> u8 {
        1 << self.bits()
    }

    pub fn opposite(self) -> Self {
        Direction::from_bits(self.bits() + 2)
    }

    /// The next direction clockwise.
    pub fn rotate(self) -> Self {
        Direction::from_bits(self.bits() + 1)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        write!(f, "{}", name)
    }
}

/// A maze cell. Only the east and south walls are stored; the west and north walls
/// belong to the neighbors, and the outer border is always walled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub right_wall: bool,
    pub bottom_wall: bool,
    /// Path-finding scratch. While searching it is the way the walk last left this cell
    /// (or the way back, for a cell just entered); once the path is marked it points
    /// along the path, which renderers use to orient path segments.
    pub marker: Direction,
    /// Whether the cell lies on the most recently marked path.
    pub visited: bool,
}

impl Cell {
    /// A fully walled, unmarked cell.
    pub const WALLED: Cell = Cell {
        right_wall: true,
        bottom_wall: true,
        marker: Direction::Up,
        visited: false,
    };

    /// Clears the path-finding scratch state, leaving the walls alone.
    pub fn unmark(&mut self) {
        self.marker = Direction::Up;
        self.visited = false;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::WALLED
    }
}
