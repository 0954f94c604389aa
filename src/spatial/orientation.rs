//! Grid positions and the eight neighbour orientations
//!
//! Offsets are expressed as `(dx, dy)` with `x` growing east and `y` growing
//! south, matching row-major image layout.

/// A cell coordinate inside a bounded grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Position {
    /// Create a position from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major index inside a grid of the given width
    pub const fn linear_index(self, width: usize) -> usize {
        self.y * width + self.x
    }

    /// Inverse of [`Position::linear_index`]
    pub const fn from_linear_index(index: usize, width: usize) -> Self {
        Self {
            x: index % width,
            y: index / width,
        }
    }
}

/// One of the eight relative neighbour directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    /// `(-1, -1)`
    NorthWest,
    /// `(0, -1)`
    North,
    /// `(1, -1)`
    NorthEast,
    /// `(-1, 0)`
    West,
    /// `(1, 0)`
    East,
    /// `(-1, 1)`
    SouthWest,
    /// `(0, 1)`
    South,
    /// `(1, 1)`
    SouthEast,
}

impl Orientation {
    /// Number of orientations
    pub const COUNT: usize = 8;

    /// Every orientation, in index order
    pub const ALL: [Self; Self::COUNT] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// The four cardinal orientations
    pub const CARDINAL: [Self; 4] = [Self::North, Self::West, Self::South, Self::East];

    /// Stable index in `0..COUNT`
    pub const fn index(self) -> usize {
        match self {
            Self::NorthWest => 0,
            Self::North => 1,
            Self::NorthEast => 2,
            Self::West => 3,
            Self::East => 4,
            Self::SouthWest => 5,
            Self::South => 6,
            Self::SouthEast => 7,
        }
    }

    /// Relative `(dx, dy)` offset
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::NorthWest => (-1, -1),
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::West => (-1, 0),
            Self::East => (1, 0),
            Self::SouthWest => (-1, 1),
            Self::South => (0, 1),
            Self::SouthEast => (1, 1),
        }
    }

    /// The orientation pointing back the other way
    pub const fn opposite(self) -> Self {
        match self {
            Self::NorthWest => Self::SouthEast,
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::West => Self::East,
            Self::East => Self::West,
            Self::SouthWest => Self::NorthEast,
            Self::South => Self::North,
            Self::SouthEast => Self::NorthWest,
        }
    }

    /// Whether the offset is diagonal
    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.offset();
        dx != 0 && dy != 0
    }

    /// Neighbour of `position` in this direction, or `None` outside `width x height`
    pub const fn step(self, position: Position, width: usize, height: usize) -> Option<Position> {
        let (dx, dy) = self.offset();
        let Some(x) = position.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = position.y.checked_add_signed(dy) else {
            return None;
        };
        if x < width && y < height {
            Some(Position { x, y })
        } else {
            None
        }
    }
}

/// Iterate over the in-bounds neighbours of a position together with their orientation
pub fn neighbours(
    position: Position,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (Orientation, Position)> {
    Orientation::ALL.into_iter().filter_map(move |orientation| {
        orientation
            .step(position, width, height)
            .map(|neighbour| (orientation, neighbour))
    })
}
