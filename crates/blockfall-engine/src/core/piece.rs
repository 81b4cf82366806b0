use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
///
/// Variants are listed in catalog order, which is also the order used by
/// [`PieceKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

/// Uniform choice over the seven piece kinds.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the pre-enumerated rotation states of this piece kind.
    #[must_use]
    pub const fn rotations(self) -> &'static [PieceShape] {
        match self {
            PieceKind::I => &I_ROTATIONS,
            PieceKind::J => &J_ROTATIONS,
            PieceKind::L => &L_ROTATIONS,
            PieceKind::O => &O_ROTATIONS,
            PieceKind::S => &S_ROTATIONS,
            PieceKind::T => &T_ROTATIONS,
            PieceKind::Z => &Z_ROTATIONS,
        }
    }

    /// Returns the number of distinct rotation states (always at least 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::O.rotation_count(), 1);
    /// assert_eq!(PieceKind::I.rotation_count(), 2);
    /// assert_eq!(PieceKind::T.rotation_count(), 4);
    /// ```
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        self.rotations().len()
    }

    /// Returns the bitmap of the given rotation state.
    ///
    /// The rotation index is taken modulo [`Self::rotation_count`].
    #[must_use]
    pub const fn shape(self, rotation: PieceRotation) -> &'static PieceShape {
        let rotations = self.rotations();
        &rotations[rotation.index() % rotations.len()]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('J'), Some(PieceKind::J));
    /// assert_eq!(PieceKind::from_char('x'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Rotation state index of a piece.
///
/// `0` is the spawn orientation. The valid range depends on the piece kind
/// (see [`PieceKind::rotation_count`]), so advancing a rotation always goes
/// through [`PieceRotation::next_for`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PieceRotation(u8);

impl PieceRotation {
    /// Spawn orientation.
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the next rotation state of `kind`, wrapping around.
    #[must_use]
    pub fn next_for(self, kind: PieceKind) -> Self {
        let count = kind.rotation_count();
        let next = (self.index() + 1) % count;
        // rotation counts are at most 4
        Self(u8::try_from(next).unwrap_or(0))
    }
}

/// Largest bitmap edge in the catalog (the I-piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// A single rotation state: a square bitmap of occupied sub-cells.
///
/// Only the top-left `size × size` cells are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl PieceShape {
    /// Edge length of the bitmap (2, 3 or 4).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Returns whether the sub-cell at (`col`, `row`) is occupied.
    ///
    /// Positions outside the bitmap are reported as unoccupied.
    #[must_use]
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        col < self.size() && row < self.size() && self.cells[row][col]
    }

    /// Iterates over the bitmap rows, each trimmed to [`Self::size`].
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.size()]
            .iter()
            .map(|row| &row[..self.size()])
    }

    /// Returns an iterator of occupied `(col, row)` offsets, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&col| self.cells[usize::from(row)][usize::from(col)])
                .map(move |col| (i32::from(col), i32::from(row)))
        })
    }
}

#[expect(clippy::cast_possible_truncation)]
const fn shape<const N: usize>(bits: [[u8; N]; N]) -> PieceShape {
    assert!(N <= MAX_SHAPE_SIZE);
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut row = 0;
    while row < N {
        let mut col = 0;
        while col < N {
            cells[row][col] = bits[row][col] != 0;
            col += 1;
        }
        row += 1;
    }
    PieceShape {
        size: N as u8,
        cells,
    }
}

// Rotation states are authored by hand, in rotation order. Their origin is
// the top-left corner of the bitmap.

const I_ROTATIONS: [PieceShape; 2] = [
    shape([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    shape([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
];

const J_ROTATIONS: [PieceShape; 4] = [
    shape([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
    shape([[0, 1, 1], [0, 1, 0], [0, 1, 0]]),
    shape([[0, 0, 0], [1, 1, 1], [0, 0, 1]]),
    shape([[0, 1, 0], [0, 1, 0], [1, 1, 0]]),
];

const L_ROTATIONS: [PieceShape; 4] = [
    shape([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    shape([[0, 1, 0], [0, 1, 0], [0, 1, 1]]),
    shape([[0, 0, 0], [1, 1, 1], [1, 0, 0]]),
    shape([[1, 1, 0], [0, 1, 0], [0, 1, 0]]),
];

const O_ROTATIONS: [PieceShape; 1] = [shape([[1, 1], [1, 1]])];

const S_ROTATIONS: [PieceShape; 2] = [
    shape([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    shape([[0, 1, 0], [0, 1, 1], [0, 0, 1]]),
];

const T_ROTATIONS: [PieceShape; 4] = [
    shape([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
    shape([[0, 1, 0], [0, 1, 1], [0, 1, 0]]),
    shape([[0, 0, 0], [1, 1, 1], [0, 1, 0]]),
    shape([[0, 1, 0], [1, 1, 0], [0, 1, 0]]),
];

const Z_ROTATIONS: [PieceShape; 2] = [
    shape([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    shape([[0, 0, 1], [0, 1, 1], [0, 1, 0]]),
];
