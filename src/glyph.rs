//! Fixed 5×5 glyphs for the LED matrix.
//!
//! Every glyph is a blue-on-black bitmap in grid order (`[row][col]`, row 0 at
//! the top). The arrows point the way the joystick is pushed once the board
//! is held with the matrix above the display; the numerals drive the
//! timer-driven animation.

use crate::led5x5::{HEIGHT, Rgb, WIDTH};

/// A 5×5 grid of LED colors, `[row][col]`.
pub type Bitmap = [[Rgb; WIDTH]; HEIGHT];

/// Color of a lit cell.
pub const ON: Rgb = Rgb::new(0, 0, 255);

/// Color of a dark cell.
pub const OFF: Rgb = Rgb::new(0, 0, 0);

const B: Rgb = ON;
const O: Rgb = OFF;

/// The named glyphs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub enum Glyph {
    /// Arrow pointing right.
    East,
    /// Arrow pointing up and to the right.
    NorthEast,
    /// Arrow pointing down and to the right.
    SouthEast,
    /// Arrow pointing up.
    North,
    /// Arrow pointing down.
    South,
    /// Arrow pointing up and to the left.
    NorthWest,
    /// Arrow pointing left.
    West,
    /// Arrow pointing down and to the left.
    SouthWest,
    /// Numeral 1, first animation frame.
    One,
    /// Numeral 2, second animation frame.
    Two,
    /// Numeral 3, third animation frame.
    Three,
}

impl Glyph {
    /// Every glyph, in table order.
    pub const ALL: [Self; 11] = [
        Self::East,
        Self::NorthEast,
        Self::SouthEast,
        Self::North,
        Self::South,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::One,
        Self::Two,
        Self::Three,
    ];

    /// The eight joystick arrows.
    pub const ARROWS: [Self; 8] = [
        Self::East,
        Self::NorthEast,
        Self::SouthEast,
        Self::North,
        Self::South,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
    ];

    /// The animation sequence, in display order.
    pub const NUMERALS: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// The glyph's cells.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "the table has one row per variant, in declaration order"
    )]
    pub fn bitmap(self) -> &'static Bitmap {
        &GLYPH_TABLE[self as usize]
    }

    /// Number of lit cells.
    #[must_use]
    pub fn lit_count(self) -> usize {
        self.bitmap().iter().flatten().filter(|cell| **cell == ON).count()
    }
}

/// Bitmaps indexed by `Glyph as usize`.
static GLYPH_TABLE: [Bitmap; 11] = [
    // East
    [
        [O, O, B, O, O],
        [O, O, O, B, O],
        [B, B, B, B, B],
        [O, O, O, B, O],
        [O, O, B, O, O],
    ],
    // NorthEast
    [
        [O, O, B, B, B],
        [O, O, O, B, B],
        [O, O, B, O, B],
        [O, B, O, O, O],
        [B, O, O, O, O],
    ],
    // SouthEast
    [
        [B, O, O, O, O],
        [O, B, O, O, O],
        [O, O, B, O, B],
        [O, O, O, B, B],
        [O, O, B, B, B],
    ],
    // North
    [
        [O, O, B, O, O],
        [O, B, B, B, O],
        [O, O, B, O, O],
        [O, O, B, O, O],
        [O, O, B, O, O],
    ],
    // South
    [
        [O, O, B, O, O],
        [O, O, B, O, O],
        [O, O, B, O, O],
        [O, B, B, B, O],
        [O, O, B, O, O],
    ],
    // NorthWest
    [
        [B, B, B, O, O],
        [B, B, O, O, O],
        [B, O, B, O, O],
        [O, O, O, B, O],
        [O, O, O, O, B],
    ],
    // West
    [
        [O, O, B, O, O],
        [O, B, O, O, O],
        [B, B, B, B, B],
        [O, B, O, O, O],
        [O, O, B, O, O],
    ],
    // SouthWest
    [
        [O, O, O, O, B],
        [O, O, O, B, O],
        [B, O, B, O, O],
        [B, B, O, O, O],
        [B, B, B, O, O],
    ],
    // One
    [
        [O, O, B, O, O],
        [O, B, B, O, O],
        [O, O, B, O, O],
        [O, O, B, O, O],
        [O, B, B, B, O],
    ],
    // Two
    [
        [O, B, B, B, O],
        [O, O, O, B, O],
        [O, B, B, B, O],
        [O, B, O, O, O],
        [O, B, B, B, O],
    ],
    // Three
    [
        [O, B, B, B, O],
        [O, O, O, B, O],
        [O, O, B, B, O],
        [O, O, O, B, O],
        [O, B, B, B, O],
    ],
];
