//! Wiring of a folded LED strip onto a grid, checked at compile time.
#![expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    reason = "const table builders; every index is bounds-asserted and N fits in u16"
)]

/// Which grid cell each LED of a strip lights.
///
/// Entry `i` of the table is the `(col, row)` of strip LED `i`, with `(0, 0)`
/// at the top-left. [`new`](Self::new) rejects tables that miss a cell, repeat
/// one, or step off the `W`×`H` grid, so a bad `const` layout fails the build.
///
/// The panel strip snakes across the rows and is fed from the bottom-right
/// cell, which is a serpentine layout run backwards:
///
/// ```rust
/// use panel_envoy::led5x5::layout::LedLayout;
///
/// const PANEL: LedLayout<25, 5, 5> = LedLayout::serpentine_row_major().reverse();
/// assert_eq!(PANEL.index_to_xy()[0], (4, 4));
/// assert_eq!(PANEL.index_to_xy()[24], (0, 0));
/// assert_eq!(PANEL.xy_to_index()[0], 24);
/// ```
///
/// ```text
///   24 23 22 21 20
///   15 16 17 18 19
///   14 13 12 11 10
///    5  6  7  8  9
///    4  3  2  1  0   <- data in
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedLayout<const N: usize, const W: usize, const H: usize> {
    cells: [(u16, u16); N],
}

impl<const N: usize, const W: usize, const H: usize> LedLayout<N, W, H> {
    /// Validate a strip-order table of `(col, row)` cells.
    ///
    /// # Panics
    ///
    /// Panics (at compile time for `const` layouts) if `W * H != N`, a cell
    /// is off the grid, or a cell is listed twice.
    #[must_use]
    pub const fn new(cells: [(u16, u16); N]) -> Self {
        assert!(W > 0 && H > 0, "grid must not be empty");
        assert!(W * H == N, "grid must have exactly N cells");
        assert!(N <= u16::MAX as usize, "strip too long for u16 indices");

        let mut taken = [false; N];
        let mut led = 0;
        while led < N {
            let (col, row) = cells[led];
            assert!((col as usize) < W, "col outside the grid");
            assert!((row as usize) < H, "row outside the grid");
            let slot = row as usize * W + col as usize;
            assert!(!taken[slot], "cell listed twice");
            taken[slot] = true;
            led += 1;
        }
        Self { cells }
    }

    /// Strip wired left to right on even rows and right to left on odd rows,
    /// starting at the top-left cell.
    #[must_use]
    pub const fn serpentine_row_major() -> Self {
        let mut cells = [(0_u16, 0_u16); N];
        let mut led = 0;
        while led < N {
            let row = led / W;
            let step = led % W;
            let col = if row % 2 == 0 { step } else { W - 1 - step };
            cells[led] = (col as u16, row as u16);
            led += 1;
        }
        Self::new(cells)
    }

    /// Same cells, strip numbered from the other end.
    #[must_use]
    pub const fn reverse(self) -> Self {
        let mut cells = self.cells;
        let mut led = 0;
        while led < N {
            cells[led] = self.cells[N - 1 - led];
            led += 1;
        }
        Self::new(cells)
    }

    /// The `(col, row)` lit by each strip LED.
    #[must_use]
    pub const fn index_to_xy(&self) -> &[(u16, u16); N] {
        &self.cells
    }

    /// Strip index of every cell, row by row: entry `row * W + col`.
    #[must_use]
    pub const fn xy_to_index(&self) -> [u16; N] {
        let mut table = [0_u16; N];
        let mut led = 0;
        while led < N {
            let (col, row) = self.cells[led];
            table[row as usize * W + col as usize] = led as u16;
            led += 1;
        }
        table
    }

    /// `==` usable in `const` asserts.
    #[must_use]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut left = self.cells.as_slice();
        let mut right = other.cells.as_slice();
        while let (
            [(left_col, left_row), left_rest @ ..],
            [(right_col, right_row), right_rest @ ..],
        ) = (left, right)
        {
            if *left_col != *right_col || *left_row != *right_row {
                return false;
            }
            left = left_rest;
            right = right_rest;
        }
        true
    }
}
