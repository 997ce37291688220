//! # Row patterns
//!
//! A [`RowColBits`] holds the level of all 16 lines for one scan slot, bit `i` being line `i`
//! (see [`Line`]). Columns light when high, rows are selected when low, so
//! [`RowColBits::BLANK`] (all columns low, all rows high) lights nothing.

use crate::{lines::Line, PixelBitmap, MATRIX_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowColBits(u16);

impl RowColBits {
    /// No column driven, no row selected.
    pub const BLANK: RowColBits = RowColBits(0b1111_1111_0000_0000);

    pub const fn from_bits(bits: u16) -> RowColBits {
        RowColBits(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Level of `line` in this pattern.
    pub const fn level(self, line: Line) -> bool {
        self.0 & (1 << line.index()) != 0
    }

    /// Columns driven high, bit `c` for column `c`.
    pub const fn driven_columns(self) -> u8 {
        self.0 as u8
    }

    /// Rows pulled low, bit `r` for row `r`.
    pub const fn selected_rows(self) -> u8 {
        !((self.0 >> MATRIX_SIZE) as u8)
    }

    pub const fn is_blank(self) -> bool {
        self.0 == RowColBits::BLANK.0
    }

    fn light(&mut self, row: Line, column: Line) {
        self.0 &= !(1 << row.index());
        self.0 |= 1 << column.index();
    }
}

impl Default for RowColBits {
    fn default() -> Self {
        RowColBits::BLANK
    }
}

/// One pattern per bitmap row.
///
/// The rows are scanned back to front: pattern `p` is built from bitmap row `p` but selects row
/// line `R(7 - p)`, which keeps the image upright with the model number on top. A bitmap row
/// without lit pixels gives [`RowColBits::BLANK`].
pub fn generate(pixels: &PixelBitmap) -> [RowColBits; MATRIX_SIZE] {
    let mut patterns = [RowColBits::BLANK; MATRIX_SIZE];

    for (placement, (pattern, &drawing_row)) in patterns.iter_mut().zip(pixels.iter()).enumerate() {
        let row = Line::ALL[2 * MATRIX_SIZE - 1 - placement];

        for column in Line::ALL[..MATRIX_SIZE].iter() {
            if drawing_row & (1 << column.index()) != 0 {
                pattern.light(row, *column);
            }
        }
    }

    patterns
}
