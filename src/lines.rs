//! # Logical row and column lines of the matrix
//!
//! The 1588AS has 16 legs. Independent of how they are wired, each leg is one of the eight
//! column lines (anodes, drive high to light) or one of the eight row lines (cathodes, pull low
//! to select). The numbering here is also the bit position of the line in a
//! [`RowColBits`](crate::RowColBits) pattern.

use crate::MATRIX_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Line {
    C0 = 0,
    C1 = 1,
    C2 = 2,
    C3 = 3,
    C4 = 4,
    C5 = 5,
    C6 = 6,
    C7 = 7,
    R0 = 8,
    R1 = 9,
    R2 = 10,
    R3 = 11,
    R4 = 12,
    R5 = 13,
    R6 = 14,
    R7 = 15,
}

use Line::*;

impl Line {
    /// All lines in bit order, columns first.
    pub const ALL: [Line; 16] = [
        C0, C1, C2, C3, C4, C5, C6, C7, R0, R1, R2, R3, R4, R5, R6, R7,
    ];

    /// Bit position of this line in a pattern.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Line at bit position `index`, if there is one.
    pub fn from_index(index: u8) -> Option<Line> {
        Line::ALL.get(index as usize).copied()
    }

    /// Column line `n`, `n` in 0..8
    pub fn column(n: u8) -> Option<Line> {
        if (n as usize) < MATRIX_SIZE {
            Line::from_index(n)
        } else {
            None
        }
    }

    /// Row line `n`, `n` in 0..8
    pub fn row(n: u8) -> Option<Line> {
        if (n as usize) < MATRIX_SIZE {
            Line::from_index(n + MATRIX_SIZE as u8)
        } else {
            None
        }
    }

    pub const fn is_row(self) -> bool {
        self as u8 >= MATRIX_SIZE as u8
    }

    pub const fn is_column(self) -> bool {
        !self.is_row()
    }

    /// Row or column number of the line within its kind.
    pub const fn number(self) -> u8 {
        self as u8 % MATRIX_SIZE as u8
    }
}
