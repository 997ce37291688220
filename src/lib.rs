//! # Driver for the 1588AS 8x8 LED matrix with a 74HC595 shift register
//!
//! The 1588AS has 16 legs: eight column anodes and eight row cathodes. This driver expects half
//! of them to be wired straight to microcontroller pins and the other half to the parallel
//! outputs of a 74HC595, which needs only three pins (data, shift clock and latch clock).
//!
//! The matrix is multiplexed: only one row can be lit at a time, so a full image is drawn as a
//! sequence of 16 scan slots (8 rows, each followed by a blanking slot) that has to be repeated
//! fast enough for the eye to merge them. Call [`LedMatrix::draw`] in your main loop.
//!
//! The pipeline:
//!  - the [`wiring`] module turns a [`WireAssignment`] into a [`RouteTable`]
//!  - the [`pattern`] module turns the pixel bitmap into one [`RowColBits`] per row
//!  - the [`frame`] module combines both into an [`OutputFrame`] of 16 [`ScanSlot`]s
//!  - the [`bitbang`] module shifts each slot out and writes the direct pins
//!
//! Pins are addressed by number through the [`PinBank`] trait. Numbers 0..8 belong to the low
//! pin group, 8..16 to the high one (PORTD and PORTB on an ATmega328). [`HalPinBank`] adapts a
//! set of `embedded_hal` output pins to this interface.
//!
//! By default the hardwired side is assumed to be the side with row 4. If your matrix is
//! mounted the other way around, call [`LedMatrix::flip_setup`] once, right after construction.
//!
//! ```rust
//! use led8x8::{LedMatrix, PinBank};
//! # struct NoPins;
//! # impl PinBank for NoPins {
//! #     type Error = core::convert::Infallible;
//! #     fn configure_output(&mut self, _: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self, _: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_low(&mut self, _: u8) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let bank = NoPins;
//!
//! let diagonal = [
//!     0b1000_0000,
//!     0b0100_0000,
//!     0b0010_0000,
//!     0b0001_0000,
//!     0b0000_1000,
//!     0b0000_0100,
//!     0b0000_0010,
//!     0b0000_0001,
//! ];
//!
//! // DATA, SRCLK, RCLK
//! let shift_pins = [2, 3, 4];
//! let hard_wire_pins = [5, 6, 7, 8, 9, 10, 11, 12];
//!
//! let mut matrix = LedMatrix::new(bank, shift_pins, hard_wire_pins, diagonal).unwrap();
//! matrix.draw().unwrap();
//! ```
#![no_std]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod bitbang;
pub mod display;
pub mod error;
pub mod frame;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod lines;
pub mod pattern;
pub mod wiring;

#[cfg(test)]
mod mock;

pub use crate::backend::{HalPinBank, HalPinError, PinBank, PortGroup};
pub use crate::bitbang::{ShiftPins, ShiftRegister};
pub use crate::display::LedMatrix;
pub use crate::error::{MatrixError, WiringError};
pub use crate::frame::{OutputFrame, ScanSlot};
pub use crate::lines::Line;
pub use crate::pattern::RowColBits;
pub use crate::wiring::{Route, RouteTable, WireAssignment};

/// Width and height of the matrix in pixels.
pub const MATRIX_SIZE: usize = 8;
/// Number of logical row/column lines.
pub const LINES: usize = 2 * MATRIX_SIZE;
/// Each row is followed by a blanking slot.
pub const SCAN_SLOTS: usize = 2 * MATRIX_SIZE;
/// Pins below this number belong to [`PortGroup::Low`].
pub const GROUP_WIDTH: u8 = 8;
/// Number of addressable pins across both groups.
pub const PIN_COUNT: u8 = 2 * GROUP_WIDTH;
/// Parallel outputs of the 74HC595.
pub const SHIFT_WIDTH: u8 = 8;

/// One byte per row, bit `c` lights column `c`. Row 0 is the side with the model number.
pub type PixelBitmap = [u8; MATRIX_SIZE];
