//! Error types of the driver
//!
//! Wiring problems are found while building the route table, i.e. at construction time or in
//! [`flip_setup`](crate::LedMatrix::flip_setup). Once a display exists, drawing can only fail
//! with whatever error the [`PinBank`](crate::PinBank) reports.

use core::fmt;

use crate::lines::Line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiringError {
    /// Flipping needs as many hardwired lines as shifted lines.
    SizeMismatch { hard_wired: usize, shifted: usize },
    /// Hardwired pin list and hardwired line list differ in length.
    PinCountMismatch { pins: usize, lines: usize },
    /// Shift offset list and shifted line list differ in length.
    OffsetCountMismatch { offsets: usize, lines: usize },
    /// No pin and no shift register output reaches this line.
    Unrouted(Line),
    /// The line is listed more than once.
    DoubleRouted(Line),
    /// Pin number outside of both pin groups.
    PinOutOfRange(u8),
    /// The 74HC595 only has outputs 0..8.
    OffsetOutOfRange(u8),
    /// The pin is used twice.
    PinConflict(u8),
    /// Two lines share one shift register output.
    DuplicateOffset(u8),
    /// More entries than a wiring can hold.
    Capacity,
}

impl fmt::Display for WiringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiringError::SizeMismatch { hard_wired, shifted } => write!(
                f,
                "cannot flip {} hardwired lines with {} shifted lines",
                hard_wired, shifted
            ),
            WiringError::PinCountMismatch { pins, lines } => {
                write!(f, "{} hardwired pins for {} lines", pins, lines)
            }
            WiringError::OffsetCountMismatch { offsets, lines } => {
                write!(f, "{} shift offsets for {} lines", offsets, lines)
            }
            WiringError::Unrouted(line) => write!(f, "line {:?} is not wired", line),
            WiringError::DoubleRouted(line) => write!(f, "line {:?} is wired twice", line),
            WiringError::PinOutOfRange(pin) => write!(f, "pin {} is out of range", pin),
            WiringError::OffsetOutOfRange(offset) => {
                write!(f, "shift offset {} is out of range", offset)
            }
            WiringError::PinConflict(pin) => write!(f, "pin {} is used twice", pin),
            WiringError::DuplicateOffset(offset) => {
                write!(f, "shift offset {} is used twice", offset)
            }
            WiringError::Capacity => f.write_str("too many entries in wiring"),
        }
    }
}

/// Errors of [`LedMatrix`](crate::LedMatrix) construction and reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError<PinErr> {
    Pin(PinErr),
    Wiring(WiringError),
}

impl<PinErr> From<WiringError> for MatrixError<PinErr> {
    fn from(err: WiringError) -> Self {
        MatrixError::Wiring(err)
    }
}

impl<PinErr: fmt::Debug> fmt::Display for MatrixError<PinErr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Pin(err) => write!(f, "pin error: {:?}", err),
            MatrixError::Wiring(err) => write!(f, "wiring error: {}", err),
        }
    }
}
