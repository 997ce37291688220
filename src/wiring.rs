//! # Wiring of the matrix legs and the route table built from it
//!
//! Every one of the 16 [`Line`]s reaches the microcontroller in one of two ways: straight to a
//! pin ([`Route::Direct`]) or through one output of the 74HC595 ([`Route::Shifted`]). A
//! [`WireAssignment`] describes the wiring as the user sees it (which pin goes to which leg,
//! which shift register output goes to which leg). The [`RouteTable`] is the same information
//! indexed by line, which is what the frame compiler needs.

use heapless::Vec;

use crate::{
    backend::PortGroup,
    error::WiringError,
    frame::ScanSlot,
    lines::Line::{self, *},
    pattern::RowColBits,
    LINES, PIN_COUNT, SHIFT_WIDTH,
};

/// Hardwired lines in the order of the hardwired pins, stock wiring.
pub const DEFAULT_HARD_WIRE_RC: [Line; 8] = [R4, R6, C1, C2, R7, C4, R5, R2];
/// Lines on the shift register, stock wiring.
pub const DEFAULT_SHIFT_RC: [Line; 8] = [C7, C6, R1, C0, R3, C5, C3, R0];
/// Shift register output of each entry of [`DEFAULT_SHIFT_RC`].
pub const DEFAULT_SHIFT_OFFSETS: [u8; 8] = [7, 6, 5, 4, 3, 2, 1, 0];

/// How the matrix legs are connected.
///
/// Entry `i` of `hard_wire_pins` is the pin wired to line `hard_wire_rc[i]`; entry `i` of
/// `shift_offsets` is the 74HC595 output wired to line `shift_rc[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WireAssignment {
    hard_wire_pins: Vec<u8, LINES>,
    hard_wire_rc: Vec<Line, LINES>,
    shift_rc: Vec<Line, { SHIFT_WIDTH as usize }>,
    shift_offsets: Vec<u8, { SHIFT_WIDTH as usize }>,
}

impl WireAssignment {
    /// Stock wiring of a 1588AS: legs of the row 4 side on the given pins (in the order
    /// R4, R6, C1, C2, R7, C4, R5, R2), the other side on the 74HC595 (QA..QH reach
    /// C7, C6, R1, C0, R3, C5, C3, R0).
    pub fn new(hard_wire_pins: [u8; 8]) -> WireAssignment {
        WireAssignment {
            hard_wire_pins: hard_wire_pins.into_iter().collect(),
            hard_wire_rc: DEFAULT_HARD_WIRE_RC.into_iter().collect(),
            shift_rc: DEFAULT_SHIFT_RC.into_iter().collect(),
            shift_offsets: DEFAULT_SHIFT_OFFSETS.into_iter().collect(),
        }
    }

    /// Any other wiring. Lengths are checked here, coverage when the route table is built.
    pub fn custom(
        hard_wire_pins: &[u8],
        hard_wire_rc: &[Line],
        shift_rc: &[Line],
        shift_offsets: &[u8],
    ) -> Result<WireAssignment, WiringError> {
        if hard_wire_pins.len() != hard_wire_rc.len() {
            return Err(WiringError::PinCountMismatch {
                pins: hard_wire_pins.len(),
                lines: hard_wire_rc.len(),
            });
        }
        if shift_offsets.len() != shift_rc.len() {
            return Err(WiringError::OffsetCountMismatch {
                offsets: shift_offsets.len(),
                lines: shift_rc.len(),
            });
        }
        Ok(WireAssignment {
            hard_wire_pins: Vec::from_slice(hard_wire_pins).map_err(|_| WiringError::Capacity)?,
            hard_wire_rc: Vec::from_slice(hard_wire_rc).map_err(|_| WiringError::Capacity)?,
            shift_rc: Vec::from_slice(shift_rc).map_err(|_| WiringError::Capacity)?,
            shift_offsets: Vec::from_slice(shift_offsets).map_err(|_| WiringError::Capacity)?,
        })
    }

    pub fn hard_wire_pins(&self) -> &[u8] {
        &self.hard_wire_pins
    }

    pub fn hard_wire_rc(&self) -> &[Line] {
        &self.hard_wire_rc
    }

    pub fn shift_rc(&self) -> &[Line] {
        &self.shift_rc
    }

    pub fn shift_offsets(&self) -> &[u8] {
        &self.shift_offsets
    }

    /// Swap the roles of the two sides, for a matrix mounted with the shift register on the
    /// row 4 side.
    ///
    /// The pins stay where they are; what changes is which leg they reach. Entry `i` of the
    /// hardwired lines trades places with entry `i` of the shifted lines, and the shift
    /// offsets are reversed since the register now runs along the opposite edge. Flipping
    /// twice gives back the original wiring.
    ///
    /// Both sides need the same number of lines. If they don't, nothing is changed.
    pub fn flip(&mut self) -> Result<(), WiringError> {
        if self.hard_wire_rc.len() != self.shift_rc.len() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "array sizes don't match for flip: {} hardwired, {} shifted",
                self.hard_wire_rc.len(),
                self.shift_rc.len()
            );
            return Err(WiringError::SizeMismatch {
                hard_wired: self.hard_wire_rc.len(),
                shifted: self.shift_rc.len(),
            });
        }

        for (hard, shift) in self.hard_wire_rc.iter_mut().zip(self.shift_rc.iter_mut()) {
            core::mem::swap(hard, shift);
        }
        self.shift_offsets.reverse();
        Ok(())
    }
}

/// Where a line is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Pin number, see [`PortGroup`] for the numbering.
    Direct(u8),
    /// Bit of the byte shifted into the 74HC595, 0 ends up on QH and 7 on QA.
    Shifted(u8),
}

/// One [`Route`] per [`Line`], validated when built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RouteTable {
    routes: [Route; LINES],
}

impl RouteTable {
    /// Build the table from a wiring.
    ///
    /// Every line has to be claimed by exactly one hardwired pin or shift register output,
    /// pins must be below 16, offsets below 8, and no pin or offset may be used twice.
    pub fn build(wiring: &WireAssignment) -> Result<RouteTable, WiringError> {
        let mut routes = [None; LINES];

        let hard_wired = wiring.hard_wire_rc.iter().zip(wiring.hard_wire_pins.iter());
        for (&line, &pin) in hard_wired {
            if pin >= PIN_COUNT {
                return Err(WiringError::PinOutOfRange(pin));
            }
            claim(&mut routes, line, Route::Direct(pin))?;
        }

        let shifted = wiring.shift_rc.iter().zip(wiring.shift_offsets.iter());
        for (&line, &offset) in shifted {
            if offset >= SHIFT_WIDTH {
                return Err(WiringError::OffsetOutOfRange(offset));
            }
            claim(&mut routes, line, Route::Shifted(offset))?;
        }

        let mut table = [Route::Direct(0); LINES];
        for (line, route) in Line::ALL.iter().zip(routes.iter()) {
            table[line.index() as usize] = route.ok_or(WiringError::Unrouted(*line))?;
        }

        check_unique(&table)?;
        Ok(RouteTable { routes: table })
    }

    pub fn route(&self, line: Line) -> Route {
        self.routes[line.index() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Line, Route)> + '_ {
        Line::ALL.iter().copied().zip(self.routes.iter().copied())
    }

    /// Bits of `group` that carry a hardwired line.
    pub fn group_mask(&self, group: PortGroup) -> u8 {
        self.routes.iter().fold(0, |mask, route| match route {
            Route::Direct(pin) => match PortGroup::locate(*pin) {
                (g, bit) if g == group => mask | (1 << bit),
                _ => mask,
            },
            Route::Shifted(_) => mask,
        })
    }

    /// Read a compiled slot back into the pattern it was compiled from.
    pub fn decode(&self, slot: &ScanSlot) -> RowColBits {
        let bits = self.iter().fold(0u16, |bits, (line, route)| {
            let byte = match route {
                Route::Shifted(offset) => slot.shift >> offset,
                Route::Direct(pin) => match PortGroup::locate(pin) {
                    (PortGroup::Low, bit) => slot.low_group >> bit,
                    (PortGroup::High, bit) => slot.high_group >> bit,
                },
            };
            bits | (u16::from(byte & 1) << line.index())
        });
        RowColBits::from_bits(bits)
    }
}

fn claim(routes: &mut [Option<Route>; LINES], line: Line, route: Route) -> Result<(), WiringError> {
    let slot = &mut routes[line.index() as usize];
    if slot.is_some() {
        return Err(WiringError::DoubleRouted(line));
    }
    *slot = Some(route);
    Ok(())
}

fn check_unique(routes: &[Route; LINES]) -> Result<(), WiringError> {
    let mut pins: u16 = 0;
    let mut offsets: u8 = 0;
    for route in routes {
        match *route {
            Route::Direct(pin) => {
                if pins & (1 << pin) != 0 {
                    return Err(WiringError::PinConflict(pin));
                }
                pins |= 1 << pin;
            }
            Route::Shifted(offset) => {
                if offsets & (1 << offset) != 0 {
                    return Err(WiringError::DuplicateOffset(offset));
                }
                offsets |= 1 << offset;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINS: [u8; 8] = [5, 6, 7, 8, 9, 10, 11, 12];

    #[test]
    fn default_wiring_routes_every_line() {
        let table = RouteTable::build(&WireAssignment::new(PINS)).unwrap();

        assert_eq!(table.route(R4), Route::Direct(5));
        assert_eq!(table.route(R2), Route::Direct(12));
        assert_eq!(table.route(C7), Route::Shifted(7));
        assert_eq!(table.route(R0), Route::Shifted(0));
        assert_eq!(table.iter().count(), 16);
    }

    #[test]
    fn group_masks_cover_hardwired_pins() {
        let table = RouteTable::build(&WireAssignment::new(PINS)).unwrap();

        assert_eq!(table.group_mask(PortGroup::Low), 0b1110_0000);
        assert_eq!(table.group_mask(PortGroup::High), 0b0001_1111);
    }

    #[test]
    fn flip_swaps_sides_and_reverses_offsets() {
        let mut wiring = WireAssignment::new(PINS);
        wiring.flip().unwrap();

        assert_eq!(wiring.hard_wire_rc(), &DEFAULT_SHIFT_RC);
        assert_eq!(wiring.shift_rc(), &DEFAULT_HARD_WIRE_RC);
        assert_eq!(wiring.shift_offsets(), &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(wiring.hard_wire_pins(), &PINS);

        let table = RouteTable::build(&wiring).unwrap();
        assert_eq!(table.route(C7), Route::Direct(5));
        assert_eq!(table.route(R4), Route::Shifted(0));
    }

    #[test]
    fn flip_twice_restores_wiring() {
        let original = WireAssignment::new(PINS);
        let mut wiring = original.clone();
        wiring.flip().unwrap();
        wiring.flip().unwrap();
        assert_eq!(wiring, original);
    }

    #[test]
    fn flip_rejects_uneven_sides() {
        let mut wiring = WireAssignment::custom(
            &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            &[C0, C1, C2, C3, C4, C5, C6, C7, R0, R1],
            &[R2, R3, R4, R5, R6, R7],
            &[0, 1, 2, 3, 4, 5],
        )
        .unwrap();
        let before = wiring.clone();

        assert_eq!(
            wiring.flip(),
            Err(WiringError::SizeMismatch { hard_wired: 10, shifted: 6 })
        );
        assert_eq!(wiring, before);
        assert!(RouteTable::build(&wiring).is_ok());
    }

    #[test]
    fn uncovered_line_is_rejected() {
        let wiring = WireAssignment::custom(
            &PINS,
            &[R4, R6, C1, C2, R7, C4, R5, R2],
            &[C7, C6, R1, C0, R3, C5, C3],
            &[7, 6, 5, 4, 3, 2, 1],
        )
        .unwrap();
        assert_eq!(RouteTable::build(&wiring), Err(WiringError::Unrouted(R0)));
    }

    #[test]
    fn line_wired_twice_is_rejected() {
        let wiring = WireAssignment::custom(
            &PINS,
            &[R4, R6, C1, C2, R7, C4, R5, R2],
            &[C7, C6, R1, C0, R3, C5, C3, R2],
            &DEFAULT_SHIFT_OFFSETS,
        )
        .unwrap();
        assert_eq!(RouteTable::build(&wiring), Err(WiringError::DoubleRouted(R2)));
    }

    #[test]
    fn bad_pins_and_offsets_are_rejected() {
        let wiring = WireAssignment::new([5, 6, 7, 8, 9, 10, 11, 16]);
        assert_eq!(RouteTable::build(&wiring), Err(WiringError::PinOutOfRange(16)));

        let wiring = WireAssignment::new([5, 6, 7, 8, 9, 10, 11, 5]);
        assert_eq!(RouteTable::build(&wiring), Err(WiringError::PinConflict(5)));

        let wiring = WireAssignment::custom(
            &PINS,
            &DEFAULT_HARD_WIRE_RC,
            &DEFAULT_SHIFT_RC,
            &[7, 6, 5, 4, 3, 2, 1, 8],
        )
        .unwrap();
        assert_eq!(RouteTable::build(&wiring), Err(WiringError::OffsetOutOfRange(8)));

        let wiring = WireAssignment::custom(
            &PINS,
            &DEFAULT_HARD_WIRE_RC,
            &DEFAULT_SHIFT_RC,
            &[7, 6, 5, 4, 3, 2, 1, 1],
        )
        .unwrap();
        assert_eq!(RouteTable::build(&wiring), Err(WiringError::DuplicateOffset(1)));
    }

    #[test]
    fn custom_checks_lengths() {
        assert_eq!(
            WireAssignment::custom(&[1, 2], &[C0], &[], &[]),
            Err(WiringError::PinCountMismatch { pins: 2, lines: 1 })
        );
        assert_eq!(
            WireAssignment::custom(&[], &[], &[C0], &[0, 1]),
            Err(WiringError::OffsetCountMismatch { offsets: 2, lines: 1 })
        );
        assert_eq!(
            WireAssignment::custom(&[0; 9], &[C0; 9], &[C1; 9], &[0; 9]),
            Err(WiringError::Capacity)
        );
    }
}
