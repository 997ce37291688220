//! # Compiled output frames
//!
//! An [`OutputFrame`] is everything that has to be written to the hardware for one refresh:
//! 16 [`ScanSlot`]s, one per bitmap row with a blanking slot after each. The blanking slots
//! switch the rows off before the next one is selected, otherwise the previous row would
//! ghost into the next while the pins change.

use core::ops::Index;

use crate::{
    backend::PortGroup,
    pattern::RowColBits,
    wiring::{Route, RouteTable},
    MATRIX_SIZE, SCAN_SLOTS,
};

/// Bytes for one scan slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanSlot {
    /// Pins 8..16, bit `n` is pin `8 + n`
    pub high_group: u8,
    /// Pins 0..8
    pub low_group: u8,
    /// Byte for the 74HC595, bit 0 ends up on QH, bit 7 on QA
    pub shift: u8,
}

impl ScanSlot {
    /// Place the level of every line of `pattern` where its route says.
    pub fn compile(pattern: RowColBits, routes: &RouteTable) -> ScanSlot {
        let mut slot = ScanSlot::default();

        for (line, route) in routes.iter() {
            let bit = u8::from(pattern.level(line));
            match route {
                Route::Shifted(offset) => slot.shift ^= bit << offset,
                Route::Direct(pin) => match PortGroup::locate(pin) {
                    (PortGroup::Low, n) => slot.low_group ^= bit << n,
                    (PortGroup::High, n) => slot.high_group ^= bit << n,
                },
            }
        }

        slot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputFrame {
    slots: [ScanSlot; SCAN_SLOTS],
}

impl OutputFrame {
    /// Even slots get the row patterns in order, odd slots the blank pattern.
    pub fn compile(patterns: &[RowColBits; MATRIX_SIZE], routes: &RouteTable) -> OutputFrame {
        let blank = ScanSlot::compile(RowColBits::BLANK, routes);
        let mut slots = [blank; SCAN_SLOTS];

        for (slot, pattern) in slots.iter_mut().step_by(2).zip(patterns.iter()) {
            *slot = ScanSlot::compile(*pattern, routes);
        }

        OutputFrame { slots }
    }

    pub fn slots(&self) -> &[ScanSlot; SCAN_SLOTS] {
        &self.slots
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ScanSlot> {
        self.slots.iter()
    }
}

impl Index<usize> for OutputFrame {
    type Output = ScanSlot;

    fn index(&self, slot: usize) -> &ScanSlot {
        &self.slots[slot]
    }
}

impl<'a> IntoIterator for &'a OutputFrame {
    type Item = &'a ScanSlot;
    type IntoIter = core::slice::Iter<'a, ScanSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
