//! "Bit bang" driver for the 74HC595
//!
//! Bits are clocked into the shift register on the rising edge of SRCLK and copied to the
//! parallel outputs on the rising edge of RCLK, so the outputs don't flicker while a byte is
//! being shifted in. Bits go out least significant first, which puts bit 0 on QH and bit 7 on
//! QA once all eight are in.

use crate::{
    backend::{PinBank, PortGroup},
    frame::ScanSlot,
    SHIFT_WIDTH,
};

/// Pins wired to the 74HC595.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftPins {
    /// SER
    pub data: u8,
    /// SRCLK
    pub shift_clock: u8,
    /// RCLK
    pub latch_clock: u8,
}

impl From<[u8; 3]> for ShiftPins {
    /// Pins in the order DATA, SRCLK, RCLK.
    fn from([data, shift_clock, latch_clock]: [u8; 3]) -> ShiftPins {
        ShiftPins {
            data,
            shift_clock,
            latch_clock,
        }
    }
}

impl ShiftPins {
    pub fn iter(&self) -> impl Iterator<Item = u8> {
        [self.data, self.shift_clock, self.latch_clock].into_iter()
    }
}

/// Sends bytes to the 74HC595 through a [`PinBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRegister {
    pins: ShiftPins,
}

impl ShiftRegister {
    pub fn new(pins: ShiftPins) -> ShiftRegister {
        ShiftRegister { pins }
    }

    pub fn pins(&self) -> ShiftPins {
        self.pins
    }

    /// Configure the three pins as outputs and park them low, latch clock first.
    pub fn init<B: PinBank>(&self, bank: &mut B) -> Result<(), B::Error> {
        for pin in [self.pins.latch_clock, self.pins.shift_clock, self.pins.data] {
            bank.configure_output(pin)?;
            bank.set_low(pin)?;
        }
        Ok(())
    }

    /// Shift `value` in, least significant bit first, then latch it to the outputs.
    pub fn send_byte<B: PinBank>(&self, bank: &mut B, value: u8) -> Result<(), B::Error> {
        for bit in 0..SHIFT_WIDTH {
            self.write_bit(bank, value & (1 << bit) != 0)?;
        }
        pulse(bank, self.pins.latch_clock)
    }

    /// Put one scan slot on the hardware: the shift byte, then the low and high pin groups.
    ///
    /// `masks` limits the group writes to the pins carrying matrix lines, low group first.
    pub fn emit_slot<B: PinBank>(
        &self,
        bank: &mut B,
        slot: &ScanSlot,
        masks: [u8; 2],
    ) -> Result<(), B::Error> {
        self.send_byte(bank, slot.shift)?;
        bank.write_group(PortGroup::Low, slot.low_group, masks[0])?;
        bank.write_group(PortGroup::High, slot.high_group, masks[1])
    }

    #[inline]
    fn write_bit<B: PinBank>(&self, bank: &mut B, high: bool) -> Result<(), B::Error> {
        if high {
            bank.set_high(self.pins.data)?;
        } else {
            bank.set_low(self.pins.data)?;
        }
        pulse(bank, self.pins.shift_clock)
    }
}

#[inline]
fn pulse<B: PinBank>(bank: &mut B, pin: u8) -> Result<(), B::Error> {
    bank.set_high(pin)?;
    bank.set_low(pin)
}
