//! # Pin access
//!
//! The driver addresses pins by number, the way the matrix is wired on the board. Pins 0..8
//! form the low group and 8..16 the high group, each of which can be written as one byte
//! (PORTD and PORTB on an ATmega328, any 8-bit GPIO port elsewhere).
//!
//! Implement [`PinBank`] for direct register access, or wrap `embedded_hal` pins in a
//! [`HalPinBank`].

use embedded_hal::digital::v2::OutputPin;

use crate::{GROUP_WIDTH, PIN_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortGroup {
    /// Pins 0..8
    Low,
    /// Pins 8..16
    High,
}

impl PortGroup {
    /// Group of `pin` and its bit within the group.
    pub fn locate(pin: u8) -> (PortGroup, u8) {
        if pin < GROUP_WIDTH {
            (PortGroup::Low, pin)
        } else {
            (PortGroup::High, pin % GROUP_WIDTH)
        }
    }

    pub fn first_pin(self) -> u8 {
        match self {
            PortGroup::Low => 0,
            PortGroup::High => GROUP_WIDTH,
        }
    }
}

/// GPIO service used by the driver.
pub trait PinBank {
    type Error;

    /// Make `pin` a push-pull output.
    fn configure_output(&mut self, pin: u8) -> Result<(), Self::Error>;

    fn set_high(&mut self, pin: u8) -> Result<(), Self::Error>;

    fn set_low(&mut self, pin: u8) -> Result<(), Self::Error>;

    /// Write the bits of `bits` selected by `mask` to the pins of `group`, leaving the other
    /// pins of the group alone.
    ///
    /// The default sets one pin after the other. Override it if the hardware can store the
    /// whole group at once.
    fn write_group(&mut self, group: PortGroup, bits: u8, mask: u8) -> Result<(), Self::Error> {
        for bit in 0..GROUP_WIDTH {
            if mask & (1 << bit) == 0 {
                continue;
            }
            let pin = group.first_pin() + bit;
            if bits & (1 << bit) != 0 {
                self.set_high(pin)?;
            } else {
                self.set_low(pin)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalPinError<PinErr> {
    Pin(PinErr),
    /// No pin was attached under this number.
    Unmapped(u8),
}

/// [`PinBank`] made of `embedded_hal` output pins.
///
/// All pins have to be of the same type, so use the type-erased pins of your HAL (for example
/// `ErasedPin<Output<PushPull>>` on stm32 or `Pin<DynPinId, FunctionSioOutput, PullDown>` on
/// rp2040). The HAL already configured them as outputs, so `configure_output` only checks that
/// a pin is attached.
pub struct HalPinBank<PIN> {
    pins: [Option<PIN>; PIN_COUNT as usize],
}

impl<PIN, ERR> HalPinBank<PIN>
where
    PIN: OutputPin<Error = ERR>,
{
    pub fn new() -> HalPinBank<PIN> {
        HalPinBank {
            pins: core::array::from_fn(|_| None),
        }
    }

    /// Attach `pin` under `number`, returning the pin previously attached there.
    pub fn attach(&mut self, number: u8, pin: PIN) -> Result<Option<PIN>, HalPinError<ERR>> {
        let entry = self
            .pins
            .get_mut(number as usize)
            .ok_or(HalPinError::Unmapped(number))?;
        Ok(entry.replace(pin))
    }

    /// Detach and return the pin under `number`.
    pub fn detach(&mut self, number: u8) -> Option<PIN> {
        self.pins.get_mut(number as usize).and_then(Option::take)
    }

    fn pin(&mut self, number: u8) -> Result<&mut PIN, HalPinError<ERR>> {
        self.pins
            .get_mut(number as usize)
            .and_then(Option::as_mut)
            .ok_or(HalPinError::Unmapped(number))
    }
}

impl<PIN, ERR> Default for HalPinBank<PIN>
where
    PIN: OutputPin<Error = ERR>,
{
    fn default() -> Self {
        HalPinBank::new()
    }
}

impl<PIN, ERR> PinBank for HalPinBank<PIN>
where
    PIN: OutputPin<Error = ERR>,
{
    type Error = HalPinError<ERR>;

    fn configure_output(&mut self, pin: u8) -> Result<(), Self::Error> {
        self.pin(pin).map(|_| ())
    }

    fn set_high(&mut self, pin: u8) -> Result<(), Self::Error> {
        self.pin(pin)?.set_high().map_err(HalPinError::Pin)
    }

    fn set_low(&mut self, pin: u8) -> Result<(), Self::Error> {
        self.pin(pin)?.set_low().map_err(HalPinError::Pin)
    }
}
