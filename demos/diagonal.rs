use embedded_hal::digital::v2;
use led8x8::{HalPinBank, LedMatrix};
use std::convert::Infallible;

pub struct DummyOutputPin;

impl v2::OutputPin for DummyOutputPin {
    type Error = Infallible;
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn main() {
    // DATA, SRCLK, RCLK
    let shift_pins = [2, 3, 4];
    // R4, R6, C1, C2, R7, C4, R5, R2
    let hard_wire_pins = [5, 6, 7, 8, 9, 10, 11, 12];

    let mut bank = HalPinBank::new();
    for pin in shift_pins.iter().chain(hard_wire_pins.iter()) {
        bank.attach(*pin, DummyOutputPin)
            .expect("pin numbers are below 16");
    }

    let diagonal = [
        0b1000_0000,
        0b0100_0000,
        0b0010_0000,
        0b0001_0000,
        0b0000_1000,
        0b0000_0100,
        0b0000_0010,
        0b0000_0001,
    ];

    let mut matrix = LedMatrix::new(bank, shift_pins, hard_wire_pins, diagonal)
        .expect("stock wiring is valid");

    for (i, slot) in matrix.frame().iter().enumerate() {
        println!(
            "slot {:2}: shift {:08b} low {:08b} high {:08b}",
            i, slot.shift, slot.low_group, slot.high_group
        );
    }

    matrix.draw().expect("Infallible cannot fail");
}
