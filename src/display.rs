//! # Main driver for the 8x8 matrix
//!
//! [`LedMatrix`] owns the pins, the wiring and the pixel bitmap, and keeps a compiled
//! [`OutputFrame`] of the bitmap around so that [`draw`](LedMatrix::draw) only has to push
//! bytes to the pins. The frame is recompiled whenever the bitmap or the wiring changes.
//!
//! The matrix is multiplexed, so nothing stays lit on its own: call `draw` over and over from
//! your main loop. [`draw_and_hold`](LedMatrix::draw_and_hold) waits after each refresh, the
//! longer the wait the longer the last row stays lit compared to the others.
//!
//! When the driver is dropped it draws one blank frame, so the display isn't left with a row
//! lit.

use embedded_hal::blocking::delay::DelayUs;

use crate::{
    backend::{PinBank, PortGroup},
    bitbang::{ShiftPins, ShiftRegister},
    error::{MatrixError, WiringError},
    frame::OutputFrame,
    pattern,
    wiring::{RouteTable, WireAssignment},
    PixelBitmap, MATRIX_SIZE, PIN_COUNT,
};

pub struct LedMatrix<B>
where
    B: PinBank,
{
    bank: B,
    shift_register: ShiftRegister,
    wiring: WireAssignment,
    routes: RouteTable,
    pixels: PixelBitmap,
    frame: OutputFrame,
}

impl<B> LedMatrix<B>
where
    B: PinBank,
{
    /// Create a new instance of the driver with the stock wiring.
    ///
    /// Arguments:
    ///
    /// - bank: access to the pins
    /// - shift_pins: pins wired to the 74HC595, in the order DATA, SRCLK, RCLK
    /// - hard_wire_pins: pins wired to the legs R4, R6, C1, C2, R7, C4, R5, R2, in this order
    /// - pixels: initial image, see [`set_pixels`](LedMatrix::set_pixels)
    ///
    /// If the 74HC595 sits on the row 4 side instead, call
    /// [`flip_setup`](LedMatrix::flip_setup) right after this.
    pub fn new(
        bank: B,
        shift_pins: [u8; 3],
        hard_wire_pins: [u8; 8],
        pixels: PixelBitmap,
    ) -> Result<LedMatrix<B>, MatrixError<B::Error>> {
        LedMatrix::with_wiring(
            bank,
            ShiftPins::from(shift_pins),
            WireAssignment::new(hard_wire_pins),
            pixels,
        )
    }

    /// Create a new instance of the driver for any wiring.
    ///
    /// The wiring is validated, all used pins are configured as outputs and the 74HC595
    /// control pins are set low. Nothing is drawn yet.
    pub fn with_wiring(
        mut bank: B,
        shift_pins: ShiftPins,
        wiring: WireAssignment,
        pixels: PixelBitmap,
    ) -> Result<LedMatrix<B>, MatrixError<B::Error>> {
        let routes = RouteTable::build(&wiring)?;
        check_shift_pins(&shift_pins, &wiring)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("matrix wiring: {}, shift pins: {}", wiring, shift_pins);

        for &pin in wiring.hard_wire_pins() {
            bank.configure_output(pin).map_err(MatrixError::Pin)?;
        }
        let shift_register = ShiftRegister::new(shift_pins);
        shift_register.init(&mut bank).map_err(MatrixError::Pin)?;

        let frame = OutputFrame::compile(&pattern::generate(&pixels), &routes);
        Ok(LedMatrix {
            bank,
            shift_register,
            wiring,
            routes,
            pixels,
            frame,
        })
    }

    /// Replace the whole image.
    ///
    /// One byte per row, row 0 being the side with the model number printed on. Bit `c` of a
    /// row lights column `c`, so with the usual binary notation the display shows the bits
    /// mirrored:
    ///
    /// ```text
    /// 0b1000_0000 -> column 7 lit
    /// 0b0000_0001 -> column 0 lit
    /// ```
    pub fn set_pixels(&mut self, pixels: PixelBitmap) {
        self.pixels = pixels;
        self.compile();
    }

    /// Switch a single pixel, out of range coordinates are ignored.
    pub fn set_pixel(&mut self, row: usize, column: usize, on: bool) {
        if row >= MATRIX_SIZE || column >= MATRIX_SIZE {
            return;
        }
        let mut pixels = self.pixels;
        if on {
            pixels[row] |= 1 << column;
        } else {
            pixels[row] &= !(1 << column);
        }
        self.set_pixels(pixels);
    }

    /// Switch all pixels off.
    pub fn clear(&mut self) {
        self.set_pixels([0; MATRIX_SIZE]);
    }

    pub fn pixels(&self) -> &PixelBitmap {
        &self.pixels
    }

    /// Frame that the next [`draw`](LedMatrix::draw) puts on the pins.
    pub fn frame(&self) -> &OutputFrame {
        &self.frame
    }

    pub fn wiring(&self) -> &WireAssignment {
        &self.wiring
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn shift_pins(&self) -> ShiftPins {
        self.shift_register.pins()
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// The pins keep belonging to the driver, don't touch the matrix pins through this.
    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    /// Flip the configuration for a matrix with the 74HC595 on the row 4 side.
    ///
    /// Meant to be called once, right after construction. See [`WireAssignment::flip`]. When
    /// the wiring can't be flipped the driver is left as it was.
    pub fn flip_setup(&mut self) -> Result<(), WiringError> {
        let mut wiring = self.wiring.clone();
        wiring.flip()?;
        let routes = RouteTable::build(&wiring)?;

        self.wiring = wiring;
        self.routes = routes;
        self.compile();
        Ok(())
    }

    /// Draw the image once: all 16 scan slots, in order.
    pub fn draw(&mut self) -> Result<(), B::Error> {
        let masks = [
            self.routes.group_mask(PortGroup::Low),
            self.routes.group_mask(PortGroup::High),
        ];
        for slot in self.frame.iter() {
            self.shift_register.emit_slot(&mut self.bank, slot, masks)?;
        }
        Ok(())
    }

    /// Draw the image once and then wait for `us` microseconds.
    pub fn draw_and_hold<D>(&mut self, delay: &mut D, us: u32) -> Result<(), B::Error>
    where
        D: DelayUs<u32>,
    {
        self.draw()?;
        delay.delay_us(us);
        Ok(())
    }

    fn compile(&mut self) {
        self.frame = OutputFrame::compile(&pattern::generate(&self.pixels), &self.routes);
    }
}

impl<B> Drop for LedMatrix<B>
where
    B: PinBank,
{
    fn drop(&mut self) {
        self.clear();
        // nothing left to report a pin error to
        let _ = self.draw();
    }
}

fn check_shift_pins(shift_pins: &ShiftPins, wiring: &WireAssignment) -> Result<(), WiringError> {
    let mut used: u16 = wiring
        .hard_wire_pins()
        .iter()
        .fold(0, |used, &pin| used | (1 << pin));

    for pin in shift_pins.iter() {
        if pin >= PIN_COUNT {
            return Err(WiringError::PinOutOfRange(pin));
        }
        if used & (1 << pin) != 0 {
            return Err(WiringError::PinConflict(pin));
        }
        used |= 1 << pin;
    }
    Ok(())
}
