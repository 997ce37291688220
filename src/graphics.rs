//! embedded-graphics support for the matrix
//!
//! This module is behind the feature flag "graphics". With it, everything embedded_graphics
//! can draw (lines, shapes, small bitmaps) can be drawn on the 8x8 matrix. `x` is the column,
//! `y` the bitmap row, so (0, 0) is column 0 on the side with the model number.
//!
//! Drawing only changes the bitmap and recompiles the frame, the pins are still driven by
//! [`LedMatrix::draw`].

use core::convert::Infallible;

use embedded_graphics_core::{pixelcolor::BinaryColor, prelude::*};

use crate::{backend::PinBank, display::LedMatrix, MATRIX_SIZE};

const MAX: u32 = MATRIX_SIZE as u32 - 1;

impl<B> DrawTarget for LedMatrix<B>
where
    B: PinBank,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let mut bitmap = *self.pixels();
        for Pixel(coord, color) in pixels {
            if let Ok((x @ 0..=MAX, y @ 0..=MAX)) = coord.try_into() {
                let row: &mut u8 = &mut bitmap[y as usize];
                let mask: u8 = 1 << x;
                match color {
                    BinaryColor::On => *row |= mask,
                    BinaryColor::Off => *row &= !mask,
                }
            }
        }
        self.set_pixels(bitmap);
        Ok(())
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Infallible> {
        let byte: u8 = match color {
            BinaryColor::On => 0xff,
            BinaryColor::Off => 0x00,
        };
        self.set_pixels([byte; MATRIX_SIZE]);
        Ok(())
    }
}

impl<B> OriginDimensions for LedMatrix<B>
where
    B: PinBank,
{
    fn size(&self) -> Size {
        Size::new(MATRIX_SIZE as u32, MATRIX_SIZE as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPins;

    fn matrix() -> LedMatrix<MockPins> {
        LedMatrix::new(MockPins::new(), [2, 3, 4], [5, 6, 7, 8, 9, 10, 11, 12], [0; 8]).unwrap()
    }

    #[test]
    fn pixels_set_bitmap_bits() {
        let mut matrix = matrix();
        matrix
            .draw_iter([
                Pixel(Point::new(0, 0), BinaryColor::On),
                Pixel(Point::new(7, 7), BinaryColor::On),
                Pixel(Point::new(8, 0), BinaryColor::On),
                Pixel(Point::new(-1, 3), BinaryColor::On),
            ])
            .unwrap();
        assert_eq!(matrix.pixels(), &[0x01, 0, 0, 0, 0, 0, 0, 0x80]);

        matrix
            .draw_iter([Pixel(Point::new(0, 0), BinaryColor::Off)])
            .unwrap();
        assert_eq!(matrix.pixels()[0], 0);
    }

    #[test]
    fn clear_fills_and_recompiles() {
        let mut matrix = matrix();
        DrawTarget::clear(&mut matrix, BinaryColor::On).unwrap();
        assert_eq!(matrix.pixels(), &[0xff; 8]);
        assert_eq!(matrix.routes().decode(&matrix.frame()[0]).driven_columns(), 0xff);
        assert_eq!(matrix.size(), Size::new(8, 8));
    }
}
