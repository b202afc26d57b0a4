//! 1-bpp icon data and blitting.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

/// Bluetooth rune, 16×20 px, one bit per pixel, MSB first within each row.
#[rustfmt::skip]
pub const BT_GLYPH: &[u8] = &[
    0x01, 0x80,
    0x01, 0xC0,
    0x01, 0xA0,
    0x01, 0x90,
    0x31, 0x88,
    0x19, 0x98,
    0x0D, 0xB0,
    0x07, 0xE0,
    0x03, 0xC0,
    0x01, 0x80,
    0x01, 0x80,
    0x03, 0xC0,
    0x07, 0xE0,
    0x0D, 0xB0,
    0x19, 0x98,
    0x31, 0x88,
    0x01, 0x90,
    0x01, 0xA0,
    0x01, 0xC0,
    0x01, 0x80,
];

pub const BT_GLYPH_SIZE: Size = Size::new(16, 20);

/// Blit 1-bpp `data` at `position`, painting set bits in `fg` and cleared
/// bits in `bg` so stale pixels underneath are overwritten.
pub fn draw_bitmap<D>(
    target: &mut D,
    data: &[u8],
    size: Size,
    position: Point,
    fg: Rgb565,
    bg: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let width = size.width as usize;
    let height = size.height as usize;
    let bytes_per_row = (width + 7) / 8;

    let pixels = (0..height).flat_map(move |y| {
        (0..width).map(move |x| {
            let byte = data.get(y * bytes_per_row + x / 8).copied().unwrap_or(0);
            let bit = (byte >> (7 - x % 8)) & 1;
            let color = if bit == 1 { fg } else { bg };
            Pixel(Point::new(x as i32, y as i32) + position, color)
        })
    });

    target.draw_iter(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    #[test]
    fn glyph_data_matches_declared_size() {
        assert_eq!(BT_GLYPH.len(), 2 * BT_GLYPH_SIZE.height as usize);
    }

    #[test]
    fn blit_paints_both_planes() {
        let mut display = MockDisplay::new();
        draw_bitmap(
            &mut display,
            BT_GLYPH,
            BT_GLYPH_SIZE,
            Point::zero(),
            Rgb565::WHITE,
            Rgb565::BLACK,
        )
        .unwrap();
        // Spine of the rune.
        assert_eq!(display.get_pixel(Point::new(7, 10)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(8, 10)), Some(Rgb565::WHITE));
        // Background corner.
        assert_eq!(display.get_pixel(Point::zero()), Some(Rgb565::BLACK));
    }

    #[test]
    fn blit_is_confined_to_the_icon_bounds() {
        let mut display = MockDisplay::new();
        draw_bitmap(
            &mut display,
            BT_GLYPH,
            BT_GLYPH_SIZE,
            Point::new(4, 4),
            Rgb565::WHITE,
            Rgb565::BLACK,
        )
        .unwrap();
        assert_eq!(display.get_pixel(Point::new(3, 4)), None);
        assert_eq!(display.get_pixel(Point::new(4 + 16, 4)), None);
    }
}
