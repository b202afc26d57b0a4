//! Battery bar rendering.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

/// Horizontal bar mapping a battery percentage onto a fixed track.
#[derive(Clone, Copy, Debug)]
pub struct BatteryBar {
    bounds: Rectangle,
}

impl BatteryBar {
    pub const fn new(top_left: Point, track: Size) -> Self {
        Self {
            bounds: Rectangle::new(top_left, track),
        }
    }

    /// Width of the filled span in pixels.
    ///
    /// Linear in the level; input outside 0–100 is clamped so the fill
    /// never leaves the track.
    pub fn fill_width(&self, percent: u8) -> u32 {
        let level = percent.min(100) as f32;
        libm::roundf(level / 100.0 * self.bounds.size.width as f32) as u32
    }

    /// Paint the empty track, then the filled span anchored at its origin.
    pub fn draw<D>(
        &self,
        target: &mut D,
        percent: u8,
        empty: Rgb565,
        filled: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(empty))
            .draw(target)?;
        Rectangle::new(
            self.bounds.top_left,
            Size::new(self.fill_width(percent), self.bounds.size.height),
        )
        .into_styled(PrimitiveStyle::with_fill(filled))
        .draw(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    const TRACK: BatteryBar = BatteryBar::new(Point::zero(), Size::new(114, 2));

    #[test]
    fn fill_width_is_linear_and_bounded() {
        for level in 0..=100u8 {
            let width = TRACK.fill_width(level);
            assert_eq!(width, (level as f32 / 100.0 * 114.0).round() as u32);
            assert!(width <= 114);
        }
    }

    #[test]
    fn fill_width_edges() {
        assert_eq!(TRACK.fill_width(0), 0);
        assert_eq!(TRACK.fill_width(50), 57);
        assert_eq!(TRACK.fill_width(100), 114);
    }

    #[test]
    fn out_of_range_level_clamps_to_full() {
        assert_eq!(TRACK.fill_width(101), 114);
        assert_eq!(TRACK.fill_width(255), 114);
    }

    fn draw(bar: &BatteryBar, percent: u8) -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        bar.draw(&mut display, percent, Rgb565::BLACK, Rgb565::WHITE)
            .unwrap();
        display
    }

    #[test]
    fn draw_splits_track_at_the_computed_width() {
        let bar = BatteryBar::new(Point::zero(), Size::new(40, 4));
        let display = draw(&bar, 50);
        assert_eq!(display.get_pixel(Point::new(19, 0)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(20, 0)), Some(Rgb565::BLACK));
        assert_eq!(display.get_pixel(Point::new(39, 3)), Some(Rgb565::BLACK));
    }

    #[test]
    fn empty_and_full_cover_the_whole_track() {
        let bar = BatteryBar::new(Point::zero(), Size::new(40, 4));
        let empty = draw(&bar, 0);
        assert_eq!(empty.get_pixel(Point::zero()), Some(Rgb565::BLACK));
        assert_eq!(empty.get_pixel(Point::new(39, 3)), Some(Rgb565::BLACK));
        let full = draw(&bar, 100);
        assert_eq!(full.get_pixel(Point::zero()), Some(Rgb565::WHITE));
        assert_eq!(full.get_pixel(Point::new(39, 3)), Some(Rgb565::WHITE));
    }

    #[test]
    fn redraw_with_unchanged_level_is_identical() {
        let bar = BatteryBar::new(Point::zero(), Size::new(40, 4));
        draw(&bar, 73).assert_eq(&draw(&bar, 73));
    }
}
