//! Watchface layout and drawing.

use embedded_graphics::{
    mono_font::{iso_8859_1::FONT_10X20, MonoTextStyleBuilder},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Text},
};
use profont::PROFONT_24_POINT;

use crate::{
    bar::BatteryBar,
    format::{date_text, time_text, TimeStyle, DATE_BUF_LEN, TIME_BUF_LEN},
    icons::{draw_bitmap, BT_GLYPH, BT_GLYPH_SIZE},
    state::{Redraw, WatchState},
};

pub const SCREEN_WIDTH: u32 = 240;
pub const SCREEN_HEIGHT: u32 = 240;

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;
const TEXT_COLOR: Rgb565 = Rgb565::WHITE;
const BAR_EMPTY: Rgb565 = Rgb565::CSS_DIM_GRAY;
const BAR_FILLED: Rgb565 = Rgb565::WHITE;

const TIME_POS: Point = Point::new(SCREEN_WIDTH as i32 / 2, 118);
const DATE_POS: Point = Point::new(SCREEN_WIDTH as i32 / 2, 158);
// 114 px track, centered above the bottom margin.
const BAR: BatteryBar = BatteryBar::new(Point::new(63, 204), Size::new(114, 6));
const GLYPH_POS: Point = Point::new(112, 44);

/// Paints the watchface regions onto an RGB565 target.
pub struct Watchface {
    style: TimeStyle,
}

impl Watchface {
    pub fn new(style: TimeStyle) -> Self {
        Self { style }
    }

    /// Repaint every region.
    pub fn draw<D>(&self, target: &mut D, state: &WatchState) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.draw_regions(target, state, &Redraw::all())
    }

    /// Repaint only the regions flagged in `redraw`.
    pub fn draw_regions<D>(
        &self,
        target: &mut D,
        state: &WatchState,
        redraw: &Redraw,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if redraw.time {
            self.draw_time(target, state)?;
        }
        if redraw.date {
            self.draw_date(target, state)?;
        }
        if redraw.battery {
            self.draw_battery(target, state)?;
        }
        if redraw.connectivity {
            self.draw_connectivity(target, state)?;
        }
        Ok(())
    }

    fn draw_time<D>(&self, target: &mut D, state: &WatchState) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = MonoTextStyleBuilder::new()
            .font(&PROFONT_24_POINT)
            .text_color(TEXT_COLOR)
            .background_color(BACKGROUND)
            .build();

        let mut buf = [0u8; TIME_BUF_LEN];
        let text = time_text(&mut buf, &state.time(), self.style);
        Text::with_alignment(text, TIME_POS, style, Alignment::Center).draw(target)?;
        Ok(())
    }

    fn draw_date<D>(&self, target: &mut D, state: &WatchState) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_10X20)
            .text_color(TEXT_COLOR)
            .background_color(BACKGROUND)
            .build();

        let mut buf = [0u8; DATE_BUF_LEN];
        let text = date_text(&mut buf, &state.time());
        Text::with_alignment(text, DATE_POS, style, Alignment::Center).draw(target)?;
        Ok(())
    }

    fn draw_battery<D>(&self, target: &mut D, state: &WatchState) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        BAR.draw(target, state.battery_percent(), BAR_EMPTY, BAR_FILLED)
    }

    fn draw_connectivity<D>(&self, target: &mut D, state: &WatchState) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if state.glyph_visible() {
            draw_bitmap(
                target,
                BT_GLYPH,
                BT_GLYPH_SIZE,
                GLYPH_POS,
                TEXT_COLOR,
                BACKGROUND,
            )
        } else {
            Rectangle::new(GLYPH_POS, BT_GLYPH_SIZE)
                .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
                .draw(target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use embedded_graphics::mock_display::MockDisplay;

    fn state() -> WatchState {
        WatchState::new(
            NaiveDate::from_ymd_opt(2024, 9, 23)
                .unwrap()
                .and_hms_opt(9, 5, 0)
                .unwrap(),
        )
    }

    #[test]
    fn no_flags_paints_nothing() {
        let face = Watchface::new(TimeStyle::H24);
        let mut display = MockDisplay::<Rgb565>::new();
        face.draw_regions(&mut display, &state(), &Redraw::default())
            .unwrap();
        MockDisplay::new().assert_eq(&display);
    }

    #[test]
    fn layout_stays_on_screen() {
        assert!(63 + 114 <= SCREEN_WIDTH);
        assert!(204 + 6 <= SCREEN_HEIGHT);
        assert!(GLYPH_POS.x as u32 + BT_GLYPH_SIZE.width <= SCREEN_WIDTH);
        assert!(GLYPH_POS.y as u32 + BT_GLYPH_SIZE.height <= SCREEN_HEIGHT);
    }
}
