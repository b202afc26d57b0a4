//! Display control module

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::pixelcolor::Rgb565;
use mipidsi::{models::ST7789, Builder, Orientation};

use esitrot_ui::{SCREEN_HEIGHT, SCREEN_WIDTH};

type Lcd<SPI> = mipidsi::Display<
    SPIInterface<Spim<'static, SPI>, Output<'static, P0_18>, Output<'static, P0_25>>,
    ST7789,
    Output<'static, P0_26>,
>;

/// ST7789 LCD behind SPIM2
pub struct Display<SPI>
where
    SPI: spim::Instance,
{
    lcd: Lcd<SPI>,
}

impl<SPI> Display<SPI>
where
    SPI: spim::Instance,
{
    /// Initialize the display
    pub fn init(
        spim: Spim<'static, SPI>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
        delay: &mut Delay,
    ) -> Self {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16)
            .with_orientation(Orientation::Portrait(false))
            .init(delay, Some(rst_pin))
            .unwrap();

        Self { lcd }
    }

    /// Clear the display
    pub fn clear(&mut self, color: Rgb565) -> Result<(), mipidsi::Error> {
        self.lcd.clear(color)
    }

    /// Draw target for the watchface
    pub fn target(&mut self) -> &mut Lcd<SPI> {
        &mut self.lcd
    }
}
