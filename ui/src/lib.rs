//! Watchface logic and rendering for Esitrot.
//!
//! Everything in this crate is independent of the watch hardware: state is
//! folded event by event through [`WatchState::apply`] and painted onto any
//! `embedded_graphics` draw target by [`Watchface`]. The firmware crate owns
//! the event sources and the LCD.

#![cfg_attr(not(test), no_std)]

mod bar;
mod face;
mod format;
mod icons;
mod state;

pub use bar::BatteryBar;
pub use face::{Watchface, BACKGROUND, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use format::{date_text, time_text, TimeStyle, DATE_BUF_LEN, TIME_BUF_LEN};
pub use state::{Alert, Effects, Event, Redraw, WatchState};
