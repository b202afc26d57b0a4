//! Watch state and event dispatch.

use chrono::NaiveDateTime;

/// Events delivered by the firmware's event sources.
#[derive(Clone, Copy, Debug)]
pub enum Event {
    /// Minute tick carrying the current local time.
    Tick(NaiveDateTime),
    /// Battery level changed, percentage 0–100.
    Battery(u8),
    /// Connection to the companion device established or lost.
    Connection(bool),
}

/// Haptic patterns the watch can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alert {
    DoublePulse,
}

/// Screen regions that need repainting after an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Redraw {
    pub time: bool,
    pub date: bool,
    pub battery: bool,
    pub connectivity: bool,
}

impl Redraw {
    /// Every region at once, for the first paint.
    pub const fn all() -> Self {
        Self {
            time: true,
            date: true,
            battery: true,
            connectivity: true,
        }
    }
}

/// What the firmware has to do after applying an event.
#[derive(Clone, Copy, Debug, Default)]
pub struct Effects {
    pub redraw: Redraw,
    pub alert: Option<Alert>,
}

/// Current display state, updated event by event.
pub struct WatchState {
    time: NaiveDateTime,
    battery_percent: u8,
    connected: bool,
}

impl WatchState {
    /// State as shown before any event arrived.
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            time,
            battery_percent: 100,
            connected: false,
        }
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Battery level, always within 0–100.
    pub fn battery_percent(&self) -> u8 {
        self.battery_percent
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    /// The Bluetooth glyph marks a missing connection.
    pub fn glyph_visible(&self) -> bool {
        !self.connected
    }

    /// Fold one event into the state and report the required follow-ups.
    ///
    /// Every delivery of a lost connection requests the alert, even when the
    /// previous delivery already reported the link as lost.
    pub fn apply(&mut self, event: Event) -> Effects {
        let mut effects = Effects::default();
        match event {
            Event::Tick(time) => {
                self.time = time;
                // A tick rewrites both text regions, date included.
                effects.redraw.time = true;
                effects.redraw.date = true;
            }
            Event::Battery(percent) => {
                self.battery_percent = percent.min(100);
                effects.redraw.battery = true;
            }
            Event::Connection(connected) => {
                self.connected = connected;
                effects.redraw.connectivity = true;
                if !connected {
                    effects.alert = Some(Alert::DoublePulse);
                }
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn state() -> WatchState {
        WatchState::new(
            NaiveDate::from_ymd_opt(2024, 9, 23)
                .unwrap()
                .and_hms_opt(9, 5, 0)
                .unwrap(),
        )
    }

    #[test]
    fn glyph_visibility_negates_connection() {
        let mut state = state();
        state.apply(Event::Connection(true));
        assert!(!state.glyph_visible());
        state.apply(Event::Connection(false));
        assert!(state.glyph_visible());
    }

    #[test]
    fn every_disconnected_delivery_alerts_once() {
        let mut state = state();
        assert_eq!(
            state.apply(Event::Connection(false)).alert,
            Some(Alert::DoublePulse)
        );
        // A redundant "still disconnected" delivery alerts again.
        assert_eq!(
            state.apply(Event::Connection(false)).alert,
            Some(Alert::DoublePulse)
        );
        assert_eq!(state.apply(Event::Connection(true)).alert, None);
    }

    #[test]
    fn connected_delivery_never_alerts() {
        let mut state = state();
        for _ in 0..3 {
            assert_eq!(state.apply(Event::Connection(true)).alert, None);
        }
    }

    #[test]
    fn battery_intake_clamps() {
        let mut state = state();
        state.apply(Event::Battery(250));
        assert_eq!(state.battery_percent(), 100);
        state.apply(Event::Battery(42));
        assert_eq!(state.battery_percent(), 42);
    }

    #[test]
    fn tick_redraws_both_text_regions() {
        let mut state = state();
        let now = state.time();
        let effects = state.apply(Event::Tick(now));
        assert!(effects.redraw.time && effects.redraw.date);
        assert!(!effects.redraw.battery && !effects.redraw.connectivity);
        assert_eq!(effects.alert, None);
    }

    #[test]
    fn battery_event_touches_only_the_bar() {
        let mut state = state();
        let effects = state.apply(Event::Battery(80));
        assert_eq!(
            effects.redraw,
            Redraw {
                battery: true,
                ..Redraw::default()
            }
        );
    }
}
