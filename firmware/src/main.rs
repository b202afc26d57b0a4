#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    interrupt::{self, InterruptExt, Priority},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Delay, Duration, Ticker, Timer};
use nrf_softdevice::{
    ble::{gatt_server, peripheral as ble_peripheral},
    Softdevice,
};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::{Battery, BatteryInfo},
    button::Button,
    display::Display,
    vibrator::{PulseLength, Vibrator},
};
use system::{
    bluetooth::{
        softdevice_config, BatteryServiceEvent, CurrentTimeServiceEvent, Server, ServerEvent,
        ADV_DATA, SCAN_DATA,
    },
    config::{SystemConfig, UserSettings},
    time::{TimeManager, TimeReference},
};

// Others
use chrono::{NaiveDateTime, Timelike};
use esitrot_ui::{Alert, Event, WatchState, Watchface, BACKGROUND};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
const TIMEZONE: i32 = 1 * 3_600;

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryInfo> = Signal::new();
static CONNECTION: Signal<ThreadModeRawMutex, bool> = Signal::new();
static INCREASE_BRIGHTNESS: Signal<ThreadModeRawMutex, bool> = Signal::new();
static NOTIFY: Signal<ThreadModeRawMutex, u8> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();
static TIME_SYNC: Signal<ThreadModeRawMutex, TimeReference> = Signal::new();

/// Keep the SoftDevice scheduled.
#[embassy_executor::task(pool_size = 1)]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise, serve GATT while a central is connected, and report link
/// changes on both edges.
#[embassy_executor::task(pool_size = 1)]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) {
    loop {
        let config = ble_peripheral::Config::default();
        let adv = ble_peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match ble_peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                defmt::warn!("Advertising failed: {:?}", e);
                continue;
            }
        };

        defmt::info!("Connection established");
        CONNECTION.signal(true);

        let disconnect = gatt_server::run(&conn, server, |e| match e {
            ServerEvent::Bas(BatteryServiceEvent::BatteryLevelCccdWrite { notifications }) => {
                defmt::debug!("Battery notifications: {}", notifications);
            }
            ServerEvent::Cts(CurrentTimeServiceEvent::CurrentTimeWrite(value)) => {
                match TimeReference::from_cts_bytes(&value) {
                    Some(reference) => TIME_SYNC.signal(reference),
                    None => defmt::warn!("Discarding malformed time update"),
                }
            }
        })
        .await;

        defmt::info!("Connection lost: {:?}", disconnect);
        CONNECTION.signal(false);
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, server: &'static Server) {
    loop {
        if battery.update().await {
            defmt::info!("Battery status updated");
            let info = battery.info();
            if let Err(e) = server.bas.battery_level_set(&info.percent) {
                defmt::warn!("Battery level GATT update failed: {:?}", e);
            }
            BATTERY_STATUS.signal(info);
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Derive minute ticks from the time reference.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(mut time: TimeManager) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    let mut shown_minute = None;
    loop {
        if TIME_SYNC.signaled() {
            time.set_time(TIME_SYNC.wait().await);
            defmt::info!("Time synchronized");
            shown_minute = None;
        }

        let local = time.get_time() + chrono::Duration::seconds(TIMEZONE as i64);
        let minute = local.timestamp() / 60;
        if shown_minute != Some(minute) {
            shown_minute = Some(minute);
            TIME.signal(local);
        }

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Apply pending events to the watch state and repaint what changed.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display<SPI2>, settings: UserSettings) {
    let face = Watchface::new(settings.time_style);
    let mut state = WatchState::new(NaiveDateTime::UNIX_EPOCH);
    display.clear(BACKGROUND).unwrap();

    let mut tick = Ticker::every(Duration::from_millis(200));
    loop {
        if BATTERY_STATUS.signaled() {
            let info = BATTERY_STATUS.wait().await;
            defmt::info!(
                "Battery status: {} ({})",
                info.percent,
                if info.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            dispatch(&face, &mut display, &mut state, Event::Battery(info.percent));
        }

        if CONNECTION.signaled() {
            let connected = CONNECTION.wait().await;
            defmt::info!("Connected: {}", connected);
            dispatch(&face, &mut display, &mut state, Event::Connection(connected));
        }

        if TIME.signaled() {
            let now = TIME.wait().await;
            defmt::info!("Current time: {}:{}", now.hour(), now.minute());
            dispatch(&face, &mut display, &mut state, Event::Tick(now));
        }

        tick.next().await;
    }
}

/// Fold one event into the state, repaint the flagged regions, queue the
/// alert.
fn dispatch(face: &Watchface, display: &mut Display<SPI2>, state: &mut WatchState, event: Event) {
    let effects = state.apply(event);
    face.draw_regions(display.target(), state, &effects.redraw)
        .unwrap();
    if let Some(Alert::DoublePulse) = effects.alert {
        NOTIFY.signal(2);
    }
}

/// Play signaled vibration patterns.
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut vibrator: Vibrator) {
    loop {
        let times = NOTIFY.wait().await;
        vibrator.pulse(PulseLength::Short, times).await;
    }
}

/// Report debounced button presses.
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button) {
    loop {
        button.wait_for_press().await;
        INCREASE_BRIGHTNESS.signal(true);
    }
}

/// Update backlight brightness
#[embassy_executor::task(pool_size = 1)]
async fn update_brightness(mut backlight: Backlight) {
    loop {
        if INCREASE_BRIGHTNESS.wait().await {
            if backlight.get_brightness() < 7 {
                unwrap!(backlight.brighter());
            } else {
                backlight.off();
            }
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Keep peripheral interrupts clear of the SoftDevice-reserved priorities
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Battery
    let battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None)).await;
    BATTERY_STATUS.signal(battery.info());

    // Initialize Backlight, kept dark until the LCD is ready
    let mut backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        0,
    );

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize vibration motor
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;
    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        &mut Delay,
    );
    unwrap!(backlight.set(2));

    // Initialize Bluetooth
    let sd = Softdevice::enable(&softdevice_config());
    static SERVER: StaticCell<Server> = StaticCell::new();
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;

    // Initialize the clock from the build moment
    let mut time = TimeManager::init();
    time.set_time(TimeReference::from_datetime(unwrap!(
        NaiveDateTime::from_timestamp_opt(UTC_EPOCH, 0)
    )));

    // Advertising has not been answered yet: seed the indicator through the
    // regular disconnect path.
    CONNECTION.signal(false);

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(update_battery_status(battery, server)));
    unwrap!(spawner.spawn(update_brightness(backlight)));
    unwrap!(spawner.spawn(update_lcd(display, UserSettings::default())));
    unwrap!(spawner.spawn(update_time(time)));
    unwrap!(spawner.spawn(notify(vibrator)));
}
