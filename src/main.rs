#![no_std]
#![no_main]

// Required for ESP-IDF bootloader compatibility
// Use explicit parameters to ensure correct efuse block revision values
esp_bootloader_esp_idf::esp_app_desc!(
    env!("CARGO_PKG_VERSION"),  // version
    env!("CARGO_PKG_NAME"),     // project_name
    "00:00:00",                 // build_time
    "2025-01-01",               // build_date
    "0.0.0",                    // idf_ver (not using IDF)
    0x10000,                    // mmu_page_size (64KB)
    0,                          // min_efuse_blk_rev_full (accept all)
    u16::MAX                    // max_efuse_blk_rev_full (accept all)
);

use embassy_executor::Spawner;
use embassy_time::Delay;
use esp_backtrace as _;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::peripherals::{ADC1, GPIO34, I2C0, GPIO21, GPIO22};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::Async;
use esp_radio::esp_now::EspNow;
use esp_radio::wifi::{WifiController, WifiMode};
use log::{error, info, warn};
use static_cell::StaticCell;

use soil_light_telemetry_firmware::config;
use soil_light_telemetry_firmware::link::EspNowLink;
use soil_light_telemetry_firmware::sensor::{AdcSoilProbe, Bh1750};
use soil_light_telemetry_firmware::tasks::{self, SEND_STATUS_CHANNEL};
use soil_light_telemetry_firmware::telemetry::{setup, TelemetryConfig, TelemetrySender};

/// Type alias for the light sensor on the async I2C bus
type LightMeter = Bh1750<I2c<'static, Async>, Delay>;

/// Type alias for the fully wired telemetry sender
type NodeSender = TelemetrySender<EspNowLink<'static>, AdcSoilProbe<'static>, LightMeter, Delay>;

/// Static executor for embassy
static EXECUTOR: StaticCell<esp_rtos::embassy::Executor> = StaticCell::new();

/// Static cell for esp-radio controller (needed for 'static lifetime)
static RADIO_CONTROLLER: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

/// WiFi must stay started for ESP-NOW to work
static WIFI_CONTROLLER: StaticCell<WifiController<'static>> = StaticCell::new();

/// Hardware handed from main to the async entry point
struct Board {
    esp_now: EspNow<'static>,
    adc1: ADC1<'static>,
    soil_pin: GPIO34<'static>,
    i2c0: I2C0<'static>,
    sda: GPIO21<'static>,
    scl: GPIO22<'static>,
}

#[esp_hal::main]
fn main() -> ! {
    // WiFi stack needs a heap
    esp_alloc::heap_allocator!(size: 72 * 1024);

    esp_println::logger::init_logger(log::LevelFilter::Info);

    let peripherals = esp_hal::init(esp_hal::Config::default());

    // Initialise the RTOS scheduler with timer - MUST be done before any async operations
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Initialise esp-radio for ESP-NOW (must be after esp_rtos::start)
    let radio_controller = RADIO_CONTROLLER.init(
        esp_radio::init().expect("Failed to initialize esp-radio")
    );

    // ESP-NOW runs on the station interface
    let (mut wifi_controller, interfaces) =
        esp_radio::wifi::new(radio_controller, peripherals.WIFI, Default::default())
            .expect("Failed to initialize WiFi");
    wifi_controller
        .set_mode(WifiMode::Sta)
        .expect("Failed to set station mode");
    wifi_controller.start().expect("Failed to start WiFi");
    WIFI_CONTROLLER.init(wifi_controller);

    let board = Board {
        esp_now: interfaces.esp_now,
        adc1: peripherals.ADC1,
        soil_pin: peripherals.GPIO34,
        i2c0: peripherals.I2C0,
        sda: peripherals.GPIO21,
        scl: peripherals.GPIO22,
    };

    // Create and run the embassy executor
    let executor = EXECUTOR.init(esp_rtos::embassy::Executor::new());
    executor.run(|spawner| {
        spawner.must_spawn(async_main(spawner, board));
    })
}

#[embassy_executor::task]
async fn async_main(spawner: Spawner, board: Board) {
    spawner
        .spawn(send_status_task(SEND_STATUS_CHANNEL.receiver()))
        .unwrap();

    let mut link = EspNowLink::new(board.esp_now, SEND_STATUS_CHANNEL.sender());

    let i2c = I2c::new(
        board.i2c0,
        I2cConfig::default().with_frequency(Rate::from_khz(config::i2c::FREQUENCY_KHZ)),
    )
    .unwrap()
    .with_sda(board.sda)
    .with_scl(board.scl)
    .into_async();
    let mut light = Bh1750::new(i2c, Delay);

    let soil = AdcSoilProbe::new(board.adc1, board.soil_pin);

    let telemetry_config = TelemetryConfig::default();

    match setup(&mut link, &mut light, &telemetry_config).await {
        Ok(()) => info!("Setup complete"),
        Err(e) if e.is_fatal() => {
            // No retry of setup; the node stays idle until reset
            error!("Halting: {}", e);
            return;
        }
        Err(e) => warn!("Setup incomplete, sending anyway: {}", e),
    }

    let sender = TelemetrySender::new(link, soil, light, Delay, telemetry_config);
    spawner.spawn(telemetry_task(sender)).unwrap();
}

/// Task that logs ESP-NOW delivery notifications
#[embassy_executor::task]
async fn send_status_task(receiver: tasks::StatusReceiver) {
    tasks::send_status_task(receiver).await;
}

/// Task that reads the sensors and sends a record every cycle
#[embassy_executor::task]
async fn telemetry_task(sender: NodeSender) {
    tasks::telemetry_task(sender).await
}
