// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use led_gpio_firmware::config::{LED_INSTANCES, LED_TABLE_SOURCE};
use led_gpio_firmware::devices::{DescriptorStorage, build_configs};
use led_gpio_firmware::tasks::led_demo_task;
use led_gpio_firmware::{EspBank, LedDevices, attach_led_pins, mk_static};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, GPIO-Bank und alle LED-Instanzen aus der
/// LED-Tabelle, startet dann den Demo-Task. Danach schläft main().
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!("LED table: {}", LED_TABLE_SOURCE);

    // GPIO-Bank: alle Pins aus der LED-Tabelle übernehmen
    // Bei Fehler bleibt die Bank unversiegelt → alle Instanzen melden NoDevice
    let bank: &'static EspBank = mk_static!(EspBank, EspBank::new());
    match attach_led_pins!(bank, peripherals) {
        Ok(()) => bank.seal(),
        Err(err) => error!("Cannot attach LED pins: {}", err),
    }

    // Deskriptoren und Konfigurationen aus der Tabelle aufbauen
    let storage = mk_static!(DescriptorStorage, DescriptorStorage::new());
    let configs = build_configs(bank, &LED_INSTANCES, storage);

    // Alle Instanzen initialisieren (Pins als inaktive Ausgänge)
    let devices = mk_static!(LedDevices, LedDevices::new());
    let ready = devices.init_all(&configs);
    info!("{} of {} LED instances ready", ready, LED_INSTANCES.len());
    let devices: &'static LedDevices = devices;

    // Spawn LED Demo Task
    spawner.spawn(led_demo_task(devices)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
