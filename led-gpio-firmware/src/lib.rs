// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod devices;
pub mod hal;
pub mod tasks;

// Re-exports von led-gpio-core
pub use led_gpio_core::{GpioController, LedApi, LedError, LedGpio};

use led_gpio_core::DeviceTable;

use crate::config::{LED_INSTANCE_COUNT, LED_PIN_COUNT};
use crate::hal::EspGpioBank;

/// Legt einen Wert in einer StaticCell ab und gibt `&'static mut` zurück
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

// ============================================================================
// Type-Aliase
// ============================================================================
//
// Kapazitäten kommen aus der generierten LED-Tabelle.

/// GPIO-Bank mit genau den Pins aus der LED-Tabelle
pub type EspBank = EspGpioBank<LED_PIN_COUNT>;

/// Eine betriebsbereite LED-Instanz
pub type LedDevice = LedGpio<'static, EspBank>;

/// Alle betriebsbereiten LED-Instanzen, nach Namen
pub type LedDevices = DeviceTable<'static, EspBank, LED_INSTANCE_COUNT>;
