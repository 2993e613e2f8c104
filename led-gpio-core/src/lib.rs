//! LED GPIO Core - Platform-agnostic LED-Treiber über GPIO-Pins
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Der GPIO-Zugriff läuft über das `GpioController` Trait,
//! die Hardware-Implementierung liefert die Firmware.

#![no_std]

// Logging-Makros zuerst, damit alle Module sie sehen
#[macro_use]
mod fmt;

pub mod driver;
pub mod logic;
pub mod registry;
pub mod table;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use driver::LedGpio;
pub use logic::{BRIGHTNESS_MAX, BRIGHTNESS_ON_THRESHOLD, brightness_to_level};
pub use registry::{DeviceTable, RegistryError};
pub use table::{
    DEFAULT_LED_TABLE, InstanceSpec, LedInstance, LedSpec, TableError, parse_table, validate_table,
};
pub use traits::{GpioController, GpioError, LedApi, LedError};
pub use types::{Drive, GpioFlags, GpioPin, LedDescriptor, LedGpioConfig, PinMode, Polarity, Pull};
