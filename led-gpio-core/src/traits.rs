//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zum GPIO-Subsystem
//! und die LED-Steuerfläche ohne konkrete Implementierung.

use core::fmt;

use crate::types::{GpioFlags, GpioPin, PinMode};

/// Fehler-Typ des GPIO-Controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Controller unterstützt die angeforderten Flags nicht
    NotSupported,
    /// Pin existiert auf diesem Controller nicht
    InvalidPin,
    /// Pin ist bereits vergeben
    Busy,
    /// Hardware-Zugriff fehlgeschlagen
    Io,
}

impl GpioError {
    /// Negativer errno-Code wie ihn das Host-Framework erwartet
    pub const fn errno(self) -> i32 {
        match self {
            GpioError::NotSupported => -134, // ENOTSUP
            GpioError::InvalidPin => -22,    // EINVAL
            GpioError::Busy => -16,          // EBUSY
            GpioError::Io => -5,             // EIO
        }
    }
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpioError::NotSupported => f.write_str("operation not supported"),
            GpioError::InvalidPin => f.write_str("invalid pin"),
            GpioError::Busy => f.write_str("pin busy"),
            GpioError::Io => f.write_str("I/O error"),
        }
    }
}

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// LED-Index außerhalb des Bereichs oder Helligkeit > 100
    InvalidArgument,
    /// Keine LEDs konfiguriert oder GPIO-Controller nicht bereit
    NoDevice,
    /// Pin-Konfiguration während `init` fehlgeschlagen
    Config(GpioError),
    /// Setzen des Pins fehlgeschlagen
    Gpio(GpioError),
}

impl LedError {
    /// Negativer errno-Code wie ihn das Host-Framework erwartet
    ///
    /// GPIO-Fehler werden mit ihrem eigenen Code durchgereicht.
    pub const fn errno(self) -> i32 {
        match self {
            LedError::InvalidArgument => -22, // EINVAL
            LedError::NoDevice => -19,        // ENODEV
            LedError::Config(err) | LedError::Gpio(err) => err.errno(),
        }
    }
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::InvalidArgument => f.write_str("invalid LED index or brightness"),
            LedError::NoDevice => f.write_str("no LED device"),
            LedError::Config(err) => write!(f, "cannot configure GPIO: {err}"),
            LedError::Gpio(err) => write!(f, "cannot set GPIO: {err}"),
        }
    }
}

/// Trait für den Zugriff auf eine GPIO-Bank
///
/// Alle Methoden nehmen `&self`: mehrere LED-Deskriptoren teilen sich
/// einen Controller, die Synchronisation liegt beim Controller selbst.
///
/// # Implementierungen
/// - **Production:** EspGpioBank (ESP32-C6 `Flex` Pins)
/// - **Testing:** MockGpioController (in-memory Mock)
pub trait GpioController {
    /// Meldet ob der Controller initialisiert und benutzbar ist
    fn is_ready(&self) -> bool;

    /// Konfiguriert einen Pin mit den gegebenen Flags
    ///
    /// Die Polarität aus `flags` gilt ab jetzt für `set`.
    fn configure(&self, pin: GpioPin, flags: GpioFlags, mode: PinMode) -> Result<(), GpioError>;

    /// Setzt den logischen Pegel eines Pins (`true` = aktiv)
    fn set(&self, pin: GpioPin, active: bool) -> Result<(), GpioError>;
}

/// LED-Steuerfläche des Geräts
///
/// `led` ist der 0-basierte LED-Index innerhalb einer Treiber-Instanz.
pub trait LedApi {
    /// Schaltet die LED ein
    fn on(&self, led: usize) -> Result<(), LedError>;

    /// Schaltet die LED aus
    fn off(&self, led: usize) -> Result<(), LedError>;

    /// Setzt die Helligkeit (0-100)
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::InvalidArgument` zurück bei ungültigem Index oder Wert > 100
    fn set_brightness(&self, led: usize, value: u8) -> Result<(), LedError>;
}
