//! Core Types für den LED-Treiber
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;

/// Pin-Nummer auf einem GPIO-Controller
pub type GpioPin = u8;

/// Polarität eines Pins (aktiv = LED an)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

/// Pull-Widerstand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Pull {
    #[default]
    None,
    Up,
    Down,
}

/// Ausgangstreiber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Drive {
    #[default]
    PushPull,
    OpenDrain,
    OpenSource,
}

/// Pin-Flags aus der statischen Konfiguration
///
/// Getypte Felder statt Bitmaske.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpioFlags {
    pub polarity: Polarity,
    pub pull: Pull,
    pub drive: Drive,
}

impl GpioFlags {
    /// Active-High, kein Pull, Push-Pull
    pub const fn new() -> Self {
        Self {
            polarity: Polarity::ActiveHigh,
            pull: Pull::None,
            drive: Drive::PushPull,
        }
    }

    pub const fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub const fn with_pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    pub const fn with_drive(mut self, drive: Drive) -> Self {
        self.drive = drive;
        self
    }

    pub const fn is_active_low(&self) -> bool {
        matches!(self.polarity, Polarity::ActiveLow)
    }
}

/// Pin-Modus für `GpioController::configure`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    /// Ausgang, Startpegel inaktiv
    OutputInactive,
    /// Ausgang, Startpegel aktiv
    OutputActive,
}

/// LED-Deskriptor: Controller + Pin + Flags (eine LED)
pub struct LedDescriptor<'a, C: ?Sized> {
    pub controller: &'a C,
    pub pin: GpioPin,
    pub flags: GpioFlags,
}

impl<'a, C: ?Sized> LedDescriptor<'a, C> {
    pub const fn new(controller: &'a C, pin: GpioPin, flags: GpioFlags) -> Self {
        Self {
            controller,
            pin,
            flags,
        }
    }
}

// Manuell statt derive: derive würde `C: Clone` verlangen
impl<C: ?Sized> Clone for LedDescriptor<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for LedDescriptor<'_, C> {}

impl<C: ?Sized> fmt::Debug for LedDescriptor<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedDescriptor")
            .field("pin", &self.pin)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Treiber-Konfiguration einer Instanz
///
/// Unveränderlich. Die Deskriptor-Liste wird von allen Operationen
/// nur gelesen.
pub struct LedGpioConfig<'a, C: ?Sized> {
    pub name: &'a str,
    pub leds: &'a [LedDescriptor<'a, C>],
}

impl<'a, C: ?Sized> LedGpioConfig<'a, C> {
    pub const fn new(name: &'a str, leds: &'a [LedDescriptor<'a, C>]) -> Self {
        Self { name, leds }
    }

    pub const fn num_leds(&self) -> usize {
        self.leds.len()
    }
}

impl<C: ?Sized> Clone for LedGpioConfig<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for LedGpioConfig<'_, C> {}

impl<C: ?Sized> fmt::Debug for LedGpioConfig<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedGpioConfig")
            .field("name", &self.name)
            .field("leds", &self.leds)
            .finish()
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl<C: ?Sized> defmt::Format for LedDescriptor<'_, C> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "LedDescriptor {{ pin: {}, flags: {} }}",
            self.pin,
            self.flags
        )
    }
}

#[cfg(feature = "defmt")]
impl<C: ?Sized> defmt::Format for LedGpioConfig<'_, C> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "LedGpioConfig {{ name: {}, leds: {} }}",
            self.name,
            self.leds.len()
        )
    }
}
