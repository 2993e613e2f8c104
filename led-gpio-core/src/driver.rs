//! LED-Treiber über GPIO
//!
//! Jede LED hängt an einem eigenen Pin. Ohne PWM wird die Helligkeit
//! auf an/aus reduziert (siehe `brightness_to_level`).

use crate::logic::{BRIGHTNESS_MAX, brightness_to_level};
use crate::traits::{GpioController, LedApi, LedError};
use crate::types::{LedDescriptor, LedGpioConfig, PinMode};

impl<'a, C: GpioController + ?Sized> LedGpioConfig<'a, C> {
    /// Initialisiert alle Pins der Instanz als inaktive Ausgänge
    ///
    /// Läuft die Deskriptoren in Listenreihenfolge ab und bricht beim ersten
    /// Fehler ab. Bereits konfigurierte Pins bleiben inaktiv konfiguriert,
    /// spätere werden nicht angefasst.
    ///
    /// # Fehlerbehandlung
    /// - `LedError::NoDevice` bei leerer Liste oder nicht bereitem Controller
    /// - `LedError::Config` wenn ein Pin nicht konfiguriert werden kann
    pub fn init(&self) -> Result<LedGpio<'a, C>, LedError> {
        if self.leds.is_empty() {
            error!("{}: no LEDs found (LED table entry is empty)", self.name);
            return Err(LedError::NoDevice);
        }

        for (index, led) in self.leds.iter().enumerate() {
            if !led.controller.is_ready() {
                error!("{}: GPIO device of LED {} not ready", self.name, index);
                return Err(LedError::NoDevice);
            }

            led.controller
                .configure(led.pin, led.flags, PinMode::OutputInactive)
                .map_err(|err| {
                    error!(
                        "{}: cannot configure GPIO {} of LED {} (err {})",
                        self.name,
                        led.pin,
                        index,
                        err.errno()
                    );
                    LedError::Config(err)
                })?;
        }

        info!("{}: {} LEDs ready", self.name, self.leds.len());
        Ok(LedGpio { config: *self })
    }
}

/// Initialisierte Treiber-Instanz
///
/// Existiert nur nach erfolgreichem `LedGpioConfig::init`. Schlägt `init`
/// fehl, gibt es kein Handle und damit keine Steuerung.
pub struct LedGpio<'a, C: ?Sized> {
    config: LedGpioConfig<'a, C>,
}

impl<'a, C: ?Sized> LedGpio<'a, C> {
    pub fn name(&self) -> &'a str {
        self.config.name
    }

    pub fn num_leds(&self) -> usize {
        self.config.num_leds()
    }

    pub fn descriptor(&self, led: usize) -> Option<&LedDescriptor<'a, C>> {
        self.config.leds.get(led)
    }

    pub fn config(&self) -> &LedGpioConfig<'a, C> {
        &self.config
    }
}

impl<C: GpioController + ?Sized> LedApi for LedGpio<'_, C> {
    fn on(&self, led: usize) -> Result<(), LedError> {
        self.set_brightness(led, BRIGHTNESS_MAX)
    }

    fn off(&self, led: usize) -> Result<(), LedError> {
        self.set_brightness(led, 0)
    }

    fn set_brightness(&self, led: usize, value: u8) -> Result<(), LedError> {
        let descriptor = self.config.leds.get(led).ok_or(LedError::InvalidArgument)?;
        let active = brightness_to_level(value).ok_or(LedError::InvalidArgument)?;

        descriptor
            .controller
            .set(descriptor.pin, active)
            .map_err(LedError::Gpio)
    }
}

impl<C: ?Sized> core::fmt::Debug for LedGpio<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LedGpio")
            .field("config", &self.config)
            .finish()
    }
}
