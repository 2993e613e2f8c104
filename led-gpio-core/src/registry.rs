//! Geräte-Tabelle: Instanzname → initialisierter Treiber
//!
//! Beim Start wird jede Konfiguration aus der LED-Tabelle einmal
//! initialisiert. Nur erfolgreich initialisierte Instanzen landen in der
//! Tabelle, fehlgeschlagene sind danach nicht mehr erreichbar.

use core::fmt;

use heapless::LinearMap;

use crate::driver::LedGpio;
use crate::traits::{GpioController, LedError};
use crate::types::LedGpioConfig;

/// Fehler beim Registrieren einer Instanz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Instanzname ist bereits registriert
    Duplicate,
    /// Tabelle ist voll
    Full,
    /// `init` der Instanz fehlgeschlagen
    Init(LedError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Duplicate => f.write_str("duplicate LED instance"),
            RegistryError::Full => f.write_str("device table full"),
            RegistryError::Init(err) => write!(f, "init failed: {err}"),
        }
    }
}

/// Tabelle der betriebsbereiten LED-Instanzen (max. `N`)
pub struct DeviceTable<'a, C: ?Sized, const N: usize> {
    devices: LinearMap<&'a str, LedGpio<'a, C>, N>,
}

impl<'a, C: ?Sized, const N: usize> DeviceTable<'a, C, N> {
    pub const fn new() -> Self {
        Self {
            devices: LinearMap::new(),
        }
    }

    /// Sucht eine Instanz nach Namen
    ///
    /// # Fehlerbehandlung
    /// `LedError::NoDevice` wenn die Instanz unbekannt ist oder ihr `init`
    /// fehlgeschlagen ist
    pub fn get(&self, name: &str) -> Result<&LedGpio<'a, C>, LedError> {
        self.devices.get(name).ok_or(LedError::NoDevice)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Alle betriebsbereiten Instanzen in Registrierungsreihenfolge
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &LedGpio<'a, C>)> {
        self.devices.iter().map(|(name, device)| (*name, device))
    }
}

impl<'a, C: GpioController + ?Sized, const N: usize> DeviceTable<'a, C, N> {
    /// Initialisiert eine Instanz und nimmt sie bei Erfolg auf
    pub fn register(
        &mut self,
        config: &LedGpioConfig<'a, C>,
    ) -> Result<&LedGpio<'a, C>, RegistryError> {
        if self.devices.contains_key(&config.name) {
            return Err(RegistryError::Duplicate);
        }
        if self.devices.len() == N {
            return Err(RegistryError::Full);
        }

        let device = config.init().map_err(RegistryError::Init)?;
        self.devices
            .insert(config.name, device)
            .map_err(|_| RegistryError::Full)?;
        self.get(config.name).map_err(RegistryError::Init)
    }

    /// Initialisiert alle Konfigurationen in Listenreihenfolge
    ///
    /// Fehlgeschlagene Instanzen werden geloggt und übersprungen.
    /// Gibt die Anzahl der betriebsbereiten Instanzen zurück.
    pub fn init_all(&mut self, configs: &[LedGpioConfig<'a, C>]) -> usize {
        for config in configs {
            if let Err(err) = self.register(config) {
                error!("{}: LED instance unusable: {}", config.name, err);
            }
        }
        self.devices.len()
    }
}

impl<C: ?Sized, const N: usize> Default for DeviceTable<'_, C, N> {
    fn default() -> Self {
        Self::new()
    }
}
