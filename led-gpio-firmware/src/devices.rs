// LED-Geräte aus der generierten Tabelle aufbauen
//
// Die Tabelle kennt Controller nur als Namen. Hier werden daraus
// Deskriptoren mit Referenz auf die GPIO-Bank.

use defmt::error;
use heapless::Vec;
use led_gpio_core::{LedDescriptor, LedGpioConfig, LedInstance};

use crate::EspBank;
use crate::config::{GPIO_CONTROLLER, LED_INSTANCE_COUNT, LED_TOTAL_COUNT};

/// Speicher für alle Deskriptoren aller Instanzen
pub type DescriptorStorage = Vec<LedDescriptor<'static, EspBank>, LED_TOTAL_COUNT>;

/// Konfigurationen aller Instanzen (in Tabellenreihenfolge)
pub type LedConfigs = Vec<LedGpioConfig<'static, EspBank>, LED_INSTANCE_COUNT>;

/// Erzeugt die Treiber-Konfigurationen
///
/// Die Deskriptoren landen hintereinander in `storage`, jede Instanz
/// bekommt ihren Ausschnitt. Instanzen mit unbekanntem Controller werden
/// übersprungen (sie sind danach nicht in der Geräte-Tabelle).
pub fn build_configs(
    bank: &'static EspBank,
    instances: &'static [LedInstance<'static>],
    storage: &'static mut DescriptorStorage,
) -> LedConfigs {
    let mut ranges: Vec<(&'static str, usize, usize), LED_INSTANCE_COUNT> = Vec::new();

    for instance in instances {
        if let Some(led) = instance
            .leds
            .iter()
            .find(|led| led.controller != GPIO_CONTROLLER)
        {
            error!(
                "{}: unknown GPIO controller {}",
                instance.name, led.controller
            );
            continue;
        }
        if storage.capacity() - storage.len() < instance.leds.len() {
            error!("{}: descriptor storage full", instance.name);
            continue;
        }

        let start = storage.len();
        storage.extend(
            instance
                .leds
                .iter()
                .map(|led| LedDescriptor::new(bank, led.pin, led.flags)),
        );
        if ranges.push((instance.name, start, storage.len())).is_err() {
            error!("{}: too many LED instances", instance.name);
            break;
        }
    }

    // Ab hier nur noch lesend
    let storage: &'static DescriptorStorage = storage;
    ranges
        .iter()
        .map(|&(name, start, end)| LedGpioConfig::new(name, &storage[start..end]))
        .collect()
}
