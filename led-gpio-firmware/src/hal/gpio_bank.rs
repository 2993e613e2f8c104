// GPIO-Bank für den ESP32-C6
//
// Implementiert das GpioController Trait aus led-gpio-core über
// esp-hal `Flex` Pins. Der Treiber ruft nur `&self` Methoden auf,
// daher liegen die Pins hinter einer Critical Section.

use core::cell::RefCell;

use critical_section::Mutex;
use esp_hal::gpio::{DriveMode, Flex, InputConfig, Level, OutputConfig, Pull as HalPull};
use heapless::Vec;
use led_gpio_core::{Drive, GpioController, GpioError, GpioFlags, GpioPin, PinMode, Pull};

/// Ein von der Bank verwalteter Pin
struct PinSlot {
    number: GpioPin,
    pin: Flex<'static>,
    /// Aus den Flags beim letzten configure()
    active_low: bool,
}

struct BankState<const N: usize> {
    slots: Vec<PinSlot, N>,
    ready: bool,
}

/// GPIO-Bank mit bis zu `N` Pins
///
/// Ablauf beim Start:
/// 1. `attach()` für jeden Pin aus der LED-Tabelle
/// 2. `seal()` - ab jetzt meldet `is_ready()` true
///
/// Wird `seal()` nie aufgerufen (z.B. weil `attach()` fehlschlug),
/// scheitert `init` aller LED-Instanzen mit `NoDevice`.
pub struct EspGpioBank<const N: usize> {
    state: Mutex<RefCell<BankState<N>>>,
}

impl<const N: usize> EspGpioBank<N> {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(BankState {
                slots: Vec::new(),
                ready: false,
            })),
        }
    }

    /// Übernimmt einen Pin in die Bank
    ///
    /// # Fehlerbehandlung
    /// - `GpioError::Busy` wenn die Bank schon versiegelt oder die Nummer vergeben ist
    /// - `GpioError::NotSupported` wenn alle `N` Slots belegt sind
    pub fn attach(&self, number: GpioPin, pin: Flex<'static>) -> Result<(), GpioError> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.ready || state.slots.iter().any(|slot| slot.number == number) {
                return Err(GpioError::Busy);
            }
            state
                .slots
                .push(PinSlot {
                    number,
                    pin,
                    active_low: false,
                })
                .map_err(|_| GpioError::NotSupported)
        })
    }

    /// Markiert die Bank als betriebsbereit
    pub fn seal(&self) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).ready = true);
    }

    fn with_slot<R>(
        &self,
        number: GpioPin,
        f: impl FnOnce(&mut PinSlot) -> R,
    ) -> Result<R, GpioError> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            state
                .slots
                .iter_mut()
                .find(|slot| slot.number == number)
                .map(f)
                .ok_or(GpioError::InvalidPin)
        })
    }
}

impl<const N: usize> Default for EspGpioBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> GpioController for EspGpioBank<N> {
    fn is_ready(&self) -> bool {
        critical_section::with(|cs| self.state.borrow_ref(cs).ready)
    }

    fn configure(&self, pin: GpioPin, flags: GpioFlags, mode: PinMode) -> Result<(), GpioError> {
        // Open-Source kann der ESP32-C6 nicht
        let drive_mode = match flags.drive {
            Drive::PushPull => DriveMode::PushPull,
            Drive::OpenDrain => DriveMode::OpenDrain,
            Drive::OpenSource => return Err(GpioError::NotSupported),
        };
        let pull = match flags.pull {
            Pull::None => HalPull::None,
            Pull::Up => HalPull::Up,
            Pull::Down => HalPull::Down,
        };

        self.with_slot(pin, |slot| {
            slot.active_low = flags.is_active_low();
            match mode {
                PinMode::Input => {
                    slot.pin.set_output_enable(false);
                    slot.pin
                        .apply_input_config(&InputConfig::default().with_pull(pull));
                    slot.pin.set_input_enable(true);
                }
                PinMode::OutputInactive | PinMode::OutputActive => {
                    slot.pin.apply_output_config(
                        &OutputConfig::default()
                            .with_drive_mode(drive_mode)
                            .with_pull(pull),
                    );
                    // Pegel vor dem Output-Enable setzen, sonst kurzer Glitch
                    let active = mode == PinMode::OutputActive;
                    slot.pin.set_level(physical_level(active, slot.active_low));
                    slot.pin.set_output_enable(true);
                }
            }
        })
    }

    fn set(&self, pin: GpioPin, active: bool) -> Result<(), GpioError> {
        self.with_slot(pin, |slot| {
            slot.pin.set_level(physical_level(active, slot.active_low));
        })
    }
}

/// Logischer Pegel → elektrischer Pegel
fn physical_level(active: bool, active_low: bool) -> Level {
    Level::from(active != active_low)
}
