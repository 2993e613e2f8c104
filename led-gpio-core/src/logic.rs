//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

/// Maximale Helligkeit (Prozent)
pub const BRIGHTNESS_MAX: u8 = 100;

/// Ab diesem Wert ist die LED an
pub const BRIGHTNESS_ON_THRESHOLD: u8 = 50;

/// Bildet eine Helligkeit (0-100) auf einen Pin-Pegel ab
///
/// GPIO kann kein PWM: Werte ab 50 schalten die LED ein, darunter aus.
/// Gibt `None` zurück für Werte über 100.
///
/// # Beispiele
///
/// ```
/// # use led_gpio_core::brightness_to_level;
/// assert_eq!(brightness_to_level(100), Some(true));
/// assert_eq!(brightness_to_level(49), Some(false));
/// assert_eq!(brightness_to_level(101), None);
/// ```
pub fn brightness_to_level(value: u8) -> Option<bool> {
    if value > BRIGHTNESS_MAX {
        return None;
    }
    Some(value >= BRIGHTNESS_ON_THRESHOLD)
}
