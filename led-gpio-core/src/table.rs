//! Statische LED-Tabelle
//!
//! Beschreibt alle Treiber-Instanzen als Text, der zur Build-Zeit
//! ausgewertet wird (siehe `build.rs` der Firmware):
//!
//! ```text
//! status=gpio0:8/active-low,gpio0:9;aux=gpio0:10/open-drain/pull-up
//! ```
//!
//! - Instanzen sind durch `;` getrennt, LEDs einer Instanz durch `,`
//! - Eine LED ist `controller:pin`, gefolgt von optionalen `/flag`
//! - `name=` ohne LEDs ist erlaubt (die Instanz scheitert dann bei `init`)
//!
//! Der Parser allokiert nicht, alle Ergebnisse borgen aus dem Eingabetext.

use core::fmt;
use core::str::Split;

use crate::types::{Drive, GpioFlags, GpioPin, Polarity, Pull};

/// Tabelle wenn keine eigene konfiguriert ist: eine LED an GPIO8
pub const DEFAULT_LED_TABLE: &str = "leds=gpio0:8";

/// Fehler beim Parsen der LED-Tabelle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Instanz ohne `=`
    MissingEquals,
    /// Instanzname leer oder mit ungültigen Zeichen
    InvalidName,
    /// LED ohne `:` zwischen Controller und Pin
    MissingColon,
    /// Controllername leer oder mit ungültigen Zeichen
    InvalidController,
    /// Pin ist keine Zahl im Bereich 0-255
    InvalidPin,
    /// Flag nicht in der Liste der bekannten Flags
    UnknownFlag,
    /// Widersprüchliche Flags, z.B. `active-high` und `active-low`
    ConflictingFlags,
    /// Instanzname kommt mehrfach vor
    DuplicateName,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TableError::MissingEquals => "expected `name=` before the LED list",
            TableError::InvalidName => "invalid instance name",
            TableError::MissingColon => "expected `controller:pin`",
            TableError::InvalidController => "invalid controller name",
            TableError::InvalidPin => "pin must be an integer between 0 and 255",
            TableError::UnknownFlag => "unknown flag",
            TableError::ConflictingFlags => "conflicting flags",
            TableError::DuplicateName => "duplicate instance name",
        };
        f.write_str(msg)
    }
}

/// Eine LED aus der Tabelle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedSpec<'t> {
    pub controller: &'t str,
    pub pin: GpioPin,
    pub flags: GpioFlags,
}

/// Eine Treiber-Instanz in statischer Form (generierter Code)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LedInstance<'t> {
    pub name: &'t str,
    pub leds: &'t [LedSpec<'t>],
}

/// Eine Instanz wie sie im Tabellentext steht
///
/// Die LEDs werden erst beim Iterieren über `leds()` geparst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceSpec<'t> {
    name: &'t str,
    body: &'t str,
}

impl<'t> InstanceSpec<'t> {
    pub fn name(&self) -> &'t str {
        self.name
    }

    pub fn leds(&self) -> LedSpecs<'t> {
        LedSpecs {
            items: self.body.split(','),
        }
    }
}

/// Iterator über die Instanzen einer Tabelle
pub struct Entries<'t> {
    segments: Split<'t, char>,
}

impl<'t> Iterator for Entries<'t> {
    type Item = Result<InstanceSpec<'t>, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let segment = self.segments.next()?.trim();
            if !segment.is_empty() {
                return Some(parse_entry(segment));
            }
        }
    }
}

/// Iterator über die LEDs einer Instanz
pub struct LedSpecs<'t> {
    items: Split<'t, char>,
}

impl<'t> Iterator for LedSpecs<'t> {
    type Item = Result<LedSpec<'t>, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.items.next()?.trim();
            if !item.is_empty() {
                return Some(parse_led(item));
            }
        }
    }
}

/// Zerlegt eine LED-Tabelle in Instanzen
///
/// # Beispiele
///
/// ```
/// # use led_gpio_core::{parse_table, Polarity};
/// let mut entries = parse_table("status=gpio0:8/active-low");
/// let entry = entries.next().unwrap().unwrap();
/// assert_eq!(entry.name(), "status");
///
/// let led = entry.leds().next().unwrap().unwrap();
/// assert_eq!(led.pin, 8);
/// assert_eq!(led.flags.polarity, Polarity::ActiveLow);
/// ```
pub fn parse_table(src: &str) -> Entries<'_> {
    Entries {
        segments: src.split(';'),
    }
}

/// Prüft die komplette Tabelle und liefert die Anzahl der Instanzen
///
/// Anders als `parse_table` werden auch alle LEDs geparst und doppelte
/// Instanznamen erkannt.
pub fn validate_table(src: &str) -> Result<usize, TableError> {
    let mut count = 0;
    for (index, entry) in parse_table(src).enumerate() {
        let entry = entry?;
        for led in entry.leds() {
            led?;
        }

        let duplicate = parse_table(src)
            .take(index)
            .any(|prev| matches!(prev, Ok(prev) if prev.name == entry.name));
        if duplicate {
            return Err(TableError::DuplicateName);
        }
        count += 1;
    }
    Ok(count)
}

/// Parst eine einzelne LED (`controller:pin/flag/flag`)
pub fn parse_led(src: &str) -> Result<LedSpec<'_>, TableError> {
    let mut parts = src.split('/').map(str::trim);
    let target = parts.next().unwrap_or_default();

    let (controller, pin) = target.split_once(':').ok_or(TableError::MissingColon)?;
    let controller = controller.trim();
    if !is_valid_name(controller) {
        return Err(TableError::InvalidController);
    }
    let pin = pin
        .trim()
        .parse::<GpioPin>()
        .map_err(|_| TableError::InvalidPin)?;

    Ok(LedSpec {
        controller,
        pin,
        flags: parse_flags(parts)?,
    })
}

fn parse_entry(segment: &str) -> Result<InstanceSpec<'_>, TableError> {
    let (name, body) = segment.split_once('=').ok_or(TableError::MissingEquals)?;
    let name = name.trim();
    if !is_valid_name(name) {
        return Err(TableError::InvalidName);
    }
    Ok(InstanceSpec {
        name,
        body: body.trim(),
    })
}

fn parse_flags<'t>(words: impl Iterator<Item = &'t str>) -> Result<GpioFlags, TableError> {
    let mut polarity = None;
    let mut pull = None;
    let mut drive = None;

    for word in words {
        match word {
            "active-high" => set_once(&mut polarity, Polarity::ActiveHigh)?,
            "active-low" => set_once(&mut polarity, Polarity::ActiveLow)?,
            "pull-up" => set_once(&mut pull, Pull::Up)?,
            "pull-down" => set_once(&mut pull, Pull::Down)?,
            "push-pull" => set_once(&mut drive, Drive::PushPull)?,
            "open-drain" => set_once(&mut drive, Drive::OpenDrain)?,
            "open-source" => set_once(&mut drive, Drive::OpenSource)?,
            _ => return Err(TableError::UnknownFlag),
        }
    }

    Ok(GpioFlags {
        polarity: polarity.unwrap_or_default(),
        pull: pull.unwrap_or_default(),
        drive: drive.unwrap_or_default(),
    })
}

// Gleiches Flag doppelt ist ok, ein anderer Wert derselben Gruppe nicht
fn set_once<T: PartialEq>(slot: &mut Option<T>, value: T) -> Result<(), TableError> {
    match slot {
        Some(prev) if *prev != value => Err(TableError::ConflictingFlags),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
