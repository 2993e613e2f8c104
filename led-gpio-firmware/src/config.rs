// Projekt-Konfiguration: Konstanten und generierte LED-Tabelle
#![allow(dead_code)]

// ============================================================================
// LED-Tabelle (generiert von build.rs)
// ============================================================================
//
// Quelle: LED_GPIO_TABLE aus .env oder der Umgebung, z.B.
//   LED_GPIO_TABLE="status=gpio0:8/active-low,gpio0:18;aux=gpio0:19/open-drain"
//
// Enthält LED_INSTANCES, LED_INSTANCE_COUNT, LED_TOTAL_COUNT,
// LED_PIN_COUNT und das Makro attach_led_pins!

include!(concat!(env!("OUT_DIR"), "/led_table.rs"));

/// Name der einzigen GPIO-Bank des ESP32-C6 in der LED-Tabelle
pub const GPIO_CONTROLLER: &str = "gpio0";

// ============================================================================
// Demo-Task Konfiguration
// ============================================================================

/// Helligkeits-Schritte pro LED (0-100)
/// 49 und 50 zeigen die Schaltschwelle
pub const DEMO_BRIGHTNESS_STEPS: [u8; 4] = [100, 49, 50, 0];

/// Wartezeit zwischen zwei Schritten in Millisekunden
pub const DEMO_STEP_MILLIS: u64 = 500;

/// Pause nach einem kompletten Durchlauf in Sekunden
pub const DEMO_PAUSE_SECS: u64 = 2;
