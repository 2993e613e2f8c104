// Build-Script: Wird vor dem Kompilieren ausgeführt
// Erzeugt die LED-Tabelle und konfiguriert den Linker für ESP32-C6 Embedded Rust

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use led_gpio_core::{DEFAULT_LED_TABLE, GpioFlags, parse_table, validate_table};

/// Der ESP32-C6 hat genau eine GPIO-Bank
const GPIO_CONTROLLER: &str = "gpio0";

/// GPIO24-30 hängen am SPI-Flash und sind tabu
const MAX_USER_GPIO: u8 = 23;

fn main() {
    // Lade .env file für die LED-Tabelle
    // Fehler ignorieren wenn .env nicht existiert (dann gilt ENV oder Default)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   Nutze LED_GPIO_TABLE aus der Umgebung oder `{DEFAULT_LED_TABLE}`");
    }

    // LED-Tabelle prüfen und als Rust-Code in OUT_DIR schreiben
    generate_led_table();

    // Registriere hilfsbereiten Error-Handler für Linker-Fehler
    linker_be_nice();

    // Füge Linker-Skripte hinzu:

    // 1. defmt.x - defmt Logging-Support
    //    Definiert Symbole für defmt's binäres Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // 2. linkall.x - ESP32 Memory-Layout
    //    WICHTIG: Muss als LETZTES kommen (sonst Probleme mit flip-link)
    //    Definiert Flash/RAM-Layout und Startup-Code
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Erzeugt $OUT_DIR/led_table.rs:
// - LED_INSTANCES: alle Instanzen mit ihren LEDs
// - LED_*_COUNT: Kapazitäten für die statischen Puffer
// - attach_led_pins!: bewegt die benutzten GPIOn-Peripherals in die Bank
fn generate_led_table() {
    println!("cargo:rerun-if-env-changed=LED_GPIO_TABLE");

    let table = env::var("LED_GPIO_TABLE").unwrap_or_else(|_| DEFAULT_LED_TABLE.to_string());
    if let Err(err) = validate_table(&table) {
        panic!("LED_GPIO_TABLE ungültig: {err} (`{table}`)");
    }

    let mut instances = String::new();
    let mut pins: Vec<u8> = Vec::new();
    let mut instance_count = 0;
    let mut led_count = 0;

    for entry in parse_table(&table) {
        let entry = entry.expect("table already validated");

        let mut leds = String::new();
        for led in entry.leds() {
            let led = led.expect("table already validated");
            if led.controller != GPIO_CONTROLLER {
                panic!(
                    "LED_GPIO_TABLE: unbekannter GPIO-Controller `{}` in `{}` (nur `{GPIO_CONTROLLER}`)",
                    led.controller,
                    entry.name()
                );
            }
            if led.pin > MAX_USER_GPIO {
                panic!(
                    "LED_GPIO_TABLE: GPIO{} in `{}` ist nicht verfügbar (max. GPIO{MAX_USER_GPIO})",
                    led.pin,
                    entry.name()
                );
            }
            if !pins.contains(&led.pin) {
                pins.push(led.pin);
            }

            writeln!(
                leds,
                "            led_gpio_core::LedSpec {{ controller: {:?}, pin: {}, flags: {} }},",
                led.controller,
                led.pin,
                flags_expr(led.flags)
            )
            .unwrap();
            led_count += 1;
        }

        writeln!(
            instances,
            "    led_gpio_core::LedInstance {{\n        name: {:?},\n        leds: &[\n{leds}        ],\n    }},",
            entry.name()
        )
        .unwrap();
        instance_count += 1;
    }

    let mut attach = String::new();
    for pin in &pins {
        writeln!(
            attach,
            "        if result.is_ok() {{\n            result = $bank.attach({pin}, esp_hal::gpio::Flex::new($p.GPIO{pin}));\n        }}"
        )
        .unwrap();
    }

    let code = format!(
        "// Generiert von build.rs - nicht von Hand ändern!\n\
         \n\
         /// LED-Tabelle aus der dieser Code erzeugt wurde\n\
         pub const LED_TABLE_SOURCE: &str = {table:?};\n\
         \n\
         pub const LED_INSTANCE_COUNT: usize = {instance_count};\n\
         pub const LED_TOTAL_COUNT: usize = {led_count};\n\
         pub const LED_PIN_COUNT: usize = {pin_count};\n\
         \n\
         pub static LED_INSTANCES: [led_gpio_core::LedInstance<'static>; {instance_count}] = [\n\
         {instances}];\n\
         \n\
         /// Übergibt alle benutzten GPIO-Peripherals an die GPIO-Bank\n\
         #[macro_export]\n\
         macro_rules! attach_led_pins {{\n\
         \x20   ($bank:expr, $p:ident) => {{{{\n\
         \x20       #[allow(unused_mut)]\n\
         \x20       let mut result: Result<(), led_gpio_core::GpioError> = Ok(());\n\
         {attach}\
         \x20       result\n\
         \x20   }}}};\n\
         }}\n",
        pin_count = pins.len(),
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    fs::write(out_dir.join("led_table.rs"), code).expect("cannot write led_table.rs");
}

fn flags_expr(flags: GpioFlags) -> String {
    format!(
        "led_gpio_core::GpioFlags {{ polarity: led_gpio_core::Polarity::{:?}, pull: led_gpio_core::Pull::{:?}, drive: led_gpio_core::Drive::{:?} }}",
        flags.polarity, flags.pull, flags.drive
    )
}

// Error-Handler: Zeigt hilfreiche Tipps bei Linker-Fehlern
// Wird vom Linker als "--error-handling-script" aufgerufen
fn linker_be_nice() {
    let args: Vec<String> = std::env::args().collect();

    // Wenn vom Linker aufgerufen (mit Error-Typ und Symbol-Name)
    if args.len() > 2 {
        let kind = &args[1]; // Fehler-Typ (z.B. "undefined-symbol")
        let what = &args[2]; // Symbol-Name (z.B. "_defmt_...")

        match kind.as_str() {
            // Undefiniertes Symbol gefunden
            "undefined-symbol" => match what.as_str() {
                what if what.starts_with("_defmt_") => {
                    eprintln!();
                    eprintln!(
                        "💡 `defmt` not found - make sure `defmt.x` is added as a linker script and you have included `use esp_println as _;`"
                    );
                    eprintln!();
                }
                "_stack_start" => {
                    eprintln!();
                    eprintln!("💡 Is the linker script `linkall.x` missing?");
                    eprintln!();
                }
                what if what.starts_with("esp_rtos_") => {
                    eprintln!();
                    eprintln!(
                        "💡 `esp-rtos` is not started. Make sure `esp_rtos::start` runs before spawning tasks."
                    );
                    eprintln!();
                }
                _ => (),
            },
            // we don't have anything helpful for "missing-lib" yet
            _ => {
                std::process::exit(1);
            }
        }

        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg=--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
