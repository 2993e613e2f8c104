// LED Demo Task - Schaltet alle LEDs über die LED-Steuerfläche durch
use defmt::{error, info};
use embassy_time::{Duration, Timer};
use led_gpio_core::{LedApi, LedError};

use crate::LedDevices;
use crate::config::{DEMO_BRIGHTNESS_STEPS, DEMO_PAUSE_SECS, DEMO_STEP_MILLIS};

/// Demo Logic - nutzt nur das LedApi Trait
///
/// Fährt für eine LED alle Helligkeits-Schritte ab und schaltet
/// sie danach aus.
///
/// # Trait-basierte Abstraktion
/// Der generische Parameter `L: LedApi` erlaubt jeden LED-Treiber,
/// nicht nur den GPIO-Treiber.
pub async fn led_demo_logic<L: LedApi>(led: &L, name: &str, index: usize) -> Result<(), LedError> {
    led.on(index)?;
    Timer::after(Duration::from_millis(DEMO_STEP_MILLIS)).await;

    for value in DEMO_BRIGHTNESS_STEPS {
        led.set_brightness(index, value)?;
        info!("{}[{}]: brightness {}", name, index, value);
        Timer::after(Duration::from_millis(DEMO_STEP_MILLIS)).await;
    }

    led.off(index)
}

/// LED Demo Task - Embassy Task für alle betriebsbereiten Instanzen
///
/// # Parameter
/// - `devices`: Geräte-Tabelle nach dem Start (nur erfolgreiche `init`)
#[embassy_executor::task]
pub async fn led_demo_task(devices: &'static LedDevices) {
    if devices.is_empty() {
        error!("No LED instance ready - demo stopped");
        return;
    }

    loop {
        for (name, device) in devices.iter() {
            for index in 0..device.num_leds() {
                if let Err(err) = led_demo_logic(device, name, index).await {
                    error!("{}[{}]: {} (errno {})", name, index, err, err.errno());
                }
            }
        }

        Timer::after(Duration::from_secs(DEMO_PAUSE_SECS)).await;
    }
}
