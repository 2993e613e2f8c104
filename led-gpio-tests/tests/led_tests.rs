//! Integration Tests für den LED-Treiber
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockGpioController

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use led_gpio_core::{
    DeviceTable, GpioController, GpioError, GpioFlags, GpioPin, LedApi, LedDescriptor, LedError,
    LedGpioConfig, PinMode, Polarity, RegistryError,
};

// ============================================================================
// Mock GPIO Controller
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioOp {
    Configure {
        pin: GpioPin,
        flags: GpioFlags,
        mode: PinMode,
    },
    Set {
        pin: GpioPin,
        active: bool,
    },
}

#[derive(Default)]
pub struct MockGpioController {
    pub not_ready: Cell<bool>,
    /// configure() auf diesem Pin schlägt fehl
    pub fail_configure_pin: Cell<Option<GpioPin>>,
    pub fail_next_set: Cell<bool>,
    ops: RefCell<Vec<GpioOp>>,
    levels: RefCell<HashMap<GpioPin, bool>>,
    active_low: RefCell<HashMap<GpioPin, bool>>,
}

impl MockGpioController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_ready() -> Self {
        let mock = Self::default();
        mock.not_ready.set(true);
        mock
    }

    pub fn ops(&self) -> Vec<GpioOp> {
        self.ops.borrow().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    /// Logischer Pegel (None = nie konfiguriert)
    pub fn level(&self, pin: GpioPin) -> Option<bool> {
        self.levels.borrow().get(&pin).copied()
    }

    /// Elektrischer Pegel nach Anwendung der Polarität
    pub fn physical_level(&self, pin: GpioPin) -> Option<bool> {
        let active_low = self.active_low.borrow().get(&pin).copied().unwrap_or(false);
        self.level(pin).map(|active| active != active_low)
    }
}

impl GpioController for MockGpioController {
    fn is_ready(&self) -> bool {
        !self.not_ready.get()
    }

    fn configure(&self, pin: GpioPin, flags: GpioFlags, mode: PinMode) -> Result<(), GpioError> {
        self.ops
            .borrow_mut()
            .push(GpioOp::Configure { pin, flags, mode });
        if self.fail_configure_pin.get() == Some(pin) {
            return Err(GpioError::Io);
        }

        self.active_low
            .borrow_mut()
            .insert(pin, flags.is_active_low());
        let level = match mode {
            PinMode::Input | PinMode::OutputInactive => false,
            PinMode::OutputActive => true,
        };
        self.levels.borrow_mut().insert(pin, level);
        Ok(())
    }

    fn set(&self, pin: GpioPin, active: bool) -> Result<(), GpioError> {
        if self.fail_next_set.replace(false) {
            return Err(GpioError::Io);
        }
        self.ops.borrow_mut().push(GpioOp::Set { pin, active });
        self.levels.borrow_mut().insert(pin, active);
        Ok(())
    }
}

fn descriptors<'a>(
    mock: &'a MockGpioController,
    pins: &[GpioPin],
) -> Vec<LedDescriptor<'a, MockGpioController>> {
    pins.iter()
        .map(|&pin| LedDescriptor::new(mock, pin, GpioFlags::new()))
        .collect()
}

// ============================================================================
// Tests: init()
// ============================================================================

#[test]
fn test_init_configures_all_pins_inactive() {
    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[4, 5, 6]);
    let config = LedGpioConfig::new("leds", &leds);

    let device = config.init().unwrap();

    assert_eq!(device.num_leds(), 3);
    assert_eq!(device.name(), "leds");
    assert_eq!(
        mock.ops(),
        vec![
            GpioOp::Configure {
                pin: 4,
                flags: GpioFlags::new(),
                mode: PinMode::OutputInactive
            },
            GpioOp::Configure {
                pin: 5,
                flags: GpioFlags::new(),
                mode: PinMode::OutputInactive
            },
            GpioOp::Configure {
                pin: 6,
                flags: GpioFlags::new(),
                mode: PinMode::OutputInactive
            },
        ]
    );
    for pin in [4, 5, 6] {
        assert_eq!(mock.level(pin), Some(false));
    }
}

#[test]
fn test_init_passes_stored_flags() {
    let mock = MockGpioController::new();
    let flags = GpioFlags::new().with_polarity(Polarity::ActiveLow);
    let leds = [LedDescriptor::new(&mock, 2, flags)];

    LedGpioConfig::new("leds", &leds).init().unwrap();

    assert_eq!(
        mock.ops(),
        vec![GpioOp::Configure {
            pin: 2,
            flags,
            mode: PinMode::OutputInactive
        }]
    );
    // Inaktiv bei Active-Low heißt: Pin elektrisch High
    assert_eq!(mock.physical_level(2), Some(true));
}

#[test]
fn test_init_without_leds_fails() {
    let leds: [LedDescriptor<'_, MockGpioController>; 0] = [];
    let config = LedGpioConfig::new("empty", &leds);

    assert_eq!(config.init().unwrap_err(), LedError::NoDevice);
}

#[test]
fn test_init_controller_not_ready() {
    let mock = MockGpioController::not_ready();
    let leds = descriptors(&mock, &[1]);

    let result = LedGpioConfig::new("leds", &leds).init();

    assert_eq!(result.unwrap_err(), LedError::NoDevice);
    assert!(mock.ops().is_empty());
}

#[test]
fn test_init_stops_at_first_configure_failure() {
    let mock = MockGpioController::new();
    mock.fail_configure_pin.set(Some(12));
    let leds = descriptors(&mock, &[10, 11, 12, 13, 14]);

    let result = LedGpioConfig::new("leds", &leds).init();

    assert_eq!(result.unwrap_err(), LedError::Config(GpioError::Io));
    let touched: Vec<GpioPin> = mock
        .ops()
        .iter()
        .map(|op| match op {
            GpioOp::Configure { pin, .. } => *pin,
            GpioOp::Set { pin, .. } => panic!("unexpected set on pin {pin}"),
        })
        .collect();
    assert_eq!(touched, vec![10, 11, 12]);
    assert_eq!(mock.level(10), Some(false));
    assert_eq!(mock.level(11), Some(false));
    assert_eq!(mock.level(12), None);
    assert_eq!(mock.level(13), None);
    assert_eq!(mock.level(14), None);
}

#[test]
fn test_init_second_controller_not_ready() {
    let ready = MockGpioController::new();
    let not_ready = MockGpioController::not_ready();
    let leds: [LedDescriptor<'_, dyn GpioController>; 3] = [
        LedDescriptor::<dyn GpioController>::new(&ready, 0, GpioFlags::new()),
        LedDescriptor::<dyn GpioController>::new(&not_ready, 1, GpioFlags::new()),
        LedDescriptor::<dyn GpioController>::new(&ready, 2, GpioFlags::new()),
    ];

    let result = LedGpioConfig::new("mixed", &leds).init();

    assert_eq!(result.unwrap_err(), LedError::NoDevice);
    assert_eq!(ready.level(0), Some(false));
    assert_eq!(ready.level(2), None);
    assert!(not_ready.ops().is_empty());
}

// ============================================================================
// Tests: set_brightness() / on() / off()
// ============================================================================

#[test]
fn test_set_brightness_threshold_on_every_led() {
    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[3, 7]);
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();

    for (index, pin) in [(0, 3), (1, 7)] {
        for value in 0..=100u8 {
            device.set_brightness(index, value).unwrap();
            assert_eq!(mock.level(pin), Some(value >= 50), "value {value}");
        }
    }
}

#[test]
fn test_set_brightness_value_too_high() {
    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[3]);
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();
    mock.clear_ops();

    assert_eq!(device.set_brightness(0, 101), Err(LedError::InvalidArgument));
    assert_eq!(device.set_brightness(0, 255), Err(LedError::InvalidArgument));
    assert!(mock.ops().is_empty());
    assert_eq!(mock.level(3), Some(false));
}

#[test]
fn test_set_brightness_index_out_of_range() {
    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[3, 4]);
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();
    mock.clear_ops();

    assert_eq!(device.set_brightness(2, 100), Err(LedError::InvalidArgument));
    assert_eq!(device.on(usize::MAX), Err(LedError::InvalidArgument));
    assert_eq!(device.off(2), Err(LedError::InvalidArgument));
    assert!(mock.ops().is_empty());
}

#[test]
fn test_on_off_match_set_brightness() {
    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[9]);
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();

    mock.clear_ops();
    device.on(0).unwrap();
    device.off(0).unwrap();
    let via_on_off = mock.ops();

    mock.clear_ops();
    device.set_brightness(0, 100).unwrap();
    device.set_brightness(0, 0).unwrap();

    assert_eq!(via_on_off, mock.ops());
    assert_eq!(
        via_on_off,
        vec![
            GpioOp::Set {
                pin: 9,
                active: true
            },
            GpioOp::Set {
                pin: 9,
                active: false
            },
        ]
    );
}

#[test]
fn test_on_active_low_drives_pin_low() {
    let mock = MockGpioController::new();
    let leds = [LedDescriptor::new(
        &mock,
        5,
        GpioFlags::new().with_polarity(Polarity::ActiveLow),
    )];
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();

    device.on(0).unwrap();
    assert_eq!(mock.level(5), Some(true));
    assert_eq!(mock.physical_level(5), Some(false));

    device.off(0).unwrap();
    assert_eq!(mock.physical_level(5), Some(true));
}

#[test]
fn test_set_failure_is_propagated() {
    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[1]);
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();

    mock.fail_next_set.set(true);
    assert_eq!(device.on(0), Err(LedError::Gpio(GpioError::Io)));

    // Nächster Aufruf geht wieder durch
    assert_eq!(device.on(0), Ok(()));
    assert_eq!(mock.level(1), Some(true));
}

#[test]
fn test_leds_are_independent() {
    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[1, 2, 3]);
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();

    device.on(1).unwrap();

    assert_eq!(mock.level(1), Some(false));
    assert_eq!(mock.level(2), Some(true));
    assert_eq!(mock.level(3), Some(false));
}

#[test]
fn test_led_api_is_usable_generically() {
    fn light_all<L: LedApi>(led: &L, count: usize) -> Result<(), LedError> {
        for index in 0..count {
            led.on(index)?;
        }
        Ok(())
    }

    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[6, 8]);
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();

    light_all(&device, device.num_leds()).unwrap();
    assert_eq!(mock.level(6), Some(true));
    assert_eq!(mock.level(8), Some(true));
    assert_eq!(light_all(&device, 3), Err(LedError::InvalidArgument));
}

#[test]
fn test_descriptor_lookup() {
    let mock = MockGpioController::new();
    let leds = descriptors(&mock, &[6, 8]);
    let device = LedGpioConfig::new("leds", &leds).init().unwrap();

    assert_eq!(device.descriptor(1).map(|led| led.pin), Some(8));
    assert!(device.descriptor(2).is_none());
}

// ============================================================================
// Tests: Fehlercodes
// ============================================================================

#[test]
fn test_errno_codes() {
    assert_eq!(LedError::InvalidArgument.errno(), -22);
    assert_eq!(LedError::NoDevice.errno(), -19);
    assert_eq!(LedError::Config(GpioError::Io).errno(), -5);
    assert_eq!(LedError::Gpio(GpioError::Busy).errno(), -16);
    assert_eq!(LedError::Config(GpioError::NotSupported).errno(), -134);
}

#[test]
fn test_error_display() {
    assert_eq!(
        LedError::Config(GpioError::InvalidPin).to_string(),
        "cannot configure GPIO: invalid pin"
    );
    assert_eq!(LedError::NoDevice.to_string(), "no LED device");
}

// ============================================================================
// Tests: DeviceTable
// ============================================================================

#[test]
fn test_device_table_skips_failed_instances() {
    let mock = MockGpioController::new();
    let not_ready = MockGpioController::not_ready();
    let good = descriptors(&mock, &[1, 2]);
    let stuck = descriptors(&not_ready, &[3]);
    let empty: Vec<LedDescriptor<'_, MockGpioController>> = Vec::new();
    let configs = [
        LedGpioConfig::new("status", &good),
        LedGpioConfig::new("empty", &empty),
        LedGpioConfig::new("stuck", &stuck),
    ];

    let mut table: DeviceTable<'_, MockGpioController, 4> = DeviceTable::new();
    assert_eq!(table.init_all(&configs), 1);

    assert_eq!(table.get("status").unwrap().num_leds(), 2);
    assert_eq!(table.get("empty").unwrap_err(), LedError::NoDevice);
    assert_eq!(table.get("stuck").unwrap_err(), LedError::NoDevice);
    assert_eq!(table.get("unknown").unwrap_err(), LedError::NoDevice);

    table.get("status").unwrap().on(1).unwrap();
    assert_eq!(mock.level(2), Some(true));
}

#[test]
fn test_device_table_register_errors() {
    let mock = MockGpioController::new();
    let first = descriptors(&mock, &[1]);
    let second = descriptors(&mock, &[2]);

    let mut table: DeviceTable<'_, MockGpioController, 1> = DeviceTable::new();
    table
        .register(&LedGpioConfig::new("first", &first))
        .unwrap();

    assert_eq!(
        table
            .register(&LedGpioConfig::new("first", &second))
            .unwrap_err(),
        RegistryError::Duplicate
    );
    assert_eq!(
        table
            .register(&LedGpioConfig::new("second", &second))
            .unwrap_err(),
        RegistryError::Full
    );
    // Volle Tabelle: Pin 2 wurde nie angefasst
    assert_eq!(mock.level(2), None);
}

#[test]
fn test_device_table_reports_init_error() {
    let mock = MockGpioController::new();
    mock.fail_configure_pin.set(Some(4));
    let leds = descriptors(&mock, &[4]);

    let mut table: DeviceTable<'_, MockGpioController, 2> = DeviceTable::default();
    assert_eq!(
        table.register(&LedGpioConfig::new("broken", &leds)).unwrap_err(),
        RegistryError::Init(LedError::Config(GpioError::Io))
    );
    assert!(table.is_empty());
}

#[test]
fn test_device_table_iter_in_order() {
    let mock = MockGpioController::new();
    let a = descriptors(&mock, &[1]);
    let b = descriptors(&mock, &[2]);
    let configs = [LedGpioConfig::new("a", &a), LedGpioConfig::new("b", &b)];

    let mut table: DeviceTable<'_, MockGpioController, 2> = DeviceTable::new();
    table.init_all(&configs);

    let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_device_table_duplicate_keeps_first_instance() {
    let mock = MockGpioController::new();
    let first = descriptors(&mock, &[1]);
    let second = descriptors(&mock, &[2, 3]);
    let configs = [
        LedGpioConfig::new("status", &first),
        LedGpioConfig::new("status", &second),
    ];

    let mut table: DeviceTable<'_, MockGpioController, 4> = DeviceTable::new();
    assert_eq!(table.init_all(&configs), 1);

    // Zweite Konfiguration wurde nie initialisiert
    assert_eq!(mock.level(2), None);
    assert_eq!(mock.level(3), None);

    let status = table.get("status").unwrap();
    assert_eq!(status.num_leds(), 1);
    status.on(0).unwrap();
    assert_eq!(mock.level(1), Some(true));
}
