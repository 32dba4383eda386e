//! Statement-level description of the generated setup function.
//!
//! Lowering decides *what* is emitted (which devices, which bindings, the
//! computed widths); the C++ renderer in [`crate::cpp`] decides how it looks.

use crate::config::BitRange;

/// How constructed devices reach the CakeBoard device registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryStyle {
    /// `cakeboard::CakeBoard::getInstance().addDevice(dev)`.
    #[default]
    Singleton,
    /// The setup function takes `cakeboard::CakeBoard& board` and calls `board.addDevice(dev)`.
    Parameter,
}

/// C++ names of a bindable device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceClass {
    pub config_type: &'static str,
    pub class: &'static str,
    pub header: &'static str,
}

pub const LED_DEVICE: DeviceClass = DeviceClass {
    config_type: "cakeboard::LedConfig",
    class: "cakeboard::LedDevice",
    header: "devices/led.h",
};

/// Header that declares `cakeboard::CakeBoard` and the device base class.
pub const CAKEBOARD_HEADER: &str = "cakeboard.h";

/// Parameter holding the Verilator model.
pub const TOP_PARAM: &str = "top";
/// Parameter holding the registry in [`RegistryStyle::Parameter`] functions.
pub const REGISTRY_PARAM: &str = "board";

/// Name of the local holding a device's configuration literal.
pub fn config_var(device: &str) -> String {
    format!("{device}_cfg")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `<config_type> <device>_cfg{ .rows, .cols, .signal_widths }`
    DeclareConfig {
        device: String,
        config_type: &'static str,
        rows: u32,
        cols: u32,
        signal_widths: Vec<u64>,
    },
    /// `auto <device> = std::make_shared<class>("<device>", <device>_cfg)`
    MakeShared { device: String, class: &'static str },
    /// `<device>->bindSignal("<signal>", &top-><port>, width[, low, high])`
    BindSignal {
        device: String,
        signal: String,
        port: String,
        width: u64,
        slice: Option<BitRange>,
    },
    AddDevice { device: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFunction {
    pub includes: Vec<String>,
    pub name: String,
    pub top_type: String,
    pub registry: RegistryStyle,
    pub body: Vec<Statement>,
}

impl SetupFunction {
    pub fn device_count(&self) -> usize {
        self.body
            .iter()
            .filter(|stmt| matches!(stmt, Statement::MakeShared { .. }))
            .count()
    }

    pub fn binding_count(&self) -> usize {
        self.body
            .iter()
            .filter(|stmt| matches!(stmt, Statement::BindSignal { .. }))
            .count()
    }
}
