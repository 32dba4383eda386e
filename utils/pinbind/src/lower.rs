use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::{Device, Direction, LedMatrix, PinMap, SignalConfig};
use crate::error::{Error, Result};
use crate::ident::{NAMESPACES, is_header_name, is_identifier, is_type_name};
use crate::ir::{
    CAKEBOARD_HEADER, LED_DEVICE, REGISTRY_PARAM, RegistryStyle, SetupFunction, Statement, TOP_PARAM,
    config_var,
};

/// What to do with device types the generator has no binding code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownDevicePolicy {
    /// Emit nothing for the device and log a warning.
    #[default]
    Skip,
    /// Abort generation with [`Error::UnsupportedDevice`].
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub function_name: String,
    pub top_type: String,
    pub model_header: String,
    pub registry: RegistryStyle,
    pub unknown_devices: UnknownDevicePolicy,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            function_name: "bind_all_devices".to_owned(),
            top_type: "TOP_NAME".to_owned(),
            model_header: "Vtop.h".to_owned(),
            registry: RegistryStyle::default(),
            unknown_devices: UnknownDevicePolicy::default(),
        }
    }
}

impl GeneratorOptions {
    fn validate(&self) -> Result<()> {
        let checks: [(&'static str, &String, fn(&str) -> bool); 3] = [
            ("setup function name", &self.function_name, is_identifier),
            ("top-level model type", &self.top_type, is_type_name),
            ("model header", &self.model_header, is_header_name),
        ];
        for (option, value, is_valid) in checks {
            if !is_valid(value.as_str()) {
                return Err(Error::InvalidOption {
                    option,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Names already in scope inside the generated function body.
    fn reserved_names(&self) -> HashSet<String> {
        let mut names: HashSet<String> = NAMESPACES.iter().map(|&ns| ns.to_owned()).collect();
        names.insert(TOP_PARAM.to_owned());
        if self.registry == RegistryStyle::Parameter {
            names.insert(REGISTRY_PARAM.to_owned());
        }
        // `TOP_NAME` is usually a macro, which would rewrite a local of the same name.
        if is_identifier(&self.top_type) {
            names.insert(self.top_type.clone());
        }
        names
    }
}

pub fn lower(pin_map: &PinMap, options: &GeneratorOptions) -> Result<SetupFunction> {
    options.validate()?;
    if pin_map.is_empty() {
        debug!("pin map has no devices");
    }

    let mut names = options.reserved_names();
    let mut body = Vec::new();
    for (id, device) in pin_map.devices() {
        match device {
            Device::LedMatrix(led) => {
                claim(&mut names, id, id.to_owned())?;
                claim(&mut names, id, config_var(id))?;
                lower_led_matrix(id, led, &mut body);
            }
            Device::Unsupported { .. } => match options.unknown_devices {
                UnknownDevicePolicy::Skip => {
                    warn!(device = id, kind = device.kind(), "skipping device with unsupported type");
                }
                UnknownDevicePolicy::Deny => {
                    return Err(Error::UnsupportedDevice {
                        device: id.to_owned(),
                        kind: device.kind().to_owned(),
                    });
                }
            },
        }
    }

    Ok(SetupFunction {
        includes: vec![
            CAKEBOARD_HEADER.to_owned(),
            LED_DEVICE.header.to_owned(),
            options.model_header.clone(),
        ],
        name: options.function_name.clone(),
        top_type: options.top_type.clone(),
        registry: options.registry,
        body,
    })
}

/// Records a local declared for `device`, failing if the name is already taken.
fn claim(names: &mut HashSet<String>, device: &str, name: String) -> Result<()> {
    if names.contains(&name) {
        return Err(Error::NameClash {
            device: device.to_owned(),
            name,
        });
    }
    names.insert(name);
    Ok(())
}

fn lower_led_matrix(id: &str, led: &LedMatrix, body: &mut Vec<Statement>) {
    body.push(Statement::DeclareConfig {
        device: id.to_owned(),
        config_type: LED_DEVICE.config_type,
        rows: led.rows,
        cols: led.cols,
        signal_widths: vec![led.total_width()],
    });
    body.push(Statement::MakeShared {
        device: id.to_owned(),
        class: LED_DEVICE.class,
    });

    let before = body.len();
    for (name, signal) in led.signals.iter() {
        if signal.direction() != Direction::In {
            continue;
        }
        match signal {
            SignalConfig::Simple { port, width, .. } => {
                // Parsing guarantees a port on every input signal.
                let Some(port) = port else { continue };
                body.push(Statement::BindSignal {
                    device: id.to_owned(),
                    signal: name.to_owned(),
                    port: port.clone(),
                    width: u64::from(*width),
                    slice: None,
                });
            }
            SignalConfig::Composite { ports, .. } => {
                for (port, range) in ports.iter() {
                    body.push(Statement::BindSignal {
                        device: id.to_owned(),
                        signal: name.to_owned(),
                        port: port.to_owned(),
                        width: range.width(),
                        slice: Some(*range),
                    });
                }
            }
        }
    }
    debug!(device = id, bindings = body.len() - before, "lowered led matrix");

    body.push(Statement::AddDevice {
        device: id.to_owned(),
    });
}
