//! Generates the C++ routine that wires CakeBoard devices to the ports of a
//! Verilator model, from a JSON pin map.
//!
//! The pipeline is parse ([`PinMap`]) → lower ([`lower()`], producing a
//! [`SetupFunction`]) → render ([`cpp::render`]) → write.

mod code_writer;
mod config;
pub mod cpp;
mod error;
mod ident;
pub mod ir;
mod lower;
mod ordered_map;

use std::{fs::File, io::Write, path::Path};

use tracing::debug;

pub use config::{BitRange, Device, Direction, LED_MATRIX, LedMatrix, PinMap, SignalConfig};
pub use error::{Error, Result};
pub use ir::{RegistryStyle, SetupFunction, Statement};
pub use lower::{GeneratorOptions, UnknownDevicePolicy, lower};
pub use ordered_map::OrderedMap;

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub devices: usize,
    pub skipped: usize,
    pub bindings: usize,
}

/// Renders the setup function for `pin_map`.
pub fn generate(pin_map: &PinMap, options: &GeneratorOptions) -> Result<String> {
    let func = lower(pin_map, options)?;
    Ok(cpp::render(&func)?)
}

/// Reads the pin map at `input` and writes the generated source to `output`,
/// replacing any existing file.
///
/// Nothing is written unless the pin map parses and lowers cleanly.
pub fn generate_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &GeneratorOptions,
) -> Result<GenerationSummary> {
    let output = output.as_ref();
    let pin_map = PinMap::load(input)?;
    let func = lower(&pin_map, options)?;
    let source = cpp::render(&func)?;

    let write_err = |source| Error::Write {
        path: output.to_owned(),
        source,
    };
    let mut file = File::create(output).map_err(write_err)?;
    file.write_all(source.as_bytes()).map_err(write_err)?;
    debug!(path = %output.display(), bytes = source.len(), "wrote binding source");

    let devices = func.device_count();
    Ok(GenerationSummary {
        devices,
        skipped: pin_map.len() - devices,
        bindings: func.binding_count(),
    })
}
