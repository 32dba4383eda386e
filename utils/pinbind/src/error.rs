use std::path::PathBuf;

use thiserror::Error;

use crate::code_writer;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read pin map {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed pin map")]
    Parse(#[source] serde_json::Error),

    #[error("malformed entry for device `{device}`")]
    Device {
        device: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("signal `{signal}` of device `{device}` is missing `{field}`")]
    MissingField {
        device: String,
        signal: String,
        field: &'static str,
    },

    #[error(
        "signal `{signal}` of device `{device}` maps port `{port}` to [{high}, {low}], high bit is below low bit"
    )]
    InvalidBitRange {
        device: String,
        signal: String,
        port: String,
        high: u32,
        low: u32,
    },

    #[error("`{name}` (device `{device}`) is not a valid C++ identifier")]
    InvalidIdentifier { device: String, name: String },

    #[error("`{name}` (device `{device}`) clashes with another name in the generated function")]
    NameClash { device: String, name: String },

    #[error("invalid {option} `{value}`")]
    InvalidOption { option: &'static str, value: String },

    #[error("device `{device}` has unsupported type `{kind}`")]
    UnsupportedDevice { device: String, kind: String },

    #[error("failed to render generated source")]
    Render(#[from] code_writer::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
