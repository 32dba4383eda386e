use std::{fs, path::Path, str::FromStr};

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::{Error, Result};
use crate::ident::is_identifier;
use crate::ordered_map::OrderedMap;

/// Type tag of the LED matrix device, the only device the generator binds.
pub const LED_MATRIX: &str = "led_matrix";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// Inclusive `[high:low]` slice of a model port. Always satisfies `high >= low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    high: u32,
    low: u32,
}

impl BitRange {
    pub fn new(high: u32, low: u32) -> Option<Self> {
        (high >= low).then_some(Self { high, low })
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn width(&self) -> u64 {
        u64::from(self.high - self.low) + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalConfig {
    /// Whole-port binding (`verilog_signal` + `width`). Output signals are never
    /// bound, so they may leave the port out.
    Simple {
        direction: Direction,
        port: Option<String>,
        width: u32,
    },
    /// Bit-sliced binding across one or more ports (`verilog_signals`).
    Composite {
        direction: Direction,
        ports: OrderedMap<BitRange>,
    },
}

impl SignalConfig {
    pub fn direction(&self) -> Direction {
        match self {
            SignalConfig::Simple { direction, .. } | SignalConfig::Composite { direction, .. } => {
                *direction
            }
        }
    }

    pub fn width(&self) -> u64 {
        match self {
            SignalConfig::Simple { width, .. } => u64::from(*width),
            SignalConfig::Composite { ports, .. } => ports.values().map(BitRange::width).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedMatrix {
    pub rows: u32,
    pub cols: u32,
    pub signals: OrderedMap<SignalConfig>,
}

impl LedMatrix {
    /// Sum of the widths of every signal, whatever its direction.
    pub fn total_width(&self) -> u64 {
        self.signals.values().map(SignalConfig::width).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Device {
    LedMatrix(LedMatrix),
    /// A device type the generator has no binding code for. Only its tag is kept.
    Unsupported { kind: String },
}

impl Device {
    pub fn kind(&self) -> &str {
        match self {
            Device::LedMatrix(_) => LED_MATRIX,
            Device::Unsupported { kind } => kind.as_str(),
        }
    }
}

/// Device identifier to device, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PinMap {
    devices: OrderedMap<Device>,
}

impl PinMap {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: OrderedMap<Box<RawValue>> = serde_json::from_str(json).map_err(Error::Parse)?;
        let devices = raw.try_map(|id, entry| parse_device(id, entry.get()))?;
        Ok(PinMap { devices })
    }

    pub fn devices(&self) -> impl Iterator<Item = (&str, &Device)> {
        self.devices.iter()
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl FromStr for PinMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

#[derive(Deserialize)]
struct DeviceHeader {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct RawLedMatrix {
    rows: u32,
    cols: u32,
    signals: OrderedMap<RawSignal>,
}

#[derive(Deserialize)]
struct RawSignal {
    direction: Option<Direction>,
    verilog_signal: Option<String>,
    width: Option<u32>,
    verilog_signals: Option<OrderedMap<(u32, u32)>>,
}

fn parse_device(id: &str, json: &str) -> Result<Device> {
    let malformed = |source| Error::Device {
        device: id.to_owned(),
        source,
    };

    let header: DeviceHeader = serde_json::from_str(json).map_err(malformed)?;
    if header.kind != LED_MATRIX {
        // Everything past the tag is left unread for devices we cannot bind.
        return Ok(Device::Unsupported { kind: header.kind });
    }

    let raw: RawLedMatrix = serde_json::from_str(json).map_err(malformed)?;
    check_identifier(id, id)?;
    let signals = raw
        .signals
        .try_map(|name, signal| resolve_signal(id, name, signal))?;

    Ok(Device::LedMatrix(LedMatrix {
        rows: raw.rows,
        cols: raw.cols,
        signals,
    }))
}

fn resolve_signal(device: &str, name: &str, raw: RawSignal) -> Result<SignalConfig> {
    let missing = |field| Error::MissingField {
        device: device.to_owned(),
        signal: name.to_owned(),
        field,
    };

    let direction = raw.direction.ok_or_else(|| missing("direction"))?;

    if let Some(ports) = raw.verilog_signals {
        let ports = ports.try_map(|port, (high, low)| {
            check_identifier(device, port)?;
            BitRange::new(high, low).ok_or_else(|| Error::InvalidBitRange {
                device: device.to_owned(),
                signal: name.to_owned(),
                port: port.to_owned(),
                high,
                low,
            })
        })?;
        return Ok(SignalConfig::Composite { direction, ports });
    }

    let port = match direction {
        Direction::In => {
            let port = raw.verilog_signal.ok_or_else(|| missing("verilog_signal"))?;
            check_identifier(device, &port)?;
            Some(port)
        }
        Direction::Out => raw.verilog_signal,
    };
    let width = raw.width.ok_or_else(|| missing("width"))?;

    Ok(SignalConfig::Simple {
        direction,
        port,
        width,
    })
}

fn check_identifier(device: &str, name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            device: device.to_owned(),
            name: name.to_owned(),
        })
    }
}
