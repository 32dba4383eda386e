use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use pinbind::{GeneratorOptions, RegistryStyle, UnknownDevicePolicy};
use tracing::info;

#[derive(Parser)]
#[command(name = "pin-bind-gen")]
#[command(about = "Generate CakeBoard device binding code from a pin map")]
#[command(version)]
struct Args {
    /// Pin map describing devices and their signals (JSON)
    #[arg(value_name = "PIN_MAP")]
    input: Utf8PathBuf,

    /// C++ source file to write
    #[arg(value_name = "OUTPUT")]
    output: Utf8PathBuf,

    /// Name of the generated setup function
    #[arg(long, default_value = "bind_all_devices")]
    function: String,

    /// Type of the Verilator top-level model
    #[arg(long, default_value = "TOP_NAME")]
    top_type: String,

    /// Header declaring the Verilator top-level model
    #[arg(long, default_value = "Vtop.h")]
    model_header: String,

    /// How devices are registered with the board
    #[arg(long, value_enum, default_value_t = Registry::Singleton)]
    registry: Registry,

    /// Fail on device types without binding support instead of skipping them
    #[arg(long)]
    deny_unknown: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Registry {
    /// Register through `CakeBoard::getInstance()`
    Singleton,
    /// Take the board as a second parameter of the setup function
    Parameter,
}

impl From<Registry> for RegistryStyle {
    fn from(registry: Registry) -> Self {
        match registry {
            Registry::Singleton => RegistryStyle::Singleton,
            Registry::Parameter => RegistryStyle::Parameter,
        }
    }
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Usage errors exit with 1; --help and --version are not errors.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let options = GeneratorOptions {
        function_name: args.function,
        top_type: args.top_type,
        model_header: args.model_header,
        registry: args.registry.into(),
        unknown_devices: if args.deny_unknown {
            UnknownDevicePolicy::Deny
        } else {
            UnknownDevicePolicy::Skip
        },
    };

    let summary = pinbind::generate_file(&args.input, &args.output, &options)
        .with_context(|| format!("Failed to generate {} from {}", args.output, args.input))?;

    info!(
        devices = summary.devices,
        skipped = summary.skipped,
        bindings = summary.bindings,
        "wrote {}",
        args.output
    );
    Ok(())
}
