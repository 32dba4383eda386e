//! Golden-file checks for the pin binding generator.
//!
//! `golden/<name>.json` must generate exactly `golden/<name>.cpp` with the
//! default options. `rejects/<name>.json` must fail to generate.
//! Set `BLESS=1` to rewrite the expected `.cpp` files from the current output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::glob;
use pinbind::GeneratorOptions;
use pretty_assertions::StrComparison;

pub const GOLDEN_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/golden");
pub const REJECTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/rejects");
const TARGET_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../target/golden");

#[derive(Debug, Clone)]
pub struct GoldenCase {
    pub name: String,
    pub pin_map: PathBuf,
    pub expected: PathBuf,
}

fn case_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .ok_or_else(|| anyhow::anyhow!("Invalid case filename: {path:?}"))
}

fn pin_maps(dir: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for path in glob(&format!("{dir}/*.json"))? {
        paths.push(path?);
    }
    paths.sort();
    Ok(paths)
}

/// Every `*.json` in `dir` paired with the `.cpp` next to it.
pub fn discover_golden(dir: &str) -> Result<Vec<GoldenCase>> {
    pin_maps(dir)?
        .into_iter()
        .map(|pin_map| {
            Ok(GoldenCase {
                name: case_name(&pin_map)?,
                expected: pin_map.with_extension("cpp"),
                pin_map,
            })
        })
        .collect()
}

pub fn discover_rejects(dir: &str) -> Result<Vec<(String, PathBuf)>> {
    pin_maps(dir)?
        .into_iter()
        .map(|path| Ok((case_name(&path)?, path)))
        .collect()
}

/// Generates the case into `target/golden/` and compares with the expected file.
pub fn check_golden(case: &GoldenCase) -> Result<()> {
    let out_dir = PathBuf::from(TARGET_PATH);
    std::fs::create_dir_all(&out_dir)?;
    let output = out_dir.join(format!("{}.cpp", case.name));

    pinbind::generate_file(&case.pin_map, &output, &GeneratorOptions::default())
        .with_context(|| format!("Failed to generate {}", case.pin_map.display()))?;
    let actual = std::fs::read_to_string(&output)?;

    if std::env::var_os("BLESS").is_some() {
        std::fs::write(&case.expected, &actual)?;
        return Ok(());
    }

    let expected = std::fs::read_to_string(&case.expected)
        .with_context(|| format!("Missing expected output {}", case.expected.display()))?;
    if actual != expected {
        bail!(
            "{} differs from {}:\n{}",
            output.display(),
            case.expected.display(),
            StrComparison::new(&expected, &actual)
        );
    }
    Ok(())
}

pub fn check_reject(pin_map: &Path) -> Result<()> {
    let pin_map = pinbind::PinMap::load(pin_map);
    match pin_map.and_then(|pin_map| pinbind::generate(&pin_map, &GeneratorOptions::default())) {
        Ok(source) => bail!("expected generation to fail, got:\n{source}"),
        Err(_) => Ok(()),
    }
}
