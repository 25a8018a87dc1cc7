use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;

use self::catalog::Catalog;

pub mod camera;
pub mod catalog;
pub mod error;
pub mod format;
pub mod math;
pub mod optics;
pub mod report;
pub mod ruler;
pub mod settings;

pub use self::camera::{Camera, Config};
pub use self::error::Error;
pub use self::report::Report;
pub use self::settings::Settings;

fn is_gzip(path: &Path) -> bool {
    path.extension() == Some("gz".as_ref())
}

/// Reads a JSON document, gunzipping it first if the file ends in `.gz`.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let value: T = if is_gzip(path) {
        let mut decoder = GzDecoder::new(reader);
        serde_json::from_reader(&mut decoder)
    } else {
        serde_json::from_reader(&mut reader)
    }
    .with_context(|| format!("parsing {}", path.display()))?;
    log::info!("loaded {}", path.display());
    Ok(value)
}

/// Writes `value` as JSON, gzipped if `path` ends in `.gz` and pretty-printed otherwise.
pub fn save<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    if is_gzip(path) {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        serde_json::to_writer(&mut encoder, value)?;
        encoder.finish()?.flush()?;
    } else {
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }

    log::info!("saved {}", path.display());
    Ok(())
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let catalog: Catalog = load(path)?;
    catalog.validate()?;
    Ok(catalog)
}
