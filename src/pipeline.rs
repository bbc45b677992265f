//! # Generation Pipeline
//!
//! Ties the layers together for one configured image:
//!
//! ```text
//! input file ──► pixel::source ──► encode ──► emit ──► <name>.h + <name>.c
//!                 (normalize)      (table)    (C text)   (temp + rename)
//! ```
//!
//! Everything is rendered in memory before the file system is touched, so a
//! decode failure never leaves anything behind. Both artifacts are written
//! to temporary files first and renamed into place only when both writes
//! succeeded.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::GeneratorConfig;
use crate::emit::{self, Artifacts, sanitize_identifier};
use crate::encode;
use crate::error::{PixelbakeError, Result};
use crate::pixel::source;

/// What one successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub input: PathBuf,
    pub name: String,
    pub header_path: PathBuf,
    pub source_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Size of the embedded pixel table in bytes
    pub table_bytes: usize,
    pub functions: Vec<String>,
}

/// Load, encode and emit without writing anything.
pub fn render(config: &GeneratorConfig) -> Result<Artifacts> {
    let (artifacts, _) = render_with_table(config)?;
    Ok(artifacts)
}

fn render_with_table(config: &GeneratorConfig) -> Result<(Artifacts, encode::PixelTable)> {
    let image = source::open(&config.input, config.channel_order())?;
    let table = encode::encode(&image);

    let ops = config.operations();
    if ops.is_empty() {
        log::warn!(
            "No blit operation enabled for '{}'; only the table will be emitted",
            config.input.display()
        );
    }

    let artifacts = emit::emit(&config.base_name(), &table, &ops, config.bytes_per_line);
    Ok((artifacts, table))
}

/// Render and write both artifacts for one image.
pub fn generate(config: &GeneratorConfig) -> Result<Generated> {
    let (artifacts, table) = render_with_table(config)?;

    let outdir = config.outdir();
    if !outdir.exists() {
        fs::create_dir_all(outdir)?;
        log::info!("Created output directory {}", outdir.display());
    }

    let header_path = outdir.join(artifacts.header_file_name());
    let source_path = outdir.join(artifacts.source_file_name());

    write_pair(
        (&header_path, &artifacts.header),
        (&source_path, &artifacts.source),
    )?;

    Ok(Generated {
        input: config.input.clone(),
        name: artifacts.name,
        header_path,
        source_path,
        width: table.width(),
        height: table.height(),
        table_bytes: table.len(),
        functions: artifacts.functions,
    })
}

/// Convert every entry, in parallel.
///
/// Fails as a whole with [`PixelbakeError::Manifest`] if two entries would
/// write the same file. Otherwise each entry gets its own result, in input
/// order.
pub fn generate_batch(configs: &[GeneratorConfig]) -> Result<Vec<Result<Generated>>> {
    check_collisions(configs)?;

    let results: Vec<Result<Generated>> = configs
        .par_iter()
        .map(|config| {
            let result = generate(config);
            if let Err(e) = &result {
                log::warn!("Failed to convert '{}': {}", config.input.display(), e);
            }
            result
        })
        .collect();

    Ok(results)
}

/// Header path each entry would produce; the source path differs only by
/// extension.
fn output_stem(config: &GeneratorConfig) -> PathBuf {
    config.outdir().join(sanitize_identifier(&config.base_name()))
}

fn check_collisions(configs: &[GeneratorConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for config in configs {
        let stem = output_stem(config);
        if !seen.insert(stem.clone()) {
            return Err(PixelbakeError::Manifest(format!(
                "two entries write '{}.h'; give one of them a distinct name",
                stem.display()
            )));
        }
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_pair(header: (&Path, &str), definitions: (&Path, &str)) -> Result<()> {
    let temps = [temp_path(header.0), temp_path(definitions.0)];
    let remove_temps = || {
        for tmp in &temps {
            let _ = fs::remove_file(tmp);
        }
    };

    let staged = fs::write(&temps[0], header.1).and_then(|_| fs::write(&temps[1], definitions.1));
    if let Err(e) = staged {
        remove_temps();
        return Err(e.into());
    }

    if let Err(e) = fs::rename(&temps[0], header.0) {
        remove_temps();
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&temps[1], definitions.0) {
        // The new header has no matching source
        let _ = fs::remove_file(header.0);
        remove_temps();
        return Err(e.into());
    }
    Ok(())
}
