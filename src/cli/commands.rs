// file: src/cli/commands.rs
// version: 2.0.0
// guid: 93a6e0d1-7b4c-4f58-a2e3-c80f5d19b7a4

//! Command implementations for the CLI

use super::args::ConvertArgs;
use super::sources::{collect_settings, load_catalog, select_source};
use crate::config::{ConversionSettings, DEFAULT_IMAGES_FILE};
use crate::error::{ConvertError, Result};
use crate::logging::with_operation_span;
use crate::prompt::{Prompter, TerminalPrompter};
use crate::translate::{
    mangle_os_tag, scan, validate_name, CreatedFolders, OsCatalog, ResourceGenerator, SourceModel,
};
use anyhow::Context;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Convert a VirtualBox configuration, asking the operator on the terminal
pub async fn convert_command(args: ConvertArgs) -> anyhow::Result<()> {
    let mut prompter = TerminalPrompter::stdio();
    let output = convert(&args, &mut prompter).await?;
    println!("Configuration written to {}", output.display());
    Ok(())
}

/// Run a whole conversion and return the path of the written configuration.
///
/// Any failure after the output file was created removes that file, so a
/// run either produces a complete configuration or none at all.
pub async fn convert(args: &ConvertArgs, prompter: &mut dyn Prompter) -> anyhow::Result<PathBuf> {
    remove_stale_output(&args.output)
        .await
        .context("File deletion failed")?;

    let source = select_source(args, prompter)
        .await
        .context("The file could not be selected")?;
    info!("Converting {}", source.display());

    let model = with_operation_span("scan", || scan_file(&source))
        .with_context(|| format!("Error with information scanning of {}", source.display()))?;

    let settings = with_operation_span("settings", || collect_settings(args, prompter))
        .context("Getting conversion settings failed")?;

    let images_file = images_file(args.images_file.as_deref());
    let catalog = load_catalog(images_file.as_deref())
        .await
        .context("Error with getting images")?;

    with_operation_span("generate", || {
        write_output(&args.output, &model, &catalog, &settings, prompter)
    })
    .context("Error with resource conversion")?;

    Ok(args.output.clone())
}

/// List catalog images, optionally filtered by name
pub async fn list_images_command(images_file: Option<PathBuf>, filter: Option<String>) -> anyhow::Result<()> {
    let images_file = self::images_file(images_file.as_deref());
    let catalog = load_catalog(images_file.as_deref())
        .await
        .context("Error with getting images")?;

    for entry in catalog.entries() {
        if filter.as_deref().map_or(true, |f| entry.name.contains(f)) {
            println!("{}\t{}", entry.name, entry.id);
        }
    }
    Ok(())
}

/// Print the mangled name and the image a VirtualBox os_id resolves to
pub async fn resolve_os_command(os_id: &str, images_file: Option<PathBuf>) -> anyhow::Result<()> {
    let images_file = self::images_file(images_file.as_deref());
    let catalog = load_catalog(images_file.as_deref())
        .await
        .context("Error with getting images")?;

    let image_id = catalog.resolve(os_id)?;
    println!("{}\t{}", mangle_os_tag(os_id), image_id);
    Ok(())
}

/// Validate a resource name
pub fn check_name_command(name: &str) -> anyhow::Result<()> {
    validate_name(name)?;
    println!("\"{}\" is a valid name", name);
    Ok(())
}

/// Prefer an explicit listing file, then the default one if it exists
fn images_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_IMAGES_FILE);
            default.is_file().then_some(default)
        }
    }
}

async fn remove_stale_output(output: &Path) -> Result<()> {
    match tokio::fs::remove_file(output).await {
        Ok(()) => {
            info!("Removed previous {}", output.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn scan_file(source: &Path) -> Result<SourceModel> {
    let file = File::open(source).map_err(ConvertError::Read)?;
    scan(BufReader::new(file))
}

/// Generate into `output`, deleting the file again when generation fails
fn write_output(
    output: &Path,
    model: &SourceModel,
    catalog: &OsCatalog,
    settings: &ConversionSettings,
    prompter: &mut dyn Prompter,
) -> Result<CreatedFolders> {
    let file = File::create(output)?;
    let mut generator = ResourceGenerator::new(BufWriter::new(file), catalog, settings, prompter);
    let result = generator.generate(model);
    drop(generator);

    if result.is_err() {
        if let Err(e) = std::fs::remove_file(output) {
            warn!("Failed to remove partial {}: {}", output.display(), e);
        }
    }
    result
}
