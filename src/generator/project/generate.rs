use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::descriptor::DescriptorSet;
use crate::generator::templates::{output_file_name, render_file};
use crate::routes::build_route_tables;

use super::format::format_files;

/// Where and how generated files are written.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    /// Overwrite files that already exist
    pub force: bool,
    /// Render and report, but write nothing
    pub dry_run: bool,
    pub config: GeneratorConfig,
}

/// A rendered file that has not been written yet.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub path: PathBuf,
    /// Schema file the output was rendered from
    pub source: String,
    pub contents: String,
    pub routes: usize,
}

/// Build the route tables and render one file per schema file owning services.
///
/// # Errors
///
/// Fails on an unresolvable payload type or a template error.
pub fn plan_files(
    set: &DescriptorSet,
    config: &GeneratorConfig,
    output_dir: &Path,
) -> anyhow::Result<Vec<PlannedFile>> {
    let tables = build_route_tables(set).context("Failed to build route tables")?;
    tables
        .iter()
        .map(|routes| {
            let contents = render_file(routes, config)
                .with_context(|| format!("Failed to render {}", routes.path))?;
            Ok(PlannedFile {
                path: output_dir.join(output_file_name(&routes.path, &config.file_suffix)),
                source: routes.path.clone(),
                contents,
                routes: routes.binding_count(),
            })
        })
        .collect()
}

/// Render and write the route registration files for a descriptor set.
///
/// Existing files are skipped unless `force` is set. With `dry_run` nothing
/// is written and the returned list is empty. Written files are passed to the
/// formatter when the config enables it.
///
/// # Errors
///
/// Fails on an unresolvable payload type, a write error, or a formatter failure.
pub fn generate_files(set: &DescriptorSet, options: &GenerateOptions) -> anyhow::Result<Vec<PathBuf>> {
    let planned = plan_files(set, &options.config, &options.output_dir)?;
    let mut written = Vec::with_capacity(planned.len());

    for file in planned {
        if options.dry_run {
            info!(path = %file.path.display(), routes = file.routes, "dry run: would write");
            continue;
        }
        if file.path.exists() && !options.force {
            warn!(path = %file.path.display(), "skipping existing file (use --force to overwrite)");
            continue;
        }
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&file.path, &file.contents)
            .with_context(|| format!("Failed to write {}", file.path.display()))?;
        info!(
            path = %file.path.display(),
            source = %file.source,
            routes = file.routes,
            "generated route registration"
        );
        written.push(file.path);
    }

    if options.config.format && !written.is_empty() {
        format_files(&written, &options.config.formatter_bin())?;
    }
    Ok(written)
}
