use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use colmap_cli::config::AppConfig;
use colmap_cli::service::{
    build_engine, execute, exit_code, load_catalog, load_directory, load_request, render_outcome,
};
use colmap_map::CallerIdentity;
use colmap_model::ContentHint;

use crate::cli::{FieldsArgs, MapArgs};
use crate::summary::{apply_table_style, print_summary};

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let catalog_path = args.catalog.as_deref().or(config.catalog.as_deref());
    let catalog = load_catalog(catalog_path)?;

    let mut table = Table::new();
    table.set_header(vec!["Field", "Label", "Content", "Keywords"]);
    apply_table_style(&mut table);
    for field in catalog.fields() {
        let hints: Vec<&str> = field.content_hints.iter().map(ContentHint::as_str).collect();
        table.add_row(vec![
            field.canonical_name.clone(),
            field.label.clone(),
            hints.join(", "),
            field.keywords.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Runs one mapping request and returns the process exit code.
pub fn run_map(args: &MapArgs) -> Result<i32> {
    let span = info_span!("map", request = %args.request.display());
    let _guard = span.enter();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if args.no_fallback {
        config.engine.fallback_enabled = false;
    }
    if let Some(workers) = args.workers {
        config.engine.workers = workers;
    }

    let catalog = load_catalog(args.catalog.as_deref().or(config.catalog.as_deref()))?;
    let directory = load_directory(args.directory.as_deref().or(config.directory.as_deref()))?;
    let engine = build_engine(&config, catalog, directory)?;
    let request = load_request(&args.request)?;
    let caller = args.caller.as_deref().map(CallerIdentity::new);

    let outcome = execute(&engine, &request, caller.as_ref());
    let body = render_outcome(&outcome)?;
    match &args.output {
        Some(path) => std::fs::write(path, format!("{body}\n"))
            .with_context(|| format!("write {}", path.display()))?,
        None => println!("{body}"),
    }

    match outcome {
        Ok(response) => {
            if !args.no_summary {
                print_summary(&response);
            }
            Ok(0)
        }
        Err(error) => Ok(exit_code(&error)),
    }
}
