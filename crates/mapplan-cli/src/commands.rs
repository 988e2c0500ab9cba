use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use mapplan_cli::render::render_plan_set;
use mapplan_cli::summary::{
    converters_table, diagnostic_table, plan_table, types_table,
};
use mapplan_map::{MappingCatalog, MappingDeclarations, Planner, load_catalog};
use mapplan_model::{NameMatching, PlanSet, ResolveOptions, TypeId};

use crate::cli::{DeclaredArgs, OutputFormatArg, PlanArgs, ResolveArgs, TypesArgs};

pub fn run_plan(args: &PlanArgs) -> Result<()> {
    let catalog = open_catalog(&args.catalog)?;
    for id in [&args.source, &args.dest] {
        if !catalog.contains(&TypeId::new(id.as_str())) {
            bail!("type `{id}` is not defined in {}", args.catalog.display());
        }
    }
    let planner = Planner::new(&catalog, resolve_options(&args.resolve));
    let set = planner.plan(args.source.as_str(), args.dest.as_str());
    info!(root = %set.root, plans = set.len(), diagnostics = set.diagnostics.len(), "plan resolved");

    match args.resolve.format {
        OutputFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&set).context("serialize plan")?);
        }
        format => print_set(&set, format),
    }
    Ok(())
}

pub fn run_declared(args: &DeclaredArgs) -> Result<()> {
    let catalog = open_catalog(&args.catalog)?;
    if catalog.declared_pairs().is_empty() {
        warn!(catalog = %args.catalog.display(), "catalog declares no mappings");
    }
    let planner = Planner::new(&catalog, resolve_options(&args.resolve));
    let sets = planner.plan_declared();
    info!(pairs = sets.len(), "declared mappings resolved");

    match args.resolve.format {
        OutputFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&sets).context("serialize plans")?);
        }
        format => {
            for (index, set) in sets.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                print_set(set, format);
            }
        }
    }
    Ok(())
}

pub fn run_types(args: &TypesArgs) -> Result<()> {
    let catalog = open_catalog(&args.catalog)?;
    println!("{}", types_table(catalog.schemas()));
    if catalog.converters().next().is_some() {
        println!("Converters:");
        println!("{}", converters_table(catalog.converters()));
    }
    Ok(())
}

fn open_catalog(path: &Path) -> Result<MappingCatalog> {
    let _span = info_span!("catalog", path = %path.display()).entered();
    let catalog = load_catalog(path)?;
    info!(types = catalog.schemas().count(), "catalog loaded");
    Ok(catalog)
}

fn resolve_options(args: &ResolveArgs) -> ResolveOptions {
    let options = if args.strict {
        ResolveOptions::strict()
    } else {
        ResolveOptions::default()
    };
    if args.ignore_case {
        options.with_name_matching(NameMatching::IgnoreCase)
    } else {
        options
    }
}

fn print_set(set: &PlanSet, format: OutputFormatArg) {
    if format == OutputFormatArg::Text {
        println!("{}", render_plan_set(set));
        return;
    }
    println!("{}", plan_table(set));
    if !set.diagnostics.is_empty() {
        println!("Diagnostics:");
        println!("{}", diagnostic_table(&set.diagnostics));
    }
}
