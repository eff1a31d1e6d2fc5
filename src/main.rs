//! endfield-reverse - Command Line Interface
//!
//! Works out what can be built from your ore rates and how many facilities
//! a plan needs. Run with `--help` to see all available options.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use endfield_reverse::{
    calculator::recompute,
    data::{embedded_catalog, load_catalog, Catalog},
    display::{display_available_items, display_ore_rates, display_plan},
    models::{OreKind, OreRates, RecipeId},
    plan::ProductionPlan,
};

/// Command-line arguments for endfield-reverse.
#[derive(Parser, Debug)]
#[command(name = "endfield-reverse")]
#[command(author, version, about = "Plan production and facility counts from raw ore rates", long_about = None)]
struct Args {
    /// Originium ore gathered per minute
    #[arg(long, default_value = "0")]
    originium: f64,

    /// Quartz sand gathered per minute
    #[arg(long, default_value = "0")]
    quartz: f64,

    /// Iron ore gathered per minute
    #[arg(long, default_value = "0")]
    iron: f64,

    /// Add a production as RECIPE=RATE (units per minute); repeatable
    #[arg(short, long = "produce", value_name = "RECIPE=RATE", value_parser = parse_production)]
    productions: Vec<(RecipeId, f64)>,

    /// Load the catalog from this directory instead of the built-in tables
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

/// Parses a `RECIPE=RATE` argument.
fn parse_production(s: &str) -> Result<(RecipeId, f64), String> {
    let (recipe, rate) = s
        .split_once('=')
        .ok_or_else(|| format!("expected RECIPE=RATE, got '{}'", s))?;
    let recipe: RecipeId = recipe.parse().map_err(|e| format!("{}", e))?;
    let rate: f64 = rate
        .trim()
        .parse()
        .map_err(|_| format!("invalid rate '{}'", rate))?;
    Ok((recipe, rate))
}

fn build_plan(catalog: &Catalog, productions: &[(RecipeId, f64)]) -> Result<ProductionPlan> {
    let mut plan = ProductionPlan::new();
    for &(recipe_id, rate) in productions {
        let item_id = catalog
            .recipe(recipe_id)
            .and_then(|r| r.primary_output())
            .map(|o| o.item_id)
            .ok_or_else(|| anyhow!("recipe '{}' is not in the catalog", recipe_id))?;
        plan.add_production(recipe_id, item_id, rate);
    }
    Ok(plan)
}

fn main() -> Result<()> {
    // Logs go to stderr so the tables (or JSON) on stdout stay clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match &args.data {
        Some(dir) => load_catalog(dir)
            .with_context(|| format!("failed to load catalog from {}", dir.display()))?,
        None => embedded_catalog().context("built-in catalog is invalid")?,
    };

    let rates = OreRates::new()
        .with(OreKind::Originium, args.originium)
        .with(OreKind::Quartz, args.quartz)
        .with(OreKind::Iron, args.iron);
    let plan = build_plan(&catalog, &args.productions)?;
    info!(entries = plan.len(), "recomputing plan");

    let view = recompute(&catalog, &rates, &plan);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("endfield-reverse - Reverse Production Planner");
    println!("================================================================");
    println!();
    display_ore_rates(&rates, &view.remaining);
    display_available_items(&view.available);
    display_plan(&view);

    Ok(())
}
