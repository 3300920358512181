//! # Timmerkalkyl CLI
//!
//! Command-line front end for `timber_core`: print defaults, calculate a
//! building against a price list, render the quote PDF and save or load
//! project files.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `warn`), e.g. `RUST_LOG=timber_core=debug timber calc`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use timber_core::building::BuildingInputs;
use timber_core::calculations::{estimate, group_by_category, labor_by_category, Estimate};
use timber_core::file_io::{
    load_economy, load_inputs, load_price_list, load_project_with_lock_check, save_project, write_atomic,
    FileLock,
};
use timber_core::format::{format_currency, format_number, format_time};
use timber_core::pdf::render_quote_pdf;
use timber_core::price_list::{default_price_list, PriceListEntry};
use timber_core::project::Project;

#[derive(Parser)]
#[command(name = "timber")]
#[command(about = "Material, labor and quote calculation for log houses")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Where the building, price list and economy come from
#[derive(Args)]
struct Sources {
    /// BuildingInputs JSON (defaults when omitted)
    #[arg(long)]
    inputs: Option<PathBuf>,
    /// Price-list export: row array or {Material, Ekonomi} sheets
    #[arg(long)]
    price_list: Option<PathBuf>,
    /// EconomySettings JSON, overrides any economy sheet
    #[arg(long)]
    economy: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Action {
    /// Print the default building inputs as JSON
    Defaults,
    /// Print the effective price list as JSON
    PriceList {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Calculate geometry, line items and totals
    Calc {
        #[command(flatten)]
        sources: Sources,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render the customer quote as PDF
    Quote {
        #[command(flatten)]
        sources: Sources,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "Timmerhus")]
        name: String,
    },
    /// Calculate and save a project file
    Save {
        #[command(flatten)]
        sources: Sources,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "Timmerhus")]
        name: String,
        #[arg(long, default_value = "")]
        customer: String,
        /// Name recorded in the lock file (defaults to $USER)
        #[arg(long)]
        user: Option<String>,
    },
    /// Load a project file, recalculate and print it
    Load {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cmd = Cmd::parse();
    match cmd.action {
        Action::Defaults => print_json(&BuildingInputs::default()),
        Action::PriceList { file } => price_list(file.as_deref()),
        Action::Calc { sources, json } => calc(&sources, json),
        Action::Quote { sources, out, name } => quote(&sources, &out, &name),
        Action::Save {
            sources,
            out,
            name,
            customer,
            user,
        } => save(&sources, &out, name, customer, user),
        Action::Load { path, json } => load(&path, json),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Resolve inputs and price list; economy precedence is
/// `--economy` file, then the price list's economy sheet, then the inputs.
fn resolve(sources: &Sources) -> Result<(BuildingInputs, Vec<PriceListEntry>)> {
    let mut inputs = match &sources.inputs {
        Some(path) => load_inputs(path).with_context(|| format!("reading inputs {}", path.display()))?,
        None => BuildingInputs::default(),
    };

    let entries = match &sources.price_list {
        Some(path) => {
            let source =
                load_price_list(path).with_context(|| format!("reading price list {}", path.display()))?;
            if let Some(economy) = source.economy {
                inputs.apply_economy(&economy);
            }
            source.entries
        }
        None => default_price_list().to_vec(),
    };

    if let Some(path) = &sources.economy {
        let economy = load_economy(path).with_context(|| format!("reading economy {}", path.display()))?;
        inputs.apply_economy(&economy);
    }

    inputs.validate().context("invalid building inputs")?;
    Ok((inputs, entries))
}

fn price_list(file: Option<&Path>) -> Result<()> {
    match file {
        Some(path) => print_json(&load_price_list(path)?),
        None => print_json(&default_price_list()),
    }
}

fn calc(sources: &Sources, json: bool) -> Result<()> {
    let (inputs, entries) = resolve(sources)?;
    let result = estimate(&inputs, &entries);
    if json {
        print_json(&result)
    } else {
        print_summary(&inputs, &result);
        Ok(())
    }
}

fn quote(sources: &Sources, out: &Path, name: &str) -> Result<()> {
    let (inputs, entries) = resolve(sources)?;
    let result = estimate(&inputs, &entries);
    let pdf = render_quote_pdf(name, &inputs, &result.geometry, &result.items)?;
    write_atomic(out, &pdf).with_context(|| format!("writing {}", out.display()))?;
    println!("Offert sparad: {}", out.display());
    Ok(())
}

fn save(sources: &Sources, out: &Path, name: String, customer: String, user: Option<String>) -> Result<()> {
    let (inputs, entries) = resolve(sources)?;
    let mut project = Project::new(name, customer);
    project.price_list = entries;
    project.set_inputs(inputs);
    let result = project.recalculate();

    let user = user
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "unknown".to_string());
    let lock = FileLock::acquire(out, user)?;
    save_project(&project, out)?;
    drop(lock);

    println!(
        "Projekt sparat: {} ({})",
        out.display(),
        format_currency(result.totals.quote_inc_vat)
    );
    Ok(())
}

fn load(path: &Path, json: bool) -> Result<()> {
    let (mut project, lock) = load_project_with_lock_check(path)?;
    if let Some(info) = lock {
        tracing::warn!(user = %info.user_id, machine = %info.machine, "project is open elsewhere");
    }
    let result = project.recalculate();
    if json {
        print_json(&project)
    } else {
        println!("{} - {}", project.meta.name, project.meta.customer);
        print_summary(&project.inputs, &result);
        Ok(())
    }
}

fn print_summary(inputs: &BuildingInputs, result: &Estimate) {
    let geo = &result.geometry;
    let totals = &result.totals;

    println!("{} {} × {} m", inputs.roof_type, format_number(inputs.length_m, 2), format_number(inputs.width_m, 2));
    println!("  Varv:            {} / {}", geo.courses_low, geo.courses_high);
    println!("  Väggarea netto:  {} m²", format_number(geo.wall_area_net_m2, 1));
    println!("  Timmer netto:    {} lm", format_number(geo.net_log_length_m, 0));
    println!("  Takarea:         {} m²", format_number(geo.roof_area_m2, 1));
    println!("  Golvyta:         {} m²", format_number(geo.inner_area_m2, 1));
    println!("  Total höjd:      {} m", format_number(geo.total_height_m, 2));
    if geo.exceeds_permit_height() {
        println!("  OBS: över 3,0 m, bygglov kan krävas");
    }
    println!();

    for (category, items) in group_by_category(&result.items) {
        println!("{}", category);
        for item in items.into_iter().filter(|i| i.include) {
            println!(
                "  {:<28} {:>10} {:<3} {:>14}",
                item.article,
                format_number(item.quantity_with_waste(), 1),
                item.unit.code(),
                format_currency(item.sale_total())
            );
        }
    }
    println!();

    for group in labor_by_category(&result.items) {
        println!("  Arbete {:<12} {}", group.category.code(), format_time(group.hours));
    }
    println!("  Material:        {}", format_currency(totals.material_sale));
    println!("  Arbete:          {} ({})", format_currency(totals.labor_cost), format_time(totals.labor_hours));
    println!("  Exkl. moms:      {}", format_currency(totals.quote_ex_vat));
    println!("  Moms:            {}", format_currency(totals.vat));
    println!("  Inkl. moms:      {}", format_currency(totals.quote_inc_vat));
    println!("  Marginal:        {}", format_currency(totals.total_margin));
}
