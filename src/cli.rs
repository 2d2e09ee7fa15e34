//! Command-line surface: argument parsing and subcommand dispatch.

use crate::render;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ebike_core::config::Config;
use ebike_core::{Catalog, Comparison, Filters, Pagination, PriceRange, SortKey};
use ebike_sources::{Manifest, SourceLoader};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ebike", about = "Browse and compare e-bike listings scraped to CSV")]
pub struct Cli {
    /// Write debug logs to /tmp/ebike-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,

    /// Config file to use instead of ~/.config/ebike/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Manifest listing the CSV sources (TOML, JSON or YAML).
    #[arg(long, global = true, conflicts_with = "data_dir")]
    pub manifest: Option<PathBuf>,

    /// Directory of `<site>_<YYYYMMDD>.csv` files.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Load every dated file in the data directory, not just the newest per site.
    #[arg(long, global = true)]
    pub all_dates: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List bikes, filtered, sorted and paginated
    List {
        /// Only bikes from this manufacturer
        #[arg(long)]
        manufacturer: Option<String>,
        /// Price bounds, e.g. 1000-2000 or 2000-
        #[arg(long, value_name = "MIN-MAX")]
        price: Option<PriceRange>,
        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,
        /// name, price-low, price-high or manufacturer
        #[arg(long)]
        sort: Option<SortKey>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// List the manufacturers present in the catalog
    Manufacturers,
    /// Compare bikes side by side
    Compare {
        /// Comma-separated bike ids
        ids: String,
    },
    /// Print the whole catalog as JSON
    Export {
        #[arg(long)]
        pretty: bool,
    },
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let manifest = resolve_manifest(&cli, &config).await?;
    let mut loader = SourceLoader::new();
    let (catalog, report) = loader.load_catalog(&manifest).await;
    if report.loaded.is_empty() && !manifest.is_empty() {
        bail!("none of the {} sources could be read", manifest.len());
    }

    let mut out = std::io::stdout().lock();
    execute(cli.command, &catalog, &config, &mut out)
}

/// Run one subcommand against an already-loaded catalog.
pub fn execute(
    command: Command,
    catalog: &Catalog,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List {
            manufacturer,
            price,
            search,
            sort,
            page,
            per_page,
        } => {
            let mut filters = Filters::default();
            if let Some(m) = manufacturer {
                filters = filters.manufacturer(m);
            }
            if let Some(range) = price {
                filters = filters.price_range(range);
            }
            if let Some(term) = search {
                filters = filters.search(term);
            }
            let sort = sort.unwrap_or(config.catalog.default_sort);
            let results = catalog.query(&filters, sort);
            let pagination = Pagination::new(
                results.len(),
                per_page.unwrap_or(config.catalog.items_per_page),
                page,
            );
            render::bike_list(out, &results, &pagination)?;
        }
        Command::Manufacturers => render::manufacturers(out, &catalog.manufacturers())?,
        Command::Compare { ids } => {
            let mut comparison = Comparison::new(config.compare.max_selection);
            comparison.select_ids(catalog, &ids);
            if !comparison.is_ready() {
                bail!(
                    "need at least 2 known bike ids to compare, found {}",
                    comparison.selected().len()
                );
            }
            render::comparison(out, &comparison.table())?;
        }
        Command::Export { pretty } => {
            if pretty {
                serde_json::to_writer_pretty(&mut *out, catalog.bikes())?;
            } else {
                serde_json::to_writer(&mut *out, catalog.bikes())?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Flags win over `[sources]`: `--manifest`, then `--data-dir`, then the
/// configured manifest, then the configured data directory.
async fn resolve_manifest(cli: &Cli, config: &Config) -> anyhow::Result<Manifest> {
    let manifest_file = match (&cli.manifest, &cli.data_dir) {
        (Some(path), _) => Some(path),
        (None, Some(_)) => None,
        (None, None) => config.sources.manifest.as_ref(),
    };
    if let Some(path) = manifest_file {
        return Manifest::from_file(path)
            .with_context(|| format!("loading manifest {}", path.display()));
    }

    let dir = cli.data_dir.as_ref().unwrap_or(&config.sources.data_dir);
    let manifest = Manifest::scan_dir(dir)
        .await
        .with_context(|| format!("scanning data directory {}", dir.display()))?;

    if config.sources.latest_only && !cli.all_dates {
        Ok(manifest.latest())
    } else {
        Ok(manifest)
    }
}
