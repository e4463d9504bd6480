//! hotelmatch CLI
//!
//! Local entry point for listing search, matching and ROI calculations.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use hotelmatch::{
    calculator::{self, CalculatorInputs, PRESETS},
    error::{AppError, Result},
    matching::{self, CriteriaFilter},
    models::{Config, SearchListing, SearchParams},
    services::{HotelCatalog, SearchService, unique_cities, unique_hotel_types},
    utils::log as console,
};

const HOTEL_LINE: &str = "{title} | {city} | {type} | {stars}★ | {currency} {price} | IRR {irr}% | AI {ai_score}";

/// hotelmatch - Hotel investment search and matching
#[derive(Parser, Debug)]
#[command(
    name = "hotelmatch",
    version,
    about = "Hotel investment search, matching and ROI calculator"
)]
struct Cli {
    /// Directory holding config.toml and the demo dataset
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Path to config file (default: {data_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search listings (live API with demo fallback)
    Search(SearchArgs),

    /// Filter and score the demo dataset by explicit criteria
    Filter(FilterArgs),

    /// Rank listings against a natural-language request
    Ask {
        /// e.g. "boutique hotel in Abha under 20M with high yield"
        query: String,
    },

    /// Suggest hotel types and listings for an investor description
    Profile {
        description: String,
    },

    /// Run the ROI calculator
    Calc(CalcArgs),

    /// Show dataset cities and hotel types
    Info,

    /// Validate configuration and dataset
    Validate,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    city: Option<String>,
    #[arg(long = "type")]
    hotel_type: Option<String>,
    #[arg(long)]
    price_min: Option<f64>,
    #[arg(long)]
    price_max: Option<f64>,
    #[arg(short, long)]
    query: Option<String>,
    #[arg(long, default_value_t = 0)]
    page: usize,
    /// Page size (default from config)
    #[arg(long)]
    per_page: Option<usize>,
    /// Force the demo dataset
    #[arg(long)]
    demo: bool,
    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long = "type", default_value = "all")]
    hotel_type: String,
    #[arg(long, default_value = "all")]
    city: String,
    #[arg(long, default_value_t = 1)]
    min_stars: u8,
    #[arg(long, default_value_t = 5)]
    max_stars: u8,
    #[arg(long, default_value_t = 0.0)]
    min_irr: f64,
    #[arg(long, default_value_t = 15.0)]
    max_irr: f64,
    #[arg(long, default_value_t = 0.0)]
    min_ai: f64,
    #[arg(long, default_value_t = 100.0)]
    max_ai: f64,
    #[arg(long, default_value_t = 0.0)]
    min_price: f64,
    #[arg(long, default_value_t = 50_000_000.0)]
    max_price: f64,
}

impl From<FilterArgs> for CriteriaFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            hotel_type: args.hotel_type,
            city: args.city,
            min_stars: args.min_stars,
            max_stars: args.max_stars,
            min_irr: args.min_irr,
            max_irr: args.max_irr,
            min_ai_score: args.min_ai,
            max_ai_score: args.max_ai,
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Start from a named preset (see --list-presets)
    #[arg(long)]
    preset: Option<String>,
    #[arg(long)]
    list_presets: bool,
    #[arg(long)]
    budget: Option<f64>,
    #[arg(long)]
    rooms: Option<u32>,
    #[arg(long)]
    adr: Option<f64>,
    #[arg(long)]
    occupancy: Option<f64>,
    #[arg(long)]
    management_fee: Option<f64>,
    #[arg(long)]
    capex: Option<f64>,
}

impl CalcArgs {
    fn inputs(&self) -> Result<CalculatorInputs> {
        let mut inputs = CalculatorInputs::default();
        if let Some(v) = self.management_fee {
            inputs.management_fee_pct = v;
        }
        if let Some(v) = self.capex {
            inputs.capex_pct = v;
        }

        if let Some(name) = self.preset.as_deref() {
            let preset = calculator::find_preset(name)
                .ok_or_else(|| AppError::validation(format!("unknown preset '{name}'")))?;
            inputs = preset.apply(inputs);
        }

        if let Some(v) = self.budget {
            inputs.budget = v;
        }
        if let Some(v) = self.rooms {
            inputs.rooms = v;
        }
        if let Some(v) = self.adr {
            inputs.adr = v;
        }
        if let Some(v) = self.occupancy {
            inputs.occupancy_pct = v;
        }

        inputs.validate()?;
        Ok(inputs)
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_listing(listing: &SearchListing) {
    console::sub_item(&format!(
        "{} | {} | {} SAR | {} rooms",
        listing.title,
        listing.city_name(),
        console::group_thousands(listing.price),
        listing.rooms
    ));
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}%"))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("config.toml"));
    let mut config = Config::load_or_default(&config_path);
    config.apply_env();
    log::debug!("Loaded configuration from {}", config_path.display());

    let catalog = Arc::new(HotelCatalog::new(config.demo_path(&cli.data_dir)));

    match cli.command {
        Command::Search(args) => {
            let params = SearchParams {
                page: args.page,
                hits_per_page: args.per_page.unwrap_or(config.search.hits_per_page),
                city: args.city,
                hotel_type: args.hotel_type,
                price_min: args.price_min,
                price_max: args.price_max,
                query: args.query,
                use_demo: args.demo,
            };

            let service = SearchService::new(&config, Arc::clone(&catalog))?;
            log::debug!(
                "Searching {} data",
                if service.uses_live_data() && !params.use_demo { "live" } else { "demo" }
            );
            let page = service.search(&params).await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                console::header(&format!(
                    "Page {} of {} ({} hits, source: {})",
                    page.current_page + 1,
                    page.total_pages.max(1),
                    page.total_hits,
                    page.source
                ));
                page.listings.iter().for_each(print_listing);
            }
        }

        Command::Filter(args) => {
            let hotels = catalog.load().await?;
            let scored = matching::score_by_criteria(hotels, &args.into());

            console::header(&format!("{} listings match", scored.len()));
            for entry in &scored {
                console::sub_item(&format!(
                    "[{}] {}",
                    entry.total_score,
                    entry.hotel.format(HOTEL_LINE)
                ));
                if !entry.matched_criteria.is_empty() {
                    let matched = entry.matched_criteria.join(", ");
                    console::sub_item(&format!("    matched: {matched}"));
                }
            }
        }

        Command::Ask { query } => {
            let hotels = catalog.load().await?;
            let outcome = matching::search_by_query(&query, hotels);

            console::header(&format!("Results for \"{query}\""));
            if !outcome.criteria.understood.is_empty() {
                let understood = outcome.criteria.understood.join(", ");
                console::sub_item(&format!("understood: {understood}"));
                console::separator();
            }
            if outcome.results.is_empty() {
                console::sub_item("No listings matched; try a broader request.");
            }
            for ranked in &outcome.results {
                console::sub_item(&format!(
                    "[{}] {}",
                    ranked.relevance,
                    ranked.hotel.format(HOTEL_LINE)
                ));
                console::sub_item(&format!("    {}", ranked.matched_criteria.join(", ")));
            }
        }

        Command::Profile { description } => {
            let hotels = catalog.load().await?;
            let analysis = matching::analyze_investor_profile(&description, hotels);

            console::header("Recommended hotel types");
            for rec in &analysis.recommendations {
                console::sub_item(&format!(
                    "{} ({} risk, {}): {}",
                    rec.hotel_type, rec.risk_level, rec.expected_return, rec.description
                ));
            }

            console::header("Top matching listings");
            for property in &analysis.properties {
                console::sub_item(&format!(
                    "[{}] {}",
                    property.match_score,
                    property.hotel.format(HOTEL_LINE)
                ));
                console::sub_item(&format!("    {}", property.match_reasons.join(", ")));
            }
        }

        Command::Calc(args) => {
            if args.list_presets {
                console::header("Presets");
                for preset in &PRESETS {
                    console::sub_item(&format!(
                        "{}: {} SAR, {} rooms, ADR {}, {}% occupancy",
                        preset.name,
                        console::group_thousands(preset.budget),
                        preset.rooms,
                        preset.adr,
                        preset.occupancy_pct
                    ));
                }
                return Ok(());
            }

            let inputs = args.inputs()?;
            let result = calculator::calculate_roi(&inputs);

            console::summary(
                "ROI",
                &[
                    ("Annual revenue", console::group_thousands(result.annual_revenue)),
                    ("Management cost", console::group_thousands(result.management_cost)),
                    ("Capex", console::group_thousands(result.capex_cost)),
                    ("Net operating income", console::group_thousands(result.net_operating_income)),
                    ("Gross yield", percent(result.gross_yield_pct)),
                    ("Estimated IRR", percent(result.irr_pct)),
                    (
                        "Break-even",
                        result
                            .break_even_years
                            .map_or_else(|| "never".to_string(), |y| format!("{y:.1} years")),
                    ),
                ],
            );
        }

        Command::Info => {
            log::info!("Data directory: {}", cli.data_dir.display());
            log::info!("Demo dataset: {}", catalog.path().display());
            log::info!(
                "Live data: {}",
                if config.search.use_live_data { "on" } else { "off" }
            );

            let hotels = catalog.load_or_empty().await;
            console::summary(
                "Dataset",
                &[
                    ("Listings", hotels.len().to_string()),
                    ("Cities", unique_cities(hotels).join(", ")),
                    ("Hotel types", unique_hotel_types(hotels).join(", ")),
                ],
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            console::success("Config OK");

            let hotels = catalog.load().await?;
            if hotels.is_empty() {
                return Err(AppError::data_unavailable("dataset is empty"));
            }
            console::success(&format!("Dataset OK ({} listings)", hotels.len()));
        }
    }

    Ok(())
}
