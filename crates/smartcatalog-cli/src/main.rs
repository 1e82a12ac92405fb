mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use smartcatalog_core::api::{HttpBackend, SearchQuery};
use smartcatalog_core::config::ClientConfig;
use smartcatalog_core::notice::Notice;
use smartcatalog_core::{Facet, FilterState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "smartcatalog",
    version,
    about = "Search, filter and match products extracted from PDF catalogs"
)]
struct Cli {
    /// Backend base URL (overrides SMARTCATALOG_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// PDF storage base URL used for page links (overrides SMARTCATALOG_STORAGE_URL)
    #[arg(long, global = true, value_name = "URL")]
    storage_url: Option<String>,

    /// Log requests and state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and optionally filter the hits
    Search {
        query: String,

        /// Restrict the backend search to a category
        #[arg(long)]
        category: Option<String>,

        /// Minimum price
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Maximum price
        #[arg(long)]
        max_price: Option<Decimal>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List every product in the catalog, optionally filtered
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show the values available for each filter
    Facets {
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show a single product
    Product {
        id: i64,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Delete every product from the catalog
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Upload a catalog PDF for extraction
    Upload { pdf_file: PathBuf },
    /// Import pre-extracted products from a JSON file
    ImportJson { json_file: PathBuf },
    /// Match a Bill of Quantities against the catalog
    Boq {
        /// Items, one "name, brand, type" per line
        #[arg(long, conflicts_with_all = ["file", "document"])]
        text: Option<String>,

        /// Text file with one "name, brand, type" per line
        #[arg(long, value_name = "FILE", conflicts_with = "document")]
        file: Option<PathBuf>,

        /// BOQ document sent as-is to the backend
        #[arg(long, value_name = "FILE")]
        document: Option<PathBuf>,

        /// Choose a candidate for a line item, as ROW=PRODUCT_ID (rows start at 1)
        #[arg(long = "select", value_name = "ROW=ID")]
        selections: Vec<String>,

        /// Preselect the first candidate for every matched item
        #[arg(long)]
        preselect: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

/// Facet filters applied to the fetched products.
#[derive(Args, Default)]
struct FilterArgs {
    /// Keep products of this brand (repeatable)
    #[arg(long = "brand", value_name = "NAME")]
    brands: Vec<String>,

    /// Keep products by this designer (repeatable)
    #[arg(long = "designer", value_name = "NAME")]
    designers: Vec<String>,

    /// Keep products of this type (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Keep products available in this color (repeatable)
    #[arg(long = "color", value_name = "COLOR")]
    colors: Vec<String>,

    /// Keep products from this source PDF path (repeatable)
    #[arg(long = "pdf", value_name = "PATH")]
    pdfs: Vec<String>,
}

impl FilterArgs {
    fn into_state(self) -> FilterState {
        FilterState::default()
            .with(Facet::Brand, self.brands)
            .with(Facet::Designer, self.designers)
            .with(Facet::Type, self.types)
            .with(Facet::Color, self.colors)
            .with(Facet::Pdf, self.pdfs)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "smartcatalog_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn run(cli: Cli) -> Result<(), Notice> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(url) = cli.storage_url {
        config = config.with_storage_url(url);
    }
    let backend =
        HttpBackend::new(config).map_err(commands::failed("Failed to create HTTP client"))?;

    match cli.command {
        Commands::Search {
            query,
            category,
            min_price,
            max_price,
            filters,
            output,
        } => {
            let query = SearchQuery {
                query,
                category,
                min_price,
                max_price,
            };
            commands::library::search(&backend, &query, filters.into_state(), &output)
        }
        Commands::List { filters, output } => {
            commands::library::list(&backend, filters.into_state(), &output)
        }
        Commands::Facets { output } => commands::library::facets(&backend, &output),
        Commands::Product { id, output } => commands::library::product(&backend, id, &output),
        Commands::Clear { yes } => commands::library::clear(&backend, yes),
        Commands::Upload { pdf_file } => commands::upload::pdf(&backend, &pdf_file),
        Commands::ImportJson { json_file } => commands::upload::json(&backend, &json_file),
        Commands::Boq {
            text,
            file,
            document,
            selections,
            preselect,
            output,
        } => {
            let input = commands::boq::BoqInput::from_args(text, file, document)?;
            commands::boq::run(&backend, input, &selections, preselect, &output)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(notice) = run(cli) {
        eprintln!("{notice}");
        std::process::exit(1);
    }
}
