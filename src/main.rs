use clap::{ArgAction, Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use realty_engine::application::listings::ListingService;
use realty_engine::application::session::SessionStore;
use realty_engine::config::{DEFAULT_WHATSAPP_PHONE, Settings, WHATSAPP_PHONE_ENV};
use realty_engine::domain::amortization::{
    AmortizationInput, MAX_TERM_YEARS, MIN_TERM_YEARS, compute,
};
use realty_engine::domain::lead::{LeadMessage, whatsapp_link};
use realty_engine::domain::money::Money;
use realty_engine::domain::ports::KeyValueStoreBox;
use realty_engine::domain::property::{LocationKey, PropertyType};
use realty_engine::domain::query::{AreaRange, BedroomFilter, FilterPatch, PriceRange, SortKey};
use realty_engine::error::RealtyError;
use realty_engine::infrastructure::in_memory::InMemoryKeyValueStore;
use realty_engine::infrastructure::json_file::JsonFileStore;
#[cfg(feature = "storage-rocksdb")]
use realty_engine::infrastructure::rocksdb::RocksDBStore;
use realty_engine::interfaces::csv::listing_writer::ListingWriter;
use realty_engine::interfaces::csv::property_reader::PropertyReader;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file keeping favorites and comparison between runs (in-memory when omitted)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Listings CSV file; the built-in sample catalog is used when omitted
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// WhatsApp number leads are sent to
    #[arg(long, global = true, env = WHATSAPP_PHONE_ENV, default_value = DEFAULT_WHATSAPP_PHONE)]
    phone: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a fixed-rate financing
    Finance(FinanceArgs),
    /// Filter and sort the catalog, printing matches as CSV
    Search(SearchArgs),
    /// Manage favorite listings
    Favorites {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Manage the comparison list (at most three listings)
    Compare {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Print a WhatsApp link with a prefilled message
    Contact(ContactArgs),
}

#[derive(Args)]
struct FinanceArgs {
    /// Property value in reais
    #[arg(long, default_value = "500000")]
    value: Decimal,

    /// Down payment in reais
    #[arg(long, default_value = "100000")]
    down: Decimal,

    /// Term in years
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(i64::from(MIN_TERM_YEARS)..=i64::from(MAX_TERM_YEARS)))]
    years: u32,

    /// Annual interest rate in percent
    #[arg(long, default_value = "8.5")]
    rate: Decimal,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Region key, e.g. praia-bela
    #[arg(long)]
    location: Option<LocationKey>,

    /// casa, apartamento, cobertura or studio
    #[arg(long = "type")]
    property_type: Option<PropertyType>,

    /// ate-500k, 500k-1m or acima-1m
    #[arg(long)]
    price: Option<PriceRange>,

    /// 1, 2, 3 or 4 (four or more)
    #[arg(long)]
    bedrooms: Option<BedroomFilter>,

    #[arg(long)]
    min_area: Option<Decimal>,

    #[arg(long)]
    max_area: Option<Decimal>,

    /// Drop the default area range
    #[arg(long, conflicts_with_all = ["min_area", "max_area"])]
    any_area: bool,

    #[arg(long)]
    garage: bool,

    #[arg(long)]
    pool: bool,

    #[arg(long)]
    furnished: bool,

    #[arg(long)]
    balcony: bool,

    /// featured, price-asc, price-desc, area-desc or newest
    #[arg(long, default_value = "featured")]
    sort: SortKey,
}

#[derive(Subcommand)]
enum ListAction {
    /// Print the listings in the list as CSV
    List,
    Add { id: u32 },
    Remove { id: u32 },
    /// Add when absent, remove when present
    Toggle { id: u32 },
    Clear,
}

#[derive(Args)]
struct ContactArgs {
    /// Listing the visitor is interested in
    #[arg(long, conflicts_with = "message")]
    property: Option<u32>,

    /// Free-form message
    #[arg(long)]
    message: Option<String>,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn open_store(cli: &Cli) -> realty_engine::error::Result<KeyValueStoreBox> {
    if let Some(db_path) = &cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            return Ok(Box::new(RocksDBStore::open(db_path)?));
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        {
            tracing::warn!(
                path = %db_path.display(),
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
        }
    }

    if let Some(path) = &cli.store {
        return Ok(Box::new(JsonFileStore::open(path).await?));
    }
    Ok(Box::new(InMemoryKeyValueStore::new()))
}

fn load_listings(path: Option<&Path>) -> realty_engine::error::Result<ListingService> {
    let Some(path) = path else {
        return Ok(ListingService::with_sample_catalog());
    };

    let file = File::open(path)?;
    let mut properties = Vec::new();
    for property in PropertyReader::new(file).properties() {
        match property {
            Ok(property) => properties.push(property),
            Err(e) => {
                eprintln!("Error reading property: {}", e);
            }
        }
    }
    ListingService::new(properties)
}

fn search_patch(args: &SearchArgs, settings: &Settings) -> realty_engine::error::Result<FilterPatch> {
    let area = if args.any_area {
        Some(None)
    } else if args.min_area.is_some() || args.max_area.is_some() {
        let min = args.min_area.unwrap_or(settings.default_area.min());
        let max = args.max_area.unwrap_or(settings.default_area.max());
        Some(Some(AreaRange::new(min, max)?))
    } else {
        None
    };

    Ok(FilterPatch {
        location: args.location.clone().map(Some),
        property_type: args.property_type.map(Some),
        price_range: args.price.map(Some),
        bedrooms: args.bedrooms.map(Some),
        area,
        garage: Some(args.garage),
        pool: Some(args.pool),
        furnished: Some(args.furnished),
        balcony: Some(args.balcony),
    })
}

fn run_finance(args: &FinanceArgs) -> Result<()> {
    let input = AmortizationInput::new(
        Money::new(args.value),
        Money::new(args.down),
        args.years,
        args.rate,
    )
    .into_diagnostic()?;
    let result = compute(&input).into_diagnostic()?;

    if args.json {
        let json = serde_json::json!({
            "input": input,
            "result": result,
            "breakdown": result.breakdown(),
        });
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        return Ok(());
    }

    let breakdown = result.breakdown();
    println!("Financed amount: {}", result.financed_amount);
    println!("Monthly payment: {}", result.monthly_payment);
    println!("Payments: {}", input.num_payments());
    println!("Total paid: {}", result.total_paid);
    println!("Total interest: {}", result.total_interest);
    println!(
        "Breakdown: down payment {:.1}% | financed {:.1}% | interest {:.1}%",
        breakdown.down_payment.round_dp(1),
        breakdown.financed.round_dp(1),
        breakdown.interest.round_dp(1)
    );
    Ok(())
}

async fn run_list_action(
    action: &ListAction,
    session: &SessionStore,
    listings: &ListingService,
    comparison: bool,
) -> Result<()> {
    let known = |id: u32| -> Result<()> {
        if listings.get(id).is_none() {
            return Err(RealtyError::validation(format!("Unknown property id {id}")))
                .into_diagnostic();
        }
        Ok(())
    };

    match action {
        ListAction::List => {
            let ids = if comparison {
                session.comparison().await
            } else {
                session.favorites().await
            }
            .into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = ListingWriter::new(stdout.lock());
            writer
                .write_listings(listings.resolve(&ids).iter())
                .into_diagnostic()?;
        }
        ListAction::Add { id } => {
            known(*id)?;
            let added = if comparison {
                session.add_to_comparison(*id).await
            } else {
                session.add_favorite(*id).await
            }
            .into_diagnostic()?;
            if added {
                println!("Added {id}");
            } else {
                println!("Unchanged {id}");
            }
        }
        ListAction::Remove { id } => {
            let removed = if comparison {
                session.remove_from_comparison(*id).await
            } else {
                session.remove_favorite(*id).await
            }
            .into_diagnostic()?;
            if removed {
                println!("Removed {id}");
            } else {
                println!("Unchanged {id}");
            }
        }
        ListAction::Toggle { id } => {
            known(*id)?;
            let outcome = if comparison {
                if session.remove_from_comparison(*id).await.into_diagnostic()? {
                    "Removed"
                } else if session.add_to_comparison(*id).await.into_diagnostic()? {
                    "Added"
                } else {
                    "Unchanged"
                }
            } else if session.toggle_favorite(*id).await.into_diagnostic()? {
                "Added"
            } else {
                "Removed"
            };
            println!("{outcome} {id}");
        }
        ListAction::Clear => {
            if comparison {
                session.clear_comparison().await.into_diagnostic()?;
            } else {
                for id in session.favorites().await.into_diagnostic()? {
                    session.remove_favorite(id).await.into_diagnostic()?;
                }
            }
            println!("Cleared");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::new(cli.phone.clone()).into_diagnostic()?;

    match &cli.command {
        Command::Finance(args) => run_finance(args)?,
        Command::Search(args) => {
            let listings = load_listings(cli.catalog.as_deref()).into_diagnostic()?;
            let store = open_store(&cli).await.into_diagnostic()?;
            let mut session = settings.session(store);
            session.set_filters(search_patch(args, &settings).into_diagnostic()?);

            let results = listings.search(session.filters(), args.sort);
            let stdout = io::stdout();
            let mut writer = ListingWriter::new(stdout.lock());
            writer.write_listings(results.iter()).into_diagnostic()?;
        }
        Command::Favorites { action } | Command::Compare { action } => {
            let comparison = matches!(cli.command, Command::Compare { .. });
            let listings = load_listings(cli.catalog.as_deref()).into_diagnostic()?;
            let store = open_store(&cli).await.into_diagnostic()?;
            let session = settings.session(store);
            run_list_action(action, &session, &listings, comparison).await?;
        }
        Command::Contact(args) => {
            let message = match (&args.property, &args.message) {
                (Some(id), _) => {
                    let listings = load_listings(cli.catalog.as_deref()).into_diagnostic()?;
                    let property = listings
                        .get(*id)
                        .ok_or_else(|| RealtyError::validation(format!("Unknown property id {id}")))
                        .into_diagnostic()?;
                    LeadMessage::for_property(property)
                }
                (None, Some(text)) => LeadMessage::Custom(text.clone()),
                (None, None) => LeadMessage::General,
            };
            let link = whatsapp_link(&settings.whatsapp_phone, &message).into_diagnostic()?;
            println!("{link}");
        }
    }

    Ok(())
}
