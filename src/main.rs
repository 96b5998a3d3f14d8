use std::env;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stockroom::cli::{
    handle_activity_command, handle_dashboard_command, handle_export_command,
    handle_product_command,
};
use stockroom::config::{paths::StockroomPaths, settings::Settings, user::CurrentUser};
use stockroom::models::UserId;
use stockroom::storage::{seed_demo_products, Storage, DEFAULT_SEED_COUNT};

#[derive(Parser)]
#[command(
    name = "stockroom",
    version,
    about = "Terminal-based inventory manager with an audited change history",
    long_about = "Stockroom keeps track of products, their prices and stock levels. \
                  Every change is recorded in an activity log that shows exactly \
                  which fields changed, and from what to what."
)]
struct Cli {
    /// Act as this user ID instead of the configured one
    #[arg(long, global = true, env = "STOCKROOM_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Stockroom and create the local user
    Init {
        /// Display name of the user
        #[arg(long)]
        user_name: Option<String>,
    },

    /// Show current configuration and paths
    Config,

    /// Fill the inventory with demo products
    Seed {
        /// Number of products to create
        #[arg(short, long, default_value_t = DEFAULT_SEED_COUNT)]
        count: usize,
    },

    /// Product management commands
    #[command(subcommand)]
    Product(stockroom::cli::ProductCommands),

    /// Activity log commands
    #[command(subcommand, alias = "log")]
    Activity(stockroom::cli::ActivityCommands),

    /// Show the inventory dashboard
    #[command(alias = "dash")]
    Dashboard,

    /// Export products and activity
    Export(stockroom::cli::ExportArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STOCKROOM_LOG")
        .unwrap_or_else(|_| EnvFilter::new("stockroom=warn"));

    let format = env::var("STOCKROOM_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = StockroomPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let resolve_user = |settings: &Settings| CurrentUser::resolve(settings, cli.user.as_deref());

    match cli.command {
        Some(Commands::Init { user_name }) => {
            println!("Initializing Stockroom at: {}", paths.base_dir().display());

            if let Some(name) = user_name {
                settings.user_name = name;
            }
            let user_id = *settings.user_id.get_or_insert_with(UserId::new);
            settings.save(&paths)?;
            storage.save_all()?;

            println!("Initialization complete!");
            println!();
            println!("  User: {}", settings.user_name);
            println!("  ID:   {}", user_id.to_full_string());
            println!();
            println!("Run 'stockroom product add' to add your first product,");
            println!("or 'stockroom seed' to load demo data.");
        }
        Some(Commands::Config) => {
            println!("Stockroom Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Products file:   {}", paths.products_file().display());
            println!("Activity log:    {}", paths.activity_log().display());
            println!(
                "Initialized:     {}",
                if storage.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            match settings.user_id {
                Some(id) => println!("  User:                {} ({})", settings.user_name, id),
                None => println!("  User:                (not initialized)"),
            }
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Inventory page size: {}", settings.inventory_page_size);
            println!("  Activity page size:  {}", settings.activity_page_size);
            println!("  Date format:         {}", settings.date_format);
        }
        Some(Commands::Seed { count }) => {
            let user = resolve_user(&settings)?;
            let products = seed_demo_products(&storage, user.id, count, Utc::now())?;
            println!("Created {} demo products.", products.len());
        }
        Some(Commands::Product(cmd)) => {
            let user = resolve_user(&settings)?;
            handle_product_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Activity(cmd)) => {
            let user = resolve_user(&settings)?;
            handle_activity_command(&storage, &settings, &user, cmd)?;
        }
        Some(Commands::Dashboard) => {
            let user = resolve_user(&settings)?;
            handle_dashboard_command(&storage, &user)?;
        }
        Some(Commands::Export(args)) => {
            let user = resolve_user(&settings)?;
            handle_export_command(&storage, &user, args)?;
        }
        None => {
            println!("Stockroom - Terminal-based inventory management");
            println!();
            println!("Run 'stockroom --help' for usage information.");
            println!("Run 'stockroom init' to get started.");
        }
    }

    Ok(())
}
