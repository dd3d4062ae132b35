use std::path::PathBuf;
use std::time::Duration;

use bike_inventory::client::api::ApiClient;
use bike_inventory::client::capture::{scan_until_found, BarcodeFrameDecoder, HttpCamera};
use bike_inventory::client::config::ClientSettings;
use bike_inventory::client::decode::DecodeOutcome;
use bike_inventory::client::error::ClientError;
use bike_inventory::client::inventory::InventoryView;
use bike_inventory::client::scanner::{ItemDraft, CATEGORIES};
use bike_inventory::client::upload::check_upload;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inventory-cli")]
#[command(about = "Bike parts inventory client")]
struct Cli {
    /// API base URL; falls back to the API_URL environment variable.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List inventory items, optionally filtered.
    List {
        /// Substring matched against title and gtin.
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category to restrict to.
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Look one item up by its exact gtin.
    Show { gtin: String },
    /// Add an item, reading the gtin from an attached photo unless given.
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(CATEGORIES.iter().copied()))]
        category: String,
        #[arg(long)]
        gtin: Option<String>,
        /// Photo to decode and upload.
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Scan a live camera until a barcode decodes, then add the item.
    Scan {
        /// Snapshot URL of the camera to poll.
        #[arg(long)]
        camera_url: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(CATEGORIES.iter().copied()))]
        category: String,
        /// Delay between camera polls, in milliseconds.
        #[arg(long, default_value_t = 500)]
        poll_ms: u64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bike_inventory=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let settings = ClientSettings::new();
    let api = ApiClient::new(cli.api_url.unwrap_or(settings.api_url));

    if let Err(err) = run(cli.command, &api).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(command: Commands, api: &ApiClient) -> Result<(), ClientError> {
    match command {
        Commands::List { search, category } => {
            let mut view = InventoryView::new();
            view.refresh(api, &search, &category).await?;
            print!("{}", view.render(api));
        }
        Commands::Show { gtin } => match api.item_by_gtin(&gtin).await {
            Ok(item) => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&item).expect("serializable item")
                );
            }
            Err(ClientError::NotFound) => println!("Not found"),
            Err(err) => return Err(err),
        },
        Commands::Add {
            title,
            category,
            gtin,
            image,
        } => {
            let mut draft = ItemDraft {
                title,
                gtin: gtin.unwrap_or_default(),
                category,
                image: None,
            };

            if let Some(path) = image {
                // Show the preview the way the browser form would.
                match image::image_dimensions(&path) {
                    Ok((width, height)) => {
                        println!("Preview: {} ({}x{})", path.display(), width, height)
                    }
                    Err(_) => println!("Preview: {}", path.display()),
                }

                if draft.gtin.is_empty() {
                    match draft.attach_image(&path)? {
                        DecodeOutcome::Found(decoded) => {
                            info!(gtin = %draft.gtin, symbology = %decoded.symbology, "barcode decoded");
                        }
                        DecodeOutcome::NotFound => {
                            warn!("No barcode found in image; submitting without a gtin");
                        }
                    }
                } else {
                    // An explicit gtin wins; the photo is still uploaded.
                    check_upload(&path)?;
                    draft.image = Some(path);
                }
            }

            let created = draft.submit(api).await?;
            println!("Added! ID: {}", created.id);
        }
        Commands::Scan {
            camera_url,
            title,
            category,
            poll_ms,
        } => {
            let mut camera = HttpCamera::new(camera_url, Duration::from_millis(poll_ms));
            let (cancel_tx, cancel_rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    let _ = cancel_tx.send(true);
                }
            });

            println!("Scanning... press ctrl-c to cancel");
            match scan_until_found(&mut camera, &BarcodeFrameDecoder, cancel_rx).await? {
                Some(decoded) => {
                    println!("Decoded {} ({})", decoded.text, decoded.symbology);
                    let draft = ItemDraft {
                        title,
                        gtin: decoded.text,
                        category,
                        image: None,
                    };
                    let created = draft.submit(api).await?;
                    println!("Added! ID: {}", created.id);
                }
                None => println!("Scan canceled"),
            }
        }
    }

    Ok(())
}
