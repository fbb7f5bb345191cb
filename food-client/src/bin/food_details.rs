//! food-details - drive the Food Details screen from the command line
//!
//! Mounts the screen for one food, applies the requested edits and prints
//! the resulting view (or the submitted order) as JSON.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use food_client::{
    ClientConfig, FavoriteLookup, FoodApi, FoodDetailsScreen, FoodId, LogNavigator, ScreenOptions,
    ScreenPhase, logger,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "food-details", version, about = "Food Details screen over the food API")]
struct Cli {
    /// Food API base URL (overrides FOOD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// How to check favorite membership: list | direct
    #[arg(long)]
    favorite_lookup: Option<FavoriteLookup>,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long)]
    json_logs: bool,

    /// Directory for daily rotating log files
    #[arg(long, env = "FOOD_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a food and print the screen state
    Show { id: FoodId },
    /// Toggle the favorite flag of a food
    Favorite { id: FoodId },
    /// Place an order for a food
    Order {
        id: FoodId,
        /// Units of the base item
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Extra selection as ID=QTY, repeatable
        #[arg(long = "extra", value_parser = parse_extra)]
        extras: Vec<(i64, u32)>,
        /// Leave extras with quantity 0 out of the order
        #[arg(long)]
        omit_zero_extras: bool,
    },
}

impl Command {
    fn food_id(&self) -> FoodId {
        match self {
            Self::Show { id } | Self::Favorite { id } | Self::Order { id, .. } => *id,
        }
    }
}

fn parse_extra(raw: &str) -> Result<(i64, u32), String> {
    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{raw}'"))?;
    let id = id.trim().parse().map_err(|_| format!("invalid extra id '{id}'"))?;
    let qty = qty.trim().parse().map_err(|_| format!("invalid quantity '{qty}'"))?;
    Ok((id, qty))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_logger(&cli.log_level, cli.json_logs, cli.log_dir.as_deref())?;

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }

    let mut options = ScreenOptions::from_env()?;
    if let Some(lookup) = cli.favorite_lookup {
        options = options.with_favorite_lookup(lookup);
    }
    if let Command::Order {
        omit_zero_extras: true,
        ..
    } = cli.command
    {
        options = options.omit_zero_quantity_extras(true);
    }

    tracing::info!(base_url = %config.base_url, "Starting food-details");

    let api = FoodApi::new(config.build_http_client()?);
    let screen = FoodDetailsScreen::new(api, Arc::new(LogNavigator), options);

    let food_id = cli.command.food_id();
    screen.mount(food_id).wait().await;

    let view = screen.view().context("screen was unmounted while loading")?;
    if view.phase == ScreenPhase::LoadFailed {
        for notice in &view.notices {
            tracing::error!(operation = ?notice.operation, kind = notice.kind.name(), "{}", notice.message);
        }
        bail!("could not load food {food_id}");
    }

    let output = match cli.command {
        Command::Show { .. } => serde_json::to_string_pretty(&view)?,
        Command::Favorite { .. } => {
            let is_favorite = screen.toggle_favorite().await?;
            serde_json::to_string_pretty(&serde_json::json!({
                "id": food_id,
                "is_favorite": is_favorite,
            }))?
        }
        Command::Order {
            quantity, extras, ..
        } => {
            for _ in 1..quantity {
                if !screen.increment_food()? {
                    tracing::warn!(quantity, "Base quantity capped");
                    break;
                }
            }
            for (extra_id, qty) in extras {
                for _ in 0..qty {
                    if !screen.increment_extra(extra_id)? {
                        tracing::warn!(extra_id, "Extra unknown or capped, skipping");
                        break;
                    }
                }
            }
            let order = screen.finish_order().await?;
            serde_json::to_string_pretty(&order)?
        }
    };

    println!("{output}");
    screen.unmount();
    Ok(())
}
