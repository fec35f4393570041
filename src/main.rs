//! `feedview`: console demo of the feed view-model.
//!
//! Usage:
//!   feedview [--config <path>] [--page-size <n>] [--items <n>] [--seed <n>]
//!
//! Loads a generated feed, likes the first item, publishes two items,
//! refreshes and pages once, redrawing the feed on stdout after every
//! state change.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use feedview::config::Config;
use feedview::feed::FeedViewModel;
use feedview::logging::init_tracing;
use feedview::model::ItemKind;
use feedview::repository::MockRepository;
use feedview::view::{default_renderers, FeedView};

/// Feed view-model demo.
#[derive(Parser, Debug)]
#[command(name = "feedview", about = "Paginated social feed demo")]
struct Cli {
    /// Path to config file (defaults to the user config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Items per page (overrides config).
    #[arg(long = "page-size")]
    page_size: Option<usize>,

    /// Number of generated items (overrides config).
    #[arg(long = "items")]
    items: Option<usize>,

    /// Seed for generated items (overrides config).
    #[arg(long = "seed")]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading default config")?,
    };
    apply_overrides(&mut config, &cli);
    init_tracing(&config.logging).context("initializing logging")?;

    let seed = config.mock.seed.unwrap_or_else(rand::random);
    tracing::info!(items = config.mock.items, seed, page_size = config.feed.page_size, "Starting demo");

    let repository = Arc::new(MockRepository::generate(config.mock.items, seed));
    let view_model = Arc::new(FeedViewModel::from_config(repository, &config)?);
    let _view = FeedView::attach(&view_model, default_renderers(), io::stdout());

    run_demo(&view_model);
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(page_size) = cli.page_size {
        config.feed.page_size = page_size;
    }
    if let Some(items) = cli.items {
        config.mock.items = items;
    }
    if let Some(seed) = cli.seed {
        config.mock.seed = Some(seed);
    }
}

fn run_demo(view_model: &FeedViewModel) {
    report("initial load", view_model.load_initial());

    println!("\nSimulating user actions...");

    if let Some(first) = view_model.state().items.first().map(|item| item.id.clone()) {
        println!("\nLiking post {first}");
        report("like", view_model.like_item(&first));
    }

    println!("\nCreating a new text post...");
    report(
        "create text item",
        view_model.create_item("This is a new post created through the app!", ItemKind::Text, None),
    );

    println!("\nCreating a new image post...");
    report(
        "create image item",
        view_model.create_item(
            "Check out this beautiful sunset!",
            ItemKind::Image,
            Some("https://example.com/sunset.jpg".to_string()),
        ),
    );

    println!("\nRefreshing feed...");
    report("refresh", view_model.refresh());

    println!("\nLoading more posts...");
    report("load more", view_model.load_more());
}

fn report<T: std::fmt::Debug, E: std::fmt::Display>(step: &str, result: Result<T, E>) {
    match result {
        Ok(outcome) => tracing::debug!(step, ?outcome, "Demo step finished"),
        Err(err) => {
            tracing::warn!(step, error = %err, "Demo step failed");
            eprintln!("{step} failed: {err}");
        }
    }
}
