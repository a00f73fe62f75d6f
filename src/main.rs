//! Demo CLI for the Localist engine.
//!
//! A thin presentation shim: it wires the engine to stdin commands and
//! prints the filtered view as plain text. All real behavior lives in the
//! library; nothing here touches cursors, epochs, or caching directly.
//!
//! Commands:
//!
//! ```text
//! reset             reload the list from the start
//! more              fetch the next page
//! search <term>     set the free-text search term
//! clear             clear the search term
//! fav <id>          toggle an item as favourite
//! only              toggle favourites-only view
//! show              reprint the current view
//! quit              exit
//! ```

use localist::{
    compute_view, infrastructure, observability, Config, FavouritesStore, HttpDataSource,
    JsonSettings, ListSnapshot, LoadController, LoadPhase,
};
use tokio::io::{AsyncBufReadExt, BufReader};

fn load_config() -> Config {
    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    match path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            eprintln!("failed to load config {}: {e}", path.display());
            std::process::exit(2);
        }),
        None => Config::default(),
    }
}

fn render(
    snapshot: &ListSnapshot,
    search_term: &str,
    favourites_only: bool,
    favourites: &std::collections::HashSet<String>,
) {
    match &snapshot.phase {
        LoadPhase::Idle => println!("(idle; run `reset` to load)"),
        LoadPhase::Loading => println!("Loading local data..."),
        LoadPhase::LoadingMore => println!("Loading more..."),
        LoadPhase::Ready => {}
        LoadPhase::Error { message } => {
            if snapshot.items.is_empty() {
                println!("Error: {message}");
                return;
            }
            println!("(transient) Error: {message}");
        }
    }

    let view = compute_view(&snapshot.items, search_term, favourites_only, favourites);
    if view.is_empty() {
        println!("No local items found.");
    }
    for item in &view {
        let star = if favourites.contains(&item.id) { "*" } else { " " };
        println!("{star} {} ({}): {}", item.name, item.category, item.description);
    }
    if snapshot.has_more() {
        println!("  ... more available (`more`)");
    }
}

#[tokio::main]
async fn main() {
    let config = load_config();
    observability::init_tracing(&config);
    tracing::debug!(?config, "starting localist demo");

    let settings_path = infrastructure::settings_file(&config.resolved_data_dir());
    let favourites = match JsonSettings::new(settings_path) {
        Ok(backend) => FavouritesStore::new(backend),
        Err(e) => {
            eprintln!("failed to open settings: {e}");
            std::process::exit(2);
        }
    };
    favourites.subscribe(|favs| {
        println!("(favourites changed elsewhere: {} ids)", favs.len());
    });

    let source = HttpDataSource::new(config.api_base_url.clone());
    let controller = LoadController::new(source, config.page_size);

    let mut search_term = String::new();
    let mut favourites_only = false;

    controller.reset().await;
    favourites.sync_external();
    render(
        &controller.snapshot(),
        &search_term,
        favourites_only,
        &favourites.read(),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        let (command, argument) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "q" => break,
            "reset" => controller.reset().await,
            "more" => controller.load_more().await,
            "search" => search_term = argument.to_string(),
            "clear" => search_term.clear(),
            "only" => favourites_only = !favourites_only,
            "fav" => {
                if argument.is_empty() {
                    println!("usage: fav <id>");
                } else {
                    match favourites.toggle(argument) {
                        Ok(true) => println!("added favourite {argument}"),
                        Ok(false) => println!("removed favourite {argument}"),
                        Err(e) => eprintln!("favourite toggle failed: {e}"),
                    }
                }
            }
            "show" | "" => {}
            other => {
                println!("unknown command: {other}");
                continue;
            }
        }

        favourites.sync_external();
        render(
            &controller.snapshot(),
            &search_term,
            favourites_only,
            &favourites.read(),
        );
    }
}
