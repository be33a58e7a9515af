//! Crossdeck CLI — inspect and update intersection-card decks.
//!
//! Usage:
//!   crossdeck cards [--type conflict] [--product payments] [--only-cross]
//!                   [--min-score 50] [--search q] [--json]
//!   crossdeck scenarios [--type ...] [--category ...] [--search q]
//!   crossdeck summary
//!   crossdeck show <task_id>
//!   crossdeck update [--tasks f.csv] [--cards f.csv] [--scenarios f.csv]

use clap::{Parser, Subcommand};
use crossdeck::{CardFilter, CardType, DeckApi, ScenarioCard, ScenarioFilter, TableKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "crossdeck",
    version,
    about = "Ranking and filtering for cross-product task intersection cards"
)]
struct Cli {
    /// Directory containing tasks.csv, cards.csv and scenario_cards.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cards, highest priority first
    Cards {
        /// Card types to include (conflict, duplicate, synergy); repeatable
        #[arg(long = "type")]
        types: Vec<CardType>,
        /// Products to include; a card passes when either side matches
        #[arg(long = "product")]
        products: Vec<String>,
        /// Keep only cards whose tasks belong to different products
        #[arg(long)]
        only_cross: bool,
        /// Minimum score for duplicate/synergy cards
        #[arg(long)]
        min_score: Option<i64>,
        /// Case-insensitive search over task ids and signals
        #[arg(long)]
        search: Option<String>,
        /// Maximum number of cards to print
        #[arg(long, default_value_t = 60)]
        limit: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List scenario cards, most urgent first
    Scenarios {
        /// Card types to include; repeatable
        #[arg(long = "type")]
        types: Vec<CardType>,
        /// Categories to include; repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Case-insensitive search over titles and plain text
        #[arg(long)]
        search: Option<String>,
        /// Also match the search query against categories
        #[arg(long)]
        search_category: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Headline conflict, duplicate and synergy plus deck counts
    Summary {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print one task row as JSON
    Show {
        /// Task identifier
        task_id: String,
    },
    /// Replace backing tables wholesale from new CSV files
    Update {
        /// New tasks table
        #[arg(long)]
        tasks: Option<PathBuf>,
        /// New cards table
        #[arg(long)]
        cards: Option<PathBuf>,
        /// New scenario cards table
        #[arg(long)]
        scenarios: Option<PathBuf>,
    },
}

/// Default data directory: ./data when present, otherwise a per-user one.
fn default_data_dir() -> PathBuf {
    let local = PathBuf::from("data");
    if local.is_dir() {
        return local;
    }
    dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"))
        .join("crossdeck")
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_scenario(scen: &ScenarioCard) {
    println!(
        "[{}][{}] {}  ·  sources: {}",
        scen.card_type.to_string().to_uppercase(),
        scen.urgency,
        scen.title,
        scen.source
    );
    if !scen.plain_text.is_empty() {
        println!("    {}", scen.plain_text);
    }
}

fn cmd_cards(api: &DeckApi, filter: CardFilter, json: bool) -> i32 {
    let result = match api.filter_cards(&filter) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if json {
        return print_json(&result);
    }
    println!("Found {} cards", result.total_count);
    for card in &result.cards {
        println!(
            "[{}] {} <-> {}  ·  signals: {}  ·  score: {}",
            card.card_type.to_string().to_uppercase(),
            card.a_id,
            card.b_id,
            card.signals,
            card.score.as_deref().unwrap_or("-")
        );
        if let Ok(Some(scen)) = api.correlate(card) {
            println!("    {}", scen.plain_text);
        }
    }
    0
}

fn cmd_scenarios(api: &DeckApi, filter: ScenarioFilter, json: bool) -> i32 {
    let result = match api.filter_scenarios(&filter) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if json {
        return print_json(&result);
    }
    if result.total_count == 0 {
        println!("No scenario cards.");
        return 0;
    }
    println!("Found {} scenario cards", result.total_count);
    for scen in &result.scenarios {
        print_scenario(scen);
    }
    0
}

fn cmd_summary(api: &DeckApi, json: bool) -> i32 {
    let deck = match api.deck() {
        Ok(deck) => deck,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let summary = match api.summary() {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if json {
        return print_json(&summary);
    }
    println!(
        "Deck '{}': {} tasks, {} cards, {} scenario cards",
        deck.id,
        deck.task_count(),
        deck.card_count(),
        deck.scenario_count()
    );
    println!("Products: {}", deck.products().join(", "));
    if summary.is_empty() {
        println!("No headline scenarios.");
        return 0;
    }
    for (label, tile) in [
        ("Conflict", &summary.conflict),
        ("Duplicate", &summary.duplicate),
        ("Synergy", &summary.synergy),
    ] {
        if let Some(scen) = tile {
            println!("--- {} ---", label);
            print_scenario(scen);
        }
    }
    0
}

fn cmd_show(api: &DeckApi, task_id: &str) -> i32 {
    let deck = match api.deck() {
        Ok(deck) => deck,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match deck.task(task_id) {
        Some(task) => print_json(task),
        None => {
            eprintln!("Error: task '{}' not found", task_id);
            1
        }
    }
}

fn cmd_update(
    api: &DeckApi,
    uploads: &[(TableKind, Option<PathBuf>)],
) -> i32 {
    let mut applied = 0;
    for (table, path) in uploads {
        let Some(path) = path else { continue };
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path.display(), e);
                return 1;
            }
        };
        match api.replace_table(*table, &data) {
            Ok(written) => {
                println!("Updated {} table at {}", table, written.display());
                applied += 1;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    }
    if applied == 0 {
        eprintln!("Nothing to update: pass --tasks, --cards and/or --scenarios");
        return 1;
    }
    0
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let api = DeckApi::open(&data_dir);

    let code = match cli.command {
        Commands::Cards {
            types,
            products,
            only_cross,
            min_score,
            search,
            limit,
            json,
        } => {
            let mut filter = CardFilter::new().limit(limit);
            if !types.is_empty() {
                filter = filter.with_types(types);
            }
            if !products.is_empty() {
                filter = filter.with_products(products);
            }
            if only_cross {
                filter = filter.only_cross();
            }
            if let Some(min_score) = min_score {
                filter = filter.min_score(min_score);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }
            cmd_cards(&api, filter, json)
        }
        Commands::Scenarios {
            types,
            categories,
            search,
            search_category,
            json,
        } => {
            let mut filter = ScenarioFilter::new();
            if !types.is_empty() {
                filter = filter.with_types(types);
            }
            if !categories.is_empty() {
                filter = filter.with_categories(categories);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }
            if search_category {
                filter = filter.match_category();
            }
            cmd_scenarios(&api, filter, json)
        }
        Commands::Summary { json } => cmd_summary(&api, json),
        Commands::Show { task_id } => cmd_show(&api, &task_id),
        Commands::Update {
            tasks,
            cards,
            scenarios,
        } => cmd_update(
            &api,
            &[
                (TableKind::Tasks, tasks),
                (TableKind::Cards, cards),
                (TableKind::Scenarios, scenarios),
            ],
        ),
    };
    std::process::exit(code);
}
