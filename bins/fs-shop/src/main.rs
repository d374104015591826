//! fs-shop: CLI tool for matching recipe ingredients to catalog products.

mod output;

use clap::{ArgAction, Parser, Subcommand};
use foodshare_core::config::Config;
use foodshare_core::error::exit_codes;
use foodshare_shopping::ProductSearch;
use foodshare_telemetry::TelemetryConfig;
use output::{format_count, format_price, print_product, Status};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fs-shop")]
#[command(about = "Match recipe ingredients to grocery catalog products")]
#[command(version)]
struct Cli {
    /// Path to a .foodshare-shopping.toml configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Products JSON file (overrides catalog.path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Minimum match score, 0-100 (overrides matching.threshold)
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a shopping list from ingredient lines
    Search {
        /// Ingredient lines, e.g. "200 g tomate maduro"
        #[arg(required_unless_present = "stdin")]
        ingredients: Vec<String>,
        /// Read a JSON array of ingredient lines from stdin
        #[arg(long)]
        stdin: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Print collected metrics to stderr
        #[arg(long)]
        metrics: bool,
    },
    /// Show how a single ingredient is normalized and matched
    Match {
        /// Ingredient line
        ingredient: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show catalog snapshot statistics
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    foodshare_telemetry::init_with_config(TelemetryConfig::with_verbosity(cli.verbose))?;

    let mut schema = match Config::load(cli.config.as_deref()) {
        Ok(config) => config.schema,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };
    if let Some(path) = cli.catalog {
        schema.catalog.path = path.display().to_string();
    }
    if let Some(threshold) = cli.threshold {
        schema.matching.threshold = threshold;
    }

    let search = match ProductSearch::from_config(&schema) {
        Ok(search) => search,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    let snapshot = search.store().current();
    if snapshot.is_empty() {
        Status::warning(&format!(
            "Catalog {} is empty or missing; every ingredient will be reported as not found",
            snapshot.source()
        ));
    }

    match cli.command {
        Commands::Search { ingredients, stdin, json, metrics } => {
            let results = if stdin {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                match search.search_json(&input) {
                    Ok(results) => results,
                    Err(e) => {
                        Status::error(&e.to_string());
                        std::process::exit(exit_codes::VALIDATION_ERROR);
                    }
                }
            } else {
                search.search(&ingredients)
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                let count = format_count(results.len(), "product", "products");
                Status::header(&format!("Shopping list ({})", count));
                for product in &results {
                    print_product(product, &schema.output.not_found_marker);
                }
                let total: f64 = results.iter().map(|p| p.price).sum();
                println!("\nTotal: {}", format_price(total));
            }

            if metrics {
                let exported = foodshare_telemetry::metrics().export_json();
                eprintln!("{}", serde_json::to_string_pretty(&exported)?);
            }
        }

        Commands::Match { ingredient, json } => {
            let lookup = search.lookup(&ingredient);
            if json {
                println!("{}", serde_json::to_string_pretty(&lookup)?);
            } else {
                println!("Ingredient: {}", lookup.ingredient);
                println!("Query:      {}", lookup.query);
                println!("Score:      {:.1} (threshold {:.1})", lookup.score, search.threshold());
                match &lookup.entry {
                    Some(entry) => {
                        println!("Product:    {} [{}]", entry.display_name(), entry.id);
                        println!("Category:   {}", entry.category);
                        println!("Price:      {}", format_price(entry.price));
                    }
                    None => println!("Product:    no match"),
                }
            }
        }

        Commands::Catalog { json } => {
            let categories = snapshot.categories();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "source": snapshot.source(),
                        "generation": snapshot.generation(),
                        "loaded_at": snapshot.loaded_at().to_rfc3339(),
                        "entries": snapshot.len(),
                        "skipped": snapshot.skipped(),
                        "categories": categories.len(),
                    }))?
                );
            } else {
                println!("Source:     {}", snapshot.source());
                println!("Loaded at:  {}", snapshot.loaded_at().to_rfc3339());
                println!("Entries:    {}", snapshot.len());
                println!("Skipped:    {}", snapshot.skipped());
                println!("Categories: {}", categories.len());
            }
        }
    }

    Ok(())
}
