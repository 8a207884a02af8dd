use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use movie_catalog::{
    validate_rating, AddOutcome, CatalogConfig, EditOutcome, MovieCatalog, MovieRecord,
    SearchOutcome, StorageConfig, StorageType,
};

mod logging;

/// Backend override for files whose extension does not say
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for StorageType {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => StorageType::Csv,
            Format::Json => StorageType::Json,
        }
    }
}

/// My movies database
#[derive(Debug, Parser)]
#[command(name = "movie-catalog", version, about)]
struct Cli {
    /// Catalog file, ending in .csv or .json
    #[arg(short, long, env = "MOVIE_CATALOG_FILE")]
    file: PathBuf,

    /// Storage format, overriding the file extension
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Log storage activity
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all movies
    List,

    /// Add a movie
    Add {
        title: String,

        #[arg(long)]
        year: i32,

        #[arg(long, value_parser = parse_rating)]
        rating: f64,

        #[arg(long)]
        poster: Option<String>,
    },

    /// Delete a movie (title is matched ignoring case)
    Delete { title: String },

    /// Change the rating of a movie (title is matched ignoring case)
    Update {
        title: String,

        #[arg(long, value_parser = parse_rating)]
        rating: f64,
    },

    /// Look a movie up, suggesting close titles when it is missing
    Search {
        query: String,

        /// Maximum number of suggestions
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },

    /// Average, median, best and worst ratings
    Stats,

    /// Pick a movie for tonight
    Random,

    /// Movies sorted by rating, best first
    Sorted,
}

fn parse_rating(value: &str) -> Result<f64, String> {
    let rating: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;

    if validate_rating(rating) {
        Ok(rating)
    } else {
        Err("rating must be between 0 and 10".to_string())
    }
}

fn print_movie(title: &str, record: &MovieRecord) {
    match &record.poster {
        Some(poster) => println!("{} ({}): {} [{}]", title, record.year, record.rating, poster),
        None => println!("{} ({}): {}", title, record.year, record.rating),
    }
}

fn build_config(cli: &Cli) -> Result<CatalogConfig> {
    let storage = match cli.format {
        Some(format) => StorageConfig::new()
            .with_storage_type(format.into())
            .with_path(&cli.file),
        None => StorageConfig::for_path(&cli.file)?,
    };
    Ok(CatalogConfig::new().with_storage(storage))
}

fn run(cli: Cli) -> Result<()> {
    let mut config = build_config(&cli)?;
    if let Command::Search { limit, .. } = &cli.command {
        config = config.with_suggestion_limit(*limit);
    }
    let catalog = MovieCatalog::open(config)
        .with_context(|| format!("could not open catalog {}", cli.file.display()))?;

    match cli.command {
        Command::List => {
            let movies = catalog.list()?;
            println!("{} movies in total\n", movies.len());
            for (title, record) in movies.iter() {
                print_movie(title, record);
            }
        }
        Command::Add { title, year, rating, poster } => {
            match catalog.add(&title, year, rating, poster.as_deref())? {
                AddOutcome::Added => println!("Movie '{}' added successfully.", title),
                AddOutcome::Duplicate => println!("Movie '{}' already exists in the database.", title),
            }
        }
        Command::Delete { title } => match catalog.delete(&title)? {
            EditOutcome::Applied { title } => println!("Movie '{}' deleted successfully.", title),
            EditOutcome::NotFound => println!("Movie '{}' not found in the database.", title),
        },
        Command::Update { title, rating } => match catalog.update(&title, rating)? {
            EditOutcome::Applied { title } => {
                println!("Movie '{}' rating updated to {}.", title, rating)
            }
            EditOutcome::NotFound => println!("Movie '{}' not found in the database.", title),
        },
        Command::Search { query, .. } => {
            match catalog.search(&query)? {
                SearchOutcome::Found { title, record } => print_movie(&title, &record),
                SearchOutcome::Suggestions(suggestions) if suggestions.is_empty() => {
                    println!("No similar movies found for '{}'.", query)
                }
                SearchOutcome::Suggestions(suggestions) => {
                    println!("The movie '{}' does not exist. Did you mean:", query);
                    for s in suggestions {
                        println!("- {} (similarity: {:.0}%)", s.title, s.score);
                    }
                }
            }
        }
        Command::Stats => match catalog.stats()? {
            Some(stats) => {
                println!("Average rating: {:.2}", stats.average);
                println!("Median rating: {}", stats.median);
                println!("Best movie ({}): {}", stats.best.0, stats.best.1.join(", "));
                println!("Worst movie ({}): {}", stats.worst.0, stats.worst.1.join(", "));
            }
            None => println!("The catalog is empty."),
        },
        Command::Random => match catalog.random_movie(&mut rand::thread_rng())? {
            Some((title, record)) => {
                println!("Your movie tonight is {} with rating {}", title, record.rating)
            }
            None => println!("The catalog is empty."),
        },
        Command::Sorted => {
            for (title, record) in catalog.sorted_by_rating()? {
                print_movie(&title, &record);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    run(cli)
}
