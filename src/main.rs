//! quizbook - manage categorized question/answer cards from the terminal.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use quizbook_core::{
    config::StorageBackend,
    domain::{
        group_by_category, sort_cards, Card, CardDraft, CardId, CardPatch, Placement, SortField,
        SortOrder,
    },
    logging,
    storage::{FileStorage, Storage, DATA_DIR},
    Config, Session,
};

/// Categorized question/answer flashcards.
#[derive(Parser)]
#[command(name = "quizbook", version, about, long_about = None)]
struct Cli {
    /// Project directory holding the .quizbook data directory.
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and a default config.
    Init,

    /// Add a card. Omitted categories are taken from the last card.
    Add {
        #[arg(short, long)]
        question: String,
        #[arg(short, long)]
        answer: String,
        #[arg(long)]
        major: Option<String>,
        #[arg(long)]
        minor: Option<String>,
    },

    /// Change fields of a card.
    Edit {
        id: CardId,
        #[arg(short, long)]
        question: Option<String>,
        #[arg(short, long)]
        answer: Option<String>,
        #[arg(long)]
        major: Option<String>,
        #[arg(long)]
        minor: Option<String>,
    },

    /// Delete a card.
    Delete { id: CardId },

    /// Move a card into a category at a position within it.
    Move {
        id: CardId,
        /// Target major category; defaults to the card's current one.
        #[arg(long)]
        major: Option<String>,
        /// Target minor category; defaults to the card's current one.
        #[arg(long)]
        minor: Option<String>,
        /// Position inside the target category, 0 is first.
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Override the configured placement (trailing, in-place).
        #[arg(long)]
        placement: Option<Placement>,
    },

    /// List cards grouped by category.
    List {
        /// Sort within each category: created, updated, question, category.
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort direction: asc or desc.
        #[arg(long, default_value = "asc")]
        order: SortOrder,
        /// Also print answers.
        #[arg(long)]
        answers: bool,
    },

    /// List major categories in display order.
    Categories,

    /// Show one card with its answer.
    Show { id: CardId },

    /// Search question, answer and categories.
    Search { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.dir.join(DATA_DIR);
    let mut config = Config::load(&data_dir)?;

    logging::init_logging(logging::level_for_verbosity(
        &config.logging.level,
        cli.verbose,
    ));
    debug!(dir = %data_dir.display(), "loaded configuration");

    match cli.command {
        Commands::Init => cmd_init(&cli.dir, &data_dir, &config).await?,
        Commands::Add {
            question,
            answer,
            major,
            minor,
        } => {
            let mut session = open_session(&cli.dir, &config).await?;
            let draft = CardDraft {
                prompt: question,
                response: answer,
                major_category: major,
                minor_category: minor,
            };
            let card = session.add(draft).await?;
            println!("Added {}", describe(&card));
        }
        Commands::Edit {
            id,
            question,
            answer,
            major,
            minor,
        } => {
            let patch = CardPatch {
                prompt: question,
                response: answer,
                major_category: major,
                minor_category: minor,
            };
            if patch.is_empty() {
                bail!("nothing to edit; pass --question, --answer, --major or --minor");
            }
            let mut session = open_session(&cli.dir, &config).await?;
            let card = session.edit(&id, patch).await?;
            println!("Updated {}", describe(&card));
        }
        Commands::Delete { id } => {
            let mut session = open_session(&cli.dir, &config).await?;
            let card = session.delete(&id).await?;
            println!("Deleted {}", describe(&card));
        }
        Commands::Move {
            id,
            major,
            minor,
            index,
            placement,
        } => {
            if let Some(placement) = placement {
                config.collection.placement = placement;
            }
            let mut session = open_session(&cli.dir, &config).await?;
            let (major, minor) = session.collection().move_target(&id, major, minor)?;
            session.move_card(&id, &major, &minor, index).await?;
            println!("Moved {} to {} / {} at {}", id, major, minor, index);
        }
        Commands::List {
            sort,
            order,
            answers,
        } => {
            let session = open_session(&cli.dir, &config).await?;
            let mut cards = session.cards().to_vec();
            if let Some(field) = sort {
                sort_cards(&mut cards, field, order);
            }
            print_grouped(&cards, answers);
        }
        Commands::Categories => {
            let session = open_session(&cli.dir, &config).await?;
            for major in session.collection().major_categories() {
                println!("{}", display_category(&major));
            }
        }
        Commands::Show { id } => {
            let session = open_session(&cli.dir, &config).await?;
            let Some(card) = session.collection().get(&id) else {
                bail!("card not found: {}", id);
            };
            println!(
                "{} / {}",
                display_category(&card.major_category),
                display_category(&card.minor_category)
            );
            println!("Q: {}", card.prompt);
            println!("A: {}", card.response);
        }
        Commands::Search { query } => {
            let session = open_session(&cli.dir, &config).await?;
            let matches = session.collection().search(&query);
            if matches.is_empty() {
                println!("No cards match '{}'", query);
            }
            for card in matches {
                println!("{}", describe(card));
            }
        }
    }

    Ok(())
}

async fn cmd_init(root: &Path, data_dir: &Path, config: &Config) -> Result<()> {
    let storage = open_storage(root, config)?;
    storage.initialize().await?;
    Config::write_default(data_dir)?;
    info!(path = %data_dir.display(), "initialized quizbook");
    println!("Initialized quizbook in {}", data_dir.display());
    Ok(())
}

fn open_storage(root: &Path, config: &Config) -> Result<Box<dyn Storage>> {
    match config.storage.backend {
        StorageBackend::File => Ok(Box::new(FileStorage::new(root))),
        #[cfg(feature = "sqlite-storage")]
        StorageBackend::Sqlite => {
            let data_dir = root.join(DATA_DIR);
            std::fs::create_dir_all(&data_dir)?;
            let storage = quizbook_core::storage::SqliteStorage::new(data_dir.join("cards.db"))?;
            Ok(Box::new(storage))
        }
        #[cfg(not(feature = "sqlite-storage"))]
        StorageBackend::Sqlite => {
            bail!("the sqlite backend requires building with the `sqlite-storage` feature")
        }
    }
}

async fn open_session(root: &Path, config: &Config) -> Result<Session> {
    let storage = open_storage(root, config)?;
    Ok(Session::open(storage, config.collection.clone()).await?)
}

fn display_category(name: &str) -> &str {
    if name.is_empty() {
        "(none)"
    } else {
        name
    }
}

fn describe(card: &Card) -> String {
    format!(
        "[{}] {} ({} / {})",
        card.id,
        card.prompt,
        display_category(&card.major_category),
        display_category(&card.minor_category)
    )
}

fn print_grouped(cards: &[Card], answers: bool) {
    let index = group_by_category(cards);
    if index.is_empty() {
        println!("No cards yet. Add one with `quizbook add`.");
        return;
    }

    for group in index.groups() {
        println!("{}", display_category(&group.name));
        for minor in &group.minors {
            println!("  {}", display_category(&minor.name));
            for (position, card) in minor.cards.iter().enumerate() {
                println!("    {}. [{}] {}", position, card.id, card.prompt);
                if answers {
                    println!("       A: {}", card.response);
                }
            }
        }
    }
}
