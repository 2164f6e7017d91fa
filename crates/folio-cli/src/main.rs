mod commands;
mod editor;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_config::Config;
use folio_engine::content::BlockKind;
use folio_engine::inline::InlineStyle;
use folio_engine::store::{ContentId, OwnerId};
use uuid::Uuid;

use commands::Settings;

#[derive(Parser)]
#[command(version, about = "Folio - block content tools for a portfolio blog", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Store directory (defaults to store_path from the config file)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Render text without interpreting inline markers
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a document as HTML
    Render {
        /// Document JSON file
        file: PathBuf,
    },
    /// Append a block to a document file
    Append {
        /// Document JSON file (created if missing)
        file: PathBuf,

        /// Block kind: paragraph, heading, quote, code, list, ordered-list, link, image
        #[arg(long)]
        kind: BlockKind,

        /// Block text; list items are separated by newlines
        #[arg(long, default_value = "")]
        text: String,

        /// Heading level (1-3)
        #[arg(long)]
        level: Option<u8>,

        /// Link or image URL
        #[arg(long)]
        target: Option<String>,
    },
    /// Remove the block at an index from a document file
    Remove {
        /// Document JSON file
        file: PathBuf,

        /// Zero-based block index
        #[arg(allow_negative_numbers = true)]
        index: isize,
    },
    /// Wrap a byte range of some text in an inline style
    Style {
        text: String,
        start: usize,
        end: usize,
        /// bold, italic, underline, strikethrough, highlight or code
        style: InlineStyle,
    },
    /// Store a document file and print its content id
    Save {
        /// Document JSON file
        file: PathBuf,

        /// Owning record, e.g. post:<uuid> or reply:<uuid>
        #[arg(long, required_unless_present = "id", conflicts_with = "id")]
        owner: Option<OwnerId>,

        /// Replace the body already stored under this id
        #[arg(long)]
        id: Option<ContentId>,
    },
    /// Fetch a stored document
    Load {
        id: ContentId,

        /// Write to this file instead of printing
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List stored documents
    List,
    /// Compose a reply to a contact message, store it and print its HTML
    Reply {
        message_id: Uuid,

        /// Reply body JSON file
        file: PathBuf,

        /// Subject of the message being answered
        #[arg(long)]
        subject: Option<String>,

        /// Sender name (defaults to author from the config file)
        #[arg(long)]
        sent_by: Option<String>,
    },
    /// Write a config file with the current store location and author
    Init {
        /// Sender name recorded on replies
        #[arg(long)]
        author: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Edit a document file in the terminal
    Edit {
        /// Document JSON file (created on first save)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();

    let config_path = Config::config_path();
    log::debug!("Config path: {}", config_path.display());
    let config = Config::load_or_default()?;
    let settings = Settings::from_config(config.clone(), cli.store, cli.plain);

    match cli.command {
        Commands::Render { file } => {
            println!("{}", commands::render(&settings, &file)?);
        }
        Commands::Append {
            file,
            kind,
            text,
            level,
            target,
        } => {
            let len = commands::append(&file, kind, &text, level, target.as_deref())?;
            println!("{} now has {len} blocks", file.display());
        }
        Commands::Remove { file, index } => {
            let len = commands::remove(&file, index)?;
            println!("{} now has {len} blocks", file.display());
        }
        Commands::Style {
            text,
            start,
            end,
            style,
        } => {
            println!("{}", commands::style(&text, start, end, style)?);
        }
        Commands::Save { file, owner, id } => {
            let mut store = settings.store();
            let id = commands::save(&mut store, &file, owner, id)?;
            println!("{id}");
        }
        Commands::Load { id, output } => {
            let store = settings.store();
            println!("{}", commands::load(&store, &id, output.as_deref())?);
        }
        Commands::List => {
            let store = settings.store();
            for line in commands::list(&store)? {
                println!("{line}");
            }
        }
        Commands::Reply {
            message_id,
            file,
            subject,
            sent_by,
        } => {
            let mut store = settings.store();
            let (id, subject, reply) = commands::reply(
                &settings,
                &mut store,
                message_id,
                subject,
                &file,
                sent_by.as_deref(),
            )?;
            eprintln!("Stored reply {id} from {}: {subject}", reply.sent_by);
            println!("{}", reply.html);
        }
        Commands::Init { author, force } => {
            let config = Config {
                store_path: settings.store_path.clone(),
                author: author.unwrap_or_else(|| settings.author.clone()),
                ..config
            };
            commands::init(&config_path, &config, force)?;
            println!("Wrote {}", config_path.display());
        }
        Commands::Edit { file } => {
            editor::run(file, settings.render)?;
        }
    }

    Ok(())
}
