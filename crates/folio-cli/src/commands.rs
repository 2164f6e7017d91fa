use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_config::Config;
use folio_engine::content::BlockKind;
use folio_engine::editing::{append_block, apply_inline_style, remove_block, resolve_index};
use folio_engine::inline::InlineStyle;
use folio_engine::records::{ContactMessage, ContactReply, send_reply};
use folio_engine::render::{RenderOptions, render_with};
use folio_engine::store::{ContentId, ContentStore, FileStore, OwnerId};
use folio_engine::io;
use uuid::Uuid;

/// Settings shared by every subcommand
pub struct Settings {
    pub store_path: PathBuf,
    pub author: String,
    pub render: RenderOptions,
}

impl Settings {
    pub fn from_config(config: Config, store_override: Option<PathBuf>, plain: bool) -> Self {
        let render = RenderOptions {
            inline_markup: config.render.inline_markup && !plain,
            empty_placeholder: config.render.empty_placeholder,
        };
        Self {
            store_path: store_override.unwrap_or(config.store_path),
            author: config.author,
            render,
        }
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.store_path)
    }
}

pub fn render(ctx: &Settings, file: &Path) -> Result<String> {
    let document = io::read_document(file)?;
    Ok(render_with(&document, &ctx.render))
}

/// Appends a block to `file`, creating it if needed. Returns the new block count.
pub fn append(
    file: &Path,
    kind: BlockKind,
    text: &str,
    level: Option<u8>,
    target: Option<&str>,
) -> Result<usize> {
    let document = io::read_document_or_default(file)?;
    let document = append_block(&document, kind, text, level, target)?;
    io::write_document(file, &document)?;
    log::info!("Appended {kind} block to {}", file.display());
    Ok(document.len())
}

/// Removes the block at `index` from `file`. Returns the new block count.
pub fn remove(file: &Path, index: isize) -> Result<usize> {
    let document = io::read_document(file)?;
    let index = resolve_index(index, document.len())?;
    let document = remove_block(&document, index)?;
    io::write_document(file, &document)?;
    Ok(document.len())
}

pub fn style(text: &str, start: usize, end: usize, style: InlineStyle) -> Result<String> {
    Ok(apply_inline_style(text, start..end, style)?)
}

/// Stores `file` for a new owner, or replaces the body stored under `id`.
pub fn save(
    store: &mut impl ContentStore,
    file: &Path,
    owner: Option<OwnerId>,
    id: Option<ContentId>,
) -> Result<ContentId> {
    let document = io::read_document(file)?;
    match (id, owner) {
        (Some(id), _) => {
            store.update(&id, &document)?;
            Ok(id)
        }
        (None, Some(owner)) => Ok(store.save(&owner, &document)?),
        (None, None) => anyhow::bail!("Either an owner or a content id is required"),
    }
}

/// Fetches a stored document as JSON, writing it to `output` when given.
pub fn load(store: &impl ContentStore, id: &ContentId, output: Option<&Path>) -> Result<String> {
    let document = store.load(id)?;
    match output {
        Some(path) => {
            io::write_document(path, &document)?;
            Ok(format!("Wrote {} blocks to {}", document.len(), path.display()))
        }
        None => Ok(document.to_json_string()?),
    }
}

pub fn list(store: &impl ContentStore) -> Result<Vec<String>> {
    let entries = store.list()?;
    Ok(entries
        .iter()
        .map(|entry| format!("{}\t{}\t{} blocks", entry.id, entry.owner, entry.body.len()))
        .collect())
}

pub fn reply(
    ctx: &Settings,
    store: &mut impl ContentStore,
    message_id: Uuid,
    subject: Option<String>,
    file: &Path,
    sent_by: Option<&str>,
) -> Result<(ContentId, String, ContactReply)> {
    let body = io::read_document(file)?;
    let mut message = ContactMessage {
        id: message_id,
        subject: subject.unwrap_or_default(),
        reply_status: Default::default(),
    };
    let sent_by = sent_by.unwrap_or(&ctx.author);
    let (id, reply) = send_reply(store, &mut message, body, Some(sent_by), &ctx.render)
        .with_context(|| format!("Failed to reply to message {message_id}"))?;
    Ok((id, message.reply_subject(), reply))
}

/// Writes `config` to `config_path`. An existing file is only replaced with
/// `force`.
pub fn init(config_path: &Path, config: &Config, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to replace it)",
            config_path.display()
        );
    }
    config.save_to_path(config_path)
}
