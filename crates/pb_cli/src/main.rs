//! Playbook file tool
//!
//! Inspect a saved playbook file, export a playbook as a shareable
//! document, or merge an exported document back in.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use pb_core::save::{EditorSave, SaveError, SaveManager};
use pb_core::transfer;

#[derive(Parser)]
#[command(name = "pb_cli")]
#[command(about = "Inspect and exchange playbook files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of a playbook file
    Info {
        /// Playbook file path
        file: PathBuf,
    },

    /// Export one playbook as a shareable JSON document
    Export {
        /// Playbook file path
        file: PathBuf,

        /// Playbook id to export (defaults to the current playbook)
        #[arg(long)]
        playbook: Option<String>,

        /// Output path (defaults to a date-stamped filename)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Merge an exported document into a playbook file
    Import {
        /// Playbook file path (created if missing)
        file: PathBuf,

        /// Document to import
        doc: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => info(&file),
        Commands::Export { file, playbook, out } => export(&file, playbook.as_deref(), out),
        Commands::Import { file, doc } => import(&file, &doc),
    }
}

fn info(file: &Path) -> Result<()> {
    let save = SaveManager::load_from_path(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    println!("Playbooks: {}", save.playbooks.len());
    for playbook in &save.playbooks {
        let current = if Some(&playbook.id) == save.current_playbook_id.as_ref() {
            " (current)"
        } else {
            ""
        };
        println!("  {}{}", playbook.name, current);
        println!("    plays: {}", playbook.plays.len());
        println!("    grid columns: {}", playbook.grid_config.column_names.join(", "));
        for play in &playbook.plays {
            match play.grid_position {
                Some(cell) => println!(
                    "      {} [{} players, cell {},{}]",
                    play.name,
                    play.players.len(),
                    cell.row,
                    cell.column
                ),
                None => println!("      {} [{} players]", play.name, play.players.len()),
            }
        }
    }
    Ok(())
}

fn export(file: &Path, playbook_id: Option<&str>, out: Option<PathBuf>) -> Result<()> {
    let save = SaveManager::load_from_path(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    let id = playbook_id
        .map(str::to_string)
        .or_else(|| save.current_playbook_id.clone())
        .or_else(|| save.playbooks.first().map(|p| p.id.clone()));
    let Some(playbook) = id.and_then(|id| save.playbooks.iter().find(|p| p.id == id)) else {
        bail!("no matching playbook in {}", file.display());
    };

    let doc = transfer::export_playbook(playbook);
    let out = out.unwrap_or_else(|| {
        PathBuf::from(transfer::export_filename(chrono::Utc::now().date_naive()))
    });
    std::fs::write(&out, doc).with_context(|| format!("failed to write {}", out.display()))?;

    println!("Exported \"{}\" ({} plays) to {}", playbook.name, playbook.plays.len(), out.display());
    Ok(())
}

fn import(file: &Path, doc: &Path) -> Result<()> {
    let mut save = match SaveManager::load_from_path(file) {
        Ok(save) => save,
        Err(SaveError::FileNotFound { .. }) => EditorSave::new(),
        Err(err) => return Err(err).with_context(|| format!("failed to load {}", file.display())),
    };

    let raw = std::fs::read_to_string(doc)
        .with_context(|| format!("failed to read {}", doc.display()))?;
    let imported = transfer::import_playbooks(&raw)?;
    let play_count: usize = imported.iter().map(|p| p.plays.len()).sum();

    save.playbooks.extend(imported);
    save.update_timestamp();
    SaveManager::save_to_path(file, &save)
        .with_context(|| format!("failed to write {}", file.display()))?;

    println!("Imported {} plays into {}", play_count, file.display());
    Ok(())
}
