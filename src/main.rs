//! Docreflow - re-flow comments and docstrings at a cursor position.
//!
//! # Usage
//!
//! ```bash
//! docreflow module.py reformat-doc-or-comment --line 12 --column 9
//! docreflow module.py generate-doc-block -l 40 --in-place
//! docreflow module.py generate-structured-doc -l 41 -c 8 --json
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use docreflow::command::{self, Command};
use docreflow::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags, ConfigFlags,
};
use docreflow::editor::EditorBuffer;

/// Re-flow comments and docstrings and generate parameter docs at the cursor
#[derive(Parser, Debug)]
#[command(name = "docreflow", version, about, long_about = None)]
struct Cli {
    /// Source file to operate on
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Command to run at the cursor
    #[arg(value_enum, value_name = "COMMAND")]
    command: Command,

    /// Cursor line (1-based)
    #[arg(short, long, default_value_t = 1)]
    line: usize,

    /// Cursor column (1-based, in characters)
    #[arg(short, long, default_value_t = 1)]
    column: usize,

    /// Wrap width in columns
    #[arg(long)]
    width: Option<usize>,

    /// Lines a signature scan may look through
    #[arg(long)]
    scan_window: Option<usize>,

    /// Write the result back to FILE instead of printing it
    #[arg(short, long)]
    in_place: bool,

    /// Print the planned edit as JSON without applying it
    #[arg(long)]
    json: bool,

    /// Save current command-line flags as defaults in .docreflowrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .docreflowrc
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            width: self.width.filter(|n| *n > 0),
            scan_window: self.scan_window.filter(|n| *n > 0),
            json: self.json,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let flags = file_flags.union(&cli_flags);
    let options = flags.options();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let mut buffer = EditorBuffer::from_text(&source);
    buffer.move_to(cli.line.saturating_sub(1), cli.column.saturating_sub(1));

    if flags.json {
        let edit = command::plan(&buffer, cli.command, &options)
            .with_context(|| format!("{} at line {}", cli.file.display(), cli.line))?;
        println!("{}", serde_json::to_string_pretty(&edit)?);
        return Ok(());
    }

    command::run(&mut buffer, cli.command, &options)
        .with_context(|| format!("{} at line {}", cli.file.display(), cli.line))?;

    if cli.in_place && buffer.is_dirty() {
        fs::write(&cli.file, buffer.text())
            .with_context(|| format!("Failed to write {}", cli.file.display()))?;
    } else {
        print!("{}", buffer.text());
    }
    Ok(())
}
