// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Serial Commands CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use serial_commands::baud::{self, BaudOption, BaudOptions};
use serial_commands::commands::builtin;
use serial_commands::config::Config;
use serial_commands::hex_text::{self, SendMode};
use serial_commands::serial_log::SerialLog;
use serial_commands::{CommandError, CommandStore, FileStore, SerialPreferences};

#[derive(Parser)]
#[command(
    name = "serial-commands",
    version,
    about = "Manage saved serial-port commands",
    long_about = None
)]
struct Cli {
    /// Override the data directory holding the preferences file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List saved commands, newest first
    List,
    /// Save a new command
    Add { content: String },
    /// Change the title or content of a saved command
    Edit {
        /// Current content of the command
        old_content: String,
        /// New content
        #[arg(long)]
        content: String,
        /// New title; omit or leave blank to clear it
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete a saved command
    Remove { content: String },
    /// Delete every saved command
    Clear,
    /// Merge commands from a JSON file
    Import { file: PathBuf },
    /// Write all saved commands to a JSON file
    Export { file: Option<PathBuf> },
    /// List bundled command lists, or import one by name
    Builtin { name: Option<String> },
    /// Hex input helpers
    Hex {
        #[command(subcommand)]
        action: HexAction,
    },
    /// Show baud options with the preferred one marked
    Baud {
        /// Validate and add a custom rate
        #[arg(long)]
        custom: Option<String>,
    },
    /// Pick the preferred port among the given ones
    Port { ports: Vec<String> },
    /// Record a port and baud rate that opened successfully
    Remember {
        #[arg(long)]
        port: String,
        #[arg(long)]
        baud: u32,
    },
    /// Preview the log line for a payload
    Send {
        input: String,
        /// Treat input as ASCII instead of hex
        #[arg(long)]
        ascii: bool,
        /// Title shown in front of the payload
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Subcommand)]
enum HexAction {
    /// Check whether input is valid hex
    Check { input: String },
    /// Regroup input into byte pairs
    Format { input: String },
    /// Print the bytes hex input decodes to
    Decode { input: String },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("serial_commands=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.data_dir)?;
    debug!("Configuration loaded: {:?}", config);

    let backend = Arc::new(FileStore::open(&config.data_dir)?);
    let prefs = SerialPreferences::new(backend);
    let store = CommandStore::new(prefs.clone());

    match cli.command {
        Cmd::List => list(&store),
        Cmd::Add { content } => match store.add(&content) {
            Ok(Some(_)) => println!("Added to common commands"),
            Ok(None) => {}
            Err(e) => println!("{}", e),
        },
        Cmd::Edit {
            old_content,
            content,
            title,
        } => match store.edit(&old_content, title.as_deref(), &content) {
            Ok(_) => println!("Command updated"),
            // A vanished target is dropped silently.
            Err(CommandError::NotFound) => {}
            Err(e) => println!("{}", e),
        },
        Cmd::Remove { content } => {
            if store.remove(&content) {
                println!("Command deleted");
            }
        }
        Cmd::Clear => {
            store.clear_all();
            println!("Common commands cleared");
        }
        Cmd::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            import_text(&store, &text);
        }
        Cmd::Export { file } => {
            let path = file.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
            export(&store, &path)?;
        }
        Cmd::Builtin { name } => run_builtin(&store, &config.builtin.dir, name.as_deref())?,
        Cmd::Hex { action } => run_hex(action),
        Cmd::Baud { custom } => {
            let mut options = BaudOptions::standard();
            let preferred = options.preferred_index(
                prefs
                    .last_successful_baud()
                    .or(Some(config.serial.default_baud)),
            );
            let mut selected = preferred;
            if let Some(raw) = custom {
                match baud::parse_custom_baud(&raw) {
                    Ok(rate) => selected = options.ensure(rate),
                    Err(e) => println!("{}", e),
                }
            }
            for (index, option) in options.options().iter().enumerate() {
                let marker = if index == selected { "*" } else { " " };
                match option {
                    BaudOption::Rate(_) => println!("{} {}", marker, option),
                    BaudOption::Custom => println!("  {}...", option),
                }
            }
        }
        Cmd::Port { ports } => {
            let last = prefs.last_successful_port();
            match baud::preferred_port(ports.as_slice(), last.as_deref()) {
                Some(index) => println!("{}", ports[index]),
                None => println!("No serial ports found"),
            }
        }
        Cmd::Remember { port, baud } => {
            prefs.set_last_successful_port(&port);
            prefs.set_last_successful_baud(baud);
            info!("Remembered {} @ {}", port, baud);
        }
        Cmd::Send {
            input,
            ascii,
            title,
        } => {
            let mode = if ascii {
                SendMode::Ascii
            } else {
                SendMode::from_hex_flag(prefs.input_mode_hex())
            };
            match hex_text::encode_payload(&input, mode) {
                Ok(bytes) => {
                    let log = SerialLog::sent(&input, mode, title.as_deref());
                    println!(
                        "{}",
                        log.format_line_with(prefs.log_show_time(), prefs.log_show_title())
                    );
                    debug!("{} bytes ready", bytes.len());
                }
                Err(e) => println!("Invalid input: {}", e),
            }
        }
    }

    Ok(())
}

fn list(store: &CommandStore) {
    let commands = store.load();
    if commands.is_empty() {
        if store.ever_added() {
            println!("No common commands left");
        } else {
            println!("No common commands yet. Long-press a sent line to add one");
        }
        return;
    }
    for command in commands {
        match &command.title {
            Some(title) => println!("{}\t{}", title, command.content),
            None => println!("\t{}", command.content),
        }
    }
}

fn import_text(store: &CommandStore, text: &str) {
    match store.import(text) {
        Ok(summary) => println!(
            "Imported {} commands, skipped {} duplicates",
            summary.added, summary.skipped
        ),
        Err(e) => println!("{}", e),
    }
}

fn export(store: &CommandStore, path: &Path) -> Result<()> {
    let export = store.export();
    std::fs::write(path, export.json.as_bytes())
        .with_context(|| format!("Failed to write {:?}", path))?;
    println!("Exported {} commands, saved to {}", export.count, path.display());
    Ok(())
}

fn run_builtin(store: &CommandStore, dir: &Path, name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        for name in builtin::names(dir) {
            println!("{}", name);
        }
        return Ok(());
    };

    match builtin::load(dir, name)? {
        Some(text) => import_text(store, &text),
        None => println!("import failed: no built-in list named '{}'", name),
    }
    Ok(())
}

fn run_hex(action: HexAction) {
    match action {
        HexAction::Check { input } => match hex_text::validate(&input) {
            Ok(_) => println!("valid"),
            Err(e) => println!("invalid: {}", e),
        },
        HexAction::Format { input } => println!("{}", hex_text::format_hex(&input)),
        HexAction::Decode { input } => match hex_text::decode(&input) {
            Ok(bytes) => println!("{:?}", bytes),
            Err(e) => println!("invalid: {}", e),
        },
    }
}
