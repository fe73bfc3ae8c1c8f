//! `snip` — terminal client for the snip snippet organizer.
//!
//! # Usage
//!
//! ```text
//! snip list
//! snip add --title "hello" --subject Rust --content 'fn main() {}'
//! snip show 3
//! snip subjects add Rust
//! snip subjects rm Rust
//! ```

mod client;
mod group;
mod render;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;
use snip_core::{snippet::NewSnippet, validate};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "snip", about = "Terminal client for the snip snippet organizer")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the snip server (default: http://localhost:3000).
  #[arg(long, env = "SNIP_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fetch everything and print snippets grouped by subject (the default).
  List,
  /// Create a snippet, then reprint the grouped view.
  Add {
    #[arg(long)]
    title: String,
    /// Subject name the snippet is filed under.
    #[arg(long)]
    subject: String,
    /// Snippet body; pass `-` to read it from stdin.
    #[arg(long)]
    content: String,
  },
  /// Print one snippet in full.
  Show { id: i64 },
  /// Manage subjects.
  #[command(subcommand)]
  Subjects(SubjectsCommand),
}

#[derive(Subcommand, Debug)]
enum SubjectsCommand {
  /// List subjects.
  List,
  /// Create a subject.
  Add { name: String },
  /// Delete a subject (refused while snippets still reference it).
  Rm { name: String },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override the config file, which overrides the default.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3000".to_owned()),
  };

  let client = ApiClient::new(api_config)?;

  match args.command.unwrap_or(Command::List) {
    Command::List => print_grouped(&client).await,
    Command::Add { title, subject, content } => {
      let content = if content == "-" { read_stdin()? } else { content };
      let input = NewSnippet { title, category: subject, content };
      validate::validate_new_snippet(&input)?;

      let created = client.create_snippet(&input).await?;
      println!("Saved snippet #{} under {:?}.\n", created.id, created.category);
      print_grouped(&client).await
    }
    Command::Show { id } => {
      let snippet = client.get_snippet(id).await?;
      render::print_snippet(&snippet);
      Ok(())
    }
    Command::Subjects(cmd) => run_subjects(&client, cmd).await,
  }
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

/// One full fetch-and-bucket cycle: subjects first (they define the grouping
/// order), then snippets. Rerun after every mutation — no incremental
/// patching of a previously rendered view.
async fn print_grouped(client: &ApiClient) -> Result<()> {
  let subjects = client.list_subjects().await?;
  let snippets = client.list_snippets().await?;
  render::print_view(&group::build_view(&subjects, snippets));
  Ok(())
}

async fn run_subjects(client: &ApiClient, cmd: SubjectsCommand) -> Result<()> {
  match cmd {
    SubjectsCommand::List => {
      let subjects = client.list_subjects().await?;
      if subjects.is_empty() {
        println!("(no subjects)");
      }
      for subject in &subjects {
        println!("#{}  {}", subject.id, subject.name);
      }
      Ok(())
    }
    SubjectsCommand::Add { name } => {
      let Some(name) = validate::normalize_subject_name(&name) else {
        bail!("subject name cannot be empty");
      };

      // Same pre-flight the grouping view relies on: catch duplicates before
      // POSTing. The server still enforces this atomically.
      let existing = client.list_subjects().await?;
      if validate::is_duplicate_subject(&name, existing.iter().map(|s| s.name.as_str()))
      {
        bail!("a subject named {name:?} already exists (names are case-insensitive)");
      }

      let subject = client.create_subject(&name).await?;
      println!("Added subject {:?} (#{}).\n", subject.name, subject.id);
      print_grouped(client).await
    }
    SubjectsCommand::Rm { name } => {
      let subjects = client.list_subjects().await?;
      let Some(subject) = subjects.into_iter().find(|s| s.name == name) else {
        bail!("no subject named {name:?}");
      };

      // Pre-check for a friendly message; the server re-checks atomically on
      // delete, so a race here cannot orphan anything silently.
      let refs = client.snippet_ids_by_subject(&subject.name).await?;
      if !refs.is_empty() {
        bail!(
          "cannot delete subject {:?}: it still has {} associated snippet(s)",
          subject.name,
          refs.len()
        );
      }

      let message = client.delete_subject(subject.id).await?;
      println!("{message}\n");
      print_grouped(client).await
    }
  }
}

fn read_stdin() -> Result<String> {
  use std::io::Read as _;
  let mut buf = String::new();
  std::io::stdin()
    .read_to_string(&mut buf)
    .context("reading snippet content from stdin")?;
  Ok(buf)
}
