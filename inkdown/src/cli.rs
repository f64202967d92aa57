use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for inkdown
#[derive(Parser, Debug)]
#[command(author, version, about = "inkdown: markdown authoring and print export")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to a style settings file (TOML or JSON). Defaults to
  /// `inkdown.toml` in the current directory when present.
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,
}

impl Cli {
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// All supported subcommands for the inkdown CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new inkdown style settings file
  Init {
    /// Path to create the settings file at
    #[arg(short, long, default_value = "inkdown.toml")]
    output: PathBuf,

    /// Format of the settings file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render a markdown document to a styled HTML preview.
  Preview {
    /// Path to the markdown source file.
    input: PathBuf,

    /// Output path for the rendered HTML. Defaults to the input path with
    /// an `.html` extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open the rendered preview with the platform handler.
    #[arg(long)]
    open: bool,

    /// Keep watching the source file and re-render on change.
    #[arg(short, long)]
    watch: bool,

    /// Syntax highlighting theme name.
    #[arg(short, long)]
    theme: Option<String>,
  },

  /// Build a print-ready document and hand it to the platform opener.
  Print {
    /// Path to the markdown source file.
    input: PathBuf,

    /// Write the print document here instead of opening it.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Page orientation for the print layout.
    #[arg(long, default_value = "portrait", value_parser = ["portrait", "landscape"])]
    orientation: String,
  },
}
