use std::{fs, path::Path, thread, time::Duration};

use color_eyre::eyre::{Context, Result, bail, eyre};
use inkdown_pipeline::{
  MarkdownOptionsBuilder,
  RenderContext,
  sanitize_html,
};
use log::{LevelFilter, info};

mod cli;
mod config;
mod editor;
mod error;
mod export;
mod style;
mod worker;

use cli::{Cli, Commands};
use config::StyleSettings;
use export::Orientation;
use worker::{Debouncer, ParseWorker};

/// How often the watch loop checks the source file for changes.
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      if output.exists() && !force {
        bail!(
          "Settings file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }
      StyleSettings::generate_default(format, output).wrap_err_with(|| {
        format!("Failed to generate settings file: {}", output.display())
      })?;
      info!("Settings file created: {}", output.display());
      Ok(())
    },

    Commands::Preview {
      input,
      output,
      open,
      watch,
      theme,
    } => {
      let settings = StyleSettings::load(cli.config_file.as_deref())?;
      let output_path = output
        .clone()
        .unwrap_or_else(|| input.with_extension("html"));
      run_preview(
        input,
        &output_path,
        &settings,
        theme.as_deref(),
        *open,
        *watch,
      )
    },

    Commands::Print {
      input,
      output,
      orientation,
    } => {
      let settings = StyleSettings::load(cli.config_file.as_deref())?;
      run_print(
        input,
        output.as_deref(),
        &settings,
        Orientation::from_cli(orientation),
      )
    },
  }
}

/// Render one document through the worker and write the styled result.
fn render_to_file(
  worker: &mut ParseWorker,
  ctx: &RenderContext,
  source: String,
  settings: &StyleSettings,
  orientation: Orientation,
  fallback_title: &str,
  output: &Path,
) -> Result<()> {
  let generation = worker.submit(source);
  let response = worker
    .wait_for(generation)
    .ok_or_else(|| eyre!("Parse worker shut down unexpectedly"))?;
  let result = response.result.map_err(|message| eyre!(message))?;

  let safe = sanitize_html(&result.html);
  let title = result.title.as_deref().unwrap_or(fallback_title);
  let document =
    export::build_print_document(&safe, settings, orientation, title, ctx)?;

  fs::write(output, document)
    .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
  Ok(())
}

fn run_preview(
  input: &Path,
  output: &Path,
  settings: &StyleSettings,
  theme: Option<&str>,
  open_result: bool,
  watch: bool,
) -> Result<()> {
  let options = MarkdownOptionsBuilder::new().highlight_theme(theme).build();
  let mut worker = ParseWorker::spawn(options);
  let ctx = export::render_context(settings);
  let fallback_title = document_title(input);

  let source = fs::read_to_string(input)
    .wrap_err_with(|| format!("Failed to read {}", input.display()))?;
  render_to_file(
    &mut worker,
    &ctx,
    source,
    settings,
    Orientation::Portrait,
    &fallback_title,
    output,
  )?;
  info!("Preview written to {}", output.display());

  if open_result {
    open::that(output)
      .wrap_err_with(|| format!("Failed to open {}", output.display()))?;
  }

  if !watch {
    return Ok(());
  }

  info!("Watching {} for changes (Ctrl-C to stop)", input.display());
  let mut debouncer = Debouncer::default();
  let mut last_modified = fs::metadata(input).and_then(|m| m.modified()).ok();

  #[allow(clippy::infinite_loop, reason = "Watch mode runs until interrupted")]
  loop {
    thread::sleep(WATCH_POLL_INTERVAL);

    let modified = fs::metadata(input).and_then(|m| m.modified()).ok();
    if modified.is_some() && modified != last_modified {
      last_modified = modified;
      match fs::read_to_string(input) {
        Ok(source) => debouncer.record(source),
        Err(e) => log::error!("Failed to re-read {}: {e}", input.display()),
      }
    }

    if let Some(source) = debouncer.take_ready() {
      worker.submit(source);
    }

    if let Some(response) = worker.poll() {
      match response.result {
        Ok(result) => {
          let safe = sanitize_html(&result.html);
          let title = result.title.as_deref().unwrap_or(&fallback_title);
          let document = export::build_print_document(
            &safe,
            settings,
            Orientation::Portrait,
            title,
            &ctx,
          )?;
          fs::write(output, document).wrap_err_with(|| {
            format!("Failed to write {}", output.display())
          })?;
          info!("Preview updated");
        },
        Err(message) => log::error!("Parse failed: {message}"),
      }
    }
  }
}

fn run_print(
  input: &Path,
  output: Option<&Path>,
  settings: &StyleSettings,
  orientation: Orientation,
) -> Result<()> {
  let mut worker = ParseWorker::spawn(MarkdownOptionsBuilder::new().build());
  let ctx = export::render_context(settings);
  let fallback_title = document_title(input);

  let source = fs::read_to_string(input)
    .wrap_err_with(|| format!("Failed to read {}", input.display()))?;
  let generation = worker.submit(source);
  let response = worker
    .wait_for(generation)
    .ok_or_else(|| eyre!("Parse worker shut down unexpectedly"))?;
  let result = response.result.map_err(|message| eyre!(message))?;

  let safe = sanitize_html(&result.html);
  let title = result.title.as_deref().unwrap_or(&fallback_title);
  let document =
    export::build_print_document(&safe, settings, orientation, title, &ctx)?;

  if let Some(path) = output {
    fs::write(path, document)
      .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!("Print document written to {}", path.display());
  } else {
    let path = export::print_document(&document)
      .wrap_err("Failed to hand the print document to the platform opener")?;
    info!("Print document opened: {}", path.display());
  }

  Ok(())
}

/// Title to use when the document has no level-1 heading.
fn document_title(input: &Path) -> String {
  input
    .file_stem()
    .and_then(|stem| stem.to_str())
    .unwrap_or("inkdown document")
    .to_string()
}
