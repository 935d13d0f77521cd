//! Lookahead terminal frontend.
//!
//! Each stdin line is one edit of the query; `:`-prefixed lines are commands.
//! The widget view is reprinted whenever it changes.

mod cli;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lookahead_client::HttpCatalog;
use lookahead_config::Config;
use lookahead_search::{SearchWidget, WidgetOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::cli::{Cli, Input};
use crate::render::Screen;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let mut config = Config::discover(cli.config.as_deref()).context("failed to load configuration")?;
	config.apply(&cli.overrides());
	let settings = config.settings()?;

	info!(
		base_url = %settings.base_url,
		debounce = ?settings.debounce,
		"starting lookahead"
	);

	let catalog = HttpCatalog::new(settings.base_url, settings.request_timeout)?;
	let mut widget = SearchWidget::new(
		Arc::new(catalog),
		WidgetOptions {
			debounce: settings.debounce,
		},
	);

	let result = run(&mut widget).await;
	widget.shutdown();
	result
}

/// Drives the widget from stdin until `:quit`, or until stdin closes and
/// outstanding work has settled.
async fn run(widget: &mut SearchWidget) -> anyhow::Result<()> {
	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	let mut stdout = tokio::io::stdout();
	let mut input_open = true;
	let mut last_frame = String::new();

	loop {
		tokio::select! {
			line = lines.next_line(), if input_open => {
				match line? {
					Some(line) => {
						if !handle_line(widget, &line) {
							break;
						}
					}
					None => {
						debug!("stdin closed");
						input_open = false;
					}
				}
			}
			changed = widget.next_event() => {
				if changed.is_none() {
					break;
				}
			}
		}
		widget.drain_events();

		let frame = Screen(&widget.view()).to_string();
		if frame != last_frame {
			stdout.write_all(frame.as_bytes()).await?;
			stdout.flush().await?;
			last_frame = frame;
		}

		if !input_open && widget.is_idle() {
			break;
		}
	}
	Ok(())
}

/// Applies one input line. Returns false on `:quit`.
fn handle_line(widget: &mut SearchWidget, line: &str) -> bool {
	match Input::parse(line) {
		Ok(Input::Query(text)) => widget.set_query(text),
		Ok(Input::Pick(index)) => {
			if widget.select_index(index).is_none() {
				eprintln!("no suggestion #{}", index + 1);
			}
		}
		Ok(Input::Clear) => widget.clear_selection(),
		Ok(Input::Quit) => return false,
		Err(error) => eprintln!("{error}"),
	}
	true
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::prelude::*;

	if let Some(log_dir) = std::env::var("LOOKAHEAD_LOG_DIR").ok().map(PathBuf::from) {
		if std::fs::create_dir_all(&log_dir).is_ok() {
			let log_path = log_dir.join(format!("lookahead.{}.log", std::process::id()));

			if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
				let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
					if verbose {
						EnvFilter::new("lookahead=trace,lookahead_search=trace,debug")
					} else {
						EnvFilter::new("lookahead=debug,lookahead_search=debug,info")
					}
				});

				let file_layer = tracing_subscriber::fmt::layer()
					.with_writer(file)
					.with_ansi(false)
					.with_span_events(FmtSpan::CLOSE)
					.with_target(true);

				tracing_subscriber::registry().with(filter).with(file_layer).init();

				tracing::info!(path = ?log_path, "tracing initialized");
				return;
			}
		}
	}

	// stderr keeps stdout free for the rendered view
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
