//! lineview entrypoint: print a horizontal window of every input line.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::load_from;
use core_text::StyleToken;
use crossterm::style::Stylize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod view;

use view::{Filter, ViewOptions};

const LOG_FILE: &str = "lineview.log";
const FALLBACK_WIDTH: usize = 80;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lineview", version, about = "Render windows of styled text lines")]
struct Args {
    /// Input file (UTF-8). Reads stdin when omitted.
    pub path: Option<PathBuf>,
    /// First display column of the window.
    #[arg(long, default_value_t = 0)]
    pub column: usize,
    /// Window width in columns; defaults to the terminal width.
    #[arg(long)]
    pub width: Option<usize>,
    /// Continuation marker (overrides `[render] continuation_marker`).
    #[arg(long)]
    pub marker: Option<String>,
    /// Show only lines containing this text, with matches highlighted.
    #[arg(long)]
    pub filter: Option<String>,
    /// Treat `--filter` as a regular expression.
    #[arg(long, requires = "filter")]
    pub regex: bool,
    /// Pin line numbers at the left edge.
    #[arg(long)]
    pub line_numbers: bool,
    /// Wrap lines at the window width instead of windowing them.
    #[arg(long)]
    pub wrap: bool,
    /// Optional configuration file path (overrides discovery of `lineview.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    tracing::debug!(
        target: "io",
        from_stdin = path.is_none(),
        size_bytes = content.len(),
        "input_read_ok"
    );
    Ok(content)
}

fn window_width(requested: Option<usize>) -> usize {
    requested.unwrap_or_else(|| {
        crossterm::terminal::size()
            .map(|(w, _)| w as usize)
            .unwrap_or(FALLBACK_WIDTH)
    })
}

fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let tuning = config.index_tuning();
    let input = read_input(args.path.as_deref())?;

    let filter = args
        .filter
        .as_deref()
        .map(|pattern| Filter::new(pattern, args.regex))
        .transpose()?;
    let opts = ViewOptions {
        column: args.column,
        width: window_width(args.width),
        marker: args
            .marker
            .clone()
            .unwrap_or_else(|| config.continuation_marker().to_owned()),
        filter,
        line_numbers: args.line_numbers,
        wrap: args.wrap,
    };
    info!(
        target: "runtime",
        column = opts.column,
        width = opts.width,
        wrap = opts.wrap,
        line_numbers = opts.line_numbers,
        filtered = opts.filter.is_some(),
        "startup"
    );

    let lines = view::build_lines(&input, &tuning, opts.line_numbers);
    let highlight = StyleToken::new(|text| text.reverse().to_string());
    let rows = view::render(&lines, &opts, &highlight);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for row in rows {
        writeln!(out, "{row}")?;
    }
    out.flush()?;
    Ok(())
}
