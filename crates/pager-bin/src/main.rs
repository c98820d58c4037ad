//! oxpager entrypoint.
//!
//! Owns everything the engine leaves to its driver: argument parsing,
//! configuration, logging, reading documents from disk or stdin, terminal
//! acquisition, and reloading content whenever the event loop reports that
//! the navigator switched documents.

use anyhow::{Context, Result, bail};
use clap::Parser;
use core_actions::{LoopExit, run_event_loop};
use core_config::Config;
use core_render::Renderer;
use core_state::Pager;
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "oxpager.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "oxpager", version, about = "Terminal pager with ANSI colors and search")]
struct Args {
    /// Files to page through (Ctrl-L / Ctrl-H switch). Reads piped stdin when omitted.
    paths: Vec<PathBuf>,
    /// Configuration file (overrides discovery of `oxpager.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Log file (overrides `[log] file` and the cache-dir default).
    #[arg(long = "log")]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;
    let _log_guard = configure_logging(&resolve_log_path(args.log.as_deref(), &config))?;
    install_panic_hook();
    config.log_load_result();

    info!(
        target: "runtime",
        files = args.paths.len(),
        config = config.source.as_ref().map(|p| p.display().to_string()),
        page_size = config.page_size(),
        "startup"
    );

    let files = args
        .paths
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    let mut pager = Pager::with_config(files, &config);
    if pager.files().is_empty() {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            bail!("missing filename (\"oxpager --help\" for help)");
        }
        let bytes = stream_into(&mut pager, stdin.lock())?;
        info!(target: "runtime", bytes, lines = pager.line_count(), "stdin_loaded");
    } else {
        load_current(&mut pager);
    }

    let mut backend = CrosstermBackend::new();
    let mut guard = backend
        .enter_guard()
        .context("terminal initialization failed")?;
    let mut renderer = Renderer::new();
    loop {
        match run_event_loop(&mut *guard, &mut pager, &mut renderer)? {
            LoopExit::Quit => break,
            LoopExit::AdvanceDocument => load_current(&mut pager),
        }
    }
    guard.release()?;
    info!(target: "runtime", frames = renderer.frames(), "shutdown");
    Ok(())
}

/// `--log`, then `[log] file`, then `<cache dir>/oxpager/oxpager.log`.
fn resolve_log_path(cli: Option<&Path>, config: &Config) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    if let Some(path) = config.log_file() {
        return path.clone();
    }
    dirs::cache_dir()
        .map(|dir| dir.join("oxpager").join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

fn configure_logging(path: &Path) -> Result<Option<WorkerGuard>> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let log_path = dir.join(&file_name);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(&dir, &file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // Global subscriber already installed; dropping the guard stops the writer.
        Err(_) => Ok(None),
    }
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

/// Feed `reader` into the pager line by line. Returns the bytes consumed.
fn stream_into<R: BufRead>(pager: &mut Pager, mut reader: R) -> Result<usize> {
    let mut total = 0;
    let mut chunk = Vec::new();
    loop {
        chunk.clear();
        let n = reader
            .read_until(b'\n', &mut chunk)
            .context("reading standard input")?;
        if n == 0 {
            return Ok(total);
        }
        total += n;
        pager.add_content(&String::from_utf8_lossy(&chunk));
    }
}

/// Replace the pager content with the navigator's current file. Failures are
/// shown inline so the remaining documents stay reachable.
fn load_current(pager: &mut Pager) {
    let Some(path) = pager.file().map(PathBuf::from) else {
        return;
    };
    match read_document(&path) {
        Ok(text) => {
            info!(target: "runtime", index = pager.index(), bytes = text.len(), "document_loaded");
            pager.set_content(text);
        }
        Err(err) => {
            warn!(target: "runtime", path = %path.display(), %err, "document_load_failed");
            pager.set_content(format!("oxpager: {err:#}\n"));
        }
    }
}

fn read_document(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("{}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
