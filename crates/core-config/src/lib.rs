//! Configuration loading and parsing.
//!
//! Reads `oxpager.toml` (or an override path provided by the binary). Every
//! key is optional; unknown fields are ignored so the file can evolve without
//! breaking older binaries, and a file that fails to parse falls back to the
//! defaults rather than aborting startup.
//!
//! ```toml
//! [scroll]
//! page_size = 29
//!
//! [search]
//! ignore_case = true
//!
//! [status]
//! show_usage = true
//!
//! [log]
//! file = "/tmp/oxpager.log"
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxpager.toml";
pub const DEFAULT_PAGE_SIZE: usize = 29;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScrollConfig {
    #[serde(default = "ScrollConfig::default_page_size")]
    pub page_size: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            page_size: Self::default_page_size(),
        }
    }
}

impl ScrollConfig {
    const fn default_page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_ignore_case")]
    pub ignore_case: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ignore_case: Self::default_ignore_case(),
        }
    }
}

impl SearchConfig {
    const fn default_ignore_case() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_show_usage")]
    pub show_usage: bool,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            show_usage: Self::default_show_usage(),
        }
    }
}

impl StatusConfig {
    const fn default_show_usage() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
    /// Why the file at `source` was rejected, when defaults are in effect.
    pub parse_error: Option<String>,
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxpager").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            let mut cfg = Config {
                raw: Some(content),
                file,
                source: Some(path),
                parse_error: None,
            };
            cfg.normalize();
            Ok(cfg)
        }
        Err(err) => {
            warn!(target: "config", path = %path.display(), %err, "config_parse_failed_using_defaults");
            Ok(Config {
                source: Some(path),
                parse_error: Some(err.to_string()),
                ..Config::default()
            })
        }
    }
}

impl Config {
    /// Effective page size for page-up/page-down (never zero).
    pub fn page_size(&self) -> usize {
        self.file.scroll.page_size.max(1)
    }

    pub fn ignore_case(&self) -> bool {
        self.file.search.ignore_case
    }

    pub fn show_usage(&self) -> bool {
        self.file.status.show_usage
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.file.log.file.as_ref()
    }

    /// Replay the load result. The binary loads the config before its
    /// subscriber exists (the log path comes from the config).
    pub fn log_load_result(&self) {
        let Some(path) = &self.source else {
            return;
        };
        match &self.parse_error {
            Some(err) => {
                warn!(target: "config", path = %path.display(), %err, "config_parse_failed_using_defaults")
            }
            None => info!(target: "config", path = %path.display(), "config_loaded"),
        }
    }

    fn normalize(&mut self) {
        let raw = self.file.scroll.page_size;
        if raw == 0 {
            self.file.scroll.page_size = 1;
            info!(target: "config", raw, clamped = 1, "scroll_page_size_clamped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.page_size(), DEFAULT_PAGE_SIZE);
        assert!(cfg.ignore_case());
        assert!(cfg.show_usage());
        assert!(cfg.log_file().is_none());
        assert!(cfg.source.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let tmp = write_config(
            "[scroll]\npage_size = 10\n[search]\nignore_case = false\n[status]\nshow_usage = false\n[log]\nfile = \"/tmp/p.log\"\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.page_size(), 10);
        assert!(!cfg.ignore_case());
        assert!(!cfg.show_usage());
        assert_eq!(cfg.log_file(), Some(&PathBuf::from("/tmp/p.log")));
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let tmp = write_config("[search]\nignore_case = false\nunknown_key = 3\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.page_size(), DEFAULT_PAGE_SIZE);
        assert!(!cfg.ignore_case());
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let tmp = write_config("[scroll\npage_size = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.page_size(), DEFAULT_PAGE_SIZE);
        assert!(cfg.raw.is_none());
        assert!(cfg.parse_error.is_some());
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn parse_failure_is_replayed_to_a_later_subscriber() {
        let tmp = write_config("[scroll\npage_size = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();

        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, || cfg.log_load_result());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed_using_defaults"));
    }

    #[test]
    fn zero_page_size_clamp_logs_under_config_target() {
        let tmp = write_config("[scroll]\npage_size = 0\n");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || {
            load_from(Some(tmp.path().to_path_buf())).unwrap()
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("scroll_page_size_clamped"));
        assert_eq!(cfg.page_size(), 1);
    }
}
