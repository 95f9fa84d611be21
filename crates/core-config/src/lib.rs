//! Configuration loading and parsing.
//!
//! Parses `lineview.toml` (or an override path provided by the binary). Two
//! tables are recognised:
//! * `[index]` tunes when a line's width index switches from dense to sparse
//!   sampling and how sparse it gets.
//! * `[render]` holds the default continuation marker.
//!
//! Every field defaults when absent and unknown fields are ignored. A missing
//! or unparsable file yields the defaults; loading never fails on content.

use anyhow::Result;
use core_text::IndexTuning;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

pub const FILE_NAME: &str = "lineview.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Plain content at or below this many bytes samples densely.
    #[serde(default = "IndexConfig::default_dense_threshold")]
    pub dense_threshold: usize,
    #[serde(default = "IndexConfig::default_dense_sparsity")]
    pub dense_sparsity: usize,
    #[serde(default = "IndexConfig::default_sparsity")]
    pub sparsity: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dense_threshold: Self::default_dense_threshold(),
            dense_sparsity: Self::default_dense_sparsity(),
            sparsity: Self::default_sparsity(),
        }
    }
}

impl IndexConfig {
    const fn default_dense_threshold() -> usize {
        IndexTuning::DEFAULT_DENSE_THRESHOLD
    }
    const fn default_dense_sparsity() -> usize {
        IndexTuning::DEFAULT_DENSE_SPARSITY
    }
    const fn default_sparsity() -> usize {
        IndexTuning::DEFAULT_SPARSITY
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_marker")]
    pub continuation_marker: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            continuation_marker: Self::default_marker(),
        }
    }
}

impl RenderConfig {
    fn default_marker() -> String {
        "...".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform config
/// dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lineview").join(FILE_NAME);
    }
    PathBuf::from(FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            raw: Some(content),
            file,
        }),
        Err(e) => {
            info!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Index tunables for item construction. Sparsity values of 0 are clamped
    /// to 1.
    pub fn index_tuning(&self) -> IndexTuning {
        let index = &self.file.index;
        IndexTuning {
            dense_threshold: index.dense_threshold,
            dense_sparsity: clamp_sparsity("dense_sparsity", index.dense_sparsity),
            sparsity: clamp_sparsity("sparsity", index.sparsity),
        }
    }

    pub fn continuation_marker(&self) -> &str {
        &self.file.render.continuation_marker
    }
}

fn clamp_sparsity(field: &'static str, raw: usize) -> usize {
    let clamped = raw.max(1);
    if clamped != raw {
        info!(target: "config", field, raw, clamped, "index_sparsity_clamped");
    }
    clamped
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

    impl Write for LockedWriter<'_> {
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

    fn capture<F: FnOnce()>(f: F) -> String {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.index_tuning(), IndexTuning::default());
        assert_eq!(cfg.continuation_marker(), "...");
    }

    #[test]
    fn parses_index_and_render_tables() {
        let tmp = write_config(
            "[index]\ndense_threshold = 64\nsparsity = 4\n[render]\ncontinuation_marker = \"~\"\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let tuning = cfg.index_tuning();
        assert_eq!(tuning.dense_threshold, 64);
        assert_eq!(tuning.dense_sparsity, IndexTuning::DEFAULT_DENSE_SPARSITY);
        assert_eq!(tuning.sparsity, 4);
        assert_eq!(cfg.continuation_marker(), "~");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let tmp = write_config("[index]\nsparsity = 3\nfuture_knob = true\n[other]\nx = 1\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.index.sparsity, 3);
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[index\nsparsity = ");
        let mut cfg = None;
        let logs = capture(|| cfg = Some(load_from(Some(tmp.path().to_path_buf())).unwrap()));
        let cfg = cfg.unwrap();
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(logs.contains("INFO config:"));
        assert!(logs.contains("config_parse_failed_using_defaults"));
    }

    #[test]
    fn zero_sparsity_is_clamped_and_logged() {
        let tmp = write_config("[index]\ndense_sparsity = 0\nsparsity = 0\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let mut tuning = None;
        let logs = capture(|| tuning = Some(cfg.index_tuning()));
        let tuning = tuning.unwrap();
        assert_eq!(tuning.dense_sparsity, 1);
        assert_eq!(tuning.sparsity, 1);
        assert!(logs.contains("index_sparsity_clamped"));
        assert!(logs.contains("field=\"dense_sparsity\"") || logs.contains("field=dense_sparsity"));
    }

    #[test]
    fn tuning_feeds_item_index() {
        let tmp = write_config("[index]\ndense_threshold = 8\nsparsity = 5\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let tuning = cfg.index_tuning();
        assert_eq!(tuning.sparsity_for(8), IndexTuning::DEFAULT_DENSE_SPARSITY);
        assert_eq!(tuning.sparsity_for(9), 5);
    }
}
