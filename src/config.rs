//! Configuration for Ember Inspect
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for an inspection run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Layout Configuration
    // -------------------------------------------------------------------------
    /// Root directory written by the storage engine
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── chunks/          (*.chunk snapshot documents)
    ///     └── wal/records.wal  (write-ahead log)
    pub data_dir: PathBuf,

    /// Chunk directory, relative to `data_dir`
    pub chunk_dir: PathBuf,

    /// Extension (without dot) identifying chunk files
    pub chunk_extension: String,

    /// WAL file, relative to `data_dir`
    pub wal_file: PathBuf,

    // -------------------------------------------------------------------------
    // Rendering Configuration
    // -------------------------------------------------------------------------
    /// Zone used to render Unix timestamps
    pub time_zone: TimestampZone,

    /// Print count/min/max/avg after each metric
    pub show_summary: bool,

    /// Print cross-field consistency warnings for each chunk
    pub check_consistency: bool,
}

/// How timestamps are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampZone {
    /// The machine's local zone
    Local,

    Utc,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            chunk_dir: PathBuf::from("chunks"),
            chunk_extension: "chunk".to_string(),
            wal_file: PathBuf::from("wal").join("records.wal"),
            time_zone: TimestampZone::Local,
            show_summary: false,
            check_consistency: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Absolute location of the chunk directory
    pub fn chunk_dir_path(&self) -> PathBuf {
        self.data_dir.join(&self.chunk_dir)
    }

    /// Absolute location of the WAL file
    pub fn wal_path(&self) -> PathBuf {
        self.data_dir.join(&self.wal_file)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root of chunks and WAL)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the chunk directory, relative to the data directory
    pub fn chunk_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.chunk_dir = path.into();
        self
    }

    /// Set the chunk file extension (a leading dot is ignored)
    pub fn chunk_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        self.config.chunk_extension = ext.trim_start_matches('.').to_string();
        self
    }

    /// Set the WAL file, relative to the data directory
    pub fn wal_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.wal_file = path.into();
        self
    }

    /// Set the zone timestamps are rendered in
    pub fn time_zone(mut self, zone: TimestampZone) -> Self {
        self.config.time_zone = zone;
        self
    }

    /// Shorthand for `time_zone(TimestampZone::Utc)` when `utc` is set
    pub fn utc(self, utc: bool) -> Self {
        if utc {
            self.time_zone(TimestampZone::Utc)
        } else {
            self.time_zone(TimestampZone::Local)
        }
    }

    pub fn show_summary(mut self, enabled: bool) -> Self {
        self.config.show_summary = enabled;
        self
    }

    pub fn check_consistency(mut self, enabled: bool) -> Self {
        self.config.check_consistency = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
