use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::stats::{GameRecord, GameStats};

/// [`GameStats`] backed by a JSON file. Loaded once, saved after every
/// change.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    stats: GameStats,
}

impl StatsStore {
    /// Never fails: a missing or unreadable file starts from empty stats.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stats = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                log::warn!("Ignoring corrupt stats file {}: {err}", path.display());
                GameStats::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No stats file at {}, starting fresh", path.display());
                GameStats::default()
            }
            Err(err) => {
                log::warn!("Could not read stats file {}: {err}", path.display());
                GameStats::default()
            }
        };
        Self { path, stats }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn record(&mut self, record: GameRecord) -> Result<()> {
        self.stats.record(record);
        self.save()
    }

    pub fn reset(&mut self) -> Result<()> {
        self.stats.reset();
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.stats)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Could not write stats file {}", self.path.display()))
    }
}
