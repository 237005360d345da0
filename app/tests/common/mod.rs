//! Common test utilities for integration tests
//!
//! Sessions backed by a temporary data directory, a fixed clock and
//! generated food drafts.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use fake::faker::lorem::en::Word;
use fake::Fake;
use nutritrack_app::config::AppConfig;
use nutritrack_app::services::Session;
use nutritrack_app::store::FileStore;
use nutritrack_shared::FoodDraft;
use tempfile::TempDir;

/// Session over a file store in a throwaway directory
pub struct TestSession {
    pub session: Session<FileStore>,
    pub config: AppConfig,
    pub dir: TempDir,
}

impl TestSession {
    pub fn new(now: &DateTime<FixedOffset>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&dir);
        let store = FileStore::open(&config.storage.data_dir).expect("Failed to open store");
        let session = Session::load(store, &config, now).expect("Failed to load session");
        Self {
            session,
            config,
            dir,
        }
    }

    /// Save, then load a fresh session from the same directory
    pub fn reopen(mut self, now: &DateTime<FixedOffset>) -> Self {
        self.session.save().expect("Failed to save session");
        let store = FileStore::open(&self.config.storage.data_dir).expect("Failed to open store");
        let session = Session::load(store, &self.config, now).expect("Failed to reload session");
        Self { session, ..self }
    }
}

/// Default configuration pointed at `dir`
pub fn test_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.data_dir = dir.path().to_path_buf();
    config
}

/// Local time in UTC+8
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .unwrap()
}

/// Custom food with a generated name
pub fn food_draft(calories: f64, protein: f64, fat: f64, carbs: f64) -> FoodDraft {
    let word: String = Word().fake();
    FoodDraft {
        name: format!("Homemade {}", word),
        icon: None,
        calories,
        protein,
        fat,
        carbs,
    }
}
