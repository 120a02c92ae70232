use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use chrono::{DateTime, Utc};

use crate::analysis::summary::MatchRecord;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CachedAccount {
    pub puuid: String,
    pub cached_at: DateTime<Utc>,
}

/// Flat-file store of fully processed match records, one file per player.
/// Records carry their computed timeline result, so a cache hit skips both
/// the match and timeline fetches.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchCache {
    pub player: String,
    pub region: String,
    pub last_updated: DateTime<Utc>,
    pub matches: Vec<MatchRecord>,
    pub account: Option<CachedAccount>,
}

impl MatchCache {
    pub fn new(player: &str, region: &str) -> Self {
        MatchCache {
            player: player.to_string(),
            region: region.to_string(),
            last_updated: Utc::now(),
            matches: Vec::new(),
            account: None,
        }
    }

    pub fn set_account(&mut self, puuid: String) {
        self.account = Some(CachedAccount {
            puuid,
            cached_at: Utc::now(),
        });
    }

    pub fn get_cache_path(player: &str) -> PathBuf {
        let cache_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lanewise");

        let _ = fs::create_dir_all(&cache_dir);

        cache_dir.join(format!("{}.json", player.replace('#', "_")))
    }

    pub fn load(player: &str) -> Result<Self, AppError> {
        let path = Self::get_cache_path(player);

        match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| {
                    AppError::JsonError(format!("Failed to parse cache: {}", e))
                })
            }
            Err(_) => {
                // Cache doesn't exist yet, return empty
                Ok(MatchCache::new(player, "euw1"))
            }
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        let path = Self::get_cache_path(&self.player);
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            AppError::JsonError(format!("Failed to serialize cache: {}", e))
        })?;

        fs::write(&path, json).map_err(|e| {
            AppError::JsonError(format!("Failed to write cache: {}", e))
        })?;

        Ok(())
    }

    pub fn contains(&self, match_id: &str) -> bool {
        self.matches.iter().any(|m| m.match_id == match_id)
    }

    pub fn add_records(&mut self, new_records: Vec<MatchRecord>) {
        let existing_ids: HashSet<String> =
            self.matches.iter().map(|m| m.match_id.clone()).collect();

        for record in new_records {
            if !existing_ids.contains(&record.match_id) {
                self.matches.push(record);
            }
        }

        // Most recent game first
        self.matches.sort_by(|a, b| b.game_creation.cmp(&a.game_creation));

        self.last_updated = Utc::now();
    }

    pub fn get_record(&self, match_id: &str) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| m.match_id == match_id)
    }
}
