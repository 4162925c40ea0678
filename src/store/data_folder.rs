// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::format::{decode_log, encode_records, LastMatchType, StoredSession};
use crate::model::{Catalog, CharacterId, MatchLog, RecentCharacters, Settings};
use crate::state::AppState;

const MATCHES_FILENAME: &str = "matches.json";
const SETTINGS_FILENAME: &str = "settings.json";
const RECENT_FILENAME: &str = "recent-heroes.json";
const LAST_MATCH_TYPE_FILENAME: &str = "last-match-type.json";
const SESSION_FILENAME: &str = "session.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::SymlinkRefused { path } => write!(f, "refusing to write through symlink {path:?}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// Everything read back from a data folder.
///
/// Missing or malformed files have already been replaced by defaults (and logged).
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub settings: Settings,
    pub log: MatchLog,
    pub recent: RecentCharacters,
    pub last_match_type: Option<LastMatchType>,
    pub session: StoredSession,
}

#[derive(Debug, Clone)]
pub struct DataFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl DataFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matches_path(&self) -> PathBuf {
        self.root.join(MATCHES_FILENAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILENAME)
    }

    pub fn recent_path(&self) -> PathBuf {
        self.root.join(RECENT_FILENAME)
    }

    pub fn last_match_type_path(&self) -> PathBuf {
        self.root.join(LAST_MATCH_TYPE_FILENAME)
    }

    pub fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILENAME)
    }

    /// Loads every file independently, falling back to defaults per file.
    pub fn load_all(&self, catalog: &Catalog, now: DateTime<Utc>) -> LoadedData {
        LoadedData {
            settings: or_default(self.load_settings(), "settings").unwrap_or_default(),
            log: or_default(self.load_matches(catalog, now), "matches").unwrap_or_default(),
            recent: or_default(self.load_recent(catalog), "recent characters")
                .unwrap_or_default(),
            last_match_type: or_default(self.load_last_match_type(), "last match type"),
            session: or_default(self.load_session(), "session").unwrap_or_default(),
        }
    }

    /// Stored settings merged over the defaults; `None` when the file does not exist.
    pub fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        let path = self.settings_path();
        let Some(value) = read_json::<Value>(&path)? else {
            return Ok(None);
        };
        let (settings, merge) = Settings::merged_over_defaults(&value);
        if !merge.rejected.is_empty() {
            tracing::warn!(path = %path.display(), keys = ?merge.rejected, "kept defaults for malformed settings");
        }
        if !merge.ignored.is_empty() {
            tracing::debug!(keys = ?merge.ignored, "ignored unknown settings");
        }
        Ok(Some(settings))
    }

    /// Stored matches, normalized; records that fail validation are dropped with a warning.
    pub fn load_matches(
        &self,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<Option<MatchLog>, StoreError> {
        let path = self.matches_path();
        let Some(values) = read_json::<Vec<Value>>(&path)? else {
            return Ok(None);
        };
        let (log, problems) = decode_log(&values, catalog, now);
        for problem in &problems {
            tracing::warn!(path = %path.display(), "discarding stored match: {problem}");
        }
        Ok(Some(log))
    }

    pub fn load_recent(&self, catalog: &Catalog) -> Result<Option<RecentCharacters>, StoreError> {
        let Some(raw) = read_json::<Vec<String>>(&self.recent_path())? else {
            return Ok(None);
        };
        let ids = raw.into_iter().filter_map(|id| CharacterId::new(id).ok());
        Ok(Some(RecentCharacters::from_ids(ids, catalog)))
    }

    pub fn load_last_match_type(&self) -> Result<Option<LastMatchType>, StoreError> {
        read_json(&self.last_match_type_path())
    }

    pub fn load_session(&self) -> Result<Option<StoredSession>, StoreError> {
        read_json(&self.session_path())
    }

    pub fn save_matches(&self, log: &MatchLog) -> Result<(), StoreError> {
        self.write_json(&self.matches_path(), &encode_records(log))
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.write_json(&self.settings_path(), settings)
    }

    pub fn save_recent(&self, recent: &RecentCharacters) -> Result<(), StoreError> {
        let ids: Vec<&str> = recent.ids().iter().map(|id| id.as_str()).collect();
        self.write_json(&self.recent_path(), &ids)
    }

    /// Writes the remembered match type, or removes the file when there is none.
    pub fn save_last_match_type(&self, last: Option<&LastMatchType>) -> Result<(), StoreError> {
        let path = self.last_match_type_path();
        match last {
            Some(last) => self.write_json(&path, last),
            None => remove_if_exists(&path),
        }
    }

    pub fn save_session(&self, session: &StoredSession) -> Result<(), StoreError> {
        self.write_json(&self.session_path(), session)
    }

    /// Persists every part of `state`.
    pub fn save_state(&self, state: &AppState) -> Result<(), StoreError> {
        self.save_matches(&state.log)?;
        self.save_settings(&state.settings)?;
        self.save_recent(&state.recent)?;
        self.save_last_match_type(LastMatchType::from_state(state).as_ref())?;
        self.save_session(&StoredSession::from_state(state))
    }

    /// Persists what a save or undo touches.
    pub fn save_after_match_change(&self, state: &AppState) -> Result<(), StoreError> {
        self.save_matches(&state.log)?;
        self.save_recent(&state.recent)?;
        self.save_last_match_type(LastMatchType::from_state(state).as_ref())
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let mut json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        json.push(b'\n');
        write_atomic(self.root(), path, &json, self.durability)
    }
}

fn or_default<T>(loaded: Result<Option<T>, StoreError>, what: &'static str) -> Option<T> {
    match loaded {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to default {what}");
            None
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

include!("data_folder/helpers.rs");
