//! Durable key-value storage and the per-key encoding of the persisted
//! snapshot.

use crate::models::{DEFAULT_TARGET, HistoryItem, PersistedState};
use crate::themes::ThemeId;
use std::collections::BTreeMap;
use std::future::Future;
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub const COUNT_KEY: &str = "salavat_count";
pub const TARGET_KEY: &str = "salavat_target";
pub const HISTORY_KEY: &str = "salavat_history";
pub const THEME_KEY: &str = "salavat_theme";
pub const VIBRATION_KEY: &str = "salavat_vibration";

/// String-keyed storage the session is persisted into. `set` only stages
/// the value; `commit` makes everything staged durable.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);

    fn commit(&mut self) -> impl Future<Output = io::Result<()>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    pub commits: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            commits: 0,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    async fn commit(&mut self) -> io::Result<()> {
        self.commits += 1;
        Ok(())
    }
}

/// Key-value pairs mirrored to a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub async fn open(path: &Path) -> Self {
        let entries = match fs::read(path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse data file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read data file: {err}");
                BTreeMap::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    async fn commit(&mut self) -> io::Result<()> {
        let payload = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(&self.path, payload).await
    }
}

/// Reads each key on its own; a missing or unreadable key only resets that
/// field to its default.
pub fn load_state(store: &impl KeyValueStore) -> PersistedState {
    let defaults = PersistedState::default();

    let count = decode(store, COUNT_KEY, |raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(defaults.count);
    let target = decode(store, TARGET_KEY, |raw| {
        raw.trim().parse::<u32>().ok().and_then(NonZeroU32::new)
    })
    .unwrap_or(DEFAULT_TARGET);
    let history = decode(store, HISTORY_KEY, |raw| {
        serde_json::from_str::<Vec<HistoryItem>>(raw).ok()
    })
    .unwrap_or_default();
    let theme = decode(store, THEME_KEY, |raw| raw.parse::<ThemeId>().ok())
        .unwrap_or(defaults.theme);
    let vibration_enabled = decode(store, VIBRATION_KEY, |raw| match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    })
    .unwrap_or(defaults.vibration_enabled);

    PersistedState {
        count,
        target,
        history,
        theme,
        vibration_enabled,
    }
}

fn decode<T>(
    store: &impl KeyValueStore,
    key: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let raw = store.get(key)?;
    let value = parse(&raw);
    if value.is_none() {
        warn!("ignoring unreadable value for {key}: {raw:?}");
    }
    value
}

/// Stages all five keys, whether or not each one changed.
pub fn save_state(store: &mut impl KeyValueStore, state: &PersistedState) -> io::Result<()> {
    store.set(COUNT_KEY, state.count.to_string());
    store.set(TARGET_KEY, state.target.to_string());
    store.set(HISTORY_KEY, serde_json::to_string(&state.history)?);
    store.set(THEME_KEY, state.theme.as_str().to_string());
    store.set(VIBRATION_KEY, state.vibration_enabled.to_string());
    Ok(())
}
