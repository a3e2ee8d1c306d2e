use crate::themes::ThemeId;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

pub const DEFAULT_TARGET: NonZeroU32 = match NonZeroU32::new(100) {
    Some(target) => target,
    None => unreachable!(),
};

/// Targets offered in the selector, in display order.
pub const PRESETS: [u32; 5] = [34, 100, 14, 1000, 14000];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub count: u64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<NonZeroU32>,
}

/// Everything that survives a restart. Written as a whole after each change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedState {
    pub count: u64,
    pub target: NonZeroU32,
    pub history: Vec<HistoryItem>,
    pub theme: ThemeId,
    pub vibration_enabled: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            count: 0,
            target: DEFAULT_TARGET,
            history: Vec::new(),
            theme: ThemeId::default(),
            vibration_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewFlags {
    pub reset_prompt: bool,
    pub history_open: bool,
    pub settings_open: bool,
    pub custom_target: bool,
}

/// One state-machine action as posted by a form or the JSON API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub count: u64,
    pub target: u32,
    pub progress: f64,
    pub history: Vec<HistoryItem>,
    pub theme: ThemeId,
    pub vibration_enabled: bool,
    pub view: ViewFlags,
}
