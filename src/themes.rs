//! Static theme registry: a closed set of ids, each pointing at one
//! immutable bundle of colour tokens.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Gold,
    Emerald,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub from: &'static str,
    pub via: Option<&'static str>,
    pub to: &'static str,
}

impl Gradient {
    pub fn css(&self, angle: &str) -> String {
        match self.via {
            Some(via) => format!("linear-gradient({angle}, {}, {via}, {})", self.from, self.to),
            None => format!("linear-gradient({angle}, {}, {})", self.from, self.to),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: ThemeId,
    pub name: &'static str,
    pub background: &'static str,
    pub page_text: &'static str,
    pub text_main: &'static str,
    pub text_secondary: &'static str,
    pub text_header: &'static str,
    pub device_body: Gradient,
    pub device_border: &'static str,
    pub device_screen: &'static str,
    pub device_screen_text: &'static str,
    pub device_button: Gradient,
    pub device_button_border: &'static str,
    pub accent: &'static str,
    pub accent_hover: &'static str,
    pub panel: &'static str,
    pub border: &'static str,
    pub glow: &'static str,
    pub meta_color: &'static str,
}

static THEMES: [Theme; 3] = [
    Theme {
        id: ThemeId::Gold,
        name: "مشکی و طلایی (لوکس)",
        background: "#0f172a",
        page_text: "#f1f5f9",
        text_main: "#fbbf24",
        text_secondary: "#94a3b8",
        text_header: "#f59e0b",
        device_body: Gradient { from: "#0f172a", via: None, to: "#1e293b" },
        device_border: "#334155",
        device_screen: "#2a2f23",
        device_screen_text: "#f59e0b",
        device_button: Gradient { from: "#fde68a", via: Some("#fbbf24"), to: "#d97706" },
        device_button_border: "#b45309",
        accent: "#f59e0b",
        accent_hover: "#d97706",
        panel: "#1e293b",
        border: "rgba(245, 158, 11, 0.2)",
        glow: "rgba(245, 158, 11, 0.2)",
        meta_color: "#1e293b",
    },
    Theme {
        id: ThemeId::Emerald,
        name: "سبز کلاسیک (نوستالژی)",
        background: "#f5f5f4",
        page_text: "#1e293b",
        text_main: "#065f46",
        text_secondary: "#78716c",
        text_header: "#065f46",
        device_body: Gradient { from: "#10b981", via: None, to: "#047857" },
        device_border: "#065f46",
        device_screen: "#c8cdba",
        device_screen_text: "#000000",
        device_button: Gradient { from: "#f3f4f6", via: Some("#d1d5db"), to: "#9ca3af" },
        device_button_border: "#6b7280",
        accent: "#059669",
        accent_hover: "#047857",
        panel: "#ffffff",
        border: "#a7f3d0",
        glow: "rgba(6, 78, 59, 0.05)",
        meta_color: "#f5f5f4",
    },
    Theme {
        id: ThemeId::Blue,
        name: "آبی آسمانی",
        background: "#e2e8f0",
        page_text: "#1e293b",
        text_main: "#1e3a8a",
        text_secondary: "#64748b",
        text_header: "#1e40af",
        device_body: Gradient { from: "#3b82f6", via: None, to: "#1d4ed8" },
        device_border: "#1e40af",
        device_screen: "#dbeafe",
        device_screen_text: "#1e3a8a",
        device_button: Gradient { from: "#ffffff", via: Some("#eff6ff"), to: "#bfdbfe" },
        device_button_border: "#93c5fd",
        accent: "#2563eb",
        accent_hover: "#1d4ed8",
        panel: "#ffffff",
        border: "#bfdbfe",
        glow: "rgba(59, 130, 246, 0.1)",
        meta_color: "#e2e8f0",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl ThemeId {
    pub const ALL: [ThemeId; 3] = [ThemeId::Gold, ThemeId::Emerald, ThemeId::Blue];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::Gold => "gold",
            ThemeId::Emerald => "emerald",
            ThemeId::Blue => "blue",
        }
    }

    pub fn theme(self) -> &'static Theme {
        THEMES
            .iter()
            .find(|theme| theme.id == self)
            .unwrap_or(&THEMES[0])
    }
}

impl FromStr for ThemeId {
    type Err = UnknownTheme;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ThemeId::ALL
            .into_iter()
            .find(|id| id.as_str() == raw.trim())
            .ok_or_else(|| UnknownTheme(raw.to_string()))
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn all() -> &'static [Theme] {
    &THEMES
}
