//! The counter state machine. `Session::apply` is the only transition;
//! it never touches storage.

use crate::calendar::display_date;
use crate::errors::AppError;
use crate::models::{
    ActionRequest, DEFAULT_TARGET, HistoryItem, PRESETS, PersistedState, SessionView, ViewFlags,
};
use crate::progress::progress;
use crate::themes::ThemeId;
use chrono::{DateTime, Local};
use std::num::NonZeroU32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Increment,
    RequestReset,
    ConfirmReset { archive: bool },
    CancelReset,
    SelectPreset(NonZeroU32),
    EnterCustomTarget,
    ManualTarget(String),
    ClearCustomTarget,
    DeleteHistoryItem(String),
    SelectTheme(ThemeId),
    ToggleVibration,
    OpenHistory,
    CloseHistory,
    OpenSettings,
    CloseSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub count: u64,
    pub target: NonZeroU32,
    pub history: Vec<HistoryItem>,
    pub theme: ThemeId,
    pub vibration_enabled: bool,
    pub view: ViewFlags,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_persisted(PersistedState::default())
    }
}

impl Session {
    pub fn from_persisted(state: PersistedState) -> Self {
        let custom_target = !PRESETS.contains(&state.target.get());
        Self {
            count: state.count,
            target: state.target,
            history: state.history,
            theme: state.theme,
            vibration_enabled: state.vibration_enabled,
            view: ViewFlags {
                custom_target,
                ..ViewFlags::default()
            },
        }
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            count: self.count,
            target: self.target,
            history: self.history.clone(),
            theme: self.theme,
            vibration_enabled: self.vibration_enabled,
        }
    }

    pub fn progress(&self) -> f64 {
        progress(self.count, self.target)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            count: self.count,
            target: self.target.get(),
            progress: self.progress(),
            history: self.history.clone(),
            theme: self.theme,
            vibration_enabled: self.vibration_enabled,
            view: self.view,
        }
    }

    pub fn apply(&self, action: Action, now: DateTime<Local>) -> Session {
        let mut next = self.clone();
        match action {
            Action::Increment => {
                next.count = next.count.saturating_add(1);
            }
            Action::RequestReset => {
                if next.count > 0 {
                    next.view.reset_prompt = true;
                }
            }
            Action::ConfirmReset { archive } => {
                if archive {
                    let item = HistoryItem {
                        id: next.unique_id(now),
                        count: next.count,
                        date: display_date(&now),
                        target: Some(next.target),
                    };
                    next.history.insert(0, item);
                }
                next.count = 0;
                next.view.reset_prompt = false;
            }
            Action::CancelReset => {
                next.view.reset_prompt = false;
            }
            Action::SelectPreset(target) => {
                next.target = target;
                next.view.custom_target = false;
            }
            Action::EnterCustomTarget => {
                next.view.custom_target = true;
            }
            Action::ManualTarget(raw) => {
                if next.view.custom_target {
                    if let Some(target) = parse_manual_target(&raw) {
                        next.target = target;
                    }
                }
            }
            Action::ClearCustomTarget => {
                next.view.custom_target = false;
                next.target = DEFAULT_TARGET;
            }
            Action::DeleteHistoryItem(id) => {
                next.history.retain(|item| item.id != id);
            }
            Action::SelectTheme(theme) => {
                next.theme = theme;
            }
            Action::ToggleVibration => {
                next.vibration_enabled = !next.vibration_enabled;
            }
            Action::OpenHistory => next.view.history_open = true,
            Action::CloseHistory => next.view.history_open = false,
            Action::OpenSettings => next.view.settings_open = true,
            Action::CloseSettings => next.view.settings_open = false,
        }
        next
    }

    fn unique_id(&self, now: DateTime<Local>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let id = millis.to_string();
            if !self.history.iter().any(|item| item.id == id) {
                return id;
            }
            millis += 1;
        }
    }
}

/// Accepts only a positive whole number; anything else leaves the target alone.
pub fn parse_manual_target(raw: &str) -> Option<NonZeroU32> {
    raw.trim().parse::<u32>().ok().and_then(NonZeroU32::new)
}

impl TryFrom<ActionRequest> for Action {
    type Error = AppError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        let value = request.value.as_deref().map(str::trim);
        let action = match request.action.trim() {
            "increment" => Action::Increment,
            "request_reset" => Action::RequestReset,
            "confirm_reset" => match value {
                Some("true") => Action::ConfirmReset { archive: true },
                Some("false") => Action::ConfirmReset { archive: false },
                _ => return Err(AppError::bad_request("confirm_reset needs value 'true' or 'false'")),
            },
            "cancel_reset" => Action::CancelReset,
            "select_target" => match value {
                Some("custom") => Action::EnterCustomTarget,
                Some(raw) => {
                    let preset = raw
                        .parse::<u32>()
                        .ok()
                        .filter(|n| PRESETS.contains(n))
                        .and_then(NonZeroU32::new)
                        .ok_or_else(|| AppError::bad_request(format!("'{raw}' is not a preset target")))?;
                    Action::SelectPreset(preset)
                }
                None => return Err(AppError::bad_request("select_target needs a value")),
            },
            "manual_target" => Action::ManualTarget(value.unwrap_or_default().to_string()),
            "clear_custom_target" => Action::ClearCustomTarget,
            "delete_history" => match request.id {
                Some(id) if !id.is_empty() => Action::DeleteHistoryItem(id),
                _ => return Err(AppError::bad_request("delete_history needs an id")),
            },
            "select_theme" => {
                let raw = value.unwrap_or_default();
                let theme = raw
                    .parse::<ThemeId>()
                    .map_err(|err| AppError::bad_request(err.to_string()))?;
                Action::SelectTheme(theme)
            }
            "toggle_vibration" => Action::ToggleVibration,
            "open_history" => Action::OpenHistory,
            "close_history" => Action::CloseHistory,
            "open_settings" => Action::OpenSettings,
            "close_settings" => Action::CloseSettings,
            other => return Err(AppError::bad_request(format!("unknown action '{other}'"))),
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
    }

    fn target(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn run(session: Session, actions: impl IntoIterator<Item = Action>) -> Session {
        actions
            .into_iter()
            .fold(session, |state, action| state.apply(action, now()))
    }

    fn request(action: &str, value: Option<&str>) -> ActionRequest {
        ActionRequest {
            action: action.to_string(),
            value: value.map(str::to_string),
            id: None,
        }
    }

    #[test]
    fn increment_then_archive_scenario() {
        let session = run(
            Session::default(),
            [Action::Increment, Action::Increment, Action::Increment],
        );
        assert_eq!(session.count, 3);

        let session = session.apply(Action::RequestReset, now());
        assert!(session.view.reset_prompt);

        let session = session.apply(Action::ConfirmReset { archive: true }, now());
        assert_eq!(session.count, 0);
        assert!(!session.view.reset_prompt);
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].count, 3);
        assert_eq!(session.history[0].target, Some(target(100)));
        assert_eq!(session.history[0].id, now().timestamp_millis().to_string());
    }

    #[test]
    fn confirm_reset_with_and_without_archive() {
        let session = Session {
            count: 42,
            ..Session::default()
        };

        let archived = session.apply(Action::ConfirmReset { archive: true }, now());
        assert_eq!(archived.history.len(), 1);
        assert_eq!(archived.history[0].count, 42);
        assert_eq!(archived.history[0].target, Some(target(100)));
        assert_eq!(archived.count, 0);

        let discarded = session.apply(Action::ConfirmReset { archive: false }, now());
        assert!(discarded.history.is_empty());
        assert_eq!(discarded.count, 0);
    }

    #[test]
    fn request_reset_at_zero_keeps_prompt_closed() {
        let session = Session::default().apply(Action::RequestReset, now());
        assert!(!session.view.reset_prompt);
    }

    #[test]
    fn cancel_keeps_count() {
        let session = run(
            Session::default(),
            [Action::Increment, Action::RequestReset, Action::CancelReset],
        );
        assert_eq!(session.count, 1);
        assert!(!session.view.reset_prompt);
        assert!(session.history.is_empty());
    }

    #[test]
    fn count_may_pass_target() {
        let session = Session {
            count: 14,
            target: target(14),
            ..Session::default()
        };
        let session = session.apply(Action::Increment, now());
        assert_eq!(session.count, 15);
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn newest_archive_goes_first_with_distinct_ids() {
        let mut session = Session::default();
        for n in 1..=3 {
            session = Session { count: n, ..session }.apply(Action::ConfirmReset { archive: true }, now());
        }
        let counts: Vec<u64> = session.history.iter().map(|item| item.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);

        let mut ids: Vec<&str> = session.history.iter().map(|item| item.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn delete_removes_only_the_matching_item() {
        let mut session = Session::default();
        for n in 1..=3 {
            let at = now() + Duration::minutes(n as i64);
            session = Session { count: n, ..session }.apply(Action::ConfirmReset { archive: true }, at);
        }
        let doomed = session.history[1].id.clone();

        let session = session.apply(Action::DeleteHistoryItem(doomed), now());
        let counts: Vec<u64> = session.history.iter().map(|item| item.count).collect();
        assert_eq!(counts, vec![3, 1]);

        let unchanged = session.apply(Action::DeleteHistoryItem("missing".into()), now());
        assert_eq!(unchanged, session);
    }

    #[test]
    fn preset_exits_custom_mode_and_custom_keeps_target() {
        let session = Session::default().apply(Action::EnterCustomTarget, now());
        assert!(session.view.custom_target);
        assert_eq!(session.target, target(100));

        let session = session.apply(Action::SelectPreset(target(34)), now());
        assert!(!session.view.custom_target);
        assert_eq!(session.target, target(34));
    }

    #[test]
    fn manual_target_ignores_bad_input() {
        let session = Session::default().apply(Action::EnterCustomTarget, now());
        for raw in ["", "abc", "0", "-5", "12.5"] {
            let next = session.apply(Action::ManualTarget(raw.into()), now());
            assert_eq!(next.target, target(100), "input {raw:?}");
        }

        let next = session.apply(Action::ManualTarget(" 313 ".into()), now());
        assert_eq!(next.target, target(313));
    }

    #[test]
    fn manual_target_outside_custom_mode_is_ignored() {
        let session = Session::default().apply(Action::ManualTarget("50".into()), now());
        assert_eq!(session.target, target(100));
    }

    #[test]
    fn clearing_custom_target_restores_default() {
        let session = run(
            Session::default(),
            [
                Action::EnterCustomTarget,
                Action::ManualTarget("7".into()),
                Action::ClearCustomTarget,
            ],
        );
        assert!(!session.view.custom_target);
        assert_eq!(session.target, target(100));
    }

    #[test]
    fn loading_a_non_preset_target_opens_custom_mode() {
        let session = Session::from_persisted(PersistedState {
            target: target(313),
            ..PersistedState::default()
        });
        assert!(session.view.custom_target);
        assert!(!Session::default().view.custom_target);
    }

    #[test]
    fn panels_and_preferences_toggle() {
        let session = run(
            Session::default(),
            [
                Action::OpenSettings,
                Action::ToggleVibration,
                Action::SelectTheme(ThemeId::Blue),
                Action::OpenHistory,
            ],
        );
        assert!(session.view.settings_open);
        assert!(session.view.history_open);
        assert!(!session.vibration_enabled);
        assert_eq!(session.theme, ThemeId::Blue);

        let session = run(session, [Action::CloseSettings, Action::CloseHistory]);
        assert!(!session.view.settings_open);
        assert!(!session.view.history_open);
    }

    #[test]
    fn requests_parse_into_actions() {
        assert_eq!(
            Action::try_from(request("confirm_reset", Some("true"))).unwrap(),
            Action::ConfirmReset { archive: true }
        );
        assert_eq!(
            Action::try_from(request("select_target", Some("custom"))).unwrap(),
            Action::EnterCustomTarget
        );
        assert_eq!(
            Action::try_from(request("select_target", Some("1000"))).unwrap(),
            Action::SelectPreset(target(1000))
        );
        assert_eq!(
            Action::try_from(request("select_theme", Some("emerald"))).unwrap(),
            Action::SelectTheme(ThemeId::Emerald)
        );
        assert_eq!(
            Action::try_from(request("manual_target", Some("abc"))).unwrap(),
            Action::ManualTarget("abc".into())
        );
    }

    #[test]
    fn malformed_requests_are_rejected() {
        for (action, value) in [
            ("explode", None),
            ("confirm_reset", None),
            ("select_target", Some("35")),
            ("select_theme", Some("purple")),
            ("delete_history", None),
        ] {
            let err = Action::try_from(request(action, value)).unwrap_err();
            assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST, "{action}");
        }
    }
}
