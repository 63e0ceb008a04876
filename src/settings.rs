//! Player preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

/// Avatar skins (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Avatar {
    #[default]
    Bird1,
    Bird2,
    Bird3,
}

impl Avatar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Avatar::Bird1 => "bird1",
            Avatar::Bird2 => "bird2",
            Avatar::Bird3 => "bird3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bird1" => Some(Avatar::Bird1),
            "bird2" => Some(Avatar::Bird2),
            "bird3" => Some(Avatar::Bird3),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last name entered on the start screen
    pub player_name: String,
    pub avatar: Avatar,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Chad".to_string(),
            avatar: Avatar::Bird1,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Settings {
    const STORAGE_KEY: &'static str = "flappy_mode_settings";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Stored preferences, or defaults when missing or unreadable
    pub fn load() -> Self {
        let stored = Self::storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.map(|json| serde_json::from_str::<Settings>(&json)) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not write settings to LocalStorage");
                }
            }
            Err(e) => log::warn!("Could not encode settings: {e}"),
        }
    }
}

/// Nothing is persisted natively
#[cfg(not(target_arch = "wasm32"))]
impl Settings {
    pub fn load() -> Self {
        Self::default()
    }

    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_names_round_trip() {
        for avatar in [Avatar::Bird1, Avatar::Bird2, Avatar::Bird3] {
            assert_eq!(Avatar::from_str(avatar.as_str()), Some(avatar));
        }
        assert_eq!(Avatar::from_str("BIRD2"), Some(Avatar::Bird2));
        assert_eq!(Avatar::from_str("bird9"), None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "avatar": "Bird2" }"#).unwrap();
        assert_eq!(settings.player_name, "Chad");
        assert_eq!(settings.avatar, Avatar::Bird2);
    }
}
