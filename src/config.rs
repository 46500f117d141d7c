use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::GameRules;
use crate::io::DisplaySettings;

fn default_pace_ms() -> u64 {
    2500
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RulesInput {
    #[serde(default)]
    pub blackjack: Option<u8>,
    #[serde(default)]
    pub dealer_stands_on: Option<u8>,
    #[serde(default)]
    pub reshuffle_below: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayInput {
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,
    #[serde(default)]
    pub clear_screen: Option<bool>,
}

impl Default for DisplayInput {
    fn default() -> Self {
        DisplayInput {
            pace_ms: default_pace_ms(),
            clear_screen: None,
        }
    }
}

/// Settings for one console session, usually read from a JSON file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub rules: RulesInput,
    #[serde(default)]
    pub display: DisplayInput,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = fs::read_to_string(path)?;
        SessionConfig::from_json(&text)
    }
}

/// Parameters for a scripted session (the wasm entry point).
#[derive(Debug, Deserialize)]
pub struct SessionInput {
    pub name: String,
    pub answers: Vec<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rules: RulesInput,
}

pub fn to_game_rules(rules: &RulesInput) -> Result<GameRules, GameError> {
    let defaults = GameRules::default();
    let game_rules = GameRules {
        blackjack: rules.blackjack.unwrap_or(defaults.blackjack),
        dealer_stands_on: rules.dealer_stands_on.unwrap_or(defaults.dealer_stands_on),
        reshuffle_below: rules.reshuffle_below.unwrap_or(defaults.reshuffle_below),
    };

    // Aces drop by 10, so anything at or below that can't be scored sensibly.
    if game_rules.blackjack <= 10 {
        return Err(GameError::Config(format!(
            "blackjack target must be above 10, got {}",
            game_rules.blackjack
        )));
    }
    if game_rules.dealer_stands_on == 0 || game_rules.dealer_stands_on > game_rules.blackjack {
        return Err(GameError::Config(format!(
            "dealer must stand somewhere in 1..={}, got {}",
            game_rules.blackjack, game_rules.dealer_stands_on
        )));
    }
    if game_rules.reshuffle_below > 52 {
        return Err(GameError::Config(format!(
            "reshuffle threshold can't exceed a 52-card deck, got {}",
            game_rules.reshuffle_below
        )));
    }
    Ok(game_rules)
}

pub fn to_display_settings(display: &DisplayInput) -> DisplaySettings {
    DisplaySettings {
        pace: Duration::from_millis(display.pace_ms),
        clear_screen: display.clear_screen.unwrap_or(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_standard_rules() {
        let config = SessionConfig::from_json("{}").unwrap();
        let rules = to_game_rules(&config.rules).unwrap();
        assert_eq!(rules.blackjack, 21);
        assert_eq!(rules.dealer_stands_on, 17);
        assert_eq!(rules.reshuffle_below, 15);

        let display = to_display_settings(&config.display);
        assert_eq!(display.pace, Duration::from_millis(2500));
        assert!(display.clear_screen);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = SessionConfig::from_json(
            r#"{
                "rules": { "dealer_stands_on": 16, "reshuffle_below": 20 },
                "display": { "pace_ms": 0, "clear_screen": false },
                "seed": 99
            }"#,
        )
        .unwrap();
        let rules = to_game_rules(&config.rules).unwrap();
        assert_eq!(rules.dealer_stands_on, 16);
        assert_eq!(rules.reshuffle_below, 20);
        assert!(to_display_settings(&config.display).pace.is_zero());
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn dealer_threshold_above_target_is_rejected() {
        let rules = RulesInput {
            dealer_stands_on: Some(22),
            ..RulesInput::default()
        };
        assert!(matches!(to_game_rules(&rules), Err(GameError::Config(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SessionConfig::from_json("{ rules: "),
            Err(GameError::ConfigParse(_))
        ));
    }
}
