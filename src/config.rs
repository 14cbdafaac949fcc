use std::path::Path;

use crate::ai::{AdaptiveDepth, Agent, DepthPolicy, FixedDepth, MinimaxAgent, RandomAgent};
use crate::error::ConfigError;
use crate::game::Player;

/// Deepest search the config accepts. Node count grows as 7^depth.
pub const MAX_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fixed,
    Adaptive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Minimax,
    Random,
}

/// How the minimax opponent picks its ply budget.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub policy: PolicyKind,
    pub depth: usize,
    pub shallow_depth: usize,
    pub deep_depth: usize,
    pub history_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let adaptive = AdaptiveDepth::default();
        SearchConfig {
            policy: PolicyKind::Adaptive,
            depth: adaptive.deep,
            shallow_depth: adaptive.shallow,
            deep_depth: adaptive.deep,
            history_capacity: 100,
        }
    }
}

impl SearchConfig {
    pub fn build_policy(&self) -> Box<dyn DepthPolicy> {
        match self.policy {
            PolicyKind::Fixed => Box::new(FixedDepth(self.depth)),
            PolicyKind::Adaptive => Box::new(AdaptiveDepth {
                shallow: self.shallow_depth,
                deep: self.deep_depth,
            }),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub first_player: Player,
    pub opponent: OpponentKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            first_player: Player::Human,
            opponent: OpponentKind::Minimax,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.search;
        for (name, depth) in [
            ("search.depth", search.depth),
            ("search.shallow_depth", search.shallow_depth),
            ("search.deep_depth", search.deep_depth),
        ] {
            if depth == 0 || depth > MAX_DEPTH {
                return Err(ConfigError::Validation(format!(
                    "{name} must be in [1, {MAX_DEPTH}]"
                )));
            }
        }
        if search.shallow_depth > search.deep_depth {
            return Err(ConfigError::Validation(
                "search.shallow_depth must be <= search.deep_depth".into(),
            ));
        }
        if search.history_capacity == 0 {
            return Err(ConfigError::Validation(
                "search.history_capacity must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Build the computer opponent described by this configuration.
    pub fn build_agent(&self) -> Box<dyn Agent> {
        match self.game.opponent {
            OpponentKind::Minimax => Box::new(
                MinimaxAgent::new(self.search.build_policy())
                    .with_history_capacity(self.search.history_capacity),
            ),
            OpponentKind::Random => Box::new(RandomAgent::new()),
        }
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::SearchHistory;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.search.policy, PolicyKind::Adaptive);
        assert_eq!(config.game.first_player, Player::Human);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[search]
policy = "fixed"
depth = 4
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.policy, PolicyKind::Fixed);
        assert_eq!(config.search.depth, 4);
        // Other fields should be defaults
        assert_eq!(config.search.deep_depth, 7);
        assert_eq!(config.game.opponent, OpponentKind::Minimax);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.search.shallow_depth, default.search.shallow_depth);
        assert_eq!(config.search.history_capacity, default.search.history_capacity);
        assert_eq!(config.game.first_player, default.game.first_player);
    }

    #[test]
    fn test_game_section_parses() {
        let toml_str = r#"
[game]
first_player = "ai"
opponent = "random"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.first_player, Player::Ai);
        assert_eq!(config.game.opponent, OpponentKind::Random);
        assert_eq!(config.build_agent().name(), "Random");
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let toml_str = r#"
[search]
policy = "iterative"
"#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_depth() {
        let mut config = AppConfig::default();
        config.search.deep_depth = MAX_DEPTH + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_shallow_above_deep() {
        let mut config = AppConfig::default();
        config.search.shallow_depth = 8;
        config.search.deep_depth = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_history() {
        let mut config = AppConfig::default();
        config.search.history_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_policy() {
        let history = SearchHistory::new();
        let mut search = SearchConfig {
            policy: PolicyKind::Fixed,
            depth: 3,
            ..SearchConfig::default()
        };
        assert_eq!(search.build_policy().select_depth(&history), 3);

        search.policy = PolicyKind::Adaptive;
        search.deep_depth = 6;
        assert_eq!(search.build_policy().select_depth(&history), 6);
    }

    #[test]
    fn test_build_minimax_agent() {
        let agent = AppConfig::default().build_agent();
        assert_eq!(agent.name(), "Minimax");
        assert!(agent.history().is_some());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.search.depth, 7);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[search]
shallow_depth = 3
deep_depth = 4
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.search.shallow_depth, 3);
        assert_eq!(config.search.deep_depth, 4);
        // Others are defaults
        assert_eq!(config.search.policy, PolicyKind::Adaptive);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[search]\nhistory_capacity = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
