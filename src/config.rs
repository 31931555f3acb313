use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default number of logical cells along each side of the board.
pub const DEFAULT_GRID_SIZE: u16 = 32;

/// Default number of body segments at session start.
pub const DEFAULT_INITIAL_LENGTH: u16 = 3;

/// Default shell tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Smallest tick interval the shell accepts.
pub const MIN_TICK_INTERVAL_MS: u64 = 30;

/// Square board dimensions passed through the simulation as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub side: u16,
}

impl GridSize {
    #[must_use]
    pub fn new(side: u16) -> Self {
        Self { side }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.side) * usize::from(self.side)
    }

    /// Side length as a signed coordinate bound.
    #[must_use]
    pub fn bound(self) -> i32 {
        i32::from(self.side)
    }
}

/// Session parameters, loadable from JSON and overridable from the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub grid_size: u16,
    pub initial_length: u16,
    /// Fixed RNG seed for reproducible runs; `None` draws OS entropy.
    pub seed: Option<u64>,
    /// Only read by the shell; the simulation itself has no notion of time.
    pub tick_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_length: DEFAULT_INITIAL_LENGTH,
            seed: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::new(self.grid_size)
    }

    /// Checks the construction-time contract of a session.
    ///
    /// A board needs at least one free cell next to the seeded body, and the
    /// vertical seeding column must not wrap onto itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall {
                grid_size: self.grid_size,
            });
        }
        if self.initial_length == 0 {
            return Err(ConfigError::EmptyBody);
        }
        if self.initial_length > self.grid_size {
            return Err(ConfigError::BodyTooLong {
                initial_length: self.initial_length,
                grid_size: self.grid_size,
            });
        }
        Ok(())
    }
}

/// Per-field replacements for a loaded config, typically from command-line flags.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ConfigOverrides {
    pub grid_size: Option<u16>,
    pub initial_length: Option<u16>,
    pub seed: Option<u64>,
    pub tick_interval_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Replaces every field that is set here, then validates the result.
    pub fn apply(self, mut config: SessionConfig) -> Result<SessionConfig, ConfigError> {
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(initial_length) = self.initial_length {
            config.initial_length = initial_length;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(tick_interval_ms) = self.tick_interval_ms {
            config.tick_interval_ms = tick_interval_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Reads a JSON session config. Missing fields fall back to defaults.
pub fn load_config(path: &Path) -> Result<SessionConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw)
}

fn parse_config(raw: &str) -> Result<SessionConfig, ConfigError> {
    let config: SessionConfig = serde_json::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;

    use super::{ConfigOverrides, DEFAULT_GRID_SIZE, GridSize, SessionConfig, parse_config};

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config = parse_config(r#"{ "grid_size": 12, "seed": 9 }"#)
            .expect("partial config should parse");

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.initial_length, SessionConfig::default().initial_length);
    }

    #[test]
    fn empty_object_is_the_default_config() {
        let config = parse_config("{}").expect("empty object should parse");
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.grid().side, DEFAULT_GRID_SIZE);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            parse_config(r#"{ "grid_width": 10 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn validation_rejects_degenerate_boards() {
        let tiny = SessionConfig {
            grid_size: 1,
            initial_length: 1,
            ..SessionConfig::default()
        };
        assert!(matches!(
            tiny.validate(),
            Err(ConfigError::GridTooSmall { grid_size: 1 })
        ));

        let empty = SessionConfig {
            initial_length: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyBody)));

        let long = SessionConfig {
            grid_size: 4,
            initial_length: 5,
            ..SessionConfig::default()
        };
        assert!(matches!(
            long.validate(),
            Err(ConfigError::BodyTooLong { .. })
        ));
    }

    #[test]
    fn overrides_replace_only_the_fields_they_set() {
        let loaded = parse_config(r#"{ "grid_size": 12, "initial_length": 4, "seed": 9 }"#)
            .expect("config should parse");
        let overrides = ConfigOverrides {
            grid_size: Some(20),
            tick_interval_ms: Some(80),
            ..ConfigOverrides::default()
        };

        let merged = overrides.apply(loaded).expect("merged config is valid");

        assert_eq!(merged.grid_size, 20);
        assert_eq!(merged.tick_interval_ms, 80);
        assert_eq!(merged.initial_length, 4);
        assert_eq!(merged.seed, Some(9));
    }

    #[test]
    fn empty_overrides_keep_the_loaded_config() {
        let loaded = parse_config(r#"{ "seed": 3 }"#).expect("config should parse");
        assert_eq!(ConfigOverrides::default().apply(loaded).ok(), Some(loaded));
    }

    #[test]
    fn overrides_are_validated_after_merging() {
        // A length that fits the file's grid but not the overridden one.
        let loaded = parse_config(r#"{ "grid_size": 10, "initial_length": 6 }"#)
            .expect("config should parse");
        let overrides = ConfigOverrides {
            grid_size: Some(5),
            ..ConfigOverrides::default()
        };

        assert!(matches!(
            overrides.apply(loaded),
            Err(ConfigError::BodyTooLong {
                initial_length: 6,
                grid_size: 5
            })
        ));
    }

    #[test]
    fn total_cells_is_side_squared() {
        assert_eq!(GridSize::new(8).total_cells(), 64);
    }
}
