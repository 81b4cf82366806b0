use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, PieceSeed,
    core::{Board, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH},
};

/// Parameters a [`GameSession`](crate::GameSession) is created from.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// config file only needs to name what it changes.
///
/// ```
/// use blockfall_engine::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "width": 10 }"#)?;
/// assert_eq!((config.width, config.height), (10, 25));
/// assert!(config.validate().is_ok());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub width: u16,
    pub height: u16,
    /// Piece sequence seed. A random seed is picked when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PieceSeed>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub const MIN_DIMENSION: u16 = 4;
    pub const MAX_DIMENSION: u16 = 64;

    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = Self::MIN_DIMENSION..=Self::MAX_DIMENSION;
        if !range.contains(&self.width) {
            return Err(ConfigError::WidthOutOfRange(self.width));
        }
        if !range.contains(&self.height) {
            return Err(ConfigError::HeightOutOfRange(self.height));
        }
        Ok(())
    }

    pub(crate) fn new_board(&self) -> Board {
        Board::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SessionConfig::default();
        assert_eq!((config.width, config.height), (15, 25));
        assert_eq!(config.seed, None);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_bounds() {
        let mut config = SessionConfig {
            width: 4,
            height: 64,
            seed: None,
        };
        assert_eq!(config.validate(), Ok(()));

        config.width = 3;
        assert_eq!(config.validate(), Err(ConfigError::WidthOutOfRange(3)));
        config.width = 65;
        assert_eq!(config.validate(), Err(ConfigError::WidthOutOfRange(65)));

        config.width = 10;
        config.height = 0;
        assert_eq!(config.validate(), Err(ConfigError::HeightOutOfRange(0)));
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "board height 0 is out of range (4..=64)"
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SessionConfig = serde_json::from_str(
            r#"{ "height": 30, "seed": "0000000000000000000000000000002a" }"#,
        )
        .unwrap();
        assert_eq!(config.width, 15);
        assert_eq!(config.height, 30);
        assert_eq!(
            config.seed,
            Some(PieceSeed::from_bytes(42_u128.to_be_bytes()))
        );

        assert!(serde_json::from_str::<SessionConfig>(r#"{ "depth": 3 }"#).is_err());
    }
}
