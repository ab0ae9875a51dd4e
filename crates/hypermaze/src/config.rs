//! Server settings, read from the environment.

use std::str::FromStr;

use hypermaze_coordinator::CoordinatorConfig;
use hypermaze_maze::MAX_CELLS;
use serde::{Deserialize, Serialize};

use crate::HypermazeError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Everything needed to start a [`HypermazeServer`](crate::HypermazeServer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub bind_addr: String,
    pub coordinator: CoordinatorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            coordinator: CoordinatorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `HYPERMAZE_BLOCK_SIZE` and
    /// `HYPERMAZE_MAX_MEMBERS`. Unset variables keep their defaults.
    ///
    /// # Errors
    /// [`HypermazeError::InvalidConfig`] if a variable is set but doesn't
    /// parse, or if the block size and member cap could never build a maze.
    pub fn from_env() -> Result<Self, HypermazeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), with variables supplied by
    /// `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, HypermazeError> {
        let defaults = CoordinatorConfig::default();

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);
        let block_size =
            parse_var(&lookup, "HYPERMAZE_BLOCK_SIZE")?.unwrap_or(defaults.block_size);
        let max_members =
            parse_var(&lookup, "HYPERMAZE_MAX_MEMBERS")?.unwrap_or(defaults.max_members);

        if max_members == 0 {
            return Err(HypermazeError::InvalidConfig {
                key: "HYPERMAZE_MAX_MEMBERS",
                value: "0".into(),
            });
        }
        if block_size < 3 {
            return Err(HypermazeError::InvalidConfig {
                key: "HYPERMAZE_BLOCK_SIZE",
                value: block_size.to_string(),
            });
        }
        // A full session plays in max_members + 1 dimensions.
        if !fits_cell_limit(block_size | 1, max_members.saturating_add(1)) {
            return Err(HypermazeError::InvalidConfig {
                key: "HYPERMAZE_MAX_MEMBERS",
                value: max_members.to_string(),
            });
        }

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            coordinator: CoordinatorConfig {
                block_size,
                max_members,
            },
        })
    }
}

fn fits_cell_limit(side: usize, dimensions: usize) -> bool {
    u32::try_from(dimensions)
        .ok()
        .and_then(|d| side.checked_pow(d))
        .is_some_and(|cells| cells <= MAX_CELLS)
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, HypermazeError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(HypermazeError::InvalidConfig { key, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("HYPERMAZE_BLOCK_SIZE", "11"),
            ("HYPERMAZE_MAX_MEMBERS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8081");
        assert_eq!(config.coordinator.block_size, 11);
        assert_eq!(config.coordinator.max_members, 3);
    }

    #[test]
    fn test_from_lookup_bad_port_is_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(
            err,
            HypermazeError::InvalidConfig { key: "PORT", .. }
        ));
    }

    #[test]
    fn test_from_lookup_zero_members_is_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("HYPERMAZE_MAX_MEMBERS", "0")]))
            .unwrap_err();
        assert!(matches!(
            err,
            HypermazeError::InvalidConfig {
                key: "HYPERMAZE_MAX_MEMBERS",
                ..
            }
        ));
    }

    #[test]
    fn test_from_lookup_tiny_block_size_is_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("HYPERMAZE_BLOCK_SIZE", "1")]))
            .unwrap_err();
        assert!(matches!(
            err,
            HypermazeError::InvalidConfig {
                key: "HYPERMAZE_BLOCK_SIZE",
                ..
            }
        ));
    }

    #[test]
    fn test_from_lookup_maze_over_cell_limit_is_error() {
        // A full 7-member session needs a 9^8 maze.
        let err = ServerConfig::from_lookup(lookup_from(&[("HYPERMAZE_MAX_MEMBERS", "7")]))
            .unwrap_err();
        assert!(matches!(
            err,
            HypermazeError::InvalidConfig {
                key: "HYPERMAZE_MAX_MEMBERS",
                ..
            }
        ));
    }

    #[test]
    fn test_from_lookup_even_block_size_checked_as_odd() {
        // 10 rounds up to 11; 11^5 still fits.
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HYPERMAZE_BLOCK_SIZE", "10"),
            ("HYPERMAZE_MAX_MEMBERS", "4"),
        ]))
        .unwrap();
        assert_eq!(config.coordinator.block_size, 10);
    }
}
