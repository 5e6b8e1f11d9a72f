//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`BattleConfig::default`].
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.sp_cap > battle_core::SP_CAP {
            tracing::warn!(
                sp_cap = config.sp_cap,
                limit = battle_core::SP_CAP,
                "configured SP cap exceeds the global limit and will be clamped"
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
basic_attack_sp_gain = 2

[damage]
minimum_damage = 0
"#,
        )
        .expect("config should parse");

        assert_eq!(config.basic_attack_sp_gain, 2);
        assert_eq!(config.damage.minimum_damage, 0);
        assert_eq!(config.damage.defense_divisor, 2);
        assert_eq!(config.default_timing.windup_ms, 350);
    }
}
