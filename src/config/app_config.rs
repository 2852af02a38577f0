use anyhow::{Context, Result};
use pill_core::{Medicine, MedicineCatalog};
use pill_dispenser::DispenserConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.toml";

/// 配置作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigScope {
    Auto,
    Local,
    Global,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 提醒检查间隔（秒，默认: 60）
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// 药盒设备配置
    #[serde(default)]
    pub dispenser: DispenserConfig,

    /// 额外药品（同名覆盖内置表）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medicines: Vec<Medicine>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            dispenser: DispenserConfig::default(),
            medicines: Vec::new(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl AppConfig {
    /// 全局目录：~/.pillminder/
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pillminder")
    }

    /// 本地目录：./.pillminder/
    pub fn local_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".pillminder")
    }

    /// 检查本地配置是否存在
    /// 注意：如果当前目录是用户主目录，则不认为是本地配置
    pub fn has_local_config() -> bool {
        let current_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(_) => return false,
        };

        if let Some(home) = dirs::home_dir() {
            let current_canonical = current_dir.canonicalize().unwrap_or(current_dir.clone());
            let home_canonical = home.canonicalize().unwrap_or(home);

            if current_canonical == home_canonical {
                return false;
            }
        }

        Self::local_dir().join(CONFIG_FILE).exists()
    }

    /// 验证作用域标志（不能同时指定 local 和 global）
    pub fn validate_scope_flags(local: bool, global: bool) -> Result<()> {
        if local && global {
            anyhow::bail!("Cannot specify both --local and --global, please choose one");
        }
        Ok(())
    }

    /// 获取当前作用域名称
    pub fn get_scope_name(force_local: bool, force_global: bool) -> &'static str {
        if force_local {
            "local"
        } else if force_global {
            "global"
        } else if Self::has_local_config() {
            "local"
        } else {
            "global"
        }
    }

    /// 根据 local 标志获取配置目录
    pub fn get_dir(local: bool) -> PathBuf {
        if local {
            Self::local_dir()
        } else {
            Self::global_dir()
        }
    }

    /// 加载配置：
    /// - local = true: 强制使用本地配置
    /// - global = true: 强制使用全局配置
    /// - 两者都为 false: 优先本地配置，其次全局配置，最后默认配置
    pub fn load_with_scope(force_local: bool, force_global: bool) -> Result<Self> {
        Self::validate_scope_flags(force_local, force_global)?;

        let scope = if force_local {
            ConfigScope::Local
        } else if force_global {
            ConfigScope::Global
        } else {
            ConfigScope::Auto
        };

        let path = match scope {
            ConfigScope::Auto if Self::has_local_config() => Self::local_dir().join(CONFIG_FILE),
            ConfigScope::Auto | ConfigScope::Global => Self::global_dir().join(CONFIG_FILE),
            ConfigScope::Local => Self::local_dir().join(CONFIG_FILE),
        };

        Self::load_from_path(&path)
    }

    /// 从指定路径加载配置文件，文件不存在时使用默认配置
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;

        tracing::debug!("Loaded app config from: {}", path.display());
        tracing::debug!("Dispenser: {} (enabled: {})", config.dispenser.address, config.dispenser.enabled);

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be greater than 0");
        }
        if self.dispenser.timeout_secs == 0 {
            anyhow::bail!("dispenser.timeout_secs must be greater than 0");
        }
        for medicine in &self.medicines {
            if medicine.name.trim().is_empty() {
                anyhow::bail!("Medicine entries need a name");
            }
            let bounds = [medicine.min_dosage, medicine.max_dosage];
            if bounds.iter().any(|b| !b.is_finite() || *b < 0.0) {
                anyhow::bail!(
                    "Medicine {}: dosage bounds must be finite and not negative",
                    medicine.name
                );
            }
            if medicine.min_dosage > medicine.max_dosage {
                anyhow::bail!(
                    "Medicine {}: min_dosage ({}) is greater than max_dosage ({})",
                    medicine.name,
                    medicine.min_dosage,
                    medicine.max_dosage
                );
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// 内置药品表 + 配置中的药品
    pub fn catalog(&self) -> MedicineCatalog {
        let mut catalog = MedicineCatalog::builtin();
        catalog.extend(self.medicines.iter().cloned());
        catalog
    }

    /// 保存配置到指定路径
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let toml_str = r#"
poll_interval_secs = 30

[dispenser]
enabled = false
address = "10.0.0.5:8080"
timeout_secs = 2

[[medicines]]
name = "Melatonin"
min_dosage = 1
max_dosage = 2
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert!(!config.dispenser.enabled);
        assert_eq!(config.dispenser.address, "10.0.0.5:8080");
        assert_eq!(config.dispenser.timeout_secs, 2);
        assert_eq!(config.medicines.len(), 1);
        assert!(config.catalog().validate("melatonin", "2").is_ok());
    }

    #[test]
    fn test_default_values() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.poll_interval_secs, 60);
        assert!(config.dispenser.enabled);
        assert_eq!(config.dispenser.address, "192.168.241.163");
        assert_eq!(config.dispenser.timeout_secs, 5);
        assert_eq!(config.catalog().len(), 21);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_path(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.poll_interval_secs, 60);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = AppConfig {
            poll_interval_secs: 15,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.poll_interval_secs, 15);
        assert_eq!(loaded.dispenser.address, config.dispenser.address);
    }

    #[test]
    fn test_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        std::fs::write(&path, "poll_interval_secs = 0").unwrap();
        assert!(AppConfig::load_from_path(&path).is_err());

        std::fs::write(
            &path,
            "[[medicines]]\nname = \"X\"\nmin_dosage = 3\nmax_dosage = 1\n",
        )
        .unwrap();
        assert!(AppConfig::load_from_path(&path).is_err());

        std::fs::write(
            &path,
            "[[medicines]]\nname = \"X\"\nmin_dosage = nan\nmax_dosage = 1\n",
        )
        .unwrap();
        assert!(AppConfig::load_from_path(&path).is_err());

        std::fs::write(
            &path,
            "[[medicines]]\nname = \"X\"\nmin_dosage = -1\nmax_dosage = 1\n",
        )
        .unwrap();
        assert!(AppConfig::load_from_path(&path).is_err());

        std::fs::write(
            &path,
            "[[medicines]]\nname = \"X\"\nmin_dosage = 0\nmax_dosage = inf\n",
        )
        .unwrap();
        assert!(AppConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn test_scope_flags() {
        assert!(AppConfig::validate_scope_flags(true, true).is_err());
        assert!(AppConfig::validate_scope_flags(true, false).is_ok());
        assert_eq!(AppConfig::get_scope_name(true, false), "local");
        assert_eq!(AppConfig::get_scope_name(false, true), "global");
    }
}
