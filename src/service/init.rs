use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::ui::Output;

/// 显式初始化（带用户反馈）
/// local: true 表示在本地目录初始化，false 表示在全局目录初始化
pub fn initialize(local: bool) -> Result<()> {
    let output = Output::new();
    let config_dir = AppConfig::get_dir(local);
    let config_path = config_dir.join("config.toml");
    let location = AppConfig::get_scope_name(local, !local);

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory: {}", config_dir.display()))?;

    if config_path.exists() {
        // 校验已有配置
        AppConfig::load_from_path(&config_path)?;
        output.resource_action("Found", "config", &config_path);
    } else {
        AppConfig::default().save_to(&config_path)?;
        output.resource_action("Creating", "config", &config_path);
        output.note("Edit [dispenser] address to point at your pill dispenser");
    }

    output.finish("initialization", location);

    Ok(())
}
