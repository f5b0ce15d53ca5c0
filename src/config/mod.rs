//! 配置管理模块
//!
//! 提供通知配置定义、TOML配置文件解析和验证功能

pub mod loader;
pub mod types;

// 重新导出主要类型
pub use loader::TomlConfigLoader;
pub use types::{validate_config, Config, NotificationConfig, NotificationSettings};
