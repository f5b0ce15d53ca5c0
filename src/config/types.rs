//! 配置数据结构定义
//!
//! 定义通知配置结构体、配置合并和验证逻辑

use crate::error::ConfigError;
use crate::notification::payload::MessageType;
use crate::notification::template::{validate_template, DEFAULT_CONTENT_TEMPLATE};
use serde::{Deserialize, Serialize};

/// 配置文件根结构
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// 通知配置项
    #[serde(default)]
    pub notification: NotificationSettings,
}

/// 可部分提供的通知配置
///
/// 配置文件和命令行都只给出一部分字段，合并后再转换为 [`NotificationConfig`]。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationSettings {
    /// webhook URL
    pub url: Option<String>,
    /// 消息类型（text / markdown）
    pub msg_type: Option<String>,
    /// 消息模板
    pub content: Option<String>,
    /// 逗号分隔的@成员列表
    pub mentioned_list: Option<String>,
    /// 逗号分隔的@手机号列表
    pub mentioned_mobile_list: Option<String>,
}

impl NotificationSettings {
    /// 合并配置，`overrides` 中已设置的字段优先
    pub fn merge(self, overrides: NotificationSettings) -> Self {
        Self {
            url: overrides.url.or(self.url),
            msg_type: overrides.msg_type.or(self.msg_type),
            content: overrides.content.or(self.content),
            mentioned_list: overrides.mentioned_list.or(self.mentioned_list),
            mentioned_mobile_list: overrides
                .mentioned_mobile_list
                .or(self.mentioned_mobile_list),
        }
    }

    /// 补全默认值并验证，得到完整的通知配置
    ///
    /// # 返回
    /// * `Result<NotificationConfig, ConfigError>` - 缺少URL或验证失败时返回错误
    pub fn into_config(self) -> Result<NotificationConfig, ConfigError> {
        let url = self
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::ValidationError("未配置webhook URL".to_string()))?;

        let config = NotificationConfig {
            url,
            msg_type: self.msg_type.unwrap_or_else(default_msg_type),
            content: self.content.unwrap_or_else(default_content),
            mentioned_list: self.mentioned_list.unwrap_or_default(),
            mentioned_mobile_list: self.mentioned_mobile_list.unwrap_or_default(),
        };

        validate_config(&config).map_err(ConfigError::ValidationError)?;
        Ok(config)
    }
}

/// 单次发送使用的通知配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    /// webhook URL
    pub url: String,
    /// 消息类型
    #[serde(default = "default_msg_type")]
    pub msg_type: String,
    /// 消息模板
    #[serde(default = "default_content")]
    pub content: String,
    /// 逗号分隔的@成员列表
    #[serde(default)]
    pub mentioned_list: String,
    /// 逗号分隔的@手机号列表
    #[serde(default)]
    pub mentioned_mobile_list: String,
}

// 默认值函数
fn default_msg_type() -> String {
    "text".to_string()
}
fn default_content() -> String {
    DEFAULT_CONTENT_TEMPLATE.to_string()
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &NotificationConfig) -> Result<(), String> {
    // 验证URL格式
    if !config.url.starts_with("http://") && !config.url.starts_with("https://") {
        return Err(format!("webhook URL格式无效: {}", config.url));
    }

    // 验证消息类型
    if config.msg_type.parse::<MessageType>().is_err() {
        return Err(format!(
            "无效的消息类型: {}，支持的类型: {:?}",
            config.msg_type,
            [MessageType::Text.as_str(), MessageType::Markdown.as_str()]
        ));
    }

    // 验证模板语法
    validate_template(&config.content).map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str) -> NotificationSettings {
        NotificationSettings {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_config_applies_defaults() {
        let config = settings("https://example.com/hook").into_config().unwrap();
        assert_eq!(config.msg_type, "text");
        assert_eq!(config.content, DEFAULT_CONTENT_TEMPLATE);
        assert!(config.mentioned_list.is_empty());
        assert!(config.mentioned_mobile_list.is_empty());
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let result = NotificationSettings::default().into_config();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = settings("   ").into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = NotificationSettings {
            url: Some("https://file.example.com".to_string()),
            msg_type: Some("markdown".to_string()),
            mentioned_list: Some("alice".to_string()),
            ..Default::default()
        };
        let cli = NotificationSettings {
            url: Some("https://cli.example.com".to_string()),
            content: Some("{{status}}".to_string()),
            ..Default::default()
        };

        let merged = file.merge(cli);
        assert_eq!(merged.url.as_deref(), Some("https://cli.example.com"));
        assert_eq!(merged.msg_type.as_deref(), Some("markdown"));
        assert_eq!(merged.content.as_deref(), Some("{{status}}"));
        assert_eq!(merged.mentioned_list.as_deref(), Some("alice"));
        assert!(merged.mentioned_mobile_list.is_none());
    }

    #[test]
    fn test_validate_config_errors() {
        let mut config = settings("https://example.com/hook").into_config().unwrap();
        assert!(validate_config(&config).is_ok());

        config.msg_type = "news".to_string();
        assert!(validate_config(&config).unwrap_err().contains("news"));

        config.msg_type = "markdown".to_string();
        config.content = "{{owner".to_string();
        assert!(validate_config(&config).is_err());

        config.content = "{{owner}}".to_string();
        config.url = "ftp://example.com".to_string();
        assert!(validate_config(&config).unwrap_err().contains("URL"));
    }
}
