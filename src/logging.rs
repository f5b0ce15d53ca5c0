//! 日志系统模块
//!
//! 提供结构化日志配置和初始化功能

use log::LevelFilter;
use reqwest::Url;
use serde_json::json;
use std::sync::OnceLock;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// 全局日志初始化结果，subscriber只安装一次
static LOGGING_INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 是否使用JSON格式
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            json_format: false,
        }
    }
}

/// 日志系统管理器
pub struct LoggingSystem {
    /// 配置
    config: LogConfig,
}

impl LoggingSystem {
    /// 初始化日志系统
    ///
    /// 重复调用不会重复安装subscriber，直接返回新的 `LoggingSystem` 实例。
    ///
    /// # 参数
    /// * `config` - 日志配置
    ///
    /// # 返回
    /// * `Result<LoggingSystem, anyhow::Error>` - 初始化结果
    pub fn setup_logging(config: LogConfig) -> anyhow::Result<Self> {
        LOGGING_INIT
            .get_or_init(|| Self::perform_initialization(&config).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| anyhow::anyhow!("日志系统初始化失败: {}", e))?;

        Ok(Self { config })
    }

    /// 执行实际的日志系统初始化
    fn perform_initialization(config: &LogConfig) -> anyhow::Result<()> {
        // log crate 到 tracing 的桥接
        tracing_log::LogTracer::init().map_err(|e| anyhow::anyhow!("LogTracer初始化失败: {}", e))?;
        Self::init_tracing_subscriber(config)
    }

    /// 初始化 tracing subscriber
    fn init_tracing_subscriber(config: &LogConfig) -> anyhow::Result<()> {
        let env_filter =
            EnvFilter::from_default_env().add_directive(Self::convert_level_to_directive(config.level));

        let fmt_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_ansi(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .boxed()
        };

        registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("tracing subscriber初始化失败: {}", e))?;

        tracing::debug!("日志配置: {:?}", config);
        Ok(())
    }

    /// 将 log::LevelFilter 转换为 tracing 的指令
    fn convert_level_to_directive(level: LevelFilter) -> Directive {
        use tracing_subscriber::filter::LevelFilter as TracingLevel;
        match level {
            LevelFilter::Off => TracingLevel::OFF.into(),
            LevelFilter::Error => TracingLevel::ERROR.into(),
            LevelFilter::Warn => TracingLevel::WARN.into(),
            LevelFilter::Info => TracingLevel::INFO.into(),
            LevelFilter::Debug => TracingLevel::DEBUG.into(),
            LevelFilter::Trace => TracingLevel::TRACE.into(),
        }
    }

    /// 记录通知发送日志
    ///
    /// # 参数
    /// * `msg_type` - 消息类型
    /// * `recipient` - 接收方（webhook地址，已脱敏）
    /// * `success` - 是否发送成功
    /// * `error` - 失败原因
    pub fn notification_log(
        &self,
        msg_type: &str,
        recipient: &str,
        success: bool,
        error: Option<&str>,
    ) {
        if self.config.json_format {
            let notification_entry = json!({
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "type": "notification",
                "msg_type": msg_type,
                "recipient": recipient,
                "success": success,
                "error": error.unwrap_or(""),
            });
            tracing::info!("{notification_entry}");
        } else {
            tracing::info!(
                "NOTIFICATION: {} to {} - {} {}",
                msg_type,
                recipient,
                if success { "SUCCESS" } else { "FAILED" },
                error.unwrap_or("")
            );
        }
    }
}

/// 隐藏webhook URL中名为 `key` 的查询参数
///
/// 无法解析的URL整体隐藏。
pub fn mask_webhook_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return "***".to_string();
    };

    if !parsed.query_pairs().any(|(name, _)| name == "key") {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_system_repeated_initialization() {
        let config = LogConfig {
            level: LevelFilter::Debug,
            json_format: true,
        };

        // 第一次初始化应该成功
        let system = LoggingSystem::setup_logging(config.clone()).unwrap();
        system.notification_log("text", "https://example.com", true, None);

        // 第二次初始化不会重复安装
        let system = LoggingSystem::setup_logging(LogConfig::default()).unwrap();
        system.notification_log("markdown", "https://example.com", false, Some("超时"));
    }

    #[test]
    fn test_mask_webhook_url() {
        assert_eq!(
            mask_webhook_url("https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc-123"),
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=***"
        );
        assert_eq!(
            mask_webhook_url("https://example.com/send?key=abc&debug=1"),
            "https://example.com/send?key=***&debug=1"
        );
        assert_eq!(mask_webhook_url("https://example.com/hook"), "https://example.com/hook");
    }

    #[test]
    fn test_mask_only_exact_key_parameter() {
        assert_eq!(
            mask_webhook_url(
                "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?monkey=1&key=SECRET"
            ),
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?monkey=1&key=***"
        );

        let masked = mask_webhook_url("https://example.com/send?apikey=public&key=SECRET");
        assert!(!masked.contains("SECRET"));
        assert!(masked.contains("apikey=public"));
    }

    #[test]
    fn test_mask_unparseable_url() {
        assert_eq!(mask_webhook_url("not a url?key=SECRET"), "***");
    }
}
