//! 命令处理逻辑
//!
//! 实现 send / render 两个子命令

use crate::cli::args::{Args, Commands};
use crate::config::{Config, NotificationConfig, NotificationSettings, TomlConfigLoader};
use crate::error::{Result, WeChatNotifyError};
use crate::logging::{mask_webhook_url, LoggingSystem};
use crate::notification::{Build, WeChatSender};
use async_trait::async_trait;
use tracing::info;

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self, args: &Args) -> Result<()>;
}

/// 合并配置文件和命令行参数，得到最终的通知配置
///
/// 命令行（含环境变量）中给出的字段覆盖配置文件中的同名字段。
pub async fn resolve_config(args: &Args) -> Result<NotificationConfig> {
    let file_config = match &args.config {
        Some(path) => TomlConfigLoader::new(true).load_from_file(path).await?,
        None => Config::default(),
    };

    let overrides: NotificationSettings = args.notification.clone().into();
    let config = file_config.notification.merge(overrides).into_config()?;
    Ok(config)
}

/// 错误是否已由命令自身写入日志
///
/// send 命令的发送失败已经写入通知日志，入口处不再重复记录。
pub fn already_reported(command: &Commands, error: &WeChatNotifyError) -> bool {
    *command == Commands::Send && matches!(error, WeChatNotifyError::Send(_))
}

/// 发送命令
pub struct SendCommand {
    /// 日志系统，用于记录发送结果
    logging: Option<LoggingSystem>,
}

impl SendCommand {
    pub fn new(logging: Option<LoggingSystem>) -> Self {
        Self { logging }
    }
}

#[async_trait]
impl Command for SendCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        let config = resolve_config(args).await?;
        let build: Build = args.build.clone().into();

        info!(
            "发送构建通知: {}/{} #{} ({})",
            build.owner, build.name, build.number, build.status
        );

        let sender = WeChatSender::new()?;
        let result = sender.send(&config, &build).await;

        if let Some(logging) = &self.logging {
            let error = result.as_ref().err().map(|e| e.to_string());
            logging.notification_log(
                &config.msg_type,
                &mask_webhook_url(&config.url),
                result.is_ok(),
                error.as_deref(),
            );
        }

        result?;
        Ok(())
    }
}

/// 渲染命令，打印将要发送的消息体
pub struct RenderCommand;

#[async_trait]
impl Command for RenderCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        let config = resolve_config(args).await?;
        let build: Build = args.build.clone().into();

        let payload = WeChatSender::prepare(&config, &build)?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        Ok(())
    }
}
