//! wechat-notify 主程序入口
//!
//! 企业微信构建通知插件

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use wechat_notify::cli::commands::already_reported;
use wechat_notify::cli::{Args, Command, Commands, RenderCommand, SendCommand};
use wechat_notify::logging::{LogConfig, LoggingSystem};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();

    // 初始化日志系统
    let log_config = LogConfig {
        level: args.log_level.clone().into(),
        json_format: args.log_json,
    };

    let logging_system = LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    info!("wechat-notify v{} 启动", wechat_notify::VERSION);

    let command = args.command();
    let result = match command {
        Commands::Send => SendCommand::new(Some(logging_system)).execute(&args).await,
        Commands::Render => RenderCommand.execute(&args).await,
    };

    if let Err(e) = result {
        if !already_reported(&command, &e) {
            error!("命令执行失败: {}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
