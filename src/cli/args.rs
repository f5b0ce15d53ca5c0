//! 命令行参数定义
//!
//! 使用clap定义插件的命令行接口。所有参数都可以通过Drone插件约定的
//! 环境变量提供：插件设置为 `PLUGIN_*`，构建信息为 `DRONE_*`。

use crate::config::NotificationSettings;
use crate::notification::Build;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// wechat-notify - 企业微信构建通知插件
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wechat-notify",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long, value_name = "FILE", env = "PLUGIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        env = "PLUGIN_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// 以JSON格式输出日志
    #[arg(long, env = "PLUGIN_LOG_JSON")]
    pub log_json: bool,

    /// 通知参数
    #[command(flatten)]
    pub notification: NotificationArgs,

    /// 构建信息
    #[command(flatten)]
    pub build: BuildArgs,

    /// 子命令，缺省为 send
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    /// 获取要执行的子命令
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Send)
    }
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// 渲染模板并发送通知
    Send,

    /// 只渲染消息并打印JSON，不发送
    Render,
}

/// 通知相关参数
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct NotificationArgs {
    /// 企业微信机器人webhook地址
    #[arg(long, value_name = "URL", env = "PLUGIN_URL")]
    pub url: Option<String>,

    /// 消息类型（text / markdown）
    #[arg(long, value_name = "TYPE", env = "PLUGIN_MSGTYPE")]
    pub msg_type: Option<String>,

    /// 消息模板
    #[arg(long, value_name = "TEMPLATE", env = "PLUGIN_CONTENT")]
    pub content: Option<String>,

    /// 逗号分隔的@成员userid列表
    #[arg(long, value_name = "LIST", env = "PLUGIN_MENTIONED_LIST")]
    pub mentioned_list: Option<String>,

    /// 逗号分隔的@成员手机号列表
    #[arg(long, value_name = "LIST", env = "PLUGIN_MENTIONED_MOBILE_LIST")]
    pub mentioned_mobile_list: Option<String>,
}

impl From<NotificationArgs> for NotificationSettings {
    fn from(args: NotificationArgs) -> Self {
        Self {
            url: args.url,
            msg_type: args.msg_type,
            content: args.content,
            mentioned_list: args.mentioned_list,
            mentioned_mobile_list: args.mentioned_mobile_list,
        }
    }
}

/// 构建信息参数
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct BuildArgs {
    /// 仓库所有者
    #[arg(long, default_value = "", env = "DRONE_REPO_OWNER")]
    pub repo_owner: String,

    /// 仓库名称
    #[arg(long, default_value = "", env = "DRONE_REPO_NAME")]
    pub repo_name: String,

    /// 标签
    #[arg(long, default_value = "", env = "DRONE_TAG")]
    pub tag: String,

    /// 触发事件
    #[arg(long, default_value = "", env = "DRONE_BUILD_EVENT")]
    pub event: String,

    /// 构建序号
    #[arg(long, default_value_t = 0, env = "DRONE_BUILD_NUMBER")]
    pub build_number: u64,

    /// 提交哈希
    #[arg(long, default_value = "", env = "DRONE_COMMIT_SHA")]
    pub commit_sha: String,

    /// Git引用
    #[arg(long, default_value = "", env = "DRONE_COMMIT_REF")]
    pub commit_ref: String,

    /// 分支
    #[arg(long, default_value = "", env = "DRONE_COMMIT_BRANCH")]
    pub commit_branch: String,

    /// 提交作者
    #[arg(long, default_value = "", env = "DRONE_COMMIT_AUTHOR")]
    pub commit_author: String,

    /// 提交信息
    #[arg(long, default_value = "", env = "DRONE_COMMIT_MESSAGE")]
    pub commit_message: String,

    /// 构建状态
    #[arg(long, default_value = "", env = "DRONE_BUILD_STATUS")]
    pub build_status: String,

    /// 构建链接
    #[arg(long, default_value = "", env = "DRONE_BUILD_LINK")]
    pub build_link: String,

    /// 构建开始时间（Unix时间戳）
    #[arg(long, default_value_t = 0, env = "DRONE_BUILD_STARTED")]
    pub build_started: i64,

    /// 构建创建时间（Unix时间戳）
    #[arg(long, default_value_t = 0, env = "DRONE_BUILD_CREATED")]
    pub build_created: i64,
}

impl From<BuildArgs> for Build {
    fn from(args: BuildArgs) -> Self {
        Self {
            owner: args.repo_owner,
            name: args.repo_name,
            tag: args.tag,
            event: args.event,
            number: args.build_number,
            commit: args.commit_sha,
            git_ref: args.commit_ref,
            branch: args.commit_branch,
            author: args.commit_author,
            message: args.commit_message,
            status: args.build_status,
            link: args.build_link,
            started: args.build_started,
            created: args.build_created,
        }
    }
}
