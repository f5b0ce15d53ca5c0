//! wechat-notify - 企业微信构建通知插件
//!
//! 将CI构建信息渲染到消息模板中，并推送到企业微信群机器人：
//! - Handlebars消息模板
//! - text / markdown 两种消息格式
//! - @成员和@手机号提醒
//! - Drone插件风格的环境变量配置

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;

// 重新导出主要类型
pub use config::NotificationConfig;
pub use error::{RenderError, SendError, WeChatNotifyError};
pub use notification::{Build, WeChatSender};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
