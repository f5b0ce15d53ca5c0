//! 通知模块
//!
//! 提供构建消息模板渲染和企业微信webhook发送功能

pub mod build;
pub mod payload;
pub mod template;
pub mod transport;
pub mod wechat;

// 重新导出主要类型
pub use build::Build;
pub use payload::{MessageType, Payload};
pub use template::HandlebarsTemplate;
pub use transport::{HttpTransport, Transport};
pub use wechat::{Response, WeChatSender};
