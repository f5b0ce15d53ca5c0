//! 企业微信通知发送器模块
//!
//! 渲染构建消息并推送到企业微信群机器人webhook

use crate::config::types::NotificationConfig;
use crate::error::SendError;
use crate::notification::build::Build;
use crate::notification::payload::{parse_mention_list, MessageBody, MessageType, Payload};
use crate::notification::template;
use crate::notification::transport::{HttpTransport, Transport};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info};

/// webhook响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Response {
    /// 错误码，0表示成功
    pub errcode: i64,
    /// 错误信息
    pub errmsg: String,
}

impl Response {
    /// 将非零错误码转换为错误
    pub fn into_result(self) -> Result<(), SendError> {
        if self.errcode == 0 {
            Ok(())
        } else {
            Err(SendError::Remote {
                code: self.errcode,
                message: self.errmsg,
            })
        }
    }
}

/// 企业微信通知发送器
pub struct WeChatSender {
    /// 传输层
    transport: Arc<dyn Transport>,
}

impl WeChatSender {
    /// 使用默认HTTP传输创建发送器
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new()?)))
    }

    /// 使用指定传输创建发送器
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 构造待发送的消息，不进行任何网络请求
    ///
    /// # 参数
    /// * `config` - 通知配置
    /// * `build` - 构建快照
    ///
    /// # 返回
    /// * `Result<Payload, SendError>` - 模板错误或不支持的消息类型时返回错误
    pub fn prepare(config: &NotificationConfig, build: &Build) -> Result<Payload, SendError> {
        let mentioned_list = parse_mention_list(&config.mentioned_list);
        let mentioned_mobile_list = parse_mention_list(&config.mentioned_mobile_list);

        let rendered = template::render(&config.content, build)?;

        let msg_type: MessageType = config.msg_type.parse()?;
        let body = MessageBody {
            content: rendered.trim().to_string(),
            mentioned_list,
            mentioned_mobile_list,
        };

        Ok(Payload::new(msg_type, body))
    }

    /// 渲染并发送构建通知
    ///
    /// # 参数
    /// * `config` - 通知配置
    /// * `build` - 构建快照
    ///
    /// # 返回
    /// * `Result<(), SendError>` - 企业微信返回 errcode 0 时成功
    pub async fn send(&self, config: &NotificationConfig, build: &Build) -> Result<(), SendError> {
        let payload = Self::prepare(config, build)?;
        self.dispatch(&config.url, &payload).await
    }

    /// 发送已构造好的消息
    pub async fn dispatch(&self, url: &str, payload: &Payload) -> Result<(), SendError> {
        let body = payload.to_json()?;
        debug!(
            "发送{}消息到企业微信webhook: {} ({} bytes)",
            payload.msg_type(),
            url,
            body.len()
        );

        let data = self.transport.post_json(url, body).await.map_err(|e| {
            error!("企业微信请求失败: {:#}", e);
            SendError::Transport(e)
        })?;

        let response: Response = serde_json::from_slice(&data).map_err(SendError::Decode)?;
        match response.into_result() {
            Ok(()) => {
                info!("企业微信消息发送成功");
                Ok(())
            }
            Err(e) => {
                error!("企业微信消息发送失败: {}", e);
                Err(e)
            }
        }
    }
}
