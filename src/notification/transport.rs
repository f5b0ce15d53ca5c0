//! 消息传输模块
//!
//! 定义webhook请求的传输trait和基于reqwest的实现

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// webhook请求使用的Content-Type
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// 默认请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// 传输层trait
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST一段JSON并返回完整的响应体
    ///
    /// # 参数
    /// * `url` - webhook地址
    /// * `body` - 已序列化的JSON
    ///
    /// # 返回
    /// * `Result<Vec<u8>>` - 响应体；连接失败、超时或响应体无法读取时返回错误
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

/// 基于reqwest的HTTP传输
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP客户端
    client: Client,
}

impl HttpTransport {
    /// 使用默认5秒超时创建传输
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// 使用指定超时创建传输
    ///
    /// # 参数
    /// * `timeout` - 整个请求的超时时间
    ///
    /// # 返回
    /// * `Result<Self>` - 传输实例
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("创建HTTP客户端失败")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .with_context(|| format!("请求webhook失败: {url}"))?;

        // 企业微信的业务结果在响应体中，HTTP状态码只做记录
        debug!("webhook响应状态: {}", response.status());

        let bytes = response.bytes().await.context("读取响应体失败")?;
        Ok(bytes.to_vec())
    }
}
