//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// wechat-notify 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum WeChatNotifyError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 通知发送相关错误
    #[error("通知错误: {0}")]
    Send(#[from] SendError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// 模板渲染错误，按失败阶段区分
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// 模板语法错误
    #[error("模板解析失败: {0}")]
    Parse(String),

    /// 字段替换失败（例如引用了未知字段）
    #[error("模板渲染失败: {0}")]
    Execute(String),
}

/// 消息发送错误
///
/// 发送流程中的任意一步失败都会在此汇总，第一个错误即终止流程。
#[derive(Error, Debug)]
pub enum SendError {
    /// 模板渲染失败
    #[error("消息模板错误: {0}")]
    Template(#[from] RenderError),

    /// 不支持的消息类型
    #[error("不支持的消息类型: {0}")]
    UnsupportedType(String),

    /// 消息体序列化失败
    #[error("消息序列化失败: {0}")]
    Encode(#[source] serde_json::Error),

    /// 网络请求失败（连接失败、超时、响应体读取失败）
    #[error("请求发送失败: {0:#}")]
    Transport(#[source] anyhow::Error),

    /// 响应体不是预期的JSON
    #[error("响应解析失败: {0}")]
    Decode(#[source] serde_json::Error),

    /// 企业微信返回非零错误码
    #[error("企业微信响应错误: {message}[{code}]")]
    Remote { code: i64, message: String },
}

impl SendError {
    /// 错误类别名称，用于日志字段
    pub fn kind(&self) -> &'static str {
        match self {
            SendError::Template(_) => "template",
            SendError::UnsupportedType(_) => "unsupported_type",
            SendError::Encode(_) => "encode",
            SendError::Transport(_) => "transport",
            SendError::Decode(_) => "decode",
            SendError::Remote { .. } => "remote",
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, WeChatNotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = SendError::Remote {
            code: 93000,
            message: "invalid webhook url".to_string(),
        };
        assert!(err.to_string().contains("invalid webhook url[93000]"));
        assert_eq!(err.kind(), "remote");
    }

    #[test]
    fn test_render_error_converts_to_template_kind() {
        let err: SendError = RenderError::Parse("unclosed".to_string()).into();
        assert_eq!(err.kind(), "template");
        assert!(err.to_string().contains("unclosed"));
    }
}
