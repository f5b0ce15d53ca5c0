//! 企业微信消息体
//!
//! 机器人webhook支持的两种消息格式

use crate::error::SendError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// 消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// 纯文本消息
    Text,
    /// Markdown消息
    Markdown,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Markdown => "markdown",
        }
    }
}

impl FromStr for MessageType {
    type Err = SendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageType::Text),
            "markdown" => Ok(MessageType::Markdown),
            other => Err(SendError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 消息内容及@提醒列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mentioned_list: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mentioned_mobile_list: Vec<String>,
}

/// 发送给webhook的消息
///
/// 序列化为 `{"msgtype": "...", "<msgtype>": {...}}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "msgtype", rename_all = "lowercase")]
pub enum Payload {
    Text { text: MessageBody },
    Markdown { markdown: MessageBody },
}

impl Payload {
    /// 按消息类型构造消息体
    pub fn new(msg_type: MessageType, body: MessageBody) -> Self {
        match msg_type {
            MessageType::Text => Payload::Text { text: body },
            MessageType::Markdown => Payload::Markdown { markdown: body },
        }
    }

    pub fn msg_type(&self) -> MessageType {
        match self {
            Payload::Text { .. } => MessageType::Text,
            Payload::Markdown { .. } => MessageType::Markdown,
        }
    }

    pub fn body(&self) -> &MessageBody {
        match self {
            Payload::Text { text } => text,
            Payload::Markdown { markdown } => markdown,
        }
    }

    /// 序列化为JSON字节
    pub fn to_json(&self) -> Result<Vec<u8>, SendError> {
        serde_json::to_vec(self).map_err(SendError::Encode)
    }
}

/// 解析逗号分隔的列表，空字符串得到空列表
pub fn parse_mention_list(source: &str) -> Vec<String> {
    if source.is_empty() {
        return Vec::new();
    }
    source.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(content: &str, mentioned: &[&str], mobiles: &[&str]) -> MessageBody {
        MessageBody {
            content: content.to_string(),
            mentioned_list: mentioned.iter().map(|s| s.to_string()).collect(),
            mentioned_mobile_list: mobiles.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_empty_mention_list() {
        assert!(parse_mention_list("").is_empty());
    }

    #[test]
    fn test_parse_mention_list_keeps_order() {
        assert_eq!(parse_mention_list("alice,bob"), vec!["alice", "bob"]);
        assert_eq!(parse_mention_list("@all"), vec!["@all"]);
    }

    #[test]
    fn test_message_type_from_str() {
        assert_eq!("text".parse::<MessageType>().unwrap(), MessageType::Text);
        assert_eq!(
            "markdown".parse::<MessageType>().unwrap(),
            MessageType::Markdown
        );

        let err = "news".parse::<MessageType>().unwrap_err();
        assert!(matches!(err, SendError::UnsupportedType(ref v) if v == "news"));
    }

    #[test]
    fn test_text_payload_with_mentions() {
        let payload = Payload::new(MessageType::Text, body("hi", &["alice"], &["13800001111"]));
        let json = String::from_utf8(payload.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"msgtype":"text","text":{"content":"hi","mentioned_list":["alice"],"mentioned_mobile_list":["13800001111"]}}"#
        );
    }

    #[test]
    fn test_empty_mentions_are_omitted() {
        let payload = Payload::new(MessageType::Text, body("hi", &[], &[]));
        let json = String::from_utf8(payload.to_json().unwrap()).unwrap();
        assert_eq!(json, r#"{"msgtype":"text","text":{"content":"hi"}}"#);
        assert!(!json.contains("mentioned_list"));
        assert!(!json.contains("mentioned_mobile_list"));
    }

    #[test]
    fn test_markdown_payload_keeps_html() {
        let payload = Payload::new(
            MessageType::Markdown,
            body("<b>build</b> & <font color=\"info\">ok</font>", &[], &[]),
        );
        let json = String::from_utf8(payload.to_json().unwrap()).unwrap();
        assert!(json.starts_with(r#"{"msgtype":"markdown","markdown":{"content":"<b>build</b> & "#));
        assert_eq!(payload.msg_type(), MessageType::Markdown);
    }
}
