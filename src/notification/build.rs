//! 构建信息模块
//!
//! 定义模板渲染所需的构建快照

use serde::{Deserialize, Serialize};

/// 一次CI构建事件的快照
///
/// 序列化后的字段名即模板可引用的变量名。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// 仓库所有者
    pub owner: String,
    /// 仓库名称
    pub name: String,
    /// 标签
    pub tag: String,
    /// 触发事件（push、pull_request、tag ...）
    pub event: String,
    /// 构建序号
    pub number: u64,
    /// 提交哈希
    pub commit: String,
    /// Git引用
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// 分支
    pub branch: String,
    /// 提交作者
    pub author: String,
    /// 提交信息
    pub message: String,
    /// 构建状态
    pub status: String,
    /// 构建链接
    pub link: String,
    /// 开始时间（Unix时间戳）
    pub started: i64,
    /// 创建时间（Unix时间戳）
    pub created: i64,
}

/// 模板中可以引用的全部字段名
pub const BUILD_FIELDS: [&str; 14] = [
    "owner", "name", "tag", "event", "number", "commit", "ref", "branch", "author", "message",
    "status", "link", "started", "created",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys_match_template_vocabulary() {
        let value = serde_json::to_value(Build::default()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), BUILD_FIELDS.len());
        for field in BUILD_FIELDS {
            assert!(object.contains_key(field), "缺少字段 {field}");
        }
    }
}
