//! 定义了字形标签规范化中使用的核心数据类型。

use std::io;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// 默认的未知标签占位符。
pub const DEFAULT_UNK_TOKEN: &str = "[UNK]";
/// 默认的组合字形占位符。
pub const DEFAULT_COMB_TOKEN: &str = "[COMB]";

//=============================================================================
// 1. 错误枚举
//=============================================================================

/// 命令行工具在读取、解析和输出过程中可能发生的错误。
///
/// 规范化本身永远不会失败，这里只覆盖外围的 IO 与配置问题。
#[derive(Error, Debug)]
pub enum CliError {
    /// 文件读写等IO错误。
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
    /// JSON 序列化或反序列化错误。
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),
    /// 配置内容不合法。
    #[error("无效的配置: {0}")]
    InvalidConfig(String),
}

impl From<CliError> for std::io::Error {
    fn from(err: CliError) -> Self {
        Self::other(err)
    }
}

//=============================================================================
// 2. 规范化选项
//=============================================================================

/// 标签规范化选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// 是否将长度不为 1 的结果折叠为组合占位符。
    pub use_comb_token: bool,
    /// 无法解析的标签所使用的占位符。
    pub unk_token: String,
    /// 组合模式下多字符结果所使用的占位符。
    pub comb_token: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            use_comb_token: false,
            unk_token: DEFAULT_UNK_TOKEN.to_string(),
            comb_token: DEFAULT_COMB_TOKEN.to_string(),
        }
    }
}

impl NormalizeOptions {
    /// 检查两个占位符是否可用。
    ///
    /// 两个占位符相同或为空时，下游无法区分“未知”与“组合”两类结果。
    pub fn validate(&self) -> Result<(), CliError> {
        if self.unk_token.is_empty() || self.comb_token.is_empty() {
            return Err(CliError::InvalidConfig("占位符不能为空".to_string()));
        }
        if self.use_comb_token && self.unk_token == self.comb_token {
            return Err(CliError::InvalidConfig(format!(
                "未知占位符与组合占位符相同: {}",
                self.unk_token
            )));
        }
        Ok(())
    }
}

//=============================================================================
// 3. 结果分类
//=============================================================================

/// 规范化结果的类别。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    /// 规范化后的字形
    Glyph,
    /// 未知占位符
    Unknown,
    /// 组合占位符
    Combination,
}

/// 命令行输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// 每行一个规范化结果
    #[default]
    Text,
    /// 完整的 JSON 报告
    Json,
    /// 每行一个 JSON 记录
    Jsonl,
}
