//! 汇总一组标签的规范化结果，供命令行工具输出。

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::normalizer::normalize_label;
use crate::types::{LabelKind, NormalizeOptions};

/// 单个标签的规范化记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    /// 原始标签
    pub label: String,
    /// 规范化结果
    pub normalized: String,
    /// 结果类别
    pub kind: LabelKind,
}

/// 一组标签的规范化报告。
#[derive(Debug, Clone, Serialize)]
pub struct LabelReport {
    /// 按输入顺序排列的记录
    pub entries: Vec<LabelEntry>,
    /// 每个类别的数量，键为类别名
    pub summary: BTreeMap<String, usize>,
}

/// 判断规范化结果属于哪一类。
///
/// 组合占位符只在组合模式下才有意义；非组合模式下与之相同的结果按字形处理。
pub fn classify(normalized: &str, options: &NormalizeOptions) -> LabelKind {
    if normalized == options.unk_token {
        LabelKind::Unknown
    } else if options.use_comb_token && normalized == options.comb_token {
        LabelKind::Combination
    } else {
        LabelKind::Glyph
    }
}

impl Default for LabelReport {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelReport {
    /// 创建一个空报告，所有类别的计数均为 0。
    pub fn new() -> Self {
        let summary = LabelKind::iter().map(|k| (k.to_string(), 0)).collect();
        Self {
            entries: Vec::new(),
            summary,
        }
    }

    /// 规范化一个标签并记录结果。
    pub fn push(&mut self, label: &str, options: &NormalizeOptions) -> &LabelEntry {
        let normalized = normalize_label(label, options);
        let kind = classify(&normalized, options);
        *self.summary.entry(kind.to_string()).or_default() += 1;
        self.entries.push(LabelEntry {
            label: label.to_string(),
            normalized,
            kind,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// 规范化一组标签并生成报告。
    pub fn from_labels<I, S>(labels: I, options: &NormalizeOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = Self::new();
        for label in labels {
            report.push(label.as_ref(), options);
        }
        report
    }

    /// 获取某一类别的数量。
    pub fn count(&self, kind: LabelKind) -> usize {
        self.summary.get(&kind.to_string()).copied().unwrap_or(0)
    }
}
