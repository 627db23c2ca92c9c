//! # 字形标签规范化
//!
//! 将字符识别数据集中的原始标签转换为可直接用作训练目标的规范形式。
//! 整个过程是一条线性的字符串变换流水线，任何输入都会得到一个结果：
//! 无法解析的标签退化为未知占位符，组合模式下的多字符结果退化为组合占位符。

use std::{collections::HashMap, sync::LazyLock};

use log::trace;

use crate::types::{DEFAULT_COMB_TOKEN, DEFAULT_UNK_TOKEN, NormalizeOptions};

// =================================================================================
// 1. 常量定义
// =================================================================================

/// 标注残留，按顺序整体删除。
const MARKER_STRS: [&str; 2] = ["=", "None"];

const OPEN_BRACKETS: [char; 3] = ['（', '〈', '['];
const CLOSE_BRACKETS: [char; 3] = ['）', '〉', ']'];

/// 占位用的圆圈，`X(○)` 表示取括号前的部分。
const CIRCLE_PLACEHOLDER: &str = "○";
const ARROW: char = '→';

/// 装饰性或占位性的字形，标签中出现任意一个即视为未知。
///
/// 第一项是两个字符的 `?□`，而不是单独的 `?` 与 `□`；`□` 也因此出现了两次。
/// 这看起来是数据集整理时漏写逗号造成的，但下游数据依赖这一行为，暂时保留。
pub const DISCARD_GLYPHS: [&str; 11] = [
    "?□", "■", "○", "●", "△", "▲", "☆", "★", "◇", "◆", "□",
];

/// 编码错误的码位及其替换结果，只对整个标签做相等匹配。
static CODEPOINT_SUBSTITUTIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| HashMap::from([("𬨭", "將"), ("𫵖", "尸示")]));

// =================================================================================
// 2. 公共接口
// =================================================================================

/// 使用默认占位符规范化标签。
pub fn normalize(label: &str, use_comb_token: bool) -> String {
    normalize_with_tokens(label, use_comb_token, DEFAULT_UNK_TOKEN, DEFAULT_COMB_TOKEN)
}

/// 使用指定的占位符规范化标签。
///
/// # 参数
///
/// * `label` - 原始标签。
/// * `use_comb_token` - 结果长度不为 1 时是否返回 `comb_token`。
/// * `unk_token` - 无法解析时返回的占位符。
/// * `comb_token` - 组合模式下多字符结果的占位符。
///
/// # 返回
///
/// `unk_token`、`comb_token` 或规范化后的字形。
pub fn normalize_with_tokens(
    label: &str,
    use_comb_token: bool,
    unk_token: &str,
    comb_token: &str,
) -> String {
    let label = canonicalize_brackets(&strip_markers(label));

    if label.is_empty() {
        trace!("标签在去除标注后为空");
        return unk_token.to_string();
    }

    let label = resolve_parenthetical(&label);
    let label = resolve_arrow(label);
    let label = substitute_codepoint(label);

    if use_comb_token && label.chars().count() != 1 {
        trace!("组合模式下标签 {label:?} 长度不为 1");
        return comb_token.to_string();
    }

    // 括号或箭头解析后可能只剩空串，如 "()" 或 "A→"
    if label.is_empty() || contains_discard_glyph(label) {
        trace!("标签 {label:?} 无法解析为有效字形");
        return unk_token.to_string();
    }

    label.to_string()
}

/// 按选项规范化标签。
pub fn normalize_label(label: &str, options: &NormalizeOptions) -> String {
    normalize_with_tokens(
        label,
        options.use_comb_token,
        &options.unk_token,
        &options.comb_token,
    )
}

// =================================================================================
// 3. 各处理阶段
// =================================================================================

fn strip_markers(label: &str) -> String {
    MARKER_STRS
        .iter()
        .fold(label.to_string(), |acc, &marker| acc.replace(marker, ""))
}

fn canonicalize_brackets(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if OPEN_BRACKETS.contains(&c) {
                '('
            } else if CLOSE_BRACKETS.contains(&c) {
                ')'
            } else {
                c
            }
        })
        .collect()
}

/// 处理以 `)` 结尾的标签。
///
/// 从倒数第二个字符向前找第一个 `(`，不做括号深度匹配，
/// 因此嵌套或不平衡的括号会落在离结尾最近的那个 `(` 上。
///
/// 原始数据整理脚本在这里还区分了 `*}(*)`（取括号内内容）和
/// `A(*)`（只取首字符 `A`）两种写法，但其判断条件与外层完全相同，
/// 这两个分支从未执行过。这里只保留实际生效的逻辑；是否补上这两种写法
/// 需要先确认现有数据集的标签不受影响。
fn resolve_parenthetical(label: &str) -> &str {
    let Some(body) = label.strip_suffix(')') else {
        return label;
    };

    match body.rfind('(') {
        Some(open) => {
            let inner = &body[open + 1..];
            if inner == CIRCLE_PLACEHOLDER {
                &body[..open]
            } else {
                inner
            }
        }
        None => body,
    }
}

/// `A→B` 取第一个箭头之后、下一个箭头之前的部分。
fn resolve_arrow(label: &str) -> &str {
    if label.contains(ARROW) {
        label.split(ARROW).nth(1).unwrap_or_default()
    } else {
        label
    }
}

fn substitute_codepoint(label: &str) -> &str {
    CODEPOINT_SUBSTITUTIONS
        .get(label)
        .copied()
        .unwrap_or(label)
}

fn contains_discard_glyph(label: &str) -> bool {
    DISCARD_GLYPHS.iter().any(|&glyph| label.contains(glyph))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("A=B"), "AB");
        assert_eq!(strip_markers("None"), "");
        assert_eq!(strip_markers("=None="), "");
        // 先删 "=" 再删 "None"，拼接出的 "None" 同样会被删除
        assert_eq!(strip_markers("No=ne字"), "字");
        assert_eq!(strip_markers("none"), "none");
    }

    #[test]
    fn test_canonicalize_brackets() {
        assert_eq!(canonicalize_brackets("（A）"), "(A)");
        assert_eq!(canonicalize_brackets("〈A〉"), "(A)");
        assert_eq!(canonicalize_brackets("[A]"), "(A)");
        assert_eq!(canonicalize_brackets("(A)"), "(A)");
        assert_eq!(canonicalize_brackets("你好"), "你好");
    }

    #[test]
    fn test_resolve_parenthetical() {
        assert_eq!(resolve_parenthetical("(A)"), "A");
        assert_eq!(resolve_parenthetical("X(○)"), "X");
        assert_eq!(resolve_parenthetical("X(Y)"), "Y");
        assert_eq!(resolve_parenthetical("(○)"), "");
        assert_eq!(resolve_parenthetical("()"), "");
        assert_eq!(resolve_parenthetical("A)"), "A");
        assert_eq!(resolve_parenthetical(")"), "");
        assert_eq!(resolve_parenthetical("A(B"), "A(B");
        // 不做深度匹配，取离结尾最近的 "("
        assert_eq!(resolve_parenthetical("(A(B))"), "B)");
        assert_eq!(resolve_parenthetical("A}(B)"), "B");
    }

    #[test]
    fn test_resolve_arrow() {
        assert_eq!(resolve_arrow("A→B"), "B");
        assert_eq!(resolve_arrow("A→B→C"), "B");
        assert_eq!(resolve_arrow("→B"), "B");
        assert_eq!(resolve_arrow("A→"), "");
        assert_eq!(resolve_arrow("AB"), "AB");
    }

    #[test]
    fn test_substitute_codepoint() {
        assert_eq!(substitute_codepoint("𬨭"), "將");
        assert_eq!(substitute_codepoint("𫵖"), "尸示");
        assert_eq!(substitute_codepoint("𬨭𬨭"), "𬨭𬨭");
        assert_eq!(substitute_codepoint("A"), "A");
    }

    #[test]
    fn test_discard_glyphs() {
        assert!(contains_discard_glyph("A□"));
        assert!(contains_discard_glyph("?□"));
        assert!(contains_discard_glyph("★"));
        assert!(!contains_discard_glyph("A?"));
        assert!(!contains_discard_glyph("?"));
        assert!(!contains_discard_glyph("永"));
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("", false), "[UNK]");
        assert_eq!(normalize("A", false), "A");
        assert_eq!(normalize("（A）", false), "A");
        assert_eq!(normalize("X（○）", false), "X");
        assert_eq!(normalize("A→B", false), "B");
        assert_eq!(normalize("𬨭", false), "將");
        assert_eq!(normalize("𫵖", false), "尸示");
        assert_eq!(normalize("A□", false), "[UNK]");
        assert_eq!(normalize("A?", false), "A?");
    }

    #[test]
    fn test_normalize_markers_only() {
        assert_eq!(normalize("=", false), "[UNK]");
        assert_eq!(normalize("None", true), "[UNK]");
        assert_eq!(normalize("=字", false), "字");
    }

    #[test]
    fn test_normalize_comb_mode() {
        assert_eq!(normalize("尸示", true), "[COMB]");
        assert_eq!(normalize("𫵖", true), "[COMB]");
        assert_eq!(normalize("AB", true), "[COMB]");
        assert_eq!(normalize("A", true), "A");
        assert_eq!(normalize("𬨭", true), "將");
        // 组合判断先于丢弃判断
        assert_eq!(normalize("A□", true), "[COMB]");
        assert_eq!(normalize("□", true), "[UNK]");
    }

    #[test]
    fn test_normalize_empty_after_resolution() {
        assert_eq!(normalize("（○）", false), "[UNK]");
        assert_eq!(normalize("()", false), "[UNK]");
        assert_eq!(normalize("A→", false), "[UNK]");
        // 组合模式下空串的长度同样不为 1
        assert_eq!(normalize("()", true), "[COMB]");
    }

    #[test]
    fn test_normalize_custom_tokens() {
        assert_eq!(normalize_with_tokens("", false, "<unk>", "<comb>"), "<unk>");
        assert_eq!(normalize_with_tokens("AB", true, "<unk>", "<comb>"), "<comb>");

        let options = NormalizeOptions {
            use_comb_token: true,
            unk_token: "?".to_string(),
            comb_token: "+".to_string(),
        };
        assert_eq!(normalize_label("★", &options), "?");
        assert_eq!(normalize_label("日月", &options), "+");
        assert_eq!(normalize_label("[明]", &options), "明");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let labels = [
            "A", "（A）", "X（○）", "A→B", "𬨭", "𫵖", "A?", "〈永〉", "=字", "A)",
        ];
        for label in labels {
            let first = normalize(label, false);
            assert_ne!(first, "[UNK]", "{label}");
            assert_eq!(normalize(&first, false), first, "{label}");
        }
    }
}
