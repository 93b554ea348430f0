//! 文本规整
//!
//! 纯函数，不会失败：无法匹配时原样返回。

use regex::Regex;
use std::sync::LazyLock;

/// 选项前缀：`A.` `b)` `C:` `12.` `3)` `(B)` `(2)`
pub(crate) static OPTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[A-Za-z][.):]|\d+[.):]|\([A-Za-z]\)|\(\d+\))").expect("选项前缀正则无效")
});

/// 去掉首尾空白，并把内部连续空白压缩为一个空格
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 去掉开头的一个选项前缀（只去一次，不递归）
pub fn strip_option_prefix(s: &str) -> &str {
    match OPTION_PREFIX.find(s) {
        Some(m) => s[m.end()..].trim_start(),
        None => s,
    }
}

/// 比较用的规范形式：小写 + 规整空白
pub fn comparable(s: &str) -> String {
    normalize_whitespace(s).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n\n c  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_strip_option_prefix_variants() {
        assert_eq!(strip_option_prefix("(B) Berlin"), "Berlin");
        assert_eq!(strip_option_prefix("3) Madrid"), "Madrid");
        assert_eq!(strip_option_prefix("A. Paris"), "Paris");
        assert_eq!(strip_option_prefix("c: Rome"), "Rome");
        assert_eq!(strip_option_prefix("12. Twelve"), "Twelve");
        assert_eq!(strip_option_prefix("(4) four"), "four");
    }

    #[test]
    fn test_strip_option_prefix_only_once() {
        assert_eq!(strip_option_prefix("A. B. nested"), "B. nested");
    }

    #[test]
    fn test_strip_option_prefix_no_match() {
        assert_eq!(strip_option_prefix("Berlin"), "Berlin");
        assert_eq!(strip_option_prefix("Apple. pie"), "Apple. pie");
        assert_eq!(strip_option_prefix(""), "");
    }
}
