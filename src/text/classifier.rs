//! 选项 / 题干判定
//!
//! 判定刻意宽松（多个信号取或），误判交给选项数量约束和去重过滤。

use phf::phf_set;
use regex::Regex;
use std::sync::LazyLock;

use super::normalizer::OPTION_PREFIX;

/// 题干最短长度（字符数）
pub const MIN_QUESTION_LEN: usize = 10;

static INTERROGATIVES: phf::Set<&'static str> = phf_set! {
    "what", "which", "who", "where", "when", "why", "how",
};

static IMPERATIVES: phf::Set<&'static str> = phf_set! {
    "select", "choose", "identify", "find", "determine", "calculate",
};

static COPULAS: phf::Set<&'static str> = phf_set! {
    "is", "are", "was", "were", "will", "would", "should", "can", "could",
};

static QUESTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:question\s*\d+|q\d+)").expect("题号正则无效"));

static LEADING_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]").expect("序号正则无效"));

/// 是否带有显式的选项标记
pub fn looks_like_option(line: &str) -> bool {
    OPTION_PREFIX.is_match(line)
}

/// 是否像题干
pub fn looks_like_question(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() < MIN_QUESTION_LEN {
        return false;
    }

    if text.ends_with('?') {
        return true;
    }

    let words: Vec<String> = text.split_whitespace().map(|w| w.to_lowercase()).collect();

    if let Some(first) = words.first() {
        // "what's" / "how’s" 只看撇号前的部分
        let first = first
            .split(['\'', '\u{2019}'])
            .next()
            .unwrap_or_default()
            .trim_matches(|c: char| !c.is_alphanumeric());
        if INTERROGATIVES.contains(first) || IMPERATIVES.contains(first) {
            return true;
        }
    }

    // 系动词 / 情态动词后面必须跟空白，所以最后一个词不算
    if words.len() > 1 && words[..words.len() - 1].iter().any(|w| COPULAS.contains(w.as_str())) {
        return true;
    }

    QUESTION_LABEL.is_match(text) || LEADING_ORDINAL.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_option() {
        assert!(looks_like_option("A. Paris"));
        assert!(looks_like_option("  b) Rome"));
        assert!(looks_like_option("(C) Madrid"));
        assert!(looks_like_option("2: two"));
        assert!(!looks_like_option("Paris"));
        assert!(!looks_like_option("- bullet item"));
    }

    #[test]
    fn test_question_signals() {
        assert!(looks_like_question("Capital of France?"));
        assert!(looks_like_question("Which city hosts the tower"));
        assert!(looks_like_question("Select the prime number below"));
        assert!(looks_like_question("The answer is probably here"));
        assert!(looks_like_question("Question 4 about rivers"));
        assert!(looks_like_question("q12 rivers and lakes"));
        assert!(looks_like_question("3. Rivers and lakes"));
    }

    #[test]
    fn test_contracted_interrogatives() {
        assert!(looks_like_question("What's the capital of France"));
        assert!(looks_like_question("How\u{2019}s the weather on Mars"));
        assert!(looks_like_question("Who's the author of Hamlet"));
    }

    #[test]
    fn test_question_too_short() {
        assert!(!looks_like_question("Why?"));
        assert!(!looks_like_question("   What   "));
    }

    #[test]
    fn test_not_a_question() {
        assert!(!looks_like_question("Home About Contact"));
        assert!(!looks_like_question("Copyright 2024 all rights reserved"));
        // 系动词在句末，后面没有空白
        assert!(!looks_like_question("The best answer is"));
    }
}
