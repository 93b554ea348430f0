//! 纯文本（OCR 结果）上的分块抽取
//!
//! 三种切块方式共用同一个块解析器 [`parse_block`]。文本来源没有节点引用，
//! 产出的题目和选项引用都为 None。

use regex::Regex;
use std::sync::LazyLock;

use crate::extract::{run_strategies, Strategy};
use crate::models::{AnswerOption, Mcq, SourceStrategy};
use crate::text::{looks_like_option, looks_like_question};

/// 行首数字编号：`1.` `2)`
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\d+)[.)]\s+").expect("编号正则无效"));

/// 行首 Q 前缀：`Q1:` `q2.` `Q3)` `Q4 `
static LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*q(\d+)(?:[ \t]*[:.)][ \t]*|[ \t]+)").expect("Q 前缀正则无效")
});

static PARAGRAPH_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("空行正则无效"));

static LEADING_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:question\s*|q)(\d+)(?:\s*[:.)]\s*|\s+)").expect("题号前缀正则无效")
});

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)[.)]\s+").expect("编号前缀正则无效"));

fn unify_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// 按行首标记切块，返回 (题号, 标记之后到下一个标记之前的文本)
fn split_by_marker<'a>(text: &'a str, marker: &Regex) -> Vec<(Option<u32>, &'a str)> {
    let captures: Vec<_> = marker.captures_iter(text).collect();
    let mut blocks = Vec::with_capacity(captures.len());

    for (i, caps) in captures.iter().enumerate() {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = captures
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        blocks.push((number.as_str().parse().ok(), &text[whole.end()..end]));
    }
    blocks
}

/// 块解析器
///
/// 开头连续的非选项行拼成题干；第一条选项行之后只收集选项行。
/// 选项之后遇到像题干的行就结束（下一道没有编号的题），其它非选项行忽略。
/// 没有题干、没有选项或选项数不在 [2, 6] 时返回 None。
pub fn parse_block(block: &str, ordinal: Option<u32>, strategy: SourceStrategy) -> Option<Mcq> {
    let mut question_lines = Vec::new();
    let mut options = Vec::new();

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if looks_like_option(line) {
            options.push(AnswerOption::from_raw(line, None));
        } else if options.is_empty() {
            question_lines.push(line);
        } else if looks_like_question(line) {
            break;
        }
    }

    if question_lines.is_empty() || options.is_empty() {
        return None;
    }
    Mcq::candidate(&question_lines.join(" "), None, options, strategy, ordinal)
}

/// 数字编号块
pub struct NumberedBlockStrategy;

impl Strategy<str> for NumberedBlockStrategy {
    fn name(&self) -> &str {
        "numbered-block"
    }

    fn extract(&self, text: &str) -> anyhow::Result<Vec<Mcq>> {
        let text = unify_newlines(text);
        Ok(split_by_marker(&text, &NUMBERED)
            .into_iter()
            .filter_map(|(n, block)| parse_block(block, n, SourceStrategy::NumberedBlock))
            .collect())
    }
}

/// Q 前缀块
pub struct LabeledBlockStrategy;

impl Strategy<str> for LabeledBlockStrategy {
    fn name(&self) -> &str {
        "labeled-block"
    }

    fn extract(&self, text: &str) -> anyhow::Result<Vec<Mcq>> {
        let text = unify_newlines(text);
        Ok(split_by_marker(&text, &LABELED)
            .into_iter()
            .filter_map(|(n, block)| parse_block(block, n, SourceStrategy::LabeledBlock))
            .collect())
    }
}

/// 空行分段
///
/// 只保留像题干的段落。段首的题号（`Q3:`、`Question 3`、`3.`）会被去掉并记为 ordinal，
/// 这样同一道题被编号策略找到时题干一致，去重能合并。
pub struct ParagraphBlockStrategy;

fn strip_leading_marker(paragraph: &str) -> (Option<u32>, &str) {
    for marker in [&*LEADING_LABEL, &*LEADING_NUMBER] {
        if let Some(caps) = marker.captures(paragraph) {
            if let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) {
                return (number.as_str().parse().ok(), &paragraph[whole.end()..]);
            }
        }
    }
    (None, paragraph)
}

impl Strategy<str> for ParagraphBlockStrategy {
    fn name(&self) -> &str {
        "paragraph-block"
    }

    fn extract(&self, text: &str) -> anyhow::Result<Vec<Mcq>> {
        let text = unify_newlines(text);
        Ok(PARAGRAPH_GAP
            .split(&text)
            .map(str::trim)
            .filter(|p| looks_like_question(p))
            .filter_map(|p| {
                let (ordinal, body) = strip_leading_marker(p);
                parse_block(body, ordinal, SourceStrategy::ParagraphBlock)
            })
            .collect())
    }
}

/// 文本抽取器，策略顺序固定：编号 → Q 前缀 → 段落
pub struct TextBlockExtractor {
    strategies: Vec<Box<dyn Strategy<str>>>,
}

impl TextBlockExtractor {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(NumberedBlockStrategy),
                Box::new(LabeledBlockStrategy),
                Box::new(ParagraphBlockStrategy),
            ],
        }
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// 运行全部策略，返回未去重的候选
    pub fn extract(&self, text: &str) -> Vec<Mcq> {
        run_strategies(&self.strategies, text)
    }
}

impl Default for TextBlockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARITHMETIC: &str = "1. What is 2+2?\nA. 2\nB. 3\nC. 4\nD. 5";

    #[test]
    fn test_numbered_block() {
        let found = NumberedBlockStrategy.extract(ARITHMETIC).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "What is 2+2?");
        assert_eq!(found[0].option_texts(), vec!["2", "3", "4", "5"]);
        assert_eq!(found[0].ordinal, Some(1));
        assert!(found[0].question_ref.is_none());
        assert!(found[0].options.iter().all(|o| o.source_ref.is_none()));
    }

    #[test]
    fn test_numbered_blocks_split_at_next_marker() {
        let text = "1) Which is a fruit?\na) Apple\nb) Carrot\n2) Which is a colour?\na) Blue\nb) Table\nc) Red";
        let found = NumberedBlockStrategy.extract(text).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].ordinal, Some(2));
        assert_eq!(found[1].option_texts(), vec!["Blue", "Table", "Red"]);
    }

    #[test]
    fn test_labeled_blocks_case_insensitive() {
        let text = "Q1: Who wrote Hamlet?\n(A) Shakespeare\n(B) Dickens\n\nq7 Which gas do we exhale\nA) Oxygen\nB) Carbon dioxide";
        let found = LabeledBlockStrategy.extract(text).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].question, "Who wrote Hamlet?");
        assert_eq!(found[0].ordinal, Some(1));
        assert_eq!(found[1].question, "Which gas do we exhale");
        assert_eq!(found[1].ordinal, Some(7));
        assert_eq!(found[1].source_strategy, SourceStrategy::LabeledBlock);
    }

    #[test]
    fn test_paragraphs_keep_only_questions() {
        let text = "Which planet is known as the Red Planet?\na) Venus\nb) Mars\n\n\
                    Notes\na) not\nb) a question\n\r\n\
                    Question 4: Select the prime number\n1) 4\n2) 7";
        let found = ParagraphBlockStrategy.extract(text).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].option_texts(), vec!["Venus", "Mars"]);
        assert_eq!(found[1].question, "Select the prime number");
        assert_eq!(found[1].ordinal, Some(4));
    }

    #[test]
    fn test_paragraph_strips_number_so_keys_match() {
        let numbered = NumberedBlockStrategy.extract(ARITHMETIC).unwrap();
        let paragraph = ParagraphBlockStrategy.extract(ARITHMETIC).unwrap();
        assert_eq!(paragraph.len(), 1);
        assert_eq!(paragraph[0].dedup_key(), numbered[0].dedup_key());
        assert_eq!(paragraph[0].ordinal, Some(1));
    }

    #[test]
    fn test_parse_block_rejections() {
        let s = || SourceStrategy::NumberedBlock;
        assert!(parse_block("A. only options\nB. here", None, s()).is_none());
        assert!(parse_block("A question without options?", None, s()).is_none());
        assert!(parse_block("Too few?\nA. one", None, s()).is_none());
        assert!(parse_block("Too many?\nA. 1\nB. 2\nC. 3\nD. 4\nE. 5\nF. 6\nG. 7", None, s()).is_none());
    }

    #[test]
    fn test_parse_block_joins_question_lines_and_ignores_trailing_text() {
        let mcq = parse_block(
            "Which of these\nis a mammal?\nA. Shark\nsome stray OCR noise\nB. Dolphin",
            Some(3),
            SourceStrategy::ParagraphBlock,
        )
        .unwrap();
        assert_eq!(mcq.question, "Which of these is a mammal?");
        assert_eq!(mcq.option_texts(), vec!["Shark", "Dolphin"]);
    }

    #[test]
    fn test_parse_block_stops_at_next_unnumbered_question() {
        let mcq = parse_block(
            "What is 2+2?\nA. 4\nB. 5\n\nQ2: Which planet is red?\na) Venus\nb) Mars",
            Some(1),
            SourceStrategy::NumberedBlock,
        )
        .unwrap();
        assert_eq!(mcq.option_texts(), vec!["4", "5"]);
    }

    #[test]
    fn test_extractor_runs_all_strategies_in_order() {
        let extractor = TextBlockExtractor::new();
        assert_eq!(
            extractor.strategy_names(),
            vec!["numbered-block", "labeled-block", "paragraph-block"]
        );
        let found = extractor.extract(ARITHMETIC);
        let strategies: Vec<SourceStrategy> = found.into_iter().map(|m| m.source_strategy).collect();
        assert_eq!(
            strategies,
            vec![SourceStrategy::NumberedBlock, SourceStrategy::ParagraphBlock]
        );
    }
}
