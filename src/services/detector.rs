//! 题目检测门面 - 业务能力层
//!
//! 抽取 → 去重 → 校验（只记日志，不丢弃）。两次检测同一输入得到相同结果。

use tracing::{info, warn};

use crate::extract::{PlatformRegistry, StructuredExtractor, TextBlockExtractor};
use crate::models::Mcq;
use crate::services::dedup::deduplicate;
use crate::services::validator::validate;
use crate::tree::DynTree;

pub struct McqDetector {
    structured: StructuredExtractor,
    text: TextBlockExtractor,
}

impl McqDetector {
    pub fn new() -> Self {
        Self {
            structured: StructuredExtractor::new(),
            text: TextBlockExtractor::new(),
        }
    }

    /// 使用自定义的平台模板注册表
    pub fn with_platforms(registry: PlatformRegistry) -> Self {
        Self {
            structured: StructuredExtractor::with_platforms(registry),
            text: TextBlockExtractor::new(),
        }
    }

    /// 从文档树检测
    pub fn detect_tree(&self, tree: &DynTree) -> Vec<Mcq> {
        let candidates = self.structured.extract(tree);
        self.finish("文档树", candidates)
    }

    /// 从纯文本检测（题目和选项都没有节点引用）
    pub fn detect_text(&self, text: &str) -> Vec<Mcq> {
        let candidates = self.text.extract(text);
        self.finish("文本", candidates)
    }

    fn finish(&self, source: &str, candidates: Vec<Mcq>) -> Vec<Mcq> {
        let total = candidates.len();
        let mcqs = deduplicate(candidates);

        for mcq in &mcqs {
            let report = validate(mcq);
            if !report.is_valid {
                warn!("⚠️ 题目校验未通过 [{}]: {}", report.issues.join(", "), mcq.question);
            }
        }

        info!("✓ {}检测完成: {} 个候选，去重后 {} 道题", source, total, mcqs.len());
        mcqs
    }
}

impl Default for McqDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceStrategy;
    use crate::tree::{DocTree, El};

    #[test]
    fn test_detect_text_example() {
        let found = McqDetector::new().detect_text("1. What is 2+2?\nA. 2\nB. 3\nC. 4\nD. 5");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "What is 2+2?");
        assert_eq!(found[0].option_texts(), vec!["2", "3", "4", "5"]);
        assert_eq!(found[0].ordinal, Some(1));
        assert_eq!(found[0].source_strategy, SourceStrategy::NumberedBlock);
    }

    #[test]
    fn test_detect_tree_merges_overlapping_strategies() {
        let tree = DocTree::from_root(
            El::new("body").child(
                El::new("div")
                    .class("question")
                    .child(El::new("p").text("Which metal is liquid at room temperature?"))
                    .child(El::new("ul").class("options").children([
                        El::new("li").text("A. Mercury"),
                        El::new("li").text("B. Iron"),
                    ])),
            ),
        );
        let found = McqDetector::new().detect_tree(&tree as &DynTree);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source_strategy, SourceStrategy::List);
    }

    #[test]
    fn test_no_questions_is_empty_not_error() {
        assert!(McqDetector::new().detect_text("just some prose without choices").is_empty());
    }
}
