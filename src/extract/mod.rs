//! 题目抽取层
//!
//! 每个策略独立运行：某个策略出错只记录日志，当作没有产出，不影响其他策略。
//! 结果按策略注册顺序拼接，后续去重依赖这个固定顺序。

pub mod locate;
pub mod structured;
pub mod text_block;

pub use structured::{PlatformRegistry, PlatformTemplate, StructuredExtractor};
pub use text_block::{parse_block, TextBlockExtractor};

use tracing::{debug, warn};

use crate::models::Mcq;

/// 一种独立的抽取算法
pub trait Strategy<I: ?Sized>: Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, input: &I) -> anyhow::Result<Vec<Mcq>>;
}

/// 按顺序运行所有策略并拼接候选
pub fn run_strategies<I: ?Sized>(strategies: &[Box<dyn Strategy<I>>], input: &I) -> Vec<Mcq> {
    let mut candidates = Vec::new();
    for strategy in strategies {
        match strategy.extract(input) {
            Ok(found) => {
                debug!("策略 {} 产出 {} 个候选", strategy.name(), found.len());
                candidates.extend(found);
            }
            Err(e) => {
                warn!("⚠️ 策略 {} 执行失败，按零结果处理: {:#}", strategy.name(), e);
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerOption, SourceStrategy};

    struct Failing;

    impl Strategy<str> for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn extract(&self, _input: &str) -> anyhow::Result<Vec<Mcq>> {
            anyhow::bail!("boom")
        }
    }

    struct Fixed(&'static str);

    impl Strategy<str> for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn extract(&self, _input: &str) -> anyhow::Result<Vec<Mcq>> {
            let options = vec![
                AnswerOption::from_raw("A. yes", None),
                AnswerOption::from_raw("B. no", None),
            ];
            Ok(Mcq::candidate(self.0, None, options, SourceStrategy::ParagraphBlock, None)
                .into_iter()
                .collect())
        }
    }

    #[test]
    fn test_failing_strategy_is_isolated() {
        let strategies: Vec<Box<dyn Strategy<str>>> = vec![
            Box::new(Fixed("Is this the first one?")),
            Box::new(Failing),
            Box::new(Fixed("Is this the second one?")),
        ];
        let found = run_strategies(&strategies, "ignored");
        let questions: Vec<&str> = found.iter().map(|m| m.question.as_str()).collect();
        assert_eq!(questions, vec!["Is this the first one?", "Is this the second one?"]);
    }
}
