//! 文档树上的结构化抽取
//!
//! 策略顺序固定：单选分组 → 列表 → 标记块 → 表格 → 平台模板。
//! 去重时先出现的候选优先，所以这个顺序就是冲突时的优先级。

pub mod list;
pub mod platform;
pub mod radio_group;
pub mod tagged;
pub mod table;

pub use list::ListStrategy;
pub use platform::{PlatformRegistry, PlatformStrategy, PlatformTemplate};
pub use radio_group::RadioGroupStrategy;
pub use tagged::TaggedBlockStrategy;
pub use table::TableStrategy;

use crate::extract::{run_strategies, Strategy};
use crate::models::Mcq;
use crate::tree::DynTree;

pub struct StructuredExtractor {
    strategies: Vec<Box<dyn Strategy<DynTree>>>,
}

impl StructuredExtractor {
    /// 使用内置平台模板
    pub fn new() -> Self {
        Self::with_platforms(PlatformRegistry::with_defaults())
    }

    /// 使用调用方提供的平台注册表
    pub fn with_platforms(registry: PlatformRegistry) -> Self {
        Self {
            strategies: vec![
                Box::new(RadioGroupStrategy),
                Box::new(ListStrategy),
                Box::new(TaggedBlockStrategy),
                Box::new(TableStrategy),
                Box::new(PlatformStrategy::new(registry)),
            ],
        }
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// 运行全部策略，返回未去重的候选
    pub fn extract(&self, tree: &DynTree) -> Vec<Mcq> {
        run_strategies(&self.strategies, tree)
    }
}

impl Default for StructuredExtractor {
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
    fn test_strategy_order() {
        assert_eq!(
            StructuredExtractor::new().strategy_names(),
            vec!["radio-group", "list", "tagged-block", "table", "platform-template"]
        );
    }

    #[test]
    fn test_overlapping_strategies_all_kept() {
        // 带 question class 的块里放一个带标记的列表：列表策略和标记块策略都会命中
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
        let found = StructuredExtractor::new().extract(&tree as &DynTree);
        let strategies: Vec<&SourceStrategy> = found.iter().map(|m| &m.source_strategy).collect();
        assert_eq!(strategies, vec![&SourceStrategy::List, &SourceStrategy::TaggedBlock]);
        assert_eq!(found[0].question, found[1].question);
    }
}
