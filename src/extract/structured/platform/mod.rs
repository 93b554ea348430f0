//! 已知平台模板
//!
//! 每个平台是一个实现了 [`PlatformTemplate`] 的对象，注册到 [`PlatformRegistry`]。
//! 新增平台只需要 `register`，分发逻辑不用改。

mod templates;

pub use templates::{CanvasTemplate, GoogleFormsTemplate, MoodleTemplate, QuizletTemplate};

use tracing::{debug, warn};

use crate::extract::Strategy;
use crate::models::Mcq;
use crate::tree::DynTree;

/// 单个平台的抽取模板
pub trait PlatformTemplate: Send + Sync {
    /// 平台名称，写入 `SourceStrategy::Platform`
    fn name(&self) -> &'static str;

    /// 页面是否带有该平台的标记
    fn matches(&self, tree: &DynTree) -> bool;

    fn try_extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>>;
}

/// 平台模板注册表，按注册顺序分发
#[derive(Default)]
pub struct PlatformRegistry {
    templates: Vec<Box<dyn PlatformTemplate>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置的四个平台：Google Forms、Quizlet、Canvas、Moodle
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GoogleFormsTemplate));
        registry.register(Box::new(QuizletTemplate));
        registry.register(Box::new(CanvasTemplate));
        registry.register(Box::new(MoodleTemplate));
        registry
    }

    pub fn register(&mut self, template: Box<dyn PlatformTemplate>) {
        self.templates.push(template);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// 平台模板策略：运行所有匹配当前页面的模板
pub struct PlatformStrategy {
    registry: PlatformRegistry,
}

impl PlatformStrategy {
    pub fn new(registry: PlatformRegistry) -> Self {
        Self { registry }
    }

    pub fn registry_mut(&mut self) -> &mut PlatformRegistry {
        &mut self.registry
    }
}

impl Default for PlatformStrategy {
    fn default() -> Self {
        Self::new(PlatformRegistry::with_defaults())
    }
}

impl Strategy<DynTree> for PlatformStrategy {
    fn name(&self) -> &str {
        "platform-template"
    }

    fn extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let mut found = Vec::new();
        for template in &self.registry.templates {
            if !template.matches(tree) {
                continue;
            }
            match template.try_extract(tree) {
                Ok(mcqs) => {
                    debug!("平台 {} 命中，产出 {} 个候选", template.name(), mcqs.len());
                    found.extend(mcqs);
                }
                Err(e) => warn!("⚠️ 平台模板 {} 抽取失败: {:#}", template.name(), e),
            }
        }
        Ok(found)
    }
}
