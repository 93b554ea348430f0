//! # MCQ Detect
//!
//! 从网页文档树或 OCR 文本中识别选择题，并把模型的自由文本回答映射回标准选项。
//!
//! ## 架构设计
//!
//! ### ① 核心（纯同步，无 I/O）
//! - `text/` - 文本规整、选项 / 题干判定
//! - `tree/` - 通用文档树抽象，`DocTree` 实现和 HTML 适配
//! - `extract/` - 结构化策略（单选分组、列表、标记块、表格、平台模板）和文本分块策略
//! - `services/` - 去重、答案解析、校验、检测门面 `McqDetector`
//!
//! ### ② 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 和页面快照
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整求解流程
//! - `SolveFlow` - LLM 回答 → 解析 → 兜底
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 按来源加载文档，管理资源和并发，写报告
//! - `orchestrator/document_processor` - 单个文档内逐题求解
//!
//! ## 示例
//!
//! ```
//! use mcq_detect::McqDetector;
//!
//! let mcqs = McqDetector::new().detect_text("1. What is 2+2?\nA. 2\nB. 3\nC. 4\nD. 5");
//! assert_eq!(mcqs.len(), 1);
//! assert_eq!(mcqs[0].option_texts(), vec!["2", "3", "4", "5"]);
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod text;
pub mod tree;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::{Config, SourceKind};
pub use error::{AppError, AppResult};
pub use extract::{PlatformRegistry, PlatformTemplate, Strategy};
pub use infrastructure::JsExecutor;
pub use models::{AnswerOption, Mcq, ResolveMethod, ResolvedAnswer, SourceStrategy};
pub use orchestrator::App;
pub use services::{AnswerResolver, McqDetector};
pub use tree::{parse_html, DocTree, DocumentTree, DynTree, NodeId};
pub use workflow::{SolveCtx, SolveFlow};
