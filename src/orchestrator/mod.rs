//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 管理应用生命周期（初始化、运行）
//! - 按来源加载文档：浏览器页面或文本目录
//! - 控制并发数量（Semaphore）
//! - 管理浏览器资源（Browser、JsExecutor）
//! - 写报告、输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 对一份文档的题目逐题求解
//! - 汇总成报告条目
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Document>)
//!     ↓
//! document_processor (处理 Vec<Mcq>)
//!     ↓
//! workflow::SolveFlow (处理单个 Mcq)
//!     ↓
//! services (能力层：detect / resolve / llm)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```

pub mod batch_processor;
pub mod document_processor;

// 重新导出主要类型
pub use batch_processor::{App, RunReport};
pub use document_processor::{process_document, DocumentReport, DocumentStats, SolvedMcq};
