//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 对一份文档检测出的题目逐题求解（并发受信号量限制），汇总成报告条目。
//! 不开启求解时只记录检测结果。

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::error;

use crate::models::{Mcq, ResolvedAnswer};
use crate::utils::logging::log_document_detected;
use crate::workflow::{SolveCtx, SolveFlow};

/// 一道题及其求解结果
#[derive(Debug, Clone, Serialize)]
pub struct SolvedMcq {
    #[serde(flatten)]
    pub mcq: Mcq,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<ResolvedAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 单个文档的报告条目
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub name: String,
    pub mcqs: Vec<SolvedMcq>,
}

/// 文档处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub detected: usize,
    pub solved: usize,
    pub failed: usize,
}

impl DocumentReport {
    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            detected: self.mcqs.len(),
            solved: self.mcqs.iter().filter(|m| m.answer.is_some()).count(),
            failed: self.mcqs.iter().filter(|m| m.error.is_some()).count(),
        }
    }
}

/// 处理单个文档
///
/// # 参数
/// - `name`: 文档名（用于日志和报告）
/// - `mcqs`: 检测到的题目
/// - `solve_flow`: 求解流程，None 表示只检测不求解
/// - `semaphore`: 全局并发限制
pub async fn process_document(
    name: &str,
    mcqs: Vec<Mcq>,
    solve_flow: Option<Arc<SolveFlow>>,
    semaphore: Arc<Semaphore>,
) -> DocumentReport {
    log_document_detected(name, mcqs.len());

    let Some(flow) = solve_flow else {
        let mcqs = mcqs
            .into_iter()
            .map(|mcq| SolvedMcq {
                mcq,
                answer: None,
                error: None,
            })
            .collect();
        return DocumentReport {
            name: name.to_string(),
            mcqs,
        };
    };

    let mut handles = Vec::with_capacity(mcqs.len());
    for (index, mcq) in mcqs.iter().enumerate() {
        let ctx = SolveCtx::new(name, index + 1);
        let flow = Arc::clone(&flow);
        let semaphore = Arc::clone(&semaphore);
        let mcq = mcq.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| format!("信号量已关闭: {}", e))?;
            flow.solve(&mcq, &ctx).await.map_err(|e| {
                error!("{} ❌ 求解失败: {}", ctx, e);
                e.to_string()
            })
        }));
    }

    let mut solved = Vec::with_capacity(mcqs.len());
    for (mcq, handle) in mcqs.into_iter().zip(handles) {
        let (answer, error) = match handle.await {
            Ok(Ok(answer)) => (Some(answer), None),
            Ok(Err(e)) => (None, Some(e)),
            Err(e) => {
                error!("[{}] 任务执行失败: {}", name, e);
                (None, Some(e.to_string()))
            }
        };
        solved.push(SolvedMcq { mcq, answer, error });
    }

    DocumentReport {
        name: name.to_string(),
        mcqs: solved,
    }
}
