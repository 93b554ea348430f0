//! 求解流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整求解流程
//!
//! 流程顺序：
//! 1. LLM 回答
//! 2. 解析器把回答映射回选项
//! 3. 匹配失败时兜底：第一个选项，置信度 0

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{AiAnswer, Mcq, ResolveMethod, ResolvedAnswer};
use crate::services::{AnswerResolver, LlmService};
use crate::utils::logging::truncate_text;
use crate::workflow::solve_ctx::SolveCtx;

/// 求解流程
///
/// - 编排"提问 → 解析 → 兜底"
/// - 不持有任何资源（page）
/// - 只依赖业务能力（services）
pub struct SolveFlow {
    llm_service: LlmService,
    resolver: AnswerResolver,
    verbose_logging: bool,
}

impl SolveFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            llm_service: LlmService::new(config),
            resolver: AnswerResolver::new(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 调用模型并解析答案
    pub async fn solve(&self, mcq: &Mcq, ctx: &SolveCtx) -> AppResult<ResolvedAnswer> {
        info!("{} 🤖 求解: {}", ctx, truncate_text(&mcq.question, 80));

        let ai = self.llm_service.ask_answer(mcq).await?;
        if self.verbose_logging {
            info!("{}   模型回答: {} (置信度 {}) {}", ctx, ai.answer, ai.confidence, ai.explanation);
        }

        let resolved = self.reconcile(mcq, &ai)?;
        info!(
            "{} ✓ 答案: {} [{}] 置信度 {}",
            ctx, resolved.option.text, resolved.method, resolved.confidence
        );
        Ok(resolved)
    }

    /// 把模型回答映射到标准选项；匹配失败时取第一个选项，置信度 0
    pub fn reconcile(&self, mcq: &Mcq, ai: &AiAnswer) -> AppResult<ResolvedAnswer> {
        match self.resolver.resolve(&ai.answer, &mcq.options)? {
            Some(resolution) => Ok(ResolvedAnswer::new(
                mcq.options[resolution.index].clone(),
                resolution.index,
                ai.confidence,
                resolution.method,
            )),
            None => {
                warn!("⚠️ 回答 '{}' 无法匹配任何选项，默认第一个选项", ai.answer);
                Ok(ResolvedAnswer::new(mcq.options[0].clone(), 0, 0.0, ResolveMethod::Fallback))
            }
        }
    }
}
