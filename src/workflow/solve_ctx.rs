//! 求解上下文
//!
//! 封装"我正在处理哪份文档的第几题"这一信息

use std::fmt::Display;

/// 求解上下文
#[derive(Debug, Clone)]
pub struct SolveCtx {
    /// 文档名（页面 URL 或文本文件名）
    pub document: String,

    /// 题目在文档中的序号（从1开始）
    pub question_index: usize,
}

impl SolveCtx {
    pub fn new(document: impl Into<String>, question_index: usize) -> Self {
        Self {
            document: document.into(),
            question_index,
        }
    }
}

impl Display for SolveCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} #{}]", self.document, self.question_index)
    }
}
