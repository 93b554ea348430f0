use serde::Serialize;

use crate::models::{Mcq, MAX_OPTIONS, MIN_OPTIONS};
use crate::text::{normalize_whitespace, MIN_QUESTION_LEN};

/// 校验结果（仅供参考，不修改题目）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

pub fn validate(mcq: &Mcq) -> ValidationReport {
    let mut issues = Vec::new();

    if mcq.question.trim().chars().count() < MIN_QUESTION_LEN {
        issues.push("question too short".to_string());
    }
    if mcq.options.len() < MIN_OPTIONS {
        issues.push("too few options".to_string());
    }
    if mcq.options.len() > MAX_OPTIONS {
        issues.push("too many options".to_string());
    }
    for (i, option) in mcq.options.iter().enumerate() {
        if normalize_whitespace(&option.text).is_empty() {
            issues.push(format!("empty option at index {}", i));
        }
    }

    ValidationReport {
        is_valid: issues.is_empty(),
        issues,
    }
}
