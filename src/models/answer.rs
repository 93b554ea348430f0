use serde::{Deserialize, Serialize};

use super::mcq::AnswerOption;

/// 答案匹配所用的层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMethod {
    Exact,
    Substring,
    Letter,
    Fuzzy,
    /// 调用方兜底（匹配失败时默认第一个选项）
    Fallback,
}

impl std::fmt::Display for ResolveMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResolveMethod::Exact => "exact",
            ResolveMethod::Substring => "substring",
            ResolveMethod::Letter => "letter",
            ResolveMethod::Fuzzy => "fuzzy",
            ResolveMethod::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// 解析器的输出：命中的选项下标和层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub index: usize,
    pub method: ResolveMethod,
}

/// 模型回答映射回标准选项后的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAnswer {
    pub option: AnswerOption,
    pub option_index: usize,
    /// 取值范围 [0, 100]
    pub confidence: u8,
    pub method: ResolveMethod,
}

impl ResolvedAnswer {
    pub fn new(option: AnswerOption, option_index: usize, confidence: f64, method: ResolveMethod) -> Self {
        Self {
            option,
            option_index,
            confidence: clamp_confidence(confidence),
            method,
        }
    }
}

/// 模型返回的原始回答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnswer {
    pub answer: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
}

/// 把任意置信度数值限制到 [0, 100]，NaN 视为 0
pub fn clamp_confidence(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_confidence() {
        assert_eq!(clamp_confidence(-5.0), 0);
        assert_eq!(clamp_confidence(42.4), 42);
        assert_eq!(clamp_confidence(150.0), 100);
        assert_eq!(clamp_confidence(f64::NAN), 0);
    }

    #[test]
    fn test_ai_answer_defaults() {
        let ai: AiAnswer = serde_json::from_str(r#"{"answer":"Paris"}"#).unwrap();
        assert_eq!(ai.answer, "Paris");
        assert_eq!(ai.confidence, 0.0);
        assert!(ai.explanation.is_empty());
    }
}
