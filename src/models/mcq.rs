use serde::{Deserialize, Serialize};

use crate::text::normalizer::{normalize_whitespace, strip_option_prefix};
use crate::tree::NodeId;

/// 选项数量下限
pub const MIN_OPTIONS: usize = 2;
/// 选项数量上限
pub const MAX_OPTIONS: usize = 6;

/// 题目的来源策略
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "platform", rename_all = "snake_case")]
pub enum SourceStrategy {
    /// 单选控件分组（radio）
    RadioGroup,
    /// 列表结构（ul / ol）
    List,
    /// class / data 属性标记的块
    TaggedBlock,
    /// 表格
    Table,
    /// 已知平台模板，携带平台名称
    Platform(String),
    /// 文本：数字编号块
    NumberedBlock,
    /// 文本：Q 前缀块
    LabeledBlock,
    /// 文本：空行分段
    ParagraphBlock,
}

impl std::fmt::Display for SourceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceStrategy::RadioGroup => write!(f, "radio-group"),
            SourceStrategy::List => write!(f, "list"),
            SourceStrategy::TaggedBlock => write!(f, "tagged-block"),
            SourceStrategy::Table => write!(f, "table"),
            SourceStrategy::Platform(name) => write!(f, "platform:{}", name),
            SourceStrategy::NumberedBlock => write!(f, "numbered-block"),
            SourceStrategy::LabeledBlock => write!(f, "labeled-block"),
            SourceStrategy::ParagraphBlock => write!(f, "paragraph-block"),
        }
    }
}

/// 单个选项
///
/// 创建后不再修改。`source_ref` 只在结构化来源时存在。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<NodeId>,
    pub raw_value: String,
}

impl AnswerOption {
    /// 从原始文本构建选项：先去掉选项前缀，再规整空白
    pub fn from_raw(raw: &str, source_ref: Option<NodeId>) -> Self {
        Self {
            text: normalize_whitespace(strip_option_prefix(raw)),
            source_ref,
            raw_value: normalize_whitespace(raw),
        }
    }

    /// 同 `from_raw`，但 raw_value 使用控件自身的值（例如 radio 的 value 属性）
    pub fn with_value(raw: &str, value: Option<&str>, source_ref: Option<NodeId>) -> Self {
        let mut option = Self::from_raw(raw, source_ref);
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            option.raw_value = value.trim().to_string();
        }
        option
    }
}

/// 一道选择题（候选）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_ref: Option<NodeId>,
    /// 按出现顺序排列，第 i 个选项对应字母 A+i
    pub options: Vec<AnswerOption>,
    pub source_strategy: SourceStrategy,
    /// 原文中声明的题号（如 "Q3"），没有则为 None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u32>,
}

impl Mcq {
    /// 构建一个候选题目
    ///
    /// 丢弃空文本选项；题干为空或选项数不在 [2, 6] 时返回 None。
    pub fn candidate(
        question: &str,
        question_ref: Option<NodeId>,
        options: Vec<AnswerOption>,
        source_strategy: SourceStrategy,
        ordinal: Option<u32>,
    ) -> Option<Self> {
        let question = normalize_whitespace(question);
        if question.is_empty() {
            return None;
        }

        let options: Vec<AnswerOption> = options
            .into_iter()
            .filter(|o| !o.text.is_empty())
            .collect();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return None;
        }

        Some(Self {
            question,
            question_ref,
            options,
            source_strategy,
            ordinal,
        })
    }

    /// 去重用的规范化题干
    pub fn dedup_key(&self) -> String {
        normalize_whitespace(&self.question).to_lowercase()
    }

    /// 选项文本列表
    pub fn option_texts(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.text.as_str()).collect()
    }
}

impl std::fmt::Display for Mcq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ordinal {
            Some(n) => write!(f, "[{}] #{} {}", self.source_strategy, n, self.question)?,
            None => write!(f, "[{}] {}", self.source_strategy, self.question)?,
        }
        for (i, option) in self.options.iter().enumerate() {
            write!(f, "\n  {}. {}", option_letter(i), option.text)?;
        }
        Ok(())
    }
}

/// 选项序号对应的字母（0 → 'A'）
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
