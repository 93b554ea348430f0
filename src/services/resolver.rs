//! 答案解析器：把模型的自由文本回答映射回标准选项
//!
//! 层级依次为 exact → substring → letter → fuzzy，命中即停。
//! 回答带字母标记（`B)`、`C.`）时字母层提前到 substring 之前，
//! 除非整句回答按子串命中的是另一个选项。

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{AppResult, ResolveError};
use crate::models::{AnswerOption, Resolution, ResolveMethod};
use crate::text::comparable;

/// 编辑距离阈值系数
pub const FUZZY_RATIO: f64 = 0.4;

static LETTER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])(?:[.):\s]|$)").expect("字母标记正则无效"));

/// 经典 Levenshtein 距离（按 Unicode 标量计算，单位代价）
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AnswerResolver;

impl AnswerResolver {
    pub fn new() -> Self {
        Self
    }

    /// 解析答案
    ///
    /// 没有任何层级命中时返回 `Ok(None)`；选项列表为空属于调用错误，返回 `Err`。
    pub fn resolve(&self, answer: &str, options: &[AnswerOption]) -> AppResult<Option<Resolution>> {
        if options.is_empty() {
            return Err(ResolveError::EmptyOptions.into());
        }

        let normalized = comparable(answer);
        let texts: Vec<String> = options.iter().map(|o| comparable(&o.text)).collect();

        let resolution = Self::exact(&normalized, &texts)
            .map(|index| Resolution { index, method: ResolveMethod::Exact })
            .or_else(|| Self::marked(answer, &normalized, &texts))
            .or_else(|| {
                Self::substring(&normalized, &texts)
                    .map(|index| Resolution { index, method: ResolveMethod::Substring })
            })
            .or_else(|| {
                Self::fuzzy(&normalized, &texts)
                    .map(|index| Resolution { index, method: ResolveMethod::Fuzzy })
            });

        match resolution {
            Some(r) => debug!("答案 '{}' → 选项 {} ({})", answer, r.index, r.method),
            None => debug!("答案 '{}' 无法匹配任何选项", answer),
        }
        Ok(resolution)
    }

    fn exact(answer: &str, texts: &[String]) -> Option<usize> {
        texts.iter().position(|t| t == answer)
    }

    fn substring(answer: &str, texts: &[String]) -> Option<usize> {
        if answer.is_empty() {
            return None;
        }
        texts
            .iter()
            .position(|t| !t.is_empty() && (t.contains(answer) || answer.contains(t.as_str())))
    }

    /// 字母对应的选项下标（越界时为 None）
    fn letter_index(answer: &str, len: usize) -> Option<usize> {
        let caps = LETTER_MARKER.captures(answer.trim())?;
        let letter = caps.get(1)?.as_str().chars().next()?;
        let index = (letter as u8 - b'A') as usize;
        (index < len).then_some(index)
    }

    /// 字母层（在 substring 之前尝试）
    fn marked(raw: &str, normalized: &str, texts: &[String]) -> Option<Resolution> {
        let index = Self::letter_index(raw, texts.len())?;
        let bare = raw.trim().chars().count() == 1;
        if !bare {
            if let Some(other) = Self::substring(normalized, texts).filter(|&s| s != index) {
                return Some(Resolution { index: other, method: ResolveMethod::Substring });
            }
        }
        Some(Resolution { index, method: ResolveMethod::Letter })
    }

    fn fuzzy(answer: &str, texts: &[String]) -> Option<usize> {
        let answer_len = answer.chars().count();
        let (index, distance, best_len) = texts
            .iter()
            .enumerate()
            .map(|(i, t)| (i, levenshtein(answer, t), t.chars().count()))
            .min_by_key(|&(_, distance, _)| distance)?;

        let threshold = FUZZY_RATIO * answer_len.max(best_len) as f64;
        ((distance as f64) < threshold).then_some(index)
    }
}
