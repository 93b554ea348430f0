use std::collections::HashSet;

use tracing::debug;

use crate::models::Mcq;

/// 按规范化题干去重，先出现的保留
///
/// 只看题干：后出现的同题干候选即使选项更完整也会被丢弃。
pub fn deduplicate(candidates: Vec<Mcq>) -> Vec<Mcq> {
    let total = candidates.len();
    let mut seen = HashSet::new();
    let kept: Vec<Mcq> = candidates
        .into_iter()
        .filter(|mcq| seen.insert(mcq.dedup_key()))
        .collect();

    if kept.len() < total {
        debug!("去重: {} → {} 个题目", total, kept.len());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerOption, SourceStrategy};

    fn mcq(question: &str, options: &[&str], strategy: SourceStrategy) -> Mcq {
        let options = options.iter().map(|o| AnswerOption::from_raw(o, None)).collect();
        Mcq::candidate(question, None, options, strategy, None).unwrap()
    }

    #[test]
    fn test_case_and_whitespace_collapse() {
        let found = deduplicate(vec![
            mcq("What is  H2O?", &["Water", "Salt"], SourceStrategy::List),
            mcq("what is h2o?", &["Water", "Salt"], SourceStrategy::TaggedBlock),
            mcq("Which is heavier?", &["Lead", "Foam"], SourceStrategy::Table),
        ]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].source_strategy, SourceStrategy::List);
        assert_eq!(found[1].question, "Which is heavier?");
    }

    /// 先出现的候选胜出，即使后面的候选选项更多
    #[test]
    fn test_first_seen_option_set_wins_even_if_less_complete() {
        let found = deduplicate(vec![
            mcq("Pick a prime", &["2", "4"], SourceStrategy::RadioGroup),
            mcq("Pick a prime", &["2", "4", "7", "9"], SourceStrategy::Platform("moodle".into())),
        ]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].option_texts(), vec!["2", "4"]);
    }

    #[test]
    fn test_order_preserved() {
        let questions = ["Is one first?", "Is two second?", "Is three third?"];
        let input: Vec<Mcq> = questions
            .iter()
            .map(|q| mcq(q, &["yes", "no"], SourceStrategy::ParagraphBlock))
            .collect();
        let found = deduplicate(input);
        let got: Vec<&str> = found.iter().map(|m| m.question.as_str()).collect();
        assert_eq!(got, questions);
    }
}
