use crate::extract::Strategy;
use crate::models::{AnswerOption, Mcq, SourceStrategy, MAX_OPTIONS, MIN_OPTIONS};
use crate::tree::{DocumentTree, DynTree, NodeId};

/// class / data 属性标记块策略
///
/// 题干节点：class 含 `question`（覆盖 question、quiz-question、mcq-question 等）或带 data-question。
/// 选项节点：class 含 `option` / `choice`，或带 data-option、data-choice、role=option。
/// 两类都只取最内层的匹配节点；题目块里不含选项的标记节点（题号、提示）不算题干节点。
pub struct TaggedBlockStrategy;

pub(crate) fn is_question_tagged(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.class_contains(node, "question") || tree.attr(node, "data-question").is_some()
}

pub(crate) fn is_option_tagged(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.class_contains(node, "option")
        || tree.class_contains(node, "choice")
        || tree.attr(node, "data-option").is_some()
        || tree.attr(node, "data-choice").is_some()
        || tree.attr_is(node, "role", "option")
}

/// 只保留不包含其他匹配节点的那些
fn innermost(tree: &dyn DocumentTree, nodes: Vec<NodeId>) -> Vec<NodeId> {
    nodes
        .iter()
        .copied()
        .filter(|&n| !nodes.iter().any(|&other| other != n && tree.is_ancestor_of(n, other)))
        .collect()
}

fn has_option_descendant(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.descendants(node)
        .into_iter()
        .any(|d| is_option_tagged(tree, d))
}

/// 题目块内部的辅助节点（如 `question-number`）：自身没有选项，外层有选项的题目块
fn is_helper_inside_block(tree: &dyn DocumentTree, node: NodeId) -> bool {
    if has_option_descendant(tree, node) {
        return false;
    }
    tree.parent(node)
        .and_then(|p| tree.closest(p, &|a| is_question_tagged(tree, a) && has_option_descendant(tree, a)))
        .is_some()
}

/// 节点（含自身）内最内层的选项节点
fn options_under(tree: &dyn DocumentTree, node: NodeId) -> Vec<NodeId> {
    let mut matches = Vec::new();
    if is_option_tagged(tree, node) {
        matches.push(node);
    }
    matches.extend(
        tree.descendants(node)
            .into_iter()
            .filter(|&d| is_option_tagged(tree, d)),
    );
    innermost(tree, matches)
}

fn contains_question(tree: &dyn DocumentTree, node: NodeId) -> bool {
    is_question_tagged(tree, node)
        || tree
            .descendants(node)
            .into_iter()
            .any(|d| is_question_tagged(tree, d))
}

/// 只有一个 "options" 容器时，用它的子元素作为选项
fn expand_single(tree: &dyn DocumentTree, options: Vec<NodeId>) -> Vec<NodeId> {
    if options.len() == 1 {
        let children = tree.element_children(options[0]);
        if children.len() >= MIN_OPTIONS {
            return children;
        }
    }
    options
}

/// 为题干节点寻找选项：先找后代，不够再找后续兄弟，遇到下一道题为止
fn find_options(tree: &dyn DocumentTree, question: NodeId) -> Vec<NodeId> {
    let inner: Vec<NodeId> = tree
        .descendants(question)
        .into_iter()
        .filter(|&d| is_option_tagged(tree, d))
        .collect();
    let options = expand_single(tree, innermost(tree, inner));
    if options.len() >= MIN_OPTIONS {
        return options;
    }

    let mut from_siblings = Vec::new();
    for sibling in tree.following_siblings(question) {
        if contains_question(tree, sibling) {
            break;
        }
        from_siblings.extend(options_under(tree, sibling));
    }
    expand_single(tree, from_siblings)
}

impl Strategy<DynTree> for TaggedBlockStrategy {
    fn name(&self) -> &str {
        "tagged-block"
    }

    fn extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let tagged = tree.find_all(&|n| {
            is_question_tagged(tree, n) && !is_option_tagged(tree, n) && !is_helper_inside_block(tree, n)
        });
        let questions = innermost(tree, tagged);

        let mut found = Vec::new();
        for question in questions {
            let option_nodes = find_options(tree, question);
            if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&option_nodes.len()) {
                continue;
            }

            let text = tree.text_content_excluding(question, &|n| is_option_tagged(tree, n));
            let options = option_nodes
                .iter()
                .map(|&o| AnswerOption::from_raw(&tree.text_content(o), Some(o)))
                .collect();

            if let Some(mcq) = Mcq::candidate(&text, Some(question), options, SourceStrategy::TaggedBlock, None) {
                found.push(mcq);
            }
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DocTree, El};

    fn option(text: &str) -> El {
        El::new("div").class("option").text(text)
    }

    #[test]
    fn test_options_as_descendants() {
        let tree = DocTree::from_root(
            El::new("body").child(
                El::new("div")
                    .class("quiz-question")
                    .child(El::new("p").text("What is H2O?"))
                    .child(option("A. Water"))
                    .child(option("B. Salt")),
            ),
        );
        let found = TaggedBlockStrategy.extract(&tree as &DynTree).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "What is H2O?");
        assert_eq!(found[0].option_texts(), vec!["Water", "Salt"]);
    }

    #[test]
    fn test_options_as_following_siblings_stop_at_next_question() {
        let tree = DocTree::from_root(
            El::new("body")
                .child(El::new("h4").class("mcq-question").text("First question here?"))
                .child(El::new("div").class("choices").children([
                    El::new("span").attr("data-choice", "1").text("One"),
                    El::new("span").attr("data-choice", "2").text("Two"),
                ]))
                .child(El::new("h4").attr("data-question", "").text("Second question here?"))
                .child(option("Three"))
                .child(option("Four"))
                .child(option("Five")),
        );
        let found = TaggedBlockStrategy.extract(&tree as &DynTree).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].question, "First question here?");
        assert_eq!(found[0].option_texts(), vec!["One", "Two"]);
        assert_eq!(found[1].option_texts(), vec!["Three", "Four", "Five"]);
    }

    #[test]
    fn test_single_options_container_uses_children() {
        let tree = DocTree::from_root(
            El::new("div")
                .class("question")
                .child(El::new("span").text("Pick the mammal"))
                .child(El::new("ul").class("options").children([
                    El::new("li").text("Shark"),
                    El::new("li").text("Whale"),
                ])),
        );
        let found = TaggedBlockStrategy.extract(&tree as &DynTree).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "Pick the mammal");
        assert_eq!(found[0].option_texts(), vec!["Shark", "Whale"]);
    }

    #[test]
    fn test_number_badge_inside_block_is_not_the_question() {
        let tree = DocTree::from_root(
            El::new("body").child(
                El::new("div")
                    .class("question")
                    .child(El::new("span").class("question-number").text("1."))
                    .text(" Which planet is the largest?")
                    .child(option("Jupiter"))
                    .child(option("Mars")),
            ),
        );
        let found = TaggedBlockStrategy.extract(&tree as &DynTree).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "1. Which planet is the largest?");
        assert_eq!(found[0].option_texts(), vec!["Jupiter", "Mars"]);
    }

    #[test]
    fn test_questions_inside_tagged_list_wrapper() {
        let block = |q: &str, a: &str, b: &str| {
            El::new("div").class("question").child(El::new("p").text(q)).child(option(a)).child(option(b))
        };
        let tree = DocTree::from_root(
            El::new("section")
                .class("questions-list")
                .child(block("Which planet is red?", "Mars", "Venus"))
                .child(block("Which gas do we exhale?", "Oxygen", "Carbon dioxide")),
        );
        let found = TaggedBlockStrategy.extract(&tree as &DynTree).unwrap();
        let questions: Vec<&str> = found.iter().map(|m| m.question.as_str()).collect();
        assert_eq!(questions, vec!["Which planet is red?", "Which gas do we exhale?"]);
    }

    #[test]
    fn test_too_few_options_rejected() {
        let tree = DocTree::from_root(
            El::new("div")
                .class("question")
                .text("Lonely question?")
                .child(option("Only")),
        );
        assert!(TaggedBlockStrategy.extract(&tree as &DynTree).unwrap().is_empty());
    }
}
