use super::PlatformTemplate;
use crate::models::{AnswerOption, Mcq, SourceStrategy};
use crate::text::normalize_whitespace;
use crate::tree::{DocumentTree, DynTree, NodeId};

/// 子树中第一个满足条件且有文本的节点
fn first_text(
    tree: &dyn DocumentTree,
    root: NodeId,
    pred: &dyn Fn(NodeId) -> bool,
) -> Option<(NodeId, String)> {
    tree.descendants(root)
        .into_iter()
        .filter(|&n| pred(n))
        .map(|n| (n, tree.text_content(n)))
        .find(|(_, text)| !text.is_empty())
}

fn any_node(tree: &dyn DocumentTree, pred: &dyn Fn(NodeId) -> bool) -> bool {
    !tree.find_all(pred).is_empty()
}

fn attr_text(tree: &dyn DocumentTree, node: NodeId, name: &str) -> Option<String> {
    tree.attr(node, name)
        .map(normalize_whitespace)
        .filter(|s| !s.is_empty())
}

fn build(
    template: &dyn PlatformTemplate,
    question: Option<(NodeId, String)>,
    options: Vec<AnswerOption>,
) -> Option<Mcq> {
    let (node, text) = question?;
    Mcq::candidate(
        &text,
        Some(node),
        options,
        SourceStrategy::Platform(template.name().to_string()),
        None,
    )
}

/// Google Forms：`role=listitem` 中带 `role=radiogroup` 的题目
pub struct GoogleFormsTemplate;

impl GoogleFormsTemplate {
    fn is_item(tree: &dyn DocumentTree, node: NodeId) -> bool {
        tree.attr_is(node, "role", "listitem")
            && tree
                .descendants(node)
                .into_iter()
                .any(|d| tree.attr_is(d, "role", "radiogroup"))
    }

    fn radio_label(tree: &dyn DocumentTree, radio: NodeId) -> String {
        attr_text(tree, radio, "aria-label")
            .or_else(|| attr_text(tree, radio, "data-value"))
            .unwrap_or_else(|| tree.text_content(radio))
    }
}

impl PlatformTemplate for GoogleFormsTemplate {
    fn name(&self) -> &'static str {
        "google-forms"
    }

    fn matches(&self, tree: &DynTree) -> bool {
        any_node(tree, &|n| Self::is_item(tree, n))
    }

    fn try_extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let mut found = Vec::new();
        for item in tree.find_all(&|n| Self::is_item(tree, n)) {
            let question = first_text(tree, item, &|n| tree.attr_is(n, "role", "heading"));
            let options = tree
                .descendants(item)
                .into_iter()
                .filter(|&n| tree.attr_is(n, "role", "radio"))
                .map(|r| AnswerOption::from_raw(&Self::radio_label(tree, r), Some(r)))
                .collect();
            found.extend(build(self, question, options));
        }
        Ok(found)
    }
}

/// Quizlet 风格的学习卡片：`data-testid` 标记
pub struct QuizletTemplate;

impl QuizletTemplate {
    fn is_card(tree: &dyn DocumentTree, node: NodeId) -> bool {
        tree.attr(node, "data-testid") == Some("MCQ")
    }

    fn is_prompt(tree: &dyn DocumentTree, node: NodeId) -> bool {
        tree.attr(node, "data-testid") == Some("Question Text") || tree.class_contains(node, "formattedtext")
    }
}

impl PlatformTemplate for QuizletTemplate {
    fn name(&self) -> &'static str {
        "quizlet"
    }

    fn matches(&self, tree: &DynTree) -> bool {
        any_node(tree, &|n| Self::is_card(tree, n))
    }

    fn try_extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let mut found = Vec::new();
        for card in tree.find_all(&|n| Self::is_card(tree, n)) {
            let answers: Vec<NodeId> = tree
                .descendants(card)
                .into_iter()
                .filter(|&n| tree.attr(n, "data-testid") == Some("MCQ Answer"))
                .collect();
            // 答案里也可能带 formattedtext，题干只在答案之外找
            let question = first_text(tree, card, &|n| {
                Self::is_prompt(tree, n) && !answers.iter().any(|&a| a == n || tree.is_ancestor_of(a, n))
            });
            let options = answers
                .iter()
                .map(|&a| AnswerOption::from_raw(&tree.text_content(a), Some(a)))
                .collect();
            found.extend(build(self, question, options));
        }
        Ok(found)
    }
}

/// Canvas LMS 测验页
pub struct CanvasTemplate;

impl PlatformTemplate for CanvasTemplate {
    fn name(&self) -> &'static str {
        "canvas"
    }

    fn matches(&self, tree: &DynTree) -> bool {
        any_node(tree, &|n| tree.has_class(n, "display_question"))
    }

    fn try_extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let mut found = Vec::new();
        for block in tree.find_all(&|n| tree.has_class(n, "display_question")) {
            let question = first_text(tree, block, &|n| tree.has_class(n, "question_text"));
            let options = tree
                .descendants(block)
                .into_iter()
                .filter(|&n| tree.has_class(n, "answer"))
                .map(|answer| {
                    let label = first_text(tree, answer, &|n| {
                        tree.has_class(n, "answer_label") || tree.has_class(n, "answer_text")
                    })
                    .map(|(_, text)| text)
                    .unwrap_or_else(|| tree.text_content(answer));
                    AnswerOption::from_raw(&label, Some(answer))
                })
                .collect();
            found.extend(build(self, question, options));
        }
        Ok(found)
    }
}

/// Moodle 单选题：`.que.multichoice`
pub struct MoodleTemplate;

impl MoodleTemplate {
    fn is_question(tree: &dyn DocumentTree, node: NodeId) -> bool {
        tree.has_class(node, "que") && tree.has_class(node, "multichoice")
    }
}

impl PlatformTemplate for MoodleTemplate {
    fn name(&self) -> &'static str {
        "moodle"
    }

    fn matches(&self, tree: &DynTree) -> bool {
        any_node(tree, &|n| Self::is_question(tree, n))
    }

    fn try_extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let mut found = Vec::new();
        for block in tree.find_all(&|n| Self::is_question(tree, n)) {
            let question = first_text(tree, block, &|n| tree.has_class(n, "qtext"));
            let options = tree
                .descendants(block)
                .into_iter()
                .find(|&n| tree.has_class(n, "answer"))
                .map(|answer| {
                    tree.element_children(answer)
                        .into_iter()
                        .map(|row| AnswerOption::from_raw(&tree.text_content(row), Some(row)))
                        .collect()
                })
                .unwrap_or_default();
            found.extend(build(self, question, options));
        }
        Ok(found)
    }
}
