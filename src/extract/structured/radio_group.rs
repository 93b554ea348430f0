use crate::extract::locate::locate_question;
use crate::extract::Strategy;
use crate::models::{AnswerOption, Mcq, SourceStrategy};
use crate::text::normalize_whitespace;
use crate::tree::{DocumentTree, DynTree, NodeId};

/// 单选控件分组策略
///
/// `input[type=radio]` 按 name 分组，`role=radio` 按最近的 radiogroup 分组。
pub struct RadioGroupStrategy;

fn is_radio_input(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.is_tag(node, "input") && tree.attr_is(node, "type", "radio")
}

fn is_aria_radio(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.attr_is(node, "role", "radio")
}

fn group_key(tree: &dyn DocumentTree, node: NodeId) -> String {
    if is_radio_input(tree, node) {
        if let Some(name) = tree.attr(node, "name").filter(|n| !n.is_empty()) {
            return format!("name:{}", name);
        }
    } else if let Some(group) = tree.closest(node, &|n| tree.attr_is(n, "role", "radiogroup")) {
        return format!("group:{}", group.index());
    }
    // 无法分组的控件各自成组，之后会因为少于 2 个被丢弃
    format!("single:{}", node.index())
}

/// 控件对应的标签文本
pub(crate) fn control_label(tree: &dyn DocumentTree, control: NodeId) -> String {
    if let Some(id) = tree.attr(control, "id").filter(|id| !id.is_empty()) {
        let labels = tree.find_all(&|n| tree.is_tag(n, "label") && tree.attr(n, "for") == Some(id));
        if let Some(&label) = labels.first() {
            let text = tree.text_content(label);
            if !text.is_empty() {
                return text;
            }
        }
    }

    if let Some(label) = tree.closest(control, &|n| tree.is_tag(n, "label")) {
        let text = tree.text_content(label);
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(aria) = tree.attr(control, "aria-label").map(normalize_whitespace) {
        if !aria.is_empty() {
            return aria;
        }
    }

    if is_aria_radio(tree, control) {
        let own = tree.text_content(control);
        if !own.is_empty() {
            return own;
        }
    }

    if let Some(next) = next_sibling_text(tree, control) {
        return next;
    }

    tree.attr(control, "value")
        .map(normalize_whitespace)
        .unwrap_or_default()
}

/// 控件后面第一个非空的兄弟（文本节点或元素）
fn next_sibling_text(tree: &dyn DocumentTree, control: NodeId) -> Option<String> {
    let parent = tree.parent(control)?;
    let siblings = tree.children(parent);
    let pos = siblings.iter().position(|&s| s == control)?;
    siblings[pos + 1..]
        .iter()
        .map(|&s| tree.text_content(s))
        .find(|text| !text.is_empty())
}

impl Strategy<DynTree> for RadioGroupStrategy {
    fn name(&self) -> &str {
        "radio-group"
    }

    fn extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let controls = tree.find_all(&|n| is_radio_input(tree, n) || is_aria_radio(tree, n));

        // 保持首次出现的顺序
        let mut groups: Vec<(String, Vec<NodeId>)> = Vec::new();
        for control in controls {
            let key = group_key(tree, control);
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(control),
                None => groups.push((key, vec![control])),
            }
        }

        let mut found = Vec::new();
        for (_, members) in groups.iter().filter(|(_, m)| m.len() >= 2) {
            let Some((question_node, question)) = locate_question(tree, members) else {
                continue;
            };

            let options = members
                .iter()
                .map(|&c| AnswerOption::with_value(&control_label(tree, c), tree.attr(c, "value"), Some(c)))
                .collect();

            if let Some(mcq) = Mcq::candidate(
                &question,
                Some(question_node),
                options,
                SourceStrategy::RadioGroup,
                None,
            ) {
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

    fn labelled_radio(name: &str, id: &str, value: &str) -> [El; 2] {
        [
            El::new("input")
                .attr("type", "radio")
                .attr("name", name)
                .attr("id", id)
                .attr("value", value),
            El::new("label").attr("for", id).text(value),
        ]
    }

    #[test]
    fn test_groups_by_name_with_for_labels() {
        let mut fieldset = El::new("fieldset").child(El::new("legend").text("Capital of France?"));
        for (id, value) in [("a", "Paris"), ("b", "Berlin"), ("c", "Rome")] {
            fieldset = fieldset.children(labelled_radio("capital", id, value));
        }
        let tree = DocTree::from_root(El::new("body").child(fieldset));

        let found = RadioGroupStrategy.extract(&tree as &DynTree).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "Capital of France?");
        assert_eq!(found[0].option_texts(), vec!["Paris", "Berlin", "Rome"]);
        assert!(found[0].options.iter().all(|o| o.source_ref.is_some()));
        assert_eq!(found[0].source_strategy, SourceStrategy::RadioGroup);
    }

    #[test]
    fn test_single_control_group_discarded() {
        let tree = DocTree::from_root(
            El::new("fieldset")
                .child(El::new("legend").text("Do you agree?"))
                .children(labelled_radio("agree", "y", "Yes"))
                .children(labelled_radio("other", "n", "No")),
        );
        assert!(RadioGroupStrategy.extract(&tree as &DynTree).unwrap().is_empty());
    }

    #[test]
    fn test_aria_radios_grouped_by_radiogroup() {
        let tree = DocTree::from_root(
            El::new("body")
                .child(El::new("h3").text("Which gas do plants absorb?"))
                .child(
                    El::new("div")
                        .attr("role", "radiogroup")
                        .child(El::new("div").attr("role", "radio").attr("aria-label", "Oxygen"))
                        .child(El::new("div").attr("role", "radio").text("Carbon dioxide")),
                ),
        );
        let found = RadioGroupStrategy.extract(&tree as &DynTree).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "Which gas do plants absorb?");
        assert_eq!(found[0].option_texts(), vec!["Oxygen", "Carbon dioxide"]);
    }

    #[test]
    fn test_wrapping_label_and_sibling_text() {
        let tree = DocTree::from_root(
            El::new("form")
                .child(El::new("p").text("How many legs does a spider have?"))
                .child(
                    El::new("div")
                        .child(
                            El::new("label")
                                .child(El::new("input").attr("type", "radio").attr("name", "legs"))
                                .text("A) Six"),
                        )
                        .child(El::new("input").attr("type", "radio").attr("name", "legs"))
                        .text("B) Eight"),
                ),
        );
        let found = RadioGroupStrategy.extract(&tree as &DynTree).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].option_texts(), vec!["Six", "Eight"]);
    }
}
