use crate::extract::locate::locate_question;
use crate::extract::Strategy;
use crate::models::{AnswerOption, Mcq, SourceStrategy, MAX_OPTIONS, MIN_OPTIONS};
use crate::text::looks_like_option;
use crate::tree::{DocumentTree, DynTree, NodeId};

/// 列表策略
///
/// 只接受至少有一项带选项标记的列表，普通的项目符号列表会被排除。
pub struct ListStrategy;

fn is_list(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.is_tag(node, "ul") || tree.is_tag(node, "ol") || tree.attr_is(node, "role", "list")
}

fn is_item(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.is_tag(node, "li") || tree.attr_is(node, "role", "listitem")
}

impl Strategy<DynTree> for ListStrategy {
    fn name(&self) -> &str {
        "list"
    }

    fn extract(&self, tree: &DynTree) -> anyhow::Result<Vec<Mcq>> {
        let mut found = Vec::new();

        for list in tree.find_all(&|n| is_list(tree, n)) {
            let items: Vec<NodeId> = tree
                .element_children(list)
                .into_iter()
                .filter(|&c| is_item(tree, c))
                .collect();
            if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&items.len()) {
                continue;
            }

            let texts: Vec<String> = items.iter().map(|&i| tree.text_content(i)).collect();
            if !texts.iter().any(|t| looks_like_option(t)) {
                continue;
            }

            let Some((question_node, question)) = locate_question(tree, &[list]) else {
                continue;
            };

            let options = items
                .iter()
                .zip(&texts)
                .map(|(&item, text)| AnswerOption::from_raw(text, Some(item)))
                .collect();

            if let Some(mcq) =
                Mcq::candidate(&question, Some(question_node), options, SourceStrategy::List, None)
            {
                found.push(mcq);
            }
        }

        Ok(found)
    }
}
