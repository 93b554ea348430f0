//! 结构化来源的题干定位
//!
//! 顺序：语义容器内的标题 → 锚点内部、控件之前最近的子元素 → 锚点前面最多 5 个兄弟。
//! 同一个表单里的多组控件各自先找组内的题干，不会都落到表单前的说明文字上。

use crate::text::looks_like_question;
use crate::tree::{DocumentTree, NodeId};

/// 向前扫描兄弟节点的上限
pub const SIBLING_SCAN_LIMIT: usize = 5;

/// fieldset 或 group / radiogroup 角色
pub fn is_semantic_container(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.is_tag(node, "fieldset")
        || tree.attr_is(node, "role", "radiogroup")
        || tree.attr_is(node, "role", "group")
}

/// legend、h1-h6 或 heading 角色
pub fn is_heading(tree: &dyn DocumentTree, node: NodeId) -> bool {
    match tree.tag(node) {
        Some("legend" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6") => true,
        Some(_) => tree.attr_is(node, "role", "heading"),
        None => false,
    }
}

/// 容器内第一个有文本的标题
pub fn heading_within(tree: &dyn DocumentTree, container: NodeId) -> Option<(NodeId, String)> {
    tree.descendants(container)
        .into_iter()
        .filter(|&n| is_heading(tree, n))
        .map(|n| (n, tree.text_content(n)))
        .find(|(_, text)| !text.is_empty())
}

/// 锚点前面最近的、看起来像题干的兄弟节点
pub fn scan_preceding(tree: &dyn DocumentTree, anchor: NodeId) -> Option<(NodeId, String)> {
    tree.preceding_siblings(anchor)
        .into_iter()
        .take(SIBLING_SCAN_LIMIT)
        .map(|n| (n, tree.text_content(n)))
        .find(|(_, text)| looks_like_question(text))
}

/// 所有节点的最近公共祖先（单个节点时为其自身）
pub fn common_ancestor(tree: &dyn DocumentTree, nodes: &[NodeId]) -> Option<NodeId> {
    let (&first, rest) = nodes.split_first()?;
    let mut candidate = Some(first);
    while let Some(c) = candidate {
        if rest.iter().all(|&n| n == c || tree.is_ancestor_of(c, n)) {
            return Some(c);
        }
        candidate = tree.parent(c);
    }
    None
}

/// 锚点内部、位于第一个控件之前且不包含控件的子元素，离控件最近的优先
fn leading_child_question(
    tree: &dyn DocumentTree,
    anchor: NodeId,
    controls: &[NodeId],
) -> Option<(NodeId, String)> {
    let contains_control =
        |n: NodeId| controls.iter().any(|&c| c == n || tree.is_ancestor_of(n, c));

    let children = tree.element_children(anchor);
    let first_with_control = children
        .iter()
        .position(|&c| contains_control(c))
        .unwrap_or(children.len());

    children[..first_with_control]
        .iter()
        .rev()
        .map(|&n| (n, tree.text_content(n)))
        .find(|(_, text)| looks_like_question(text))
}

/// 为一组控件（或一个列表）定位题干
pub fn locate_question(tree: &dyn DocumentTree, controls: &[NodeId]) -> Option<(NodeId, String)> {
    let first = *controls.first()?;
    let container = tree.closest(first, &|n| is_semantic_container(tree, n));

    if let Some(container) = container {
        if let Some(found) = heading_within(tree, container) {
            return Some(found);
        }
    }

    let anchor = container.or_else(|| common_ancestor(tree, controls))?;

    // 锚点本身就是控件（例如列表）时，它的子元素是选项而不是题干
    if !controls.contains(&anchor) {
        if let Some(found) = leading_child_question(tree, anchor, controls) {
            return Some(found);
        }
    }
    scan_preceding(tree, anchor)
}
