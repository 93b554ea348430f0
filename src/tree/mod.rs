//! 文档树抽象
//!
//! 抽取器只依赖 [`DocumentTree`]，不关心树来自真实页面还是测试构造。

pub mod arena;
pub mod html;

pub use arena::{DocTree, El};
pub use html::parse_html;

use phf::phf_set;
use serde::{Deserialize, Serialize};

use crate::text::normalize_whitespace;

/// 拼接文本时不补空格的行内元素
static INLINE_TAGS: phf::Set<&'static str> = phf_set! {
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "font", "i", "kbd",
    "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
};

enum TextStep {
    Visit(NodeId),
    Gap,
}

/// 抽取策略使用的树对象类型
pub type DynTree = dyn DocumentTree;

/// 节点句柄（不持有节点，只是回指）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// 带标签的通用文档树
pub trait DocumentTree {
    fn root(&self) -> NodeId;

    /// 元素标签名（小写）；文本节点返回 None
    fn tag(&self, node: NodeId) -> Option<&str>;

    fn attr(&self, node: NodeId, name: &str) -> Option<&str>;

    /// 全部子节点（包括文本节点），按文档顺序
    fn children(&self, node: NodeId) -> &[NodeId];

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// 文本节点的内容；元素返回 None
    fn text(&self, node: NodeId) -> Option<&str>;

    fn is_element(&self, node: NodeId) -> bool {
        self.tag(node).is_some()
    }

    fn is_tag(&self, node: NodeId, tag: &str) -> bool {
        self.tag(node) == Some(tag)
    }

    fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// 先序遍历的后代元素（不含自身）
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.element_children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.element_children(current).into_iter().rev());
        }
        out
    }

    /// 从根开始先序查找所有满足条件的元素
    fn find_all(&self, pred: &dyn Fn(NodeId) -> bool) -> Vec<NodeId> {
        let root = self.root();
        let mut out = Vec::new();
        if self.is_element(root) && pred(root) {
            out.push(root);
        }
        out.extend(self.descendants(root).into_iter().filter(|&n| pred(n)));
        out
    }

    /// 自身或最近的满足条件的祖先
    fn closest(&self, node: NodeId, pred: &dyn Fn(NodeId) -> bool) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.is_element(n) && pred(n) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// 前面的兄弟元素，离自身最近的在前
    fn preceding_siblings(&self, node: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(node) else {
            return Vec::new();
        };
        let siblings = self.element_children(parent);
        match siblings.iter().position(|&s| s == node) {
            Some(pos) => siblings[..pos].iter().rev().copied().collect(),
            None => Vec::new(),
        }
    }

    fn following_siblings(&self, node: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(node) else {
            return Vec::new();
        };
        let siblings = self.element_children(parent);
        match siblings.iter().position(|&s| s == node) {
            Some(pos) => siblings[pos + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    fn class_list(&self, node: NodeId) -> Vec<String> {
        self.attr(node, "class")
            .map(|c| c.split_whitespace().map(|s| s.to_lowercase()).collect())
            .unwrap_or_default()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_list(node).iter().any(|c| c == class)
    }

    /// class 属性（小写）中任意位置包含 needle
    fn class_contains(&self, node: NodeId, needle: &str) -> bool {
        self.attr(node, "class")
            .map(|c| c.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    fn attr_is(&self, node: NodeId, name: &str, value: &str) -> bool {
        self.attr(node, name)
            .map(|v| v.eq_ignore_ascii_case(value))
            .unwrap_or(false)
    }

    /// 节点内全部文本后规整空白
    ///
    /// 文本片段按原样拼接（`H<sub>2</sub>O` → `H2O`），只在非行内元素的边界补一个空格。
    fn text_content(&self, node: NodeId) -> String {
        self.text_content_excluding(node, &|_| false)
    }

    /// 同 `text_content`，但跳过满足 `skip` 的子树（自身除外）
    fn text_content_excluding(&self, node: NodeId, skip: &dyn Fn(NodeId) -> bool) -> String {
        if let Some(text) = self.text(node) {
            return normalize_whitespace(text);
        }

        let mut out = String::new();
        let mut stack: Vec<TextStep> = self.children(node).iter().rev().map(|&c| TextStep::Visit(c)).collect();
        while let Some(step) = stack.pop() {
            let current = match step {
                TextStep::Gap => {
                    out.push(' ');
                    continue;
                }
                TextStep::Visit(current) => current,
            };
            if let Some(text) = self.text(current) {
                out.push_str(text);
                continue;
            }
            let inline = self.tag(current).is_some_and(|t| INLINE_TAGS.contains(t));
            if !inline {
                out.push(' ');
            }
            if skip(current) {
                continue;
            }
            if !inline {
                stack.push(TextStep::Gap);
            }
            stack.extend(self.children(current).iter().rev().map(|&c| TextStep::Visit(c)));
        }
        normalize_whitespace(&out)
    }
}
