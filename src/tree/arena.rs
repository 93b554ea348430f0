//! 基于数组的文档树实现
//!
//! 真实页面由 [`super::html::parse_html`] 转换而来，测试里用 [`El`] 直接搭建。

use super::{DocumentTree, NodeId};

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// 文档树快照
#[derive(Debug, Clone)]
pub struct DocTree {
    nodes: Vec<Node>,
}

impl DocTree {
    /// 创建只有根元素的树
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element {
                    tag: root_tag.to_lowercase(),
                    attrs: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// 由构造器生成整棵树
    pub fn from_root(root: El) -> Self {
        let mut tree = Self::new(&root.tag);
        let root_id = tree.root();
        for (name, value) in root.attrs {
            tree.set_attr(root_id, &name, &value);
        }
        for child in root.children {
            tree.append(root_id, child);
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_element(&mut self, parent: NodeId, tag: &str, attrs: Vec<(String, String)>) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                tag: tag.to_lowercase(),
                attrs,
            },
        )
    }

    pub fn push_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[node.index()].kind {
            match attrs.iter_mut().find(|(n, _)| n == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    fn append(&mut self, parent: NodeId, child: Child) {
        match child {
            Child::Text(text) => {
                self.push_text(parent, &text);
            }
            Child::Element(el) => {
                let id = self.push_element(parent, &el.tag, el.attrs);
                for grandchild in el.children {
                    self.append(id, grandchild);
                }
            }
        }
    }
}

impl DocumentTree for DocTree {
    fn root(&self) -> NodeId {
        NodeId::from_index(0)
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.index())?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(node.index())?.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index())?.parent
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.index())?.kind {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Element { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Child {
    Element(El),
    Text(String),
}

/// 元素构造器
///
/// ```
/// use mcq_detect::tree::{DocTree, El};
///
/// let tree = DocTree::from_root(
///     El::new("ul").child(El::new("li").text("A. Paris")),
/// );
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct El {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn class(self, value: &str) -> Self {
        self.attr("class", value)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(Child::Text(text.to_string()));
        self
    }

    pub fn child(mut self, child: El) -> Self {
        self.children.push(Child::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = El>) -> Self {
        self.children
            .extend(children.into_iter().map(Child::Element));
        self
    }
}
