//! 真实页面适配：HTML 字符串 → [`DocTree`]

use scraper::{ElementRef, Html};

use super::arena::DocTree;
use super::{DocumentTree, NodeId};

/// 不参与文本内容的元素
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// 把 HTML 文档解析成文档树快照
pub fn parse_html(html: &str) -> DocTree {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut tree = DocTree::new(root.value().name());
    let root_id = tree.root();
    for (name, value) in root.value().attrs() {
        tree.set_attr(root_id, name, value);
    }
    copy_children(&mut tree, root_id, root);

    tracing::debug!("HTML 转换完成，共 {} 个节点", tree.len());
    tree
}

fn copy_children(tree: &mut DocTree, parent: NodeId, element: ElementRef<'_>) {
    for child in element.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if SKIPPED_TAGS.contains(&name) {
                continue;
            }
            let attrs = child_el
                .value()
                .attrs()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect();
            let id = tree.push_element(parent, name, attrs);
            copy_children(tree, id, child_el);
        } else if let Some(text) = child.value().as_text() {
            // 纯空白文本也保留，行内元素之间的空格靠它
            let text: &str = text;
            tree.push_text(parent, text);
        }
    }
}
