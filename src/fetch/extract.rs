//! HTML 可见文本提取

use scraper::{Html, Node, Selector};

use crate::error::FetchError;

/// 不可见内容所在的元素，整棵子树跳过
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// 提取第一个匹配 `selector` 的元素的可见文本
///
/// 没有元素匹配时回退到整个文档。每个文本节点去除首尾空白，
/// 丢弃空节点后用 `\n` 连接。
pub fn extract_text(html: &str, selector: &str) -> Result<String, FetchError> {
    let selector =
        Selector::parse(selector).map_err(|_| FetchError::Selector(selector.to_string()))?;
    let document = Html::parse_document(html);

    let mut segments = Vec::new();
    match document.select(&selector).next() {
        Some(element) => collect_text(*element, &mut segments),
        None => collect_text(document.tree.root(), &mut segments),
    }

    Ok(segments.join("\n"))
}

fn collect_text(node: ego_tree::NodeRef<'_, Node>, out: &mut Vec<String>) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed.to_string());
                }
            }
            Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => collect_text(child, out),
            _ => {}
        }
    }
}
