use std::collections::HashMap;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    /// Inline `display` value in effect before the last programmatic hide,
    /// restored by the next show. `Some("")` means "had no inline value".
    pub(crate) saved_display: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let element = Element {
            tag_name,
            attrs,
            saved_display: None,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            // First declaration wins, matching id lookup in document order.
            self.id_index.entry(id_attr).or_insert(id);
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(name).cloned())
    }

    pub(crate) fn has_class(&self, node_id: NodeId, class: &str) -> bool {
        self.attr(node_id, "class")
            .map(|value| value.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub(crate) fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Element node ids in document (pre-order) order.
    pub(crate) fn elements_in_document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements(self.root, &mut out);
        out
    }

    fn collect_elements(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if self.element(node_id).is_some() {
            out.push(node_id);
        }
        for child in self.nodes[node_id.0].children.clone() {
            self.collect_elements(child, out);
        }
    }

    pub(crate) fn style_decl(&self, node_id: NodeId, name: &str) -> Option<String> {
        let element = self.element(node_id)?;
        let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        decls
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, value)| value.clone())
    }

    pub(crate) fn set_style_decl(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;

        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(prop, _)| prop == name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name.to_string(), value.to_string()));
        }

        if decls.is_empty() {
            // Keep an empty style attribute to match CSSStyleDeclaration behavior.
            element.attrs.insert("style".to_string(), String::new());
        } else {
            element
                .attrs
                .insert("style".to_string(), serialize_style_declarations(&decls));
        }

        Ok(())
    }

    /// Visibility model of the generated pages: an element is hidden iff its
    /// inline style carries `display: none`.
    pub(crate) fn is_displayed(&self, node_id: NodeId) -> bool {
        self.style_decl(node_id, "display")
            .map(|value| value != "none")
            .unwrap_or(true)
    }

    pub(crate) fn hide(&mut self, node_id: NodeId) -> Result<()> {
        let prior = self.style_decl(node_id, "display").unwrap_or_default();
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("hide target is not an element".into()))?;
        element.saved_display = Some(prior);
        self.set_style_decl(node_id, "display", "none")
    }

    pub(crate) fn show(&mut self, node_id: NodeId) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("show target is not an element".into()))?;
        let restored = element.saved_display.take().unwrap_or_default();
        if restored == "none" {
            // A saved value of none would re-hide the element; fall back to
            // the stylesheet default instead.
            return self.set_style_decl(node_id, "display", "");
        }
        self.set_style_decl(node_id, "display", &restored)
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node_id, &mut out);
        out
    }

    fn collect_text(&self, node_id: NodeId, out: &mut String) {
        match &self.nodes[node_id.0].node_type {
            NodeType::Text(text) => out.push_str(text),
            _ => {
                for child in self.nodes[node_id.0].children.clone() {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Short single-element rendering for assertion messages.
    pub(crate) fn snippet(&self, node_id: NodeId) -> String {
        let Some(element) = self.element(node_id) else {
            return "<non-element>".to_string();
        };

        let mut out = String::new();
        out.push('<');
        out.push_str(&element.tag_name);
        let mut attrs: Vec<_> = element.attrs.iter().collect();
        attrs.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');

        let text = self.text_content(node_id);
        let text = text.split_ascii_whitespace().collect::<Vec<_>>().join(" ");
        const SNIPPET_TEXT_LIMIT: usize = 60;
        if text.len() > SNIPPET_TEXT_LIMIT {
            let cut = text
                .char_indices()
                .map(|(at, _)| at)
                .take_while(|at| *at <= SNIPPET_TEXT_LIMIT)
                .last()
                .unwrap_or(0);
            out.push_str(&text[..cut]);
            out.push('…');
        } else {
            out.push_str(&text);
        }
        out
    }
}

fn parse_style_declarations(style: Option<&str>) -> Vec<(String, String)> {
    let Some(style) = style else {
        return Vec::new();
    };

    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if prop.is_empty() || value.is_empty() {
                return None;
            }
            Some((prop, value))
        })
        .collect()
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(prop, value)| format!("{prop}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
