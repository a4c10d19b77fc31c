use crate::dom::{Dom, NodeId};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrCondition>,
}

impl SelectorStep {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && !self.universal
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
    }
}

/// A parsed selector: comma-separated alternatives, each a descendant chain
/// of compound steps. The page vocabulary needs nothing beyond tag, `*`,
/// `#id`, `.class`, `[attr]`, and `[attr=value]`; anything else is rejected
/// as unsupported rather than silently mismatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
    alternatives: Vec<Vec<SelectorStep>>,
}

impl Selector {
    pub(crate) fn parse(input: &str) -> Result<Self> {
        let mut alternatives = Vec::new();
        for alternative in input.split(',') {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                return Err(Error::UnsupportedSelector(input.to_string()));
            }

            let mut chain = Vec::new();
            for compound in alternative.split_ascii_whitespace() {
                chain.push(parse_compound(input, compound)?);
            }
            if chain.is_empty() {
                return Err(Error::UnsupportedSelector(input.to_string()));
            }
            alternatives.push(chain);
        }

        if alternatives.is_empty() {
            return Err(Error::UnsupportedSelector(input.to_string()));
        }

        Ok(Self { alternatives })
    }

    pub(crate) fn query_all(&self, dom: &Dom) -> Vec<NodeId> {
        dom.elements_in_document_order()
            .into_iter()
            .filter(|node| self.matches(dom, *node))
            .collect()
    }

    pub(crate) fn query_first(&self, dom: &Dom) -> Option<NodeId> {
        dom.elements_in_document_order()
            .into_iter()
            .find(|node| self.matches(dom, *node))
    }

    pub(crate) fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|chain| chain_matches(dom, node, chain))
    }
}

fn chain_matches(dom: &Dom, node: NodeId, chain: &[SelectorStep]) -> bool {
    let Some((subject, ancestors)) = chain.split_last() else {
        return false;
    };
    if !step_matches(dom, node, subject) {
        return false;
    }

    // Descendant combinators only: walk upward greedily, consuming the
    // remaining steps right to left.
    let mut remaining = ancestors;
    let mut cursor = dom.parent(node);
    while let Some(step) = remaining.last() {
        let Some(current) = cursor else {
            return false;
        };
        if dom.element(current).is_some() && step_matches(dom, current, step) {
            remaining = &remaining[..remaining.len() - 1];
        }
        cursor = dom.parent(current);
    }
    true
}

fn step_matches(dom: &Dom, node: NodeId, step: &SelectorStep) -> bool {
    if let Some(tag) = &step.tag {
        let matches_tag = dom
            .tag_name(node)
            .map(|name| name.eq_ignore_ascii_case(tag))
            .unwrap_or(false);
        if !matches_tag {
            return false;
        }
    }

    if let Some(id) = &step.id {
        if dom.attr(node, "id").as_deref() != Some(id.as_str()) {
            return false;
        }
    }

    for class in &step.classes {
        if !dom.has_class(node, class) {
            return false;
        }
    }

    for condition in &step.attrs {
        match condition {
            AttrCondition::Exists { key } => {
                if dom.attr(node, key).is_none() {
                    return false;
                }
            }
            AttrCondition::Eq { key, value } => {
                if dom.attr(node, key).as_deref() != Some(value.as_str()) {
                    return false;
                }
            }
        }
    }

    true
}

fn parse_compound(full: &str, compound: &str) -> Result<SelectorStep> {
    let mut step = SelectorStep::default();
    let chars: Vec<char> = compound.chars().collect();
    let mut i = 0usize;

    if i < chars.len() && chars[i] == '*' {
        step.universal = true;
        i += 1;
    } else if i < chars.len() && is_name_char(chars[i]) {
        let start = i;
        while i < chars.len() && is_name_char(chars[i]) {
            i += 1;
        }
        step.tag = Some(chars[start..i].iter().collect::<String>().to_ascii_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                let start = i;
                while i < chars.len() && is_name_char(chars[i]) {
                    i += 1;
                }
                if start == i {
                    return Err(Error::UnsupportedSelector(full.to_string()));
                }
                step.id = Some(chars[start..i].iter().collect());
            }
            '.' => {
                i += 1;
                let start = i;
                while i < chars.len() && is_name_char(chars[i]) {
                    i += 1;
                }
                if start == i {
                    return Err(Error::UnsupportedSelector(full.to_string()));
                }
                step.classes.push(chars[start..i].iter().collect());
            }
            '[' => {
                let close = chars[i..]
                    .iter()
                    .position(|c| *c == ']')
                    .map(|offset| i + offset)
                    .ok_or_else(|| Error::UnsupportedSelector(full.to_string()))?;
                let body: String = chars[i + 1..close].iter().collect();
                step.attrs.push(parse_attr_condition(full, &body)?);
                i = close + 1;
            }
            _ => return Err(Error::UnsupportedSelector(full.to_string())),
        }
    }

    if step.is_empty() {
        return Err(Error::UnsupportedSelector(full.to_string()));
    }
    Ok(step)
}

fn parse_attr_condition(full: &str, body: &str) -> Result<AttrCondition> {
    let body = body.trim();
    if body.is_empty() {
        return Err(Error::UnsupportedSelector(full.to_string()));
    }

    let Some((key, value)) = body.split_once('=') else {
        if !body.chars().all(is_name_char) {
            return Err(Error::UnsupportedSelector(full.to_string()));
        }
        return Ok(AttrCondition::Exists {
            key: body.to_ascii_lowercase(),
        });
    };

    let key = key.trim();
    if key.is_empty() || !key.chars().all(is_name_char) {
        return Err(Error::UnsupportedSelector(full.to_string()));
    }

    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            value
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })
        .unwrap_or(value);

    Ok(AttrCondition::Eq {
        key: key.to_ascii_lowercase(),
        value: value.to_string(),
    })
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
