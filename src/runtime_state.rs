use std::collections::HashMap;

use crate::dom::NodeId;
use crate::selector::Selector;
use crate::Result;

/// A handler payload. The page's behavior is small enough to express as
/// data rather than code, which keeps dispatch deterministic and clonable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub(crate) kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ActionKind {
    /// Fade-toggle every element the selector matches at dispatch time,
    /// each from its own current visibility state.
    FadeToggleMatching { selector: Selector },
    /// Read the named attribute off the event's current target and
    /// fade-toggle the element with that id. Resolution is an explicit id
    /// lookup, never selector-string concatenation, so attribute values
    /// containing selector metacharacters resolve literally. Missing
    /// attribute or unknown id is a silent no-op.
    FadeToggleLinked { attr: String },
}

impl Action {
    pub fn fade_toggle_matching(selector: &str) -> Result<Self> {
        Ok(Self {
            kind: ActionKind::FadeToggleMatching {
                selector: Selector::parse(selector)?,
            },
        })
    }

    pub fn fade_toggle_linked(attr: &str) -> Self {
        Self {
            kind: ActionKind::FadeToggleLinked {
                attr: attr.to_ascii_lowercase(),
            },
        }
    }
}

/// One setup instruction: at ready time, every element the selector matches
/// gets its own listener for the event type. Zero matches is silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub(crate) selector: Selector,
    pub(crate) event_type: String,
    pub(crate) action: Action,
}

impl Binding {
    pub fn new(selector: &str, event_type: &str, action: Action) -> Result<Self> {
        Ok(Self {
            selector: Selector::parse(selector)?,
            event_type: event_type.to_string(),
            action,
        })
    }

    pub fn click(selector: &str, action: Action) -> Result<Self> {
        Self::new(selector, "click", action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) action: Action,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: String, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default()
            .push(listener);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.map
            .values()
            .flat_map(|events| events.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
}

/// The document-ready gate. Setup queued before the ready condition fires
/// is held back; the condition fires at most once.
#[derive(Debug, Default, Clone)]
pub(crate) struct ReadyState {
    pub(crate) fired: bool,
    pub(crate) pending: Vec<Binding>,
}
