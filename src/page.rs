use crate::dom::{Dom, NodeId};
use crate::effects::{FadeCompletion, FadeDirection, FadeScheduler};
use crate::html::parse_html;
use crate::runtime_state::{ActionKind, Binding, EventState, Listener, ListenerStore, ReadyState};
use crate::selector::Selector;
use crate::{Action, Error, Result};

const DEFAULT_TRACE_LOG_LIMIT: usize = 10_000;
const SETTLE_STEP_LIMIT: usize = 10_000;

/// A loaded documentation page: the DOM, its listeners, the ready gate, and
/// the fade scheduler, all on one deterministic virtual clock.
#[derive(Debug, Clone)]
pub struct Page {
    dom: Dom,
    listeners: ListenerStore,
    ready: ReadyState,
    effects: FadeScheduler,
    now_ms: i64,
    trace: bool,
    trace_logs: Vec<String>,
    trace_log_limit: usize,
    trace_to_stderr: bool,
}

impl Page {
    /// Parse markup into a page in the not-ready state: no listeners are
    /// active until [`Page::document_ready`] fires.
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self {
            dom: parse_html(html)?,
            listeners: ListenerStore::default(),
            ready: ReadyState::default(),
            effects: FadeScheduler::new(),
            now_ms: 0,
            trace: false,
            trace_logs: Vec::new(),
            trace_log_limit: DEFAULT_TRACE_LOG_LIMIT,
            trace_to_stderr: true,
        })
    }

    /// Register setup to run once the document is ready. If the ready
    /// condition already fired, the bindings apply immediately.
    pub fn on_ready(&mut self, bindings: Vec<Binding>) -> Result<()> {
        if self.ready.fired {
            for binding in bindings {
                self.apply_binding(&binding);
            }
            return Ok(());
        }
        self.ready.pending.extend(bindings);
        Ok(())
    }

    /// Fire the ready condition. Fires at most once; a second call is a
    /// silent no-op.
    pub fn document_ready(&mut self) -> Result<()> {
        if self.ready.fired {
            return Ok(());
        }
        self.ready.fired = true;
        let pending = std::mem::take(&mut self.ready.pending);
        for binding in &pending {
            self.apply_binding(binding);
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready.fired
    }

    fn apply_binding(&mut self, binding: &Binding) {
        let targets = binding.selector.query_all(&self.dom);
        for target in &targets {
            self.listeners.add(
                *target,
                binding.event_type.clone(),
                Listener {
                    action: binding.action.clone(),
                },
            );
        }
        let count = targets.len();
        let event = &binding.event_type;
        self.trace_line(format!("[ready] bound {count} {event} listener(s)"));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.listener_count()
    }

    /// Click the first element the selector matches. The target not
    /// existing is a driver error; handlers themselves never error on
    /// missing page structure.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || {
            let target = self.select_one(selector)?;
            self.dispatch_event(target, "click")
        })
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || {
            let target = self.select_one(selector)?;
            self.dispatch_event(target, event)
        })
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        Selector::parse(selector)?
            .query_first(&self.dom)
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<()> {
        let label = self.node_label(target);
        self.trace_line(format!("[event] {event_type} target={label}"));

        // Bubble: target first, then each ancestor element.
        let mut path = vec![target];
        let mut cursor = self.dom.parent(target);
        while let Some(node) = cursor {
            if self.dom.element(node).is_some() {
                path.push(node);
            }
            cursor = self.dom.parent(node);
        }

        for current in path {
            let listeners = self.listeners.get(current, event_type);
            if listeners.is_empty() {
                continue;
            }
            let event = EventState {
                event_type: event_type.to_string(),
                target,
                current_target: current,
            };
            for listener in listeners {
                self.run_action(&event, &listener.action)?;
            }
        }
        Ok(())
    }

    fn run_action(&mut self, event: &EventState, action: &Action) -> Result<()> {
        match &action.kind {
            ActionKind::FadeToggleMatching { selector } => {
                for node in selector.query_all(&self.dom) {
                    self.fade_toggle_node(node)?;
                }
            }
            ActionKind::FadeToggleLinked { attr } => {
                let Some(value) = self.dom.attr(event.current_target, attr) else {
                    return Ok(());
                };
                if value.is_empty() {
                    return Ok(());
                }
                // Explicit id lookup; the attribute value is an identifier,
                // not selector syntax.
                match self.dom.element_by_id(&value) {
                    Some(node) => self.fade_toggle_node(node)?,
                    None => {
                        let target = self.node_label(event.target);
                        let event_type = &event.event_type;
                        self.trace_line(format!(
                            "[fade] no element with id={value} for {event_type} on {target}"
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn fade_toggle_node(&mut self, node: NodeId) -> Result<()> {
        let started = self
            .effects
            .request_toggle(&mut self.dom, node, self.now_ms)?;
        let label = self.node_label(node);
        match started {
            Some(FadeDirection::In) => self.trace_line(format!("[fade] in {label}")),
            Some(FadeDirection::Out) => self.trace_line(format!("[fade] out {label}")),
            None => self.trace_line(format!("[fade] queued toggle {label}")),
        }
        Ok(())
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Advance the virtual clock, running fades that complete in the window.
    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let to_ms = self.now_ms + delta_ms;
        let completions = self.effects.advance(&mut self.dom, to_ms)?;
        for completion in completions {
            self.trace_completion(&completion);
        }
        self.now_ms = to_ms;
        Ok(())
    }

    /// Run every pending fade (including queued ones) to completion.
    pub fn settle(&mut self) -> Result<()> {
        let mut steps = 0usize;
        while let Some(due) = self.effects.next_finish_at() {
            steps += 1;
            if steps > SETTLE_STEP_LIMIT {
                return Err(Error::Runtime(
                    "settle exceeded the pending-animation step limit".into(),
                ));
            }
            self.advance_time((due - self.now_ms).max(0))?;
        }
        Ok(())
    }

    /// Active plus queued fades across the page.
    pub fn pending_fades(&self) -> usize {
        self.effects.pending_count()
    }

    pub fn fade_duration_ms(&self) -> i64 {
        self.effects.duration_ms()
    }

    pub fn set_fade_duration(&mut self, duration_ms: i64) -> Result<()> {
        if duration_ms < 1 {
            return Err(Error::Runtime(
                "set_fade_duration requires at least 1 millisecond".into(),
            ));
        }
        self.effects.set_duration_ms(duration_ms);
        Ok(())
    }

    pub fn is_visible(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.is_displayed(target))
    }

    /// Effective opacity; elements without an opacity declaration are fully
    /// opaque.
    pub fn opacity(&self, selector: &str) -> Result<f64> {
        let target = self.select_one(selector)?;
        let value = match self.dom.style_decl(target, "opacity") {
            Some(value) => value
                .parse::<f64>()
                .map_err(|_| Error::Runtime(format!("unparseable opacity value: {value}")))?,
            None => 1.0,
        };
        Ok(value)
    }

    pub fn assert_visible(&self, selector: &str) -> Result<()> {
        self.assert_visibility(selector, true)
    }

    pub fn assert_hidden(&self, selector: &str) -> Result<()> {
        self.assert_visibility(selector, false)
    }

    fn assert_visibility(&self, selector: &str, expected_visible: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual_visible = self.dom.is_displayed(target);
        if actual_visible == expected_visible {
            return Ok(());
        }
        let describe = |visible: bool| if visible { "visible" } else { "hidden" };
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: describe(expected_visible).to_string(),
            actual: describe(actual_visible).to_string(),
            dom_snippet: self.dom.snippet(target),
        })
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector).map(|_| ())
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_logs)
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_to_stderr = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_log_limit = max_entries;
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
        Ok(())
    }

    fn trace_completion(&mut self, completion: &FadeCompletion) {
        let label = self.node_label(completion.node);
        let at = completion.at_ms;
        let line = match completion.direction {
            FadeDirection::In => format!("[fade] in done {label} at={at}"),
            FadeDirection::Out => format!("[fade] out done {label} at={at}"),
        };
        self.trace_line(line);
    }

    fn node_label(&self, node: NodeId) -> String {
        let tag = self.dom.tag_name(node).unwrap_or("?").to_string();
        if let Some(id) = self.dom.attr(node, "id") {
            return format!("{tag}#{id}");
        }
        if let Some(class) = self.dom.attr(node, "class") {
            if let Some(first) = class.split_ascii_whitespace().next() {
                return format!("{tag}.{first}");
            }
        }
        tag
    }

    fn trace_line(&mut self, line: String) {
        if !self.trace {
            return;
        }
        if self.trace_to_stderr {
            eprintln!("{line}");
        }
        self.trace_logs.push(line);
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
    }
}
