//! Deterministic model of the animation library's fade-toggle.
//!
//! Fades run on the page's virtual clock. Each element has at most one
//! active fade; further requests queue per element and start when the
//! predecessor completes, so rapid repeated clicks alternate direction the
//! way the library's fx queue does. Direction is decided when a request
//! starts: a visible element fades out, a hidden one fades in.

use std::collections::HashMap;

use crate::dom::{Dom, NodeId};
use crate::Result;

/// The animation library's default duration, which the original page
/// relied on implicitly.
pub(crate) const DEFAULT_FADE_DURATION_MS: i64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FadeDirection {
    In,
    Out,
}

#[derive(Debug, Clone)]
struct ActiveFade {
    node: NodeId,
    direction: FadeDirection,
    started_at: i64,
    order: i64,
}

/// A fade that reached its terminal state during `advance`, reported so the
/// page can trace it.
#[derive(Debug, Clone)]
pub(crate) struct FadeCompletion {
    pub(crate) node: NodeId,
    pub(crate) direction: FadeDirection,
    pub(crate) at_ms: i64,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct FadeScheduler {
    active: Vec<ActiveFade>,
    queued: HashMap<NodeId, usize>,
    next_order: i64,
    duration_ms: i64,
}

impl FadeScheduler {
    pub(crate) fn new() -> Self {
        Self {
            active: Vec::new(),
            queued: HashMap::new(),
            next_order: 0,
            duration_ms: DEFAULT_FADE_DURATION_MS,
        }
    }

    pub(crate) fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    pub(crate) fn set_duration_ms(&mut self, duration_ms: i64) {
        self.duration_ms = duration_ms;
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.active.is_empty() && self.queued.values().all(|count| *count == 0)
    }

    /// Active plus queued fades for the whole page.
    pub(crate) fn pending_count(&self) -> usize {
        self.active.len() + self.queued.values().sum::<usize>()
    }

    /// Earliest completion time among active fades, if any.
    pub(crate) fn next_finish_at(&self) -> Option<i64> {
        self.active
            .iter()
            .map(|fade| fade.started_at + self.duration_ms)
            .min()
    }

    /// Request a fade-toggle. Starts immediately if the element is idle,
    /// otherwise queues behind the element's in-flight fades.
    pub(crate) fn request_toggle(
        &mut self,
        dom: &mut Dom,
        node: NodeId,
        now_ms: i64,
    ) -> Result<Option<FadeDirection>> {
        if self.active.iter().any(|fade| fade.node == node) {
            *self.queued.entry(node).or_insert(0) += 1;
            return Ok(None);
        }
        let direction = self.start_fade(dom, node, now_ms)?;
        Ok(Some(direction))
    }

    fn start_fade(&mut self, dom: &mut Dom, node: NodeId, now_ms: i64) -> Result<FadeDirection> {
        let direction = if dom.is_displayed(node) {
            FadeDirection::Out
        } else {
            FadeDirection::In
        };

        if direction == FadeDirection::In {
            // Fading in un-hides at once; opacity carries the transition.
            dom.show(node)?;
            dom.set_style_decl(node, "opacity", "0")?;
        }

        let order = self.next_order;
        self.next_order += 1;
        self.active.push(ActiveFade {
            node,
            direction,
            started_at: now_ms,
            order,
        });
        Ok(direction)
    }

    /// Advance the virtual clock to `to_ms`, completing fades in
    /// deterministic (finish time, start order) order and updating the
    /// opacity of fades still in flight.
    pub(crate) fn advance(&mut self, dom: &mut Dom, to_ms: i64) -> Result<Vec<FadeCompletion>> {
        let mut completions = Vec::new();

        loop {
            let due = self
                .active
                .iter()
                .enumerate()
                .filter(|(_, fade)| fade.started_at + self.duration_ms <= to_ms)
                .min_by_key(|(_, fade)| (fade.started_at + self.duration_ms, fade.order))
                .map(|(index, _)| index);
            let Some(index) = due else {
                break;
            };

            let fade = self.active.remove(index);
            let finished_at = fade.started_at + self.duration_ms;
            complete_fade(dom, &fade)?;
            completions.push(FadeCompletion {
                node: fade.node,
                direction: fade.direction,
                at_ms: finished_at,
            });

            let start_next = match self.queued.get_mut(&fade.node) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    true
                }
                _ => false,
            };
            if start_next {
                self.start_fade(dom, fade.node, finished_at)?;
            }
        }

        for fade in &self.active {
            let elapsed = (to_ms - fade.started_at).max(0);
            let progress = elapsed as f64 / self.duration_ms as f64;
            let opacity = match fade.direction {
                FadeDirection::In => progress,
                FadeDirection::Out => 1.0 - progress,
            };
            dom.set_style_decl(fade.node, "opacity", &format_opacity(opacity))?;
        }

        Ok(completions)
    }
}

fn complete_fade(dom: &mut Dom, fade: &ActiveFade) -> Result<()> {
    dom.set_style_decl(fade.node, "opacity", "")?;
    if fade.direction == FadeDirection::Out {
        dom.hide(fade.node)?;
    }
    Ok(())
}

fn format_opacity(value: f64) -> String {
    let clamped = value.clamp(0.0, 1.0);
    let mut text = format!("{clamped:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}
