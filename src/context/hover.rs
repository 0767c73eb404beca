//! The hover chain and delayed tooltips.
//!
//! Each owner with a tooltip has a binding holding the tooltip node and the
//! tokens of its pending show/hide timers. A timer that fires only acts when
//! its token still matches the binding, so cancelled or superseded timers are
//! inert even if they were already due.

use super::{NodeId, UiContext};
use crate::components::{Tooltip, Widget};
use crate::error::Result;
use crate::event::UiEvent;
use crate::geometry::{Point, Rect};
use crate::timer::TimerToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerAction {
    ShowTooltip { owner: NodeId },
    HideTooltip { owner: NodeId },
}

impl TimerAction {
    fn owner(self) -> NodeId {
        match self {
            TimerAction::ShowTooltip { owner } | TimerAction::HideTooltip { owner } => owner,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TooltipBinding {
    tooltip: NodeId,
    show: Option<TimerToken>,
    hide: Option<TimerToken>,
}

impl UiContext {
    /// Give `owner` a tooltip, or change the text of the one it has.
    pub fn set_tooltip(&mut self, owner: NodeId, text: impl Into<String>) -> Result<NodeId> {
        self.node_ref(owner)?;
        if let Some(binding) = self.tooltips.get(owner) {
            let tip = binding.tooltip;
            self.widget_mut(tip, "tooltip", Widget::as_tooltip_mut)?
                .set_text(text);
            self.run_update(tip);
            return Ok(tip);
        }
        let padding = self.config.tooltip_padding;
        let size = self.config.tooltip_size;
        let tip = self.insert(Widget::Tooltip(Tooltip::new(text, padding)), size);
        self.run_update(tip);
        self.tooltips.insert(
            owner,
            TooltipBinding {
                tooltip: tip,
                show: None,
                hide: None,
            },
        );
        Ok(tip)
    }

    /// Remove and dispose `owner`'s tooltip. Returns `false` if it had none.
    pub fn clear_tooltip(&mut self, owner: NodeId) -> bool {
        let Some(binding) = self.tooltips.remove(owner) else {
            return false;
        };
        self.cancel_binding_timers(&binding);
        self.dispose(binding.tooltip);
        true
    }

    pub fn tooltip_of(&self, owner: NodeId) -> Option<NodeId> {
        self.tooltips.get(owner).map(|b| b.tooltip)
    }

    /// The tooltip currently attached, if any. There is never more than one.
    pub fn shown_tooltip(&self) -> Option<NodeId> {
        self.shown_tooltip
    }

    pub fn is_hovered(&self, id: NodeId) -> bool {
        self.hovered.contains(&id)
    }

    /// Hovered nodes, innermost first.
    pub fn hovered(&self) -> &[NodeId] {
        &self.hovered
    }

    /// Recompute the hover chain for a pointer at `pointer` and raise hover
    /// notifications for the nodes that left or entered it.
    pub(crate) fn update_hover(&mut self, pointer: Point) {
        self.pointer = Some(pointer);
        let mut chain = Vec::new();
        let mut cursor = self.hit_test(pointer);
        while let Some(id) = cursor {
            if id == self.root {
                break;
            }
            chain.push(id);
            cursor = self.parent(id);
        }
        let left: Vec<NodeId> = self
            .hovered
            .iter()
            .copied()
            .filter(|id| !chain.contains(id))
            .collect();
        let entered: Vec<NodeId> = chain
            .iter()
            .copied()
            .filter(|id| !self.hovered.contains(id))
            .collect();
        self.hovered = chain;
        for id in left {
            self.hover_out(id);
        }
        for id in entered.into_iter().rev() {
            self.hover_in(id);
        }
        self.track_shown_tooltip();
    }

    /// Tooltips are invisible to hit testing, so the pointer resting on a
    /// shown tooltip is checked against its bounds. Once the pointer is off
    /// both the owner and the tooltip, the hide delay starts.
    fn track_shown_tooltip(&mut self) {
        let Some(tip) = self.shown_tooltip else {
            return;
        };
        let Some(owner) = self.owner_of_tooltip(tip) else {
            return;
        };
        let armed = self.tooltips.get(owner).is_some_and(|b| b.hide.is_some());
        if !armed && !self.is_hovered(owner) && !self.pointer_over(tip) {
            self.arm_hide(owner);
        }
    }

    fn pointer_over(&self, id: NodeId) -> bool {
        match (self.pointer, self.global_bounds(id)) {
            (Some(p), Some(b)) => b.contains(p),
            _ => false,
        }
    }

    fn hover_in(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if let Ok(bar) = self.widget_mut(id, "scrollbar", Widget::as_scrollbar_mut) {
            bar.set_hovered(true);
        }
        self.emit(id, UiEvent::HoverIn);

        let shown = self.shown_tooltip;
        let delay = self.config.tooltip_delay;
        let Some(binding) = self.tooltips.get_mut(id) else {
            return;
        };
        if let Some(token) = binding.hide.take() {
            self.timers.cancel(token);
        }
        if shown != Some(binding.tooltip) && binding.show.is_none() {
            binding.show = Some(
                self.timers
                    .after(delay, TimerAction::ShowTooltip { owner: id }),
            );
        }
    }

    fn hover_out(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if let Ok(bar) = self.widget_mut(id, "scrollbar", Widget::as_scrollbar_mut) {
            bar.set_hovered(false);
        }
        self.emit(id, UiEvent::HoverOut);

        if let Some(binding) = self.tooltips.get_mut(id)
            && let Some(token) = binding.show.take()
        {
            self.timers.cancel(token);
        }
        if self.tooltips.contains_key(id) && !self.pointer_over_tooltip_of(id) {
            self.arm_hide(id);
        }
    }

    fn pointer_over_tooltip_of(&self, owner: NodeId) -> bool {
        self.tooltip_of(owner)
            .is_some_and(|tip| self.shown_tooltip == Some(tip) && self.pointer_over(tip))
    }

    fn arm_hide(&mut self, owner: NodeId) {
        let shown = self.shown_tooltip;
        let delay = self.config.tooltip_delay;
        let Some(binding) = self.tooltips.get_mut(owner) else {
            return;
        };
        if shown != Some(binding.tooltip) {
            return;
        }
        if let Some(token) = binding.hide.take() {
            self.timers.cancel(token);
        }
        binding.hide = Some(
            self.timers
                .after(delay, TimerAction::HideTooltip { owner }),
        );
    }

    pub(crate) fn fire_timer(&mut self, token: TimerToken, action: TimerAction) {
        let owner = action.owner();
        let Some(binding) = self.tooltips.get_mut(owner) else {
            return;
        };
        let tip = binding.tooltip;
        match action {
            TimerAction::ShowTooltip { .. } => {
                if binding.show != Some(token) {
                    return;
                }
                binding.show = None;
                if self.is_hovered(owner) {
                    self.show_tooltip(owner, tip);
                }
            }
            TimerAction::HideTooltip { .. } => {
                if binding.hide != Some(token) {
                    return;
                }
                binding.hide = None;
                if self.is_hovered(owner) || self.pointer_over(tip) {
                    return;
                }
                if self.shown_tooltip == Some(tip) {
                    self.detach(tip);
                }
            }
        }
    }

    fn show_tooltip(&mut self, owner: NodeId, tip: NodeId) {
        let Some(pointer) = self.pointer else {
            return;
        };
        let Some(size) = self.bounds(tip).map(|b| b.size()) else {
            return;
        };
        let rect = Rect::from_parts(pointer, size).clamp_within(self.stage_bounds());
        let root = self.root;
        if self.attach(root, tip).is_err() {
            return;
        }
        let _ = self.set_position(tip, rect.x, rect.y);
        tracing::debug!(tooltip = ?tip, owner = ?owner, "tooltip shown");
    }

    /// Pointer-down: every hovered owner drops its pending show and its
    /// tooltip goes away immediately.
    pub(crate) fn dismiss_tooltips(&mut self) {
        for id in self.hovered.clone() {
            let Some(binding) = self.tooltips.get_mut(id) else {
                continue;
            };
            let tip = binding.tooltip;
            if let Some(token) = binding.show.take() {
                self.timers.cancel(token);
            }
            if let Some(token) = binding.hide.take() {
                self.timers.cancel(token);
            }
            if self.shown_tooltip == Some(tip) {
                self.detach(tip);
            }
        }
    }

    /// Detach whichever tooltip is shown unless it is `incoming`.
    pub(crate) fn evict_tooltip(&mut self, incoming: NodeId) {
        if let Some(old) = self.shown_tooltip
            && old != incoming
        {
            self.detach(old);
        }
    }

    /// Drop bindings that involve `id`, as owner or as tooltip.
    pub(crate) fn forget_tooltips(&mut self, id: NodeId) {
        if self.tooltips.contains_key(id) {
            self.clear_tooltip(id);
        }
        if let Some(owner) = self.owner_of_tooltip(id)
            && let Some(binding) = self.tooltips.remove(owner)
        {
            self.cancel_binding_timers(&binding);
        }
        self.timers.cancel_where(|a| a.owner() == id);
    }

    fn owner_of_tooltip(&self, tip: NodeId) -> Option<NodeId> {
        self.tooltips
            .iter()
            .find(|(_, b)| b.tooltip == tip)
            .map(|(owner, _)| owner)
    }

    fn cancel_binding_timers(&mut self, binding: &TooltipBinding) {
        for token in [binding.show, binding.hide].into_iter().flatten() {
            self.timers.cancel(token);
        }
    }
}
