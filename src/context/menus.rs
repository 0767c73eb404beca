//! Popup menus.
//!
//! A menu is a root-level node shown at a stage point. Hovering a submenu row
//! opens the submenu beside it, so at most one chain of menus is open at a
//! time: the menu passed to [`UiContext::show_menu`] and the submenus hanging
//! off it. While the chain is open it takes every key, and any press outside
//! it closes the whole chain before the press is handled as usual.

use crossterm::event::{KeyCode, KeyEvent};

use super::{NodeId, UiContext};
use crate::components::{Menu, MenuEntry, Widget};
use crate::error::{Result, UiError};
use crate::event::UiEvent;
use crate::geometry::{Point, Size};

impl UiContext {
    /// An empty, detached menu.
    pub fn create_menu(&mut self) -> NodeId {
        let menu = Menu::new(
            self.config.menu_item_height,
            self.config.menu_separator_height,
        );
        let width = self.config.menu_width;
        self.insert(Widget::Menu(menu), Size::new(width, 0.0))
    }

    /// Add a row that raises `MenuSelect` with `key` when chosen.
    pub fn add_menu_item(
        &mut self,
        menu: NodeId,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<()> {
        self.widget_mut(menu, "menu", Widget::as_menu_mut)?
            .push(MenuEntry::Item {
                key: key.into(),
                label: label.into(),
            });
        self.fit_menu(menu)
    }

    /// Add a row that opens `submenu`. Fails when `submenu` would end up
    /// opening `menu` again.
    pub fn add_submenu(
        &mut self,
        menu: NodeId,
        label: impl Into<String>,
        submenu: NodeId,
    ) -> Result<()> {
        if self.node_ref(submenu)?.widget.as_menu().is_none() {
            return Err(UiError::WrongKind { expected: "menu" });
        }
        if submenu == menu || self.menu_reaches(submenu, menu) {
            return Err(UiError::StateConflict("menu can't open itself"));
        }
        self.widget_mut(menu, "menu", Widget::as_menu_mut)?
            .push(MenuEntry::Submenu {
                label: label.into(),
                menu: submenu,
            });
        self.fit_menu(menu)
    }

    pub fn add_menu_separator(&mut self, menu: NodeId) -> Result<()> {
        self.widget_mut(menu, "menu", Widget::as_menu_mut)?
            .push(MenuEntry::Separator);
        self.fit_menu(menu)
    }

    /// Open `menu` just below `at`, closing any chain already open.
    ///
    /// A menu that would run off the right edge is pulled back inside the
    /// stage; one that would run off the bottom opens above `at` instead.
    pub fn show_menu(&mut self, menu: NodeId, at: Point) -> Result<()> {
        if self.node_ref(menu)?.widget.as_menu().is_none() {
            return Err(UiError::WrongKind { expected: "menu" });
        }
        self.close_menus();
        let root = self.root;
        let stage = self.node_ref(root)?.bounds.size();
        let size = self.node_ref(menu)?.bounds.size();
        let mut x = at.x;
        let mut y = at.y + 1.0;
        if x + size.width > stage.width {
            x = stage.width - size.width;
        }
        if y + size.height > stage.height {
            y -= size.height;
        }
        self.attach(root, menu)?;
        self.set_position(menu, x.max(0.0), y.max(0.0))?;
        if let Some(m) = self.nodes.get_mut(menu).and_then(|n| n.widget.as_menu_mut()) {
            m.reset();
        }
        self.menu_root = Some(menu);
        tracing::debug!(menu = ?menu, x, y, "menu shown");
        Ok(())
    }

    /// Close the open chain. Returns `false` when nothing was open.
    pub fn close_menus(&mut self) -> bool {
        let Some(root_menu) = self.menu_root.take() else {
            return false;
        };
        self.close_chain(root_menu);
        tracing::debug!(menu = ?root_menu, "menus closed");
        true
    }

    /// The open chain, outermost menu first.
    pub fn open_menus(&self) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.menu_root;
        while let Some(id) = cursor {
            chain.push(id);
            cursor = self.menu(id).and_then(Menu::open_child);
        }
        chain
    }

    fn fit_menu(&mut self, menu: NodeId) -> Result<()> {
        let Some(m) = self.menu(menu) else {
            return Err(UiError::WrongKind { expected: "menu" });
        };
        let height = m.content_height();
        let widest = m
            .entries()
            .iter()
            .filter_map(MenuEntry::label)
            .map(|label| self.metrics.text_width(&format!(" {label} ▸")))
            .fold(self.config.menu_width, f32::max);
        self.set_size(menu, widest, height)?;
        Ok(())
    }

    fn menu_reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut stack = vec![from];
        let mut seen = Vec::new();
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if let Some(m) = self.menu(id) {
                stack.extend(m.submenus());
            }
        }
        false
    }

    fn close_chain(&mut self, from: NodeId) {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            cursor = self.menu(id).and_then(Menu::open_child);
            if let Some(m) = self.nodes.get_mut(id).and_then(|n| n.widget.as_menu_mut()) {
                m.reset();
            }
            self.detach(id);
        }
    }

    /// Highlight `row` of `menu`, opening its submenu when it has one and
    /// closing whatever other submenu was open.
    fn hover_menu_row(&mut self, menu: NodeId, row: Option<usize>) {
        let Some(m) = self.nodes.get_mut(menu).and_then(|n| n.widget.as_menu_mut()) else {
            return;
        };
        m.set_hovered(row);
        let wanted = m.hovered_entry().and_then(MenuEntry::submenu);
        let open = m.open_child();
        if open == wanted {
            return;
        }
        if let Some(child) = open {
            m.set_open_child(None);
            self.close_chain(child);
        }
        if let (Some(row), Some(submenu)) = (row, wanted) {
            self.open_submenu(menu, row, submenu);
        }
    }

    fn open_submenu(&mut self, parent: NodeId, row: usize, submenu: NodeId) {
        let (Some(origin), Some(m)) = (self.global_bounds(parent), self.menu(parent)) else {
            return;
        };
        let top = m.entry_top(row);
        let parent_backward = m.opens_backward();
        let (Some(stage), Some(size)) = (self.bounds(self.root), self.bounds(submenu)) else {
            return;
        };
        let mut x = origin.right();
        let mut y = origin.y + top;
        if y + size.height > stage.height {
            y = y - size.height + self.config.menu_item_height;
        }
        let backward = parent_backward || x + size.width > stage.width;
        if backward {
            x = origin.x - size.width;
        }
        let root = self.root;
        if let Err(err) = self.attach(root, submenu) {
            tracing::warn!(menu = ?submenu, error = %err, "submenu could not open");
            return;
        }
        let _ = self.set_position(submenu, x.max(0.0), y.max(0.0));
        if let Some(m) = self.nodes.get_mut(submenu).and_then(|n| n.widget.as_menu_mut()) {
            m.reset();
            m.set_backward(backward);
        }
        if let Some(m) = self.nodes.get_mut(parent).and_then(|n| n.widget.as_menu_mut()) {
            m.set_open_child(Some(submenu));
        }
    }

    /// Close the chain, then report `key` from the menu the chain started at.
    fn choose_menu_item(&mut self, key: String) {
        let Some(root_menu) = self.menu_root else {
            return;
        };
        self.close_menus();
        tracing::debug!(menu = ?root_menu, key = %key, "menu item chosen");
        self.emit(root_menu, UiEvent::MenuSelect { key });
    }

    fn activate_menu_row(&mut self, menu: NodeId) {
        let Some(entry) = self.menu(menu).and_then(Menu::hovered_entry).cloned() else {
            return;
        };
        match entry {
            MenuEntry::Item { key, .. } => self.choose_menu_item(key),
            MenuEntry::Submenu { menu: submenu, .. } => {
                let row = self.menu(menu).and_then(Menu::hovered);
                self.hover_menu_row(menu, row);
                if let Some(m) = self
                    .nodes
                    .get_mut(submenu)
                    .and_then(|n| n.widget.as_menu_mut())
                    && m.hovered().is_none()
                {
                    m.step_hover(true);
                }
            }
            MenuEntry::Separator => {}
        }
    }

    fn menu_row_at(&self, menu: NodeId, pos: Point) -> Option<usize> {
        let origin = self.global_position(menu)?;
        self.menu(menu)?.row_at(pos.y - origin.y)
    }

    /// Track the pointer over the open chain.
    pub(crate) fn hover_menus(&mut self, pos: Point) {
        if self.menu_root.is_none() {
            return;
        }
        let Some(hit) = self.hit_test(pos) else {
            return;
        };
        if !self.open_menus().contains(&hit) {
            return;
        }
        let row = self.menu_row_at(hit, pos);
        self.hover_menu_row(hit, row);
    }

    /// A press while menus are open. Returns whether the chain took it.
    pub(crate) fn press_menus(&mut self, pos: Point) -> bool {
        if self.menu_root.is_none() {
            return false;
        }
        let chain = self.open_menus();
        let Some(menu) = self.hit_test(pos).filter(|hit| chain.contains(hit)) else {
            self.close_menus();
            return false;
        };
        let row = self.menu_row_at(menu, pos);
        self.hover_menu_row(menu, row);
        self.activate_menu_row(menu);
        true
    }

    /// Keys while the chain is open. Every key goes to the deepest menu.
    pub(crate) fn menu_key(&mut self, key: &KeyEvent) -> bool {
        let chain = self.open_menus();
        let Some(&deepest) = chain.last() else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.close_menus();
            }
            KeyCode::Up | KeyCode::Down => {
                if let Some(m) = self.nodes.get_mut(deepest).and_then(|n| n.widget.as_menu_mut()) {
                    m.step_hover(key.code == KeyCode::Down);
                }
            }
            KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                let opens_submenu = self
                    .menu(deepest)
                    .and_then(Menu::hovered_entry)
                    .is_some_and(|e| e.submenu().is_some());
                if key.code != KeyCode::Right || opens_submenu {
                    self.activate_menu_row(deepest);
                }
            }
            KeyCode::Left if chain.len() > 1 => {
                let parent = chain[chain.len() - 2];
                let row = self.menu(parent).and_then(Menu::hovered);
                if let Some(m) = self.nodes.get_mut(parent).and_then(|n| n.widget.as_menu_mut()) {
                    m.set_open_child(None);
                }
                self.close_chain(deepest);
                // keep the row that opened it highlighted
                if let Some(m) = self.nodes.get_mut(parent).and_then(|n| n.widget.as_menu_mut()) {
                    m.set_hovered(row);
                }
            }
            _ => return false,
        }
        true
    }

    /// A disposed menu closes any chain it was in and takes its submenu rows
    /// with it.
    pub(crate) fn forget_menu(&mut self, id: NodeId) {
        if self.open_menus().contains(&id) {
            self.close_menus();
        }
        let owners: Vec<NodeId> = self
            .nodes
            .iter_mut()
            .filter_map(|(owner, node)| {
                node.widget
                    .as_menu_mut()
                    .is_some_and(|m| m.remove_submenu(id))
                    .then_some(owner)
            })
            .collect();
        for owner in owners {
            let _ = self.fit_menu(owner);
        }
    }
}
