//! Single-line text editing.
//!
//! The buffer, caret and selection anchor never diverge: every mutation ends
//! in [`TextInput::set_text`], which re-clamps the caret and the anchor and
//! marks the text as changed. The owning context drains that mark with
//! [`TextInput::take_text_change`] and raises one notification per edit.
//!
//! Indices are in characters, not bytes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::clipboard::ClipboardBackend;
use crate::font::GlyphMetrics;

/// Fixed-period caret visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CaretBlink {
    visible: bool,
    counter: u32,
    period: u32,
}

impl CaretBlink {
    fn new(period: u32) -> Self {
        Self {
            visible: true,
            counter: period,
            period,
        }
    }

    fn reset(&mut self) {
        self.visible = true;
        self.counter = self.period;
    }

    fn tick(&mut self) {
        self.counter = self.counter.saturating_sub(1);
        if self.counter == 0 {
            self.counter = self.period;
            self.visible = !self.visible;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    pub handled: bool,
    /// Enter was pressed; the context raises a submit notification.
    pub submit: bool,
}

impl KeyOutcome {
    fn handled() -> Self {
        Self {
            handled: true,
            submit: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextInput {
    text: String,
    caret: usize,
    anchor: Option<usize>,
    blink: CaretBlink,
    margin: f32,
    available_width: f32,
    changed: bool,
}

impl TextInput {
    pub fn new(margin: f32) -> Self {
        Self::with_blink_period(margin, crate::constants::CARET_BLINK_PERIOD)
    }

    pub fn with_blink_period(margin: f32, period: u32) -> Self {
        Self {
            text: String::new(),
            caret: 0,
            anchor: None,
            blink: CaretBlink::new(period.max(1)),
            margin,
            available_width: f32::INFINITY,
            changed: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn caret_visible(&self) -> bool {
        self.blink.visible
    }

    /// Width the text may occupy before insertions are pushed back.
    pub fn available_width(&self) -> f32 {
        self.available_width
    }

    pub fn set_available_width(&mut self, width: f32) {
        self.available_width = width.max(0.0);
    }

    /// Selected `(from, to)` range with `from < to`, if any.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    pub fn selected_text(&self) -> Option<String> {
        let (from, to) = self.selection()?;
        Some(self.text.chars().skip(from).take(to - from).collect())
    }

    /// The canonical mutation. Every edit funnels through here.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let len = self.len();
        if self.caret > len {
            self.caret = len;
        }
        if let Some(anchor) = self.anchor.as_mut() {
            *anchor = (*anchor).min(len);
        }
        self.changed = true;
    }

    /// Returns the text once per batch of edits.
    pub fn take_text_change(&mut self) -> Option<String> {
        if std::mem::take(&mut self.changed) {
            Some(self.text.clone())
        } else {
            None
        }
    }

    pub fn set_caret(&mut self, index: usize) {
        self.caret = index.min(self.len());
        self.blink.reset();
    }

    /// Select `from..to` (either order); the caret lands on `to`.
    pub fn select(&mut self, from: usize, to: usize) {
        let len = self.len();
        self.anchor = Some(from.min(len));
        self.set_caret(to);
    }

    pub fn select_all(&mut self) {
        let len = self.len();
        self.select(0, len);
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.set_text("");
        self.set_caret(0);
    }

    /// Insert at the caret, replacing any selection. If the result is wider
    /// than the available width, characters before the caret are dropped
    /// until it fits, so the text that was already there survives.
    pub fn insert(&mut self, inserted: &str, metrics: &dyn GlyphMetrics) {
        self.delete_selection();
        let at = self.byte_index(self.caret);
        let mut text = self.text.clone();
        text.insert_str(at, inserted);
        self.set_text(text);
        self.set_caret(self.caret + inserted.chars().count());
        while self.caret > 0 && metrics.text_width(&self.text) > self.available_width {
            self.remove_before_caret();
        }
    }

    /// Typed character. Glyphs the font can't draw are rejected here and only
    /// here.
    pub fn type_char(&mut self, ch: char, metrics: &dyn GlyphMetrics) -> bool {
        if !metrics.supports(ch) {
            return false;
        }
        let mut buf = [0u8; 4];
        self.insert(ch.encode_utf8(&mut buf), metrics);
        true
    }

    pub fn backspace(&mut self) {
        if !self.delete_selection() {
            self.remove_before_caret();
        }
    }

    /// Remove the run of non-space characters ending at the caret, or the
    /// single space right before it.
    pub fn delete_word(&mut self) {
        if self.delete_selection() || self.caret == 0 {
            return;
        }
        if self.char_before_caret() == Some(' ') {
            self.remove_before_caret();
            return;
        }
        while self.caret > 0 && self.char_before_caret().is_some_and(|c| c != ' ') {
            self.remove_before_caret();
        }
    }

    pub fn delete_forward(&mut self) {
        if self.delete_selection() || self.caret >= self.len() {
            return;
        }
        let start = self.byte_index(self.caret);
        let end = self.byte_index(self.caret + 1);
        let mut text = self.text.clone();
        text.replace_range(start..end, "");
        self.set_text(text);
    }

    pub fn move_left(&mut self, extend: bool) {
        self.track_selection(extend);
        self.set_caret(self.caret.saturating_sub(1));
    }

    pub fn move_right(&mut self, extend: bool) {
        self.track_selection(extend);
        self.set_caret(self.caret + 1);
    }

    pub fn home(&mut self, extend: bool) {
        self.track_selection(extend);
        self.set_caret(0);
    }

    pub fn end(&mut self, extend: bool) {
        self.track_selection(extend);
        self.set_caret(self.len());
    }

    /// Selection if there is one, otherwise the whole buffer.
    pub fn copy_text(&self) -> String {
        self.selected_text().unwrap_or_else(|| self.text.clone())
    }

    pub fn copy(&self, clipboard: &mut dyn ClipboardBackend) {
        if let Err(err) = clipboard.set_text(&self.copy_text()) {
            tracing::warn!(error = %err, "clipboard write failed");
        }
    }

    /// Copy, then clear what was copied. The buffer is left untouched when
    /// the copy fails.
    pub fn cut(&mut self, clipboard: &mut dyn ClipboardBackend) {
        if let Err(err) = clipboard.set_text(&self.copy_text()) {
            tracing::warn!(error = %err, "clipboard write failed");
            return;
        }
        if !self.delete_selection() {
            self.clear();
        }
    }

    pub fn paste(&mut self, clipboard: &mut dyn ClipboardBackend, metrics: &dyn GlyphMetrics) {
        match clipboard.get_text() {
            Ok(pasted) => {
                let line: String = pasted.chars().filter(|c| !c.is_control()).collect();
                self.insert(&line, metrics);
            }
            Err(err) => tracing::warn!(error = %err, "clipboard read failed"),
        }
    }

    /// Place the caret under a pointer at input-local `x`.
    pub fn click_at(&mut self, x: f32, metrics: &dyn GlyphMetrics) {
        let rel = x - self.margin;
        let mut acc = 0.0;
        let mut index = 0;
        for ch in self.text.chars() {
            let w = metrics.char_width(ch);
            if acc + w > rel {
                break;
            }
            acc += w;
            index += 1;
        }
        self.anchor = None;
        self.set_caret(index);
    }

    pub fn focus_gained(&mut self) {
        self.anchor = None;
        self.set_caret(self.len());
    }

    pub fn focus_lost(&mut self) {
        self.anchor = None;
    }

    pub fn tick(&mut self) {
        self.blink.tick();
    }

    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        metrics: &dyn GlyphMetrics,
        clipboard: &mut dyn ClipboardBackend,
    ) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'a' => self.select_all(),
                'c' => self.copy(clipboard),
                'x' => self.cut(clipboard),
                'v' => self.paste(clipboard, metrics),
                'w' => self.delete_word(),
                _ => return KeyOutcome::default(),
            },
            KeyCode::Char(c) if !alt => {
                if !self.type_char(c, metrics) {
                    return KeyOutcome::default();
                }
            }
            KeyCode::Backspace if ctrl => self.delete_word(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(shift),
            KeyCode::Right => self.move_right(shift),
            KeyCode::Home => self.home(shift),
            KeyCode::End => self.end(shift),
            KeyCode::Enter => {
                self.anchor = None;
                self.set_caret(self.len());
                return KeyOutcome {
                    handled: true,
                    submit: true,
                };
            }
            _ => return KeyOutcome::default(),
        }
        KeyOutcome::handled()
    }

    fn track_selection(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else {
            self.anchor = None;
        }
    }

    fn delete_selection(&mut self) -> bool {
        let Some((from, to)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        let start = self.byte_index(from);
        let end = self.byte_index(to);
        let mut text = self.text.clone();
        text.replace_range(start..end, "");
        self.anchor = None;
        self.caret = from;
        self.set_text(text);
        self.blink.reset();
        true
    }

    fn remove_before_caret(&mut self) {
        if self.caret == 0 {
            return;
        }
        let start = self.byte_index(self.caret - 1);
        let end = self.byte_index(self.caret);
        let mut text = self.text.clone();
        text.replace_range(start..end, "");
        self.caret -= 1;
        self.set_text(text);
        self.blink.reset();
    }

    fn char_before_caret(&self) -> Option<char> {
        self.caret
            .checked_sub(1)
            .and_then(|i| self.text.chars().nth(i))
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::font::MonospaceMetrics;

    const METRICS: MonospaceMetrics = MonospaceMetrics::new(8.0, 12.0);

    fn input() -> TextInput {
        let mut t = TextInput::new(5.0);
        t.set_available_width(190.0);
        t
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn insert_backspace_home_end() {
        let mut t = input();
        t.insert("abc", &METRICS);
        assert_eq!(t.text(), "abc");
        assert_eq!(t.caret(), 3);
        t.backspace();
        assert_eq!(t.text(), "ab");
        assert_eq!(t.caret(), 2);
        t.insert("c", &METRICS);
        t.home(false);
        assert_eq!(t.caret(), 0);
        t.end(false);
        assert_eq!(t.caret(), 3);
    }

    #[test]
    fn word_delete_keeps_separator() {
        let mut t = input();
        t.set_text("hello world");
        t.set_caret(11);
        t.delete_word();
        assert_eq!(t.text(), "hello ");
        assert_eq!(t.caret(), 6);
        t.delete_word();
        assert_eq!(t.text(), "hello");
        assert_eq!(t.caret(), 5);
        t.delete_word();
        assert_eq!(t.text(), "");
        t.delete_word();
        assert_eq!(t.caret(), 0);
    }

    #[test]
    fn delete_forward_is_noop_at_end() {
        let mut t = input();
        t.set_text("ab");
        t.set_caret(2);
        let _ = t.take_text_change();
        t.delete_forward();
        assert!(t.take_text_change().is_none());
        t.set_caret(0);
        t.delete_forward();
        assert_eq!(t.text(), "b");
    }

    #[test]
    fn caret_is_clamped_by_set_text() {
        let mut t = input();
        t.set_text("abcdef");
        t.set_caret(6);
        t.set_text("ab");
        assert_eq!(t.caret(), 2);
        t.set_caret(99);
        assert_eq!(t.caret(), 2);
    }

    #[test]
    fn overflow_drops_newest_characters() {
        let mut t = input();
        t.set_available_width(40.0);
        t.insert("abcd", &METRICS);
        t.insert("xyz", &METRICS);
        assert_eq!(t.text(), "abcdx");
        assert_eq!(t.caret(), 5);
    }

    #[test]
    fn unsupported_glyph_rejected_on_type_only() {
        let mut t = input();
        assert!(!t.type_char('漢', &METRICS));
        assert!(t.is_empty());
        t.set_text("漢");
        assert_eq!(t.text(), "漢");
    }

    #[test]
    fn shift_arrows_extend_selection() {
        let mut t = input();
        t.set_text("hello");
        t.set_caret(1);
        t.move_right(true);
        t.move_right(true);
        assert_eq!(t.selection(), Some((1, 3)));
        t.move_left(true);
        t.move_left(true);
        t.move_left(true);
        assert_eq!(t.selection(), Some((0, 1)));
        t.move_right(false);
        assert_eq!(t.selection(), None);
    }

    #[test]
    fn typing_replaces_selection() {
        let mut t = input();
        t.set_text("hello world");
        t.select(0, 5);
        t.type_char('J', &METRICS);
        assert_eq!(t.text(), "J world");
        assert_eq!(t.caret(), 1);
    }

    #[test]
    fn cut_copy_paste_through_clipboard() {
        let mut cb = MemoryClipboard::new();
        let mut t = input();
        t.set_text("abc");
        t.set_caret(3);
        t.handle_key(&ctrl('c'), &METRICS, &mut cb);
        assert_eq!(cb.contents().as_deref(), Some("abc"));
        t.handle_key(&ctrl('x'), &METRICS, &mut cb);
        assert_eq!(t.text(), "");
        assert_eq!(t.caret(), 0);
        t.insert("--", &METRICS);
        t.set_caret(1);
        t.handle_key(&ctrl('v'), &METRICS, &mut cb);
        assert_eq!(t.text(), "-abc-");
        assert_eq!(t.caret(), 4);
    }

    #[test]
    fn paste_from_empty_clipboard_changes_nothing() {
        let mut cb = MemoryClipboard::new();
        let mut t = input();
        t.set_text("keep");
        let _ = t.take_text_change();
        t.paste(&mut cb, &METRICS);
        assert_eq!(t.text(), "keep");
        assert!(t.take_text_change().is_none());
    }

    #[test]
    fn enter_reports_submit_and_moves_caret_to_end() {
        let mut cb = MemoryClipboard::new();
        let mut t = input();
        t.set_text("go");
        t.set_caret(0);
        let out = t.handle_key(&key(KeyCode::Enter), &METRICS, &mut cb);
        assert!(out.handled && out.submit);
        assert_eq!(t.caret(), 2);
    }

    #[test]
    fn ctrl_backspace_deletes_word() {
        let mut cb = MemoryClipboard::new();
        let mut t = input();
        t.set_text("one two");
        t.set_caret(7);
        let k = KeyEvent::new(KeyCode::Backspace, KeyModifiers::CONTROL);
        t.handle_key(&k, &METRICS, &mut cb);
        assert_eq!(t.text(), "one ");
    }

    #[test]
    fn click_places_caret_by_glyph_advance() {
        let mut t = input();
        t.set_text("abcdef");
        t.click_at(5.0 + 8.0 * 2.5, &METRICS);
        assert_eq!(t.caret(), 2);
        t.click_at(1000.0, &METRICS);
        assert_eq!(t.caret(), 6);
        t.click_at(0.0, &METRICS);
        assert_eq!(t.caret(), 0);
    }

    #[test]
    fn blink_toggles_and_resets_on_move() {
        let mut t = TextInput::with_blink_period(5.0, 3);
        t.set_text("ab");
        for _ in 0..3 {
            t.tick();
        }
        assert!(!t.caret_visible());
        t.move_left(false);
        assert!(t.caret_visible());
    }

    #[test]
    fn text_change_is_coalesced_per_edit() {
        let mut t = input();
        t.set_available_width(16.0);
        t.insert("abcd", &METRICS);
        assert_eq!(t.take_text_change().as_deref(), Some("ab"));
        assert!(t.take_text_change().is_none());
    }
}
