//! Framework-visible editing state: text, selection, and composing span.
//!
//! The model mirrors the state of the text field that currently owns input.
//! Text is stored as code points rather than bytes so positions line up with
//! the indices the framework exchanges over the channel. Every mutating
//! operation reports whether it changed anything, which lets callers decide
//! whether an update needs to be pushed back to the framework.

use crate::range::TextRange;

/// Editing state for the active text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditingModel {
    text: Vec<char>, // Code points, not grapheme clusters
    selection: TextRange,
    composing: Option<TextRange>,
}

impl TextEditingModel {
    /// Create an empty model with a caret at the start.
    pub fn new() -> Self {
        Self {
            text: Vec::new(),
            selection: TextRange::collapsed(0),
            composing: None,
        }
    }

    /// Get the buffer contents.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Get the buffer length in code points.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the current selection.
    pub fn selection(&self) -> TextRange {
        self.selection
    }

    /// Get the open composing span, if any.
    pub fn composing_range(&self) -> Option<TextRange> {
        self.composing
    }

    /// Check if a composing span is open.
    pub fn is_composing(&self) -> bool {
        self.composing.is_some()
    }

    /// Replace the whole buffer, resetting selection and composing state.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.selection = TextRange::collapsed(0);
        self.composing = None;
    }

    /// Set the selection, clamping both endpoints to the buffer bounds.
    pub fn set_selection(&mut self, selection: TextRange) {
        let len = self.text.len();
        self.selection = TextRange::new(selection.base().min(len), selection.extent().min(len));
    }

    /// Open a collapsed composing span at the selection start.
    /// No-op if a span is already open.
    pub fn begin_composing(&mut self) {
        if self.composing.is_none() {
            self.composing = Some(TextRange::collapsed(self.selection.start()));
        }
    }

    /// Replace the composing span contents with `text`.
    ///
    /// Opens a span at the selection start if none is open. Afterwards the
    /// span covers exactly `text` and the caret sits at its end.
    pub fn update_composing_text(&mut self, text: &str) {
        let range = match self.composing {
            Some(range) => range,
            None => TextRange::collapsed(self.selection.start()),
        };
        let replacement: Vec<char> = text.chars().collect();
        let end = range.start() + replacement.len();
        self.text.splice(range.start()..range.end(), replacement);
        self.composing = Some(TextRange::new(range.start(), end));
        self.selection = TextRange::collapsed(end);
    }

    /// Close the composing span. The buffer keeps whatever the span held.
    pub fn end_composing(&mut self) {
        self.composing = None;
    }

    /// Insert one code point at the caret, replacing any selection.
    pub fn add_code_point(&mut self, ch: char) {
        self.delete_selected();
        let at = self.selection.position();
        self.text.insert(at, ch);
        self.selection = TextRange::collapsed(at + 1);
    }

    /// Insert text at the caret, replacing any selection.
    pub fn add_text(&mut self, text: &str) {
        self.delete_selected();
        let at = self.selection.position();
        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        self.text.splice(at..at, inserted);
        self.selection = TextRange::collapsed(at + count);
    }

    /// Remove the selected text, collapsing the caret at the selection start.
    /// Returns false when the selection is already collapsed.
    pub fn delete_selected(&mut self) -> bool {
        let selection = self.selection;
        if selection.is_collapsed() {
            return false;
        }
        self.text.drain(selection.start()..selection.end());
        self.selection = TextRange::collapsed(selection.start());
        self.clamp_composing();
        true
    }

    /// Delete backwards: the selection if one exists, otherwise the code
    /// point before the caret. Returns true if anything was removed.
    pub fn backspace(&mut self) -> bool {
        if self.delete_selected() {
            return true;
        }
        let at = self.selection.position();
        if at == 0 {
            return false;
        }
        self.text.remove(at - 1);
        self.selection = TextRange::collapsed(at - 1);
        self.clamp_composing();
        true
    }

    /// Delete forwards: the selection if one exists, otherwise the code
    /// point after the caret. Returns true if anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selected() {
            return true;
        }
        let at = self.selection.position();
        if at >= self.text.len() {
            return false;
        }
        self.text.remove(at);
        self.clamp_composing();
        true
    }

    /// Move the caret one position left, or collapse a selection to its
    /// start. Returns true if the selection changed.
    pub fn move_cursor_back(&mut self) -> bool {
        let selection = self.selection;
        if !selection.is_collapsed() {
            self.selection = TextRange::collapsed(selection.start());
            return true;
        }
        if selection.start() == 0 {
            return false;
        }
        self.selection = TextRange::collapsed(selection.start() - 1);
        true
    }

    /// Move the caret one position right, or collapse a selection to its
    /// end. Returns true if the selection changed.
    pub fn move_cursor_forward(&mut self) -> bool {
        let selection = self.selection;
        if !selection.is_collapsed() {
            self.selection = TextRange::collapsed(selection.end());
            return true;
        }
        if selection.start() >= self.text.len() {
            return false;
        }
        self.selection = TextRange::collapsed(selection.start() + 1);
        true
    }

    /// Collapse the caret at the start of the buffer.
    /// Returns true if the selection changed.
    pub fn move_cursor_to_start(&mut self) -> bool {
        if self.selection == TextRange::collapsed(0) {
            return false;
        }
        self.selection = TextRange::collapsed(0);
        true
    }

    /// Collapse the caret at the end of the buffer.
    /// Returns true if the selection changed.
    pub fn move_cursor_to_end(&mut self) -> bool {
        let end = TextRange::collapsed(self.text.len());
        if self.selection == end {
            return false;
        }
        self.selection = end;
        true
    }

    // Deletions near an open span can leave its bounds past the buffer end;
    // pull them back in so positions stay addressable.
    fn clamp_composing(&mut self) {
        if let Some(range) = self.composing {
            let len = self.text.len();
            self.composing = Some(TextRange::new(range.base().min(len), range.extent().min(len)));
        }
    }
}

impl Default for TextEditingModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new() {
        let model = TextEditingModel::new();
        assert!(model.is_empty());
        assert_eq!(model.selection(), TextRange::collapsed(0));
        assert!(!model.is_composing());
    }

    #[test]
    fn test_set_text_resets_state() {
        let mut model = TextEditingModel::new();
        model.set_text("hello");
        model.set_selection(TextRange::new(1, 4));
        model.begin_composing();

        model.set_text("world");
        assert_eq!(model.text(), "world");
        assert_eq!(model.selection(), TextRange::collapsed(0));
        assert!(!model.is_composing());
    }

    #[test]
    fn test_set_selection_clamps() {
        let mut model = TextEditingModel::new();
        model.set_text("abc");
        model.set_selection(TextRange::new(1, 99));
        assert_eq!(model.selection(), TextRange::new(1, 3));
    }

    #[test]
    fn test_add_code_point() {
        let mut model = TextEditingModel::new();
        model.add_code_point('h');
        model.add_code_point('i');
        assert_eq!(model.text(), "hi");
        assert_eq!(model.selection(), TextRange::collapsed(2));
    }

    #[test]
    fn test_add_code_point_counts_code_points() {
        let mut model = TextEditingModel::new();
        model.set_text("你好");
        model.move_cursor_to_end();
        model.add_code_point('吗');
        assert_eq!(model.text(), "你好吗");
        assert_eq!(model.selection(), TextRange::collapsed(3));
    }

    #[test]
    fn test_add_code_point_replaces_selection() {
        let mut model = TextEditingModel::new();
        model.set_text("hello");
        model.set_selection(TextRange::new(1, 4));
        model.add_code_point('u');
        assert_eq!(model.text(), "huo");
        assert_eq!(model.selection(), TextRange::collapsed(2));
    }

    #[test]
    fn test_add_text_replaces_selection() {
        let mut model = TextEditingModel::new();
        model.set_text("hello world");
        model.set_selection(TextRange::new(6, 11));
        model.add_text("there");
        assert_eq!(model.text(), "hello there");
        assert_eq!(model.selection(), TextRange::collapsed(11));
    }

    #[test]
    fn test_backspace() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        model.move_cursor_to_end();
        assert!(model.backspace());
        assert_eq!(model.text(), "a");
        assert_eq!(model.selection(), TextRange::collapsed(1));
    }

    #[test]
    fn test_backspace_at_start() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        assert!(!model.backspace());
        assert_eq!(model.text(), "ab");
    }

    #[test]
    fn test_backspace_removes_selection() {
        let mut model = TextEditingModel::new();
        model.set_text("hello");
        model.set_selection(TextRange::new(4, 1));
        assert!(model.backspace());
        assert_eq!(model.text(), "ho");
        assert_eq!(model.selection(), TextRange::collapsed(1));
    }

    #[test]
    fn test_delete_forward() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        assert!(model.delete_forward());
        assert_eq!(model.text(), "b");
        assert_eq!(model.selection(), TextRange::collapsed(0));
    }

    #[test]
    fn test_delete_forward_at_end() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        model.move_cursor_to_end();
        assert!(!model.delete_forward());
        assert_eq!(model.text(), "ab");
    }

    #[test]
    fn test_move_cursor_bounds() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        assert!(!model.move_cursor_back());
        assert!(model.move_cursor_forward());
        assert!(model.move_cursor_forward());
        assert!(!model.move_cursor_forward());
        assert_eq!(model.selection(), TextRange::collapsed(2));
        assert!(model.move_cursor_back());
        assert_eq!(model.selection(), TextRange::collapsed(1));
    }

    #[test]
    fn test_move_collapses_selection() {
        let mut model = TextEditingModel::new();
        model.set_text("hello");
        model.set_selection(TextRange::new(1, 4));
        assert!(model.move_cursor_back());
        assert_eq!(model.selection(), TextRange::collapsed(1));

        model.set_selection(TextRange::new(4, 1));
        assert!(model.move_cursor_forward());
        assert_eq!(model.selection(), TextRange::collapsed(4));
    }

    #[test]
    fn test_home_and_end() {
        let mut model = TextEditingModel::new();
        model.set_text("abc");
        assert!(model.move_cursor_to_end());
        assert_eq!(model.selection(), TextRange::collapsed(3));
        assert!(!model.move_cursor_to_end());
        assert!(model.move_cursor_to_start());
        assert_eq!(model.selection(), TextRange::collapsed(0));
        assert!(!model.move_cursor_to_start());
    }

    #[test]
    fn test_composing_lifecycle() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        model.move_cursor_forward();

        model.begin_composing();
        assert_eq!(model.composing_range(), Some(TextRange::collapsed(1)));

        model.update_composing_text("ni");
        assert_eq!(model.text(), "anib");
        assert_eq!(model.composing_range(), Some(TextRange::new(1, 3)));
        assert_eq!(model.selection(), TextRange::collapsed(3));

        model.update_composing_text("你");
        assert_eq!(model.text(), "a你b");
        assert_eq!(model.composing_range(), Some(TextRange::new(1, 2)));
        assert_eq!(model.selection(), TextRange::collapsed(2));

        model.end_composing();
        assert!(!model.is_composing());
        assert_eq!(model.text(), "a你b");
    }

    #[test]
    fn test_begin_composing_keeps_open_span() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        model.begin_composing();
        model.update_composing_text("x");
        // A second begin must not move the span.
        model.begin_composing();
        assert_eq!(model.composing_range(), Some(TextRange::new(0, 1)));
    }

    #[test]
    fn test_update_composing_opens_span() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        model.move_cursor_to_end();
        model.update_composing_text("c");
        assert_eq!(model.text(), "abc");
        assert_eq!(model.composing_range(), Some(TextRange::new(2, 3)));
    }

    #[test]
    fn test_update_composing_with_empty_text() {
        let mut model = TextEditingModel::new();
        model.set_text("ab");
        model.move_cursor_to_end();
        model.update_composing_text("xyz");
        model.update_composing_text("");
        assert_eq!(model.text(), "ab");
        assert_eq!(model.composing_range(), Some(TextRange::collapsed(2)));
        assert_eq!(model.selection(), TextRange::collapsed(2));
    }

    #[test]
    fn test_backspace_clamps_composing() {
        let mut model = TextEditingModel::new();
        model.begin_composing();
        model.update_composing_text("ab");
        assert!(model.backspace());
        let range = model.composing_range().unwrap();
        assert!(range.end() <= model.len());
    }

    #[test]
    fn test_empty_buffer_noops() {
        let mut model = TextEditingModel::new();
        assert!(!model.backspace());
        assert!(!model.delete_forward());
        assert!(!model.move_cursor_back());
        assert!(!model.move_cursor_forward());
        assert!(!model.move_cursor_to_start());
        assert!(!model.move_cursor_to_end());
        assert!(model.is_empty());
    }

    proptest! {
        #[test]
        fn prop_selection_always_in_bounds(text in ".{0,20}", base in 0usize..64, extent in 0usize..64) {
            let mut model = TextEditingModel::new();
            model.set_text(&text);
            model.set_selection(TextRange::new(base, extent));
            prop_assert!(model.selection().end() <= model.len());
            // In-range pairs survive unchanged, direction included.
            if base <= model.len() && extent <= model.len() {
                prop_assert_eq!(model.selection(), TextRange::new(base, extent));
            }
        }

        #[test]
        fn prop_add_then_backspace_round_trips(text in "[a-z]{0,12}", ch in any::<char>()) {
            let mut model = TextEditingModel::new();
            model.set_text(&text);
            model.move_cursor_to_end();
            model.add_code_point(ch);
            prop_assert!(model.backspace());
            prop_assert_eq!(model.text(), text);
            prop_assert_eq!(model.selection(), TextRange::collapsed(model.len()));
        }

        #[test]
        fn prop_composing_stays_in_bounds(text in "[a-z]{0,8}", preedit in ".{0,8}") {
            let mut model = TextEditingModel::new();
            model.set_text(&text);
            model.move_cursor_to_end();
            model.begin_composing();
            model.update_composing_text(&preedit);
            let range = model.composing_range().unwrap();
            prop_assert!(range.start() <= range.end());
            prop_assert!(range.end() <= model.len());
        }
    }
}
