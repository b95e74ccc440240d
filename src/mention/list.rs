//! Selection state for the filtered mention list.

use super::{MentionFile, MentionIndex};

#[derive(Debug, Clone)]
pub struct MentionListState {
    /// Current filter query
    pub query: String,
    /// Indices into the mention index matching the query
    pub filtered: Vec<usize>,
    /// Currently selected index in the filtered list
    pub selected: usize,
    /// Maximum visible items in the list
    pub max_visible: usize,
    /// Scroll offset for the list
    pub scroll_offset: usize,
}

impl MentionListState {
    pub fn new(max_visible: usize) -> Self {
        Self {
            query: String::new(),
            filtered: Vec::new(),
            selected: 0,
            max_visible: max_visible.max(1),
            scroll_offset: 0,
        }
    }

    /// Clear the query, list every file again and select the first one
    pub fn reset(&mut self, index: &MentionIndex) {
        self.query.clear();
        self.selected = 0;
        self.refilter(index);
    }

    /// Re-run the current query against `index`
    pub fn refilter(&mut self, index: &MentionIndex) {
        let filtered = index.filter_indices(&self.query);
        self.set_filtered(filtered);
    }

    pub fn set_query(&mut self, query: impl Into<String>, index: &MentionIndex) {
        self.query = query.into();
        self.refilter(index);
    }

    pub fn push_char(&mut self, c: char, index: &MentionIndex) {
        self.query.push(c);
        self.refilter(index);
    }

    pub fn pop_char(&mut self, index: &MentionIndex) {
        if self.query.pop().is_some() {
            self.refilter(index);
        }
    }

    pub fn set_filtered(&mut self, filtered: Vec<usize>) {
        self.filtered = filtered;
        self.clamp_selection();
        self.scroll_offset = 0;
    }

    pub fn clamp_selection(&mut self) {
        if self.filtered.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len() - 1;
        }
    }

    /// Select previous item.
    pub fn select_prev(&mut self) {
        if !self.filtered.is_empty() && self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            }
        }
    }

    /// Select next item.
    pub fn select_next(&mut self) {
        if !self.filtered.is_empty() && self.selected < self.filtered.len() - 1 {
            self.selected += 1;
            if self.selected >= self.scroll_offset + self.max_visible {
                self.scroll_offset = self.selected - self.max_visible + 1;
            }
        }
    }

    /// Page up (move up by visible count).
    pub fn page_up(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = self.selected.saturating_sub(self.max_visible);
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            }
        }
    }

    /// Page down (move down by visible count).
    pub fn page_down(&mut self) {
        if !self.filtered.is_empty() {
            let max_idx = self.filtered.len() - 1;
            self.selected = (self.selected + self.max_visible).min(max_idx);
            if self.selected >= self.scroll_offset + self.max_visible {
                self.scroll_offset = self.selected + 1 - self.max_visible;
            }
        }
    }

    /// Select item at a given visual row (for mouse clicks).
    /// Returns true if an item was selected.
    pub fn select_at_row(&mut self, row: usize) -> bool {
        let target_idx = self.scroll_offset + row;
        if target_idx < self.filtered.len() {
            self.selected = target_idx;
            true
        } else {
            false
        }
    }

    /// The selected file, if the filtered list is not empty
    pub fn selected_file<'a>(&self, index: &'a MentionIndex) -> Option<&'a MentionFile> {
        self.filtered
            .get(self.selected)
            .and_then(|&i| index.get(i))
    }

    pub fn visible_len(&self) -> usize {
        self.max_visible.min(self.filtered.len().max(1))
    }
}

impl Default for MentionListState {
    fn default() -> Self {
        Self::new(10)
    }
}
