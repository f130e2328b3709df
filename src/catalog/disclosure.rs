// src/catalog/disclosure.rs

use std::collections::HashMap;

/// Key used by sections that are not grouped by agency.
pub const GLOBAL_KEY: &str = "all";

/// "Show more" counters, one per group key.
///
/// Unseen keys sit at `default_cursor`. `show_more` only ever grows a cursor,
/// and only up to the group length passed in.
#[derive(Debug, Clone, PartialEq)]
pub struct DisclosureController {
    default_cursor: usize,
    step: usize,
    cursors: HashMap<String, usize>,
}

impl DisclosureController {
    pub fn new(default_cursor: usize, step: usize) -> Self {
        Self {
            default_cursor,
            step: step.max(1),
            cursors: HashMap::new(),
        }
    }

    /// How many records of `key` to display for a group of `group_len`.
    pub fn visible(&self, key: &str, group_len: usize) -> usize {
        self.cursors
            .get(key)
            .copied()
            .unwrap_or(self.default_cursor)
            .min(group_len)
    }

    pub fn show_more(&mut self, key: &str, group_len: usize) -> usize {
        let current = self.visible(key, group_len);
        let next = (current + self.step).min(group_len).max(current);
        self.cursors.insert(key.to_string(), next);
        next
    }

    pub fn has_more(&self, key: &str, group_len: usize) -> bool {
        self.visible(key, group_len) < group_len
    }

    /// Back to defaults for every key; called whenever the list is replaced.
    pub fn reset(&mut self) {
        self.cursors.clear();
    }

    /// Back to defaults for the listed keys only.
    pub fn reset_keys<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.cursors.remove(key);
        }
    }
}
