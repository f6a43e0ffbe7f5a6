//! Bounded, duplicate-free content queue with a playback cursor

use shortloop_core::{ContentItem, VideoId};
use std::collections::HashSet;

/// Ordered queue of unique content items.
///
/// Invariants:
/// - No video identifier appears twice
/// - `0 <= cursor < len` whenever the queue is non-empty
/// - Front eviction never removes the cursor item or the trailing margin
///   before it
#[derive(Debug, Clone, Default)]
pub struct FeedQueue {
    items: Vec<ContentItem>,
    ids: HashSet<VideoId>,
    cursor: usize,
}

impl FeedQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check whether a video is already queued
    pub fn contains(&self, id: &VideoId) -> bool {
        self.ids.contains(id)
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item at the cursor
    pub fn current(&self) -> Option<&ContentItem> {
        self.items.get(self.cursor)
    }

    /// Item at an arbitrary index
    pub fn get(&self, index: usize) -> Option<&ContentItem> {
        self.items.get(index)
    }

    /// All queued items in order
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Move the cursor. Out-of-range indexes are rejected.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// Append an item if its identifier is not already queued.
    ///
    /// Returns `true` when the item was added.
    pub fn push(&mut self, item: ContentItem) -> bool {
        if self.ids.contains(&item.id) {
            return false;
        }
        self.ids.insert(item.id.clone());
        self.items.push(item);
        true
    }

    /// Evict from the front until the queue fits `max_len`, keeping the
    /// cursor item and up to `margin` items before it.
    ///
    /// Evicted identifiers become eligible for re-ingest later; the sliding
    /// window only dedupes against what is currently retained.
    ///
    /// Returns the number of evicted items.
    pub fn evict_front(&mut self, max_len: usize, margin: usize) -> usize {
        if self.items.len() <= max_len {
            return 0;
        }
        let overflow = self.items.len() - max_len;
        let evictable = self.cursor.saturating_sub(margin);
        let count = overflow.min(evictable);
        if count == 0 {
            return 0;
        }

        for item in self.items.drain(..count) {
            self.ids.remove(&item.id);
        }
        self.cursor -= count;
        count
    }

    /// Remove every item failing the predicate, keeping the cursor on the
    /// same item when it survives, otherwise on the next surviving item.
    ///
    /// Returns the number of removed items.
    pub fn retain(&mut self, mut keep: impl FnMut(&ContentItem) -> bool) -> usize {
        let before = self.items.len();
        let mut new_cursor = 0;
        let mut index = 0;
        self.items.retain(|item| {
            let kept = keep(item);
            if kept && index < self.cursor {
                new_cursor += 1;
            }
            if !kept {
                self.ids.remove(&item.id);
            }
            index += 1;
            kept
        });

        // When the cursor item itself was removed, new_cursor already points
        // at the item that followed it; clamp for removals at the tail.
        self.cursor = if self.items.is_empty() {
            0
        } else {
            new_cursor.min(self.items.len() - 1)
        };
        before - self.items.len()
    }

    /// Clear the queue and reset the cursor
    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ContentItem {
        ContentItem::bare(id)
    }

    fn filled(ids: &[&str]) -> FeedQueue {
        let mut queue = FeedQueue::new();
        for id in ids {
            assert!(queue.push(item(id)));
        }
        queue
    }

    #[test]
    fn create_empty_queue() {
        let queue = FeedQueue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut queue = filled(&["a", "b"]);
        assert!(!queue.push(item("a")));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut queue = filled(&["a", "b", "c"]);
        assert!(queue.set_cursor(2));
        assert!(!queue.set_cursor(3));
        assert_eq!(queue.cursor(), 2);
        assert_eq!(queue.current().unwrap().id.as_str(), "c");
    }

    #[test]
    fn evict_front_respects_margin() {
        let mut queue = filled(&["a", "b", "c", "d", "e", "f"]);
        queue.set_cursor(4);

        // Bound 4, margin 1: two over, cursor-margin allows evicting 3
        let evicted = queue.evict_front(4, 1);
        assert_eq!(evicted, 2);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.cursor(), 2);
        assert_eq!(queue.current().unwrap().id.as_str(), "e");
        // Margin item right before the cursor survived
        assert_eq!(queue.get(1).unwrap().id.as_str(), "d");
    }

    #[test]
    fn evict_front_never_removes_cursor_item() {
        let mut queue = filled(&["a", "b", "c", "d"]);
        queue.set_cursor(0);

        // Over the bound but nothing before the cursor is evictable
        let evicted = queue.evict_front(2, 0);
        assert_eq!(evicted, 0);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.current().unwrap().id.as_str(), "a");
    }

    #[test]
    fn evicted_ids_can_be_reingested() {
        let mut queue = filled(&["a", "b", "c"]);
        queue.set_cursor(2);
        assert_eq!(queue.evict_front(2, 0), 1);
        assert!(!queue.contains(&VideoId::new("a")));
        assert!(queue.push(item("a")));
    }

    #[test]
    fn retain_keeps_cursor_on_surviving_item() {
        let mut queue = filled(&["a", "b", "c", "d"]);
        queue.set_cursor(2);

        let removed = queue.retain(|i| i.id.as_str() != "a");
        assert_eq!(removed, 1);
        assert_eq!(queue.current().unwrap().id.as_str(), "c");
        assert_eq!(queue.cursor(), 1);
    }

    #[test]
    fn retain_moves_cursor_to_next_when_current_removed() {
        let mut queue = filled(&["a", "b", "c", "d"]);
        queue.set_cursor(1);

        let removed = queue.retain(|i| i.id.as_str() != "b");
        assert_eq!(removed, 1);
        assert_eq!(queue.current().unwrap().id.as_str(), "c");
    }

    #[test]
    fn retain_clamps_cursor_at_tail() {
        let mut queue = filled(&["a", "b", "c"]);
        queue.set_cursor(2);

        let removed = queue.retain(|i| i.id.as_str() != "c");
        assert_eq!(removed, 1);
        assert_eq!(queue.cursor(), 1);
        assert_eq!(queue.current().unwrap().id.as_str(), "b");
    }

    #[test]
    fn retain_everything_resets_cursor() {
        let mut queue = filled(&["a", "b"]);
        queue.set_cursor(1);

        let removed = queue.retain(|_| false);
        assert_eq!(removed, 2);
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut queue = filled(&["a", "b"]);
        queue.set_cursor(1);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), 0);
        assert!(queue.push(item("a")));
    }
}
