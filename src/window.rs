//! Windowed rendering for long single-column lists
//!
//! Only rows intersecting the viewport are produced. The full virtual height
//! (`len * item_height`) is reported separately so a scrollbar keeps its
//! proportions, and every produced row carries its absolute `top` offset.

use serde::Serialize;
use std::ops::Range;

/// A rendered row positioned inside the virtual list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedRow<R> {
    pub index: usize,
    /// `index * item_height`
    pub top: f64,
    pub content: R,
}

/// Viewport over a borrowed slice of items
#[derive(Debug, Clone)]
pub struct WindowedList<'a, T> {
    items: &'a [T],
    item_height: f64,
    container_height: f64,
    scroll_top: f64,
    overscan: usize,
}

impl<'a, T> WindowedList<'a, T> {
    pub fn new(items: &'a [T], item_height: f64, container_height: f64) -> Self {
        Self {
            items,
            item_height: if item_height.is_finite() { item_height } else { 0.0 },
            container_height: container_height.max(0.0),
            scroll_top: 0.0,
            overscan: 0,
        }
    }

    /// Render `rows` extra rows above and below the viewport
    pub fn with_overscan(mut self, rows: usize) -> Self {
        self.overscan = rows;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Height of the whole list, visible or not
    pub fn total_height(&self) -> f64 {
        if self.item_height <= 0.0 {
            return 0.0;
        }
        self.items.len() as f64 * self.item_height
    }

    /// Move the viewport, clamped to the scrollable extent
    pub fn scroll_to(&mut self, offset: f64) {
        let max = (self.total_height() - self.container_height).max(0.0);
        self.scroll_top = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, max)
        };
    }

    /// Indices of the rows to render
    pub fn visible_range(&self) -> Range<usize> {
        let len = self.items.len();
        if self.item_height <= 0.0 || len == 0 {
            return 0..0;
        }
        let first = (self.scroll_top / self.item_height).floor() as usize;
        let last =
            ((self.scroll_top + self.container_height) / self.item_height).ceil() as usize;

        let start = first.saturating_sub(self.overscan).min(len);
        let end = last.saturating_add(self.overscan).min(len);
        start..end.max(start)
    }

    /// Most rows [`Self::visible_range`] can ever contain for this viewport
    pub fn max_rendered_rows(&self) -> usize {
        if self.item_height <= 0.0 {
            return 0;
        }
        ((self.container_height / self.item_height).ceil() as usize)
            .saturating_add(1)
            .saturating_add(self.overscan.saturating_mul(2))
    }

    /// Visible items with their positions
    pub fn visible(&self) -> impl Iterator<Item = PositionedRow<&'a T>> + '_ {
        let items = self.items;
        self.visible_range().map(move |index| PositionedRow {
            index,
            top: index as f64 * self.item_height,
            content: &items[index],
        })
    }

    /// Render each visible item through `render_item`
    pub fn render<R, F>(&self, mut render_item: F) -> Vec<PositionedRow<R>>
    where
        F: FnMut(&T, usize) -> R,
    {
        self.visible_range()
            .map(|index| PositionedRow {
                index,
                top: index as f64 * self.item_height,
                content: render_item(&self.items[index], index),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_window() {
        let items: Vec<u32> = (0..100).collect();
        let list = WindowedList::new(&items, 20.0, 100.0);
        assert_eq!(list.visible_range(), 0..5);
        assert_eq!(list.total_height(), 2000.0);
    }

    #[test]
    fn test_partial_rows_at_both_edges() {
        let items: Vec<u32> = (0..100).collect();
        let mut list = WindowedList::new(&items, 20.0, 100.0);
        list.scroll_to(30.0);
        // floor(30/20)=1 .. ceil(130/20)=7
        assert_eq!(list.visible_range(), 1..7);
    }

    #[test]
    fn test_rows_positioned_at_index_times_height() {
        let items: Vec<&str> = vec!["a", "b", "c", "d"];
        let mut list = WindowedList::new(&items, 10.0, 20.0);
        list.scroll_to(10.0);
        let rows = list.render(|item, i| format!("{}{}", item, i));
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].top, 10.0);
        assert_eq!(rows[0].content, "b1");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.last().map(|r| r.top), Some(20.0));
    }

    #[test]
    fn test_scroll_clamped() {
        let items: Vec<u32> = (0..10).collect();
        let mut list = WindowedList::new(&items, 10.0, 30.0);
        list.scroll_to(-50.0);
        assert_eq!(list.scroll_top(), 0.0);
        list.scroll_to(10_000.0);
        assert_eq!(list.scroll_top(), 70.0);
        assert_eq!(list.visible_range(), 7..10);
        list.scroll_to(f64::NAN);
        assert_eq!(list.scroll_top(), 0.0);
    }

    #[test]
    fn test_short_list_cannot_scroll() {
        let items = vec![1, 2];
        let mut list = WindowedList::new(&items, 10.0, 100.0);
        list.scroll_to(40.0);
        assert_eq!(list.scroll_top(), 0.0);
        assert_eq!(list.visible_range(), 0..2);
    }

    #[test]
    fn test_zero_item_height_renders_nothing() {
        let items = vec![1, 2, 3];
        let list = WindowedList::new(&items, 0.0, 100.0);
        assert_eq!(list.visible_range(), 0..0);
        assert_eq!(list.total_height(), 0.0);
        assert!(list.render(|i, _| *i).is_empty());
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<u8> = Vec::new();
        let list = WindowedList::new(&items, 10.0, 100.0);
        assert_eq!(list.visible().count(), 0);
    }

    #[test]
    fn test_overscan_widens_range() {
        let items: Vec<u32> = (0..100).collect();
        let mut list = WindowedList::new(&items, 10.0, 50.0).with_overscan(2);
        list.scroll_to(200.0);
        assert_eq!(list.visible_range(), 18..27);
    }

    #[test]
    fn test_row_count_independent_of_length() {
        for len in [10usize, 1_000, 100_000] {
            let items: Vec<usize> = (0..len).collect();
            let mut list = WindowedList::new(&items, 24.0, 480.0);
            let bound = list.max_rendered_rows();
            for offset in [0.0, 13.0, 480.0, 1e9] {
                list.scroll_to(offset);
                let rows = list.render(|item, _| *item);
                assert!(rows.len() <= bound, "len={} offset={}", len, offset);
                assert!(rows.len() <= len);
            }
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_rendered_rows_bounded(
            len in 0usize..100_000,
            item_height in 1.0f64..80.0,
            container_height in 0.0f64..2_000.0,
            offset in -1_000.0f64..10_000_000.0,
            overscan in 0usize..4,
        ) {
            let items: Vec<u8> = vec![0; len];
            let mut list = WindowedList::new(&items, item_height, container_height)
                .with_overscan(overscan);
            list.scroll_to(offset);
            let range = list.visible_range();
            prop_assert!(range.len() <= list.max_rendered_rows());
            prop_assert!(range.end <= len);
        }

        #[test]
        fn prop_first_visible_row_intersects_viewport(
            len in 1usize..10_000,
            offset in 0.0f64..1_000_000.0,
        ) {
            let items: Vec<u8> = vec![0; len];
            let mut list = WindowedList::new(&items, 30.0, 600.0);
            list.scroll_to(offset);
            let first = list.visible().next();
            if let Some(row) = first {
                prop_assert!(row.top <= list.scroll_top());
                prop_assert!(row.top + 30.0 > list.scroll_top());
            }
        }
    }
}
