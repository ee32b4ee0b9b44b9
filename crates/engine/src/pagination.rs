//! Fixed-size pagination with wraparound navigation.
//!
//! The bot renders pickable lists (categories, statistics pages) six items
//! at a time, two buttons per row. Navigation wraps: "next" past the last
//! page goes back to the first and "prev" from the first jumps to the last.
//! The last page index is computed once when a list is first rendered and
//! cached in the session, not recomputed on every step.

/// Items per page.
pub const PAGE_SIZE: usize = 6;
/// Buttons per keyboard row.
pub const ROW_SIZE: usize = 2;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}

/// The slice for `page_index`, clipped to bounds. Out-of-range indexes give
/// an empty slice; wraparound is the caller's job.
pub fn page<T>(items: &[T], page_index: usize, page_size: usize) -> &[T] {
    let start = page_index.saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

pub fn next_page(current: usize, last_page: usize) -> usize {
    if current >= last_page { 0 } else { current + 1 }
}

pub fn prev_page(current: usize, last_page: usize) -> usize {
    if current == 0 { last_page } else { current - 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(6, PAGE_SIZE), 1);
        assert_eq!(total_pages(7, PAGE_SIZE), 2);
        assert_eq!(total_pages(13, PAGE_SIZE), 3);
    }

    #[test]
    fn page_slices_and_clips() {
        let items: Vec<usize> = (0..13).collect();
        assert_eq!(page(&items, 0, PAGE_SIZE), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(page(&items, 2, PAGE_SIZE), &[12]);
        assert!(page(&items, 3, PAGE_SIZE).is_empty());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        // 13 items over 3 pages, last index 2
        let last = total_pages(13, PAGE_SIZE) - 1;
        assert_eq!(next_page(0, last), 1);
        assert_eq!(next_page(last, last), 0);
        assert_eq!(prev_page(0, last), last);
        assert_eq!(prev_page(2, last), 1);
    }

    #[test]
    fn single_page_navigation_stays_put() {
        assert_eq!(next_page(0, 0), 0);
        assert_eq!(prev_page(0, 0), 0);
    }
}
