/// Number of pages needed for `count` items; never less than 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Items on 1-based `page`.
///
/// No clamping: page 0 or a page past the end yields an empty slice. Use
/// [`Navigation`] to move between valid pages.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page navigation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    First,
    Prev,
    Next,
    Last,
    /// Jump to a specific page, clamped into range.
    To(usize),
}

impl Navigation {
    /// Resulting page, always within `1..=total`.
    pub fn apply(self, page: usize, total: usize) -> usize {
        let total = total.max(1);
        let target = match self {
            Navigation::First => 1,
            Navigation::Prev => page.saturating_sub(1),
            Navigation::Next => page.saturating_add(1),
            Navigation::Last => total,
            Navigation::To(p) => p,
        };
        target.clamp(1, total)
    }

    /// Whether the action would change `page` (i.e. the button is enabled).
    pub fn is_available(self, page: usize, total: usize) -> bool {
        self.apply(page, total) != page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_has_floor_of_one() {
        assert_eq!(total_pages(0, 100), 1);
        assert_eq!(total_pages(1, 100), 1);
        assert_eq!(total_pages(100, 100), 1);
        assert_eq!(total_pages(101, 100), 2);
        assert_eq!(total_pages(250, 100), 3);
    }

    #[test]
    fn slices_full_and_partial_pages() {
        let items: Vec<usize> = (1..=250).collect();
        let p1 = page_slice(&items, 1, 100);
        assert_eq!(p1.len(), 100);
        assert_eq!((p1[0], p1[99]), (1, 100));

        let p3 = page_slice(&items, 3, 100);
        assert_eq!(p3.len(), 50);
        assert_eq!((p3[0], p3[49]), (201, 250));
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<usize> = (1..=10).collect();
        assert!(page_slice(&items, 0, 100).is_empty());
        assert!(page_slice(&items, 2, 100).is_empty());
        assert!(page_slice(&items, usize::MAX, 100).is_empty());
        assert!(page_slice::<usize>(&[], 1, 100).is_empty());
    }

    #[test]
    fn navigation_clamps() {
        assert_eq!(Navigation::Prev.apply(1, 3), 1);
        assert_eq!(Navigation::Next.apply(3, 3), 3);
        assert_eq!(Navigation::Next.apply(1, 3), 2);
        assert_eq!(Navigation::Last.apply(1, 3), 3);
        assert_eq!(Navigation::First.apply(3, 3), 1);
        assert_eq!(Navigation::To(9).apply(1, 3), 3);
        assert_eq!(Navigation::To(0).apply(2, 3), 1);
        assert_eq!(Navigation::Last.apply(1, 0), 1);
    }

    #[test]
    fn availability_mirrors_button_state() {
        assert!(!Navigation::First.is_available(1, 3));
        assert!(!Navigation::Prev.is_available(1, 3));
        assert!(Navigation::Next.is_available(1, 3));
        assert!(!Navigation::Last.is_available(3, 3));
    }
}
