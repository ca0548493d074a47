//! Fixed-size pagination.

use std::num::NonZeroUsize;

/// Split `items` into consecutive pages of at most `page_size` items.
///
/// Order is preserved and every item lands on exactly one page. Only the last
/// page can be short; an empty input yields no pages.
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize) -> Vec<&[T]> {
    items.chunks(page_size.get()).collect()
}

/// Number of pages `paginate` produces for `len` items.
pub fn page_count(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}
