#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};

mod path;

pub use path::{content_url, has_scheme, is_internal_href, normalize_path, same_page, trim_trailing_slash};

/// Monotonic ticket counter. Each content load takes a ticket; only the
/// holder of the latest ticket may write to the page.
#[derive(Debug, Default)]
pub struct Sequence {
    counter: AtomicUsize,
}

impl Sequence {
    pub const fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }

    pub fn next(&self) -> usize {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: usize) -> bool {
        self.current() == ticket
    }
}
