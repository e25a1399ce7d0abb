//! Sequential page numbering with a fixed inter-page delay.
//!
//! Every pagination stream (facet discovery, one facet's product fetch)
//! owns its own [`PageWalker`]. The delay is a self-throttling measure
//! against upstream blocking; concurrent streams are not coordinated.

use std::time::Duration;

/// Page-number source for one sequential pagination stream.
///
/// Pages are 1-based. The first call to [`PageWalker::next_page`] returns
/// immediately; every later call sleeps `delay` first. Returns `None` once
/// `max_pages` pages have been handed out.
#[derive(Debug)]
pub struct PageWalker {
    next: u32,
    max_pages: u32,
    delay: Duration,
}

impl PageWalker {
    #[must_use]
    pub fn new(max_pages: u32, delay: Duration) -> Self {
        Self {
            next: 1,
            max_pages,
            delay,
        }
    }

    pub async fn next_page(&mut self) -> Option<u32> {
        if self.next > self.max_pages {
            return None;
        }
        if self.next > 1 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let page = self.next;
        self.next += 1;
        Some(page)
    }

    /// Number of pages handed out so far.
    #[must_use]
    pub fn pages_issued(&self) -> u32 {
        self.next - 1
    }
}
