//! Cursor-driven page accumulation.

use super::sui::SuiClient;
use crate::builders::{Builder, Cursored};
use crate::error::Error;
use crate::types::Page;

/// Ceiling on page fetches for one listing.
pub const MAX_PAGE_FETCHES: usize = 1_000;

/// When a listing has no more pages.
///
/// The two endpoints signal the end differently: coin listings are read
/// until the cursor disappears, object listings stop as soon as either the
/// cursor is missing or `hasNextPage` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStop {
    /// Continue while `next_cursor` is present.
    CursorOnly,
    /// Continue while `next_cursor` is present and `has_next_page` is true.
    CursorOrFlag,
}

impl PageStop {
    fn has_more<T, C>(self, page: &Page<T, C>) -> bool {
        match self {
            PageStop::CursorOnly => page.next_cursor.is_some(),
            PageStop::CursorOrFlag => page.next_cursor.is_some() && page.has_next_page,
        }
    }
}

/// Follow cursors from `first` until `stop` says the listing is complete.
///
/// `fetch` receives the previous page's cursor. The returned page holds
/// every item in fetch order. It is terminal unless `max_pages` pages were
/// fetched first; then it keeps the last cursor with `has_next_page` set so
/// the caller can resume.
///
/// # Errors
///
/// Propagates the first `fetch` failure.
pub fn accumulate_pages<T, C, F>(
    first: Page<T, C>,
    stop: PageStop,
    max_pages: usize,
    mut fetch: F,
) -> Result<Page<T, C>, Error>
where
    F: FnMut(C) -> Result<Page<T, C>, Error>,
{
    let mut pages = 1;
    let mut data = Vec::new();
    let mut current = first;

    while stop.has_more(&current) {
        if pages >= max_pages {
            data.append(&mut current.data);
            tracing::warn!(pages, items = data.len(), ?stop, "page ceiling reached");
            return Ok(Page {
                data,
                next_cursor: current.next_cursor,
                has_next_page: true,
            });
        }
        let Some(cursor) = current.next_cursor.take() else {
            break;
        };
        data.append(&mut current.data);
        current = fetch(cursor)?;
        pages += 1;
    }

    data.append(&mut current.data);
    tracing::debug!(pages, items = data.len(), "listing complete");
    Ok(Page::complete(data))
}

impl SuiClient {
    /// Run a cursored builder, following cursors when `fetch_all` is set.
    pub(crate) fn collect_pages<B, T, C>(
        &self,
        mut builder: B,
        stop: PageStop,
        fetch_all: bool,
    ) -> Result<Page<T, C>, Error>
    where
        B: Cursored<Cursor = C> + Builder<Output = Page<T, C>>,
    {
        let first = self.submit(&builder)?;
        if !fetch_all {
            return Ok(first);
        }
        accumulate_pages(first, stop, MAX_PAGE_FETCHES, |cursor| {
            builder.set_cursor(Some(cursor));
            self.submit(&builder)
        })
    }
}
