//! Count-query avoidance
//!
//! When the fetched window is short, the total of the filtered set can be
//! derived from the window itself and the count query is skipped.

use std::future::Future;

use super::paging::{Page, PageRequest};
use crate::domain::DomainError;

/// The exact total when it follows from the window, `None` when a count
/// query is required
///
/// An empty window past offset zero proves nothing about the total (the
/// offset may overshoot), so it also requires counting.
pub fn known_total(content_len: usize, request: &PageRequest) -> Option<u64> {
    let len = content_len as u64;

    if len >= request.limit() {
        return None;
    }

    if request.offset() == 0 {
        return Some(len);
    }

    if len > 0 {
        return Some(request.offset() + len);
    }

    None
}

/// Assemble a page, invoking `count` only when the total is not known
pub async fn page_with_deferred_count<T, F, Fut>(
    content: Vec<T>,
    request: &PageRequest,
    count: F,
) -> Result<Page<T>, DomainError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<u64, DomainError>>,
{
    let total = match known_total(content.len(), request) {
        Some(total) => total,
        None => count().await?,
    };

    Ok(Page::new(content, request, total))
}
