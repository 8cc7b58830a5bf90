//! Multi-page Aggregation
//!
//! Two ways of collecting a paginated listing into one sequence: page by page
//! when the page count is known up front, or fan-out after page 1 reports the
//! total.

use crate::api::Paginated;
use crate::error::Result;
use futures::stream::{FuturesUnordered, TryStreamExt};
use std::future::Future;
use tracing::debug;

/// Fetch pages `1..=pages` one after another, keeping page order
pub async fn sequential<P, F, Fut>(pages: u64, fetch: F) -> Result<Vec<P::Item>>
where
    P: Paginated,
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut items = Vec::new();
    for page in 1..=pages {
        items.extend(fetch(page).await?.into_items());
    }
    Ok(items)
}

/// Fetch page 1, then every remaining page concurrently
///
/// Items are appended as pages complete, so order across pages is not
/// stable between runs. The first failing page fails the whole aggregation
/// and the remaining in-flight pages are dropped.
pub async fn fan_out<P, F, Fut>(fetch: F) -> Result<Vec<P::Item>>
where
    P: Paginated,
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let first = fetch(1).await?;
    let pages = first.metadata().page_count();
    let expected = first.metadata().total as usize;
    debug!(pages, total = expected, "fanning out page requests");

    let mut items = Vec::with_capacity(expected.min(10_000));
    items.extend(first.into_items());

    let mut pending: FuturesUnordered<Fut> = (2..=pages).map(&fetch).collect();
    while let Some(page) = pending.try_next().await? {
        items.extend(page.into_items());
    }

    Ok(items)
}
