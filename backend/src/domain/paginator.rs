//! Lazy traversal of every page of a paginated query.
//!
//! Bulk maintenance services use [`all_pages`] to walk a result set without
//! knowing its size up front. The walk starts at the supplied request and
//! follows [`Pagination::next_request`](pagination::Pagination::next_request)
//! until the last page.

use std::future::Future;

use futures_util::stream::{self, Stream, TryStreamExt};
use pagination::{Page, PageRequest};

/// Stream every page of a query, starting at `first`.
///
/// `fetch` is invoked once per page, only when the stream is polled. The
/// stream ends after the last page or right after the first error.
///
/// # Examples
/// ```
/// use futures_util::TryStreamExt;
/// use pagination::{Page, PageRequest, Pagination};
/// use basket::domain::paginator::all_pages;
///
/// # tokio_test_block_on(async {
/// let rows: Vec<u32> = (1..=5).collect();
/// let first = PageRequest::first(2).expect("valid page size");
/// let pages: Vec<Page<u32>> = all_pages(first, |request| {
///     let rows = rows.clone();
///     async move {
///         let start = usize::try_from(request.offset()).unwrap_or(usize::MAX);
///         let items = rows.iter().skip(start).take(2).copied().collect();
///         Ok::<_, ()>(Page::new(items, Pagination::new(request, 5)))
///     }
/// })
/// .try_collect()
/// .await
/// .expect("in-memory fetch cannot fail");
/// assert_eq!(pages.len(), 3);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(f)
/// # }
/// ```
pub fn all_pages<T, E, F, Fut>(
    first: PageRequest,
    fetch: F,
) -> impl Stream<Item = Result<Page<T>, E>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    stream::unfold(Some((first, fetch)), |state| async move {
        let (request, mut fetch) = state?;
        match fetch(request).await {
            Ok(page) => {
                let next = page
                    .pagination()
                    .next_request()
                    .map(|next_request| (next_request, fetch));
                Some((Ok(page), next))
            }
            Err(error) => Some((Err(error), None)),
        }
    })
}

/// Drain [`all_pages`] into a single list of items.
///
/// # Errors
/// Returns the first error raised by `fetch`.
pub async fn collect_all<T, E, F, Fut>(first: PageRequest, fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    all_pages(first, fetch)
        .try_fold(Vec::new(), |mut items, page| async move {
            items.extend(page.into_items());
            Ok(items)
        })
        .await
}
