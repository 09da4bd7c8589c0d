//! In-memory repository adapters.
//!
//! Every table lives behind a `tokio::sync::RwLock` and is paginated with
//! the same offset/limit arithmetic a SQL adapter would push into
//! `LIMIT`/`OFFSET`. The adapters back the maintenance binary and the
//! integration tests.

mod catalogue;
mod groups;
mod lists;
mod notifications;
mod shares;
mod users;

use pagination::{Page, PageRequest, Pagination};

pub use self::catalogue::{MemoryProductRepository, MemoryShopRepository};
pub use self::groups::MemoryGroupRepository;
pub use self::lists::{MemoryListOrdersRepository, MemoryOrderRepository};
pub use self::notifications::MemoryNotificationRepository;
pub use self::shares::MemoryShareRepository;
pub use self::users::MemoryUserRepository;

/// Cut the page `request` out of the full, already ordered, result set.
pub(crate) fn paginate<T>(rows: Vec<T>, request: PageRequest) -> Page<T> {
    let total = u64::try_from(rows.len()).unwrap_or(u64::MAX);
    let start = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    let items = rows.into_iter().skip(start).take(limit).collect();
    Page::new(items, Pagination::new(request, total))
}

/// Case-insensitive prefix match used by name filters.
pub(crate) fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.to_lowercase().starts_with(&prefix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::first(1, vec![1, 2, 3])]
    #[case::last(3, vec![7])]
    #[case::past_the_end(4, vec![])]
    fn paginate_slices_rows(#[case] page: u32, #[case] expected: Vec<u32>) {
        let request = PageRequest::new(page, 3).expect("valid request");
        let page = paginate((1..=7).collect(), request);
        assert_eq!(page.items(), expected.as_slice());
        assert_eq!(page.pagination().items_total(), 7);
        assert_eq!(page.pagination().pages_total(), 3);
    }

    #[rstest]
    #[case("Bread", "bre", true)]
    #[case("bread", "BR", true)]
    #[case("Oat milk", "milk", false)]
    fn prefix_filter_ignores_case(
        #[case] value: &str,
        #[case] prefix: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(starts_with_ignore_case(value, prefix), expected);
    }
}
