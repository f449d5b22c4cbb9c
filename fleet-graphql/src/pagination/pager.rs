use async_trait::async_trait;
use serde::Deserialize;

use super::{Page, PageRequest};
use crate::error::Result;

/// Counts the rows matching a filter
#[async_trait]
pub trait Counter<F>: Send + Sync {
    /// Returns the number of rows matching the filter
    async fn count(&self, filter: &F) -> Result<u64>;
}

/// Fetches an ordered slice of the rows matching a filter
#[async_trait]
pub trait Fetcher<F, S>: Send + Sync {
    /// The type of the fetched rows
    type Node: Send;

    /// Returns at most `limit` rows (all when missing) matching the filter, skipping the first `offset` ones.
    ///
    /// The order must be deterministic for the same filter and sort.
    async fn fetch(&self, filter: &F, sort: &S, offset: u64, limit: Option<u64>) -> Result<Vec<Self::Node>>;
}

/// A source of connections, able to both count and fetch rows
pub trait ConnectionSource<F, S>: Counter<F> + Fetcher<F, S> {}
impl<T, F, S> ConnectionSource<F, S> for T where T: Counter<F> + Fetcher<F, S> + ?Sized {}

/// Pagination settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the client doesn't provide one, all rows are returned when missing
    #[serde(alias = "defaultpagesize")]
    pub default_page_size: Option<u64>,
    /// Maximum page size allowed
    #[serde(alias = "maxpagesize")]
    pub max_page_size: Option<u64>,
}

impl PaginationConfig {
    /// Checks the default page size doesn't exceed the maximum one
    pub fn validate(&self) -> anyhow::Result<()> {
        if let (Some(default), Some(max)) = (self.default_page_size, self.max_page_size) {
            anyhow::ensure!(
                default <= max,
                "The default page size ({default}) can't exceed the max page size ({max})"
            );
        }
        Ok(())
    }
}

/// Builds [Page]s out of a [ConnectionSource]
#[derive(Debug, Clone, Default)]
pub struct ConnectionPager {
    config: PaginationConfig,
}

impl ConnectionPager {
    /// Creates a new [ConnectionPager], failing if the config is inconsistent
    pub fn new(config: PaginationConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Decodes the raw `first` and `after` arguments of a list query into a [PageRequest]
    pub fn request(&self, first: Option<i32>, after: Option<String>) -> Result<PageRequest> {
        PageRequest::decode(
            first.map(i64::from),
            after,
            self.config.default_page_size,
            self.config.max_page_size,
        )
    }

    /// Retrieves the requested page of rows matching the filter, sorted by the given order.
    ///
    /// The total count and the slice are queried concurrently, the filter and sort must be the same for both so the
    /// page is consistent.
    pub async fn paginate<St, F, S>(
        &self,
        source: &St,
        request: &PageRequest,
        filter: &F,
        sort: &S,
    ) -> Result<Page<St::Node>>
    where
        St: Counter<F> + Fetcher<F, S> + ?Sized,
        F: Sync,
        S: Sync,
    {
        let offset = request.offset()?;
        tracing::trace!("Fetching page at offset {offset} (first: {:?})", request.first);

        let (total_count, items) =
            tokio::try_join!(source.count(filter), source.fetch(filter, sort, offset, request.first))?;

        tracing::trace!("Fetched {} rows out of {total_count}", items.len());
        Ok(Page::paginate(total_count, items, offset, request.first))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use base64::{prelude::BASE64_URL_SAFE_NO_PAD, Engine};
    use tokio::{sync::Notify, time::timeout};

    use super::*;
    use crate::{
        err,
        error::GenericErrorCode,
        pagination::Cursor,
    };

    /// Rows are the numbers in `0..len`, the filter keeps those divisible by it
    struct Numbers {
        len: u64,
        calls: AtomicUsize,
    }

    impl Numbers {
        fn new(len: u64) -> Self {
            Self {
                len,
                calls: AtomicUsize::new(0),
            }
        }

        fn matching(&self, divisor: &u64) -> impl Iterator<Item = u64> + '_ {
            let divisor = *divisor;
            (0..self.len).filter(move |n| n % divisor == 0)
        }
    }

    #[async_trait]
    impl Counter<u64> for Numbers {
        async fn count(&self, filter: &u64) -> Result<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.matching(filter).count() as u64)
        }
    }

    #[async_trait]
    impl Fetcher<u64, ()> for Numbers {
        type Node = u64;

        async fn fetch(&self, filter: &u64, _sort: &(), offset: u64, limit: Option<u64>) -> Result<Vec<u64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .matching(filter)
                .skip(offset as usize)
                .take(limit.map_or(usize::MAX, |l| l as usize))
                .collect())
        }
    }

    struct Unavailable;

    #[async_trait]
    impl Counter<u64> for Unavailable {
        async fn count(&self, _filter: &u64) -> Result<u64> {
            Err(err!(GenericErrorCode::InternalServerError, "Store is down"))
        }
    }

    #[async_trait]
    impl Fetcher<u64, ()> for Unavailable {
        type Node = u64;

        async fn fetch(&self, _filter: &u64, _sort: &(), _offset: u64, _limit: Option<u64>) -> Result<Vec<u64>> {
            Ok(Vec::new())
        }
    }

    /// Count and fetch each wait for the other one to start, they only complete when awaited concurrently
    #[derive(Default)]
    struct Rendezvous {
        counting: Notify,
        fetching: Notify,
    }

    #[async_trait]
    impl Counter<u64> for Rendezvous {
        async fn count(&self, _filter: &u64) -> Result<u64> {
            self.counting.notify_one();
            self.fetching.notified().await;
            Ok(3)
        }
    }

    #[async_trait]
    impl Fetcher<u64, ()> for Rendezvous {
        type Node = u64;

        async fn fetch(&self, _filter: &u64, _sort: &(), offset: u64, limit: Option<u64>) -> Result<Vec<u64>> {
            self.fetching.notify_one();
            self.counting.notified().await;
            Ok((offset..3).take(limit.map_or(usize::MAX, |l| l as usize)).collect())
        }
    }

    #[tokio::test]
    async fn test_count_and_fetch_run_concurrently() {
        let pager = ConnectionPager::default();
        let source = Rendezvous::default();

        let page = timeout(
            Duration::from_secs(5),
            pager.paginate(&source, &PageRequest::new(Some(2), None), &1u64, &()),
        )
        .await
        .expect("count and fetch didn't run concurrently")
        .unwrap();

        assert_eq!(page.total_count, 3);
        assert!(page.page_info.has_next_page);
        assert_eq!(page.into_iter().map(|e| e.node).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_paginate_forward() {
        let pager = ConnectionPager::default();
        let source = Numbers::new(10);

        let request = pager.request(Some(3), None).unwrap();
        let page = pager.paginate(&source, &request, &1u64, &()).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(page.total_count, 10);
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);
        let end_cursor = page.page_info.end_cursor.unwrap();
        assert_eq!(page.into_iter().map(|e| e.node).collect::<Vec<_>>(), vec![0, 1, 2]);

        let request = pager.request(Some(5), Some(end_cursor.encode())).unwrap();
        let page = pager.paginate(&source, &request, &1u64, &()).await.unwrap();

        assert!(page.page_info.has_next_page);
        assert!(page.page_info.has_previous_page);
        assert_eq!(page.into_iter().map(|e| e.node).collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_paginate_filtered() {
        let pager = ConnectionPager::default();
        let source = Numbers::new(10);

        let request = PageRequest::new(Some(2), Some(Cursor::new(1)));
        let page = pager.paginate(&source, &request, &3u64, &()).await.unwrap();

        // 0, 3, 6, 9
        assert_eq!(page.total_count, 4);
        assert!(!page.page_info.has_next_page);
        assert_eq!(page.page_info.start_cursor, Some(Cursor::new(2)));
        assert_eq!(page.into_iter().map(|e| e.node).collect::<Vec<_>>(), vec![6, 9]);
    }

    #[tokio::test]
    async fn test_paginate_with_defaults() {
        let pager = ConnectionPager::new(PaginationConfig {
            default_page_size: Some(4),
            max_page_size: Some(5),
        })
        .unwrap();
        let source = Numbers::new(10);

        let request = pager.request(None, None).unwrap();
        let page = pager.paginate(&source, &request, &1u64, &()).await.unwrap();
        assert_eq!(page.edges.len(), 4);

        let err = pager.request(Some(6), None).unwrap_err();
        assert_eq!(err.info().code(), "PageExceedsLimit");
    }

    #[test]
    fn test_default_page_size_above_max() {
        let err = ConnectionPager::new(PaginationConfig {
            default_page_size: Some(50),
            max_page_size: Some(20),
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The default page size (50) can't exceed the max page size (20)"
        );

        for (default_page_size, max_page_size) in [(Some(20), Some(20)), (Some(500), None), (None, Some(20))] {
            assert!(ConnectionPager::new(PaginationConfig {
                default_page_size,
                max_page_size,
            })
            .is_ok());
        }
    }

    #[tokio::test]
    async fn test_invalid_cursor_is_rejected() {
        let pager = ConnectionPager::default();

        let err = pager
            .request(Some(5), Some(BASE64_URL_SAFE_NO_PAD.encode("-1")))
            .unwrap_err();

        assert_eq!(err.info().code(), "PageInvalidCursor");
        assert_eq!(err.info().status(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_source_errors_are_propagated() {
        let pager = ConnectionPager::default();

        let err = pager
            .paginate(&Unavailable, &PageRequest::default(), &1u64, &())
            .await
            .unwrap_err();

        assert!(err.is_unexpected());
        assert_eq!(err.reason(), Some("Store is down"));
    }
}
