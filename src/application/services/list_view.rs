//! Filter, sort, and paginate the raw user collection.
//!
//! Pure and synchronous; recomputed whenever the raw collection or the
//! view parameters change.

use crate::domain::entities::{UserRecord, ViewParams};

/// One rendered page of the user table plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    /// Records visible on the current page.
    pub records: Vec<UserRecord>,
    /// Number of records surviving the filter step.
    pub filtered_count: usize,
    /// `ceil(filtered_count / page_size)`; 0 when nothing matches.
    pub total_pages: usize,
}

/// Runs the filter -> sort -> paginate pipeline.
#[derive(Debug, Default)]
pub struct ListViewPipeline;

impl ListViewPipeline {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the visible slice for `params` over `records`.
    ///
    /// Filtering keeps records whose username contains the query
    /// (case-insensitive) and whose active flag passes the status filter.
    /// Sorting is a stable partition: prefix matches ahead of mere
    /// containment, input order preserved inside each partition. The page
    /// slice is taken as-is from `params.page`; out-of-range pages yield an
    /// empty slice (direct page selection is validated by the caller,
    /// next/previous are clamped via [`Self::next_page`] and
    /// [`Self::previous_page`]).
    #[must_use]
    pub fn compute(&self, records: &[UserRecord], params: &ViewParams) -> ListPage {
        let query = params.username_query.to_lowercase();

        let filtered: Vec<&UserRecord> = records
            .iter()
            .filter(|user| {
                user.username().to_lowercase().contains(&query)
                    && params.status_filter.accepts(user.is_active())
            })
            .collect();

        let filtered_count = filtered.len();
        let total_pages = filtered_count.div_ceil(params.page_size);

        let (mut prefixed, containing): (Vec<&UserRecord>, Vec<&UserRecord>) = filtered
            .into_iter()
            .partition(|user| user.username().to_lowercase().starts_with(&query));
        prefixed.extend(containing);

        let start = (params.page.saturating_sub(1)) * params.page_size;
        let records = prefixed
            .into_iter()
            .skip(start)
            .take(params.page_size)
            .cloned()
            .collect();

        ListPage {
            records,
            filtered_count,
            total_pages,
        }
    }

    /// The page number after moving forward, clamped to the last page.
    #[must_use]
    pub fn next_page(&self, page: usize, total_pages: usize) -> usize {
        if page < total_pages { page + 1 } else { total_pages.max(1) }
    }

    /// The page number after moving backward, clamped to the first page.
    #[must_use]
    pub fn previous_page(&self, page: usize) -> usize {
        if page > 1 { page - 1 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PAGE_SIZE, StatusFilter};
    use chrono::{DateTime, Utc};

    fn user(id: usize, username: &str, active: bool) -> UserRecord {
        UserRecord::new(
            id.to_string(),
            username,
            format!("User {id}"),
            DateTime::<Utc>::UNIX_EPOCH,
            active,
        )
    }

    fn params(query: &str, status: StatusFilter, page: usize) -> ViewParams {
        ViewParams {
            username_query: query.into(),
            status_filter: status,
            page,
            page_size: PAGE_SIZE,
        }
    }

    #[test]
    fn test_filter_by_query_and_status() {
        let records = vec![
            user(1, "anita", true),
            user(2, "brandt", true),
            user(3, "susan", false),
            user(4, "hana", true),
        ];
        let page = ListViewPipeline::new().compute(&records, &params("an", StatusFilter::Active, 1));

        let names: Vec<&str> = page.records.iter().map(UserRecord::username).collect();
        // susan contains "an" but is inactive; brandt has no "an".
        assert_eq!(names, ["anita", "hana"]);
    }

    #[test]
    fn test_prefix_matches_sort_first_preserving_input_order() {
        let records = vec![
            user(1, "susanna", true),
            user(2, "anita", true),
            user(3, "joanne", true),
            user(4, "andrei", true),
        ];
        let page = ListViewPipeline::new().compute(&records, &params("an", StatusFilter::All, 1));

        let names: Vec<&str> = page.records.iter().map(UserRecord::username).collect();
        // Partitioned, not alphabetized: prefix hits keep their relative
        // order, then the containment hits keep theirs.
        assert_eq!(names, ["anita", "andrei", "susanna", "joanne"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let records = vec![user(1, "Anita", true)];
        let page = ListViewPipeline::new().compute(&records, &params("an", StatusFilter::All, 1));
        assert_eq!(page.filtered_count, 1);
    }

    #[test]
    fn test_pagination_of_23_records() {
        let pipeline = ListViewPipeline::new();
        let records: Vec<UserRecord> = (1..=23)
            .map(|i| user(i, &format!("user{i:02}"), true))
            .collect();

        let first = pipeline.compute(&records, &params("", StatusFilter::All, 1));
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.filtered_count, 23);
        assert_eq!(first.records.len(), 10);

        let last = pipeline.compute(&records, &params("", StatusFilter::All, 3));
        assert_eq!(last.records.len(), 3);
        let names: Vec<&str> = last.records.iter().map(UserRecord::username).collect();
        assert_eq!(names, ["user21", "user22", "user23"]);
    }

    #[test]
    fn test_out_of_range_page_yields_empty_slice() {
        let records = vec![user(1, "solo", true)];
        let page = ListViewPipeline::new().compute(&records, &params("", StatusFilter::All, 9));
        assert!(page.records.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_empty_filter_result() {
        let records = vec![user(1, "solo", true)];
        let page = ListViewPipeline::new().compute(&records, &params("zzz", StatusFilter::All, 1));
        assert_eq!(page.total_pages, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_next_page_clamps_to_last() {
        let pipeline = ListViewPipeline::new();
        assert_eq!(pipeline.next_page(2, 3), 3);
        assert_eq!(pipeline.next_page(3, 3), 3);
        assert_eq!(pipeline.next_page(1, 0), 1);
    }

    #[test]
    fn test_previous_page_clamps_to_first() {
        let pipeline = ListViewPipeline::new();
        assert_eq!(pipeline.previous_page(2), 1);
        assert_eq!(pipeline.previous_page(1), 1);
    }
}
