//! Query-string builder for `/gen/v1/<resource>` list endpoints.

use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Map a table widget's numeric sort order: `1` is ascending, anything else descending.
    #[must_use]
    pub fn from_table_order(value: i8) -> Self {
        if value == 1 { Self::Asc } else { Self::Desc }
    }
}

/// Accumulates list parameters in insertion order.
///
/// ```
/// use backoffice::net::query::{QueryBuilder, SortOrder};
///
/// let query = QueryBuilder::new()
///     .with_pagination(1, 10)
///     .with_sort("email", SortOrder::Asc)
///     .build();
/// assert_eq!(query, "page=1&limit=10&sortBy=email&sortOperator=asc");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, filter_by: &str, filter_operator: &str, filter_value: impl ToString) -> Self {
        self.push("filterBy", filter_by);
        self.push("filterOperator", filter_operator);
        self.push("filterValue", &filter_value.to_string());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_by: &str, order: SortOrder) -> Self {
        self.push("sortBy", sort_by);
        self.push("sortOperator", order.as_str());
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.push("search", search);
        self
    }

    #[must_use]
    pub fn with_pagination(mut self, page: u32, limit: u32) -> Self {
        self.push("page", &page.to_string());
        self.push("limit", &limit.to_string());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// URL-encoded query string without the leading `?`.
    #[must_use]
    pub fn build(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    fn push(&mut self, key: &str, value: &str) {
        self.params.push((key.to_owned(), value.to_owned()));
    }
}

/// Join a resource path and an optional query string.
#[must_use]
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() { path.to_owned() } else { format!("{path}?{query}") }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
