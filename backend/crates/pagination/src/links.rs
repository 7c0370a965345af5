//! HATEOAS navigation link assembly and the paged response envelope.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use crate::page::{PageMeta, PageResult};

/// A single hypermedia reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Absolute URL of the referenced page.
    pub href: String,
}

/// Relation → link map for a paginated response.
///
/// `self`, `first`, and `last` are always present once assembly succeeds;
/// `prev` appears only when the current page is past the first, `next` only
/// when pages remain. Serialises as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageLinks(BTreeMap<&'static str, Link>);

impl PageLinks {
    /// Look up a link by relation name.
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel)
    }

    /// Whether a relation is present.
    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }

    fn insert(&mut self, rel: &'static str, href: String) {
        self.0.insert(rel, Link { href });
    }
}

/// Failures while interpreting the request URL for link assembly.
///
/// Callers are expected to degrade by omitting links rather than failing the
/// request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageLinksError {
    /// The endpoint URL could not be parsed.
    #[error("cannot build page links from endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Builds navigation links for one paged endpoint.
///
/// The builder keeps the endpoint URL plus the non-page query parameters
/// (search, sort field, sort direction) and re-renders `page`/`pageSize` for
/// each relation target.
///
/// # Examples
/// ```
/// use pagination::LinkBuilder;
///
/// let links = LinkBuilder::parse("http://localhost:8080/api/v1/motorcycles/paged")
///     .expect("absolute endpoint URL")
///     .page_size(10)
///     .param("sortBy", Some("year"))
///     .build(2, 2);
/// assert!(links.contains("prev"));
/// assert!(!links.contains("next"));
/// ```
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    endpoint: Url,
    page_size: i64,
    params: Vec<(String, String)>,
}

impl LinkBuilder {
    /// Parse the endpoint URL the links will point at.
    pub fn parse(endpoint: &str) -> Result<Self, PageLinksError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            page_size: crate::page::DEFAULT_PAGE_SIZE,
            params: Vec::new(),
        })
    }

    /// Page size rendered into every link.
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Append a query parameter when a value is present.
    pub fn param(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.params.push((name.to_owned(), value.to_owned()));
        }
        self
    }

    /// Assemble the relation map for the clamped current page.
    pub fn build(&self, page: i64, total_pages: i64) -> PageLinks {
        let mut links = PageLinks::default();
        links.insert("self", self.href(page));
        links.insert("first", self.href(1));
        if page > 1 {
            links.insert("prev", self.href(page - 1));
        }
        if page < total_pages {
            links.insert("next", self.href(page + 1));
        }
        links.insert("last", self.href(total_pages));
        links
    }

    fn href(&self, page: i64) -> String {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("pageSize", &self.page_size.to_string());
            for (name, value) in &self.params {
                pairs.append_pair(name, value);
            }
        }
        url.into()
    }
}

/// The paginated response envelope: items, navigation links, page metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paged<T> {
    /// Items of the current page.
    pub items: Vec<T>,
    /// Navigation links for this listing.
    pub links: PageLinks,
    /// Page metadata (zero-based `number`).
    pub page: PageMeta,
}

impl<T> Paged<T> {
    /// Wrap a repository page and its assembled links into the wire envelope.
    pub fn new(result: PageResult<T>, links: PageLinks) -> Self {
        let page = PageMeta::from(&result);
        Self {
            items: result.into_items(),
            links,
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageRequest;
    use rstest::rstest;

    fn builder() -> LinkBuilder {
        LinkBuilder::parse("http://localhost:8080/api/v1/motorcycles/paged")
            .expect("endpoint URL parses")
            .page_size(10)
    }

    #[rstest]
    fn first_page_omits_prev() {
        let links = builder().build(1, 3);

        assert!(links.contains("self"));
        assert!(links.contains("first"));
        assert!(links.contains("next"));
        assert!(links.contains("last"));
        assert!(!links.contains("prev"));
    }

    #[rstest]
    fn last_page_omits_next() {
        let links = builder().build(2, 2);

        assert!(links.contains("prev"));
        assert!(!links.contains("next"));
    }

    #[rstest]
    fn middle_page_links_both_neighbours() {
        let links = builder().build(2, 3);

        assert_eq!(
            links.get("prev").map(|l| l.href.as_str()),
            Some("http://localhost:8080/api/v1/motorcycles/paged?page=1&pageSize=10")
        );
        assert_eq!(
            links.get("next").map(|l| l.href.as_str()),
            Some("http://localhost:8080/api/v1/motorcycles/paged?page=3&pageSize=10")
        );
    }

    #[rstest]
    fn single_page_has_neither_neighbour() {
        let links = builder().build(1, 1);

        assert!(links.contains("self"));
        assert!(links.contains("first"));
        assert!(links.contains("last"));
        assert!(!links.contains("prev"));
        assert!(!links.contains("next"));
    }

    #[rstest]
    fn hrefs_carry_search_and_sort_parameters() {
        let links = builder()
            .param("search", Some("honda"))
            .param("sortBy", Some("year"))
            .param("sortDir", None)
            .build(1, 1);

        let href = &links.get("self").expect("self link").href;
        assert!(href.contains("search=honda"));
        assert!(href.contains("sortBy=year"));
        assert!(!href.contains("sortDir"));
    }

    #[rstest]
    fn relative_endpoint_is_rejected() {
        let err = LinkBuilder::parse("/api/v1/motorcycles/paged");
        assert!(matches!(err, Err(PageLinksError::InvalidEndpoint(_))));
    }

    #[rstest]
    fn envelope_serialises_items_links_and_page() {
        let result = PageResult::new(vec!["a", "b"], 15, PageRequest::normalised(2, 10));
        let envelope = Paged::new(result, builder().build(2, 2));
        let json = serde_json::to_value(&envelope).expect("envelope serialises");

        assert_eq!(json["items"], serde_json::json!(["a", "b"]));
        assert_eq!(json["page"]["totalElements"], 15);
        assert_eq!(json["page"]["number"], 1);
        assert!(json["links"]["prev"]["href"].is_string());
        assert!(json["links"].get("next").is_none());
    }
}
