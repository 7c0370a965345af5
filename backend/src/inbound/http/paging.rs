//! Shared query parameters and link assembly for the paged listings.
//!
//! The three entity families take identical `page`/`pageSize`/`search`/
//! `sortBy`/`sortDir` parameters; this module parses them once and rebuilds
//! the navigation links from the request.

use actix_web::HttpRequest;
use pagination::{LinkBuilder, PageLinks, PageRequest, PageResult, SortDir};
use serde::Deserialize;
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by every `/paged` listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number; non-positive values coerce to 1.
    pub page: Option<i64>,
    /// Page size; non-positive values coerce to 10.
    pub page_size: Option<i64>,
    /// Free-text filter.
    pub search: Option<String>,
    /// Sort field from the entity's allow-list.
    pub sort_by: Option<String>,
    /// `Asc` (case-insensitive) or anything else for descending.
    pub sort_dir: Option<String>,
}

impl PageParams {
    /// Coerced page/size request.
    pub fn request(&self) -> PageRequest {
        PageRequest::normalised(self.page.unwrap_or(0), self.page_size.unwrap_or(0))
    }

    /// Search term, with blank input treated as absent.
    pub fn search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }

    /// Sort direction, using the listing's own default when absent.
    pub fn direction_or(&self, default: SortDir) -> SortDir {
        self.sort_dir
            .as_deref()
            .map_or(default, |value| SortDir::parse(Some(value)))
    }
}

/// Assemble the navigation links for a produced page.
///
/// The endpoint URL is rebuilt from the request's connection info; when that
/// fails the links are omitted and the response still succeeds.
pub fn page_links<T>(req: &HttpRequest, params: &PageParams, result: &PageResult<T>) -> PageLinks {
    let connection = req.connection_info();
    let endpoint = format!(
        "{}://{}{}",
        connection.scheme(),
        connection.host(),
        req.path()
    );
    match LinkBuilder::parse(&endpoint) {
        Ok(builder) => builder
            .page_size(result.page_size())
            .param("search", params.search.as_deref())
            .param("sortBy", params.sort_by.as_deref())
            .param("sortDir", params.sort_dir.as_deref())
            .build(result.page(), result.total_pages()),
        Err(err) => {
            warn!(%err, endpoint, "skipping page links for unparseable endpoint");
            PageLinks::default()
        }
    }
}

/// OpenAPI shape of the paginated envelope.
#[derive(Debug, ToSchema)]
#[schema(title = "PagedResponse")]
pub struct PagedSchema {
    /// Items of the current page.
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<serde_json::Value>,
    /// Relation name to `{ "href": ... }` map.
    #[schema(value_type = Object)]
    pub links: serde_json::Value,
    /// Page metadata.
    pub page: PageMetaSchema,
}

/// OpenAPI shape of the page metadata block.
#[derive(Debug, ToSchema)]
#[schema(title = "PageMeta", rename_all = "camelCase")]
pub struct PageMetaSchema {
    /// Page size the slice was cut with.
    pub size: i64,
    /// Total matching items across all pages.
    pub total_elements: i64,
    /// Total page count, at least 1.
    pub total_pages: i64,
    /// Zero-based index of the current page.
    pub number: i64,
}
