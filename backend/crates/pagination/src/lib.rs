//! Pagination primitives shared by the Motoyard backend endpoints.
//!
//! The crate owns the arithmetic and envelope shapes that every paginated
//! listing uses: request coercion ([`PageRequest`]), sort direction parsing
//! ([`SortDir`]), the counted page container ([`PageResult`]), the response
//! metadata block ([`PageMeta`]), and HATEOAS navigation link assembly
//! ([`LinkBuilder`], [`PageLinks`]).
//!
//! Repositories produce a [`PageResult`]; HTTP adapters wrap it into a
//! [`Paged`] envelope together with the links for the current request.

mod links;
mod page;
mod sort;

pub use links::{Link, LinkBuilder, PageLinks, PageLinksError, Paged};
pub use page::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageMeta, PageRequest, PageResult, clamp_page, total_pages,
};
pub use sort::SortDir;
