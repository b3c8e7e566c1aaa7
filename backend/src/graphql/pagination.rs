//! Page-number pagination for GraphQL list queries
//!
//! Every list query takes `page` (1-based, default 1) and `pageSize`
//! (default 10) and answers with a `{nodes, pageInfo}` envelope.
//!
//! Usage: Use the `define_page!` macro to create type-specific envelopes.

use async_graphql::SimpleObject;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::errors::ApiError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        match err {
            PaginationError::InvalidArgument("page") => {
                ApiError::bad_request("El número de página debe ser mayor o igual a 1")
            }
            PaginationError::InvalidArgument("range") => {
                ApiError::bad_request("La página solicitada está fuera de rango")
            }
            PaginationError::InvalidArgument(_) => {
                ApiError::bad_request("El tamaño de página debe ser mayor o igual a 1")
            }
        }
    }
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::InvalidArgument("page"));
        }
        if page_size < 1 {
            return Err(PaginationError::InvalidArgument("pageSize"));
        }
        // the whole window, last row included, must fit in an i64
        (page - 1)
            .checked_mul(page_size)
            .and_then(|offset| offset.checked_add(page_size))
            .ok_or(PaginationError::InvalidArgument("range"))?;
        Ok(Self { page, page_size })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// Page info for `items` fetched with this request
    pub fn page_info<T>(&self, items: &[T], total_count: i64) -> PageInfo {
        let total_count = total_count.max(0);
        let total_pages =
            total_count / self.page_size + i64::from(total_count % self.page_size != 0);

        let has_next_page = self.page < total_pages;
        let has_previous_page = total_count > 0 && self.page > 1;

        let offset = self.offset();
        let (start_cursor, end_cursor) = if items.is_empty() {
            (None, None)
        } else {
            (
                Some(encode_cursor(offset)),
                Some(encode_cursor(offset + items.len() as i64 - 1)),
            )
        };

        PageInfo {
            total_count,
            total_pages,
            current_page: self.page,
            page_size: self.page_size,
            has_next_page,
            has_previous_page,
            start_cursor,
            end_cursor,
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Storage-level window for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParams {
    pub offset: i64,
    pub limit: i64,
}

/// Convert a page number and size into an offset/limit pair.
pub fn to_query_params(page: i64, page_size: i64) -> Result<QueryParams, PaginationError> {
    let request = PageRequest::new(page, page_size)?;
    Ok(QueryParams {
        offset: request.offset(),
        limit: request.limit(),
    })
}

/// Pagination metadata returned next to every list of nodes
#[derive(SimpleObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Rows matching the filter across all pages
    pub total_count: i64,
    /// `ceil(totalCount / pageSize)`; 0 when there are no rows
    pub total_pages: i64,
    /// The requested page (1-based)
    pub current_page: i64,
    /// The requested page size
    pub page_size: i64,
    /// Is there a page after this one?
    pub has_next_page: bool,
    /// Is there a page before this one?
    pub has_previous_page: bool,
    /// Cursor of the first node on this page
    pub start_cursor: Option<String>,
    /// Cursor of the last node on this page
    pub end_cursor: Option<String>,
}

/// Build page info from the nodes of a page and the total row count.
///
/// Does not touch storage; `total_count` must come from a count over the
/// same filter as the page query.
pub fn to_page_info<T>(
    items: &[T],
    total_count: i64,
    page: i64,
    page_size: i64,
) -> Result<PageInfo, PaginationError> {
    Ok(PageRequest::new(page, page_size)?.page_info(items, total_count))
}

/// A page of nodes (internal use)
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Build a page from fetched rows and the matching total
    pub fn new(nodes: Vec<T>, total_count: i64, request: PageRequest) -> Self {
        let page_info = request.page_info(&nodes, total_count);
        Self { nodes, page_info }
    }

    /// Convert every node, keeping page info
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            nodes: self.nodes.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}

/// Macro to define a GraphQL page envelope for a specific entity
///
/// Usage:
/// ```ignore
/// define_page!(ProductPage, Product);
/// ```
#[macro_export]
macro_rules! define_page {
    ($page_name:ident, $node_type:ty) => {
        /// Page of nodes with pagination info
        #[derive(async_graphql::SimpleObject, Debug, Clone)]
        pub struct $page_name {
            /// The nodes on this page
            pub nodes: Vec<$node_type>,
            /// Pagination information
            pub page_info: $crate::graphql::pagination::PageInfo,
        }

        impl $page_name {
            /// Create from a generic Page, converting each record
            pub fn from_page<R>(page: $crate::graphql::pagination::Page<R>) -> Self
            where
                $node_type: From<R>,
            {
                let page = page.map(<$node_type>::from);
                Self {
                    nodes: page.nodes,
                    page_info: page.page_info,
                }
            }
        }
    };
}

/// Encode an offset as a cursor string
pub fn encode_cursor(offset: i64) -> String {
    BASE64.encode(format!("cursor:{}", offset))
}

/// Decode a cursor string to an offset
pub fn decode_cursor(cursor: &str) -> Result<i64, &'static str> {
    let decoded = BASE64.decode(cursor).map_err(|_| "invalid cursor format")?;

    let s = String::from_utf8(decoded).map_err(|_| "invalid cursor encoding")?;

    s.strip_prefix("cursor:")
        .ok_or("invalid cursor prefix")?
        .parse()
        .map_err(|_| "invalid cursor value")
}
