//! GraphQL filter input types shared by list queries

use async_graphql::Enum;

/// Order direction for sorting
#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    /// Ascending order (A-Z, 1-9, oldest-newest)
    Asc,
    /// Descending order (Z-A, 9-1, newest-oldest)
    #[default]
    Desc,
}

impl OrderDirection {
    /// Convert to SQL order string
    pub fn to_sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// Normalise a free-text search argument; blank input means "no filter".
pub fn search_term(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
