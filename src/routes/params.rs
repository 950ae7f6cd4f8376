use serde::Deserialize;
use utoipa::ToSchema;

/// Free-text search over a derived view; matching is case-insensitive
/// substring, and what it matches against depends on the resource.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub q: Option<String>,
}
