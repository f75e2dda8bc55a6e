use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use hellowork_core::error::FieldError;

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Raw list-query parameters as they arrive on the wire: digit strings, each
/// optional. Absence means "use default".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJobsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Parsed pagination window. Pages are 1-indexed, the limit is capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn from_query(query: &ListJobsQuery) -> Result<Self, FieldError> {
        let page = parse_param("page", query.page.as_deref())?.unwrap_or(DEFAULT_PAGE);
        let limit = parse_param("limit", query.limit.as_deref())?
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        Ok(Self { page, limit })
    }
}

fn parse_param(field: &'static str, value: Option<&str>) -> Result<Option<u32>, FieldError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if !DIGITS_RE.is_match(value) {
        return Err(FieldError::Shape {
            field,
            expected: "a non-negative integer string",
        });
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| FieldError::Shape {
            field,
            expected: "a non-negative integer string",
        })
}
