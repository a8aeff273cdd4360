//! Page and sort requests for listing an owner's cards
//!
//! Raw URL parameters arrive as [`QueryParams`] and are resolved into a
//! validated [`PageRequest`] against a [`PaginationConfig`]. The window a
//! request selects is computed by [`PageRequest::window`], which both the
//! in-memory store and tests use.

use crate::core::card::Card;
use crate::core::error::CardError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Query parameters for pagination and sorting
///
/// Kept as raw strings so malformed values surface as
/// [`CardError::InvalidParameter`] instead of a framework rejection.
///
/// # Example
/// ```text
/// GET /cashcards?page=0&size=1&sort=amount,desc
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Zero-based page index
    pub page: Option<String>,

    /// Number of items per page
    pub size: Option<String>,

    /// Sort expression
    ///
    /// # Format
    /// - `amount` or `amount,asc` (ascending)
    /// - `amount,desc` (descending)
    pub sort: Option<String>,
}

/// Fields a page can be sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Amount,
}

impl SortField {
    pub fn parse(s: &str) -> Result<Self, CardError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amount" => Ok(SortField::Amount),
            other => Err(CardError::invalid(
                "sort",
                format!("unsupported sort field '{}'", other),
            )),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Result<Self, CardError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CardError::invalid(
                "sort",
                format!("unsupported sort direction '{}'", other),
            )),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Paging limits applied when resolving a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort_field: SortField,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Request with explicit values; `size` must be positive
    pub fn new(
        page: usize,
        size: usize,
        sort_field: SortField,
        direction: SortDirection,
    ) -> Result<Self, CardError> {
        if size == 0 {
            return Err(CardError::invalid("size", "page size must be positive"));
        }
        Ok(Self {
            page,
            size,
            sort_field,
            direction,
        })
    }

    /// First page, default size, sorted by amount ascending
    pub fn first(config: &PaginationConfig) -> Self {
        Self {
            page: 0,
            size: config.default_page_size.max(1),
            sort_field: SortField::Amount,
            direction: SortDirection::Asc,
        }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Total order used by every backend: sort key, then ascending id
    pub fn compare(&self, a: &Card, b: &Card) -> Ordering {
        let by_field = match self.sort_field {
            SortField::Amount => a.amount.total_cmp(&b.amount),
        };
        let by_field = match self.direction {
            SortDirection::Asc => by_field,
            SortDirection::Desc => by_field.reverse(),
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }

    /// Sort `cards` and cut out this request's window
    ///
    /// A window past the end yields an empty vec.
    pub fn window(&self, mut cards: Vec<Card>) -> Vec<Card> {
        cards.sort_by(|a, b| self.compare(a, b));
        cards.into_iter().skip(self.offset()).take(self.size).collect()
    }
}

impl QueryParams {
    /// Resolve raw parameters, applying defaults for anything absent
    pub fn resolve(&self, config: &PaginationConfig) -> Result<PageRequest, CardError> {
        let defaults = PageRequest::first(config);

        let page = match non_blank(&self.page) {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                CardError::invalid("page", format!("'{}' is not a non-negative integer", raw))
            })?,
            None => defaults.page,
        };

        let size = match non_blank(&self.size) {
            Some(raw) => {
                let size = raw.parse::<usize>().map_err(|_| {
                    CardError::invalid("size", format!("'{}' is not a positive integer", raw))
                })?;
                size.min(config.max_page_size.max(1))
            }
            None => defaults.size,
        };

        let (sort_field, direction) = match non_blank(&self.sort) {
            Some(raw) => parse_sort(raw)?,
            None => (defaults.sort_field, defaults.direction),
        };

        PageRequest::new(page, size, sort_field, direction)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_sort(raw: &str) -> Result<(SortField, SortDirection), CardError> {
    let mut parts = raw.split(',');
    let field = SortField::parse(parts.next().unwrap_or_default())?;
    let direction = match parts.next() {
        Some(d) => SortDirection::parse(d)?,
        None => SortDirection::Asc,
    };
    if parts.next().is_some() {
        return Err(CardError::invalid(
            "sort",
            format!("expected 'field[,direction]', got '{}'", raw),
        ));
    }
    Ok((field, direction))
}

/// One window of an owner's cards plus the owner's total count
#[derive(Debug, Clone, PartialEq)]
pub struct CardPage {
    pub cards: Vec<Card>,
    pub total: usize,
}

/// Page returned by the list operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageWindow {
    pub cards: Vec<Card>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
}

impl PageWindow {
    pub fn new(request: &PageRequest, page: CardPage) -> Self {
        Self {
            cards: page.cards,
            page: request.page,
            size: request.size,
            total: page.total,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1).saturating_mul(self.size) < self.total
    }
}
