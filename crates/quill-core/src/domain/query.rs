//! Listing contract shared by every blog store.
//!
//! A [`BlogQuery`] is the validated form of a list request. Stores translate
//! it into their own query language; the in-memory store evaluates it
//! directly through [`BlogQuery::matches`] and [`BlogQuery::compare`].
//!
//! The pagination boundary is always `id > cursor`, whatever the sort field.
//! Ids are time-ordered, so walking pages is only stable when sorting by
//! creation time ascending. Other sorts still return a correctly ordered page
//! but successive pages may skip or repeat records.

use std::cmp::Ordering;

use serde::Deserialize;
use uuid::Uuid;

use super::blog::{BlogPost, BlogState};
use crate::error::DomainError;

/// Fixed number of posts per page. Client supplied limits are ignored.
pub const PAGE_SIZE: u64 = 20;

/// Visibility tier of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Published posts only; any state filter is ignored.
    Public,
    /// All states, optionally filtered by state.
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    ReadCount,
    ReadTime,
    CreatedAt,
}

impl SortField {
    /// Map a query-string value; unknown values fall back to creation time.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("read_count" | "readCount") => SortField::ReadCount,
            Some("reading_time" | "read_time" | "readTime") => SortField::ReadTime,
            _ => SortField::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `asc` sorts ascending; anything else (or nothing) sorts descending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBlogsParams {
    pub cursor: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub state: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Validated list query.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogQuery {
    pub state: Option<BlogState>,
    pub cursor: Option<Uuid>,
    /// Lowercased search needles.
    pub author: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
    pub limit: u64,
}

impl BlogQuery {
    /// Resolve raw parameters for the given scope.
    pub fn resolve(scope: Scope, params: ListBlogsParams) -> Result<Self, DomainError> {
        let state = match scope {
            Scope::Public => Some(BlogState::Published),
            Scope::Owner => match non_empty(params.state) {
                None => None,
                Some(raw) => Some(match raw.to_lowercase().as_str() {
                    "draft" => BlogState::Draft,
                    "published" => BlogState::Published,
                    _ => {
                        return Err(DomainError::validation(
                            "Please enter a valid state (draft or published).",
                        ));
                    }
                }),
            },
        };

        let cursor = non_empty(params.cursor)
            .map(|raw| Uuid::parse_str(&raw))
            .transpose()
            .map_err(|_| DomainError::validation("Invalid cursor"))?;

        Ok(Self {
            state,
            cursor,
            author: non_empty(params.author).map(|s| s.to_lowercase()),
            title: non_empty(params.title).map(|s| s.to_lowercase()),
            tags: non_empty(params.tags).map(|s| s.to_lowercase()),
            sort: SortField::from_param(params.sort.as_deref()),
            order: SortOrder::from_param(params.order.as_deref()),
            limit: PAGE_SIZE,
        })
    }

    /// Whether `blog` passes the state, cursor and search filters.
    pub fn matches(&self, blog: &BlogPost) -> bool {
        self.state.is_none_or(|state| blog.state == state)
            && self.cursor.is_none_or(|cursor| blog.id > cursor)
            && self
                .author
                .as_deref()
                .is_none_or(|needle| contains_ci(&blog.author, needle))
            && self
                .title
                .as_deref()
                .is_none_or(|needle| contains_ci(&blog.title, needle))
            && self
                .tags
                .as_deref()
                .is_none_or(|needle| blog.tags.iter().any(|tag| contains_ci(tag, needle)))
    }

    /// Ordering of two posts under this query. Ties break on id in the same
    /// direction as the requested order.
    pub fn compare(&self, a: &BlogPost, b: &BlogPost) -> Ordering {
        let ordering = match self.sort {
            SortField::ReadCount => a.read_count.cmp(&b.read_count),
            SortField::ReadTime => a.read_time.total_cmp(&b.read_time),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
        .then_with(|| a.id.cmp(&b.id));

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// One page of results plus its cursors.
#[derive(Debug, Clone)]
pub struct Page {
    pub blogs: Vec<BlogPost>,
    pub next_cursor: Option<Uuid>,
    /// Only set when the request carried a cursor.
    pub prev_cursor: Option<Uuid>,
}

impl Page {
    pub fn new(blogs: Vec<BlogPost>, had_cursor: bool) -> Self {
        let next_cursor = blogs.last().map(|b| b.id);
        let prev_cursor = if had_cursor {
            blogs.first().map(|b| b.id)
        } else {
            None
        };
        Self {
            blogs,
            next_cursor,
            prev_cursor,
        }
    }

    pub fn total_results(&self) -> usize {
        self.blogs.len()
    }
}
