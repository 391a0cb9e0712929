//! Listing filter shared by the SQL query path and the in-memory client
//! path. Both tiers consume the same [`Clause`] list produced by
//! [`ListingFilter::clauses`], so their results cannot drift apart.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::listing::Listing;

/// Query-string parameters exactly as received, before interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_shabbat_restricted: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("categoryId must be an integer, got {0:?}")]
    InvalidCategory(String),
}

/// Interpreted filter. `None` / `false` means the criterion is inactive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub category_id: Option<i32>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub location: Option<String>,
    pub shabbat_restricted_only: bool,
}

/// One atomic predicate. A listing matches a filter when it matches every
/// clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Category(i32),
    /// Title OR description contains the term, ignoring case.
    Text(String),
    MinPrice(Decimal),
    MaxPrice(Decimal),
    Location(String),
    ShabbatRestricted,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ListingFilter {
    pub fn from_query(query: &ListingQuery) -> Result<Self, FilterError> {
        let category_id = match present(&query.category_id) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| FilterError::InvalidCategory(raw.to_string()))?,
            ),
            None => None,
        };

        // Unparseable bounds are ignored rather than rejected.
        let bound = |raw: &Option<String>| present(raw).and_then(|s| Decimal::from_str(s.trim()).ok());

        Ok(Self {
            category_id,
            search: present(&query.search).map(str::to_string),
            min_price: bound(&query.min_price),
            max_price: bound(&query.max_price),
            location: present(&query.location).map(str::to_string),
            shabbat_restricted_only: query.is_shabbat_restricted.as_deref() == Some("true"),
        })
    }

    /// Inverse of [`ListingFilter::from_query`], used by HTTP clients.
    pub fn to_query(&self) -> ListingQuery {
        ListingQuery {
            category_id: self.category_id.map(|id| id.to_string()),
            search: self.search.clone(),
            min_price: self.min_price.map(|d| d.to_string()),
            max_price: self.max_price.map(|d| d.to_string()),
            location: self.location.clone(),
            is_shabbat_restricted: self.shabbat_restricted_only.then(|| "true".to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses().is_empty()
    }

    pub fn clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::new();
        if let Some(id) = self.category_id {
            clauses.push(Clause::Category(id));
        }
        if let Some(term) = &self.search {
            clauses.push(Clause::Text(term.clone()));
        }
        if let Some(min) = self.min_price {
            clauses.push(Clause::MinPrice(min));
        }
        if let Some(max) = self.max_price {
            clauses.push(Clause::MaxPrice(max));
        }
        if let Some(location) = &self.location {
            clauses.push(Clause::Location(location.clone()));
        }
        if self.shabbat_restricted_only {
            clauses.push(Clause::ShabbatRestricted);
        }
        clauses
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.clauses().iter().all(|clause| clause.matches(listing))
    }
}

impl Clause {
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Clause::Category(id) => listing.category_id == *id,
            Clause::Text(term) => {
                contains_ignore_case(&listing.title, term)
                    || contains_ignore_case(&listing.description, term)
            }
            // A listing without a numeric price never satisfies a bound.
            Clause::MinPrice(min) => listing.price.is_some_and(|p| p >= *min),
            Clause::MaxPrice(max) => listing.price.is_some_and(|p| p <= *max),
            Clause::Location(term) => contains_ignore_case(&listing.location, term),
            Clause::ShabbatRestricted => listing.is_shabbat_restricted,
        }
    }
}

/// Case-insensitive substring test. The database registers this same
/// function for its text clauses.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Most recent first; ties broken by id so repeated queries return the
/// same order.
pub fn by_recency(a: &Listing, b: &Listing) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// In-memory evaluation of a filter: matching listings in recency order.
pub fn apply(filter: &ListingFilter, listings: &[Listing]) -> Vec<Listing> {
    let clauses = filter.clauses();
    let mut matched: Vec<Listing> = listings
        .iter()
        .filter(|listing| clauses.iter().all(|c| c.matches(listing)))
        .cloned()
        .collect();
    matched.sort_by(by_recency);
    matched
}
