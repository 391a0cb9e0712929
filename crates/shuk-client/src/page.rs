use tracing::warn;

use shuk_types::filter::{self, FilterError};
use shuk_types::{Listing, ListingFilter, ListingQuery};

use crate::source::ListingSource;

/// Raw filter form values, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category_id: String,
    pub search: String,
    pub min_price: String,
    pub max_price: String,
    pub location: String,
    pub shabbat_restricted_only: bool,
}

impl FilterState {
    /// Initial form values from URL parameters.
    pub fn from_query(query: &ListingQuery) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            category_id: text(&query.category_id),
            search: text(&query.search),
            min_price: text(&query.min_price),
            max_price: text(&query.max_price),
            location: text(&query.location),
            shabbat_restricted_only: query.is_shabbat_restricted.as_deref() == Some("true"),
        }
    }

    pub fn to_query(&self) -> ListingQuery {
        let text = |v: &str| (!v.is_empty()).then(|| v.to_string());
        ListingQuery {
            category_id: text(&self.category_id),
            search: text(&self.search),
            min_price: text(&self.min_price),
            max_price: text(&self.max_price),
            location: text(&self.location),
            is_shabbat_restricted: self.shabbat_restricted_only.then(|| "true".to_string()),
        }
    }

    /// Goes through the same parser as the query endpoint.
    pub fn to_filter(&self) -> Result<ListingFilter, FilterError> {
        ListingFilter::from_query(&self.to_query())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// Fetch in flight.
    Loading,
    /// Data present and at least one listing passes the filters.
    Ready,
    /// Data present, nothing passes the filters.
    Empty,
    /// Fetch failed; `retry` re-enters `Loading`.
    Failed(String),
}

/// A filterable listings page: fetches once, then re-filters locally
/// whenever the filters change.
pub struct ListingsPage<S> {
    source: S,
    state: PageState,
    filters: FilterState,
    filter: ListingFilter,
    listings: Vec<Listing>,
    visible: Vec<Listing>,
}

impl<S: ListingSource> ListingsPage<S> {
    pub fn new(source: S, filters: FilterState) -> Result<Self, FilterError> {
        let filter = filters.to_filter()?;
        Ok(Self {
            source,
            state: PageState::Loading,
            filters,
            filter,
            listings: Vec::new(),
            visible: Vec::new(),
        })
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Listings passing the current filters, most recent first.
    pub fn visible(&self) -> &[Listing] {
        &self.visible
    }

    pub async fn load(&mut self) -> &PageState {
        self.state = PageState::Loading;
        match self.source.fetch().await {
            Ok(listings) => {
                self.listings = listings;
                self.refresh();
            }
            Err(e) => {
                warn!("Failed to load listings: {}", e);
                self.listings.clear();
                self.visible.clear();
                self.state = PageState::Failed(e.to_string());
            }
        }
        &self.state
    }

    /// Reload after a failure. Other states are left untouched.
    pub async fn retry(&mut self) -> &PageState {
        if matches!(self.state, PageState::Failed(_)) {
            self.load().await
        } else {
            &self.state
        }
    }

    /// Apply new form values. Invalid values leave the previous filters
    /// in place. Before the first successful load only the values are
    /// stored.
    pub fn set_filters(&mut self, filters: FilterState) -> Result<(), FilterError> {
        self.filter = filters.to_filter()?;
        self.filters = filters;
        if self.has_data() {
            self.refresh();
        }
        Ok(())
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        self.filter = ListingFilter::default();
        if self.has_data() {
            self.refresh();
        }
    }

    fn has_data(&self) -> bool {
        matches!(self.state, PageState::Ready | PageState::Empty)
    }

    fn refresh(&mut self) {
        self.visible = filter::apply(&self.filter, &self.listings);
        self.state = if self.visible.is_empty() {
            PageState::Empty
        } else {
            PageState::Ready
        };
    }
}
