//! Database row types — these map directly to SQLite rows.
//! Distinct from shuk-types API models to keep the DB layer independent.
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use shuk_types::{Category, Listing, price};

pub struct ListingRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price_cents: Option<i64>,
    pub price_text: Option<String>,
    pub location: String,
    pub category_id: i32,
    pub images: String,
    pub is_shabbat_restricted: bool,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

pub const LISTING_COLUMNS: &str = "id, title, description, price_cents, price_text, location, \
     category_id, images, is_shabbat_restricted, contact_email, contact_phone, owner_id, \
     created_at, updated_at";

/// Fixed-width UTC timestamps, so text order equals time order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .with_context(|| format!("corrupt timestamp '{raw}'"))
}

impl ListingRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            price_cents: row.get(3)?,
            price_text: row.get(4)?,
            location: row.get(5)?,
            category_id: row.get(6)?,
            images: row.get(7)?,
            is_shabbat_restricted: row.get(8)?,
            contact_email: row.get(9)?,
            contact_phone: row.get(10)?,
            owner_id: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }

    pub fn from_listing(listing: &Listing) -> Result<Self> {
        let price_cents = match listing.price {
            Some(p) => Some(price::to_cents(p).with_context(|| format!("price {p} out of range"))?),
            None => None,
        };
        Ok(Self {
            id: listing.id.to_string(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            price_cents,
            price_text: listing.price_text.clone(),
            location: listing.location.clone(),
            category_id: listing.category_id,
            images: serde_json::to_string(&listing.images)?,
            is_shabbat_restricted: listing.is_shabbat_restricted,
            contact_email: listing.contact_email.clone(),
            contact_phone: listing.contact_phone.clone(),
            owner_id: listing.owner_id.clone(),
            created_at: format_timestamp(&listing.created_at),
            updated_at: format_timestamp(&listing.updated_at),
        })
    }

    pub fn into_listing(self) -> Result<Listing> {
        Ok(Listing {
            id: self
                .id
                .parse()
                .with_context(|| format!("corrupt listing id '{}'", self.id))?,
            images: serde_json::from_str(&self.images)
                .with_context(|| format!("corrupt images on listing '{}'", self.id))?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            title: self.title,
            description: self.description,
            price: self.price_cents.map(price::from_cents),
            price_text: self.price_text,
            location: self.location,
            category_id: self.category_id,
            is_shabbat_restricted: self.is_shabbat_restricted,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            owner_id: self.owner_id,
        })
    }
}

pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            icon: row.icon,
        }
    }
}
