use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category, price};

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_IMAGES: usize = 5;

/// A marketplace classified ad as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub price_text: Option<String>,
    pub location: String,
    pub category_id: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_shabbat_restricted: bool,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload. Server-owned fields (`id`, `ownerId`, timestamps) are
/// not part of it; unknown keys in the body are dropped on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub price_text: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_shabbat_restricted: bool,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// Field name -> message, keyed by wire (camelCase) field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("listing failed validation on {} field(s)", .fields.len())]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl From<BTreeMap<String, String>> for ValidationErrors {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

impl NewListing {
    /// The rules the listing form enforces, applied identically on the
    /// server so a caller cannot bypass them.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        } else if self.title.chars().count() > MAX_TITLE_CHARS {
            errors.add("title", "Title must be at most 100 characters");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }
        match self.category_id {
            None => errors.add("categoryId", "Category is required"),
            Some(id) if category::find_by_id(id).is_none() => {
                errors.add("categoryId", "Unknown category")
            }
            Some(_) => {}
        }
        if self.location.trim().is_empty() {
            errors.add("location", "Location is required");
        }

        match self.price {
            Some(p) if p.is_sign_negative() && !p.is_zero() => {
                errors.add("price", "Price cannot be negative")
            }
            Some(p) if price::to_cents(p).is_none() => errors.add("price", "Price is out of range"),
            None if is_blank(&self.price_text) => errors.add(
                "price",
                "Please provide either a specific price or price description",
            ),
            _ => {}
        }

        if is_blank(&self.contact_email) && is_blank(&self.contact_phone) {
            errors.add("contactEmail", "Please provide at least one contact method");
            errors.add("contactPhone", "Please provide at least one contact method");
        }

        if self.images.len() > MAX_IMAGES {
            errors.add("images", "At most 5 images are allowed");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Materialize the stored record. `owner_id` always comes from the
    /// authenticated identity.
    pub fn into_listing(self, owner_id: &str, now: DateTime<Utc>) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            price: self.price.map(price::normalize),
            price_text: self.price_text,
            location: self.location,
            category_id: self.category_id.unwrap_or_default(),
            images: self.images,
            is_shabbat_restricted: self.is_shabbat_restricted,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            owner_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
