use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Compile-time entry of the category catalogue.
/// The database is seeded from this table and never mutated afterwards.
#[derive(Debug, Clone, Copy)]
pub struct CategorySeed {
    pub id: i32,
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl CategorySeed {
    pub fn to_category(&self) -> Category {
        Category {
            id: self.id,
            name: self.name.to_string(),
            slug: self.slug.to_string(),
            description: Some(self.description.to_string()),
            icon: Some(self.icon.to_string()),
        }
    }
}

pub const CATALOGUE: &[CategorySeed] = &[
    CategorySeed {
        id: 1,
        name: "Judaica",
        slug: "judaica",
        description: "Torah scrolls, menorahs, mezuzahs, and other religious items",
        icon: "✡️",
    },
    CategorySeed {
        id: 2,
        name: "Kosher Food",
        slug: "kosher-food",
        description: "Kosher food products, ingredients, and specialty items",
        icon: "🍽️",
    },
    CategorySeed {
        id: 3,
        name: "Holiday Items",
        slug: "holiday-items",
        description: "Items related to Jewish holidays like Passover, Hanukkah, and Rosh Hashanah",
        icon: "🕎",
    },
    CategorySeed {
        id: 4,
        name: "Books & Media",
        slug: "books-media",
        description: "Books, music, films, and educational materials related to Judaism",
        icon: "📚",
    },
    CategorySeed {
        id: 5,
        name: "Clothing",
        slug: "clothing",
        description: "Traditional and modern Jewish clothing items",
        icon: "👕",
    },
    CategorySeed {
        id: 6,
        name: "Home & Furniture",
        slug: "home-furniture",
        description: "Household items and furniture with Jewish themes or for Jewish homes",
        icon: "🏠",
    },
    CategorySeed {
        id: 7,
        name: "Services",
        slug: "services",
        description: "Services offered within the Jewish community",
        icon: "🔧",
    },
    CategorySeed {
        id: 8,
        name: "Electronics",
        slug: "electronics",
        description: "Electronics and gadgets",
        icon: "💻",
    },
    CategorySeed {
        id: 9,
        name: "Community Events",
        slug: "community-events",
        description: "Listings for community events, classes, and gatherings",
        icon: "🎭",
    },
    CategorySeed {
        id: 10,
        name: "Jobs",
        slug: "jobs",
        description: "Job opportunities in Jewish organizations or businesses",
        icon: "💼",
    },
    CategorySeed {
        id: 11,
        name: "Other",
        slug: "other",
        description: "Miscellaneous items not fitting in other categories",
        icon: "🔍",
    },
];

pub fn find_by_id(id: i32) -> Option<&'static CategorySeed> {
    CATALOGUE.iter().find(|c| c.id == id)
}

pub fn find_by_slug(slug: &str) -> Option<&'static CategorySeed> {
    CATALOGUE.iter().find(|c| c.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogue_has_unique_ids_and_slugs() {
        let ids: HashSet<_> = CATALOGUE.iter().map(|c| c.id).collect();
        let slugs: HashSet<_> = CATALOGUE.iter().map(|c| c.slug).collect();
        assert_eq!(ids.len(), CATALOGUE.len());
        assert_eq!(slugs.len(), CATALOGUE.len());
    }

    #[test]
    fn lookups() {
        assert_eq!(find_by_id(1).map(|c| c.name), Some("Judaica"));
        assert_eq!(find_by_slug("kosher-food").map(|c| c.id), Some(2));
        assert!(find_by_id(0).is_none());
        assert!(find_by_slug("cars").is_none());
    }
}
