use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use shuk_types::filter::{Clause, ListingFilter};
use shuk_types::{Category, Listing, price};

use crate::models::{CategoryRow, LISTING_COLUMNS, ListingRow};
use crate::{CONTAINS_FN, Database};

impl Database {
    // -- Listings --

    pub fn insert_listing(&self, listing: &Listing) -> Result<()> {
        let row = ListingRow::from_listing(listing)?;
        self.with_conn_mut(|conn| insert_listing_row(conn, &row))
    }

    /// Insert only if `claim` still agrees once the connection is held.
    /// `Ok(None)` means nothing was written.
    pub fn insert_listing_claimed(&self, listing: &Listing, claim: impl FnOnce() -> bool) -> Result<Option<()>> {
        let row = ListingRow::from_listing(listing)?;
        self.with_conn_claimed(claim, |conn| insert_listing_row(conn, &row))
    }

    /// Insert a batch atomically: either every listing is stored or none is.
    pub fn insert_listings(&self, listings: &[Listing]) -> Result<()> {
        let rows = listings
            .iter()
            .map(ListingRow::from_listing)
            .collect::<Result<Vec<_>>>()?;
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            for row in &rows {
                insert_listing_row(&tx, row)?;
            }
            tx.commit()?;
            Ok(())
        })
    }

    pub fn get_listing(&self, id: Uuid) -> Result<Option<Listing>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = ?1"),
                    [id.to_string()],
                    ListingRow::from_row,
                )
                .optional()?;
            row.map(ListingRow::into_listing).transpose()
        })
    }

    pub fn query_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        self.with_conn(|conn| query_listings(conn, filter))
    }

    pub fn count_listings(&self) -> Result<i64> {
        self.with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM listings", [], |r| r.get(0))?))
    }

    // -- Categories --

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, slug, description, icon FROM categories ORDER BY id")?;
            let rows = stmt
                .query_map([], category_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows.into_iter().map(Category::from).collect())
        })
    }

    pub fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, slug, description, icon FROM categories WHERE slug = ?1",
                    [slug],
                    category_from_row,
                )
                .optional()?;
            Ok(row.map(Category::from))
        })
    }
}

fn insert_listing_row(conn: &Connection, row: &ListingRow) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO listings ({LISTING_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        ),
        rusqlite::params![
            row.id,
            row.title,
            row.description,
            row.price_cents,
            row.price_text,
            row.location,
            row.category_id,
            row.images,
            row.is_shabbat_restricted,
            row.contact_email,
            row.contact_phone,
            row.owner_id,
            row.created_at,
            row.updated_at,
        ],
    )?;
    Ok(())
}

fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CategoryRow> {
    Ok(CategoryRow {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        icon: row.get(4)?,
    })
}

/// SQL fragment plus bound values for one filter clause.
pub(crate) fn clause_sql(clause: &Clause) -> (String, Vec<Value>) {
    match clause {
        Clause::Category(id) => ("category_id = ?".into(), vec![Value::Integer(i64::from(*id))]),
        Clause::Text(term) => (
            format!("({CONTAINS_FN}(title, ?) OR {CONTAINS_FN}(description, ?))"),
            vec![Value::Text(term.clone()), Value::Text(term.clone())],
        ),
        // NULL price_cents compares as NULL, so unpriced rows drop out.
        Clause::MinPrice(min) => (
            "price_cents >= ?".into(),
            vec![Value::Integer(price::min_bound_cents(*min))],
        ),
        Clause::MaxPrice(max) => (
            "price_cents <= ?".into(),
            vec![Value::Integer(price::max_bound_cents(*max))],
        ),
        Clause::Location(term) => (
            format!("{CONTAINS_FN}(location, ?)"),
            vec![Value::Text(term.clone())],
        ),
        Clause::ShabbatRestricted => ("is_shabbat_restricted = 1".into(), Vec::new()),
    }
}

fn query_listings(conn: &Connection, filter: &ListingFilter) -> Result<Vec<Listing>> {
    let mut sql = format!("SELECT {LISTING_COLUMNS} FROM listings");
    let mut params: Vec<Value> = Vec::new();

    let fragments: Vec<String> = filter
        .clauses()
        .iter()
        .map(|clause| {
            let (fragment, values) = clause_sql(clause);
            params.extend(values);
            fragment
        })
        .collect();

    if !fragments.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&fragments.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(params), ListingRow::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter().map(ListingRow::into_listing).collect()
}
