use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use shuk_types::category::CATALOGUE;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (categories + listings)");
        conn.execute_batch(
            "
            CREATE TABLE categories (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL,
                slug        TEXT NOT NULL UNIQUE,
                description TEXT,
                icon        TEXT
            );

            CREATE TABLE listings (
                id                    TEXT PRIMARY KEY,
                title                 TEXT NOT NULL,
                description           TEXT NOT NULL,
                price_cents           INTEGER,
                price_text            TEXT,
                location              TEXT NOT NULL,
                category_id           INTEGER NOT NULL REFERENCES categories(id),
                images                TEXT NOT NULL DEFAULT '[]',
                is_shabbat_restricted INTEGER NOT NULL DEFAULT 0,
                contact_email         TEXT,
                contact_phone         TEXT,
                owner_id              TEXT NOT NULL,
                created_at            TEXT NOT NULL,
                updated_at            TEXT NOT NULL
            );

            CREATE INDEX idx_listings_recent
                ON listings(created_at DESC, id);

            CREATE INDEX idx_listings_category
                ON listings(category_id);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    // Catalogue rows are upserted on every start so renamed entries propagate.
    let mut stmt = conn.prepare(
        "INSERT INTO categories (id, name, slug, description, icon) VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            slug = excluded.slug,
            description = excluded.description,
            icon = excluded.icon",
    )?;
    for seed in CATALOGUE {
        stmt.execute(rusqlite::params![seed.id, seed.name, seed.slug, seed.description, seed.icon])?;
    }

    info!("Database migrations complete");
    Ok(())
}
