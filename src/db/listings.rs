use crate::db::connection::Database;
use crate::domain::listing::{Category, Details, Listing, NewListing, Status};
use crate::errors::ServerError;
use crate::geo::Point;
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Row};

const SELECT_AVAILABLE: &str = "\
    SELECT l.id, l.owner, l.name, l.category, l.status, l.address, l.description,
           l.lon, l.lat, l.created_at,
           d.price, d.monthly_rent, d.security_deposit, d.furnishing,
           d.plot_area, d.gated_community, d.utilities_available,
           d.square_feet, d.washrooms, d.parking_available,
           d.year_built, d.total_floors,
           d.price_per_month, d.food_included, d.beds_per_room, d.occupancy_type
    FROM listings l
    JOIN listing_details d ON d.listing_id = l.id
    WHERE l.status = 'available'";

/// Inserts a listing and its detail record in one transaction. Returns the
/// new listing id.
pub fn insert_listing(db: &Database, listing: &NewListing) -> Result<i64, ServerError> {
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        tx.execute(
            r#"
            INSERT INTO listings (owner, name, category, status, address, description, lon, lat, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                listing.owner,
                listing.name,
                listing.details.category().as_str(),
                listing.status.as_str(),
                listing.address,
                listing.description,
                listing.location.lon,
                listing.location.lat,
                now,
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

        let id = tx.last_insert_rowid();

        match &listing.details {
            Details::SaleResidential { price } => tx.execute(
                "INSERT INTO listing_details (listing_id, price) VALUES (?1, ?2)",
                params![id, price],
            ),
            Details::RentResidential { monthly_rent, security_deposit, furnishing } => tx.execute(
                "INSERT INTO listing_details (listing_id, monthly_rent, security_deposit, furnishing)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, monthly_rent, security_deposit, furnishing],
            ),
            Details::LandPlot { price, plot_area, gated_community, utilities_available } => tx.execute(
                "INSERT INTO listing_details (listing_id, price, plot_area, gated_community, utilities_available)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, price, plot_area, gated_community, utilities_available],
            ),
            Details::RentCommercial { monthly_rent, square_feet, washrooms, parking_available } => tx.execute(
                "INSERT INTO listing_details (listing_id, monthly_rent, square_feet, washrooms, parking_available)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, monthly_rent, square_feet, washrooms, parking_available],
            ),
            Details::SaleCommercial { price, square_feet, year_built, total_floors } => tx.execute(
                "INSERT INTO listing_details (listing_id, price, square_feet, year_built, total_floors)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, price, square_feet, year_built, total_floors],
            ),
            Details::PgGuestHouse { price_per_month, food_included, beds_per_room, occupancy_type } => tx.execute(
                "INSERT INTO listing_details (listing_id, price_per_month, food_included, beds_per_room, occupancy_type)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, price_per_month, food_included, beds_per_room, occupancy_type],
            ),
        }
        .map_err(|e| ServerError::DbError(e.to_string()))?;

        tx.commit().map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(id)
    })
}

/// Loads available listings, optionally restricted to one category. This is
/// the only read the analytics handlers use; spatial predicates stay in the
/// domain layer.
pub fn available_listings(db: &Database, category: Option<&str>) -> Result<Vec<Listing>, ServerError> {
    let mut sql = String::from(SELECT_AVAILABLE);
    if category.is_some() {
        sql.push_str(" AND l.category = ?1");
    }
    sql.push_str(" ORDER BY l.id");

    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = match category {
            Some(cat) => stmt.query_map(params![cat], row_to_parts),
            None => stmt.query_map([], row_to_parts),
        }
        .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            let (head, cols) = row.map_err(|e| ServerError::DbError(e.to_string()))?;
            out.push(listing_from_parts(head, cols)?);
        }
        Ok(out)
    })
}

/// Removes a listing; the detail record goes with it via the FK cascade.
pub fn delete_listing(db: &Database, id: i64) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM listings WHERE id = ?1", params![id])
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}

struct ListingRow {
    id: i64,
    owner: String,
    name: String,
    category: String,
    status: String,
    address: String,
    description: Option<String>,
    lon: f64,
    lat: f64,
    created_at: NaiveDateTime,
}

struct DetailColumns {
    price: Option<f64>,
    monthly_rent: Option<f64>,
    security_deposit: Option<f64>,
    furnishing: Option<String>,
    plot_area: Option<String>,
    gated_community: Option<bool>,
    utilities_available: Option<bool>,
    square_feet: Option<i64>,
    washrooms: Option<i64>,
    parking_available: Option<bool>,
    year_built: Option<i64>,
    total_floors: Option<i64>,
    price_per_month: Option<f64>,
    food_included: Option<bool>,
    beds_per_room: Option<i64>,
    occupancy_type: Option<String>,
}

fn row_to_parts(row: &Row<'_>) -> rusqlite::Result<(ListingRow, DetailColumns)> {
    Ok((
        ListingRow {
            id: row.get(0)?,
            owner: row.get(1)?,
            name: row.get(2)?,
            category: row.get(3)?,
            status: row.get(4)?,
            address: row.get(5)?,
            description: row.get(6)?,
            lon: row.get(7)?,
            lat: row.get(8)?,
            created_at: row.get(9)?,
        },
        DetailColumns {
            price: row.get(10)?,
            monthly_rent: row.get(11)?,
            security_deposit: row.get(12)?,
            furnishing: row.get(13)?,
            plot_area: row.get(14)?,
            gated_community: row.get(15)?,
            utilities_available: row.get(16)?,
            square_feet: row.get(17)?,
            washrooms: row.get(18)?,
            parking_available: row.get(19)?,
            year_built: row.get(20)?,
            total_floors: row.get(21)?,
            price_per_month: row.get(22)?,
            food_included: row.get(23)?,
            beds_per_room: row.get(24)?,
            occupancy_type: row.get(25)?,
        },
    ))
}

fn listing_from_parts(head: ListingRow, cols: DetailColumns) -> Result<Listing, ServerError> {
    let status = Status::parse(&head.status)
        .ok_or_else(|| ServerError::DbError(format!("unknown listing status '{}'", head.status)))?;
    let details = details_from_columns(&head.category, cols)?;

    Ok(Listing {
        id: head.id,
        owner: head.owner,
        name: head.name,
        address: head.address,
        description: head.description,
        status,
        location: Point::new(head.lon, head.lat),
        details,
        created_at: head.created_at,
    })
}

/// Rebuilds the tagged detail variant from the sparse column row. A missing
/// rate column for the listing's category is a corrupt row, reported as a
/// DbError; the optional descriptive columns fall back to the product's
/// defaults.
fn details_from_columns(category: &str, cols: DetailColumns) -> Result<Details, ServerError> {
    let missing =
        |field: &str| ServerError::DbError(format!("listing_details missing {field} for category '{category}'"));

    match Category::parse(category) {
        Some(Category::SaleResidential) => Ok(Details::SaleResidential {
            price: cols.price.ok_or_else(|| missing("price"))?,
        }),
        Some(Category::RentResidential) => Ok(Details::RentResidential {
            monthly_rent: cols.monthly_rent.ok_or_else(|| missing("monthly_rent"))?,
            security_deposit: cols.security_deposit.unwrap_or(0.0),
            furnishing: cols.furnishing.unwrap_or_else(|| "unfurnished".into()),
        }),
        Some(Category::LandPlot) => Ok(Details::LandPlot {
            price: cols.price.ok_or_else(|| missing("price"))?,
            plot_area: cols.plot_area.unwrap_or_default(),
            gated_community: cols.gated_community.unwrap_or(false),
            utilities_available: cols.utilities_available.unwrap_or(true),
        }),
        Some(Category::RentCommercial) => Ok(Details::RentCommercial {
            monthly_rent: cols.monthly_rent.ok_or_else(|| missing("monthly_rent"))?,
            square_feet: cols.square_feet.unwrap_or(0),
            washrooms: cols.washrooms.unwrap_or(0),
            parking_available: cols.parking_available.unwrap_or(true),
        }),
        Some(Category::SaleCommercial) => Ok(Details::SaleCommercial {
            price: cols.price.ok_or_else(|| missing("price"))?,
            square_feet: cols.square_feet.unwrap_or(0),
            year_built: cols.year_built,
            total_floors: cols.total_floors.unwrap_or(1),
        }),
        Some(Category::PgGuestHouse) => Ok(Details::PgGuestHouse {
            price_per_month: cols.price_per_month.ok_or_else(|| missing("price_per_month"))?,
            food_included: cols.food_included.unwrap_or(false),
            beds_per_room: cols.beds_per_room.unwrap_or(1),
            occupancy_type: cols.occupancy_type.unwrap_or_else(|| "co-living".into()),
        }),
        None => Err(ServerError::DbError(format!("unknown listing category '{category}'"))),
    }
}
