use crate::db::connection::{init_db, Database};
use crate::db::listings::insert_listing;
use crate::domain::listing::{Details, NewListing, Status};
use crate::geo::Point;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Initialize a fresh temp-file test DB using the production schema.
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "atlas_test_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));

    let db = Database::new(path.to_string_lossy());
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn seed_listing(
    db: &Database,
    name: &str,
    lon: f64,
    lat: f64,
    status: Status,
    details: Details,
) -> i64 {
    insert_listing(
        db,
        &NewListing {
            owner: "owner1".into(),
            name: name.into(),
            address: "1 Test Lane, Bengaluru".into(),
            description: None,
            status,
            location: Point::new(lon, lat),
            details,
        },
    )
    .expect("Failed to insert listing")
}

pub fn sale_details(price: f64) -> Details {
    Details::SaleResidential { price }
}

pub fn rent_details(monthly_rent: f64) -> Details {
    Details::RentResidential {
        monthly_rent,
        security_deposit: monthly_rent * 2.0,
        furnishing: "semi-furnished".into(),
    }
}

pub fn land_details(price: f64) -> Details {
    Details::LandPlot {
        price,
        plot_area: "2400 sqft".into(),
        gated_community: true,
        utilities_available: true,
    }
}

/// Drain a response body and parse it as JSON.
pub fn body_json(resp: astra::Response) -> serde_json::Value {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("Body was not JSON ({e}): {body}"))
}
