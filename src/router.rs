use crate::db::connection::Database;
use crate::db::listings::available_listings;
use crate::domain::analytics::{market_rate, neighborhood_report, within_radius};
use crate::errors::ServerError;
use crate::geo::{parse_wkt_point, BoundingBox, Point};
use crate::responses::{feature_collection, html_response, json_response, ResultResp};
use crate::templates;
use astra::Request;
use std::collections::HashMap;

pub fn handle(req: Request, db: &Database) -> ResultResp {
    match (req.method().as_str(), req.uri().path()) {
        ("GET", "/") => html_response(templates::home_page()),
        ("GET", "/api/properties") => properties_api(&req, db),
        ("GET", "/api/analytics") => analytics_api(&req, db),
        ("GET", "/api/market-rate") => market_rate_api(&req, db),
        _ => Err(ServerError::NotFound),
    }
}

/// Radius/category search over available listings.
fn properties_api(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);
    // "all" is the map UI's no-filter sentinel.
    let category = params
        .get("category")
        .map(String::as_str)
        .filter(|c| *c != "all");

    let listings = available_listings(db, category)?;

    // The spatial filter applies only when all three of lat/lon/radius are
    // present; a partial set, or empty values, degrades to the unfiltered
    // available list.
    let spatial = (
        params.get("lat").filter(|v| !v.is_empty()),
        params.get("lon").filter(|v| !v.is_empty()),
        params.get("radius").filter(|v| !v.is_empty()),
    );
    let listings = match spatial {
        (Some(lat), Some(lon), Some(radius)) => {
            let lat = parse_f64(lat, "lat")?;
            let lon = parse_f64(lon, "lon")?;
            let radius = parse_f64(radius, "radius")?;
            within_radius(listings, Point::new(lon, lat), radius)
        }
        _ => listings,
    };

    json_response(&feature_collection(&listings))
}

/// Map-viewport aggregation: price averages and category distribution.
fn analytics_api(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);
    let bounds = params
        .get("bounds")
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Bounds not provided".into()))?;
    let bbox = BoundingBox::parse(bounds)
        .map_err(|_| ServerError::BadRequest("Invalid bounds format".into()))?;

    let listings = available_listings(db, None)?;
    json_response(&neighborhood_report(&listings, &bbox))
}

/// Comparative market analysis around a WKT point.
fn market_rate_api(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);
    let (location, category) = match (params.get("location"), params.get("category")) {
        (Some(l), Some(c)) if !l.is_empty() && !c.is_empty() => (l, c),
        _ => return Err(ServerError::BadRequest("Location and category are required.".into())),
    };
    let point = parse_wkt_point(location)
        .map_err(|_| ServerError::BadRequest("Invalid location format.".into()))?;

    let listings = available_listings(db, Some(category.as_str()))?;
    json_response(&market_rate(&listings, point, category))
}

fn parse_f64(value: &str, name: &str) -> Result<f64, ServerError> {
    value
        .trim()
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("Invalid {name}: '{value}'")))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    match req.uri().query() {
        Some(q) => url::form_urlencoded::parse(q.as_bytes()).into_owned().collect(),
        None => HashMap::new(),
    }
}
