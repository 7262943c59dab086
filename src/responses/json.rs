use crate::domain::listing::Listing;
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

pub fn json_response<T: Serialize>(value: &T) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| ServerError::InternalError)?;

    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();

    Ok(resp)
}

/// GeoJSON-style FeatureCollection the map client renders directly.
pub fn feature_collection(listings: &[Listing]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = listings
        .iter()
        .map(|l| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [l.location.lon, l.location.lat],
                },
                "properties": {
                    "id": l.id,
                    "name": l.name,
                    "address": l.address,
                    "category": l.category().as_str(),
                    "status": l.status.as_str(),
                },
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}
