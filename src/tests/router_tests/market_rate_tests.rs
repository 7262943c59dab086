use crate::domain::listing::Status;
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_json, init_test_db, rent_details, sale_details, seed_listing};
use astra::Body;
use http::{Method, Request};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn single_comp_sets_the_suggested_rent() {
    let db = init_test_db();
    seed_listing(&db, "comp", 77.60, 12.97, Status::Available, rent_details(20_000.0));

    let resp = handle(
        get("/api/market-rate?location=POINT(77.60%2012.97)&category=rent_residential"),
        &db,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["suggested_rate"].as_f64().unwrap(), 20_000.0);
    assert_eq!(body["rate_type"], "Monthly Rent");
    assert_eq!(body["comps_found"].as_i64().unwrap(), 1);
}

#[test]
fn comps_outside_two_km_are_ignored() {
    let db = init_test_db();
    // ~1.1 km and ~5.6 km from the subject point.
    seed_listing(&db, "near", 77.60, 12.98, Status::Available, rent_details(20_000.0));
    seed_listing(&db, "far", 77.60, 13.02, Status::Available, rent_details(90_000.0));

    let body = body_json(
        handle(
            get("/api/market-rate?location=POINT(77.60%2012.97)&category=rent_residential"),
            &db,
        )
        .unwrap(),
    );

    assert_eq!(body["comps_found"].as_i64().unwrap(), 1);
    assert_eq!(body["suggested_rate"].as_f64().unwrap(), 20_000.0);
}

#[test]
fn sale_comps_average_their_prices() {
    let db = init_test_db();
    seed_listing(&db, "a", 77.60, 12.97, Status::Available, sale_details(6_000_000.0));
    seed_listing(&db, "b", 77.60, 12.975, Status::Available, sale_details(8_000_000.0));

    let body = body_json(
        handle(
            get("/api/market-rate?location=POINT(77.60%2012.97)&category=sale_residential"),
            &db,
        )
        .unwrap(),
    );

    assert_eq!(body["suggested_rate"].as_f64().unwrap(), 7_000_000.0);
    assert_eq!(body["rate_type"], "Total Price");
    assert_eq!(body["comps_found"].as_i64().unwrap(), 2);
}

#[test]
fn missing_parameters_are_rejected() {
    let db = init_test_db();

    for uri in [
        "/api/market-rate",
        "/api/market-rate?location=POINT(77.60%2012.97)",
        "/api/market-rate?category=rent_residential",
    ] {
        let err = handle(get(uri), &db).unwrap_err();
        match err {
            ServerError::BadRequest(msg) => assert_eq!(msg, "Location and category are required."),
            other => panic!("Expected BadRequest for {uri}, got {other:?}"),
        }
    }
}

#[test]
fn unparseable_location_is_a_bad_request() {
    let db = init_test_db();

    let err = handle(
        get("/api/market-rate?location=somewhere%20nice&category=rent_residential"),
        &db,
    )
    .unwrap_err();
    match &err {
        ServerError::BadRequest(msg) => assert_eq!(msg, "Invalid location format."),
        other => panic!("Expected BadRequest, got {other:?}"),
    }
    assert_eq!(error_to_response(err).status(), 400);
}

#[test]
fn unknown_category_reports_zero_rate_with_empty_label() {
    let db = init_test_db();
    seed_listing(&db, "comp", 77.60, 12.97, Status::Available, rent_details(20_000.0));

    let body = body_json(
        handle(
            get("/api/market-rate?location=POINT(77.60%2012.97)&category=treehouse"),
            &db,
        )
        .unwrap(),
    );

    assert_eq!(body["suggested_rate"].as_f64().unwrap(), 0.0);
    assert_eq!(body["rate_type"], "");
    assert_eq!(body["comps_found"].as_i64().unwrap(), 0);
}
