use crate::domain::listing::Status;
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_json, init_test_db, land_details, rent_details, sale_details, seed_listing};
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
fn viewport_report_aggregates_available_listings_in_bounds() {
    let db = init_test_db();

    seed_listing(&db, "sale-in", 77.55, 12.95, Status::Available, sale_details(6_000_000.0));
    seed_listing(&db, "plot-in", 77.56, 12.95, Status::Available, land_details(2_000_000.0));
    seed_listing(&db, "rent-in", 77.57, 12.96, Status::Available, rent_details(20_000.0));
    seed_listing(&db, "sale-out", 78.10, 12.95, Status::Available, sale_details(9_000_000.0));
    seed_listing(&db, "sold-in", 77.55, 12.95, Status::Sold, sale_details(1_000_000.0));

    let resp = handle(get("/api/analytics?bounds=77.5,12.9,77.6,13.0"), &db).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    // Land plots contribute their own price to the sale average.
    assert_eq!(body["avg_sale_price"].as_f64().unwrap(), 4_000_000.0);
    assert_eq!(body["avg_rent_price"].as_f64().unwrap(), 20_000.0);
    assert_eq!(body["total_properties_in_view"].as_i64().unwrap(), 3);

    let distribution = body["category_distribution"].as_array().unwrap();
    assert_eq!(distribution.len(), 3);
    for entry in distribution {
        assert_eq!(entry["count"].as_i64().unwrap(), 1);
    }
}

#[test]
fn empty_viewport_reports_zeros() {
    let db = init_test_db();
    seed_listing(&db, "elsewhere", 10.0, 50.0, Status::Available, sale_details(6_000_000.0));

    let body = body_json(handle(get("/api/analytics?bounds=77.5,12.9,77.6,13.0"), &db).unwrap());

    assert_eq!(body["avg_sale_price"].as_f64().unwrap(), 0.0);
    assert_eq!(body["avg_rent_price"].as_f64().unwrap(), 0.0);
    assert!(body["category_distribution"].as_array().unwrap().is_empty());
    assert_eq!(body["total_properties_in_view"].as_i64().unwrap(), 0);
}

#[test]
fn missing_bounds_is_a_bad_request() {
    let db = init_test_db();

    let err = handle(get("/api/analytics"), &db).unwrap_err();
    match &err {
        ServerError::BadRequest(msg) => assert_eq!(msg, "Bounds not provided"),
        other => panic!("Expected BadRequest, got {other:?}"),
    }
    assert_eq!(error_to_response(err).status(), 400);
}

#[test]
fn empty_bounds_value_is_reported_as_missing() {
    let db = init_test_db();

    let err = handle(get("/api/analytics?bounds="), &db).unwrap_err();
    match err {
        ServerError::BadRequest(msg) => assert_eq!(msg, "Bounds not provided"),
        other => panic!("Expected BadRequest, got {other:?}"),
    }
}

#[test]
fn short_bounds_string_is_a_bad_request() {
    let db = init_test_db();

    let err = handle(get("/api/analytics?bounds=1,2,3"), &db).unwrap_err();
    match err {
        ServerError::BadRequest(msg) => assert_eq!(msg, "Invalid bounds format"),
        other => panic!("Expected BadRequest, got {other:?}"),
    }
}

#[test]
fn repeated_queries_return_identical_results() {
    let db = init_test_db();
    seed_listing(&db, "sale-in", 77.55, 12.95, Status::Available, sale_details(6_000_000.0));
    seed_listing(&db, "rent-in", 77.57, 12.96, Status::Available, rent_details(20_000.0));

    let first = body_json(handle(get("/api/analytics?bounds=77.5,12.9,77.6,13.0"), &db).unwrap());
    let second = body_json(handle(get("/api/analytics?bounds=77.5,12.9,77.6,13.0"), &db).unwrap());

    assert_eq!(first, second);
}
