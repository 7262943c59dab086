//! Pure analytics over a slice of listings: radius filtering, map-viewport
//! aggregation, and comparative market analysis. Nothing here touches the
//! store; callers pass in the already-loaded (and status-filtered) listings.

use crate::domain::listing::{Category, Listing};
use crate::geo::{haversine_km, BoundingBox, Point};
use serde::Serialize;
use std::collections::HashMap;

/// Fixed comp-search buffer around the subject point.
pub const COMP_RADIUS_KM: f64 = 2.0;

/// Keeps listings whose great-circle distance to `center` is at most
/// `radius_km`.
pub fn within_radius(listings: Vec<Listing>, center: Point, radius_km: f64) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|l| haversine_km(l.location, center) <= radius_km)
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryCount {
    pub category: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct NeighborhoodReport {
    pub avg_sale_price: f64,
    pub avg_rent_price: f64,
    pub category_distribution: Vec<CategoryCount>,
    pub total_properties_in_view: usize,
}

/// Aggregates the listings inside a map viewport.
///
/// Every sale-type variant carries its own price field, so land plots and
/// commercial sales count toward `avg_sale_price` alongside residential
/// sales. `avg_rent_price` covers residential rentals only. Empty scopes
/// report zeros, never nulls.
pub fn neighborhood_report(listings: &[Listing], bbox: &BoundingBox) -> NeighborhoodReport {
    let in_view: Vec<&Listing> = listings.iter().filter(|l| bbox.contains(l.location)).collect();

    let avg_sale_price = mean(in_view.iter().filter_map(|l| l.details.sale_price()));
    let avg_rent_price = mean(
        in_view
            .iter()
            .filter(|l| l.category() == Category::RentResidential)
            .filter_map(|l| l.details.monthly_rent()),
    );

    let mut counts: HashMap<Category, usize> = HashMap::new();
    for l in &in_view {
        *counts.entry(l.category()).or_default() += 1;
    }
    let mut category_distribution: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category: category.as_str(), count })
        .collect();
    // Descending by count; name order breaks ties so output is stable.
    category_distribution.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(b.category)));

    NeighborhoodReport {
        avg_sale_price,
        avg_rent_price,
        category_distribution,
        total_properties_in_view: in_view.len(),
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MarketRateEstimate {
    pub suggested_rate: f64,
    pub rate_type: &'static str,
    pub comps_found: usize,
}

/// Comparative market analysis: averages the applicable rate field over
/// same-category listings within [`COMP_RADIUS_KM`] of the subject point.
///
/// The category arrives as a raw string; comps are matched on it verbatim,
/// and an unrecognized category yields rate 0 with an empty label while
/// still reporting how many comps matched.
pub fn market_rate(listings: &[Listing], location: Point, category: &str) -> MarketRateEstimate {
    let comps: Vec<&Listing> = listings
        .iter()
        .filter(|l| l.category().as_str() == category)
        .filter(|l| haversine_km(l.location, location) <= COMP_RADIUS_KM)
        .collect();

    let (rate, rate_type) = match Category::parse(category) {
        Some(Category::SaleResidential) | Some(Category::SaleCommercial) | Some(Category::LandPlot) => (
            mean(comps.iter().filter_map(|l| l.details.sale_price())),
            "Total Price",
        ),
        Some(Category::RentResidential) | Some(Category::RentCommercial) => (
            mean(comps.iter().filter_map(|l| l.details.monthly_rent())),
            "Monthly Rent",
        ),
        Some(Category::PgGuestHouse) => (
            mean(comps.iter().filter_map(|l| l.details.price_per_month())),
            "Price per Month",
        ),
        None => (0.0, ""),
    };

    MarketRateEstimate {
        suggested_rate: round2(rate),
        rate_type,
        comps_found: comps.len(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
