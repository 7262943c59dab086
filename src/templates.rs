use maud::{html, Markup, DOCTYPE};

/// Overview page served at the root.
pub fn home_page() -> Markup {
    page(
        "Property Atlas",
        html! {
            h1 { "Property Atlas" }
            p { "Read-only geospatial queries over the listing inventory." }
            ul {
                li {
                    code { "GET /api/properties?lat&lon&radius&category" }
                    " - available listings near a point"
                }
                li {
                    code { "GET /api/analytics?bounds=minLon,minLat,maxLon,maxLat" }
                    " - viewport price averages and category breakdown"
                }
                li {
                    code { "GET /api/market-rate?location=POINT(lon lat)&category" }
                    " - comparable-based rate estimate"
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body { (body) }
        }
    }
}
