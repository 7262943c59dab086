use crate::geo::Point;
use chrono::NaiveDateTime;

/// The six listing categories the product supports. Stored as snake_case
/// strings; the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    SaleResidential,
    RentResidential,
    LandPlot,
    RentCommercial,
    SaleCommercial,
    PgGuestHouse,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SaleResidential => "sale_residential",
            Category::RentResidential => "rent_residential",
            Category::LandPlot => "land_plot",
            Category::RentCommercial => "rent_commercial",
            Category::SaleCommercial => "sale_commercial",
            Category::PgGuestHouse => "pg_guest_house",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "sale_residential" => Some(Category::SaleResidential),
            "rent_residential" => Some(Category::RentResidential),
            "land_plot" => Some(Category::LandPlot),
            "rent_commercial" => Some(Category::RentCommercial),
            "sale_commercial" => Some(Category::SaleCommercial),
            "pg_guest_house" => Some(Category::PgGuestHouse),
            _ => None,
        }
    }
}

/// Listing availability lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Available,
    Occupied,
    Sold,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Occupied => "occupied",
            Status::Sold => "sold",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "available" => Some(Status::Available),
            "occupied" => Some(Status::Occupied),
            "sold" => Some(Status::Sold),
            _ => None,
        }
    }
}

/// Category-specific detail record. One variant per category, so a listing
/// can never carry details of the wrong shape or more than one set.
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    SaleResidential {
        price: f64,
    },
    RentResidential {
        monthly_rent: f64,
        security_deposit: f64,
        furnishing: String,
    },
    LandPlot {
        price: f64,
        plot_area: String,
        gated_community: bool,
        utilities_available: bool,
    },
    RentCommercial {
        monthly_rent: f64,
        square_feet: i64,
        washrooms: i64,
        parking_available: bool,
    },
    SaleCommercial {
        price: f64,
        square_feet: i64,
        year_built: Option<i64>,
        total_floors: i64,
    },
    PgGuestHouse {
        price_per_month: f64,
        food_included: bool,
        beds_per_room: i64,
        occupancy_type: String,
    },
}

impl Details {
    pub fn category(&self) -> Category {
        match self {
            Details::SaleResidential { .. } => Category::SaleResidential,
            Details::RentResidential { .. } => Category::RentResidential,
            Details::LandPlot { .. } => Category::LandPlot,
            Details::RentCommercial { .. } => Category::RentCommercial,
            Details::SaleCommercial { .. } => Category::SaleCommercial,
            Details::PgGuestHouse { .. } => Category::PgGuestHouse,
        }
    }

    /// Total asking price, for the sale-type categories.
    pub fn sale_price(&self) -> Option<f64> {
        match self {
            Details::SaleResidential { price } => Some(*price),
            Details::LandPlot { price, .. } => Some(*price),
            Details::SaleCommercial { price, .. } => Some(*price),
            _ => None,
        }
    }

    /// Monthly rent, for the rent-type categories.
    pub fn monthly_rent(&self) -> Option<f64> {
        match self {
            Details::RentResidential { monthly_rent, .. } => Some(*monthly_rent),
            Details::RentCommercial { monthly_rent, .. } => Some(*monthly_rent),
            _ => None,
        }
    }

    /// Per-bed monthly price, for PG / guest houses.
    pub fn price_per_month(&self) -> Option<f64> {
        match self {
            Details::PgGuestHouse { price_per_month, .. } => Some(*price_per_month),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Listing {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub status: Status,
    pub location: Point,
    pub details: Details,
    pub created_at: NaiveDateTime,
}

impl Listing {
    pub fn category(&self) -> Category {
        self.details.category()
    }
}

/// Insert payload; id and created_at are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub owner: String,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub status: Status,
    pub location: Point,
    pub details: Details,
}
