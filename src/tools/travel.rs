//! Flight and hotel search: the two tools the travel agent may call.
//!
//! Searches are pure reads against a [`TravelDataSource`]. Anything that goes
//! wrong (unknown route, backend failure, nothing under budget) is reported
//! as [`SearchOutcome::NoResults`], never as an error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use super::arguments::ToolArguments;
use super::registry::{ToolSet, NO_RESULTS};
use super::tool::{Tool, ToolExecutionContext};
use super::types::AgentToolParameters;
use crate::error::TripError;

/// One bookable flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    pub carrier: String,
    pub flight_number: String,
    /// Total fare in USD.
    pub price: f64,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

/// A hotel as listed by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelListing {
    pub name: String,
    pub price_per_night: f64,
    pub rating: f32,
}

/// A hotel priced for a specific stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOption {
    pub name: String,
    pub price_per_night: f64,
    pub rating: f32,
    /// `price_per_night * nights`, in USD.
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayDates {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayDates {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelQuery {
    pub city: String,
    /// Maximum price per night, in USD.
    pub budget: f64,
    pub dates: StayDates,
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<T> {
    Found(Vec<T>),
    NoResults { reason: String },
}

impl<T: Serialize> SearchOutcome<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoResults { .. })
    }

    /// Payload returned to the model.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Found(items) => json!({ "results": items }),
            Self::NoResults { reason } => {
                json!({ "results": [], "message": NO_RESULTS, "detail": reason })
            }
        }
    }
}

/// Where flight and hotel data comes from.
#[async_trait]
pub trait TravelDataSource: Send + Sync {
    async fn flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<FlightOption>, TripError>;

    async fn hotels(&self, city: &str) -> Result<Vec<HotelListing>, TripError>;
}

pub async fn search_flights(
    source: &dyn TravelDataSource,
    query: &FlightQuery,
) -> SearchOutcome<FlightOption> {
    let mut flights = match source
        .flights(&query.origin, &query.destination, query.date)
        .await
    {
        Ok(flights) => flights,
        Err(e) => {
            warn!(error = %e, "flight data source failed");
            return SearchOutcome::NoResults {
                reason: "flight data is unavailable".into(),
            };
        }
    };

    if let Some(max) = query.max_price {
        flights.retain(|f| f.price <= max);
    }
    flights.sort_by(|a, b| {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.departure.cmp(&b.departure))
            .then_with(|| a.flight_number.cmp(&b.flight_number))
    });

    if flights.is_empty() {
        let mut reason = format!(
            "no flights from {} to {} on {}",
            query.origin, query.destination, query.date
        );
        if let Some(max) = query.max_price {
            reason.push_str(&format!(" at or under ${max:.2}"));
        }
        return SearchOutcome::NoResults { reason };
    }
    SearchOutcome::Found(flights)
}

pub async fn search_hotels(
    source: &dyn TravelDataSource,
    query: &HotelQuery,
) -> SearchOutcome<HotelOption> {
    let nights = query.dates.nights();
    if nights <= 0 {
        return SearchOutcome::NoResults {
            reason: "check-out must be after check-in".into(),
        };
    }

    let listings = match source.hotels(&query.city).await {
        Ok(listings) => listings,
        Err(e) => {
            warn!(error = %e, "hotel data source failed");
            return SearchOutcome::NoResults {
                reason: "hotel data is unavailable".into(),
            };
        }
    };

    let mut hotels: Vec<HotelOption> = listings
        .into_iter()
        .filter(|h| h.price_per_night <= query.budget)
        .map(|h| HotelOption {
            total_cost: round_cents(h.price_per_night * nights as f64),
            name: h.name,
            price_per_night: h.price_per_night,
            rating: h.rating,
        })
        .collect();
    hotels.sort_by(|a, b| {
        a.price_per_night
            .total_cmp(&b.price_per_night)
            .then_with(|| b.rating.total_cmp(&a.rating))
            .then_with(|| a.name.cmp(&b.name))
    });

    if hotels.is_empty() {
        return SearchOutcome::NoResults {
            reason: format!(
                "no hotels in {} at or under ${:.2} per night",
                query.city, query.budget
            ),
        };
    }
    SearchOutcome::Found(hotels)
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A daily scheduled departure in the static catalog.
#[derive(Debug, Clone)]
pub struct RouteFixture {
    pub origin: &'static str,
    pub destination: &'static str,
    pub carrier: &'static str,
    pub flight_number: &'static str,
    pub price: f64,
    pub departs_at: (u32, u32),
    pub duration_minutes: i64,
}

/// In-memory catalog with a fixed timetable and hotel list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    routes: Vec<RouteFixture>,
    hotels: Vec<(&'static str, HotelListing)>,
}

impl StaticCatalog {
    pub fn new(routes: Vec<RouteFixture>, hotels: Vec<(&'static str, HotelListing)>) -> Self {
        Self { routes, hotels }
    }

    /// The catalog the assistant ships with.
    pub fn sample() -> Self {
        let route = |origin, destination, carrier, flight_number, price, departs_at, duration_minutes| {
            RouteFixture {
                origin,
                destination,
                carrier,
                flight_number,
                price,
                departs_at,
                duration_minutes,
            }
        };
        let hotel = |city, name: &str, price_per_night, rating| {
            (
                city,
                HotelListing {
                    name: name.to_string(),
                    price_per_night,
                    rating,
                },
            )
        };
        Self::new(
            vec![
                route("Tokyo", "Paris", "Air France", "AF275", 480.0, (10, 25), 14 * 60 + 35),
                route("Tokyo", "Paris", "Japan Airlines", "JL45", 620.0, (11, 50), 14 * 60 + 15),
                route("Tokyo", "Paris", "ANA", "NH215", 545.0, (21, 55), 14 * 60 + 40),
                route("Tokyo", "London", "British Airways", "BA6", 590.0, (12, 35), 14 * 60 + 20),
                route("Tokyo", "London", "Japan Airlines", "JL41", 655.0, (11, 30), 14 * 60 + 30),
                route("Tokyo", "Seoul", "Korean Air", "KE704", 150.0, (13, 15), 2 * 60 + 30),
                route("Tokyo", "Seoul", "Peach", "MM807", 95.0, (7, 0), 2 * 60 + 35),
                route("Tokyo", "Bangkok", "Thai Airways", "TG677", 170.0, (10, 45), 6 * 60 + 55),
                route("Tokyo", "Dubai", "Emirates", "EK319", 610.0, (22, 30), 11 * 60 + 10),
                route("Tokyo", "Delhi", "Air India", "AI307", 430.0, (11, 25), 9 * 60 + 5),
                route("Tokyo", "Beijing", "Air China", "CA168", 260.0, (14, 5), 4 * 60),
                route("Tokyo", "New York", "United", "UA78", 780.0, (16, 55), 12 * 60 + 50),
                route("Paris", "Tokyo", "Air France", "AF276", 505.0, (23, 5), 13 * 60 + 25),
            ],
            vec![
                hotel("Paris", "Hotel Le Marais", 145.0, 4.3),
                hotel("Paris", "Ibis Paris Gare de Lyon", 98.0, 3.9),
                hotel("Paris", "Le Meurice", 1250.0, 4.9),
                hotel("London", "Premier Inn County Hall", 132.0, 4.2),
                hotel("London", "The Savoy", 890.0, 4.8),
                hotel("Seoul", "L7 Myeongdong", 110.0, 4.4),
                hotel("Bangkok", "Chatrium Riverside", 85.0, 4.6),
                hotel("Bangkok", "Lub d Silom", 32.0, 4.1),
                hotel("Dubai", "Rove Downtown", 95.0, 4.3),
                hotel("Delhi", "The Lodhi", 260.0, 4.8),
                hotel("Tokyo", "Hotel Gracery Shinjuku", 140.0, 4.2),
                hotel("New York", "Pod 51", 129.0, 3.8),
            ],
        )
    }
}

#[async_trait]
impl TravelDataSource for StaticCatalog {
    async fn flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<FlightOption>, TripError> {
        let flights = self
            .routes
            .iter()
            .filter(|r| r.origin.eq_ignore_ascii_case(origin))
            .filter(|r| r.destination.eq_ignore_ascii_case(destination))
            .filter_map(|r| {
                let time = NaiveTime::from_hms_opt(r.departs_at.0, r.departs_at.1, 0)?;
                let departure = date.and_time(time);
                // Arrivals past the last representable date are unschedulable.
                let arrival =
                    departure.checked_add_signed(TimeDelta::try_minutes(r.duration_minutes)?)?;
                Some(FlightOption {
                    carrier: r.carrier.to_string(),
                    flight_number: r.flight_number.to_string(),
                    price: r.price,
                    departure,
                    arrival,
                })
            })
            .collect();
        Ok(flights)
    }

    async fn hotels(&self, city: &str) -> Result<Vec<HotelListing>, TripError> {
        Ok(self
            .hotels
            .iter()
            .filter(|(c, _)| c.eq_ignore_ascii_case(city))
            .map(|(_, h)| h.clone())
            .collect())
    }
}

/// `search_flights` tool.
pub struct SearchFlightsTool {
    source: Arc<dyn TravelDataSource>,
    parameters: AgentToolParameters,
}

impl SearchFlightsTool {
    pub const NAME: &'static str = "search_flights";

    pub fn new(source: Arc<dyn TravelDataSource>) -> Self {
        Self {
            source,
            parameters: AgentToolParameters::object()
                .string(
                    "origin",
                    "Departure city. Defaults to the traveller's home city.",
                    false,
                )
                .string("destination", "Arrival city", true)
                .date("date", "Departure date (YYYY-MM-DD)", true)
                .amount("max_price", "Highest acceptable fare in USD", false)
                .build(),
        }
    }
}

#[async_trait]
impl Tool for SearchFlightsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Search one-way flights between two cities on a date. Prices are total fares in USD."
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<Value, TripError> {
        let query = FlightQuery {
            origin: args
                .get_str_opt("origin")
                .unwrap_or(&ctx.profile.preferred_city)
                .to_string(),
            destination: args.get_str("destination")?.to_string(),
            date: args.get_date("date")?,
            max_price: args.get_f64_opt("max_price"),
        };
        Ok(search_flights(self.source.as_ref(), &query).await.to_json())
    }
}

/// `search_hotels` tool.
pub struct SearchHotelsTool {
    source: Arc<dyn TravelDataSource>,
    parameters: AgentToolParameters,
}

impl SearchHotelsTool {
    pub const NAME: &'static str = "search_hotels";

    pub fn new(source: Arc<dyn TravelDataSource>) -> Self {
        Self {
            source,
            parameters: AgentToolParameters::object()
                .string("city", "City to stay in", true)
                .amount(
                    "budget",
                    "Maximum price per night in USD. Defaults to the traveller's budget.",
                    false,
                )
                .date("check_in", "Arrival date (YYYY-MM-DD)", true)
                .date("check_out", "Departure date (YYYY-MM-DD)", true)
                .build(),
        }
    }
}

#[async_trait]
impl Tool for SearchHotelsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Search hotels in a city within a nightly budget for the given dates. \
         Each result includes the total cost of the stay in USD."
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<Value, TripError> {
        let query = HotelQuery {
            city: args.get_str("city")?.to_string(),
            budget: args.get_f64_opt("budget").unwrap_or(ctx.profile.budget),
            dates: StayDates {
                check_in: args.get_date("check_in")?,
                check_out: args.get_date("check_out")?,
            },
        };
        Ok(search_hotels(self.source.as_ref(), &query).await.to_json())
    }
}

/// The travel agent's tool set.
pub fn travel_tools(source: Arc<dyn TravelDataSource>) -> ToolSet {
    ToolSet::new(vec![
        Arc::new(SearchFlightsTool::new(source.clone())),
        Arc::new(SearchHotelsTool::new(source)),
    ])
}
