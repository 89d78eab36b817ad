//! Tool system for function calling.

pub mod arguments;
pub mod registry;
pub mod tool;
pub mod travel;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use registry::{ToolSet, NO_RESULTS};
pub use tool::{Tool, ToolExecutionContext};
pub use travel::{
    search_flights, search_hotels, travel_tools, FlightOption, FlightQuery, HotelListing,
    HotelOption, HotelQuery, SearchFlightsTool, SearchHotelsTool, SearchOutcome, StaticCatalog,
    StayDates, TravelDataSource,
};
pub use types::AgentToolParameters;
