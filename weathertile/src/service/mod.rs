//! Weather map service
//!
//! Orchestrates the flow from request to tile bytes: key construction,
//! cache lookup, upstream fetch on miss, best-effort store, and optional
//! text-art conversion.

mod orchestrator;
mod types;

pub use orchestrator::WeatherMapService;
pub use types::{FetchOutcome, MapOutput, ServiceError};
