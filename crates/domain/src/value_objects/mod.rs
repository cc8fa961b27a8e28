//! Value Objects - Immutable, identity-less domain primitives

mod chat_id;
mod humidity;
mod location_query;

pub use chat_id::ChatId;
pub use humidity::{Humidity, InvalidHumidity};
pub use location_query::LocationQuery;
