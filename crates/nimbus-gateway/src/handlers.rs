mod health;
mod weather;

pub use health::{health_handler, meta_handler, not_found_handler, root_handler};
pub use weather::{bulk_weather_handler, single_weather_handler};
