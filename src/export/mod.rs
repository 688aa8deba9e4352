pub mod season_json;

pub use season_json::{build_document, SeasonDocument};
