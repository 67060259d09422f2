//! Configuration loader and schema types.
//!
//! Settings come from an optional TOML file overlaid with `PLAYDECK__*`
//! environment variables. The loader also knows where the data directory
//! (store file and log) lives.

mod load;
mod schema;

pub use load::{data_dir, default_config_path, resolve_config_path};
pub use schema::*;
