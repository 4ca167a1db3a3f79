//! Configuration section definitions.

mod fetch;
mod serve;

pub use fetch::FetchConfig;
pub use serve::{AliasRule, ServeConfig};
