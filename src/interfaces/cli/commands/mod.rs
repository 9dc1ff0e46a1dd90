//! CLI command implementations

mod caption;
mod convert;

pub use caption::generate_caption;
pub use convert::convert_link;
