pub mod error;
pub mod header;
pub mod record;

pub use error::*;
pub use header::*;
pub use record::*;
