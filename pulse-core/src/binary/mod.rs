//! Little-endian кодек отсчётов записи.

pub mod read;
pub mod write;

pub use read::*;
pub use write::*;
