//! Maps lookup errors to classy_core::AppError for consistent user-facing messages.

mod weather;

pub use weather::LookupErrorExt;
