//! Market data models
//!
//! - `quote` - spot price observations (SpotQuote)
//! - `snapshot` - the per-cycle price mapping (PriceSnapshot, PriceResolution)

mod quote;
mod snapshot;

pub use quote::SpotQuote;
pub use snapshot::{canonicalize_symbol, PriceResolution, PriceSnapshot};
