//! Feed ingestion and replay: LOBSTER CSV loading, session control and
//! sampled feature export.

mod error;
mod export;
mod loader;
mod session;

pub use error::ReplayError;
pub use export::{FeatureKind, FeatureRegistry};
pub use loader::{
    ASK_ABSENT_PRICE, BID_ABSENT_PRICE, ReferenceLevel, read_message_file, read_orderbook_file,
};
pub use session::ReplaySession;
