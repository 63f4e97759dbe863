// SA Hide Sourcing Agent - Core Library
// Local-first supplier tracking: credibility scoring, price history,
// supplier CRUD, and CSV/JSON transfer over a single key/value store.

pub mod credibility;
pub mod entities;
pub mod export;
pub mod history;
pub mod pricing;
pub mod search;
pub mod store;

// Re-export commonly used types
pub use credibility::{breakdown, score, ScoreBreakdown};
pub use entities::{
    AuthError, HideGrade, RegistryError, Session, SupplierRecord, SupplierRegistry, User,
    UserDirectory, ValidationError,
};
pub use export::{
    parse_suppliers_json, read_suppliers_json, render_history_csv, render_suppliers_json,
    write_history_csv, write_suppliers_json,
};
pub use history::{HistoricalEntry, HistoryLog};
pub use pricing::{delta, format_price, parse_price, PriceMovement, PricingError};
pub use search::{default_directory, price_band, quote_price, search, SearchResult};
pub use store::LocalStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
