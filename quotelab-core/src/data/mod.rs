//! Data acquisition: provider trait, wire envelopes, and fallback orchestration.

pub mod acquire;
pub mod envelope;
pub mod primary;
pub mod provider;
pub mod secondary;

pub use acquire::DailySeriesAcquirer;
pub use envelope::{ApiClient, ApiData, FieldMap};
pub use primary::PrimaryHttpProvider;
pub use provider::{DataError, QuoteProvider, RawDailyRow};
pub use secondary::SecondaryJobProvider;
