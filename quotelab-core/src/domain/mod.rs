//! Domain types: bars, enriched bars, snapshots, trading ranges.

pub mod bar;
pub mod range;
pub mod snapshot;

pub use bar::DailyBar;
pub use range::{parse_wire_date, to_wire_date, TradingRange};
pub use snapshot::{IndicatorBar, MarketSnapshot};
