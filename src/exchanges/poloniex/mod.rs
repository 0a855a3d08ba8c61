pub mod codec;
pub mod conversions;
pub mod signer;
pub mod types;

pub mod builder;
pub mod connector;
pub mod rest;

// Re-export main components
pub use builder::{build_connector, PoloniexBuilder};
pub use connector::{Account, MarketData, PoloniexConnector};
pub use rest::{clamp_depth, PoloniexRest, CHART_PERIODS};
pub use signer::PoloniexSigner;
pub use types::{
    Balance, BookSide, CandleStick, Currency, OrderBook, OrderBookEntry, PoloniexDate,
    PoloniexTimestamp, Ticker, Trade, TradeType, VolumeCollection,
};
