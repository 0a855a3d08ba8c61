use crate::core::errors::{DecodeErrorKind, ExchangeError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Calendar time the exchange writes as `YYYY-MM-DD HH:MM:SS` (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoloniexDate(pub DateTime<Utc>);

impl PoloniexDate {
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render back into the exchange's wire pattern
    pub fn to_exchange_string(&self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

impl fmt::Display for PoloniexDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_exchange_string())
    }
}

/// Calendar time the exchange sends as Unix epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoloniexTimestamp(pub DateTime<Utc>);

impl PoloniexTimestamp {
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }
}

/// Side of a fill in the trade history
///
/// Parsing is permissive: anything other than `buy`/`sell` is kept verbatim in
/// `Other` instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TradeType {
    Buy,
    Sell,
    Other(String),
}

impl TradeType {
    pub const BUY: &'static str = "buy";
    pub const SELL: &'static str = "sell";

    pub fn from_wire(value: String) -> Self {
        match value.as_str() {
            Self::BUY => Self::Buy,
            Self::SELL => Self::Sell,
            _ => Self::Other(value),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Buy => Self::BUY,
            Self::Sell => Self::SELL,
            Self::Other(value) => value,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of the order book the caller wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookSide {
    Bid,
    Ask,
    #[default]
    Both,
}

impl BookSide {
    /// Unknown selectors fall back to `Both`
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "bid" => Self::Bid,
            "ask" => Self::Ask,
            _ => Self::Both,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
            Self::Both => "both",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    pub id: i64,
    pub last: String,
    pub lowest_ask: String,
    pub highest_bid: String,
    pub percent_change: String,
    pub base_volume: String,
    pub quote_volume: String,
    pub high_24hr: Option<String>,
    pub low_24hr: Option<String>,
    pub is_frozen: bool,
}

impl Ticker {
    pub fn last_price(&self) -> Result<Decimal, ExchangeError> {
        parse_decimal("last", &self.last)
    }

    /// Midpoint between best bid and best ask
    pub fn mid_price(&self) -> Result<Decimal, ExchangeError> {
        let bid = parse_decimal("highestBid", &self.highest_bid)?;
        let ask = parse_decimal("lowestAsk", &self.lowest_ask)?;
        Ok((bid + ask) / Decimal::TWO)
    }
}

/// One price level; both values stay in the exchange's textual form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBookEntry {
    pub price: String,
    pub amount: String,
}

impl OrderBookEntry {
    pub fn price_decimal(&self) -> Result<Decimal, ExchangeError> {
        parse_decimal("price", &self.price)
    }

    pub fn amount_decimal(&self) -> Result<Decimal, ExchangeError> {
        parse_decimal("amount", &self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderBook {
    pub asks: Vec<OrderBookEntry>,
    pub bids: Vec<OrderBookEntry>,
    pub is_frozen: bool,
    pub seq: i64,
}

impl OrderBook {
    /// Drop the half of the book the selector does not ask for
    pub fn retain_side(&mut self, side: BookSide) {
        match side {
            BookSide::Bid => self.asks.clear(),
            BookSide::Ask => self.bids.clear(),
            BookSide::Both => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleStick {
    pub date: PoloniexTimestamp,
    pub high: String,
    pub low: String,
    pub open: String,
    pub close: String,
    pub volume: String,
    pub quote_volume: String,
    pub weighted_average: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub available: String,
    pub on_orders: String,
    pub btc_value: String,
}

impl Balance {
    /// Available plus amount held in open orders
    pub fn total(&self) -> Result<Decimal, ExchangeError> {
        Ok(parse_decimal("available", &self.available)?
            + parse_decimal("onOrders", &self.on_orders)?)
    }

    pub fn is_empty(&self) -> Result<bool, ExchangeError> {
        Ok(self.total()?.is_zero())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub id: i64,
    pub name: String,
    pub tx_fee: String,
    pub min_conf: i64,
    pub deposit_address: Option<String>,
    pub disabled: bool,
    pub delisted: bool,
    pub frozen: bool,
}

/// 24h volume per market plus the exchange-wide `total*` entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VolumeCollection {
    pub markets: HashMap<String, HashMap<String, String>>,
    pub totals: HashMap<String, String>,
}

impl VolumeCollection {
    pub fn market(&self, pair: &str) -> Option<&HashMap<String, String>> {
        self.markets.get(&pair.to_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub global_trade_id: i64,
    pub trade_id: i64,
    pub date: PoloniexDate,
    pub rate: String,
    pub amount: String,
    pub total: String,
    pub fee: String,
    pub order_number: String,
    pub trade_type: TradeType,
    pub category: String,
}

impl Trade {
    pub fn rate_decimal(&self) -> Result<Decimal, ExchangeError> {
        parse_decimal("rate", &self.rate)
    }

    pub fn amount_decimal(&self) -> Result<Decimal, ExchangeError> {
        parse_decimal("amount", &self.amount)
    }
}

pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<Decimal, ExchangeError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|e| {
            ExchangeError::decode(
                DecodeErrorKind::InvalidDecimal,
                format!("{} = '{}': {}", field, value, e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_book_side_selector_fallback() {
        let cases = [
            ("bid", BookSide::Bid),
            ("ask", BookSide::Ask),
            ("both", BookSide::Both),
            ("xyz", BookSide::Both),
            ("", BookSide::Both),
        ];
        for (selector, expected) in cases {
            assert_eq!(BookSide::from_selector(selector), expected, "{:?}", selector);
        }
    }

    #[test]
    fn test_trade_type_keeps_unknown_values() {
        assert_eq!(TradeType::from_wire("buy".to_string()), TradeType::Buy);
        assert_eq!(TradeType::from_wire("sell".to_string()), TradeType::Sell);
        let odd = TradeType::from_wire("SELL".to_string());
        assert_eq!(odd, TradeType::Other("SELL".to_string()));
        assert_eq!(odd.as_str(), "SELL");
        assert!(!odd.is_known());
    }

    #[test]
    fn test_balance_total() {
        let balance = Balance {
            available: "1.50000000".to_string(),
            on_orders: "0.25".to_string(),
            btc_value: "0.00000000".to_string(),
        };
        assert_eq!(balance.total().unwrap(), Decimal::new(175, 2));
        assert!(!balance.is_empty().unwrap());
    }

    #[test]
    fn test_bad_decimal_reports_field() {
        let err = parse_decimal("rate", "abc").unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::InvalidDecimal));
        assert!(err.to_string().contains("rate"));
    }

    #[test]
    fn test_scientific_notation_amounts() {
        assert_eq!(parse_decimal("amount", "1e-8").unwrap(), Decimal::new(1, 8));
    }

    #[test]
    fn test_retain_side() {
        let entry = OrderBookEntry {
            price: "1".to_string(),
            amount: "2".to_string(),
        };
        let mut book = OrderBook {
            asks: vec![entry.clone()],
            bids: vec![entry],
            ..OrderBook::default()
        };
        book.retain_side(BookSide::Ask);
        assert_eq!(book.asks.len(), 1);
        assert!(book.bids.is_empty());
    }
}
