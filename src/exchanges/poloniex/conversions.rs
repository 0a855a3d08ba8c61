use super::codec::{
    parse_decimal_text, parse_enum_string, parse_epoch_timestamp, parse_exchange_date, parse_flag,
    parse_quoted_int,
};
use super::types::{
    Balance, CandleStick, Currency, OrderBook, OrderBookEntry, Ticker, Trade, TradeType,
    VolumeCollection,
};
use crate::core::errors::{DecodeErrorKind, ExchangeError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::HashMap;

type Raw = Box<RawValue>;

fn bytes(raw: &RawValue) -> &[u8] {
    raw.get().as_bytes()
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

/// Message of a `{"error": "..."}` body, if that is what `raw` is
pub fn embedded_error(raw: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorEnvelope>(raw)
        .ok()?
        .error
        .filter(|message| !message.is_empty())
}

/// Structural decode that tells exchange-side rejections apart from bad JSON
///
/// The exchange answers bad requests with status 200 and an `error` object in
/// place of the expected shape.
pub fn decode_structure<T: DeserializeOwned>(raw: &[u8]) -> Result<T, ExchangeError> {
    serde_json::from_slice(raw).map_err(|e| match embedded_error(raw) {
        Some(message) => ExchangeError::Application(message),
        None => ExchangeError::decode(DecodeErrorKind::MalformedJson, e.to_string()),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTicker {
    id: i64,
    last: Raw,
    lowest_ask: Raw,
    highest_bid: Raw,
    percent_change: Raw,
    base_volume: Raw,
    quote_volume: Raw,
    #[serde(rename = "high24hr", default)]
    high_24hr: Option<Raw>,
    #[serde(rename = "low24hr", default)]
    low_24hr: Option<Raw>,
    is_frozen: Raw,
}

fn convert_ticker(wire: &WireTicker) -> Result<Ticker, ExchangeError> {
    let optional = |raw: &Option<Raw>| -> Result<Option<String>, ExchangeError> {
        raw.as_deref().map(|r| parse_decimal_text(bytes(r))).transpose()
    };

    Ok(Ticker {
        id: wire.id,
        last: parse_decimal_text(bytes(&wire.last))?,
        lowest_ask: parse_decimal_text(bytes(&wire.lowest_ask))?,
        highest_bid: parse_decimal_text(bytes(&wire.highest_bid))?,
        percent_change: parse_decimal_text(bytes(&wire.percent_change))?,
        base_volume: parse_decimal_text(bytes(&wire.base_volume))?,
        quote_volume: parse_decimal_text(bytes(&wire.quote_volume))?,
        high_24hr: optional(&wire.high_24hr)?,
        low_24hr: optional(&wire.low_24hr)?,
        is_frozen: parse_flag(bytes(&wire.is_frozen))?,
    })
}

pub fn decode_tickers(raw: &[u8]) -> Result<HashMap<String, Ticker>, ExchangeError> {
    let wire: HashMap<String, WireTicker> = decode_structure(raw)?;
    wire.iter()
        .map(|(symbol, ticker)| Ok((symbol.clone(), convert_ticker(ticker)?)))
        .collect()
}

pub fn decode_volumes(raw: &[u8]) -> Result<VolumeCollection, ExchangeError> {
    // an error object is itself a valid string map, so it has to be caught first
    if let Some(message) = embedded_error(raw) {
        return Err(ExchangeError::Application(message));
    }

    let wire: HashMap<String, Raw> = decode_structure(raw)?;
    let mut volumes = VolumeCollection::default();

    for (key, value) in wire {
        if key.starts_with("total") {
            volumes.totals.insert(key, parse_decimal_text(bytes(&value))?);
            continue;
        }

        let per_currency: HashMap<String, Raw> = decode_structure(bytes(&value))?;
        let market = per_currency
            .into_iter()
            .map(|(currency, amount)| Ok((currency, parse_decimal_text(bytes(&amount))?)))
            .collect::<Result<HashMap<_, _>, ExchangeError>>()?;
        volumes.markets.insert(key, market);
    }

    Ok(volumes)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCurrency {
    id: i64,
    name: String,
    tx_fee: Raw,
    min_conf: i64,
    #[serde(default)]
    deposit_address: Option<String>,
    #[serde(default)]
    disabled: Option<Raw>,
    #[serde(default)]
    delisted: Option<Raw>,
    #[serde(default)]
    frozen: Option<Raw>,
}

fn optional_flag(raw: Option<&RawValue>) -> Result<bool, ExchangeError> {
    raw.map_or(Ok(false), |r| parse_flag(bytes(r)))
}

pub fn decode_currencies(raw: &[u8]) -> Result<HashMap<String, Currency>, ExchangeError> {
    let wire: HashMap<String, WireCurrency> = decode_structure(raw)?;
    wire.into_iter()
        .map(|(code, c)| {
            let currency = Currency {
                id: c.id,
                tx_fee: parse_decimal_text(bytes(&c.tx_fee))?,
                min_conf: c.min_conf,
                deposit_address: c.deposit_address,
                disabled: optional_flag(c.disabled.as_deref())?,
                delisted: optional_flag(c.delisted.as_deref())?,
                frozen: optional_flag(c.frozen.as_deref())?,
                name: c.name,
            };
            Ok((code, currency))
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOrderBook {
    #[serde(default)]
    asks: Vec<(Raw, Raw)>,
    #[serde(default)]
    bids: Vec<(Raw, Raw)>,
    #[serde(default)]
    is_frozen: Option<Raw>,
    #[serde(default)]
    seq: i64,
    #[serde(default)]
    error: Option<String>,
}

fn convert_levels(levels: &[(Raw, Raw)]) -> Result<Vec<OrderBookEntry>, ExchangeError> {
    levels
        .iter()
        .map(|(price, amount)| {
            Ok(OrderBookEntry {
                price: parse_decimal_text(bytes(price))?,
                amount: parse_decimal_text(bytes(amount))?,
            })
        })
        .collect()
}

/// Order book, or the exchange's embedded error message
pub fn decode_order_book(raw: &[u8]) -> Result<OrderBook, ExchangeError> {
    let wire: WireOrderBook = decode_structure(raw)?;

    if let Some(message) = wire.error.filter(|m| !m.is_empty()) {
        return Err(ExchangeError::Application(message));
    }

    Ok(OrderBook {
        asks: convert_levels(&wire.asks)?,
        bids: convert_levels(&wire.bids)?,
        is_frozen: optional_flag(wire.is_frozen.as_deref())?,
        seq: wire.seq,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandle {
    date: Raw,
    high: Raw,
    low: Raw,
    open: Raw,
    close: Raw,
    volume: Raw,
    quote_volume: Raw,
    weighted_average: Raw,
}

pub fn decode_chart_data(raw: &[u8]) -> Result<Vec<CandleStick>, ExchangeError> {
    let wire: Vec<WireCandle> = decode_structure(raw)?;
    wire.iter()
        .map(|c| {
            Ok(CandleStick {
                date: parse_epoch_timestamp(bytes(&c.date))?,
                high: parse_decimal_text(bytes(&c.high))?,
                low: parse_decimal_text(bytes(&c.low))?,
                open: parse_decimal_text(bytes(&c.open))?,
                close: parse_decimal_text(bytes(&c.close))?,
                volume: parse_decimal_text(bytes(&c.volume))?,
                quote_volume: parse_decimal_text(bytes(&c.quote_volume))?,
                weighted_average: parse_decimal_text(bytes(&c.weighted_average))?,
            })
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBalance {
    available: Raw,
    on_orders: Raw,
    btc_value: Raw,
}

pub fn decode_balances(raw: &[u8]) -> Result<HashMap<String, Balance>, ExchangeError> {
    let wire: HashMap<String, WireBalance> = decode_structure(raw)?;
    wire.into_iter()
        .map(|(code, b)| {
            let balance = Balance {
                available: parse_decimal_text(bytes(&b.available))?,
                on_orders: parse_decimal_text(bytes(&b.on_orders))?,
                btc_value: parse_decimal_text(bytes(&b.btc_value))?,
            };
            Ok((code, balance))
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTrade {
    global_trade_id: i64,
    trade_id: Raw,
    date: Raw,
    rate: String,
    amount: String,
    total: String,
    fee: String,
    order_number: String,
    #[serde(rename = "type")]
    trade_type: Raw,
    category: String,
}

fn convert_trade(wire: WireTrade) -> Result<Trade, ExchangeError> {
    Ok(Trade {
        global_trade_id: wire.global_trade_id,
        trade_id: parse_quoted_int(bytes(&wire.trade_id))?,
        date: parse_exchange_date(bytes(&wire.date))?,
        trade_type: TradeType::from_wire(parse_enum_string(bytes(&wire.trade_type))),
        rate: wire.rate,
        amount: wire.amount,
        total: wire.total,
        fee: wire.fee,
        order_number: wire.order_number,
        category: wire.category,
    })
}

/// Trade history keyed by market
///
/// The exchange sends `[]` instead of `{}` when there is no history at all.
pub fn decode_trade_history(raw: &[u8]) -> Result<HashMap<String, Vec<Trade>>, ExchangeError> {
    if is_empty_array(raw) {
        return Ok(HashMap::new());
    }

    let wire: HashMap<String, Vec<WireTrade>> = decode_structure(raw)?;
    wire.into_iter()
        .map(|(market, trades)| {
            let trades = trades
                .into_iter()
                .map(convert_trade)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((market, trades))
        })
        .collect()
}

fn is_empty_array(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact == "[]"
}
