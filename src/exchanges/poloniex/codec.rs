//! Decoders for the loosely typed scalars in Poloniex payloads
//!
//! Every function takes the raw JSON text of a single value (quotes included
//! when the exchange sent a string) and is independent of serde, so the
//! mapping layer calls them explicitly field by field.

use crate::core::errors::{DecodeErrorKind, ExchangeError};
use crate::exchanges::poloniex::types::{parse_decimal, PoloniexDate, PoloniexTimestamp};
use chrono::{DateTime, NaiveDateTime, Utc};

fn raw_str(raw: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(raw)
}

fn unquote(raw: &[u8]) -> String {
    raw_str(raw).trim_matches('"').to_string()
}

/// `"2006-01-02 15:04:05"` style date, surrounding quotes optional
pub fn parse_exchange_date(raw: &[u8]) -> Result<PoloniexDate, ExchangeError> {
    let text = unquote(raw);
    NaiveDateTime::parse_from_str(&text, PoloniexDate::FORMAT)
        .map(|naive| PoloniexDate(naive.and_utc()))
        .map_err(|_| {
            ExchangeError::decode(
                DecodeErrorKind::InvalidDate,
                format!("can't parse '{}' as YYYY-MM-DD HH:MM:SS", text),
            )
        })
}

/// Bare base-10 epoch seconds, e.g. `1405699200`
pub fn parse_epoch_timestamp(raw: &[u8]) -> Result<PoloniexTimestamp, ExchangeError> {
    let text = raw_str(raw);
    let seconds = text.parse::<i64>().map_err(|_| {
        ExchangeError::decode(
            DecodeErrorKind::InvalidTimestamp,
            format!("can't parse '{}' as int64 seconds", text),
        )
    })?;

    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(PoloniexTimestamp)
        .ok_or_else(|| {
            ExchangeError::decode(
                DecodeErrorKind::InvalidTimestamp,
                format!("{} seconds is out of range", seconds),
            )
        })
}

/// Quoted enum value with the quotes stripped; never fails
pub fn parse_enum_string(raw: &[u8]) -> String {
    unquote(raw)
}

/// Integer that may arrive quoted (`"123"`) or bare (`123`)
pub fn parse_quoted_int(raw: &[u8]) -> Result<i64, ExchangeError> {
    let text = unquote(raw);
    text.parse::<i64>().map_err(|_| {
        ExchangeError::decode(
            DecodeErrorKind::InvalidInteger,
            format!("can't parse '{}' as int64", text),
        )
    })
}

/// `0`/`1` flag, quoted or bare
pub fn parse_flag(raw: &[u8]) -> Result<bool, ExchangeError> {
    match parse_quoted_int(raw)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ExchangeError::decode(
            DecodeErrorKind::InvalidInteger,
            format!("expected 0 or 1 flag, got {}", other),
        )),
    }
}

/// Numeric quantity kept as text, whether sent as a string or a JSON number
///
/// The text must parse as a decimal (plain or scientific); it is returned as
/// sent so no precision or formatting is lost.
pub fn parse_decimal_text(raw: &[u8]) -> Result<String, ExchangeError> {
    let text = unquote(raw);
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return Err(ExchangeError::decode(
            DecodeErrorKind::InvalidDecimal,
            format!("'{}' is not a number", text),
        ));
    }
    parse_decimal("value", &text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_date_round_trips_through_format() {
        let samples = [
            "2014-07-18 16:20:00",
            "1999-12-31 23:59:59",
            "2024-02-29 00:00:00",
            "2038-01-19 03:14:08",
        ];
        for sample in samples {
            let quoted = format!("\"{}\"", sample);
            let date = parse_exchange_date(quoted.as_bytes()).unwrap();
            assert_eq!(date.to_exchange_string(), sample);
        }
    }

    #[test]
    fn test_date_fields() {
        let date = parse_exchange_date(b"\"2016-03-22 17:32:31\"").unwrap();
        let dt = date.as_datetime();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2016, 3, 22));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (17, 32, 31));
    }

    #[test]
    fn test_date_rejects_other_shapes() {
        let bad: [&[u8]; 6] = [
            b"\"2016-03-22T17:32:31Z\"",
            b"\"2016-03-22\"",
            b"\"17:32:31\"",
            b"\"not a date\"",
            b"1458667951",
            b"\"\"",
        ];
        for raw in bad {
            let err = parse_exchange_date(raw).unwrap_err();
            assert_eq!(
                err.decode_kind(),
                Some(DecodeErrorKind::InvalidDate),
                "{}",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn test_epoch_timestamp_round_trip() {
        for seconds in [0_i64, 1, 1_405_699_200, 2_147_483_648, -86_400] {
            let raw = seconds.to_string();
            let ts = parse_epoch_timestamp(raw.as_bytes()).unwrap();
            assert_eq!(ts.unix(), seconds);
        }
    }

    #[test]
    fn test_epoch_timestamp_rejects_non_integers() {
        let bad: [&[u8]; 5] = [b"\"1405699200\"", b"14056.5", b"abc", b"", b"99999999999999999999"];
        for raw in bad {
            let err = parse_epoch_timestamp(raw).unwrap_err();
            assert_eq!(err.decode_kind(), Some(DecodeErrorKind::InvalidTimestamp));
        }
    }

    #[test]
    fn test_enum_string_accepts_anything() {
        assert_eq!(parse_enum_string(b"\"buy\""), "buy");
        assert_eq!(parse_enum_string(b"\"sell\""), "sell");
        assert_eq!(parse_enum_string(b"\"margin-liquidation\""), "margin-liquidation");
        assert_eq!(parse_enum_string(b"\"\""), "");
    }

    #[test]
    fn test_quoted_int() {
        assert_eq!(parse_quoted_int(b"\"12345\"").unwrap(), 12345);
        assert_eq!(parse_quoted_int(b"12345").unwrap(), 12345);
        let err = parse_quoted_int(b"\"12a\"").unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::InvalidInteger));
    }

    #[test]
    fn test_flags() {
        assert!(!parse_flag(b"\"0\"").unwrap());
        assert!(parse_flag(b"1").unwrap());
        assert!(parse_flag(b"2").is_err());
    }

    #[test]
    fn test_decimal_text_keeps_formatting() {
        assert_eq!(parse_decimal_text(b"\"0.00001000\"").unwrap(), "0.00001000");
        assert_eq!(parse_decimal_text(b"123.45").unwrap(), "123.45");
        assert_eq!(parse_decimal_text(b"1e-8").unwrap(), "1e-8");
        assert!(parse_decimal_text(b"null").is_err());
        assert!(parse_decimal_text(b"\"\"").is_err());
    }

    #[test]
    fn test_decimal_text_rejects_number_fragments() {
        let bad: [&[u8]; 6] = [b"\"-\"", b"\".\"", b"\"e\"", b"\"+-\"", b"\"1.2.3\"", b"\"1e\""];
        for raw in bad {
            let err = parse_decimal_text(raw).unwrap_err();
            assert_eq!(
                err.decode_kind(),
                Some(DecodeErrorKind::InvalidDecimal),
                "{}",
                String::from_utf8_lossy(raw)
            );
        }
    }
}
