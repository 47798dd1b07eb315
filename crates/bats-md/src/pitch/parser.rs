//! nom combinators for the symbolic PITCH record formats.
//!
//! Every record is fixed-width ASCII: an 8-digit timestamp (milliseconds
//! since midnight), a single type-code character, then the type's fields.
//! Field widths:
//!
//! - order / execution IDs: 12 characters, base 36
//! - prices: 10 decimal digits, 4 implied decimal places
//! - share counts: 6 digits (10 in auction records)
//! - symbols: 6 characters in add-order and short trade records,
//!   8 elsewhere, right-space-padded
//!
//! Parsers return the decoded struct and any unconsumed input; width or
//! code violations surface as nom errors which the factory converts to
//! [`BatsError`](bats_core::BatsError).

use bats_core::types::{
    AddOrderMsg, AuctionSummaryMsg, AuctionType, AuctionUpdateMsg, HaltStatus, OrderCancelMsg,
    OrderExecutedMsg, RetailPriceImproveMsg, RpiInterest, Side, TradeBreakMsg, TradeMsg,
    TradingStatusMsg, SYMBOL_LONG, SYMBOL_SHORT,
};
use bats_core::{is_symbol_field, trim_symbol, BatsError};
use nom::{
    bytes::complete::take,
    character::complete::{anychar, char, one_of},
    combinator::{map, map_res, opt, verify},
    IResult,
};

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Fixed-width decimal `u32` field.
fn dec_u32(width: usize) -> impl Fn(&str) -> IResult<&str, u32> {
    move |input| map_res(take(width), |s: &str| s.parse::<u32>())(input)
}

/// Fixed-width decimal `u64` field (prices, large share counters).
fn dec_u64(width: usize) -> impl Fn(&str) -> IResult<&str, u64> {
    move |input| map_res(take(width), |s: &str| s.parse::<u64>())(input)
}

/// Single-digit decimal `u8` field.
fn dec_u8(input: &str) -> IResult<&str, u8> {
    map_res(take(1usize), |s: &str| s.parse::<u8>())(input)
}

/// Fixed-width base-36 ID field (order and execution IDs).
fn base36(width: usize) -> impl Fn(&str) -> IResult<&str, u64> {
    move |input| map_res(take(width), |s: &str| u64::from_str_radix(s, 36))(input)
}

/// Fixed-width right-space-padded symbol field, returned trimmed.
///
/// Rejects fields that are not uppercase alphanumerics plus right padding,
/// so garbage bytes fail the record like any other malformed field.
fn symbol_field(width: usize) -> impl Fn(&str) -> IResult<&str, String> {
    move |input| {
        map(verify(take(width), |s: &str| is_symbol_field(s)), |s: &str| {
            trim_symbol(s).to_string()
        })(input)
    }
}

/// Single-character coded field decoded through `TryFrom<char>`.
fn code<T>(input: &str) -> IResult<&str, T>
where
    T: TryFrom<char, Error = BatsError>,
{
    map_res(anychar, T::try_from)(input)
}

// ---------------------------------------------------------------------------
// Record parsers
// ---------------------------------------------------------------------------

/// Trading status (`H`).
pub fn parse_trading_status(input: &str) -> IResult<&str, TradingStatusMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = char('H')(input)?;
    let (input, symbol) = symbol_field(SYMBOL_LONG)(input)?;
    let (input, halt_status) = code::<HaltStatus>(input)?;
    let (input, reg_sho_action) = dec_u8(input)?;
    let (input, reserved1) = anychar(input)?;
    let (input, reserved2) = anychar(input)?;
    Ok((
        input,
        TradingStatusMsg {
            timestamp,
            msg_type,
            symbol,
            halt_status,
            reg_sho_action,
            reserved1,
            reserved2,
        },
    ))
}

/// Trade (`P` short form / `r` long form).
///
/// The two forms differ only in symbol width: 6 characters for `P`,
/// 8 for `r`.
pub fn parse_trade(input: &str) -> IResult<&str, TradeMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = one_of("Pr")(input)?;
    let (input, order_id) = base36(12)(input)?;
    let (input, side) = code::<Side>(input)?;
    let (input, shares) = dec_u32(6)(input)?;
    let width = if msg_type == 'P' { SYMBOL_SHORT } else { SYMBOL_LONG };
    let (input, symbol) = symbol_field(width)(input)?;
    let (input, price) = dec_u64(10)(input)?;
    let (input, exec_id) = base36(12)(input)?;
    Ok((
        input,
        TradeMsg {
            timestamp,
            msg_type,
            order_id,
            side,
            shares,
            symbol,
            price,
            exec_id,
        },
    ))
}

/// Retail price improvement (`R`).
pub fn parse_retail_price_improve(input: &str) -> IResult<&str, RetailPriceImproveMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = char('R')(input)?;
    let (input, symbol) = symbol_field(SYMBOL_LONG)(input)?;
    let (input, retail_price_improve) = code::<RpiInterest>(input)?;
    Ok((
        input,
        RetailPriceImproveMsg {
            timestamp,
            msg_type,
            symbol,
            retail_price_improve,
        },
    ))
}

/// Add order (`A` / `d`). The `d` form appends a 4-character participant ID.
pub fn parse_add_order(input: &str) -> IResult<&str, AddOrderMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = one_of("Ad")(input)?;
    let (input, order_id) = base36(12)(input)?;
    let (input, side) = code::<Side>(input)?;
    let (input, shares) = dec_u32(6)(input)?;
    let (input, symbol) = symbol_field(SYMBOL_SHORT)(input)?;
    let (input, price) = dec_u64(10)(input)?;
    let (input, display) = anychar(input)?;
    let (input, part_id) = opt(map(take(4usize), |s: &str| trim_symbol(s).to_string()))(input)?;
    Ok((
        input,
        AddOrderMsg {
            timestamp,
            msg_type,
            order_id,
            side,
            shares,
            symbol,
            price,
            display,
            part_id,
        },
    ))
}

/// Order executed (`E`).
pub fn parse_order_executed(input: &str) -> IResult<&str, OrderExecutedMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = char('E')(input)?;
    let (input, order_id) = base36(12)(input)?;
    let (input, shares) = dec_u32(6)(input)?;
    let (input, exec_id) = base36(12)(input)?;
    Ok((
        input,
        OrderExecutedMsg {
            timestamp,
            msg_type,
            order_id,
            shares,
            exec_id,
        },
    ))
}

/// Order cancel (`X`).
pub fn parse_order_cancel(input: &str) -> IResult<&str, OrderCancelMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = char('X')(input)?;
    let (input, order_id) = base36(12)(input)?;
    let (input, shares) = dec_u32(6)(input)?;
    Ok((
        input,
        OrderCancelMsg {
            timestamp,
            msg_type,
            order_id,
            shares,
        },
    ))
}

/// Trade break (`B`).
pub fn parse_trade_break(input: &str) -> IResult<&str, TradeBreakMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = char('B')(input)?;
    let (input, exec_id) = base36(12)(input)?;
    Ok((
        input,
        TradeBreakMsg {
            timestamp,
            msg_type,
            exec_id,
        },
    ))
}

/// Auction summary (`J`).
pub fn parse_auction_summary(input: &str) -> IResult<&str, AuctionSummaryMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = char('J')(input)?;
    let (input, symbol) = symbol_field(SYMBOL_LONG)(input)?;
    let (input, auction_type) = code::<AuctionType>(input)?;
    let (input, price) = dec_u64(10)(input)?;
    let (input, shares) = dec_u32(10)(input)?;
    Ok((
        input,
        AuctionSummaryMsg {
            timestamp,
            msg_type,
            symbol,
            auction_type,
            price,
            shares,
        },
    ))
}

/// Auction update (`I`).
pub fn parse_auction_update(input: &str) -> IResult<&str, AuctionUpdateMsg> {
    let (input, timestamp) = dec_u32(8)(input)?;
    let (input, msg_type) = char('I')(input)?;
    let (input, symbol) = symbol_field(SYMBOL_LONG)(input)?;
    let (input, auction_type) = code::<AuctionType>(input)?;
    let (input, reference_price) = dec_u64(10)(input)?;
    let (input, buyshares) = dec_u32(10)(input)?;
    let (input, sellshares) = dec_u32(10)(input)?;
    let (input, indicative_price) = dec_u64(10)(input)?;
    let (input, auction_only_price) = dec_u64(10)(input)?;
    Ok((
        input,
        AuctionUpdateMsg {
            timestamp,
            msg_type,
            symbol,
            auction_type,
            reference_price,
            buyshares,
            sellshares,
            indicative_price,
            auction_only_price,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trading_status() {
        let (rest, m) = parse_trading_status("28800001HSPY     T000").unwrap();
        assert!(rest.is_empty());
        assert_eq!(m.timestamp, 28_800_001);
        assert_eq!(m.symbol, "SPY");
        assert_eq!(m.halt_status, HaltStatus::Trading);
        assert_eq!(m.reg_sho_action, 0);
    }

    #[test]
    fn short_trade() {
        let rec = "28803224P4K27GA00003GB000300SPY   000209060000001AAA23BD";
        let (rest, m) = parse_trade(rec).unwrap();
        assert!(rest.is_empty());
        assert_eq!(m.msg_type, 'P');
        assert_eq!(m.side, Side::Buy);
        assert_eq!(m.shares, 300);
        assert_eq!(m.symbol, "SPY");
        assert_eq!(m.price, 2_090_600);
        assert_eq!(m.order_id, u64::from_str_radix("4K27GA00003G", 36).unwrap());
    }

    #[test]
    fn long_trade_uses_wide_symbol() {
        let rec = "28803225r4K27GA00003GS000100AAPL    000120500000001AAA23BE";
        let (_, m) = parse_trade(rec).unwrap();
        assert_eq!(m.msg_type, 'r');
        assert_eq!(m.symbol, "AAPL");
        assert_eq!(m.side, Side::Sell);
        assert_eq!(m.price, 1_205_000);
    }

    #[test]
    fn retail_price_improve() {
        let (_, m) = parse_retail_price_improve("28800002RSPY     B").unwrap();
        assert_eq!(m.symbol, "SPY");
        assert_eq!(m.retail_price_improve, RpiInterest::BuySide);
    }

    #[test]
    fn add_order_without_participant() {
        let rec = "28800011AAK27GA0000DTS000100SH    0000619200Y";
        let (rest, m) = parse_add_order(rec).unwrap();
        assert!(rest.is_empty());
        assert_eq!(m.msg_type, 'A');
        assert_eq!(m.side, Side::Sell);
        assert_eq!(m.shares, 100);
        assert_eq!(m.symbol, "SH");
        assert_eq!(m.price, 619_200);
        assert_eq!(m.display, 'Y');
        assert_eq!(m.part_id, None);
    }

    #[test]
    fn add_order_with_participant() {
        let rec = "28800012dAK27GA0000DUB000200SPY   0002090500YMPID";
        let (_, m) = parse_add_order(rec).unwrap();
        assert_eq!(m.msg_type, 'd');
        assert_eq!(m.part_id.as_deref(), Some("MPID"));
    }

    #[test]
    fn order_executed() {
        let rec = "28800168EAK27GA0000DT00005000001AAA23BC";
        let (rest, m) = parse_order_executed(rec).unwrap();
        assert!(rest.is_empty());
        assert_eq!(m.shares, 50);
        assert_eq!(m.order_id, u64::from_str_radix("AK27GA0000DT", 36).unwrap());
        assert_eq!(m.exec_id, u64::from_str_radix("00001AAA23BC", 36).unwrap());
    }

    #[test]
    fn order_cancel() {
        let (_, m) = parse_order_cancel("28801000XAK27GA0000DT000050").unwrap();
        assert_eq!(m.shares, 50);
    }

    #[test]
    fn trade_break() {
        let (_, m) = parse_trade_break("28810000B00001AAA23BD").unwrap();
        assert_eq!(m.exec_id, u64::from_str_radix("00001AAA23BD", 36).unwrap());
    }

    #[test]
    fn auction_summary() {
        let rec = "28900000JSPY     C00021000000000010000";
        let (_, m) = parse_auction_summary(rec).unwrap();
        assert_eq!(m.auction_type, AuctionType::Closing);
        assert_eq!(m.price, 2_100_000);
        assert_eq!(m.shares, 10_000);
    }

    #[test]
    fn auction_update() {
        let rec = "28850000ISPY     O00020900000000500000000040000000020910000002092000";
        let (rest, m) = parse_auction_update(rec).unwrap();
        assert!(rest.is_empty());
        assert_eq!(m.auction_type, AuctionType::Opening);
        assert_eq!(m.reference_price, 2_090_000);
        assert_eq!(m.buyshares, 500_000);
        assert_eq!(m.sellshares, 400_000);
        assert_eq!(m.indicative_price, 2_091_000);
        assert_eq!(m.auction_only_price, 2_092_000);
    }

    #[test]
    fn rejects_bad_side_code() {
        let rec = "28803224P4K27GA00003GQ000300SPY   000209060000001AAA23BD";
        assert!(parse_trade(rec).is_err());
    }

    #[test]
    fn rejects_garbage_symbol_field() {
        // Lowercase symbol bytes.
        assert!(parse_trading_status("28800001Hspy     T000").is_err());
        // Left-padded (space before the symbol).
        let rec = "28803224P4K27GA00003GB000300   SPY000209060000001AAA23BD";
        assert!(parse_trade(rec).is_err());
        // All-space symbol field.
        assert!(parse_retail_price_improve("28800002R        B").is_err());
    }

    #[test]
    fn rejects_non_numeric_timestamp() {
        assert!(parse_order_cancel("2880100aXAK27GA0000DT000050").is_err());
    }

    #[test]
    fn rejects_short_record() {
        assert!(parse_order_executed("28800168EAK27GA").is_err());
    }
}
