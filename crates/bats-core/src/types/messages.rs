//! PITCH message structures — the decoded records flowing through the system.
//!
//! One struct per symbolic PITCH record type. Field widths and semantics
//! follow the exchange format: timestamps are milliseconds since midnight,
//! order and execution IDs are 12-character base-36 values, and prices are
//! 10-digit decimals with four implied decimal places.
//!
//! The `msg_type` field preserves the wire code of the record that produced
//! the struct (relevant for types with multiple codes, e.g. short `P` vs.
//! long `r` trades).

use super::enums::{AuctionType, HaltStatus, RpiInterest, Side};

/// Divisor converting a raw wire price into a decimal price.
///
/// Wire prices carry four implied decimal places: `1081300` is `$108.13`.
pub const PRICE_SCALE: u64 = 10_000;

/// Convert a raw wire price into an `f64` dollar price.
///
/// Only intended for display boundaries; internal accounting stays in raw
/// integer units.
#[inline]
pub fn price_to_f64(raw: u64) -> f64 {
    raw as f64 / PRICE_SCALE as f64
}

// ---------------------------------------------------------------------------
// Message structs
// ---------------------------------------------------------------------------

/// Trading status (`H`) — halt state of a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingStatusMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub symbol: String,
    pub halt_status: HaltStatus,
    pub reg_sho_action: u8,
    pub reserved1: char,
    pub reserved2: char,
}

/// Trade (`P` short form, 6-char symbol / `r` long form, 8-char symbol) —
/// an execution of a non-displayed order.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub order_id: u64,
    pub side: Side,
    pub shares: u32,
    pub symbol: String,
    pub price: u64,
    pub exec_id: u64,
}

/// Retail price improvement (`R`) — which side(s) currently offer RPI.
#[derive(Debug, Clone, PartialEq)]
pub struct RetailPriceImproveMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub symbol: String,
    pub retail_price_improve: RpiInterest,
}

/// Add order (`A` / `d`) — a visible order entering the book.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOrderMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub order_id: u64,
    pub side: Side,
    pub shares: u32,
    pub symbol: String,
    pub price: u64,
    pub display: char,
    /// Participant ID — only present on `d`-form records.
    pub part_id: Option<String>,
}

/// Order executed (`E`) — shares filled against a resting order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderExecutedMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub order_id: u64,
    pub shares: u32,
    pub exec_id: u64,
}

/// Order cancel (`X`) — shares removed from a resting order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCancelMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub order_id: u64,
    pub shares: u32,
}

/// Trade break (`B`) — a previously reported execution is voided.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeBreakMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub exec_id: u64,
}

/// Auction summary (`J`) — result of an opening/closing/halt/IPO auction.
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionSummaryMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub symbol: String,
    pub auction_type: AuctionType,
    pub price: u64,
    pub shares: u32,
}

/// Auction update (`I`) — indicative state of an upcoming auction.
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionUpdateMsg {
    pub timestamp: u32,
    pub msg_type: char,
    pub symbol: String,
    pub auction_type: AuctionType,
    pub reference_price: u64,
    pub buyshares: u32,
    pub sellshares: u32,
    pub indicative_price: u64,
    pub auction_only_price: u64,
}

// ---------------------------------------------------------------------------
// BatsMessage — tagged union for channel passing
// ---------------------------------------------------------------------------

/// A tagged union of all decoded PITCH message types.
#[derive(Debug, Clone, PartialEq)]
pub enum BatsMessage {
    TradingStatus(TradingStatusMsg),
    Trade(TradeMsg),
    RetailPriceImprove(RetailPriceImproveMsg),
    AddOrder(AddOrderMsg),
    OrderExecuted(OrderExecutedMsg),
    OrderCancel(OrderCancelMsg),
    TradeBreak(TradeBreakMsg),
    AuctionSummary(AuctionSummaryMsg),
    AuctionUpdate(AuctionUpdateMsg),
}

impl BatsMessage {
    /// Wire type code of the record that produced this message.
    pub fn msg_type(&self) -> char {
        match self {
            Self::TradingStatus(m) => m.msg_type,
            Self::Trade(m) => m.msg_type,
            Self::RetailPriceImprove(m) => m.msg_type,
            Self::AddOrder(m) => m.msg_type,
            Self::OrderExecuted(m) => m.msg_type,
            Self::OrderCancel(m) => m.msg_type,
            Self::TradeBreak(m) => m.msg_type,
            Self::AuctionSummary(m) => m.msg_type,
            Self::AuctionUpdate(m) => m.msg_type,
        }
    }

    /// Milliseconds since midnight when the exchange generated the record.
    pub fn timestamp_ms(&self) -> u32 {
        match self {
            Self::TradingStatus(m) => m.timestamp,
            Self::Trade(m) => m.timestamp,
            Self::RetailPriceImprove(m) => m.timestamp,
            Self::AddOrder(m) => m.timestamp,
            Self::OrderExecuted(m) => m.timestamp,
            Self::OrderCancel(m) => m.timestamp,
            Self::TradeBreak(m) => m.timestamp,
            Self::AuctionSummary(m) => m.timestamp,
            Self::AuctionUpdate(m) => m.timestamp,
        }
    }

    /// Symbol carried by the record, if the type has one.
    ///
    /// Order-referencing types (`E`, `X`, `B`) identify the instrument only
    /// indirectly through the order / execution ID and return `None`.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::TradingStatus(m) => Some(&m.symbol),
            Self::Trade(m) => Some(&m.symbol),
            Self::RetailPriceImprove(m) => Some(&m.symbol),
            Self::AddOrder(m) => Some(&m.symbol),
            Self::AuctionSummary(m) => Some(&m.symbol),
            Self::AuctionUpdate(m) => Some(&m.symbol),
            Self::OrderExecuted(_) | Self::OrderCancel(_) | Self::TradeBreak(_) => None,
        }
    }
}

macro_rules! impl_from_msg {
    ($variant:ident, $msg:ident) => {
        impl From<$msg> for BatsMessage {
            fn from(m: $msg) -> Self {
                BatsMessage::$variant(m)
            }
        }
    };
}

impl_from_msg!(TradingStatus, TradingStatusMsg);
impl_from_msg!(Trade, TradeMsg);
impl_from_msg!(RetailPriceImprove, RetailPriceImproveMsg);
impl_from_msg!(AddOrder, AddOrderMsg);
impl_from_msg!(OrderExecuted, OrderExecutedMsg);
impl_from_msg!(OrderCancel, OrderCancelMsg);
impl_from_msg!(TradeBreak, TradeBreakMsg);
impl_from_msg!(AuctionSummary, AuctionSummaryMsg);
impl_from_msg!(AuctionUpdate, AuctionUpdateMsg);

// ---------------------------------------------------------------------------
// Display impls
// ---------------------------------------------------------------------------

impl std::fmt::Display for TradeMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trade({} {} {}x{:.4} exec={})",
            self.symbol,
            self.side,
            self.shares,
            price_to_f64(self.price),
            self.exec_id
        )
    }
}

impl std::fmt::Display for AddOrderMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AddOrder({} {} {}x{:.4} oid={})",
            self.symbol,
            self.side,
            self.shares,
            price_to_f64(self.price),
            self.order_id
        )
    }
}

impl std::fmt::Display for TradingStatusMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TradingStatus({} {})", self.symbol, self.halt_status)
    }
}
