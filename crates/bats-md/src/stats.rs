//! Per-feed message statistics.
//!
//! Each book thread owns a [`MsgStats`] and logs its `Display` line at a
//! configured interval and once more when the feed drains.

use bats_core::types::BatsMessage;

/// Counters for one feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgStats {
    pub trading_status: u64,
    pub trade: u64,
    pub retail_price_improve: u64,
    pub add_order: u64,
    pub order_executed: u64,
    pub order_cancel: u64,
    pub trade_break: u64,
    pub auction_summary: u64,
    pub auction_update: u64,
    pub parse_errors: u64,
    pub seq_gaps: u64,
    pub seq_missed: u64,
    pub seq_duplicates: u64,
    pub filtered: u64,
}

impl MsgStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one accepted message.
    #[inline]
    pub fn record(&mut self, msg: &BatsMessage) {
        match msg {
            BatsMessage::TradingStatus(_) => self.trading_status += 1,
            BatsMessage::Trade(_) => self.trade += 1,
            BatsMessage::RetailPriceImprove(_) => self.retail_price_improve += 1,
            BatsMessage::AddOrder(_) => self.add_order += 1,
            BatsMessage::OrderExecuted(_) => self.order_executed += 1,
            BatsMessage::OrderCancel(_) => self.order_cancel += 1,
            BatsMessage::TradeBreak(_) => self.trade_break += 1,
            BatsMessage::AuctionSummary(_) => self.auction_summary += 1,
            BatsMessage::AuctionUpdate(_) => self.auction_update += 1,
        }
    }

    #[inline]
    pub fn record_parse_error(&mut self) {
        self.parse_errors += 1;
    }

    #[inline]
    pub fn record_gap(&mut self, missed: u64) {
        self.seq_gaps += 1;
        self.seq_missed += missed;
    }

    #[inline]
    pub fn record_duplicate(&mut self) {
        self.seq_duplicates += 1;
    }

    #[inline]
    pub fn record_filtered(&mut self) {
        self.filtered += 1;
    }

    /// Total accepted messages across all types.
    pub fn total(&self) -> u64 {
        self.trading_status
            + self.trade
            + self.retail_price_improve
            + self.add_order
            + self.order_executed
            + self.order_cancel
            + self.trade_break
            + self.auction_summary
            + self.auction_update
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for MsgStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total={} add={} exec={} cancel={} trade={} break={} status={} rpi={} \
             auction={}/{} errors={} gaps={}(-{}) dups={} filtered={}",
            self.total(),
            self.add_order,
            self.order_executed,
            self.order_cancel,
            self.trade,
            self.trade_break,
            self.trading_status,
            self.retail_price_improve,
            self.auction_update,
            self.auction_summary,
            self.parse_errors,
            self.seq_gaps,
            self.seq_missed,
            self.seq_duplicates,
            self.filtered,
        )
    }
}
