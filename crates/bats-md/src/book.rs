//! Open-order tracking and executed-volume accounting.
//!
//! [`VolumeBook`] consumes the order-lifecycle messages of the feed:
//!
//! - add order (`A`/`d`) — opens a resting order (`order_id` → symbol, shares)
//! - order executed (`E`) — fills against a resting order and accrues
//!   executed volume for its symbol
//! - order cancel (`X`) — removes shares from a resting order
//! - trade (`P`/`r`) — accrues volume directly (hidden-order executions)
//! - trade break (`B`) — backs a previously reported execution out again
//!
//! Status, RPI, and auction messages do not touch the book.

use ahash::AHashMap;
use bats_core::types::{
    AddOrderMsg, BatsMessage, OrderCancelMsg, OrderExecutedMsg, TradeBreakMsg, TradeMsg,
};

/// A resting order known to the book.
#[derive(Debug, Clone)]
struct OpenOrder {
    symbol: String,
    remaining: u32,
}

/// Per-symbol executed-volume book.
///
/// # Thread safety
///
/// Not thread-safe. Each book thread owns its own instance.
pub struct VolumeBook {
    /// Resting orders by order ID.
    orders: AHashMap<u64, OpenOrder>,
    /// Executions by execution ID, kept so trade breaks can reverse them.
    execs: AHashMap<u64, (String, u32)>,
    /// Accumulated executed volume per symbol.
    volume: AHashMap<String, u64>,
    /// Executions against orders the book never saw (filtered or pre-session).
    unknown_orders: u64,
    /// Trade breaks for executions the book never saw.
    unknown_breaks: u64,
}

impl VolumeBook {
    pub fn new() -> Self {
        Self {
            orders: AHashMap::new(),
            execs: AHashMap::new(),
            volume: AHashMap::new(),
            unknown_orders: 0,
            unknown_breaks: 0,
        }
    }

    /// Apply one decoded message to the book. Non-lifecycle messages are
    /// ignored.
    pub fn apply(&mut self, msg: &BatsMessage) {
        match msg {
            BatsMessage::AddOrder(m) => self.add_order(m),
            BatsMessage::OrderExecuted(m) => self.order_executed(m),
            BatsMessage::OrderCancel(m) => self.order_cancel(m),
            BatsMessage::Trade(m) => self.trade(m),
            BatsMessage::TradeBreak(m) => self.trade_break(m),
            _ => {}
        }
    }

    fn add_order(&mut self, m: &AddOrderMsg) {
        self.orders.insert(
            m.order_id,
            OpenOrder {
                symbol: m.symbol.clone(),
                remaining: m.shares,
            },
        );
    }

    fn order_executed(&mut self, m: &OrderExecutedMsg) {
        let Some(order) = self.orders.get_mut(&m.order_id) else {
            self.unknown_orders += 1;
            return;
        };
        let filled = m.shares.min(order.remaining);
        order.remaining -= filled;
        let symbol = order.symbol.clone();
        if order.remaining == 0 {
            self.orders.remove(&m.order_id);
        }
        *self.volume.entry(symbol.clone()).or_insert(0) += filled as u64;
        self.execs.insert(m.exec_id, (symbol, filled));
    }

    fn order_cancel(&mut self, m: &OrderCancelMsg) {
        let Some(order) = self.orders.get_mut(&m.order_id) else {
            self.unknown_orders += 1;
            return;
        };
        order.remaining = order.remaining.saturating_sub(m.shares);
        if order.remaining == 0 {
            self.orders.remove(&m.order_id);
        }
    }

    fn trade(&mut self, m: &TradeMsg) {
        *self.volume.entry(m.symbol.clone()).or_insert(0) += m.shares as u64;
        self.execs.insert(m.exec_id, (m.symbol.clone(), m.shares));
    }

    fn trade_break(&mut self, m: &TradeBreakMsg) {
        let Some((symbol, shares)) = self.execs.remove(&m.exec_id) else {
            self.unknown_breaks += 1;
            return;
        };
        if let Some(vol) = self.volume.get_mut(&symbol) {
            *vol = vol.saturating_sub(shares as u64);
        }
    }

    /// Executed volume accumulated for a symbol.
    pub fn executed_volume(&self, symbol: &str) -> u64 {
        self.volume.get(symbol).copied().unwrap_or(0)
    }

    /// Number of resting orders currently tracked.
    pub fn open_orders(&self) -> usize {
        self.orders.len()
    }

    /// Executions against order IDs the book never saw.
    pub fn unknown_orders(&self) -> u64 {
        self.unknown_orders
    }

    /// Trade breaks for execution IDs the book never saw.
    pub fn unknown_breaks(&self) -> u64 {
        self.unknown_breaks
    }

    /// The `n` highest-volume symbols, descending; ties broken by symbol so
    /// the report is deterministic.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        let mut all: Vec<(String, u64)> =
            self.volume.iter().map(|(s, &v)| (s.clone(), v)).collect();
        all.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        all.truncate(n);
        all
    }
}

impl Default for VolumeBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bats_core::types::Side;

    fn add(book: &mut VolumeBook, order_id: u64, symbol: &str, shares: u32) {
        book.apply(
            &AddOrderMsg {
                timestamp: 1,
                msg_type: 'A',
                order_id,
                side: Side::Sell,
                shares,
                symbol: symbol.to_string(),
                price: 1_000_000,
                display: 'Y',
                part_id: None,
            }
            .into(),
        );
    }

    fn exec(book: &mut VolumeBook, order_id: u64, shares: u32, exec_id: u64) {
        book.apply(
            &OrderExecutedMsg {
                timestamp: 2,
                msg_type: 'E',
                order_id,
                shares,
                exec_id,
            }
            .into(),
        );
    }

    #[test]
    fn execution_accrues_volume() {
        let mut book = VolumeBook::new();
        add(&mut book, 10, "SPY", 300);
        exec(&mut book, 10, 100, 900);
        exec(&mut book, 10, 200, 901);

        assert_eq!(book.executed_volume("SPY"), 300);
        // Fully filled order is removed.
        assert_eq!(book.open_orders(), 0);
    }

    #[test]
    fn cancel_removes_shares_without_volume() {
        let mut book = VolumeBook::new();
        add(&mut book, 10, "SPY", 300);
        book.apply(
            &OrderCancelMsg {
                timestamp: 3,
                msg_type: 'X',
                order_id: 10,
                shares: 300,
            }
            .into(),
        );
        assert_eq!(book.executed_volume("SPY"), 0);
        assert_eq!(book.open_orders(), 0);
    }

    #[test]
    fn trade_accrues_directly() {
        let mut book = VolumeBook::new();
        book.apply(
            &TradeMsg {
                timestamp: 4,
                msg_type: 'P',
                order_id: 99,
                side: Side::Buy,
                shares: 500,
                symbol: "QQQ".to_string(),
                price: 2_000_000,
                exec_id: 950,
            }
            .into(),
        );
        assert_eq!(book.executed_volume("QQQ"), 500);
    }

    #[test]
    fn trade_break_reverses_execution() {
        let mut book = VolumeBook::new();
        add(&mut book, 10, "SPY", 300);
        exec(&mut book, 10, 100, 900);
        assert_eq!(book.executed_volume("SPY"), 100);

        book.apply(
            &TradeBreakMsg {
                timestamp: 5,
                msg_type: 'B',
                exec_id: 900,
            }
            .into(),
        );
        assert_eq!(book.executed_volume("SPY"), 0);

        // A second break for the same exec is unknown.
        book.apply(
            &TradeBreakMsg {
                timestamp: 6,
                msg_type: 'B',
                exec_id: 900,
            }
            .into(),
        );
        assert_eq!(book.unknown_breaks(), 1);
    }

    #[test]
    fn trade_break_reverses_trade_sourced_execution() {
        let mut book = VolumeBook::new();
        book.apply(
            &TradeMsg {
                timestamp: 4,
                msg_type: 'r',
                order_id: 99,
                side: Side::Buy,
                shares: 500,
                symbol: "QQQ".to_string(),
                price: 2_000_000,
                exec_id: 950,
            }
            .into(),
        );
        assert_eq!(book.executed_volume("QQQ"), 500);

        book.apply(
            &TradeBreakMsg {
                timestamp: 5,
                msg_type: 'B',
                exec_id: 950,
            }
            .into(),
        );
        assert_eq!(book.executed_volume("QQQ"), 0);
        assert_eq!(book.unknown_breaks(), 0);
    }

    #[test]
    fn over_execution_is_clamped() {
        let mut book = VolumeBook::new();
        add(&mut book, 10, "SPY", 100);
        exec(&mut book, 10, 250, 900);
        assert_eq!(book.executed_volume("SPY"), 100);
        assert_eq!(book.open_orders(), 0);
    }

    #[test]
    fn execution_against_unknown_order() {
        let mut book = VolumeBook::new();
        exec(&mut book, 42, 100, 900);
        assert_eq!(book.executed_volume("SPY"), 0);
        assert_eq!(book.unknown_orders(), 1);
    }

    #[test]
    fn top_n_ordering() {
        let mut book = VolumeBook::new();
        add(&mut book, 1, "AAA", 1000);
        add(&mut book, 2, "BBB", 1000);
        add(&mut book, 3, "CCC", 1000);
        exec(&mut book, 1, 100, 900);
        exec(&mut book, 2, 300, 901);
        exec(&mut book, 3, 300, 902);

        let top = book.top_n(2);
        assert_eq!(top.len(), 2);
        // BBB and CCC tie on volume; symbol order breaks the tie.
        assert_eq!(top[0], ("BBB".to_string(), 300));
        assert_eq!(top[1], ("CCC".to_string(), 300));
    }
}
