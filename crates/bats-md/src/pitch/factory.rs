//! Type-code dispatch for symbolic PITCH records.

use bats_core::{BatsError, BatsMessage};

use super::parser;

/// Decodes a raw PITCH record into a [`BatsMessage`] by inspecting the type
/// code at offset 8.
///
/// Records shorter than 9 bytes are [`BatsError::Truncated`]; unrecognized
/// type codes are [`BatsError::UnknownMsgType`]; field-level failures carry
/// the type code and the parser's diagnostic.
pub struct BatsMsgFactory;

impl BatsMsgFactory {
    /// Decode a single record. Trailing bytes beyond the record's fixed
    /// width are ignored.
    pub fn parse(record: &str) -> Result<BatsMessage, BatsError> {
        if record.len() < 9 {
            return Err(BatsError::Truncated(record.len()));
        }
        let code = record.as_bytes()[8] as char;

        let parsed = match code {
            'H' => parser::parse_trading_status(record).map(|(_, m)| m.into()),
            'P' | 'r' => parser::parse_trade(record).map(|(_, m)| m.into()),
            'R' => parser::parse_retail_price_improve(record).map(|(_, m)| m.into()),
            'A' | 'd' => parser::parse_add_order(record).map(|(_, m)| m.into()),
            'E' => parser::parse_order_executed(record).map(|(_, m)| m.into()),
            'X' => parser::parse_order_cancel(record).map(|(_, m)| m.into()),
            'B' => parser::parse_trade_break(record).map(|(_, m)| m.into()),
            'J' => parser::parse_auction_summary(record).map(|(_, m)| m.into()),
            'I' => parser::parse_auction_update(record).map(|(_, m)| m.into()),
            other => return Err(BatsError::UnknownMsgType(other)),
        };

        parsed.map_err(|e| BatsError::Parse {
            msg_type: code,
            detail: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bats_core::types::{HaltStatus, Side};

    #[test]
    fn dispatches_all_codes() {
        let records = [
            ("28800001HSPY     T000", 'H'),
            ("28803224P4K27GA00003GB000300SPY   000209060000001AAA23BD", 'P'),
            ("28803225r4K27GA00003GS000100AAPL    000120500000001AAA23BE", 'r'),
            ("28800002RSPY     B", 'R'),
            ("28800011AAK27GA0000DTS000100SH    0000619200Y", 'A'),
            ("28800012dAK27GA0000DUB000200SPY   0002090500YMPID", 'd'),
            ("28800168EAK27GA0000DT00005000001AAA23BC", 'E'),
            ("28801000XAK27GA0000DT000050", 'X'),
            ("28810000B00001AAA23BD", 'B'),
            ("28900000JSPY     C00021000000000010000", 'J'),
            (
                "28850000ISPY     O00020900000000500000000040000000020910000002092000",
                'I',
            ),
        ];
        for (rec, code) in records {
            let msg = BatsMsgFactory::parse(rec).unwrap();
            assert_eq!(msg.msg_type(), code, "record {rec}");
        }
    }

    #[test]
    fn decoded_fields_survive_dispatch() {
        match BatsMsgFactory::parse("28800001HSPY     T000").unwrap() {
            BatsMessage::TradingStatus(m) => {
                assert_eq!(m.symbol, "SPY");
                assert_eq!(m.halt_status, HaltStatus::Trading);
            }
            other => panic!("expected TradingStatus, got {other:?}"),
        }
        match BatsMsgFactory::parse(
            "28803224P4K27GA00003GB000300SPY   000209060000001AAA23BD",
        )
        .unwrap()
        {
            BatsMessage::Trade(m) => {
                assert_eq!(m.side, Side::Buy);
                assert_eq!(m.shares, 300);
            }
            other => panic!("expected Trade, got {other:?}"),
        }
    }

    #[test]
    fn unknown_code() {
        let err = BatsMsgFactory::parse("28800011Zxxxxxxxxxxx").unwrap_err();
        assert!(matches!(err, BatsError::UnknownMsgType('Z')));
    }

    #[test]
    fn truncated_record() {
        let err = BatsMsgFactory::parse("2880001").unwrap_err();
        assert!(matches!(err, BatsError::Truncated(7)));
    }

    #[test]
    fn field_failure_reports_type_code() {
        // Cancel record with non-base36 order id.
        let err = BatsMsgFactory::parse("28801000X!!27GA0000DT000050").unwrap_err();
        match err {
            BatsError::Parse { msg_type, .. } => assert_eq!(msg_type, 'X'),
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
