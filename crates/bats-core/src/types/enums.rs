//! Character-coded enumerations from the PITCH symbolic feed.
//!
//! Every enum here is a 1:1 mapping of a single-character wire field. The
//! wire codes are preserved via `as_char` / `TryFrom<char>` so records can be
//! decoded and re-rendered without loss.

use crate::error::BatsError;

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Buy or sell side of an order or trade (`B` / `S`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_char(self) -> char {
        match self {
            Self::Buy => 'B',
            Self::Sell => 'S',
        }
    }
}

impl TryFrom<char> for Side {
    type Error = BatsError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'B' => Ok(Self::Buy),
            'S' => Ok(Self::Sell),
            other => Err(BatsError::InvalidCode("side", other)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

// ---------------------------------------------------------------------------
// Halt status
// ---------------------------------------------------------------------------

/// Trading status of a symbol (`H` halted / `Q` quote-only / `T` trading).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltStatus {
    Halted,
    QuoteOnly,
    Trading,
}

impl HaltStatus {
    pub fn as_char(self) -> char {
        match self {
            Self::Halted => 'H',
            Self::QuoteOnly => 'Q',
            Self::Trading => 'T',
        }
    }
}

impl TryFrom<char> for HaltStatus {
    type Error = BatsError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'H' => Ok(Self::Halted),
            'Q' => Ok(Self::QuoteOnly),
            'T' => Ok(Self::Trading),
            other => Err(BatsError::InvalidCode("halt status", other)),
        }
    }
}

impl std::fmt::Display for HaltStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Halted => write!(f, "halted"),
            Self::QuoteOnly => write!(f, "quote-only"),
            Self::Trading => write!(f, "trading"),
        }
    }
}

// ---------------------------------------------------------------------------
// Auction type
// ---------------------------------------------------------------------------

/// Auction classification (`O` opening / `C` closing / `H` halt / `I` IPO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuctionType {
    Opening,
    Closing,
    Halt,
    Ipo,
}

impl AuctionType {
    pub fn as_char(self) -> char {
        match self {
            Self::Opening => 'O',
            Self::Closing => 'C',
            Self::Halt => 'H',
            Self::Ipo => 'I',
        }
    }
}

impl TryFrom<char> for AuctionType {
    type Error = BatsError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'O' => Ok(Self::Opening),
            'C' => Ok(Self::Closing),
            'H' => Ok(Self::Halt),
            'I' => Ok(Self::Ipo),
            other => Err(BatsError::InvalidCode("auction type", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Retail price improvement interest
// ---------------------------------------------------------------------------

/// Which side(s) carry retail price improvement interest
/// (`B` buy / `S` sell / `A` both / `N` none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpiInterest {
    BuySide,
    SellSide,
    BothSides,
    None,
}

impl RpiInterest {
    pub fn as_char(self) -> char {
        match self {
            Self::BuySide => 'B',
            Self::SellSide => 'S',
            Self::BothSides => 'A',
            Self::None => 'N',
        }
    }
}

impl TryFrom<char> for RpiInterest {
    type Error = BatsError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'B' => Ok(Self::BuySide),
            'S' => Ok(Self::SellSide),
            'A' => Ok(Self::BothSides),
            'N' => Ok(Self::None),
            other => Err(BatsError::InvalidCode("rpi interest", other)),
        }
    }
}
