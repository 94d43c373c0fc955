//! Enumerated settings shared by the codeplug entities.
//!
//! Each enum parses from the token used in codeplug definition files
//! (case-insensitive) so the TOML loader and callers share one spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Error returned when a definition token does not name a known setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    kind: &'static str,
    token: String,
}

impl ParseTokenError {
    fn new(kind: &'static str, token: &str) -> Self {
        Self {
            kind,
            token: token.to_string(),
        }
    }
}

impl fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.token)
    }
}

impl std::error::Error for ParseTokenError {}

macro_rules! string_token {
    ($ty:ty) => {
        impl TryFrom<String> for $ty {
            type Error = ParseTokenError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.to_string()
            }
        }
    };
}

/// Analog channel bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Bandwidth {
    /// 12.5 kHz (narrow).
    #[default]
    Narrow12_5kHz,
    /// 25 kHz (wide).
    Wide25kHz,
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bandwidth::Narrow12_5kHz => write!(f, "12.5kHz"),
            Bandwidth::Wide25kHz => write!(f, "25kHz"),
        }
    }
}

impl FromStr for Bandwidth {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().trim_end_matches("khz") {
            "12.5" => Ok(Bandwidth::Narrow12_5kHz),
            "25" | "25.0" => Ok(Bandwidth::Wide25kHz),
            _ => Err(ParseTokenError::new("bandwidth", s)),
        }
    }
}

string_token!(Bandwidth);

/// Transmit power. The firmware currently exposes only the master setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Power {
    #[default]
    Master,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CallType {
    #[default]
    Private,
    Group,
    All,
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallType::Private => "Private",
            CallType::Group => "Group",
            CallType::All => "All",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CallType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "private" => Ok(CallType::Private),
            "group" => Ok(CallType::Group),
            "all" => Ok(CallType::All),
            _ => Err(ParseTokenError::new("call type", s)),
        }
    }
}

string_token!(CallType);

/// DMR timeslot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Timeslot {
    #[default]
    One,
    Two,
}

impl Timeslot {
    pub fn number(self) -> u8 {
        match self {
            Timeslot::One => 1,
            Timeslot::Two => 2,
        }
    }
}

impl TryFrom<u8> for Timeslot {
    type Error = ParseTokenError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Timeslot::One),
            2 => Ok(Timeslot::Two),
            n => Err(ParseTokenError::new("timeslot", &n.to_string())),
        }
    }
}

impl From<Timeslot> for u8 {
    fn from(value: Timeslot) -> u8 {
        value.number()
    }
}

/// Talker alias content sent on a timeslot. Both flags may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TalkerAlias {
    bits: u8,
}

impl TalkerAlias {
    pub const APRS: TalkerAlias = TalkerAlias { bits: 0b01 };
    pub const TEXT: TalkerAlias = TalkerAlias { bits: 0b10 };

    pub fn contains(self, other: TalkerAlias) -> bool {
        self.bits & other.bits == other.bits
    }
}

impl BitOr for TalkerAlias {
    type Output = TalkerAlias;

    fn bitor(self, rhs: TalkerAlias) -> TalkerAlias {
        TalkerAlias {
            bits: self.bits | rhs.bits,
        }
    }
}

impl fmt::Display for TalkerAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(TalkerAlias::APRS), self.contains(TalkerAlias::TEXT)) {
            (true, true) => write!(f, "APRS|Text"),
            (true, false) => write!(f, "APRS"),
            _ => write!(f, "Text"),
        }
    }
}

impl FromStr for TalkerAlias {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = 0;
        for part in s.split('|').map(str::trim) {
            bits |= match part.to_ascii_lowercase().as_str() {
                "aprs" => TalkerAlias::APRS.bits,
                "text" => TalkerAlias::TEXT.bits,
                _ => return Err(ParseTokenError::new("talker alias", s)),
            };
        }
        Ok(TalkerAlias { bits })
    }
}

string_token!(TalkerAlias);

/// APRS symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IconTable {
    #[default]
    Primary,
    Alternate,
}

impl fmt::Display for IconTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconTable::Primary => write!(f, "Primary"),
            IconTable::Alternate => write!(f, "Alternate"),
        }
    }
}

impl FromStr for IconTable {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" => Ok(IconTable::Primary),
            "alternate" => Ok(IconTable::Alternate),
            _ => Err(ParseTokenError::new("icon table", s)),
        }
    }
}

string_token!(IconTable);

/// Precision to which a beaconed position is blurred, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PositionMasking {
    Deg0_0005,
    Deg0_0010,
    Deg0_0050,
    Deg0_0100,
    Deg0_0500,
    Deg0_1000,
    Deg0_5000,
}

impl PositionMasking {
    pub const ALL: [PositionMasking; 7] = [
        PositionMasking::Deg0_0005,
        PositionMasking::Deg0_0010,
        PositionMasking::Deg0_0050,
        PositionMasking::Deg0_0100,
        PositionMasking::Deg0_0500,
        PositionMasking::Deg0_1000,
        PositionMasking::Deg0_5000,
    ];

    pub fn degrees(self) -> &'static str {
        match self {
            PositionMasking::Deg0_0005 => "0.0005",
            PositionMasking::Deg0_0010 => "0.0010",
            PositionMasking::Deg0_0050 => "0.0050",
            PositionMasking::Deg0_0100 => "0.0100",
            PositionMasking::Deg0_0500 => "0.0500",
            PositionMasking::Deg0_1000 => "0.1000",
            PositionMasking::Deg0_5000 => "0.5000",
        }
    }
}

impl fmt::Display for PositionMasking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl FromStr for PositionMasking {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: rust_decimal::Decimal = s
            .trim()
            .parse()
            .map_err(|_| ParseTokenError::new("position masking", s))?;
        PositionMasking::ALL
            .into_iter()
            .find(|m| m.degrees().parse::<rust_decimal::Decimal>().ok() == Some(wanted))
            .ok_or_else(|| ParseTokenError::new("position masking", s))
    }
}

string_token!(PositionMasking);

/// APRS packet baud rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum BaudRate {
    /// 1200 baud, VHF/UHF.
    #[default]
    Baud1200,
    /// 300 baud, HF.
    Baud300,
}

impl TryFrom<u16> for BaudRate {
    type Error = ParseTokenError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1200 => Ok(BaudRate::Baud1200),
            300 => Ok(BaudRate::Baud300),
            n => Err(ParseTokenError::new("baud rate", &n.to_string())),
        }
    }
}

impl From<BaudRate> for u16 {
    fn from(value: BaudRate) -> u16 {
        match value {
            BaudRate::Baud1200 => 1200,
            BaudRate::Baud300 => 300,
        }
    }
}

impl FromStr for BaudRate {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .map_err(|_| ParseTokenError::new("baud rate", s))
            .and_then(BaudRate::try_from)
    }
}
