use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Column names of the OpenGD77 CPS CSV files.
pub mod columns {
    pub const CHANNEL_NUMBER: &str = "Channel Number";
    pub const CHANNEL_NAME: &str = "Channel Name";
    pub const CHANNEL_TYPE: &str = "Channel Type";
    pub const RX_FREQUENCY: &str = "Rx Frequency";
    pub const TX_FREQUENCY: &str = "Tx Frequency";
    pub const BANDWIDTH: &str = "Bandwidth (kHz)";
    pub const COLOUR_CODE: &str = "Colour Code";
    pub const TIMESLOT: &str = "Timeslot";
    pub const CONTACT: &str = "Contact";
    pub const TG_LIST: &str = "TG List";
    pub const DMR_ID: &str = "DMR ID";
    pub const TS1_TA_TX: &str = "TS1_TA_Tx";
    pub const TS2_TA_TX: &str = "TS2_TA_Tx";
    pub const RX_TONE: &str = "RX Tone";
    pub const TX_TONE: &str = "TX Tone";
    pub const SQUELCH: &str = "Squelch";
    pub const POWER: &str = "Power";
    pub const RX_ONLY: &str = "Rx Only";
    pub const ZONE_SKIP: &str = "Zone Skip";
    pub const ALL_SKIP: &str = "All Skip";
    pub const TOT: &str = "TOT";
    pub const VOX: &str = "VOX";
    pub const NO_BEEP: &str = "No Beep";
    pub const NO_ECO: &str = "No Eco";
    pub const APRS: &str = "APRS";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const USE_LOCATION: &str = "Use location";

    pub const APRS_NAME: &str = "APRS config Name";
    pub const SSID: &str = "SSID";
    pub const VIA1: &str = "Via1";
    pub const VIA1_SSID: &str = "Via1 SSID";
    pub const VIA2: &str = "Via2";
    pub const VIA2_SSID: &str = "Via2 SSID";
    pub const ICON_TABLE: &str = "Icon table";
    pub const ICON: &str = "Icon";
    pub const COMMENT_TEXT: &str = "Comment text";
    pub const AMBIGUITY: &str = "Ambiguity";
    pub const USE_POSITION: &str = "Use position";
    pub const TX_FREQUENCY_APRS: &str = "TX Frequency";
    pub const TRANSMIT_QSY: &str = "Transmit QSY";
    pub const BAUD_RATE_SETTING: &str = "Baud rate setting";

    /// Column order of `Channels.csv`.
    pub const CHANNEL_HEADER: [&str; 28] = [
        CHANNEL_NUMBER,
        CHANNEL_NAME,
        CHANNEL_TYPE,
        RX_FREQUENCY,
        TX_FREQUENCY,
        BANDWIDTH,
        COLOUR_CODE,
        TIMESLOT,
        CONTACT,
        TG_LIST,
        DMR_ID,
        TS1_TA_TX,
        TS2_TA_TX,
        RX_TONE,
        TX_TONE,
        SQUELCH,
        POWER,
        RX_ONLY,
        ZONE_SKIP,
        ALL_SKIP,
        TOT,
        VOX,
        NO_BEEP,
        NO_ECO,
        APRS,
        LATITUDE,
        LONGITUDE,
        USE_LOCATION,
    ];

    /// Column order of `APRS.csv`.
    pub const APRS_HEADER: [&str; 16] = [
        APRS_NAME,
        SSID,
        VIA1,
        VIA1_SSID,
        VIA2,
        VIA2_SSID,
        ICON_TABLE,
        ICON,
        COMMENT_TEXT,
        AMBIGUITY,
        USE_POSITION,
        LATITUDE,
        LONGITUDE,
        TX_FREQUENCY_APRS,
        TRANSMIT_QSY,
        BAUD_RATE_SETTING,
    ];
}

/// One cell of a projected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
}

impl CsvValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CsvValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CsvValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CsvValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for CsvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvValue::Text(s) => write!(f, "{s}"),
            CsvValue::Integer(n) => write!(f, "{n}"),
            CsvValue::Decimal(d) => write!(f, "{d}"),
        }
    }
}

// Decimals go out as strings so no precision is lost in JSON.
impl Serialize for CsvValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CsvValue::Text(s) => serializer.serialize_str(s),
            CsvValue::Integer(n) => serializer.serialize_i64(*n),
            CsvValue::Decimal(d) => serializer.serialize_str(&d.to_string()),
        }
    }
}

impl From<&str> for CsvValue {
    fn from(value: &str) -> Self {
        CsvValue::Text(value.to_string())
    }
}

impl From<String> for CsvValue {
    fn from(value: String) -> Self {
        CsvValue::Text(value)
    }
}

impl From<i64> for CsvValue {
    fn from(value: i64) -> Self {
        CsvValue::Integer(value)
    }
}

impl From<u8> for CsvValue {
    fn from(value: u8) -> Self {
        CsvValue::Integer(i64::from(value))
    }
}

impl From<u32> for CsvValue {
    fn from(value: u32) -> Self {
        CsvValue::Integer(i64::from(value))
    }
}

impl From<Decimal> for CsvValue {
    fn from(value: Decimal) -> Self {
        CsvValue::Decimal(value)
    }
}

/// Ordered column-name to value mapping for one CSV line.
///
/// Columns keep the order they were inserted in; inserting an existing
/// column replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(&'static str, CsvValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &'static str, value: impl Into<CsvValue>) {
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CsvValue> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// Shortcut for text cells, the most common kind in assertions.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(CsvValue::as_text)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CsvValue)> + '_ {
        self.cells.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Lay the row out along `header`; columns the row lacks become empty.
    pub fn to_record(&self, header: &[&str]) -> Vec<String> {
        header
            .iter()
            .map(|column| self.get(column).map(ToString::to_string).unwrap_or_default())
            .collect()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut row = Row::new();
        row.insert(columns::CHANNEL_NUMBER, 1u32);
        row.insert(columns::CHANNEL_NAME, "Local");
        row.insert(columns::CHANNEL_NUMBER, 2u32);

        assert_eq!(row.len(), 2);
        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec![columns::CHANNEL_NUMBER, columns::CHANNEL_NAME]
        );
        assert_eq!(row.get(columns::CHANNEL_NUMBER), Some(&CsvValue::Integer(2)));
    }

    #[test]
    fn test_to_record_fills_missing_columns() {
        let mut row = Row::new();
        row.insert(columns::CHANNEL_NAME, "Local");
        row.insert(columns::RX_FREQUENCY, Decimal::new(44600625, 5));

        let record = row.to_record(&[columns::CHANNEL_NAME, columns::SQUELCH, columns::RX_FREQUENCY]);
        assert_eq!(record, vec!["Local", "", "446.00625"]);
    }

    #[test]
    fn test_serialize_as_ordered_object() {
        let mut row = Row::new();
        row.insert(columns::TOT, 60i64);
        row.insert(columns::RX_FREQUENCY, Decimal::new(14550, 2));
        row.insert(columns::VOX, "Off");

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"TOT":60,"Rx Frequency":"145.50","VOX":"Off"}"#);
    }

    #[test]
    fn test_header_columns_are_unique() {
        let mut seen = std::collections::HashSet::new();
        assert!(columns::CHANNEL_HEADER.iter().all(|c| seen.insert(*c)));
        let mut seen = std::collections::HashSet::new();
        assert!(columns::APRS_HEADER.iter().all(|c| seen.insert(*c)));
    }
}
