use crate::domain::limits;
use crate::domain::types::{BaudRate, IconTable, PositionMasking};
use crate::utils::error::ValidationError;
use crate::utils::validation::{
    validate_max_chars, validate_name, validate_non_negative, validate_range, Validate,
};
use rust_decimal::Decimal;

/// An APRS beacon profile that channels can attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aprs {
    name: String,
    tx_ssid: u8,
    via_1: String,
    via_1_ssid: u8,
    via_2: String,
    via_2_ssid: u8,
    icon_table: IconTable,
    icon: u8,
    comment: String,
    position_masking: Option<PositionMasking>,
    use_fixed_position: bool,
    fixed_latitude: Decimal,
    fixed_longitude: Decimal,
    tx_frequency: Option<Decimal>,
    transmit_qsy: bool,
    beacon_silently: bool,
    baud_rate: BaudRate,
}

impl Aprs {
    /// Start a profile. The digipeater SSIDs have no sensible default and
    /// must be given up front.
    pub fn builder(name: &str, via_1_ssid: u8, via_2_ssid: u8) -> AprsBuilder {
        AprsBuilder {
            inner: Aprs {
                name: name.to_string(),
                tx_ssid: 7,
                via_1: "WIDE1".to_string(),
                via_1_ssid,
                via_2: "WIDE2".to_string(),
                via_2_ssid,
                icon_table: IconTable::Primary,
                icon: 15,
                comment: String::new(),
                position_masking: None,
                use_fixed_position: false,
                fixed_latitude: Decimal::ZERO,
                fixed_longitude: Decimal::ZERO,
                tx_frequency: None,
                transmit_qsy: false,
                beacon_silently: false,
                baud_rate: BaudRate::Baud1200,
            },
        }
    }

    /// Reopen this profile for editing; `build()` yields a new instance.
    pub fn to_builder(&self) -> AprsBuilder {
        AprsBuilder { inner: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tx_ssid(&self) -> u8 {
        self.tx_ssid
    }

    pub fn via_1(&self) -> &str {
        &self.via_1
    }

    pub fn via_1_ssid(&self) -> u8 {
        self.via_1_ssid
    }

    pub fn via_2(&self) -> &str {
        &self.via_2
    }

    pub fn via_2_ssid(&self) -> u8 {
        self.via_2_ssid
    }

    pub fn icon_table(&self) -> IconTable {
        self.icon_table
    }

    pub fn icon(&self) -> u8 {
        self.icon
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn position_masking(&self) -> Option<PositionMasking> {
        self.position_masking
    }

    pub fn use_fixed_position(&self) -> bool {
        self.use_fixed_position
    }

    pub fn fixed_latitude(&self) -> Decimal {
        self.fixed_latitude
    }

    pub fn fixed_longitude(&self) -> Decimal {
        self.fixed_longitude
    }

    pub fn tx_frequency(&self) -> Option<Decimal> {
        self.tx_frequency
    }

    pub fn transmit_qsy(&self) -> bool {
        self.transmit_qsy
    }

    pub fn beacon_silently(&self) -> bool {
        self.beacon_silently
    }

    pub fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }
}

impl Validate for Aprs {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("aprs.name", &self.name, limits::CHARS_APRS_NAME)?;
        validate_range("aprs.tx_ssid", self.tx_ssid, 0, limits::MAX_SSID)?;
        validate_max_chars("aprs.via_1", &self.via_1, limits::CHARS_APRS_VIA)?;
        validate_range("aprs.via_1_ssid", self.via_1_ssid, 0, limits::MAX_SSID)?;
        validate_max_chars("aprs.via_2", &self.via_2, limits::CHARS_APRS_VIA)?;
        validate_range("aprs.via_2_ssid", self.via_2_ssid, 0, limits::MAX_SSID)?;
        if let Some(freq) = self.tx_frequency {
            validate_non_negative("aprs.tx_frequency", freq)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AprsBuilder {
    inner: Aprs,
}

impl AprsBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.inner.name = name.to_string();
        self
    }

    pub fn tx_ssid(mut self, ssid: u8) -> Self {
        self.inner.tx_ssid = ssid;
        self
    }

    /// First digipeater path, e.g. `WIDE1` with SSID 1.
    pub fn via_1(mut self, callsign: &str, ssid: u8) -> Self {
        self.inner.via_1 = callsign.to_string();
        self.inner.via_1_ssid = ssid;
        self
    }

    pub fn via_2(mut self, callsign: &str, ssid: u8) -> Self {
        self.inner.via_2 = callsign.to_string();
        self.inner.via_2_ssid = ssid;
        self
    }

    pub fn icon(mut self, table: IconTable, icon: u8) -> Self {
        self.inner.icon_table = table;
        self.inner.icon = icon;
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.inner.comment = comment.to_string();
        self
    }

    pub fn position_masking(mut self, masking: Option<PositionMasking>) -> Self {
        self.inner.position_masking = masking;
        self
    }

    /// Beacon a fixed position instead of the radio's GPS fix.
    pub fn fixed_position(mut self, latitude: Decimal, longitude: Decimal) -> Self {
        self.inner.use_fixed_position = true;
        self.inner.fixed_latitude = latitude;
        self.inner.fixed_longitude = longitude;
        self
    }

    pub fn use_fixed_position(mut self, enabled: bool) -> Self {
        self.inner.use_fixed_position = enabled;
        self
    }

    pub fn tx_frequency(mut self, frequency: Option<Decimal>) -> Self {
        self.inner.tx_frequency = frequency;
        self
    }

    pub fn transmit_qsy(mut self, enabled: bool) -> Self {
        self.inner.transmit_qsy = enabled;
        self
    }

    pub fn beacon_silently(mut self, enabled: bool) -> Self {
        self.inner.beacon_silently = enabled;
        self
    }

    pub fn baud_rate(mut self, baud_rate: BaudRate) -> Self {
        self.inner.baud_rate = baud_rate;
        self
    }

    pub fn build(self) -> Result<Aprs, ValidationError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
