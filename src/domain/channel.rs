//! Channels: the shared base settings plus the analog and digital variants.
//!
//! A [`Channel`] is a closed sum over the two variants, so code that needs
//! variant-specific behaviour matches on it instead of probing types.
//!
//! ```
//! use opengd77::domain::channel::{AnalogChannel, Channel, ChannelBase};
//! use rust_decimal::Decimal;
//!
//! let base = ChannelBase::builder("PMR 1", Decimal::new(44600625, 5), Decimal::new(44600625, 5))
//!     .build()
//!     .unwrap();
//! let channel: Channel = AnalogChannel::builder(base)
//!     .squelch(Some(Decimal::new(25, 2)))
//!     .build()
//!     .unwrap()
//!     .into();
//! assert_eq!(channel.name(), "PMR 1");
//! ```

use crate::domain::aprs::Aprs;
use crate::domain::contact::{Contact, TgList};
use crate::domain::limits;
use crate::domain::types::{Bandwidth, Power, TalkerAlias, Timeslot};
use crate::utils::error::ValidationError;
use crate::utils::validation::{
    validate_multiple_of, validate_name, validate_non_negative, validate_range, Validate,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// Smallest squelch step the firmware accepts.
pub const SQUELCH_STEP: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Settings every channel carries, whatever its mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelBase {
    name: String,
    rx_frequency: Decimal,
    tx_frequency: Decimal,
    power: Power,
    rx_only: bool,
    scan_zone_skip: bool,
    scan_all_skip: bool,
    timeout: Option<Duration>,
    vox: bool,
    no_beep: bool,
    no_economy: bool,
    aprs: Option<Arc<Aprs>>,
    latitude: Decimal,
    longitude: Decimal,
    use_location: bool,
}

impl ChannelBase {
    /// Frequencies are in MHz.
    pub fn builder(name: &str, rx_frequency: Decimal, tx_frequency: Decimal) -> ChannelBaseBuilder {
        ChannelBaseBuilder {
            inner: ChannelBase {
                name: name.to_string(),
                rx_frequency,
                tx_frequency,
                power: Power::Master,
                rx_only: false,
                scan_zone_skip: false,
                scan_all_skip: false,
                timeout: None,
                vox: false,
                no_beep: false,
                no_economy: false,
                aprs: None,
                latitude: Decimal::ZERO,
                longitude: Decimal::ZERO,
                use_location: false,
            },
        }
    }

    pub fn to_builder(&self) -> ChannelBaseBuilder {
        ChannelBaseBuilder { inner: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rx_frequency(&self) -> Decimal {
        self.rx_frequency
    }

    pub fn tx_frequency(&self) -> Decimal {
        self.tx_frequency
    }

    pub fn power(&self) -> Power {
        self.power
    }

    pub fn rx_only(&self) -> bool {
        self.rx_only
    }

    pub fn scan_zone_skip(&self) -> bool {
        self.scan_zone_skip
    }

    pub fn scan_all_skip(&self) -> bool {
        self.scan_all_skip
    }

    /// Transmit timeout; `None` leaves the radio at its default.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn vox(&self) -> bool {
        self.vox
    }

    pub fn no_beep(&self) -> bool {
        self.no_beep
    }

    pub fn no_economy(&self) -> bool {
        self.no_economy
    }

    pub fn aprs(&self) -> Option<&Arc<Aprs>> {
        self.aprs.as_ref()
    }

    pub fn latitude(&self) -> Decimal {
        self.latitude
    }

    pub fn longitude(&self) -> Decimal {
        self.longitude
    }

    pub fn use_location(&self) -> bool {
        self.use_location
    }
}

impl Validate for ChannelBase {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("channel.name", &self.name, limits::CHARS_CHANNEL_NAME)?;
        validate_non_negative("channel.rx_frequency", self.rx_frequency)?;
        validate_non_negative("channel.tx_frequency", self.tx_frequency)?;
        match self.timeout {
            Some(timeout) => {
                validate_range("channel.timeout", timeout.as_secs(), 0, limits::MAX_TIMEOUT_SECS)
            }
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChannelBaseBuilder {
    inner: ChannelBase,
}

impl ChannelBaseBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.inner.name = name.to_string();
        self
    }

    pub fn frequencies(mut self, rx: Decimal, tx: Decimal) -> Self {
        self.inner.rx_frequency = rx;
        self.inner.tx_frequency = tx;
        self
    }

    pub fn power(mut self, power: Power) -> Self {
        self.inner.power = power;
        self
    }

    pub fn rx_only(mut self, enabled: bool) -> Self {
        self.inner.rx_only = enabled;
        self
    }

    pub fn scan_zone_skip(mut self, enabled: bool) -> Self {
        self.inner.scan_zone_skip = enabled;
        self
    }

    pub fn scan_all_skip(mut self, enabled: bool) -> Self {
        self.inner.scan_all_skip = enabled;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.inner.timeout = timeout;
        self
    }

    pub fn vox(mut self, enabled: bool) -> Self {
        self.inner.vox = enabled;
        self
    }

    pub fn no_beep(mut self, enabled: bool) -> Self {
        self.inner.no_beep = enabled;
        self
    }

    pub fn no_economy(mut self, enabled: bool) -> Self {
        self.inner.no_economy = enabled;
        self
    }

    pub fn aprs(mut self, aprs: Option<Arc<Aprs>>) -> Self {
        self.inner.aprs = aprs;
        self
    }

    pub fn location(mut self, latitude: Decimal, longitude: Decimal) -> Self {
        self.inner.latitude = latitude;
        self.inner.longitude = longitude;
        self
    }

    pub fn use_location(mut self, enabled: bool) -> Self {
        self.inner.use_location = enabled;
        self
    }

    pub fn build(self) -> Result<ChannelBase, ValidationError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

/// FM channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalogChannel {
    base: ChannelBase,
    bandwidth: Bandwidth,
    tx_tone: Option<String>,
    rx_tone: Option<String>,
    squelch: Option<Decimal>,
}

impl AnalogChannel {
    pub fn builder(base: ChannelBase) -> AnalogChannelBuilder {
        AnalogChannelBuilder {
            inner: AnalogChannel {
                base,
                bandwidth: Bandwidth::Narrow12_5kHz,
                tx_tone: None,
                rx_tone: None,
                squelch: None,
            },
        }
    }

    pub fn to_builder(&self) -> AnalogChannelBuilder {
        AnalogChannelBuilder { inner: self.clone() }
    }

    pub fn base(&self) -> &ChannelBase {
        &self.base
    }

    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    pub fn tx_tone(&self) -> Option<&str> {
        self.tx_tone.as_deref()
    }

    pub fn rx_tone(&self) -> Option<&str> {
        self.rx_tone.as_deref()
    }

    /// Squelch level from 0.00 (open) to 1.00 (closed); `None` disables it.
    pub fn squelch(&self) -> Option<Decimal> {
        self.squelch
    }
}

impl Validate for AnalogChannel {
    fn validate(&self) -> Result<(), ValidationError> {
        self.base.validate()?;
        for (field, tone) in [("channel.tx_tone", &self.tx_tone), ("channel.rx_tone", &self.rx_tone)] {
            if matches!(tone.as_deref(), Some("")) {
                return Err(ValidationError::Empty {
                    field: field.to_string(),
                });
            }
        }
        if let Some(squelch) = self.squelch {
            validate_range("channel.squelch", squelch, Decimal::ZERO, Decimal::ONE)?;
            validate_multiple_of("channel.squelch", squelch, SQUELCH_STEP)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AnalogChannelBuilder {
    inner: AnalogChannel,
}

impl AnalogChannelBuilder {
    pub fn base(mut self, base: ChannelBase) -> Self {
        self.inner.base = base;
        self
    }

    pub fn bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.inner.bandwidth = bandwidth;
        self
    }

    /// CTCSS/DCS code as the radio's tone list spells it, e.g. `"88.5"`
    /// or `"D023N"`.
    pub fn tx_tone(mut self, tone: Option<&str>) -> Self {
        self.inner.tx_tone = tone.map(str::to_string);
        self
    }

    pub fn rx_tone(mut self, tone: Option<&str>) -> Self {
        self.inner.rx_tone = tone.map(str::to_string);
        self
    }

    pub fn squelch(mut self, squelch: Option<Decimal>) -> Self {
        self.inner.squelch = squelch;
        self
    }

    pub fn build(self) -> Result<AnalogChannel, ValidationError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

/// DMR channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitalChannel {
    base: ChannelBase,
    tg_list: Option<Arc<TgList>>,
    color_code: u8,
    contact: Option<Arc<Contact>>,
    repeater_timeslot: Timeslot,
    timeslot_1_talker_alias: Option<TalkerAlias>,
    timeslot_2_talker_alias: Option<TalkerAlias>,
    override_master_dmr_id: Option<u32>,
    force_dmo: bool,
}

impl DigitalChannel {
    pub fn builder(base: ChannelBase) -> DigitalChannelBuilder {
        DigitalChannelBuilder {
            inner: DigitalChannel {
                base,
                tg_list: None,
                color_code: 0,
                contact: None,
                repeater_timeslot: Timeslot::One,
                timeslot_1_talker_alias: None,
                timeslot_2_talker_alias: None,
                override_master_dmr_id: None,
                force_dmo: false,
            },
        }
    }

    pub fn to_builder(&self) -> DigitalChannelBuilder {
        DigitalChannelBuilder { inner: self.clone() }
    }

    pub fn base(&self) -> &ChannelBase {
        &self.base
    }

    pub fn tg_list(&self) -> Option<&Arc<TgList>> {
        self.tg_list.as_ref()
    }

    pub fn color_code(&self) -> u8 {
        self.color_code
    }

    pub fn contact(&self) -> Option<&Arc<Contact>> {
        self.contact.as_ref()
    }

    pub fn repeater_timeslot(&self) -> Timeslot {
        self.repeater_timeslot
    }

    pub fn timeslot_1_talker_alias(&self) -> Option<TalkerAlias> {
        self.timeslot_1_talker_alias
    }

    pub fn timeslot_2_talker_alias(&self) -> Option<TalkerAlias> {
        self.timeslot_2_talker_alias
    }

    /// DMR ID transmitted on this channel instead of the radio's own.
    pub fn override_master_dmr_id(&self) -> Option<u32> {
        self.override_master_dmr_id
    }

    pub fn force_dmo(&self) -> bool {
        self.force_dmo
    }
}

impl Validate for DigitalChannel {
    fn validate(&self) -> Result<(), ValidationError> {
        self.base.validate()?;
        validate_range("channel.color_code", self.color_code, 0, limits::MAX_COLOR_CODE)
    }
}

#[derive(Debug, Clone)]
pub struct DigitalChannelBuilder {
    inner: DigitalChannel,
}

impl DigitalChannelBuilder {
    pub fn base(mut self, base: ChannelBase) -> Self {
        self.inner.base = base;
        self
    }

    pub fn tg_list(mut self, tg_list: Option<Arc<TgList>>) -> Self {
        self.inner.tg_list = tg_list;
        self
    }

    pub fn color_code(mut self, color_code: u8) -> Self {
        self.inner.color_code = color_code;
        self
    }

    pub fn contact(mut self, contact: Option<Arc<Contact>>) -> Self {
        self.inner.contact = contact;
        self
    }

    pub fn repeater_timeslot(mut self, timeslot: Timeslot) -> Self {
        self.inner.repeater_timeslot = timeslot;
        self
    }

    pub fn talker_alias(mut self, timeslot: Timeslot, alias: Option<TalkerAlias>) -> Self {
        match timeslot {
            Timeslot::One => self.inner.timeslot_1_talker_alias = alias,
            Timeslot::Two => self.inner.timeslot_2_talker_alias = alias,
        }
        self
    }

    pub fn override_master_dmr_id(mut self, dmr_id: Option<u32>) -> Self {
        self.inner.override_master_dmr_id = dmr_id;
        self
    }

    pub fn force_dmo(mut self, enabled: bool) -> Self {
        self.inner.force_dmo = enabled;
        self
    }

    pub fn build(self) -> Result<DigitalChannel, ValidationError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    Analog(AnalogChannel),
    Digital(DigitalChannel),
}

impl Channel {
    pub fn base(&self) -> &ChannelBase {
        match self {
            Channel::Analog(c) => c.base(),
            Channel::Digital(c) => c.base(),
        }
    }

    pub fn name(&self) -> &str {
        self.base().name()
    }

    pub fn is_digital(&self) -> bool {
        matches!(self, Channel::Digital(_))
    }
}

impl Validate for Channel {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Channel::Analog(c) => c.validate(),
            Channel::Digital(c) => c.validate(),
        }
    }
}

impl From<AnalogChannel> for Channel {
    fn from(channel: AnalogChannel) -> Self {
        Channel::Analog(channel)
    }
}

impl From<DigitalChannel> for Channel {
    fn from(channel: DigitalChannel) -> Self {
        Channel::Digital(channel)
    }
}
