//! Projection of validated codeplug entities onto OpenGD77 CSV rows.
//!
//! Every enumerated setting has exactly one token per column. Absent
//! references and tones are written as the literal `"None"`, which is why
//! entity names may never be `"None"` themselves.

use crate::core::row::{columns, Row};
use crate::domain::aprs::Aprs;
use crate::domain::channel::Channel;
use crate::domain::codeplug::Codeplug;
use crate::domain::types::{Bandwidth, BaudRate, IconTable, PositionMasking, Power};
use crate::utils::error::{CodeplugError, Result};
use crate::utils::validation::{Validate, RESERVED_NAME};
use rust_decimal::Decimal;

/// Transmit timeout written when a channel sets none (or zero), in seconds.
pub const DEFAULT_TIMEOUT_SECS: i64 = 60;

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

pub fn true_false(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

pub fn bandwidth_token(bandwidth: Bandwidth) -> &'static str {
    match bandwidth {
        Bandwidth::Narrow12_5kHz => "12.5",
        Bandwidth::Wide25kHz => "25.0",
    }
}

pub fn power_token(power: Power) -> &'static str {
    match power {
        Power::Master => "Master",
    }
}

pub fn channel_type_token(channel: &Channel) -> &'static str {
    match channel {
        Channel::Analog(_) => "Analogue",
        Channel::Digital(_) => "Digital",
    }
}

pub fn icon_table_code(table: IconTable) -> i64 {
    match table {
        IconTable::Primary => 0,
        IconTable::Alternate => 1,
    }
}

pub fn baud_rate_code(baud_rate: BaudRate) -> i64 {
    match baud_rate {
        BaudRate::Baud1200 => 0,
        BaudRate::Baud300 => 1,
    }
}

/// 0 for exact positions, then 1 (0.0005°) up to 7 (0.5°).
pub fn ambiguity_code(masking: Option<PositionMasking>) -> i64 {
    match masking {
        None => 0,
        Some(PositionMasking::Deg0_0005) => 1,
        Some(PositionMasking::Deg0_0010) => 2,
        Some(PositionMasking::Deg0_0050) => 3,
        Some(PositionMasking::Deg0_0100) => 4,
        Some(PositionMasking::Deg0_0500) => 5,
        Some(PositionMasking::Deg0_1000) => 6,
        Some(PositionMasking::Deg0_5000) => 7,
    }
}

pub fn squelch_to_str(squelch: Option<Decimal>) -> String {
    match squelch {
        None => "Disabled".to_string(),
        Some(s) if s.is_zero() => "Open".to_string(),
        Some(s) if s == Decimal::ONE => "Closed".to_string(),
        Some(s) => format!("{}%", (s * Decimal::ONE_HUNDRED).round()),
    }
}

fn name_or_none(name: Option<&str>) -> &str {
    name.unwrap_or(RESERVED_NAME)
}

fn ensure_valid<T: Validate>(entity: &T, label: String) -> Result<()> {
    entity.validate().map_err(|source| {
        tracing::error!("refusing to project invalid {}: {}", label, source);
        CodeplugError::Precondition {
            entity: label,
            source,
        }
    })
}

/// Project one channel onto a `Channels.csv` row numbered `number`.
///
/// Analog rows carry bandwidth, tones and squelch; digital rows carry colour
/// code, timeslot, contact, TG list and DMR ID. Fails only when the channel
/// breaks its own validation rules, which means it was built by bypassing
/// the builders.
pub fn channel_to_row(channel: &Channel, number: u32) -> Result<Row> {
    ensure_valid(channel, format!("channel \"{}\"", channel.name()))?;
    let base = channel.base();

    let mut row = Row::new();
    row.insert(columns::CHANNEL_NUMBER, number);
    row.insert(columns::CHANNEL_NAME, base.name());
    row.insert(columns::CHANNEL_TYPE, channel_type_token(channel));
    row.insert(columns::RX_FREQUENCY, base.rx_frequency());
    row.insert(columns::TX_FREQUENCY, base.tx_frequency());
    row.insert(columns::POWER, power_token(base.power()));
    row.insert(columns::RX_ONLY, yes_no(base.rx_only()));
    row.insert(columns::ZONE_SKIP, yes_no(base.scan_zone_skip()));
    row.insert(columns::ALL_SKIP, yes_no(base.scan_all_skip()));
    row.insert(
        columns::TOT,
        base.timeout()
            .filter(|t| !t.is_zero())
            .and_then(|t| i64::try_from(t.as_secs()).ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
    );
    row.insert(columns::VOX, on_off(base.vox()));
    row.insert(columns::NO_BEEP, yes_no(base.no_beep()));
    row.insert(columns::NO_ECO, yes_no(base.no_economy()));
    row.insert(columns::APRS, name_or_none(base.aprs().map(|a| a.name())));
    row.insert(columns::LATITUDE, base.latitude());
    row.insert(columns::LONGITUDE, base.longitude());
    row.insert(columns::USE_LOCATION, yes_no(base.use_location()));

    match channel {
        Channel::Analog(analog) => {
            row.insert(columns::BANDWIDTH, bandwidth_token(analog.bandwidth()));
            row.insert(columns::RX_TONE, name_or_none(analog.rx_tone()));
            row.insert(columns::TX_TONE, name_or_none(analog.tx_tone()));
            row.insert(columns::SQUELCH, squelch_to_str(analog.squelch()));
        }
        Channel::Digital(digital) => {
            row.insert(columns::COLOUR_CODE, digital.color_code());
            row.insert(columns::TIMESLOT, digital.repeater_timeslot().number());
            row.insert(columns::CONTACT, name_or_none(digital.contact().map(|c| c.name())));
            row.insert(columns::TG_LIST, name_or_none(digital.tg_list().map(|l| l.name())));
            row.insert(
                columns::DMR_ID,
                digital
                    .override_master_dmr_id()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| RESERVED_NAME.to_string()),
            );
        }
    }

    tracing::trace!("projected channel {} as {:?}", number, row);
    Ok(row)
}

/// Project one APRS profile onto an `APRS.csv` row. The TX frequency column
/// is only present when the profile sets one.
pub fn aprs_to_row(aprs: &Aprs) -> Result<Row> {
    ensure_valid(aprs, format!("APRS profile \"{}\"", aprs.name()))?;

    let mut row = Row::new();
    row.insert(columns::APRS_NAME, aprs.name());
    row.insert(columns::SSID, aprs.tx_ssid());
    row.insert(columns::VIA1, aprs.via_1());
    row.insert(columns::VIA1_SSID, aprs.via_1_ssid());
    row.insert(columns::VIA2, aprs.via_2());
    row.insert(columns::VIA2_SSID, aprs.via_2_ssid());
    row.insert(columns::ICON_TABLE, icon_table_code(aprs.icon_table()));
    row.insert(columns::ICON, aprs.icon());
    row.insert(columns::COMMENT_TEXT, aprs.comment());
    row.insert(columns::AMBIGUITY, ambiguity_code(aprs.position_masking()));
    row.insert(columns::USE_POSITION, true_false(aprs.use_fixed_position()));
    row.insert(columns::LATITUDE, aprs.fixed_latitude());
    row.insert(columns::LONGITUDE, aprs.fixed_longitude());
    if let Some(frequency) = aprs.tx_frequency() {
        row.insert(columns::TX_FREQUENCY_APRS, frequency);
    }
    row.insert(columns::TRANSMIT_QSY, true_false(aprs.transmit_qsy()));
    row.insert(columns::BAUD_RATE_SETTING, baud_rate_code(aprs.baud_rate()));
    Ok(row)
}

/// Channel rows for a whole codeplug, numbered from 1 in list order.
pub fn codeplug_channel_rows(codeplug: &Codeplug) -> Result<Vec<Row>> {
    codeplug
        .channels()
        .iter()
        .zip(1u32..)
        .map(|(channel, number)| channel_to_row(channel, number))
        .collect()
}

pub fn codeplug_aprs_rows(codeplug: &Codeplug) -> Result<Vec<Row>> {
    codeplug.aprs().iter().map(|aprs| aprs_to_row(aprs)).collect()
}
