//! TOML codeplug definitions.
//!
//! Entities refer to each other by name; [`CodeplugFile::build_codeplug`]
//! resolves the names and runs every builder, so a definition that loads
//! is a fully validated [`Codeplug`].

use crate::domain::{
    AnalogChannel, Aprs, Bandwidth, BaudRate, CallType, Channel, ChannelBase, Codeplug, Contact,
    DigitalChannel, IconTable, PositionMasking, TalkerAlias, TgList, Timeslot, Zone,
};
use crate::utils::error::{CodeplugError, Result, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeplugFile {
    #[serde(default)]
    pub aprs: Vec<AprsDef>,
    #[serde(default)]
    pub contacts: Vec<ContactDef>,
    #[serde(default)]
    pub tg_lists: Vec<TgListDef>,
    #[serde(default)]
    pub channels: Vec<ChannelDef>,
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AprsDef {
    pub name: String,
    pub tx_ssid: Option<u8>,
    pub via_1: Option<String>,
    pub via_1_ssid: u8,
    pub via_2: Option<String>,
    pub via_2_ssid: u8,
    pub icon_table: Option<IconTable>,
    pub icon: Option<u8>,
    pub comment: Option<String>,
    pub position_masking: Option<PositionMasking>,
    pub fixed_latitude: Option<Decimal>,
    pub fixed_longitude: Option<Decimal>,
    pub use_fixed_position: Option<bool>,
    pub tx_frequency: Option<Decimal>,
    pub transmit_qsy: Option<bool>,
    pub beacon_silently: Option<bool>,
    pub baud_rate: Option<BaudRate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactDef {
    pub name: String,
    pub call_id: u32,
    pub call_type: Option<CallType>,
    pub timeslot: Option<Timeslot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TgListDef {
    pub name: String,
    #[serde(default)]
    pub contacts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    Analog,
    Digital,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelDef {
    pub name: String,
    pub mode: ChannelMode,
    pub rx_frequency: Decimal,
    /// Defaults to the receive frequency (simplex).
    pub tx_frequency: Option<Decimal>,
    pub rx_only: Option<bool>,
    pub zone_skip: Option<bool>,
    pub all_skip: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub vox: Option<bool>,
    pub no_beep: Option<bool>,
    pub no_economy: Option<bool>,
    pub aprs: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub use_location: Option<bool>,

    // analog
    pub bandwidth: Option<Bandwidth>,
    pub tx_tone: Option<String>,
    pub rx_tone: Option<String>,
    pub squelch: Option<Decimal>,

    // digital
    pub color_code: Option<u8>,
    pub timeslot: Option<Timeslot>,
    pub contact: Option<String>,
    pub tg_list: Option<String>,
    pub ts1_talker_alias: Option<TalkerAlias>,
    pub ts2_talker_alias: Option<TalkerAlias>,
    pub dmr_id: Option<u32>,
    pub force_dmo: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneDef {
    pub name: String,
    #[serde(default)]
    pub channels: Vec<String>,
}

impl CodeplugFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CodeplugError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CodeplugError::Definition {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CodeplugError::Definition {
            message: format!("bad substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn build_codeplug(&self) -> Result<Codeplug> {
        let aprs = index("APRS", self.aprs.iter().map(|def| {
            build_aprs(def).map(|a| (def.name.clone(), Arc::new(a)))
        }))?;
        let contacts = index("contact", self.contacts.iter().map(|def| {
            build_contact(def).map(|c| (def.name.clone(), Arc::new(c)))
        }))?;

        let tg_lists = index("TG list", self.tg_lists.iter().map(|def| -> Result<(String, Arc<TgList>)> {
            let members = def
                .contacts
                .iter()
                .map(|name| resolve(&contacts, "contact", name, &def.name))
                .collect::<Result<Vec<_>>>()?;
            let list = TgList::new(&def.name, members).map_err(|e| in_entity(e, &def.name))?;
            Ok((def.name.clone(), Arc::new(list)))
        }))?;

        let channels = index("channel", self.channels.iter().map(|def| -> Result<(String, Arc<Channel>)> {
            let channel = build_channel(def, &aprs, &contacts, &tg_lists)?;
            Ok((def.name.clone(), Arc::new(channel)))
        }))?;

        let zones = self
            .zones
            .iter()
            .map(|def| -> Result<Zone> {
                let members = def
                    .channels
                    .iter()
                    .map(|name| resolve(&channels, "channel", name, &def.name))
                    .collect::<Result<Vec<_>>>()?;
                Zone::new(&def.name, members).map_err(|e| in_entity(e, &def.name))
            })
            .collect::<Result<Vec<_>>>()?;

        let codeplug = Codeplug::builder()
            .aprs(aprs.ordered)
            .contacts(contacts.ordered)
            .tg_lists(tg_lists.ordered)
            .channels(channels.ordered)
            .zones(zones)
            .build()?;

        tracing::debug!(
            "Loaded codeplug definition: {} channels, {} zones, {} contacts",
            codeplug.channels().len(),
            codeplug.zones().len(),
            codeplug.contacts().len()
        );
        Ok(codeplug)
    }
}

/// Entities by name, plus their definition order.
struct Named<T> {
    by_name: HashMap<String, Arc<T>>,
    ordered: Vec<Arc<T>>,
}

fn index<T>(kind: &'static str, items: impl Iterator<Item = Result<(String, Arc<T>)>>) -> Result<Named<T>> {
    let mut named = Named {
        by_name: HashMap::new(),
        ordered: Vec::new(),
    };
    for item in items {
        let (name, entity) = item?;
        if named.by_name.insert(name.clone(), entity.clone()).is_some() {
            return Err(CodeplugError::Definition {
                message: format!("duplicate {} name \"{}\"", kind, name),
            });
        }
        named.ordered.push(entity);
    }
    Ok(named)
}

fn resolve<T>(named: &Named<T>, kind: &'static str, name: &str, referrer: &str) -> Result<Arc<T>> {
    named
        .by_name
        .get(name)
        .cloned()
        .ok_or_else(|| CodeplugError::UnresolvedReference {
            kind,
            name: name.to_string(),
            referrer: referrer.to_string(),
        })
}

fn resolve_opt<T>(named: &Named<T>, kind: &'static str, name: Option<&str>, referrer: &str) -> Result<Option<Arc<T>>> {
    name.map(|n| resolve(named, kind, n, referrer)).transpose()
}

fn in_entity(error: ValidationError, name: &str) -> CodeplugError {
    tracing::error!("\"{}\" failed validation: {}", name, error);
    CodeplugError::Validation(error)
}

fn build_aprs(def: &AprsDef) -> Result<Aprs> {
    let mut builder = Aprs::builder(&def.name, def.via_1_ssid, def.via_2_ssid)
        .position_masking(def.position_masking)
        .tx_frequency(def.tx_frequency);
    if let Some(ssid) = def.tx_ssid {
        builder = builder.tx_ssid(ssid);
    }
    if let Some(via) = &def.via_1 {
        builder = builder.via_1(via, def.via_1_ssid);
    }
    if let Some(via) = &def.via_2 {
        builder = builder.via_2(via, def.via_2_ssid);
    }
    if def.icon_table.is_some() || def.icon.is_some() {
        builder = builder.icon(def.icon_table.unwrap_or_default(), def.icon.unwrap_or(15));
    }
    if let Some(comment) = &def.comment {
        builder = builder.comment(comment);
    }
    if let Some((lat, lon)) = coordinates(
        &def.name,
        ("fixed_latitude", "fixed_longitude"),
        def.fixed_latitude,
        def.fixed_longitude,
    )? {
        builder = builder.fixed_position(lat, lon);
    }
    if let Some(enabled) = def.use_fixed_position {
        builder = builder.use_fixed_position(enabled);
    }
    builder
        .transmit_qsy(def.transmit_qsy.unwrap_or(false))
        .beacon_silently(def.beacon_silently.unwrap_or(false))
        .baud_rate(def.baud_rate.unwrap_or_default())
        .build()
        .map_err(|e| in_entity(e, &def.name))
}

fn build_contact(def: &ContactDef) -> Result<Contact> {
    Contact::builder(&def.name, def.call_id)
        .call_type(def.call_type.unwrap_or_default())
        .channel_ts_override(def.timeslot)
        .build()
        .map_err(|e| in_entity(e, &def.name))
}

fn build_channel(
    def: &ChannelDef,
    aprs: &Named<Aprs>,
    contacts: &Named<Contact>,
    tg_lists: &Named<TgList>,
) -> Result<Channel> {
    let mut base = ChannelBase::builder(
        &def.name,
        def.rx_frequency,
        def.tx_frequency.unwrap_or(def.rx_frequency),
    );
    if let Some((lat, lon)) = coordinates(
        &def.name,
        ("latitude", "longitude"),
        def.latitude,
        def.longitude,
    )? {
        base = base.location(lat, lon);
    }
    let base = base
        .rx_only(def.rx_only.unwrap_or(false))
        .scan_zone_skip(def.zone_skip.unwrap_or(false))
        .scan_all_skip(def.all_skip.unwrap_or(false))
        .timeout(def.timeout_seconds.map(Duration::from_secs))
        .vox(def.vox.unwrap_or(false))
        .no_beep(def.no_beep.unwrap_or(false))
        .no_economy(def.no_economy.unwrap_or(false))
        .aprs(resolve_opt(aprs, "APRS", def.aprs.as_deref(), &def.name)?)
        .use_location(def.use_location.unwrap_or(false))
        .build()
        .map_err(|e| in_entity(e, &def.name))?;

    match def.mode {
        ChannelMode::Analog => {
            reject_foreign_fields(def, "digital", &[
                ("color_code", def.color_code.is_some()),
                ("timeslot", def.timeslot.is_some()),
                ("contact", def.contact.is_some()),
                ("tg_list", def.tg_list.is_some()),
                ("ts1_talker_alias", def.ts1_talker_alias.is_some()),
                ("ts2_talker_alias", def.ts2_talker_alias.is_some()),
                ("dmr_id", def.dmr_id.is_some()),
                ("force_dmo", def.force_dmo.is_some()),
            ])?;
            let channel = AnalogChannel::builder(base)
                .bandwidth(def.bandwidth.unwrap_or_default())
                .tx_tone(def.tx_tone.as_deref())
                .rx_tone(def.rx_tone.as_deref())
                .squelch(def.squelch)
                .build()
                .map_err(|e| in_entity(e, &def.name))?;
            Ok(channel.into())
        }
        ChannelMode::Digital => {
            reject_foreign_fields(def, "analog", &[
                ("bandwidth", def.bandwidth.is_some()),
                ("tx_tone", def.tx_tone.is_some()),
                ("rx_tone", def.rx_tone.is_some()),
                ("squelch", def.squelch.is_some()),
            ])?;
            let channel = DigitalChannel::builder(base)
                .color_code(def.color_code.unwrap_or(0))
                .repeater_timeslot(def.timeslot.unwrap_or_default())
                .contact(resolve_opt(contacts, "contact", def.contact.as_deref(), &def.name)?)
                .tg_list(resolve_opt(tg_lists, "TG list", def.tg_list.as_deref(), &def.name)?)
                .talker_alias(Timeslot::One, def.ts1_talker_alias)
                .talker_alias(Timeslot::Two, def.ts2_talker_alias)
                .override_master_dmr_id(def.dmr_id)
                .force_dmo(def.force_dmo.unwrap_or(false))
                .build()
                .map_err(|e| in_entity(e, &def.name))?;
            Ok(channel.into())
        }
    }
}

/// Latitude and longitude come as a pair; one without the other is an error.
fn coordinates(
    entity: &str,
    fields: (&str, &str),
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
) -> Result<Option<(Decimal, Decimal)>> {
    let (set, missing) = match (latitude, longitude) {
        (Some(lat), Some(lon)) => return Ok(Some((lat, lon))),
        (None, None) => return Ok(None),
        (Some(_), None) => fields,
        (None, Some(_)) => (fields.1, fields.0),
    };
    Err(CodeplugError::Definition {
        message: format!("\"{}\" sets {} without {}", entity, set, missing),
    })
}

fn reject_foreign_fields(def: &ChannelDef, other_mode: &str, fields: &[(&str, bool)]) -> Result<()> {
    match fields.iter().find(|(_, set)| *set) {
        Some((field, _)) => Err(CodeplugError::Definition {
            message: format!(
                "channel \"{}\" sets {} which only applies to {} channels",
                def.name, field, other_mode
            ),
        }),
        None => Ok(()),
    }
}
