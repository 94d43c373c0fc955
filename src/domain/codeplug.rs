use crate::domain::aprs::Aprs;
use crate::domain::channel::Channel;
use crate::domain::contact::{Contact, TgList};
use crate::domain::limits;
use crate::domain::zone::Zone;
use crate::utils::error::{CodeplugError, Result, ValidationError};
use crate::utils::validation::{validate_max_entries, Validate};
use std::sync::Arc;

/// The complete configuration loaded onto a radio.
///
/// Construction only checks the collection bounds. Zones, channels and
/// talk-group lists hold their own references, so nothing forces them to
/// point back into this codeplug's lists; [`Codeplug::verify_references`]
/// checks that separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codeplug {
    aprs: Vec<Arc<Aprs>>,
    contacts: Vec<Arc<Contact>>,
    tg_lists: Vec<Arc<TgList>>,
    zones: Vec<Zone>,
    channels: Vec<Arc<Channel>>,
}

impl Codeplug {
    pub fn builder() -> CodeplugBuilder {
        CodeplugBuilder::default()
    }

    pub fn aprs(&self) -> &[Arc<Aprs>] {
        &self.aprs
    }

    pub fn contacts(&self) -> &[Arc<Contact>] {
        &self.contacts
    }

    pub fn tg_lists(&self) -> &[Arc<TgList>] {
        &self.tg_lists
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn channels(&self) -> &[Arc<Channel>] {
        &self.channels
    }

    /// Check that every reference held by a zone, channel or talk-group
    /// list resolves to an entity stored in this codeplug.
    pub fn verify_references(&self) -> Result<()> {
        for list in &self.tg_lists {
            for contact in list.contacts() {
                ensure_listed(&self.contacts, contact, "contact", contact.name(), list.name())?;
            }
        }

        for channel in &self.channels {
            let referrer = channel.name();
            if let Some(aprs) = channel.base().aprs() {
                ensure_listed(&self.aprs, aprs, "APRS", aprs.name(), referrer)?;
            }
            if let Channel::Digital(digital) = &**channel {
                if let Some(contact) = digital.contact() {
                    ensure_listed(&self.contacts, contact, "contact", contact.name(), referrer)?;
                }
                if let Some(list) = digital.tg_list() {
                    ensure_listed(&self.tg_lists, list, "TG list", list.name(), referrer)?;
                }
            }
        }

        for zone in &self.zones {
            for channel in zone.channels() {
                ensure_listed(&self.channels, channel, "channel", channel.name(), zone.name())?;
            }
        }
        Ok(())
    }
}

fn ensure_listed<T: PartialEq>(
    listed: &[Arc<T>],
    wanted: &Arc<T>,
    kind: &'static str,
    name: &str,
    referrer: &str,
) -> Result<()> {
    if listed.iter().any(|item| item == wanted) {
        return Ok(());
    }
    Err(CodeplugError::UnresolvedReference {
        kind,
        name: name.to_string(),
        referrer: referrer.to_string(),
    })
}

impl Validate for Codeplug {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_max_entries("codeplug.contacts", &self.contacts, limits::CONTACTS)?;
        validate_max_entries("codeplug.tg_lists", &self.tg_lists, limits::TG_LISTS)?;
        validate_max_entries("codeplug.zones", &self.zones, limits::ZONES)?;
        validate_max_entries("codeplug.channels", &self.channels, limits::CHANNELS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeplugBuilder {
    inner: Codeplug,
}

impl CodeplugBuilder {
    pub fn aprs(mut self, aprs: Vec<Arc<Aprs>>) -> Self {
        self.inner.aprs = aprs;
        self
    }

    pub fn contacts(mut self, contacts: Vec<Arc<Contact>>) -> Self {
        self.inner.contacts = contacts;
        self
    }

    pub fn tg_lists(mut self, tg_lists: Vec<Arc<TgList>>) -> Self {
        self.inner.tg_lists = tg_lists;
        self
    }

    pub fn zones(mut self, zones: Vec<Zone>) -> Self {
        self.inner.zones = zones;
        self
    }

    pub fn channels(mut self, channels: Vec<Arc<Channel>>) -> Self {
        self.inner.channels = channels;
        self
    }

    pub fn build(self) -> std::result::Result<Codeplug, ValidationError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::{ChannelBase, DigitalChannel};
    use rust_decimal::Decimal;

    fn digital(name: &str, contact: Option<Arc<Contact>>) -> Arc<Channel> {
        let base = ChannelBase::builder(name, Decimal::new(43912500, 5), Decimal::new(43152500, 5))
            .build()
            .unwrap();
        Arc::new(
            DigitalChannel::builder(base)
                .contact(contact)
                .build()
                .unwrap()
                .into(),
        )
    }

    #[test]
    fn test_empty_codeplug() {
        let codeplug = Codeplug::builder().build().unwrap();
        assert!(codeplug.channels().is_empty());
        assert!(codeplug.verify_references().is_ok());
    }

    #[test]
    fn test_tg_list_bound() {
        let lists: Vec<_> = (0..=limits::TG_LISTS)
            .map(|n| Arc::new(TgList::new(&format!("L{n}"), vec![]).unwrap()))
            .collect();
        let err = Codeplug::builder().tg_lists(lists).build().unwrap_err();
        assert_eq!(err.field(), "codeplug.tg_lists");
    }

    #[test]
    fn test_zone_bound() {
        let zones: Vec<_> = (0..=limits::ZONES)
            .map(|n| Zone::new(&format!("Z{n}"), vec![]).unwrap())
            .collect();
        let err = Codeplug::builder().zones(zones).build().unwrap_err();
        assert!(matches!(err, ValidationError::TooMany { max: 68, len: 69, .. }));
    }

    #[test]
    fn test_contact_bound() {
        let contact = Arc::new(Contact::builder("TG 9", 9).build().unwrap());
        let at_bound = vec![contact.clone(); limits::CONTACTS];
        assert!(Codeplug::builder().contacts(at_bound).build().is_ok());

        let over = vec![contact; limits::CONTACTS + 1];
        let err = Codeplug::builder().contacts(over).build().unwrap_err();
        assert!(matches!(err, ValidationError::TooMany { max: 1024, len: 1025, .. }));
        assert_eq!(err.field(), "codeplug.contacts");
    }

    #[test]
    fn test_channel_bound() {
        let channel = digital("Repeater", None);
        let at_bound = vec![channel.clone(); limits::CHANNELS];
        assert!(Codeplug::builder().channels(at_bound).build().is_ok());

        let over = vec![channel; limits::CHANNELS + 1];
        let err = Codeplug::builder().channels(over).build().unwrap_err();
        assert!(matches!(err, ValidationError::TooMany { max: 1024, len: 1025, .. }));
        assert_eq!(err.field(), "codeplug.channels");
    }

    #[test]
    fn test_verify_references_resolved() {
        let contact = Arc::new(Contact::builder("Local", 9).build().unwrap());
        let channel = digital("Repeater", Some(contact.clone()));
        let zone = Zone::new("Home", vec![channel.clone()]).unwrap();
        let codeplug = Codeplug::builder()
            .contacts(vec![contact])
            .channels(vec![channel])
            .zones(vec![zone])
            .build()
            .unwrap();
        assert!(codeplug.verify_references().is_ok());
    }

    #[test]
    fn test_verify_references_dangling_zone_channel() {
        let listed = digital("Listed", None);
        let stray = digital("Stray", None);
        let zone = Zone::new("Home", vec![listed.clone(), stray]).unwrap();
        let codeplug = Codeplug::builder()
            .channels(vec![listed])
            .zones(vec![zone])
            .build()
            .unwrap();

        match codeplug.verify_references() {
            Err(CodeplugError::UnresolvedReference { kind, name, referrer }) => {
                assert_eq!(kind, "channel");
                assert_eq!(name, "Stray");
                assert_eq!(referrer, "Home");
            }
            other => panic!("expected unresolved reference, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_references_dangling_contact() {
        let contact = Arc::new(Contact::builder("Ghost", 7).build().unwrap());
        let codeplug = Codeplug::builder()
            .channels(vec![digital("Repeater", Some(contact))])
            .build()
            .unwrap();
        assert!(codeplug.verify_references().is_err());
    }
}
