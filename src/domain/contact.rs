use crate::domain::limits;
use crate::domain::types::{CallType, Timeslot};
use crate::utils::error::ValidationError;
use crate::utils::validation::{validate_max_entries, validate_name, validate_range, Validate};
use std::sync::Arc;

/// A DMR call destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    name: String,
    call_id: u32,
    call_type: CallType,
    channel_ts_override: Option<Timeslot>,
}

impl Contact {
    pub fn builder(name: &str, call_id: u32) -> ContactBuilder {
        ContactBuilder {
            inner: Contact {
                name: name.to_string(),
                call_id,
                call_type: CallType::Private,
                channel_ts_override: None,
            },
        }
    }

    pub fn to_builder(&self) -> ContactBuilder {
        ContactBuilder { inner: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call_id(&self) -> u32 {
        self.call_id
    }

    pub fn call_type(&self) -> CallType {
        self.call_type
    }

    /// Timeslot forced for this contact regardless of the channel's setting.
    pub fn channel_ts_override(&self) -> Option<Timeslot> {
        self.channel_ts_override
    }
}

impl Validate for Contact {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("contact.name", &self.name, limits::CHARS_CONTACT_NAME)?;
        validate_range("contact.call_id", self.call_id, 0, limits::MAX_CALL_ID)
    }
}

#[derive(Debug, Clone)]
pub struct ContactBuilder {
    inner: Contact,
}

impl ContactBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.inner.name = name.to_string();
        self
    }

    pub fn call_id(mut self, call_id: u32) -> Self {
        self.inner.call_id = call_id;
        self
    }

    pub fn call_type(mut self, call_type: CallType) -> Self {
        self.inner.call_type = call_type;
        self
    }

    pub fn channel_ts_override(mut self, timeslot: Option<Timeslot>) -> Self {
        self.inner.channel_ts_override = timeslot;
        self
    }

    pub fn build(self) -> Result<Contact, ValidationError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

/// A named, ordered group of contacts (talk groups) a digital channel
/// can receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgList {
    name: String,
    contacts: Vec<Arc<Contact>>,
}

impl TgList {
    pub fn new(name: &str, contacts: Vec<Arc<Contact>>) -> Result<Self, ValidationError> {
        let list = TgList {
            name: name.to_string(),
            contacts,
        };
        list.validate()?;
        Ok(list)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contacts(&self) -> &[Arc<Contact>] {
        &self.contacts
    }
}

impl Validate for TgList {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("tg_list.name", &self.name, limits::CHARS_TG_LIST_NAME)?;
        validate_max_entries("tg_list.contacts", &self.contacts, limits::TGS_PER_LIST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talk_group(n: u32) -> Arc<Contact> {
        Arc::new(
            Contact::builder(&format!("TG {n}"), n)
                .call_type(CallType::Group)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_contact_defaults() {
        let contact = Contact::builder("Dispatch", 3100).build().unwrap();
        assert_eq!(contact.call_type(), CallType::Private);
        assert!(contact.channel_ts_override().is_none());
    }

    #[test]
    fn test_contact_call_id_bounds() {
        assert!(Contact::builder("Max", 99_999_999).build().is_ok());
        assert!(Contact::builder("Zero", 0).build().is_ok());
        let err = Contact::builder("Over", 100_000_000).build().unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
        assert_eq!(err.field(), "contact.call_id");
    }

    #[test]
    fn test_contact_rejects_reserved_name() {
        let err = Contact::builder("None", 91).build().unwrap_err();
        assert!(matches!(err, ValidationError::ReservedName { .. }));
    }

    #[test]
    fn test_tg_list_bound() {
        let full: Vec<_> = (1..=limits::TGS_PER_LIST as u32).map(talk_group).collect();
        assert!(TgList::new("Full", full.clone()).is_ok());

        let mut over = full;
        over.push(talk_group(999));
        let err = TgList::new("Over", over).unwrap_err();
        assert!(matches!(err, ValidationError::TooMany { max: 32, len: 33, .. }));
    }

    #[test]
    fn test_tg_list_rejects_reserved_name() {
        assert!(TgList::new("None", vec![]).is_err());
    }

    #[test]
    fn test_tg_list_shares_contacts() {
        let tg = talk_group(91);
        let a = TgList::new("A", vec![tg.clone()]).unwrap();
        let b = TgList::new("B", vec![tg.clone()]).unwrap();
        assert!(Arc::ptr_eq(&a.contacts()[0], &b.contacts()[0]));
    }
}
