use crate::domain::channel::Channel;
use crate::domain::limits;
use crate::utils::error::ValidationError;
use crate::utils::validation::{validate_max_entries, validate_name, Validate};
use std::sync::Arc;

/// A named page of channels on the radio. Channels may be analog or digital
/// and the same channel may sit in several zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    name: String,
    channels: Vec<Arc<Channel>>,
}

impl Zone {
    pub fn new(name: &str, channels: Vec<Arc<Channel>>) -> Result<Self, ValidationError> {
        let zone = Zone {
            name: name.to_string(),
            channels,
        };
        zone.validate()?;
        Ok(zone)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channels(&self) -> &[Arc<Channel>] {
        &self.channels
    }
}

impl Validate for Zone {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("zone.name", &self.name, limits::CHARS_ZONE_NAME)?;
        validate_max_entries("zone.channels", &self.channels, limits::CHANNELS_PER_ZONE)
    }
}
