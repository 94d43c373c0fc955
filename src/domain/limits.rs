//! Capacity limits of the OpenGD77 firmware codeplug.

pub const CHARS_CHANNEL_NAME: usize = 16;
pub const CHARS_CONTACT_NAME: usize = 16;
pub const CHARS_TG_LIST_NAME: usize = 16;
pub const CHARS_ZONE_NAME: usize = 16;
pub const CHARS_APRS_NAME: usize = 8;
pub const CHARS_APRS_VIA: usize = 6;

pub const CHANNELS: usize = 1024;
pub const CONTACTS: usize = 1024;
pub const TG_LISTS: usize = 76;
pub const TGS_PER_LIST: usize = 32;
pub const ZONES: usize = 68;
pub const CHANNELS_PER_ZONE: usize = 80;

pub const MAX_SSID: u8 = 15;
pub const MAX_CALL_ID: u32 = 99_999_999;
pub const MAX_COLOR_CODE: u8 = 15;

/// Longest transmit timeout the radio accepts, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 495;
