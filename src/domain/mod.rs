// Domain layer: the validated codeplug entities and the storage port.
// No I/O here; everything is built once and shared through `Arc`.

pub mod aprs;
pub mod channel;
pub mod codeplug;
pub mod contact;
pub mod limits;
pub mod ports;
pub mod types;
pub mod zone;

pub use aprs::{Aprs, AprsBuilder};
pub use channel::{
    AnalogChannel, AnalogChannelBuilder, Channel, ChannelBase, ChannelBaseBuilder, DigitalChannel,
    DigitalChannelBuilder,
};
pub use codeplug::{Codeplug, CodeplugBuilder};
pub use contact::{Contact, ContactBuilder, TgList};
pub use types::{Bandwidth, BaudRate, CallType, IconTable, PositionMasking, Power, TalkerAlias, Timeslot};
pub use zone::Zone;
