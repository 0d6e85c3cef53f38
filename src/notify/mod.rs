//! Outbound event surface: what the composer announces, and through what

mod events;
mod sink;

pub use events::ComposeEvent;
pub use sink::{ChannelSink, EventSink, NullSink, SinkError};
