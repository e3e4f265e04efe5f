//! Discord interaction protocol types and command registration.

pub mod registration;
pub mod types;

pub use registration::{CommandDefinition, CommandOptionDefinition, CommandRegistrar};
pub use types::{
    CommandData, CommandOption, Embed, ErrorBody, HandshakeAck, Interaction, InteractionKind,
    PayloadError, Reply, ReplyData,
};
