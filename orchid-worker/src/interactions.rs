//! Interaction dispatch.
//!
//! ## Processing Flow
//!
//! ```text
//! raw body + headers → verify signature → parse Interaction → route by type → command handler → Reply
//! ```
//!
//! Every path ends in exactly one status and JSON body. Once a request is
//! authenticated and parsed, upstream failures are answered in-band with a
//! 200 reply so Discord can render them as a chat message.

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::commands::{CommandContext, CommandRegistry};
use crate::discord::{ErrorBody, HandshakeAck, Interaction, InteractionKind, Reply};
use crate::web::signature::verify_discord_signature;

pub const INVALID_SIGNATURE: &str = "Invalid signature";
pub const INVALID_PAYLOAD: &str = "Invalid interaction payload";
pub const UNKNOWN_INTERACTION_TYPE: &str = "Unknown interaction type";
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// Status and serialized JSON body produced for one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub status: StatusCode,
    pub body: String,
}

impl InteractionOutcome {
    fn json(status: StatusCode, body: &impl Serialize) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status, body },
            Err(e) => {
                error!(error = %e, "interaction_response_serialize_failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: r#"{"error":"Internal error"}"#.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for InteractionOutcome {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

/// Authenticates, parses and routes interactions.
#[derive(Clone)]
pub struct Dispatcher {
    public_key: Arc<str>,
    registry: Arc<CommandRegistry>,
    context: CommandContext,
}

impl Dispatcher {
    /// `public_key` is the application's hex Ed25519 key; an empty key rejects everything.
    pub fn new(public_key: &str, registry: CommandRegistry, context: CommandContext) -> Self {
        Self {
            public_key: Arc::from(public_key.trim()),
            registry: Arc::new(registry),
            context,
        }
    }

    /// Handle one webhook call.
    pub async fn handle(&self, raw_body: &str, signature: &str, timestamp: &str) -> InteractionOutcome {
        info!(
            body_length = raw_body.len(),
            has_signature = !signature.is_empty(),
            has_timestamp = !timestamp.is_empty(),
            "interaction_received"
        );

        if !verify_discord_signature(raw_body, signature, timestamp, &self.public_key) {
            warn!("interaction_signature_invalid");
            return InteractionOutcome::json(
                StatusCode::UNAUTHORIZED,
                &ErrorBody {
                    error: INVALID_SIGNATURE.to_string(),
                },
            );
        }

        let interaction = match Interaction::parse(raw_body) {
            Ok(interaction) => interaction,
            Err(e) => {
                warn!(error = %e, "interaction_parse_failed");
                return InteractionOutcome::json(
                    StatusCode::BAD_REQUEST,
                    &Reply::message(INVALID_PAYLOAD),
                );
            }
        };

        match interaction.kind {
            InteractionKind::Ping => {
                info!("interaction_ping");
                InteractionOutcome::json(StatusCode::OK, &HandshakeAck::default())
            }
            InteractionKind::ApplicationCommand => self.dispatch(&interaction).await,
            InteractionKind::Other => {
                warn!(interaction_type = ?interaction.raw_kind, "interaction_type_unknown");
                InteractionOutcome::json(
                    StatusCode::BAD_REQUEST,
                    &Reply::message(UNKNOWN_INTERACTION_TYPE),
                )
            }
        }
    }

    async fn dispatch(&self, interaction: &Interaction) -> InteractionOutcome {
        let (Some(command), Some(handler)) = (
            interaction.data.as_ref(),
            interaction.command_name().and_then(|name| self.registry.get(name)),
        ) else {
            warn!(command = ?interaction.command_name(), "interaction_command_unknown");
            return InteractionOutcome::json(
                StatusCode::BAD_REQUEST,
                &Reply::message(UNKNOWN_COMMAND),
            );
        };

        info!(command = %command.name, options = command.options.len(), "interaction_command_routing");

        let reply = handler.handle(&self.context, command).await;

        info!(command = %command.name, "interaction_command_complete");

        InteractionOutcome::json(StatusCode::OK, &reply)
    }
}
