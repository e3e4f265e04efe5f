//! Slash command definitions and their one-time registration with Discord.
//!
//! Registration is a deployment step run by `orchid-register`; the web server
//! only uses the definitions as its dispatch keys.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

/// Application command option type for free-text input.
pub const OPTION_TYPE_STRING: u8 = 3;

/// Errors from publishing the command table.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Discord rejected command {command} with status {status}: {body}")]
    Rejected {
        command: &'static str,
        status: u16,
        body: String,
    },
}

/// A slash command as published to Discord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOptionDefinition>,
}

/// One option of a [`CommandDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOptionDefinition {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl CommandDefinition {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: CommandOptionDefinition) -> Self {
        self.options.push(option);
        self
    }
}

impl CommandOptionDefinition {
    /// The optional `wallet` string accepted by wallet-taking commands.
    pub fn wallet() -> Self {
        Self {
            kind: OPTION_TYPE_STRING,
            name: "wallet",
            description: "WAX wallet address (default: amfr2.wam)",
            required: false,
        }
    }
}

/// Publishes command definitions for one application.
pub struct CommandRegistrar {
    client: Client,
    endpoint: String,
    bot_token: String,
}

impl CommandRegistrar {
    pub fn new(client: Client, api_base: &str, application_id: &str, bot_token: String) -> Self {
        Self {
            client,
            endpoint: commands_endpoint(api_base, application_id),
            bot_token,
        }
    }

    /// POST every definition in order, stopping at the first rejection.
    pub async fn register_all(
        &self,
        definitions: &[CommandDefinition],
    ) -> Result<usize, RegistrationError> {
        for definition in definitions {
            self.register(definition).await?;
        }

        info!(count = definitions.len(), "commands_registered");
        Ok(definitions.len())
    }

    async fn register(&self, definition: &CommandDefinition) -> Result<(), RegistrationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(definition)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                command = definition.name,
                status = status.as_u16(),
                body = %body,
                "command_registration_rejected"
            );
            return Err(RegistrationError::Rejected {
                command: definition.name,
                status: status.as_u16(),
                body,
            });
        }

        info!(command = definition.name, status = status.as_u16(), "command_registered");
        Ok(())
    }
}

/// `{api_base}/applications/{id}/commands`
pub fn commands_endpoint(api_base: &str, application_id: &str) -> String {
    format!(
        "{}/applications/{}/commands",
        api_base.trim_end_matches('/'),
        application_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_serialization() {
        let definition = CommandDefinition::new("wax", "Get WAX balance for a wallet")
            .with_option(CommandOptionDefinition::wallet());
        assert_eq!(
            serde_json::to_value(&definition).unwrap(),
            serde_json::json!({
                "name": "wax",
                "description": "Get WAX balance for a wallet",
                "options": [{
                    "type": 3,
                    "name": "wallet",
                    "description": "WAX wallet address (default: amfr2.wam)",
                    "required": false
                }]
            })
        );
    }

    #[test]
    fn test_definition_without_options() {
        let json = serde_json::to_value(CommandDefinition::new("beasts", "Beasts")).unwrap();
        assert!(json.get("options").is_none());
    }

    #[test]
    fn test_commands_endpoint() {
        assert_eq!(
            commands_endpoint("https://discord.com/api/v10/", "1234"),
            "https://discord.com/api/v10/applications/1234/commands"
        );
    }
}
