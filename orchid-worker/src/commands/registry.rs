//! Command handler registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::balance::BalanceCommand;
use super::handler::CommandHandler;
use super::market::{MarketCommand, MARKET_LISTINGS};
use super::ownership::GuideOwnershipCommand;
use crate::discord::registration::CommandDefinition;

/// Registry mapping command names to handlers.
///
/// Lookups are exact and case-sensitive. Registering a second handler under
/// an existing name replaces the first.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The full command table served by the bot.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BalanceCommand::wax()));
        registry.register(Arc::new(BalanceCommand::keiki()));
        registry.register(Arc::new(GuideOwnershipCommand));
        for listing in MARKET_LISTINGS {
            registry.register(Arc::new(MarketCommand::new(*listing)));
        }
        registry
    }

    /// Register a handler under its definition's name.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        let name = handler.definition().name;
        self.handlers.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Definitions of every registered command, sorted by name.
    pub fn definitions(&self) -> Vec<CommandDefinition> {
        let mut definitions: Vec<_> = self.handlers.values().map(|h| h.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(b.name));
        definitions
    }
}
