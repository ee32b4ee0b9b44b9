//! Telegram bot.
//!
//! The bot is a thin dialogue layer: it keeps per-chat conversation state in
//! memory and calls into the engine for everything persistent. One update at
//! a time is processed per chat; different chats proceed independently.

use std::sync::Arc;

use teloxide::prelude::*;

mod callback;
mod handlers;
mod parsing;
mod state;
mod texts;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    engine: Arc<engine::Engine>,
    sessions: state::SessionStore,
}

pub struct Bot {
    token: String,
    engine: Arc<engine::Engine>,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        let parameters = ConfigParameters {
            engine: self.engine.clone(),
            sessions: state::SessionStore::default(),
        };

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(handlers::handle_message))
            .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    engine: Option<Arc<engine::Engine>>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn engine(mut self, engine: Arc<engine::Engine>) -> BotBuilder {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        if self.token.is_empty() {
            return Err("telegram bot token is missing".to_string());
        }
        let engine = self.engine.ok_or("engine is missing".to_string())?;
        Ok(Bot {
            token: self.token,
            engine,
        })
    }
}
