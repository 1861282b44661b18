// Greeter Bot
// Per-server welcome and goodbye messages for Discord

mod api;
mod commands;
mod events;
mod features;
mod models;
mod utils;

use std::env;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::features::config_store::{ConfigStore, JsonFileBackend};
use crate::features::status::BotStatus;
use crate::utils::config::{replies, Settings};

/// User data shared across all commands and events
pub struct Data {
    pub store: Arc<ConfigStore>,
    pub status: Arc<BotStatus>,
}

// Manual Debug impl since ConfigStore holds a trait object
impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("store", &format!("ConfigStore({} guilds)", self.store.len()))
            .field("status", &self.status)
            .finish()
    }
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

/// Register all slash commands
fn get_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        commands::ping::ping(),
        commands::greeting::setwelcome(),
        commands::greeting::setgoodbye(),
        commands::announce::announce(),
    ]
}

/// Whether the interaction already got its reply
fn has_replied(ctx: Context<'_>) -> bool {
    match ctx {
        poise::Context::Application(app) => app.has_sent_initial_response.load(Ordering::SeqCst),
        poise::Context::Prefix(_) => false,
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command /{} failed: {:?}", ctx.command().name, error);
            if !has_replied(ctx) {
                if let Err(e) = ctx.say(replies::SAFE_FAILURE).await {
                    error!("Could not send failure reply: {:?}", e);
                }
            }
        }
        err => {
            if let Err(e) = poise::builtins::on_error(err).await {
                error!("Error while handling error: {:?}", e);
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "greeter_rs=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env().expect("Failed to read settings");

    info!("Starting Greeter Bot...");

    let store = Arc::new(ConfigStore::open(JsonFileBackend::new(&settings.store_path)));
    let status = Arc::new(BotStatus::new());

    tokio::spawn(api::keepalive::serve(settings.port, status.clone()));

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: get_commands(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bot is ready! Registering commands...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully!");

                Ok(Data { store, status })
            })
        })
        .build();

    // GUILD_MEMBERS is privileged, enable it in the Discord Dev Portal
    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .expect("Failed to create client");

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to register Ctrl+C handler: {:?}", e);
            return;
        }
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    info!("Goodbye!");
}
