use std::sync::Arc;

use serenity::all::GatewayIntents;
use serenity::Client;
use sqlx::PgPool;
use tracing::info;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::handlers::event_handler::Handler;
use crate::services::filter::profanity::ProfanityClient;

/// Build the shared state and run the gateway client until it stops.
pub async fn run(settings: Settings, pool: PgPool) -> Result<(), Error> {
    let classifier = ProfanityClient::new(settings.profanity_api_url.clone())?;
    let dispatcher = commands::build_dispatcher();

    let token = settings.discord_token.clone();
    let data = Arc::new(Data::new(pool, settings, classifier, dispatcher));

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MODERATION
        | GatewayIntents::GUILD_INVITES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    info!("Starting gateway client");

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler::new(data))
        .await?;

    client.start().await?;

    Ok(())
}
