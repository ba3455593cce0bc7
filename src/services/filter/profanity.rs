use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serenity::all::{Context, CreateMessage, Message, Timestamp};
use tracing::{debug, warn};

use crate::bot::data::Data;
use crate::constants::embeds;
use crate::services::audit;
use crate::utils::formatting::{mention_channel, mention_user, truncate};

/// Default classifier endpoint. The response body is the literal string
/// `true` or `false`.
pub const DEFAULT_API_URL: &str = "https://www.purgomalum.com/service/containsprofanity";

/// Client for the external profanity classifier.
///
/// The classifier is advisory: transport failures, non-success statuses and
/// unrecognized bodies are all treated as "not profane" so a flaky service
/// never blocks normal chat.
pub struct ProfanityClient {
    http: Client,
    api_url: String,
}

impl ProfanityClient {
    pub fn new(api_url: String) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self { http, api_url })
    }

    /// Ask the classifier whether `text` contains profanity. Fails open.
    pub async fn is_profane(&self, text: &str) -> bool {
        let response = match self
            .http
            .get(&self.api_url)
            .query(&[("text", text)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Profanity classifier unreachable, failing open: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            warn!(
                "Profanity classifier returned {}, failing open",
                response.status()
            );
            return false;
        }

        match response.text().await {
            Ok(body) => match body.trim() {
                "true" => true,
                "false" => false,
                other => {
                    warn!("Unrecognized classifier response {:?}, failing open", other);
                    false
                }
            },
            Err(e) => {
                warn!("Could not read classifier response, failing open: {}", e);
                false
            }
        }
    }
}

/// Run the classifier stage against a live message. A profane message is
/// removed, the author is warned in a DM, and the removal is reported.
pub async fn handle_message(ctx: &Context, data: &Arc<Data>, msg: &Message) {
    if msg.content.is_empty() {
        return;
    }

    if !data.classifier.is_profane(&msg.content).await {
        return;
    }

    if let Err(e) = msg.delete(&ctx.http).await {
        // The pattern stage may have removed it already.
        debug!("Could not delete profane message {}: {:?}", msg.id, e);
    }

    dm_author(ctx, msg).await;

    let report = embeds::warning_embed()
        .title("Profanity Removed")
        .field("Author", mention_user(msg.author.id.get()), true)
        .field("Channel", mention_channel(msg.channel_id.get()), true)
        .field("Content", truncate(&msg.content, 1024), false)
        .timestamp(Timestamp::now());
    audit::log_embed(&ctx.http, &data.settings, report).await;
}

async fn dm_author(ctx: &Context, msg: &Message) {
    let notice = CreateMessage::new()
        .content(":zipper_mouth: Your message was removed for profanity. Keep it clean.");

    // Fail silently if DMs are closed.
    match msg.author.id.create_dm_channel(&ctx.http).await {
        Ok(dm) => {
            if let Err(e) = dm.send_message(&ctx.http, notice).await {
                debug!("Could not DM user {} about profanity: {:?}", msg.author.id, e);
            }
        }
        Err(e) => {
            debug!("Could not open a DM with user {}: {:?}", msg.author.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ProfanityClient {
        ProfanityClient::new(format!("{}/service/containsprofanity", server.uri()))
            .expect("client builds")
    }

    #[tokio::test]
    async fn test_true_body_is_profane() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/containsprofanity"))
            .respond_with(ResponseTemplate::new(200).set_body_string("true"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.is_profane("some filth").await);
    }

    #[tokio::test]
    async fn test_false_body_is_clean() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/containsprofanity"))
            .respond_with(ResponseTemplate::new(200).set_body_string("false"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(!client.is_profane("hello friend").await);
    }

    #[tokio::test]
    async fn test_server_error_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/containsprofanity"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(!client.is_profane("anything").await);
    }

    #[tokio::test]
    async fn test_malformed_body_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/containsprofanity"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>error</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(!client.is_profane("anything").await);
    }

    #[tokio::test]
    async fn test_unreachable_service_fails_open() {
        // Nothing listens on this port.
        let client = ProfanityClient::new(
            "http://127.0.0.1:1/service/containsprofanity".to_string(),
        )
        .expect("client builds");

        assert!(!client.is_profane("anything").await);
    }

    #[tokio::test]
    async fn test_text_is_escaped_into_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/containsprofanity"))
            .and(query_param("text", "is this & that profane?"))
            .respond_with(ResponseTemplate::new(200).set_body_string("false"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(!client.is_profane("is this & that profane?").await);
    }
}
