use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PadError;
use crate::lifecycle::PanelHost;
use crate::status::PadStatus;
use crate::view::{ChatId, ViewDetector};

/// Request body posted to the pad service, discriminated by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PadRequest {
    Get { chat_id: ChatId },
    Set { chat_id: ChatId, text: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GetPadResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Raw HTTP reply from the pad service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadReply {
    pub status: u16,
    pub body: String,
}

impl PadReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    fn ensure_success(self) -> Result<Self, PadError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(PadError::network(format!(
                "request failed with status {}",
                self.status
            )))
        }
    }
}

/// Posts one JSON request to the pad endpoint.
///
/// Futures are `?Send`: the browser transport runs on the single UI thread.
#[async_trait(?Send)]
pub trait PadTransport {
    async fn post_json(&self, request: &PadRequest) -> Result<PadReply, PadError>;
}

#[derive(Debug, Clone)]
pub struct PadClient<T> {
    transport: T,
}

impl<T: PadTransport> PadClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the pad text; an absent or null `text` field reads as empty.
    pub async fn get(&self, chat_id: &ChatId) -> Result<String, PadError> {
        let request = PadRequest::Get {
            chat_id: chat_id.clone(),
        };
        let reply = self.transport.post_json(&request).await?.ensure_success()?;
        let decoded: GetPadResponse = serde_json::from_str(&reply.body)
            .map_err(|error| PadError::network(format!("failed to decode pad response: {error}")))?;
        Ok(decoded.text.unwrap_or_default())
    }

    /// Stores the pad text. The acknowledgement body is ignored.
    pub async fn set(&self, chat_id: &ChatId, text: &str) -> Result<(), PadError> {
        let request = PadRequest::Set {
            chat_id: chat_id.clone(),
            text: text.to_string(),
        };
        self.transport.post_json(&request).await?.ensure_success()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadOutcome {
    Applied,
    /// The panel was unmounted or moved to another chat while the request ran.
    Discarded,
}

fn still_attached<D, H>(detector: &D, host: &H, chat_id: &ChatId) -> bool
where
    D: ViewDetector + ?Sized,
    H: PanelHost + ?Sized,
{
    host.panel_present() && detector.chat_identifier().ok().as_ref() == Some(chat_id)
}

/// Loads the active chat's pad into the panel.
///
/// On failure the text area keeps whatever it held and the status reports
/// the failure. `IdentifierNotFound` is raised before any request is sent.
pub async fn load_pad<D, T, H>(
    detector: &D,
    client: &PadClient<T>,
    host: &H,
) -> Result<PadOutcome, PadError>
where
    D: ViewDetector + ?Sized,
    T: PadTransport,
    H: PanelHost + ?Sized,
{
    let chat_id = match detector.chat_identifier() {
        Ok(chat_id) => chat_id,
        Err(error) => {
            tracing::warn!(error = %error, "pad load aborted");
            host.set_status(PadStatus::LoadFailed);
            return Err(error);
        }
    };

    host.set_status(PadStatus::Loading);
    let result = client.get(&chat_id).await;

    if !still_attached(detector, host, &chat_id) {
        tracing::debug!(chat_id = %chat_id, "discarding pad load for detached panel");
        return Ok(PadOutcome::Discarded);
    }

    match result {
        Ok(text) => {
            host.set_pad_text(&text);
            host.set_status(PadStatus::Loaded);
            Ok(PadOutcome::Applied)
        }
        Err(error) => {
            tracing::warn!(chat_id = %chat_id, error = %error, "pad load failed");
            host.set_status(PadStatus::LoadFailed);
            Err(error)
        }
    }
}

/// Saves the panel's current text for the active chat. Never touches the text.
pub async fn save_pad<D, T, H>(
    detector: &D,
    client: &PadClient<T>,
    host: &H,
) -> Result<PadOutcome, PadError>
where
    D: ViewDetector + ?Sized,
    T: PadTransport,
    H: PanelHost + ?Sized,
{
    let chat_id = match detector.chat_identifier() {
        Ok(chat_id) => chat_id,
        Err(error) => {
            tracing::warn!(error = %error, "pad save aborted");
            host.set_status(PadStatus::SaveFailed);
            return Err(error);
        }
    };
    let Some(text) = host.pad_text() else {
        tracing::debug!(chat_id = %chat_id, "pad save skipped, panel not mounted");
        return Ok(PadOutcome::Discarded);
    };

    host.set_status(PadStatus::Saving);
    let result = client.set(&chat_id, &text).await;

    if !still_attached(detector, host, &chat_id) {
        tracing::debug!(chat_id = %chat_id, "discarding pad save status for detached panel");
        return Ok(PadOutcome::Discarded);
    }

    match result {
        Ok(()) => {
            host.set_status(PadStatus::Saved);
            Ok(PadOutcome::Applied)
        }
        Err(error) => {
            tracing::warn!(chat_id = %chat_id, error = %error, "pad save failed");
            host.set_status(PadStatus::SaveFailed);
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::view::FragmentDetector;

    struct CannedTransport {
        reply: Result<PadReply, PadError>,
        seen: RefCell<Vec<serde_json::Value>>,
    }

    impl CannedTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(PadReply {
                    status,
                    body: body.to_string(),
                }),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl PadTransport for CannedTransport {
        async fn post_json(&self, request: &PadRequest) -> Result<PadReply, PadError> {
            self.seen
                .borrow_mut()
                .push(serde_json::to_value(request).unwrap_or_default());
            self.reply.clone()
        }
    }

    fn chat_id(raw: &str) -> ChatId {
        FragmentDetector::new(format!("#chat={raw}"))
            .chat_identifier()
            .expect("chat id")
    }

    #[test]
    fn requests_serialize_with_action_discriminator() {
        let get = serde_json::to_value(PadRequest::Get {
            chat_id: chat_id("abc"),
        })
        .expect("serialize get");
        assert_eq!(get, json!({"action": "get", "chat_id": "abc"}));

        let set = serde_json::to_value(PadRequest::Set {
            chat_id: chat_id("abc"),
            text: "notes".to_string(),
        })
        .expect("serialize set");
        assert_eq!(
            set,
            json!({"action": "set", "chat_id": "abc", "text": "notes"})
        );
    }

    #[test]
    fn get_reads_text_field() {
        let client = PadClient::new(CannedTransport::replying(200, r#"{"text":"hello"}"#));
        assert_eq!(block_on(client.get(&chat_id("a"))), Ok("hello".to_string()));
    }

    #[test]
    fn get_treats_missing_or_null_text_as_empty() {
        for body in [r#"{}"#, r#"{"text":null}"#] {
            let client = PadClient::new(CannedTransport::replying(200, body));
            assert_eq!(block_on(client.get(&chat_id("a"))), Ok(String::new()));
        }
    }

    #[test]
    fn get_rejects_non_json_body() {
        let client = PadClient::new(CannedTransport::replying(200, "<html>oops</html>"));
        let error = block_on(client.get(&chat_id("a"))).expect_err("expected decode failure");
        assert!(matches!(error, PadError::NetworkFailure(_)));
    }

    #[test]
    fn non_success_status_is_a_network_failure() {
        let client = PadClient::new(CannedTransport::replying(502, "bad gateway"));
        assert_eq!(
            block_on(client.set(&chat_id("a"), "x")),
            Err(PadError::network("request failed with status 502"))
        );
    }

    #[test]
    fn set_ignores_acknowledgement_body() {
        let client = PadClient::new(CannedTransport::replying(200, "ok"));
        assert_eq!(block_on(client.set(&chat_id("a b"), "x")), Ok(()));
        assert_eq!(
            client.transport().seen.borrow().first(),
            Some(&json!({"action": "set", "chat_id": "a b", "text": "x"}))
        );
    }
}
