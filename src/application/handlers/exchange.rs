//! Send one request and hold the reply to its contract.

use tracing::{debug, warn};

use crate::application::FeatureError;
use crate::domain::contract::{parse_as, preview, FromPayload};
use crate::ports::{CompletionClient, CompletionRequest};

/// Sends `request` and parses the reply into the payload its kind promises.
///
/// Neither transport failures nor contract violations are retried here.
pub(crate) async fn exchange<T: FromPayload>(
    client: &dyn CompletionClient,
    request: CompletionRequest,
) -> Result<T, FeatureError> {
    let id = request.id;
    let kind = request.kind;
    debug!(request_id = %id, kind = %kind, provider = %client.provider_info().name, "Sending completion request");

    let raw = client.send(request).await.map_err(|failure| {
        warn!(request_id = %id, kind = %kind, error = %failure, retryable = failure.is_retryable(), "Completion failed");
        FeatureError::from(failure)
    })?;

    parse_as::<T>(kind, &raw).map_err(|violation| {
        warn!(
            request_id = %id,
            kind = %kind,
            error = %violation,
            preview = %preview(&raw),
            "Response violated contract"
        );
        FeatureError::from(violation)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionClient;
    use crate::domain::contract::{ContractViolation, Feedback};
    use crate::domain::prompt::RequestKind;
    use crate::ports::CompletionFailure;

    fn feedback_request() -> CompletionRequest {
        CompletionRequest::new(RequestKind::ScenarioFeedback, "ctx", "body")
    }

    #[tokio::test]
    async fn valid_reply_is_parsed() {
        let client = MockCompletionClient::new().with_reply(r#"{"feedback":"Well done"}"#);
        let feedback: Feedback = exchange(&client, feedback_request()).await.unwrap();
        assert_eq!(feedback.text, "Well done");
    }

    #[tokio::test]
    async fn transport_failure_passes_through() {
        let client =
            MockCompletionClient::new().with_failure(CompletionFailure::network("offline"));
        let err = exchange::<Feedback>(&client, feedback_request()).await.unwrap_err();
        assert_eq!(err, FeatureError::Completion(CompletionFailure::network("offline")));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn contract_violation_is_not_retried() {
        let client = MockCompletionClient::new()
            .with_reply("Sure! Here is your feedback.")
            .with_reply(r#"{"feedback":"unused"}"#);
        let err = exchange::<Feedback>(&client, feedback_request()).await.unwrap_err();
        assert!(matches!(
            err,
            FeatureError::Contract(ContractViolation::NotAnObject { .. })
        ));
        assert_eq!(client.call_count(), 1);
    }
}
