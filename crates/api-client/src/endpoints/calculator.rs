//! Reward calculator endpoint

use crate::client::{BankKaroClient, Endpoint};
use crate::error::{ApiError, ApiResult};
use crate::models::{CalculatorPayload, CalculatorResult};
use crate::notify::Notification;
use tracing::{instrument, warn};

/// Title of every calculator failure notification
pub const CALCULATOR_ERROR_TITLE: &str = "Calculation Error";

/// Body of every calculator failure notification
pub const CALCULATOR_ERROR_MESSAGE: &str = "Unable to calculate rewards. Please try again.";

/// Reward calculator API interface
#[derive(Clone, Debug)]
pub struct CalculatorApi {
    client: BankKaroClient,
}

impl CalculatorApi {
    pub(crate) fn new(client: BankKaroClient) -> Self {
        Self { client }
    }

    /// Score a spending profile
    ///
    /// The service's answer is returned untouched. Any failure yields `None`
    /// plus one generic notification.
    #[instrument(skip(self, payload), fields(keys = payload.spends.len()))]
    pub async fn fetch(&self, payload: &CalculatorPayload) -> Option<CalculatorResult> {
        match self.try_fetch(payload).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(error = %e, category = %e.category(), "Calculator request failed");
                self.client.notify(Notification::error(
                    CALCULATOR_ERROR_TITLE,
                    CALCULATOR_ERROR_MESSAGE,
                ));
                None
            }
        }
    }

    /// Score a spending profile, returning the error instead of notifying
    pub async fn try_fetch(&self, payload: &CalculatorPayload) -> ApiResult<CalculatorResult> {
        let validation = payload.validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let body =
            serde_json::to_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;
        let response = self.client.post(Endpoint::Calculator, &body).await?;

        Ok(serde_json::from_slice(&response.body)?)
    }
}

impl BankKaroClient {
    /// Shorthand for `self.calculator().fetch(payload)`
    pub async fn fetch_calculator_result(
        &self,
        payload: &CalculatorPayload,
    ) -> Option<CalculatorResult> {
        self.calculator().fetch(payload).await
    }

    /// Shorthand for `self.calculator().try_fetch(payload)`
    pub async fn try_fetch_calculator_result(
        &self,
        payload: &CalculatorPayload,
    ) -> ApiResult<CalculatorResult> {
        self.calculator().try_fetch(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::notify::RecordingNotifier;
    use crate::testing::{ScriptedTransport, Step};
    use crate::transport::TransportResponse;
    use serde_json::json;
    use std::sync::Arc;

    fn harness(
        steps: impl IntoIterator<Item = Step>,
    ) -> (BankKaroClient, Arc<ScriptedTransport>, Arc<RecordingNotifier>) {
        let transport = Arc::new(ScriptedTransport::new(steps));
        let notifier = Arc::new(RecordingNotifier::new());
        let client = BankKaroClient::builder(ClientConfig::default())
            .transport(transport.clone())
            .notifier(notifier.clone())
            .build()
            .unwrap();
        (client, transport, notifier)
    }

    fn assert_generic_notification(notifier: &RecordingNotifier) {
        let seen = notifier.notifications();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].title, CALCULATOR_ERROR_TITLE);
        assert_eq!(seen[0].description, CALCULATOR_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_result_passed_through_verbatim() {
        let answer = json!({
            "savings": [{"card_name": "HDFC Regalia", "total_savings_yearly": 24200}],
            "meta": {"version": 2}
        });
        let (client, transport, notifier) =
            harness([Step::Respond(TransportResponse::json(200, &answer))]);

        let payload = CalculatorPayload::with_defaults().with_selected_card("regalia");
        let result = client.fetch_calculator_result(&payload).await;

        assert_eq!(result, Some(answer));
        assert!(notifier.is_empty());
        assert_eq!(transport.requests()[0].body["selectedCardId"], "regalia");
        assert_eq!(transport.requests()[0].body["rent"], 25_000.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_single_attempt() {
        let (client, transport, notifier) = harness([Step::Hang]);

        let result = client
            .fetch_calculator_result(&CalculatorPayload::with_defaults())
            .await;

        assert!(result.is_none());
        assert_eq!(transport.calls(), 1);
        assert_generic_notification(&notifier);
    }

    #[tokio::test]
    async fn test_connection_failure_not_retried() {
        let (client, transport, notifier) =
            harness([Step::Fail(ApiError::Transport("reset by peer".into()))]);

        assert!(client
            .fetch_calculator_result(&CalculatorPayload::with_defaults())
            .await
            .is_none());
        assert_eq!(transport.calls(), 1);
        assert_generic_notification(&notifier);
    }

    #[tokio::test]
    async fn test_http_errors_use_generic_message() {
        for status in [429, 500, 400] {
            let (client, transport, notifier) =
                harness([Step::Respond(TransportResponse::json(status, &json!({})))]);

            assert!(client
                .fetch_calculator_result(&CalculatorPayload::with_defaults())
                .await
                .is_none());
            assert_eq!(transport.calls(), 1);
            assert_generic_notification(&notifier);
        }
    }

    #[tokio::test]
    async fn test_invalid_payload_makes_no_call() {
        let (client, transport, notifier) =
            harness([Step::Respond(TransportResponse::json(200, &json!({})))]);

        let payload = CalculatorPayload::new().with_spend("fuel", -100.0);
        assert!(client.fetch_calculator_result(&payload).await.is_none());
        assert_eq!(transport.calls(), 0);
        assert_generic_notification(&notifier);
    }

    #[tokio::test]
    async fn test_non_json_body_is_shape_error() {
        let (client, _, _) = harness([Step::Respond(TransportResponse {
            status: 200,
            body: b"<html>oops</html>".to_vec(),
        })]);

        let err = client
            .try_fetch_calculator_result(&CalculatorPayload::with_defaults())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ResponseShape(_)));
    }
}
