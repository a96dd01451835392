//! In-memory transport for exercising the gateway without a network

use crate::error::{ApiError, ApiResult};
use crate::transport::{Transport, TransportResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

/// What the scripted transport does on one call
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Respond(TransportResponse),
    Fail(ApiError),
    /// Never completes; only a deadline ends it
    Hang,
}

/// A request as the transport saw it
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub url: String,
    pub request_id: String,
    pub body: serde_json::Value,
    pub at: Instant,
}

/// Plays back steps in order; the last step repeats once the script runs out
#[derive(Debug)]
pub(crate) struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<Recorded>>,
}

impl ScriptedTransport {
    pub(crate) fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn next_step(&self) -> Step {
        let mut steps = self.steps.lock().unwrap();
        if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps
                .front()
                .cloned()
                .unwrap_or_else(|| Step::Fail(ApiError::Transport("empty script".into())))
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &str,
        request_id: &str,
        body: &serde_json::Value,
    ) -> ApiResult<TransportResponse> {
        self.requests.lock().unwrap().push(Recorded {
            url: url.to_string(),
            request_id: request_id.to_string(),
            body: body.clone(),
            at: Instant::now(),
        });

        match self.next_step() {
            Step::Respond(response) => Ok(response),
            Step::Fail(err) => Err(err),
            Step::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending future resolved")
            }
        }
    }
}
