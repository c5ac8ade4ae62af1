use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, Url};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    config::Config,
    domain::{
        deadline::DeadlineSubmission,
        ticket::{RaiseTicketRequest, Ticket},
    },
    error::{TicketError, TicketResult},
    ports::TicketApiPort,
};

mod envelope;

pub use envelope::{decode_envelope, decode_ticket_list};

use envelope::ActionRequest;

pub const ACTION_LIST_MY_TICKETS: &str = "LIST_MY_TICKETS";
pub const ACTION_RAISE_TICKET: &str = "RAISE_TICKET";
pub const ACTION_SET_DEADLINE: &str = "SET_DEADLINE";
pub const ACTION_MARK_RESOLVED: &str = "MARK_RESOLVED";

const MAX_REDIRECTS: usize = 10;

/// Client for the spreadsheet web app. Every action is a `POST` of
/// `{"action", "data"}` to one endpoint; the deployment answers through a
/// redirect, which is followed.
#[derive(Debug, Clone)]
pub struct HttpTicketApi {
    client: Client,
    api_url: Url,
    timeout: Duration,
}

impl HttpTicketApi {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let api_url =
            Url::parse(api_url.trim()).with_context(|| format!("invalid api_url: {api_url}"))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(anyhow!("api_url must use http or https: {api_url}"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    async fn call<D>(&self, action: &str, data: &D) -> TicketResult<Value>
    where
        D: Serialize + ?Sized + Sync,
    {
        let started = Instant::now();
        let response = self
            .client
            .post(self.api_url.clone())
            .json(&ActionRequest { action, data })
            .send()
            .await
            .map_err(|err| self.transport_error(action, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(action, err))?;

        tracing::debug!(
            action,
            status = %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "remote action finished"
        );

        decode_envelope(&body).inspect_err(|err| {
            tracing::warn!(action, status = %status, error = %err, "remote action failed");
        })
    }

    fn transport_error(&self, action: &str, err: reqwest::Error) -> TicketError {
        tracing::warn!(action, error = %err, "remote action transport failure");
        if err.is_timeout() {
            TicketError::Timeout(self.timeout.as_secs())
        } else {
            TicketError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl TicketApiPort for HttpTicketApi {
    async fn list_tickets(&self) -> TicketResult<Vec<Ticket>> {
        let data = self.call(ACTION_LIST_MY_TICKETS, &json!({})).await?;
        decode_ticket_list(data)
    }

    async fn raise_ticket(&self, request: &RaiseTicketRequest) -> TicketResult<()> {
        self.call(ACTION_RAISE_TICKET, request).await?;
        Ok(())
    }

    async fn set_deadline(&self, submission: &DeadlineSubmission) -> TicketResult<()> {
        self.call(ACTION_SET_DEADLINE, submission).await?;
        Ok(())
    }

    async fn mark_resolved(&self, ticket_no: &str) -> TicketResult<()> {
        self.call(ACTION_MARK_RESOLVED, &json!({ "ticketNo": ticket_no }))
            .await?;
        Ok(())
    }
}
