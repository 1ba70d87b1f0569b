//! Client for a hosted table exposed through a PostgREST-style API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use super::EventStore;
use crate::config::{StoreConfig, StoreSettings};
use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Event, EventId, NewEvent, timestamp};

/// Talks to `{url}/rest/v1/{table}` with the project key.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: Client,
    table_url: String,
}

/// PostgREST error body. Only `message` is reliably present.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
struct Reschedule {
    #[serde(with = "timestamp")]
    start: NaiveDateTime,
    #[serde(with = "timestamp")]
    end: NaiveDateTime,
}

impl RestStore {
    pub fn new(config: &StoreConfig, settings: &StoreSettings) -> ScheduleResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.key)
            .map_err(|_| ScheduleError::Config("store key contains invalid characters".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.key))
            .map_err(|_| ScheduleError::Config("store key contains invalid characters".into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("confsched/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(RestStore {
            http,
            table_url: format!("{}/rest/v1/{}", config.url, settings.table),
        })
    }

    fn by_id(&self, req: RequestBuilder, id: &EventId) -> RequestBuilder {
        req.query(&[("id", format!("eq.{id}"))])
    }

    /// Send and turn any non-2xx status into a store error.
    async fn execute(&self, req: RequestBuilder) -> ScheduleResult<Response> {
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.message)
            .unwrap_or(text);

        tracing::warn!(status = status.as_u16(), %message, "store request failed");
        Err(ScheduleError::Store {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl EventStore for RestStore {
    async fn list_events(&self) -> ScheduleResult<Vec<Event>> {
        tracing::debug!(url = %self.table_url, "listing events");

        let req = self.http.get(&self.table_url).query(&[("select", "*")]);
        let resp = self.execute(req).await?;

        // An empty table may come back as `null` from some gateways.
        let rows: Option<Vec<Event>> = resp.json().await?;
        Ok(rows.unwrap_or_default())
    }

    async fn insert_event(&self, event: &NewEvent) -> ScheduleResult<()> {
        tracing::debug!(title = %event.title, "inserting event");

        let req = self
            .http
            .post(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(event);
        self.execute(req).await?;
        Ok(())
    }

    async fn update_event(
        &self,
        id: &EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ScheduleResult<()> {
        tracing::debug!(%id, %start, %end, "updating event times");

        let req = self
            .http
            .patch(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(&Reschedule { start, end });
        self.execute(self.by_id(req, id)).await?;
        Ok(())
    }

    async fn delete_event(&self, id: &EventId) -> ScheduleResult<()> {
        tracing::debug!(%id, "deleting event");

        let req = self.http.delete(&self.table_url);
        self.execute(self.by_id(req, id)).await?;
        Ok(())
    }
}
