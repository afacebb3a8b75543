use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;

use crate::domain::ticket::{Ticket, normalize_priority};
use crate::domain::user::User;
use crate::error::{AppError, AppResult};
use crate::services::{BoardDataService, BoardSnapshot};

pub struct BoardApiClient {
    http: Client,
    endpoint: String,
}

impl BoardApiClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl BoardDataService for BoardApiClient {
    async fn fetch_board(&self) -> AppResult<BoardSnapshot> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Network(format!("failed to reach board API: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Network(format!(
                "board API responded with {status}: {body}"
            )));
        }

        let payload: BoardPayload = response.json().await.map_err(|err| {
            AppError::MalformedPayload(format!("failed to parse board payload: {err}"))
        })?;

        Ok(payload.into_snapshot())
    }
}

#[derive(Deserialize)]
struct BoardPayload {
    #[serde(default)]
    tickets: Vec<RawTicket>,
    #[serde(default)]
    users: Vec<RawUser>,
}

#[derive(Deserialize)]
struct RawTicket {
    id: String,
    title: String,
    #[serde(default)]
    tag: Vec<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
    status: String,
    priority: u8,
}

#[derive(Deserialize)]
struct RawUser {
    id: String,
    name: String,
}

impl BoardPayload {
    fn into_snapshot(self) -> BoardSnapshot {
        let tickets = self
            .tickets
            .into_iter()
            .map(|raw| Ticket {
                id: raw.id,
                title: raw.title,
                status: raw.status,
                priority: normalize_priority(raw.priority),
                user_id: raw.user_id,
                tag: raw.tag,
            })
            .collect();
        let users = self
            .users
            .into_iter()
            .map(|raw| User {
                id: raw.id,
                name: raw.name,
            })
            .collect();
        BoardSnapshot { tickets, users }
    }
}
