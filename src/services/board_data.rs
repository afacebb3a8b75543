use async_trait::async_trait;

use crate::domain::ticket::Ticket;
use crate::domain::user::User;
use crate::error::AppResult;

/// Everything one board render needs. Replaced wholesale on each successful
/// fetch, never mutated piecemeal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub tickets: Vec<Ticket>,
    pub users: Vec<User>,
}

#[async_trait]
pub trait BoardDataService: Send + Sync {
    async fn fetch_board(&self) -> AppResult<BoardSnapshot>;
}
