use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub consecutive_days_played: u32,
    pub total_games_played: u32,
    #[ts(type = "number")]
    pub last_login: i64, // Unix milliseconds
}

/// Identity handed over by the auth provider after it verified a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: UserId,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(identity: &Identity, last_login: i64) -> Self {
        Self {
            id: identity.uid.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            consecutive_days_played: 0,
            total_games_played: 0,
            last_login,
        }
    }
}
