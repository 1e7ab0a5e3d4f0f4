use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Selection {
    Home,
    Draw,
    Away,
}

impl Selection {
    pub const ALL: [Selection; 3] = [Selection::Home, Selection::Draw, Selection::Away];

    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Home => "home",
            Selection::Draw => "draw",
            Selection::Away => "away",
        }
    }
}

/// A bet as stored in the collection. `id` and `created_at` are assigned by
/// the store; `created_at` stays `None` until the write is acknowledged.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone)]
pub struct Bet {
    pub id: Uuid,
    pub user_name: String,
    pub match_label: String,
    pub selected_team: Selection,
    pub bet_amount: i64,
    pub odds_at_time: f64,
    pub potential_win: f64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewBet {
    pub user_name: String,
    pub match_label: String,
    pub selected_team: Selection,
    pub bet_amount: i64,
    pub odds_at_time: f64,
    pub potential_win: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Payout snapshot taken at submission time. Never recomputed after the
/// record is written.
pub fn potential_win(amount: i64, odds: f64) -> f64 {
    round2(amount as f64 * odds)
}
