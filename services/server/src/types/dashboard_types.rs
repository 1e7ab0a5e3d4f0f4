use bet_store::{Bet, Selection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One table row as the dashboard renders it. The timestamp is preformatted
/// server-side; records the store has not yet stamped show "Pending".
#[derive(Serialize, Debug, Clone)]
pub struct BetRow {
    pub id: Uuid,
    pub user_name: String,
    pub selected_team: Selection,
    pub bet_amount: i64,
    pub odds_at_time: f64,
    pub potential_win: f64,
    pub timestamp: String,
}

impl From<&Bet> for BetRow {
    fn from(bet: &Bet) -> Self {
        Self {
            id: bet.id,
            user_name: bet.user_name.clone(),
            selected_team: bet.selected_team,
            bet_amount: bet.bet_amount,
            odds_at_time: bet.odds_at_time,
            potential_win: bet.potential_win,
            timestamp: bet
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "Pending".to_string()),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    BetAmount,
    PotentialWin,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort and filter act on the list the feed already materialized, never on
/// the store.
#[derive(Deserialize, Debug, Default)]
pub struct DashboardBetsQuery {
    pub selection: Option<Selection>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
}
