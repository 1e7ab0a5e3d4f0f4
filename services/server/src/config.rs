use bet_store::Selection;

/// Minimum stake in currency minor units (VND).
pub const MIN_BET_AMOUNT: i64 = 100_000;

#[derive(Debug, Clone, Copy)]
pub struct MatchOdds {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl MatchOdds {
    pub fn for_selection(&self, selection: Selection) -> f64 {
        match selection {
            Selection::Home => self.home,
            Selection::Draw => self.draw,
            Selection::Away => self.away,
        }
    }
}

/// Fixture and odds table, fixed for the life of the process. Constructed
/// once in `run()` and shared by reference through app data.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: String,
    pub odds: MatchOdds,
}

impl MatchConfig {
    pub fn load() -> Self {
        Self {
            home_team: "Viet Nam".to_string(),
            away_team: "China".to_string(),
            league: "AFC U23 Asian Cup 2026".to_string(),
            kickoff: "22:30 - Jan 25, 2026".to_string(),
            odds: MatchOdds {
                home: 1.60,
                draw: 1.52,
                away: 2.31,
            },
        }
    }

    pub fn match_label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    pub fn label_for(&self, selection: Selection) -> String {
        match selection {
            Selection::Home => self.home_team.clone(),
            Selection::Draw => "Draw".to_string(),
            Selection::Away => self.away_team.clone(),
        }
    }
}
