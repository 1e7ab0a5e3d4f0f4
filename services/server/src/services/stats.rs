use bet_store::{round2, Bet, Selection};
use serde::Serialize;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SelectionBreakdown {
    pub selection: Selection,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_pool: i64,
    pub total_bets: usize,
    pub average_bet: f64,
    pub selection_counts: Vec<SelectionBreakdown>,
    pub most_popular: Option<Selection>,
}

impl DashboardStats {
    /// Recomputed from scratch on every snapshot; no incremental accounting.
    pub fn from_bets(bets: &[Bet]) -> Self {
        let total_bets = bets.len();
        let total_pool: i64 = bets.iter().map(|b| b.bet_amount).sum();
        let average_bet = if total_bets > 0 {
            round2(total_pool as f64 / total_bets as f64)
        } else {
            0.0
        };

        // Grouping pass keeps first-encountered order so ties resolve to the
        // selection seen first in the list.
        let mut grouped: Vec<(Selection, usize)> = Vec::new();
        for bet in bets {
            match grouped.iter_mut().find(|(s, _)| *s == bet.selected_team) {
                Some((_, n)) => *n += 1,
                None => grouped.push((bet.selected_team, 1)),
            }
        }

        let mut most_popular = None;
        let mut best = 0usize;
        for (selection, n) in &grouped {
            if *n > best {
                best = *n;
                most_popular = Some(*selection);
            }
        }

        let selection_counts = Selection::ALL
            .iter()
            .map(|&selection| {
                let count = grouped
                    .iter()
                    .find(|(s, _)| *s == selection)
                    .map(|(_, n)| *n)
                    .unwrap_or(0);
                let percentage = if total_bets > 0 {
                    round1(count as f64 / total_bets as f64 * 100.0)
                } else {
                    0.0
                };
                SelectionBreakdown {
                    selection,
                    count,
                    percentage,
                }
            })
            .collect();

        Self {
            total_pool,
            total_bets,
            average_bet,
            selection_counts,
            most_popular,
        }
    }

    pub fn empty() -> Self {
        Self::from_bets(&[])
    }
}
