use async_trait::async_trait;
use futures_util::future::join_all;
use uuid::Uuid;

use crate::types::{Bet, NewBet};

/// The operations the application consumes from the bet collection.
#[async_trait]
pub trait BetCollection: Send + Sync {
    async fn insert(&self, bet: NewBet) -> Result<Bet, sqlx::Error>;

    async fn query_for_user(
        &self,
        user_name: &str,
        match_label: &str,
    ) -> Result<Vec<Bet>, sqlx::Error>;

    /// Idempotent from the caller's perspective; deleting an id that is
    /// already gone is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error>;

    /// Full collection ordered by timestamp descending, unacknowledged
    /// timestamps first.
    async fn list_all(&self) -> Result<Vec<Bet>, sqlx::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// No prior record existed for this user and match.
    Placed,
    /// At least one prior record was removed before the insert.
    Updated,
}

/// Replace-existing protocol: one active bet per (user_name, match_label).
///
/// Strictly sequential across steps; the query completes before any delete is
/// issued, and every delete settles before the insert goes out. The deletes
/// within the batch run concurrently. There is no rollback: a failure after
/// the deletes leaves the user with no active bet, and concurrent sessions
/// for the same user can interleave and end up with zero or two records.
pub async fn place_bet<C>(collection: &C, bet: NewBet) -> Result<(Bet, Placement), sqlx::Error>
where
    C: BetCollection + ?Sized,
{
    let existing = collection
        .query_for_user(&bet.user_name, &bet.match_label)
        .await?;
    let had_existing = !existing.is_empty();

    let deletes = existing.iter().map(|prior| collection.delete(prior.id));
    for settled in join_all(deletes).await {
        settled?;
    }

    let stored = collection.insert(bet).await?;

    let placement = if had_existing {
        Placement::Updated
    } else {
        Placement::Placed
    };
    Ok((stored, placement))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::types::{potential_win, Selection};

    struct MemCollection {
        bets: Mutex<Vec<Bet>>,
        fail_insert: AtomicBool,
    }

    impl MemCollection {
        fn new() -> Self {
            Self {
                bets: Mutex::new(Vec::new()),
                fail_insert: AtomicBool::new(false),
            }
        }

        fn all(&self) -> Vec<Bet> {
            self.bets.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BetCollection for MemCollection {
        async fn insert(&self, bet: NewBet) -> Result<Bet, sqlx::Error> {
            if self.fail_insert.load(Ordering::SeqCst) {
                return Err(sqlx::Error::PoolClosed);
            }
            let stored = Bet {
                id: Uuid::new_v4(),
                user_name: bet.user_name,
                match_label: bet.match_label,
                selected_team: bet.selected_team,
                bet_amount: bet.bet_amount,
                odds_at_time: bet.odds_at_time,
                potential_win: bet.potential_win,
                created_at: Some(Utc::now()),
            };
            self.bets.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn query_for_user(
            &self,
            user_name: &str,
            match_label: &str,
        ) -> Result<Vec<Bet>, sqlx::Error> {
            Ok(self
                .bets
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.user_name == user_name && b.match_label == match_label)
                .cloned()
                .collect())
        }

        async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
            self.bets.lock().unwrap().retain(|b| b.id != id);
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<Bet>, sqlx::Error> {
            Ok(self.all())
        }
    }

    fn new_bet(user: &str, amount: i64, selection: Selection, odds: f64) -> NewBet {
        NewBet {
            user_name: user.to_string(),
            match_label: "Viet Nam vs China".to_string(),
            selected_team: selection,
            bet_amount: amount,
            odds_at_time: odds,
            potential_win: potential_win(amount, odds),
        }
    }

    #[tokio::test]
    async fn first_submission_places_one_record() {
        let collection = MemCollection::new();

        let (stored, placement) =
            place_bet(&collection, new_bet("alice", 200_000, Selection::Draw, 1.52))
                .await
                .unwrap();

        assert_eq!(placement, Placement::Placed);
        assert_eq!(stored.odds_at_time, 1.52);
        assert_eq!(stored.potential_win, 304_000.00);

        let all = collection.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user_name, "alice");
    }

    #[tokio::test]
    async fn resubmission_leaves_exactly_one_record() {
        let collection = MemCollection::new();

        place_bet(&collection, new_bet("bob", 150_000, Selection::Home, 1.6))
            .await
            .unwrap();
        let (stored, placement) =
            place_bet(&collection, new_bet("bob", 300_000, Selection::Away, 2.31))
                .await
                .unwrap();

        assert_eq!(placement, Placement::Updated);

        let all = collection.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, stored.id);
        assert_eq!(all[0].selected_team, Selection::Away);
        assert_eq!(all[0].bet_amount, 300_000);
    }

    #[tokio::test]
    async fn replaces_every_prior_record_for_the_user() {
        let collection = MemCollection::new();

        // Two survivors from an interleaved earlier race.
        collection
            .insert(new_bet("carol", 100_000, Selection::Home, 1.6))
            .await
            .unwrap();
        collection
            .insert(new_bet("carol", 120_000, Selection::Draw, 1.52))
            .await
            .unwrap();

        let (_, placement) =
            place_bet(&collection, new_bet("carol", 500_000, Selection::Draw, 1.52))
                .await
                .unwrap();

        assert_eq!(placement, Placement::Updated);
        assert_eq!(collection.all().len(), 1);
    }

    #[tokio::test]
    async fn other_users_records_are_untouched() {
        let collection = MemCollection::new();

        place_bet(&collection, new_bet("dave", 100_000, Selection::Home, 1.6))
            .await
            .unwrap();
        place_bet(&collection, new_bet("erin", 100_000, Selection::Away, 2.31))
            .await
            .unwrap();
        place_bet(&collection, new_bet("dave", 200_000, Selection::Draw, 1.52))
            .await
            .unwrap();

        let all = collection.all();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|b| b.user_name == "erin"));
    }

    #[tokio::test]
    async fn failed_insert_after_delete_is_not_rolled_back() {
        let collection = MemCollection::new();

        place_bet(&collection, new_bet("frank", 100_000, Selection::Home, 1.6))
            .await
            .unwrap();
        collection.fail_insert.store(true, Ordering::SeqCst);

        let result = place_bet(&collection, new_bet("frank", 200_000, Selection::Draw, 1.52)).await;

        assert!(result.is_err());
        // The prior record is gone and nothing replaced it.
        assert!(collection.all().is_empty());
    }
}
