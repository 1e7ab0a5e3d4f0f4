use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info, warn};
use once_cell::sync::OnceCell;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::collection::BetCollection;
use crate::types::{Bet, NewBet};

const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

type SubscriberMap = HashMap<String, JoinHandle<()>>;

/// Client handle for the hosted bet collection. Every acknowledged write
/// triggers a fresh full snapshot on the change feed, so subscribers always
/// see the whole collection rather than deltas.
#[derive(Clone)]
pub struct BetStore {
    pool: PgPool,
    snapshots: broadcast::Sender<Vec<Bet>>,
    subscribers: Arc<Mutex<SubscriberMap>>,
}

static INSTANCE: OnceCell<BetStore> = OnceCell::new();

impl BetStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        let store = Self {
            pool,
            snapshots,
            subscribers: Arc::new(Mutex::new(HashMap::new())),
        };

        store.init_schema().await?;
        info!("Connected to bet store");
        Ok(store)
    }

    pub fn init_global(store: BetStore) -> &'static BetStore {
        INSTANCE.get_or_init(|| store)
    }

    pub fn global() -> Option<&'static BetStore> {
        INSTANCE.get()
    }

    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bets (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                user_name TEXT NOT NULL,
                match_label TEXT NOT NULL,
                selected_team TEXT NOT NULL,
                bet_amount BIGINT NOT NULL,
                odds_at_time DOUBLE PRECISION NOT NULL,
                potential_win DOUBLE PRECISION NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Re-reads the full ordered collection and pushes it to every feed
    /// subscriber. A send with no live receivers is not an error.
    async fn publish_snapshot(&self) {
        match self.list_all().await {
            Ok(bets) => {
                let _ = self.snapshots.send(bets);
            }
            Err(e) => error!("Failed to refresh bet snapshot: {}", e),
        }
    }

    /// Delivers the current snapshot immediately, then one snapshot per
    /// change, on a background task. Subscribing again under the same name
    /// replaces the previous subscriber.
    pub async fn subscribe<F>(&self, name: &str, handler: F) -> Result<(), sqlx::Error>
    where
        F: Fn(Vec<Bet>) + Send + Sync + 'static,
    {
        let mut guard = self.subscribers.lock().await;
        if let Some(handle) = guard.remove(name) {
            handle.abort();
            warn!("Replaced existing bet feed subscriber {}", name);
        }

        let initial = self.list_all().await?;
        let mut rx = self.snapshots.subscribe();

        let task = tokio::spawn(async move {
            handler(initial);
            loop {
                match rx.recv().await {
                    Ok(snapshot) => handler(snapshot),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Bet feed lagged, skipped {} snapshots", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        guard.insert(name.to_string(), task);
        Ok(())
    }

    pub async fn unsubscribe(&self, name: &str) {
        let mut guard = self.subscribers.lock().await;
        if let Some(handle) = guard.remove(name) {
            handle.abort();
            info!("Unsubscribed bet feed {}", name);
        }
    }
}

#[async_trait]
impl BetCollection for BetStore {
    async fn insert(&self, bet: NewBet) -> Result<Bet, sqlx::Error> {
        let stored = sqlx::query_as::<_, Bet>(
            r#"
            INSERT INTO bets
                (user_name, match_label, selected_team, bet_amount, odds_at_time, potential_win)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_name, match_label, selected_team, bet_amount,
                      odds_at_time, potential_win, created_at
            "#,
        )
        .bind(&bet.user_name)
        .bind(&bet.match_label)
        .bind(bet.selected_team)
        .bind(bet.bet_amount)
        .bind(bet.odds_at_time)
        .bind(bet.potential_win)
        .fetch_one(&self.pool)
        .await?;

        self.publish_snapshot().await;
        Ok(stored)
    }

    async fn query_for_user(
        &self,
        user_name: &str,
        match_label: &str,
    ) -> Result<Vec<Bet>, sqlx::Error> {
        sqlx::query_as::<_, Bet>(
            r#"
            SELECT id, user_name, match_label, selected_team, bet_amount,
                   odds_at_time, potential_win, created_at
            FROM bets
            WHERE user_name = $1 AND match_label = $2
            "#,
        )
        .bind(user_name)
        .bind(match_label)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM bets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.publish_snapshot().await;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Bet>, sqlx::Error> {
        sqlx::query_as::<_, Bet>(
            r#"
            SELECT id, user_name, match_label, selected_team, bet_amount,
                   odds_at_time, potential_win, created_at
            FROM bets
            ORDER BY created_at DESC NULLS FIRST
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
