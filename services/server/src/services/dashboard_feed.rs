use std::sync::{Arc, RwLock};

use bet_store::{Bet, BetStore};
use log::{error, info};

use crate::services::stats::DashboardStats;

const FEED_NAME: &str = "dashboard";

/// What the dashboard serves: the materialized bet list, the statistics
/// derived from it, and whether the initial snapshot has arrived yet.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub bets: Vec<Bet>,
    pub stats: DashboardStats,
    pub loading: bool,
}

impl DashboardState {
    fn initial() -> Self {
        Self {
            bets: Vec::new(),
            stats: DashboardStats::empty(),
            loading: true,
        }
    }
}

/// Holds the store subscription for the aggregation view. Each delivered
/// snapshot wholesale-replaces the materialized list; stopping the feed
/// releases the subscription.
pub struct DashboardFeed {
    store: &'static BetStore,
    state: Arc<RwLock<DashboardState>>,
}

impl DashboardFeed {
    pub async fn start(store: &'static BetStore) -> Self {
        let state = Arc::new(RwLock::new(DashboardState::initial()));

        let shared = state.clone();
        let subscribed = store
            .subscribe(FEED_NAME, move |snapshot| {
                apply_snapshot(&shared, snapshot);
            })
            .await;

        if let Err(e) = subscribed {
            // The view falls back to its last (empty) list rather than
            // surfacing an alert.
            error!("Failed to subscribe to bet feed: {}", e);
            clear_loading(&state);
        } else {
            info!("Dashboard feed subscribed");
        }

        Self { store, state }
    }

    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        self.state.clone()
    }

    pub async fn stop(&self) {
        self.store.unsubscribe(FEED_NAME).await;
    }
}

fn apply_snapshot(state: &Arc<RwLock<DashboardState>>, snapshot: Vec<Bet>) {
    let stats = DashboardStats::from_bets(&snapshot);
    match state.write() {
        Ok(mut guard) => {
            guard.bets = snapshot;
            guard.stats = stats;
            guard.loading = false;
        }
        Err(_) => error!("Dashboard state lock poisoned, snapshot dropped"),
    }
}

fn clear_loading(state: &Arc<RwLock<DashboardState>>) {
    if let Ok(mut guard) = state.write() {
        guard.loading = false;
    }
}
