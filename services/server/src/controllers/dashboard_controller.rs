use std::sync::RwLock;

use actix_web::{get, web, HttpResponse, Responder};
use bet_store::Bet;
use serde_json::json;

use crate::services::dashboard_feed::DashboardState;
use crate::types::dashboard_types::{BetRow, DashboardBetsQuery, SortField, SortOrder};

#[get("/dashboard/summary")]
pub async fn get_dashboard_summary(
    dashboard: web::Data<RwLock<DashboardState>>,
) -> impl Responder {
    match dashboard.read() {
        Ok(guard) => HttpResponse::Ok().json(json!({
            "status": "success",
            "loading": guard.loading,
            "stats": guard.stats
        })),
        Err(_) => HttpResponse::InternalServerError().json(json!({
            "status": "error",
            "message": "Failed to read dashboard state"
        })),
    }
}

#[get("/dashboard/bets")]
pub async fn get_dashboard_bets(
    dashboard: web::Data<RwLock<DashboardState>>,
    query: web::Query<DashboardBetsQuery>,
) -> impl Responder {
    let bets = match dashboard.read() {
        Ok(guard) => guard.bets.clone(),
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to read dashboard state"
            }));
        }
    };

    let rows: Vec<BetRow> = apply_view(bets, &query).iter().map(BetRow::from).collect();

    HttpResponse::Ok().json(json!({
        "status": "success",
        "bets": rows
    }))
}

/// Filter and sort over the materialized list only; the store is never
/// consulted here.
fn apply_view(mut bets: Vec<Bet>, query: &DashboardBetsQuery) -> Vec<Bet> {
    if let Some(selection) = query.selection {
        bets.retain(|b| b.selected_team == selection);
    }

    if let Some(field) = query.sort_by {
        let order = query.order.unwrap_or(SortOrder::Desc);
        bets.sort_by(|a, b| {
            let ordering = match field {
                SortField::BetAmount => a.bet_amount.cmp(&b.bet_amount),
                SortField::PotentialWin => a.potential_win.total_cmp(&b.potential_win),
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    bets
}
