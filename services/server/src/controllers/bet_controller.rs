use actix_web::{get, post, web, HttpResponse, Responder};
use bet_store::{potential_win, BetStore, NewBet, Placement};
use log::{error, info};
use serde_json::json;

use crate::config::{MatchConfig, MIN_BET_AMOUNT};
use crate::types::bet_types::PlaceBetInput;

#[post("/bets")]
pub async fn place_bet(
    config: web::Data<MatchConfig>,
    body: web::Json<PlaceBetInput>,
) -> impl Responder {
    let valid = match body.validate() {
        Ok(valid) => valid,
        Err(message) => {
            return HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": message
            }));
        }
    };

    let odds_at_time = config.odds.for_selection(valid.selection);
    let bet = NewBet {
        user_name: valid.name,
        match_label: config.match_label(),
        selected_team: valid.selection,
        bet_amount: valid.amount,
        odds_at_time,
        potential_win: potential_win(valid.amount, odds_at_time),
    };

    let store = match BetStore::global() {
        Some(store) => store,
        None => {
            error!("Bet store not initialized");
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to place bet. Please check your connection."
            }));
        }
    };

    match bet_store::place_bet(store, bet).await {
        Ok((stored, placement)) => {
            let message = match placement {
                Placement::Updated => "Your bet has been updated!",
                Placement::Placed => "Bet placed successfully!",
            };
            info!(
                "Bet {} for {}: {} on {:?}",
                match placement {
                    Placement::Updated => "updated",
                    Placement::Placed => "placed",
                },
                stored.user_name,
                stored.bet_amount,
                stored.selected_team
            );
            HttpResponse::Ok().json(json!({
                "status": "success",
                "message": message,
                "bet": stored
            }))
        }
        Err(e) => {
            error!("Failed to place bet: {}", e);
            HttpResponse::BadGateway().json(json!({
                "status": "error",
                "message": "Failed to place bet. Please check your connection."
            }))
        }
    }
}

#[get("/match")]
pub async fn get_match(config: web::Data<MatchConfig>) -> impl Responder {
    let options: Vec<_> = bet_store::Selection::ALL
        .iter()
        .map(|&selection| {
            json!({
                "key": selection,
                "label": config.label_for(selection),
                "odds": config.odds.for_selection(selection)
            })
        })
        .collect();

    HttpResponse::Ok().json(json!({
        "match": config.match_label(),
        "home_team": config.home_team,
        "away_team": config.away_team,
        "league": config.league,
        "kickoff": config.kickoff,
        "min_bet_amount": MIN_BET_AMOUNT,
        "options": options
    }))
}
