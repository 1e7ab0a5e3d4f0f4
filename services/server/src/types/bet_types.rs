use bet_store::Selection;
use serde::Deserialize;

use crate::config::MIN_BET_AMOUNT;

#[derive(Deserialize, Debug)]
pub struct PlaceBetInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub selection: Option<Selection>,
}

/// A submission that passed validation, with the name already trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBet {
    pub name: String,
    pub amount: i64,
    pub selection: Selection,
}

impl PlaceBetInput {
    /// Checks run in a fixed order and the first failure wins, so the user
    /// always sees one message at a time.
    pub fn validate(&self) -> Result<ValidBet, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please enter your name");
        }

        let amount = match self.amount {
            Some(amount) if amount > 0 => amount,
            _ => return Err("Please enter a valid amount"),
        };
        if amount < MIN_BET_AMOUNT {
            return Err("Minimum bet amount is 100,000 VND");
        }

        let selection = match self.selection {
            Some(selection) => selection,
            None => return Err("Please select a betting option"),
        };

        Ok(ValidBet {
            name: name.to_string(),
            amount,
            selection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, amount: Option<i64>, selection: Option<Selection>) -> PlaceBetInput {
        PlaceBetInput {
            name: name.to_string(),
            amount,
            selection,
        }
    }

    #[test]
    fn rejects_blank_name_first() {
        let err = input("   ", None, None).validate().unwrap_err();
        assert_eq!(err, "Please enter your name");
    }

    #[test]
    fn rejects_missing_or_non_positive_amount() {
        let err = input("alice", None, Some(Selection::Home))
            .validate()
            .unwrap_err();
        assert_eq!(err, "Please enter a valid amount");

        let err = input("alice", Some(0), Some(Selection::Home))
            .validate()
            .unwrap_err();
        assert_eq!(err, "Please enter a valid amount");

        let err = input("alice", Some(-5), Some(Selection::Home))
            .validate()
            .unwrap_err();
        assert_eq!(err, "Please enter a valid amount");
    }

    #[test]
    fn minimum_stake_boundary() {
        let err = input("alice", Some(99_999), Some(Selection::Draw))
            .validate()
            .unwrap_err();
        assert_eq!(err, "Minimum bet amount is 100,000 VND");

        let valid = input("alice", Some(100_000), Some(Selection::Draw))
            .validate()
            .unwrap();
        assert_eq!(valid.amount, 100_000);
    }

    #[test]
    fn rejects_missing_selection_last() {
        let err = input("alice", Some(100_000), None).validate().unwrap_err();
        assert_eq!(err, "Please select a betting option");
    }

    #[test]
    fn trims_the_name() {
        let valid = input("  alice  ", Some(200_000), Some(Selection::Away))
            .validate()
            .unwrap();
        assert_eq!(valid.name, "alice");
    }
}
