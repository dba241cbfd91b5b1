//! Savings goal domain models.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A savings target the portfolio is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub title: String,
    pub target_amount: Decimal,
}

impl Goal {
    /// The reference deployment's $500 goal.
    pub fn reference() -> Self {
        Goal {
            title: "Savings Goal".to_string(),
            target_amount: dec!(500),
        }
    }
}

/// Progress toward a goal at one valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub target_amount: Decimal,
    pub current_value: Decimal,
    /// Percent of the target reached, capped at 100.
    pub percent: f64,
    pub is_achieved: bool,
}

impl GoalProgress {
    /// Measures a portfolio value against a goal.
    ///
    /// A zero or negative target never divides: it reports 100% when
    /// achieved and 0% otherwise.
    pub fn measure(goal: &Goal, current_value: Decimal) -> Self {
        let is_achieved = current_value >= goal.target_amount;
        let percent = if goal.target_amount <= Decimal::ZERO {
            if is_achieved {
                100.0
            } else {
                0.0
            }
        } else {
            let ratio = (current_value / goal.target_amount * dec!(100))
                .to_f64()
                .unwrap_or(0.0);
            ratio.min(100.0)
        };
        GoalProgress {
            target_amount: goal.target_amount,
            current_value,
            percent,
            is_achieved,
        }
    }
}
