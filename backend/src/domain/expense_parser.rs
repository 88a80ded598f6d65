//! Free-text "smart log" parsing.
//!
//! Turns input such as `"coffee 150 dining starbucks"` into a best-effort
//! amount, category and merchant. Parsing never fails: callers decide what a
//! missing amount means.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::reference_data::ReferenceData;

/// What the parser could extract from a piece of free text
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpense {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub merchant: Option<String>,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Clone)]
pub struct ExpenseParser {
    reference: Arc<ReferenceData>,
}

impl ExpenseParser {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn parse(&self, text: &str, today: NaiveDate) -> ParsedExpense {
        let lowered = text.to_lowercase();
        let mut words: Vec<&str> = lowered.split_whitespace().collect();

        let mut amount = None;
        if let Some(index) = words.iter().position(|w| is_amount_token(w)) {
            amount = words[index].parse::<f64>().ok();
            if amount.is_some() {
                words.remove(index);
            }
        }
        let remaining = words.join(" ");

        // First category in list order wins, even when a later one also matches
        let category = self
            .reference
            .categories
            .iter()
            .find(|c| remaining.contains(&c.to_lowercase()))
            .cloned();

        let merchant = self
            .reference
            .merchants_longest_first()
            .into_iter()
            .find(|m| remaining.contains(&m.to_lowercase()))
            .map(str::to_string);

        let description = match amount {
            Some(value) => match (&category, &merchant) {
                (Some(c), Some(m)) => format!("{} at {}", c, m),
                (Some(c), None) => format!("{} expense", c),
                (None, Some(m)) => format!("Spent at {}", m),
                (None, None) => format!("Expense of {:?}", value),
            },
            None => text.to_string(),
        };

        ParsedExpense {
            amount,
            category,
            merchant,
            description,
            date: today,
        }
    }
}

/// Digits with at most one decimal point, and at least one digit
fn is_amount_token(token: &str) -> bool {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = token.chars().filter(|c| *c == '.').count();
    digits > 0 && dots <= 1 && digits + dots == token.chars().count()
}
