//! Expense logging and listing.
//!
//! Two ways in: the manual form, validated field by field, and the smart
//! log, which parses free text and lets explicit fields override the result.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::commands::expenses::{AddExpenseCommand, SmartLogCommand, TimelineQuery};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::expense_parser::ExpenseParser;
use crate::domain::models::expense::{Expense, ExpensePage, NewExpense};
use crate::domain::reference_data::ReferenceData;
use crate::storage::{DbConnection, ExpenseRepository};

pub const FORM_INVALID_MESSAGE: &str = "Error in form submission. Please check the fields.";
pub const RECENT_EXPENSES_LIMIT: i64 = 5;
pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

/// Category used when neither the text nor the request names one
pub const FALLBACK_CATEGORY: &str = "Other";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct ExpenseService {
    expense_repository: ExpenseRepository,
    parser: ExpenseParser,
    reference: Arc<ReferenceData>,
}

impl ExpenseService {
    pub fn new(db: DbConnection, reference: Arc<ReferenceData>) -> Self {
        Self {
            expense_repository: ExpenseRepository::new(db),
            parser: ExpenseParser::new(reference.clone()),
            reference,
        }
    }

    /// Log an expense from the manual form. Every invalid field is reported.
    pub async fn add_expense(&self, user_id: i64, command: AddExpenseCommand) -> DomainResult<Expense> {
        let mut errors = Vec::new();

        let amount = match command.amount.trim().parse::<f64>() {
            Ok(a) if a.is_finite() && a >= 0.01 => Some(a),
            Ok(_) => {
                errors.push("Amount must be at least 0.01.".to_string());
                None
            }
            Err(_) => {
                errors.push("Amount must be a number.".to_string());
                None
            }
        };

        let category = command.category.trim();
        if !self.reference.is_known_category(category) {
            errors.push("Please choose a valid category.".to_string());
        }

        let description = command.description.trim();
        let description_len = description.chars().count();
        if description_len == 0 {
            errors.push("Description is required.".to_string());
        } else if description_len > 200 {
            errors.push("Description must be at most 200 characters.".to_string());
        }

        let merchant = command.merchant.trim();
        if merchant.chars().count() > 100 {
            errors.push("Merchant must be at most 100 characters.".to_string());
        }

        let date = NaiveDate::parse_from_str(command.date.trim(), DATE_FORMAT).ok();
        if date.is_none() {
            errors.push("Date must be in YYYY-MM-DD format.".to_string());
        }

        let emotion_tag = command.emotion_tag.trim();
        if !emotion_tag.is_empty() && !self.reference.is_known_emotion(emotion_tag) {
            errors.push("Please choose a valid emotion.".to_string());
        }

        let (amount, date) = match (amount, date) {
            (Some(amount), Some(date)) if errors.is_empty() => (amount, date),
            _ => {
                debug!("Rejected expense form with {} error(s)", errors.len());
                return Err(DomainError::InvalidForm {
                    message: FORM_INVALID_MESSAGE.to_string(),
                    errors,
                });
            }
        };

        let new_expense = NewExpense {
            user_id,
            amount,
            category: category.to_string(),
            description: Some(description.to_string()),
            merchant: non_empty(merchant),
            emotion_tag: non_empty(emotion_tag),
            date,
        };

        let expense = self.expense_repository.store_expense(&new_expense).await?;
        info!("User {} logged expense {} via form", user_id, expense.id);
        Ok(expense)
    }

    /// Log an expense from free text. Explicit fields in the command win
    /// over whatever the parser found.
    pub async fn smart_log(&self, user_id: i64, command: SmartLogCommand, today: NaiveDate) -> DomainResult<Expense> {
        let text = command
            .text_input
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::validation("text_input not provided for smart logging."))?;

        let parsed = self.parser.parse(text, today);
        match parsed.amount {
            Some(a) if a > 0.0 => {}
            _ => return Err(DomainError::validation("Could not parse amount from text.")),
        }

        let amount = match &command.amount {
            Some(input) => input
                .as_f64()
                .ok_or_else(|| DomainError::validation("Invalid amount."))?,
            None => parsed.amount.unwrap_or_default(),
        };
        if amount <= 0.0 {
            return Err(DomainError::validation("Amount must be positive."));
        }

        let category = override_or(command.category.as_deref(), parsed.category)
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
        let description = override_or(command.description.as_deref(), Some(parsed.description))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("{} expense", category));
        let merchant = override_or(command.merchant.as_deref(), parsed.merchant);

        let date = match command.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| DomainError::validation("Invalid date format. Use YYYY-MM-DD."))?,
            None => parsed.date,
        };

        let new_expense = NewExpense {
            user_id,
            amount,
            category,
            description: Some(description),
            merchant,
            emotion_tag: command.emotion_tag.as_deref().and_then(non_empty),
            date,
        };

        let expense = self.expense_repository.store_expense(&new_expense).await?;
        info!("User {} logged expense {} via smart log", user_id, expense.id);
        Ok(expense)
    }

    /// The user's latest expenses for the dashboard
    pub async fn recent_expenses(&self, user_id: i64) -> DomainResult<Vec<Expense>> {
        Ok(self
            .expense_repository
            .list_expenses(user_id, RECENT_EXPENSES_LIMIT, 0)
            .await?)
    }

    /// One page of the reverse-chronological timeline. Out-of-range paging
    /// parameters are clamped, and pages past the end are simply empty.
    pub async fn timeline(&self, user_id: i64, query: TimelineQuery) -> DomainResult<ExpensePage> {
        let (page, per_page) = normalize_paging(query);
        let offset = (page - 1).saturating_mul(per_page);

        let total_items = self.expense_repository.count_expenses(user_id).await?;
        let expenses = self
            .expense_repository
            .list_expenses(user_id, per_page, offset)
            .await?;

        Ok(ExpensePage {
            expenses,
            total_items,
            current_page: page,
            per_page,
        })
    }
}

fn normalize_paging(query: TimelineQuery) -> (i64, i64) {
    let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
    let per_page = query
        .per_page
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_PER_PAGE)
        .min(MAX_PER_PAGE);
    (page, per_page)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn override_or(explicit: Option<&str>, parsed: Option<String>) -> Option<String> {
    explicit.and_then(non_empty).or(parsed)
}
