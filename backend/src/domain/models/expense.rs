//! Domain models for expenses and spending aggregates.
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub merchant: Option<String>,
    pub emotion_tag: Option<String>,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// An expense that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: i64,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub merchant: Option<String>,
    pub emotion_tag: Option<String>,
    pub date: NaiveDate,
}

/// Sum of spending for one label (a category or an emotion tag)
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTotal {
    pub label: String,
    pub total: f64,
}

/// Sum of spending for one calendar month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

impl MonthlyTotal {
    /// Parse a `YYYY-MM` key as produced by SQLite's strftime
    pub fn from_key(key: &str, total: f64) -> Option<Self> {
        let (year, month) = key.split_once('-')?;
        let year = year.parse().ok()?;
        let month = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month, total })
    }

    /// Chart label, e.g. "Feb 2024"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", self.year, self.month))
    }
}

/// One page of a user's expenses, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensePage {
    pub expenses: Vec<Expense>,
    pub total_items: i64,
    pub current_page: i64,
    pub per_page: i64,
}

impl ExpensePage {
    pub fn total_pages(&self) -> i64 {
        if self.total_items == 0 {
            0
        } else {
            (self.total_items + self.per_page - 1) / self.per_page
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}
