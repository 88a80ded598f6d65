//! Domain models for monthly budgets.

/// Pseudo-category whose budget covers every category's spending
pub const OVERALL_CATEGORY: &str = "Overall";

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

impl Budget {
    pub fn is_overall(&self) -> bool {
        self.category == OVERALL_CATEGORY
    }
}

/// Outcome of an upsert on (user, category, month, year)
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetWrite {
    Created(Budget),
    Updated(Budget),
}

impl BudgetWrite {
    pub fn budget(&self) -> &Budget {
        match self {
            BudgetWrite::Created(b) | BudgetWrite::Updated(b) => b,
        }
    }

    pub fn into_budget(self) -> Budget {
        match self {
            BudgetWrite::Created(b) | BudgetWrite::Updated(b) => b,
        }
    }
}

/// Spend vs. budget for one budget row in a given month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: f64,
    pub forecasted_spending: f64,
    pub on_track: bool,
}

impl BudgetStatus {
    pub fn remaining(&self) -> f64 {
        self.budget.amount - self.spent
    }
}
