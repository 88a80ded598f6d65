//! Domain-level command and query types.
//!
//! Services take these instead of the wire DTOs from the `shared` crate. The
//! REST layer maps requests onto them; raw user input stays raw here so the
//! services own every validation rule.

pub mod auth {
    use crate::domain::models::user::User;

    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub username: String,
        pub email: String,
        pub password: String,
        pub confirm_password: String,
    }

    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub email: String,
        pub password: String,
        pub remember: bool,
    }

    /// A successful login: the user and the session token to hand out
    #[derive(Debug, Clone)]
    pub struct LoginResult {
        pub user: User,
        pub session_token: String,
        pub remember: bool,
    }
}

pub mod expenses {
    use shared::NumericInput;

    /// Manual expense form, every field as typed by the user
    #[derive(Debug, Clone, Default)]
    pub struct AddExpenseCommand {
        pub amount: String,
        pub category: String,
        pub description: String,
        pub merchant: String,
        pub date: String,
        pub emotion_tag: String,
    }

    /// Free-text expense plus optional explicit overrides
    #[derive(Debug, Clone, Default)]
    pub struct SmartLogCommand {
        pub text_input: Option<String>,
        pub amount: Option<NumericInput>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub merchant: Option<String>,
        pub date: Option<String>,
        pub emotion_tag: Option<String>,
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct TimelineQuery {
        pub page: Option<i64>,
        pub per_page: Option<i64>,
    }
}

pub mod budgets {
    use shared::NumericInput;

    #[derive(Debug, Clone, Default)]
    pub struct SetBudgetCommand {
        pub category: Option<String>,
        pub amount: Option<NumericInput>,
        pub month: Option<NumericInput>,
        pub year: Option<NumericInput>,
    }

    /// Month to report on; missing parts default to the current month
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BudgetStatusQuery {
        pub month: Option<u32>,
        pub year: Option<i32>,
    }
}

pub mod goals {
    use shared::NumericInput;

    #[derive(Debug, Clone, Default)]
    pub struct SetGoalCommand {
        pub name: Option<String>,
        pub target_amount: Option<NumericInput>,
        pub current_amount: Option<NumericInput>,
        pub due_date: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ContributeCommand {
        pub goal_id: i64,
        pub amount: Option<NumericInput>,
    }
}
