use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A single logged expense as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Always positive
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    /// Calendar date the money was spent (YYYY-MM-DD)
    pub date: NaiveDate,
    pub merchant: Option<String>,
    pub emotion_tag: Option<String>,
    pub user_id: i64,
    /// UTC timestamp of when the record was created
    pub created_at: NaiveDateTime,
}

/// A monthly budget for one category (or "Overall")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
    pub user_id: i64,
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub due_date: Option<NaiveDate>,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
}

/// A number that clients may send either as a JSON number or as a string
/// (HTML inputs usually post strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Interpret the input as a float, returning None if it is not numeric
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => Some(*n),
            NumericInput::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }

    /// Interpret the input as a whole number
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumericInput::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(*n as i64),
            NumericInput::Number(_) => None,
            NumericInput::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

/// Optional whole-number query parameter. Anything that is not a whole
/// number in range reads as absent, so the handler falls back to its default.
fn lenient_whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let raw = Option::<NumericInput>::deserialize(deserializer).unwrap_or(None);
    Ok(raw
        .and_then(|input| input.as_i64())
        .and_then(|n| T::try_from(n).ok()))
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

/// Severity of a flash message, mirroring the classic web-app alert levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

/// Response envelope for form-style routes. Tells the client what to show
/// and where to navigate next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            redirect: None,
            errors: Vec::new(),
        }
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Generic error body for JSON endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Registration form (form-encoded)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Login form (form-encoded)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox value; any non-empty value other than "false"/"0" means checked
    #[serde(default)]
    pub remember: Option<String>,
}

impl LoginRequest {
    pub fn wants_remember(&self) -> bool {
        match self.remember.as_deref().map(str::trim) {
            None | Some("") | Some("false") | Some("0") | Some("off") => false,
            Some(_) => true,
        }
    }
}

/// Manual expense form (form-encoded). Every field is kept as raw text so
/// that validation can report all problems at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFormRequest {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub emotion_tag: String,
}

/// Response after logging an expense through the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFormResponse {
    #[serde(flatten)]
    pub flash: FlashMessage,
    pub expense: Expense,
}

/// Smart log request (JSON). `text_input` is parsed; every other field
/// overrides the parsed value when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartLogRequest {
    pub text_input: Option<String>,
    pub amount: Option<NumericInput>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub merchant: Option<String>,
    /// YYYY-MM-DD
    pub date: Option<String>,
    pub emotion_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartLogResponse {
    pub message: String,
    pub expense: Expense,
}

/// Labels/values pair used by every chart endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetBudgetRequest {
    pub category: Option<String>,
    pub amount: Option<NumericInput>,
    pub month: Option<NumericInput>,
    pub year: Option<NumericInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResponse {
    pub message: String,
    pub budget: Budget,
}

/// Query parameters for the budget status endpoint; defaults to the current month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatusQuery {
    #[serde(default, deserialize_with = "lenient_whole_number")]
    pub month: Option<u32>,
    #[serde(default, deserialize_with = "lenient_whole_number")]
    pub year: Option<i32>,
}

/// Spend vs. budget for one budget row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub budget_amount: f64,
    pub spent: f64,
    pub remaining: f64,
    pub forecasted_spending: f64,
    pub on_track: bool,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetGoalRequest {
    pub name: Option<String>,
    pub target_amount: Option<NumericInput>,
    pub current_amount: Option<NumericInput>,
    /// YYYY-MM-DD
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResponse {
    pub message: String,
    pub goal: Goal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributeToGoalRequest {
    pub amount: Option<NumericInput>,
}

/// Query parameters for the paginated expense timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTimelineQuery {
    #[serde(default, deserialize_with = "lenient_whole_number")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_whole_number")]
    pub per_page: Option<i64>,
}

/// Page-numbered expense listing, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTimelineResponse {
    pub expenses: Vec<Expense>,
    pub total_items: i64,
    pub current_page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// The category/merchant/emotion choices the server recognises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDataResponse {
    pub categories: Vec<String>,
    pub merchants: Vec<String>,
    pub emotions: Vec<String>,
}
