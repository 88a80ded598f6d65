// Repository modules
pub mod budget_repository;
pub mod expense_repository;
pub mod goal_repository;
pub mod session_repository;
pub mod user_repository;

// Re-export repository types
pub use budget_repository::BudgetRepository;
pub use expense_repository::ExpenseRepository;
pub use goal_repository::GoalRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
