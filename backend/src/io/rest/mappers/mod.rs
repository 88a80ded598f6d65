pub mod budget_mapper;
pub mod chart_mapper;
pub mod expense_mapper;
pub mod goal_mapper;
