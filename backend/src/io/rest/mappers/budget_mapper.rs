use crate::domain::commands::budgets::{BudgetStatusQuery, SetBudgetCommand};
use crate::domain::models::budget::{Budget as DomainBudget, BudgetStatus as DomainBudgetStatus, BudgetWrite};
use shared::{
    Budget as SharedBudget, BudgetResponse, BudgetStatus as SharedBudgetStatus,
    BudgetStatusQuery as SharedBudgetStatusQuery, SetBudgetRequest,
};

pub struct BudgetMapper;

impl BudgetMapper {
    pub fn to_dto(domain: DomainBudget) -> SharedBudget {
        SharedBudget {
            id: domain.id,
            category: domain.category,
            amount: domain.amount,
            month: domain.month,
            year: domain.year,
            user_id: domain.user_id,
        }
    }

    pub fn to_budget_response(write: BudgetWrite) -> BudgetResponse {
        let message = match write {
            BudgetWrite::Created(_) => "Budget set!",
            BudgetWrite::Updated(_) => "Budget updated!",
        };
        BudgetResponse {
            message: message.to_string(),
            budget: Self::to_dto(write.into_budget()),
        }
    }

    pub fn to_status_dto(domain: DomainBudgetStatus) -> SharedBudgetStatus {
        SharedBudgetStatus {
            remaining: domain.remaining(),
            category: domain.budget.category,
            budget_amount: domain.budget.amount,
            spent: domain.spent,
            forecasted_spending: domain.forecasted_spending,
            on_track: domain.on_track,
            month: domain.budget.month,
            year: domain.budget.year,
        }
    }

    pub fn to_status_dto_list(domain: Vec<DomainBudgetStatus>) -> Vec<SharedBudgetStatus> {
        domain.into_iter().map(Self::to_status_dto).collect()
    }

    pub fn to_set_budget_command(request: SetBudgetRequest) -> SetBudgetCommand {
        SetBudgetCommand {
            category: request.category,
            amount: request.amount,
            month: request.month,
            year: request.year,
        }
    }

    pub fn to_status_query(query: SharedBudgetStatusQuery) -> BudgetStatusQuery {
        BudgetStatusQuery {
            month: query.month,
            year: query.year,
        }
    }
}
