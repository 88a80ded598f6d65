use crate::domain::commands::goals::{ContributeCommand, SetGoalCommand};
use crate::domain::models::goal::Goal as DomainGoal;
use shared::{ContributeToGoalRequest, Goal as SharedGoal, SetGoalRequest};

pub struct GoalMapper;

impl GoalMapper {
    pub fn to_dto(domain: DomainGoal) -> SharedGoal {
        SharedGoal {
            id: domain.id,
            name: domain.name,
            target_amount: domain.target_amount,
            current_amount: domain.current_amount,
            due_date: domain.due_date,
            user_id: domain.user_id,
            created_at: domain.created_at,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainGoal>) -> Vec<SharedGoal> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_set_goal_command(request: SetGoalRequest) -> SetGoalCommand {
        SetGoalCommand {
            name: request.name,
            target_amount: request.target_amount,
            current_amount: request.current_amount,
            due_date: request.due_date,
        }
    }

    pub fn to_contribute_command(goal_id: i64, request: ContributeToGoalRequest) -> ContributeCommand {
        ContributeCommand {
            goal_id,
            amount: request.amount,
        }
    }
}
