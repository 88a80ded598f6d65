use crate::domain::commands::expenses::{AddExpenseCommand, SmartLogCommand, TimelineQuery};
use crate::domain::models::expense::{Expense as DomainExpense, ExpensePage};
use shared::{
    Expense as SharedExpense, ExpenseFormRequest, ExpenseTimelineQuery, ExpenseTimelineResponse,
    SmartLogRequest,
};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: DomainExpense) -> SharedExpense {
        SharedExpense {
            id: domain.id,
            amount: domain.amount,
            category: domain.category,
            description: domain.description,
            date: domain.date,
            merchant: domain.merchant,
            emotion_tag: domain.emotion_tag,
            user_id: domain.user_id,
            created_at: domain.created_at,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainExpense>) -> Vec<SharedExpense> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_timeline_response(page: ExpensePage) -> ExpenseTimelineResponse {
        ExpenseTimelineResponse {
            total_items: page.total_items,
            current_page: page.current_page,
            per_page: page.per_page,
            total_pages: page.total_pages(),
            has_next: page.has_next(),
            has_prev: page.has_prev(),
            expenses: Self::to_dto_list(page.expenses),
        }
    }

    pub fn to_add_expense_command(request: ExpenseFormRequest) -> AddExpenseCommand {
        AddExpenseCommand {
            amount: request.amount,
            category: request.category,
            description: request.description,
            merchant: request.merchant,
            date: request.date,
            emotion_tag: request.emotion_tag,
        }
    }

    pub fn to_smart_log_command(request: SmartLogRequest) -> SmartLogCommand {
        SmartLogCommand {
            text_input: request.text_input,
            amount: request.amount,
            category: request.category,
            description: request.description,
            merchant: request.merchant,
            date: request.date,
            emotion_tag: request.emotion_tag,
        }
    }

    pub fn to_timeline_query(query: ExpenseTimelineQuery) -> TimelineQuery {
        TimelineQuery {
            page: query.page,
            per_page: query.per_page,
        }
    }
}
