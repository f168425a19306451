use super::view_model::derive_display;
use contracts::domain::a025_billing_history::{BillingPeriod, WorkflowOutcome};
use leptos::prelude::*;
use std::collections::HashMap;

/// Ход сторно одной корректировки
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReversalStatus {
    Pending,
    Reversed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BillingHistoryState {
    // Периоды для отображения, включая синтетический "START AT ZERO"
    pub periods: Vec<BillingPeriod>,

    // Ошибка загрузки выписки, пустая строка если ошибки нет
    pub error: String,

    // Сторно по registration id; неудачные удаляются, чтобы можно было повторить
    pub reversals: HashMap<String, ReversalStatus>,
}

/// Переходы [`BillingHistoryState`]
#[derive(Clone, Debug, PartialEq)]
pub enum BillingHistoryAction {
    /// Заменяет весь набор данных новыми периодами
    ReplaceData(Vec<BillingPeriod>),
    SetError(String),
    ClearError,
    ReversalStarted(String),
    ReversalFinished(String, WorkflowOutcome),
}

impl BillingHistoryState {
    pub fn apply(&mut self, action: BillingHistoryAction) {
        match action {
            BillingHistoryAction::ReplaceData(raw) => self.periods = derive_display(&raw),
            BillingHistoryAction::SetError(message) => self.error = message,
            BillingHistoryAction::ClearError => self.error.clear(),
            BillingHistoryAction::ReversalStarted(id) => {
                self.reversals.insert(id, ReversalStatus::Pending);
            }
            BillingHistoryAction::ReversalFinished(id, WorkflowOutcome::Succeeded) => {
                self.reversals.insert(id, ReversalStatus::Reversed);
            }
            BillingHistoryAction::ReversalFinished(id, WorkflowOutcome::Failed) => {
                self.reversals.remove(&id);
            }
        }
    }

    pub fn reversal_status(&self, registration_id: &str) -> Option<ReversalStatus> {
        self.reversals.get(registration_id).copied()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

pub fn create_state() -> RwSignal<BillingHistoryState> {
    RwSignal::new(BillingHistoryState::default())
}
