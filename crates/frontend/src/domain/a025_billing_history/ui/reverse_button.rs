use super::page::HostHandle;
use crate::domain::a025_billing_history::actions::start_reversal;
use crate::domain::a025_billing_history::state::{
    BillingHistoryAction, BillingHistoryState, ReversalStatus,
};
use contracts::domain::a025_billing_history::{BanLine, WorkflowConfig, WorkflowOutcome};
use leptos::prelude::*;
use serde_json::Value;
use std::rc::Rc;
use thaw::*;

/// Кнопка "Reverse" для корректировки, доступной к сторно
///
/// Показывает загрузку до финального состояния workflow; после успеха
/// выключается навсегда, после ошибки снова доступна. Статус хранится
/// в состоянии страницы и переживает сворачивание строки и смену вкладки.
#[component]
pub fn ReverseButton(
    line: BanLine,
    config: WorkflowConfig,
    datasource: Value,
    host: HostHandle,
    state: RwSignal<BillingHistoryState>,
) -> impl IntoView {
    let info = line.adjustment_reversal_info.unwrap_or_default();
    let registration_id = StoredValue::new(
        config.registration_id(info.reversal_attributes.sequence_number.as_deref()),
    );
    let info = StoredValue::new(info);
    let config = StoredValue::new(config);
    let datasource = StoredValue::new(datasource);

    let status = Memo::new(move |_| {
        registration_id.with_value(|id| state.with(|s| s.reversal_status(id)))
    });
    let loading = move || status.get() == Some(ReversalStatus::Pending);
    let disabled = move || status.get() == Some(ReversalStatus::Reversed);

    let reverse = move |_: leptos::ev::MouseEvent| {
        if status.get_untracked().is_some() {
            return;
        }
        let id = registration_id.get_value();
        state.update(|s| s.apply(BillingHistoryAction::ReversalStarted(id.clone())));

        let finished_id = id.clone();
        let on_outcome: Rc<dyn Fn(WorkflowOutcome)> = Rc::new(move |outcome: WorkflowOutcome| {
            state.try_update(|s| {
                s.apply(BillingHistoryAction::ReversalFinished(finished_id.clone(), outcome))
            });
        });
        let started = host.with_value(|host| {
            config.with_value(|config| {
                datasource.with_value(|datasource| {
                    info.with_value(|info| {
                        start_reversal(
                            host.bus.clone(),
                            host.registry.as_ref(),
                            config,
                            datasource,
                            info,
                            on_outcome,
                        )
                    })
                })
            })
        });
        match started {
            Ok(registration_id) => log::debug!("reversal {} submitted", registration_id),
            Err(e) => {
                log::error!("reversal could not be started: {}", e);
                state.update(|s| {
                    s.apply(BillingHistoryAction::ReversalFinished(id, WorkflowOutcome::Failed))
                });
            }
        }
    };

    view! {
        <Button
            class="reverse-adjustment-button"
            appearance=ButtonAppearance::Transparent
            size=ButtonSize::Small
            disabled=disabled
            loading=loading
            on_click=reverse
        >
            "Reverse"
        </Button>
    }
}
