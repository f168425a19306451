use super::main_table::PeriodPanel;
use super::period_tab::PeriodTabLabel;
use crate::domain::a025_billing_history::lifecycle::{
    initial_load, install_hooks, request_refetch, InitialLoad,
};
use crate::domain::a025_billing_history::state::{create_state, BillingHistoryAction};
use crate::domain::a025_billing_history::view_model::ReversalSettings;
use crate::shared::host::{is_enabled, render_or_message, HostBindings};
use contracts::domain::a025_billing_history::{
    BillingHistoryProps as HostProps, BillingPeriod,
};
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

/// Сервисы хоста, доступные из реактивных замыканий
pub type HostHandle = StoredValue<HostBindings, LocalStorage>;

#[component]
pub fn BillingHistory(props: HostProps, host: HostBindings) -> impl IntoView {
    let state = create_state();
    let dispatch = move |action: BillingHistoryAction| state.update(|s| s.apply(action));

    let hooks = install_hooks(
        host.registry.clone(),
        props.component_id.as_deref(),
        Rc::new(move |periods: Vec<BillingPeriod>| {
            dispatch(BillingHistoryAction::ReplaceData(periods))
        }),
        Rc::new(move |message: String| dispatch(BillingHistoryAction::SetError(message))),
    );
    match initial_load(&props) {
        InitialLoad::Refetch => request_refetch(host.registry.as_ref()),
        InitialLoad::Load(periods) => dispatch(BillingHistoryAction::ReplaceData(periods)),
    }

    let hooks = StoredValue::new_local(hooks);
    on_cleanup(move || {
        hooks.try_with_value(|hooks| hooks.release());
    });

    let feature_enabled = is_enabled(
        host.feature_flags.as_ref(),
        &props.properties.reverse_adj_feature_flag,
    );
    let reversal = StoredValue::new(ReversalSettings::from_props(&props, feature_enabled));
    let template_html = render_or_message(
        host.templates.as_ref(),
        &props.properties.template,
        &props.template_context(),
    );
    let host: HostHandle = StoredValue::new_local(host);

    let periods = Memo::new(move |_| state.with(|s| s.periods.clone()));
    let selected_tab = RwSignal::new("0".to_string());

    // Переключение вкладки сбрасывает ошибку выписки
    Effect::new(move |prev: Option<String>| {
        let current = selected_tab.get();
        if prev.is_some() {
            dispatch(BillingHistoryAction::ClearError);
        }
        current
    });

    view! {
        <div class="customer-360-billing-history">
            <div class="billing-history">
                <TabList selected_value=selected_tab>
                    {move || {
                        periods
                            .get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, period)| {
                                view! {
                                    <Tab value=index.to_string()>
                                        <PeriodTabLabel period=period />
                                    </Tab>
                                }
                            })
                            .collect_view()
                    }}
                </TabList>

                <div class="billing-history-tab-content">
                    {move || {
                        let index = selected_tab.get().parse::<usize>().unwrap_or(0);
                        periods.with(|periods| periods.get(index).or_else(|| periods.first()).cloned())
                            .map(|period| {
                                view! {
                                    <PeriodPanel
                                        period=period
                                        state=state
                                        host=host
                                        reversal=reversal
                                    />
                                }
                            })
                    }}
                </div>
            </div>
            <div class="billing-history-component" inner_html=template_html></div>
        </div>
    }
}
