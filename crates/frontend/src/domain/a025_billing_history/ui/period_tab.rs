use crate::shared::icons::icon;
use contracts::domain::a025_billing_history::BillingPeriod;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn PeriodTabLabel(period: BillingPeriod) -> impl IntoView {
    let heading_class = if period.is_flagged() {
        "tab-content-heading month-display-color"
    } else {
        "tab-content-heading"
    };

    view! {
        <div class="tab-content">
            <div class="tab-content-left">
                <div class=heading_class>{period.month_name.clone()}</div>
                {period.bridge_pay.then(|| view! {
                    <Tooltip content="Bridge Pay">
                        <div class="bridge-icon">{icon("bridge-pay")}</div>
                    </Tooltip>
                })}
                {period.suspended.then(|| view! {
                    <Tooltip content="Suspended Account">
                        <div class="suspend-icon">{icon("suspended")}</div>
                    </Tooltip>
                })}
            </div>
        </div>
    }
}
