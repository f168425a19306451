use super::nested_tables::NestedTables;
use super::page::HostHandle;
use crate::domain::a025_billing_history::actions::request_statement;
use crate::domain::a025_billing_history::state::{BillingHistoryAction, BillingHistoryState};
use crate::domain::a025_billing_history::view_model::{
    statement_seq_no, table_rows, EventRow, ReversalSettings,
};
use crate::shared::components::table::TableCellAmount;
use crate::shared::date_utils::format_billing_datetime;
use crate::shared::icons::icon;
use contracts::domain::a025_billing_history::BillingPeriod;
use leptos::prelude::*;
use thaw::*;

/// Число колонок таблицы транзакций, включая кнопку раскрытия
const COLUMN_COUNT: &str = "8";

#[component]
pub fn PeriodPanel(
    period: BillingPeriod,
    state: RwSignal<BillingHistoryState>,
    host: HostHandle,
    reversal: StoredValue<ReversalSettings>,
) -> impl IntoView {
    let seq_no = statement_seq_no(&period);
    let view_statement = move |_: leptos::ev::MouseEvent| {
        state.update(|s| s.apply(BillingHistoryAction::ClearError));
        let result = host.with_value(|host| request_statement(host.registry.as_ref(), &seq_no));
        if let Err(e) = result {
            log::error!("statement request failed: {}", e);
        }
    };

    let rows = table_rows(&period.date_time_buckets);

    view! {
        <div class="billing-history-period">
            {period.has_statement().then(|| view! {
                <Button
                    class="view-statements-button"
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=view_statement
                >
                    "View Statement"
                </Button>
            })}

            {move || state.with(|s| s.has_error().then(|| {
                let message = s.error.clone();
                view! {
                    <div class="billing-history-error-message">"Error: " {message}</div>
                }
            }))}

            <div class="header-bottom-styling"></div>

            <div class="main-table" style="max-height: 410px; overflow-y: auto;">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell attr:style="width: 32px;">""</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 20%;">"Date"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 20%;">"Description"</TableHeaderCell>
                            <TableHeaderCell class="billing-history-amount">"Amount"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 5%;">""</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 15%;">""</TableHeaderCell>
                            <TableHeaderCell class="billing-history-accountBalance">"Account Balance"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 8%;">""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {rows
                            .into_iter()
                            .map(|row| view! { <EventRows row=row host=host reversal=reversal state=state /> })
                            .collect_view()}
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}

/// Одна транзакция и, если раскрыта, её детальные таблицы
#[component]
fn EventRows(
    row: EventRow,
    host: HostHandle,
    reversal: StoredValue<ReversalSettings>,
    state: RwSignal<BillingHistoryState>,
) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let event = row.event;
    let show_tag = reversal.with_value(|r| r.shows_tag(&event));
    let date_time = format_billing_datetime(event.date_time.as_deref());
    let transaction_type = event.transaction_type.clone();
    let amount = event.amount.clone();
    let account_balance = event.account_balance.clone();
    let details = StoredValue::new(event);

    view! {
        <TableRow attr:data-row-key=row.key.to_string()>
            <TableCell>
                <span
                    class="billing-history-expand"
                    style="cursor: pointer;"
                    on:click=move |_| expanded.update(|open| *open = !*open)
                >
                    {move || if expanded.get() { icon("caret-down") } else { icon("caret-right") }}
                </span>
            </TableCell>
            <TableCell>
                <div class="dateTime">{date_time}</div>
            </TableCell>
            <TableCell>
                <div class="type">" " {transaction_type}</div>
            </TableCell>
            <TableCellAmount value=amount class="billing-history-amount" />
            <TableCell>""</TableCell>
            <TableCell>
                <div class="dateTime">
                    {show_tag.then(|| view! {
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                            "Reverse Adj Eligible"
                        </Badge>
                    })}
                </div>
            </TableCell>
            <TableCellAmount value=account_balance class="billing-history-accountBalance" />
            <TableCell>""</TableCell>
        </TableRow>
        {move || expanded.get().then(|| {
            let event = details.get_value();
            view! {
                <TableRow class="billing-history-expanded-row">
                    <TableCell attr:colspan=COLUMN_COUNT>
                        <NestedTables
                            ctn_lines=event.ctn_transactions
                            ban_lines=event.ban_transactions
                            transaction_type=event.transaction_type
                            host=host
                            reversal=reversal
                            state=state
                        />
                    </TableCell>
                </TableRow>
            }
        })}
    }
}
