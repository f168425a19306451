use super::page::HostHandle;
use super::reverse_button::ReverseButton;
use crate::domain::a025_billing_history::state::BillingHistoryState;
use crate::domain::a025_billing_history::view_model::{first_occurrence_indices, ReversalSettings};
use crate::shared::components::table::TableCellAmount;
use contracts::domain::a025_billing_history::{BanLine, CtnLine};
use leptos::prelude::*;
use thaw::*;

const CTN_TEXT_CLASS: &str = "data-styling-for-ctn-table";

/// Детальные таблицы раскрытой транзакции: строки счёта, затем строки CTN
#[component]
pub fn NestedTables(
    ctn_lines: Vec<CtnLine>,
    ban_lines: Vec<BanLine>,
    /// Тип родительской транзакции, общий для всех строк счёта
    transaction_type: String,
    host: HostHandle,
    reversal: StoredValue<ReversalSettings>,
    state: RwSignal<BillingHistoryState>,
) -> impl IntoView {
    view! {
        <div class="hide-icon">
            <div class="nested-table">
                {(!ban_lines.is_empty()).then(|| view! {
                    <BanTable
                        lines=ban_lines
                        transaction_type=transaction_type
                        host=host
                        reversal=reversal
                        state=state
                    />
                })}
                {(!ctn_lines.is_empty()).then(|| view! { <CtnTable lines=ctn_lines /> })}
            </div>
        </div>
    }
}

#[component]
fn BanTable(
    lines: Vec<BanLine>,
    transaction_type: String,
    host: HostHandle,
    reversal: StoredValue<ReversalSettings>,
    state: RwSignal<BillingHistoryState>,
) -> impl IntoView {
    let rows = lines
        .into_iter()
        .map(|line| {
            let workflow =
                reversal.with_value(|r| r.button_workflow(&line, &transaction_type).cloned());
            let datasource = reversal.with_value(|r| r.datasource.clone());
            let description = line.description.clone();
            let amount = line.amount.clone();
            view! {
                <TableRow>
                    <TableCell>
                        <div class=CTN_TEXT_CLASS>{description}</div>
                    </TableCell>
                    <TableCellAmount value=amount class="billing-history-amount" text_class=CTN_TEXT_CLASS />
                    <TableCell class="billing-history-amount">
                        <div class="dateTime">
                            {workflow.map(|config| view! {
                                <ReverseButton
                                    line=line
                                    config=config
                                    datasource=datasource
                                    host=host
                                    state=state
                                />
                            })}
                        </div>
                    </TableCell>
                    <TableCell>""</TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <div class="add-styling ctn-table">
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell attr:style="width: 55%;">""</TableHeaderCell>
                        <TableHeaderCell class="billing-history-amount" attr:style="width: 20%;">"AMOUNT"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 20%;">""</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 25%;">""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>{rows}</TableBody>
            </Table>
        </div>
    }
}

/// Строки CTN; видна только первая строка каждого CTN, повторы остаются
/// в DOM с классом `hide-row-data`
#[component]
fn CtnTable(lines: Vec<CtnLine>) -> impl IntoView {
    let visible = first_occurrence_indices(&lines);
    let rows = lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let row_class = if visible.contains(&index) { "" } else { "hide-row-data" };
            view! {
                <TableRow class=row_class>
                    <TableCell class="level-one-ctn-column">
                        <div class="data-styling-for-ctn-table level-one-ctn-column">
                            {line.ctn.unwrap_or_default()}
                        </div>
                    </TableCell>
                    <TableCell>
                        <div class=CTN_TEXT_CLASS>{line.description}</div>
                    </TableCell>
                    <TableCellAmount value=line.amount class="billing-history-amount" text_class=CTN_TEXT_CLASS />
                    <TableCell>""</TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <div class="ctn-table">
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell class="level-one-ctn-column" attr:style="width: 20%;">"CTN"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 35%;">"SOC DESCRIPTION"</TableHeaderCell>
                        <TableHeaderCell class="billing-history-amount" attr:style="width: 20%;">"AMOUNT"</TableHeaderCell>
                        <TableHeaderCell attr:style="width: 25%;">""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>{rows}</TableBody>
            </Table>
        </div>
    }
}
