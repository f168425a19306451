//! Ячейка таблицы для сумм биллинга
//!
//! # Примеры
//!
//! ```ignore
//! // Колонка суммы в основной таблице
//! <TableCellAmount value=event.amount class="billing-history-amount" />
//!
//! // Вложенные таблицы CTN/BAN используют мелкий стиль текста
//! <TableCellAmount value=line.amount text_class="data-styling-for-ctn-table" />
//! ```

use super::number_format::format_two_decimals;
use leptos::prelude::*;
use thaw::*;

/// Ячейка с суммой, приведённой к двум знакам после запятой
///
/// Префикс валюты сохраняется как есть; некорректные суммы дают `NaN`.
#[component]
pub fn TableCellAmount(
    /// Сумма в том виде, в каком её прислал биллинг
    #[prop(into)]
    value: String,

    /// Класс самой ячейки
    #[prop(optional)]
    class: &'static str,

    /// Класс внутренней обёртки текста
    #[prop(optional, default = "dateTime")]
    text_class: &'static str,
) -> impl IntoView {
    let formatted = format_two_decimals(&value);
    let cell_class = format!("text-right {}", class).trim_end().to_string();

    view! {
        <TableCell class=cell_class>
            <div class=text_class>{formatted}</div>
        </TableCell>
    }
}
