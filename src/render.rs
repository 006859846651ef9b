use crate::format::format_currency;
use crate::ledger::{Ledger, LineItem, total_of};
use crate::variant::ReceiptProfile;
use maud::{Markup, PreEscaped, html};
use rust_decimal::Decimal;

const TRASH_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor" class="icon"><path stroke-linecap="round" stroke-linejoin="round" d="m14.74 9-.346 9m-4.788 0L9.26 9m9.968-3.21c.342.052.682.107 1.022.166m-1.022-.165L18.16 19.673a2.25 2.25 0 0 1-2.244 2.077H8.084a2.25 2.25 0 0 1-2.244-2.077L4.772 5.79m14.456 0a48.108 48.108 0 0 0-3.478-.397m-12 .562c.34-.059.68-.114 1.022-.165m0 0a48.11 48.11 0 0 1 3.478-.397m7.5 0v-.916c0-1.18-.91-2.164-2.09-2.201a51.964 51.964 0 0 0-3.32 0c-1.18.037-2.09 1.022-2.09 2.201v.916m7.5 0a48.667 48.667 0 0 0-7.5 0"/></svg>"#;

#[derive(Debug, Clone)]
pub struct RenderedReceipt {
    pub html: String,
    pub item_count: usize,
    pub total: Decimal,
}

impl RenderedReceipt {
    pub fn formatted_total(&self) -> String {
        format_currency(self.total)
    }
}

/// Form-side list: one disabled row per item with a delete button keyed by
/// the item's id.
pub fn render_editable_list(ledger: &Ledger, profile: &ReceiptProfile) -> Markup {
    html! {
        @for item in ledger.items() {
            div class="list-row" {
                input class="list-name" type="text" disabled value=(item.name);
                input class="list-amount" type="text" disabled value=(format_currency(item.amount));
                button
                    id={ (profile.delete_button_prefix) "_" (item.id) }
                    class="btn-delete"
                    type="button"
                    data-item-id=(item.id)
                    aria-label={ "Delete " (item.name) } {
                    (PreEscaped(TRASH_ICON))
                }
            }
        }
    }
}

pub fn render_receipt(items: &[LineItem]) -> RenderedReceipt {
    let markup = html! {
        @for item in items {
            div class="receipt-line" {
                div { (item.name) }
                div { (format_currency(item.amount)) }
            }
        }
    };

    RenderedReceipt {
        html: markup.into_string(),
        item_count: items.len(),
        total: total_of(items),
    }
}
