use crate::ledger::AmountPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label ids shared by both receipt pages.
pub const LBL_ORDER_FOR: &str = "lblOrderFor";
pub const LBL_ORDER_NO: &str = "lblOrderNo";
pub const LBL_ORDER_DATE: &str = "lblOrderDate";
pub const LBL_DESTINATION: &str = "lblDestination";
pub const LBL_DEPARTURE_DATE: &str = "lblDepartureDate";
pub const LBL_RETURN_DATE: &str = "lblReturnDate";
pub const LBL_SIGNATURE: &str = "lblSignature";

pub const RECEIPT_SELECTOR: &str = ".receipt";
pub const EXPORT_PREFIX: &str = "dailybill";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Expense,
    Activity,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Expense, Variant::Activity];

    pub fn profile(self) -> &'static ReceiptProfile {
        match self {
            Variant::Expense => &EXPENSE,
            Variant::Activity => &ACTIVITY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Expense => "expense",
            Variant::Activity => "activity",
        }
    }
}

/// Everything that differs between the two receipt pages: element ids,
/// wording, static defaults, sample data and the amount policy.
#[derive(Debug)]
pub struct ReceiptProfile {
    pub variant: Variant,
    pub title: &'static str,
    pub heading: &'static str,
    pub item_label: &'static str,
    pub name_input_id: &'static str,
    pub amount_input_id: &'static str,
    pub add_button_id: &'static str,
    pub delete_button_prefix: &'static str,
    pub list_container_id: &'static str,
    pub receipt_container_id: &'static str,
    pub item_count_id: &'static str,
    pub total_id: &'static str,
    pub amount_policy: AmountPolicy,
    /// Label id and fallback text; order number and date are added per document.
    pub static_defaults: &'static [(&'static str, &'static str)],
    /// Sample items as (name, amount in cents).
    pub sample_items: &'static [(&'static str, i64)],
}

impl ReceiptProfile {
    pub fn sample(&self) -> impl Iterator<Item = (String, Decimal)> + '_ {
        self.sample_items
            .iter()
            .map(|(name, cents)| (name.to_string(), Decimal::new(*cents, 2)))
    }
}

static EXPENSE: ReceiptProfile = ReceiptProfile {
    variant: Variant::Expense,
    title: "dailybill - Receipt Generator",
    heading: "Expenses",
    item_label: "expense",
    name_input_id: "txtExpense",
    amount_input_id: "txtExpenseAmount",
    add_button_id: "btnAddExpense",
    delete_button_prefix: "btnDeleteExpense",
    list_container_id: "lExpenses",
    receipt_container_id: "lReceiptExpenses",
    item_count_id: "lblItemCount",
    total_id: "lblReceiptTotal",
    amount_policy: AmountPolicy::ClampToZero,
    static_defaults: &[
        (LBL_ORDER_FOR, "JOHN DOE"),
        (LBL_DESTINATION, "Pet Express"),
        (LBL_DEPARTURE_DATE, "2023-10-01"),
        (LBL_RETURN_DATE, "2023-10-15"),
    ],
    sample_items: &[
        ("DOG FOOD", 3300),
        ("CAT LITTER", 1500),
        ("PET TOYS", 1200),
        ("GROOMING SUPPLIES", 2500),
        ("PET TREATS", 800),
    ],
};

static ACTIVITY: ReceiptProfile = ReceiptProfile {
    variant: Variant::Activity,
    title: "dailybill - Activity Receipt",
    heading: "Activities",
    item_label: "activity",
    name_input_id: "txtActivity",
    amount_input_id: "txtActivityAmount",
    add_button_id: "btnAddActivity",
    delete_button_prefix: "btnDeleteActivity",
    list_container_id: "lActivities",
    receipt_container_id: "lReceiptActivities",
    item_count_id: "lblActivityCount",
    total_id: "lblActivityTotal",
    amount_policy: AmountPolicy::ClampToZero,
    static_defaults: &[
        (LBL_ORDER_FOR, "JOHN DOE"),
        (LBL_DESTINATION, "City Park"),
        (LBL_DEPARTURE_DATE, "2023-10-01"),
        (LBL_RETURN_DATE, "2023-10-15"),
    ],
    sample_items: &[
        ("MORNING WALK", 0),
        ("MUSEUM TICKET", 1800),
        ("BIKE RENTAL", 2450),
        ("LUNCH", 1325),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn variants_share_one_amount_policy() {
        assert_eq!(
            Variant::Expense.profile().amount_policy,
            Variant::Activity.profile().amount_policy
        );
    }

    #[test]
    fn element_ids_do_not_collide_within_a_page() {
        for variant in Variant::ALL {
            let profile = variant.profile();
            let ids = [
                profile.name_input_id,
                profile.amount_input_id,
                profile.add_button_id,
                profile.list_container_id,
                profile.receipt_container_id,
                profile.item_count_id,
                profile.total_id,
            ];
            let labels = profile.static_defaults.iter().map(|(id, _)| *id);
            let all: Vec<&str> = ids.into_iter().chain(labels).collect();
            let unique: HashSet<&str> = all.iter().copied().collect();
            assert_eq!(unique.len(), all.len(), "{variant:?}");
        }
    }

    #[test]
    fn variant_path_segment_matches_serde_name() {
        for variant in Variant::ALL {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, format!("\"{}\"", variant.as_str()));
        }
    }
}
