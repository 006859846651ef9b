use crate::format::format_full_date;
use crate::variant::{LBL_ORDER_DATE, LBL_ORDER_FOR, LBL_ORDER_NO, LBL_SIGNATURE, ReceiptProfile};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Fallback text per label id, fixed when the document is created.
#[derive(Debug, Clone, Default)]
pub struct DefaultFields {
    values: BTreeMap<String, String>,
}

impl DefaultFields {
    pub fn for_profile(profile: &ReceiptProfile, today: NaiveDate, order_no: String) -> Self {
        let mut values: BTreeMap<String, String> = profile
            .static_defaults
            .iter()
            .map(|(id, value)| (id.to_string(), value.to_string()))
            .collect();
        values.insert(LBL_ORDER_NO.to_string(), order_no);
        values.insert(LBL_ORDER_DATE.to_string(), format_full_date(today));
        Self { values }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(id, value)| (id.as_str(), value.as_str()))
    }
}

/// Current text of every label target present on the page.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    text: BTreeMap<String, String>,
}

impl Labels {
    pub fn from_defaults(defaults: &DefaultFields) -> Self {
        let mut text: BTreeMap<String, String> = defaults
            .iter()
            .map(|(id, value)| (id.to_string(), value.to_string()))
            .collect();
        let signature = defaults.get(LBL_ORDER_FOR).unwrap_or_default().to_string();
        text.insert(LBL_SIGNATURE.to_string(), signature);
        Self { text }
    }

    pub fn get(&self, id: &str) -> &str {
        self.text.get(id).map(String::as_str).unwrap_or_default()
    }

    /// Writes only to targets that exist; returns whether one did.
    fn set(&mut self, id: &str, value: &str) -> bool {
        match self.text.get_mut(id) {
            Some(slot) => {
                value.clone_into(slot);
                true
            }
            None => false,
        }
    }
}

/// Applies one input event to its bound labels. `primary` and `secondary`
/// are `#id` selectors; the returned pairs are the label texts that changed.
pub fn bind_field_input(
    defaults: &DefaultFields,
    labels: &mut Labels,
    raw_value: &str,
    primary: &str,
    secondary: Option<&str>,
) -> Vec<(String, String)> {
    let primary_id = primary.strip_prefix('#');
    let mut value = raw_value.trim();
    if value.is_empty() {
        value = primary_id
            .and_then(|id| defaults.get(id))
            .unwrap_or_default();
    }

    let mut updates = Vec::new();
    for id in [primary_id, secondary.and_then(|s| s.strip_prefix('#'))]
        .into_iter()
        .flatten()
    {
        if labels.set(id, value) {
            updates.push((id.to_string(), value.to_string()));
        }
    }
    updates
}
