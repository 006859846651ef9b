use crate::fields::{DefaultFields, Labels, bind_field_input};
use crate::format::{format_currency, generate_order_number};
use crate::ledger::{ItemId, Ledger, LedgerError};
use crate::models::{DocumentUpdate, ItemView};
use crate::render::{RenderedReceipt, render_editable_list, render_receipt};
use crate::variant::{ReceiptProfile, Variant};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::{fmt, str::FromStr};
use tracing::debug;
use uuid::Uuid;

/// Open documents kept before the oldest is dropped.
pub const MAX_OPEN_DOCUMENTS: usize = 64;

/// Identifies one loaded page; embedded in the page and echoed by every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// One loaded receipt page: its ledger, label defaults and live label text.
#[derive(Debug, Clone)]
pub struct ReceiptDocument {
    id: DocumentId,
    profile: &'static ReceiptProfile,
    ledger: Ledger,
    defaults: DefaultFields,
    labels: Labels,
    /// Receipt rendered from the sample items at load; shown until the
    /// first mutation.
    seed_receipt: Option<RenderedReceipt>,
}

impl ReceiptDocument {
    pub fn fresh(variant: Variant) -> Self {
        Self::new(variant, Local::now().date_naive(), generate_order_number())
    }

    pub fn new(variant: Variant, today: NaiveDate, order_no: String) -> Self {
        let profile = variant.profile();
        let defaults = DefaultFields::for_profile(profile, today, order_no);
        let labels = Labels::from_defaults(&defaults);

        let mut ledger = Ledger::new(profile.amount_policy);
        for (name, amount) in profile.sample() {
            ledger.push(name, amount);
        }
        let seed_receipt = Some(render_receipt(ledger.items()));
        ledger.clear();

        Self {
            id: DocumentId::new(),
            profile,
            ledger,
            defaults,
            labels,
            seed_receipt,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn profile(&self) -> &'static ReceiptProfile {
        self.profile
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn add_item(
        &mut self,
        name: &str,
        raw_amount: &str,
    ) -> Result<DocumentUpdate, LedgerError> {
        let item = self.ledger.add(name, raw_amount)?;
        debug!(
            variant = self.profile.variant.as_str(),
            document = %self.id,
            item = %item.id,
            name = %item.name,
            amount = %item.amount,
            "added line item"
        );
        self.seed_receipt = None;
        Ok(self.snapshot())
    }

    pub fn remove_item(&mut self, id: ItemId) -> Result<DocumentUpdate, LedgerError> {
        let item = self.ledger.remove(id)?;
        debug!(
            variant = self.profile.variant.as_str(),
            document = %self.id,
            item = %item.id,
            name = %item.name,
            "removed line item"
        );
        self.seed_receipt = None;
        Ok(self.snapshot())
    }

    pub fn field_input(
        &mut self,
        raw: &str,
        primary: &str,
        secondary: Option<&str>,
    ) -> DocumentUpdate {
        let text = bind_field_input(&self.defaults, &mut self.labels, raw, primary, secondary)
            .into_iter()
            .collect();
        DocumentUpdate {
            text,
            ..DocumentUpdate::default()
        }
    }

    pub fn receipt(&self) -> RenderedReceipt {
        match &self.seed_receipt {
            Some(seed) => seed.clone(),
            None => render_receipt(self.ledger.items()),
        }
    }

    pub fn list_html(&self) -> String {
        render_editable_list(&self.ledger, self.profile).into_string()
    }

    /// Both fragments plus count and total, rendered from the current state.
    pub fn snapshot(&self) -> DocumentUpdate {
        let profile = self.profile;
        let receipt = self.receipt();

        let mut update = DocumentUpdate::default();
        update
            .html
            .insert(profile.list_container_id.to_string(), self.list_html());
        update
            .text
            .insert(profile.item_count_id.to_string(), receipt.item_count.to_string());
        update
            .text
            .insert(profile.total_id.to_string(), receipt.formatted_total());
        update
            .html
            .insert(profile.receipt_container_id.to_string(), receipt.html);
        update.items = self
            .ledger
            .items()
            .iter()
            .map(|item| ItemView {
                id: item.id,
                name: item.name.clone(),
                amount: format_currency(item.amount),
            })
            .collect();
        update
    }
}

/// Every open page, each with its own document. Loading a page never
/// touches the others; past `capacity` the oldest is dropped.
#[derive(Debug)]
pub struct Documents {
    open: HashMap<DocumentId, ReceiptDocument>,
    order: VecDeque<DocumentId>,
    capacity: usize,
}

impl Documents {
    pub fn new() -> Self {
        Self::with_capacity(MAX_OPEN_DOCUMENTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            open: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// A page load starts a new document alongside any that are open.
    pub fn open(&mut self, variant: Variant) -> &ReceiptDocument {
        self.insert(ReceiptDocument::fresh(variant))
    }

    pub fn insert(&mut self, doc: ReceiptDocument) -> &ReceiptDocument {
        let id = doc.id();
        while self.order.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.open.remove(&oldest);
            debug!(document = %oldest, "dropped oldest receipt document");
        }
        self.order.push_back(id);
        self.open.entry(id).or_insert(doc)
    }

    /// The document, if it is still open and belongs to `variant`.
    pub fn get(&self, variant: Variant, id: DocumentId) -> Option<&ReceiptDocument> {
        self.open
            .get(&id)
            .filter(|doc| doc.profile().variant == variant)
    }

    pub fn get_mut(&mut self, variant: Variant, id: DocumentId) -> Option<&mut ReceiptDocument> {
        self.open
            .get_mut(&id)
            .filter(|doc| doc.profile().variant == variant)
    }

    /// Drops a document when its page goes away. Returns whether it was open.
    pub fn close(&mut self, variant: Variant, id: DocumentId) -> bool {
        if self.get(variant, id).is_none() {
            return false;
        }
        self.open.remove(&id);
        self.order.retain(|open| *open != id);
        true
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

impl Default for Documents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{LBL_ORDER_DATE, LBL_ORDER_NO};

    fn expense_doc() -> ReceiptDocument {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        ReceiptDocument::new(Variant::Expense, today, "#1234".to_string())
    }

    #[test]
    fn load_shows_sample_receipt_with_empty_ledger() {
        let doc = expense_doc();
        assert!(doc.ledger().is_empty());

        let snapshot = doc.snapshot();
        assert_eq!(snapshot.text["lblItemCount"], "5");
        assert_eq!(snapshot.text["lblReceiptTotal"], "$93.00");
        assert!(snapshot.html["lReceiptExpenses"].contains("DOG FOOD"));
        assert!(snapshot.html["lExpenses"].is_empty());
        assert!(snapshot.items.is_empty());
        assert_eq!(doc.labels().get(LBL_ORDER_NO), "#1234");
        assert_eq!(doc.labels().get(LBL_ORDER_DATE), "Wednesday, October 14, 2026");
    }

    #[test]
    fn first_add_replaces_sample_receipt() {
        let mut doc = expense_doc();
        doc.add_item("coffee", "4.5").unwrap();
        let update = doc.add_item("book", "12").unwrap();

        assert_eq!(update.text["lblItemCount"], "2");
        assert_eq!(update.text["lblReceiptTotal"], "$16.50");
        assert!(!update.html["lReceiptExpenses"].contains("DOG FOOD"));
        assert_eq!(update.items.len(), 2);
        assert_eq!(update.items[0].name, "COFFEE");
    }

    #[test]
    fn remove_first_of_two_leaves_second() {
        let mut doc = expense_doc();
        doc.add_item("item", "5").unwrap();
        doc.add_item("item2", "5").unwrap();
        let first = doc.ledger().items()[0].id;

        let update = doc.remove_item(first).unwrap();
        assert_eq!(update.items.len(), 1);
        assert_eq!(update.items[0].name, "ITEM2");
        assert_eq!(update.items[0].amount, "$5.00");
        assert_eq!(update.text["lblReceiptTotal"], "$5.00");
        assert_eq!(update.text["lblItemCount"], "1");
    }

    #[test]
    fn failed_add_keeps_sample_receipt() {
        let mut doc = expense_doc();
        assert_eq!(doc.add_item(" ", "3").unwrap_err(), LedgerError::EmptyName);
        assert_eq!(doc.snapshot().text["lblItemCount"], "5");
    }

    #[test]
    fn removing_unknown_item_is_an_error() {
        let mut doc = expense_doc();
        let id = ItemId::new();
        assert_eq!(doc.remove_item(id).unwrap_err(), LedgerError::UnknownItem(id));
    }

    #[test]
    fn field_input_returns_text_updates_only() {
        let mut doc = expense_doc();
        let update = doc.field_input("Ada", "#lblOrderFor", Some("#lblSignature"));
        assert!(update.html.is_empty());
        assert_eq!(update.text["lblOrderFor"], "Ada");
        assert_eq!(update.text["lblSignature"], "Ada");

        let update = doc.field_input("", "#lblOrderFor", Some("#lblSignature"));
        assert_eq!(update.text["lblOrderFor"], "JOHN DOE");
    }

    #[test]
    fn opening_a_page_leaves_other_documents_alone() {
        let mut documents = Documents::new();
        let first = documents.open(Variant::Activity).id();
        documents
            .get_mut(Variant::Activity, first)
            .unwrap()
            .add_item("hike", "0")
            .unwrap();

        let second = documents.open(Variant::Activity).id();
        assert_ne!(first, second);
        assert!(documents.get(Variant::Activity, second).unwrap().ledger().is_empty());
        assert_eq!(documents.get(Variant::Activity, first).unwrap().ledger().len(), 1);
        assert_eq!(documents.len(), 2);
    }

    #[test]
    fn document_is_only_reachable_through_its_variant() {
        let mut documents = Documents::new();
        let id = documents.open(Variant::Expense).id();
        assert!(documents.get(Variant::Activity, id).is_none());
        assert!(documents.get_mut(Variant::Activity, id).is_none());
        assert!(!documents.close(Variant::Activity, id));
        assert!(documents.get(Variant::Expense, id).is_some());
    }

    #[test]
    fn oldest_document_is_dropped_past_capacity() {
        let mut documents = Documents::with_capacity(2);
        let first = documents.open(Variant::Expense).id();
        let second = documents.open(Variant::Expense).id();
        let third = documents.open(Variant::Activity).id();

        assert_eq!(documents.len(), 2);
        assert!(documents.get(Variant::Expense, first).is_none());
        assert!(documents.get(Variant::Expense, second).is_some());
        assert!(documents.get(Variant::Activity, third).is_some());
    }

    #[test]
    fn closed_document_is_gone() {
        let mut documents = Documents::new();
        let id = documents.open(Variant::Expense).id();
        assert!(documents.close(Variant::Expense, id));
        assert!(documents.get(Variant::Expense, id).is_none());
        assert!(!documents.close(Variant::Expense, id));
        assert!(documents.is_empty());
    }

    #[test]
    fn document_id_round_trips_through_text() {
        let id = DocumentId::new();
        assert_eq!(id.to_string().parse::<DocumentId>().unwrap(), id);
    }
}
