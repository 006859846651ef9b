use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

/// Upper bound for a single line item, in whole currency units.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Please enter a name for the item.")]
    EmptyName,
    #[error("Please enter an amount greater than zero.")]
    InvalidAmount,
    #[error("Amount is too large.")]
    AmountTooLarge,
    #[error("item {0} is not on the receipt")]
    UnknownItem(ItemId),
}

/// What happens to an amount that does not parse, is negative, or is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountPolicy {
    /// Unparsable and negative amounts become zero; zero is accepted.
    ClampToZero,
    /// Anything that is not a positive number rejects the whole add.
    RejectNonPositive,
}

impl AmountPolicy {
    pub fn resolve(self, raw: &str) -> Result<Decimal, LedgerError> {
        let amount = match (self, parse_amount(raw)) {
            (_, ParsedAmount::Overflow { negative: false }) => {
                return Err(LedgerError::AmountTooLarge);
            }
            (Self::ClampToZero, ParsedAmount::Value(value)) if value >= Decimal::ZERO => value,
            (Self::ClampToZero, _) => Decimal::ZERO,
            (Self::RejectNonPositive, ParsedAmount::Value(value)) if value > Decimal::ZERO => value,
            (Self::RejectNonPositive, _) => return Err(LedgerError::InvalidAmount),
        };

        if amount > Decimal::from(MAX_AMOUNT_UNITS) {
            return Err(LedgerError::AmountTooLarge);
        }
        Ok(amount)
    }
}

/// Largest number of significant digits kept from the input.
const MAX_DIGITS: usize = 28;
/// `Decimal` cannot hold more fractional digits than this.
const MAX_SCALE: i64 = 28;
/// Exponents saturate here; anything bigger already over- or underflows.
const MAX_EXPONENT: i64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedAmount {
    /// No leading number at all.
    Missing,
    Value(Decimal),
    /// A leading number too large for `Decimal`.
    Overflow { negative: bool },
}

/// Parses the longest leading `[+-]?digits[.digits][(e|E)[+-]?digits]`
/// prefix of the trimmed input, so `"12abc"` is 12, `"1e3"` is 1000 and
/// `"abc"` is missing. Values too small for `Decimal` become zero.
pub fn parse_amount(raw: &str) -> ParsedAmount {
    let bytes = raw.trim().as_bytes();
    let mut pos = 0;
    let negative = take_sign(bytes, &mut pos);

    let int_digits = take_digits(bytes, &mut pos);
    let mut frac_digits: &[u8] = &[];
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = take_digits(bytes, &mut pos);
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return ParsedAmount::Missing;
    }

    let mut exponent = 0i64;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut after = pos + 1;
        let exp_negative = take_sign(bytes, &mut after);
        let exp_digits = take_digits(bytes, &mut after);
        let magnitude = exp_digits.iter().fold(0i64, |acc, digit| {
            (acc * 10 + i64::from(digit - b'0')).min(MAX_EXPONENT)
        });
        exponent = if exp_negative { -magnitude } else { magnitude };
    }

    // Significant digits with `scale` of them after the decimal point.
    let mut digits: Vec<u8> = int_digits.iter().chain(frac_digits).copied().collect();
    let leading_zeros = digits.iter().take_while(|digit| **digit == b'0').count();
    digits.drain(..leading_zeros);
    if digits.is_empty() {
        return ParsedAmount::Value(Decimal::ZERO);
    }
    let mut scale = frac_digits.len() as i64 - exponent;

    // Power of ten of the leading digit.
    let magnitude = digits.len() as i64 - 1 - scale;
    if magnitude >= MAX_DIGITS as i64 {
        return ParsedAmount::Overflow { negative };
    }
    if magnitude < -MAX_SCALE {
        return ParsedAmount::Value(Decimal::ZERO);
    }

    if scale < 0 {
        digits.resize(digits.len() + scale.unsigned_abs() as usize, b'0');
        scale = 0;
    }
    let excess = (digits.len() as i64 - MAX_DIGITS as i64)
        .max(scale - MAX_SCALE)
        .max(0);
    digits.truncate(digits.len() - excess as usize);
    scale -= excess;

    let mantissa = digits
        .iter()
        .fold(0i128, |acc, digit| acc * 10 + i128::from(digit - b'0'));
    let mantissa = if negative { -mantissa } else { mantissa };
    match Decimal::try_from_i128_with_scale(mantissa, scale as u32) {
        Ok(value) => ParsedAmount::Value(value),
        Err(_) => ParsedAmount::Overflow { negative },
    }
}

fn take_sign(bytes: &[u8], pos: &mut usize) -> bool {
    match bytes.get(*pos) {
        Some(b'-') => {
            *pos += 1;
            true
        }
        Some(b'+') => {
            *pos += 1;
            false
        }
        _ => false,
    }
}

fn take_digits<'a>(bytes: &'a [u8], pos: &mut usize) -> &'a [u8] {
    let start = *pos;
    while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
    }
    &bytes[start..*pos]
}

/// Insertion-ordered line items for one receipt.
#[derive(Debug, Clone)]
pub struct Ledger {
    items: Vec<LineItem>,
    policy: AmountPolicy,
}

impl Ledger {
    pub fn new(policy: AmountPolicy) -> Self {
        Self {
            items: Vec::new(),
            policy,
        }
    }

    pub fn add(&mut self, name: &str, raw_amount: &str) -> Result<&LineItem, LedgerError> {
        let name = name.trim().to_uppercase();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let amount = self.policy.resolve(raw_amount)?;
        Ok(self.push(name, amount))
    }

    /// Appends an already validated item, used for seeding sample data.
    pub fn push(&mut self, name: String, amount: Decimal) -> &LineItem {
        self.items.push(LineItem {
            id: ItemId::new(),
            name,
            amount,
        });
        &self.items[self.items.len() - 1]
    }

    pub fn remove_at(&mut self, index: usize) -> Option<LineItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn remove(&mut self, id: ItemId) -> Result<LineItem, LedgerError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(LedgerError::UnknownItem(id))?;
        self.remove_at(index).ok_or(LedgerError::UnknownItem(id))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Decimal {
        total_of(&self.items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

pub fn total_of(items: &[LineItem]) -> Decimal {
    items.iter().map(|item| item.amount).sum()
}
