use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// US dollars, en-US grouping, two decimals rounded half away from zero.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(2);

    let text = rounded.to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Long en-US date, e.g. `Wednesday, October 14, 2026`.
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn generate_order_number() -> String {
    let value = Uuid::new_v4().as_u128() % 10_000;
    format!("#{value:04}")
}

pub fn generate_export_filename(prefix: &str, extension: &str) -> String {
    export_filename_at(prefix, extension, Local::now().naive_local(), &random_token(5))
}

pub fn export_filename_at(
    prefix: &str,
    extension: &str,
    now: NaiveDateTime,
    token: &str,
) -> String {
    format!(
        "{prefix}-{}_{}_{token}.{extension}",
        now.format("%Y%m%d"),
        now.format("%H%M%S")
    )
}

/// Lowercase base36 characters drawn from a v4 UUID.
pub fn random_token(len: usize) -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut token = String::with_capacity(len);
    for _ in 0..len {
        token.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn parse_currency(text: &str) -> Decimal {
        let digits: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
        dec(&digits)
    }

    #[test]
    fn currency_pads_and_groups() {
        assert_eq!(format_currency(dec("16.5")), "$16.50");
        assert_eq!(format_currency(dec("5")), "$5.00");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(dec("999.999")), "$1,000.00");
        assert_eq!(format_currency(dec("1234567.891")), "$1,234,567.89");
        assert_eq!(format_currency(dec("100000")), "$100,000.00");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec("0.005")), "$0.01");
        assert_eq!(format_currency(dec("2.345")), "$2.35");
        assert_eq!(format_currency(dec("2.344")), "$2.34");
    }

    #[test]
    fn currency_negative_and_negative_zero() {
        assert_eq!(format_currency(dec("-5")), "-$5.00");
        assert_eq!(format_currency(dec("-0.001")), "$0.00");
    }

    #[test]
    fn formatted_total_parses_back_within_a_cent() {
        for raw in ["0", "0.1", "16.5", "12345.678", "0.005", "999999.994"] {
            let value = dec(raw);
            let back = parse_currency(&format_currency(value));
            assert!((back - value).abs() <= dec("0.005"), "{raw} -> {back}");
        }
    }

    #[test]
    fn full_date_is_long_form() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        assert_eq!(format_full_date(date), "Wednesday, October 14, 2026");
        let date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert_eq!(format_full_date(date), "Monday, January 2, 2023");
    }

    #[test]
    fn order_number_is_hash_and_four_digits() {
        for _ in 0..50 {
            let order = generate_order_number();
            assert_eq!(order.len(), 5);
            assert!(order.starts_with('#'));
            assert!(order[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn export_filename_layout() {
        let now = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(
            export_filename_at("dailybill", "png", now, "a1b2c"),
            "dailybill-20260307_090501_a1b2c.png"
        );
    }

    #[test]
    fn generated_filename_has_random_suffix() {
        let name = generate_export_filename("dailybill", "png");
        let stem = name.strip_suffix(".png").unwrap();
        let parts: Vec<&str> = stem
            .strip_prefix("dailybill-")
            .unwrap()
            .split('_')
            .collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 8);
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 5);
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
