//! Invoice number generation.

use chrono::Datelike;

/// Generate an invoice number of the form `INV-{year}-{4 random digits}`.
///
/// The four-digit suffix is random, not sequential, and there is no
/// uniqueness check against existing numbers; collisions are tolerated.
pub fn generate_invoice_number(today: chrono::NaiveDate) -> String {
    let suffix: u32 = rand::random_range(0..10_000);
    format!("INV-{}-{:04}", today.year(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn number_has_expected_format() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let number = generate_invoice_number(today);

        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "INV");
        assert_eq!(parts[1], "2025");
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn suffix_is_zero_padded() {
        // The suffix must always be exactly four digits, even for small
        // random values; run enough samples to make padding failures likely
        // to surface.
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        for _ in 0..256 {
            let number = generate_invoice_number(today);
            assert_eq!(number.len(), "INV-2025-0000".len());
        }
    }
}
