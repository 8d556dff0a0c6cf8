//! Quotation direction normalization.

use pos_types::Rate;

/// Rewrites a quoted rate as "units of the other currency per one base unit".
///
/// `rate` quotes `from_currency -> to_currency`. When the base is on the `to`
/// side the rate is inverted. Returns the non-base currency and its
/// base-relative rate. Callers must have checked that exactly one side is the
/// base currency.
pub fn normalize<'a>(
    from_currency: &'a str,
    to_currency: &'a str,
    rate: Rate,
    base_currency: &str,
) -> (&'a str, Rate) {
    if to_currency == base_currency {
        (from_currency, rate.inverse())
    } else {
        (to_currency, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_on_from_side_keeps_rate() {
        let (currency, rate) = normalize("USD", "RUR", Rate::Known(100.0), "USD");
        assert_eq!(currency, "RUR");
        assert_eq!(rate, Rate::Known(100.0));
    }

    #[test]
    fn test_base_on_to_side_inverts_rate() {
        let (currency, rate) = normalize("RUR", "USD", Rate::Known(0.01), "USD");
        assert_eq!(currency, "RUR");
        assert_eq!(rate, Rate::Known(1.0 / 0.01));
    }

    #[test]
    fn test_unknown_stays_unknown_in_both_directions() {
        assert_eq!(
            normalize("USD", "EUR", Rate::Unknown, "USD"),
            ("EUR", Rate::Unknown)
        );
        assert_eq!(
            normalize("EUR", "USD", Rate::Unknown, "USD"),
            ("EUR", Rate::Unknown)
        );
    }
}
