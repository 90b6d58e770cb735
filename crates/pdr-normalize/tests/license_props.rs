use pdr_normalize::normalize;
use proptest::prelude::*;

proptest! {
    /// Re-normalizing the canonical number of any valid normalization is a
    /// no-op: the number survives unchanged and stays valid.
    #[test]
    fn renormalization_is_idempotent(digits in "[0-9]{3,6}") {
        let once = normalize(&digits);
        prop_assert!(once.valid);
        let twice = normalize(&once.number);
        prop_assert!(twice.valid);
        prop_assert_eq!(&twice.number, &once.number);
        prop_assert_eq!(twice.number.len(), 6);
    }

    /// The sub-code split on 8-digit numbers always yields a 6-digit number
    /// whose renormalization is stable.
    #[test]
    fn eight_digit_split_is_stable(digits in "[0-9]{8}") {
        let once = normalize(&digits);
        prop_assert!(once.valid);
        prop_assert_eq!(once.sub_code.len(), 2);
        prop_assert_eq!(once.number.len(), 6);

        let twice = normalize(&once.number);
        prop_assert!(twice.valid);
        prop_assert_eq!(&twice.number, &once.number);
    }

    /// Normalization never panics on arbitrary input.
    #[test]
    fn never_panics(raw in "\\PC{0,40}") {
        let _ = normalize(&raw);
    }

    /// Registry-style decorated numbers reduce to the bare padded number.
    #[test]
    fn decorated_forms_agree_with_plain(digits in "[0-9]{6}") {
        let plain = normalize(&digits);
        let decorated = normalize(&format!("R-{digits}-1"));
        prop_assert!(plain.valid && decorated.valid);
        prop_assert_eq!(plain.number, decorated.number);
    }
}
