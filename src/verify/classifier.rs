pub const SPF_PREFIX: &str = "v=spf1";
pub const DMARC_PREFIX: &str = "v=DMARC1";

/// First record starting with `prefix`.
///
/// The comparison is an exact, case-sensitive prefix match: records are
/// neither trimmed nor folded.
pub fn find_record<'a>(records: &'a [String], prefix: &str) -> Option<&'a str> {
    records
        .iter()
        .map(String::as_str)
        .find(|record| record.starts_with(prefix))
}

/// `(true, record)` for the first matching record, `(false, "")` otherwise.
pub fn classify(records: &[String], prefix: &str) -> (bool, String) {
    match find_record(records, prefix) {
        Some(record) => (true, record.to_string()),
        None => (false, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn returns_first_spf_record_verbatim() {
        let records = vec![
            "v=spf1 include:_spf.example.com ~all".to_string(),
            "other=record".to_string(),
        ];
        let (found, value) = classify(&records, SPF_PREFIX);
        assert!(found);
        assert_eq!(value, "v=spf1 include:_spf.example.com ~all");
    }

    #[test]
    fn first_match_wins() {
        let records = vec![
            "google-site-verification=abc".to_string(),
            "v=DMARC1; p=reject".to_string(),
            "v=DMARC1; p=none".to_string(),
        ];
        assert_eq!(
            find_record(&records, DMARC_PREFIX),
            Some("v=DMARC1; p=reject")
        );
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let records = vec!["V=SPF1 -all".to_string(), "v=dmarc1; p=none".to_string()];
        assert_eq!(classify(&records, SPF_PREFIX), (false, String::new()));
        assert_eq!(classify(&records, DMARC_PREFIX), (false, String::new()));
    }

    #[test]
    fn leading_whitespace_is_not_trimmed() {
        let records = vec![" v=spf1 -all".to_string()];
        assert!(find_record(&records, SPF_PREFIX).is_none());
    }

    #[test]
    fn empty_input_reports_missing() {
        assert_eq!(classify(&[], SPF_PREFIX), (false, String::new()));
    }

    proptest! {
        #[test]
        fn found_record_always_carries_prefix(records in proptest::collection::vec(".{0,24}", 0..8)) {
            let (found, value) = classify(&records, SPF_PREFIX);
            if found {
                prop_assert!(value.starts_with(SPF_PREFIX));
                prop_assert!(records.contains(&value));
            } else {
                prop_assert!(value.is_empty());
                prop_assert!(records.iter().all(|r| !r.starts_with(SPF_PREFIX)));
            }
        }

        #[test]
        fn prefixed_record_is_found(tail in "[ -~]{0,32}", noise in proptest::collection::vec("[a-u][ -~]{0,16}", 0..4)) {
            let mut records = noise.clone();
            let expected = format!("{SPF_PREFIX}{tail}");
            records.push(expected.clone());
            prop_assert_eq!(classify(&records, SPF_PREFIX), (true, expected));
        }
    }
}
