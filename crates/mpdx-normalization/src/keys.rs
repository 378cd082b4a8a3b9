//! Persisted key normalization.

/// Converts a snake_case key to camelCase.
///
/// The first segment is kept as is and every following segment gets its
/// first letter uppercased. Keys without underscores pass through unchanged,
/// so already normalized keys are fixed points.
///
/// ```
/// use mpdx_normalization::normalize_key;
///
/// assert_eq!(normalize_key("designation_account_id"), "designationAccountId");
/// assert_eq!(normalize_key("starred"), "starred");
/// ```
pub fn normalize_key(raw: &str) -> String {
    if !raw.contains('_') {
        return raw.to_string();
    }
    let mut segments = raw.split('_');
    let mut key = String::with_capacity(raw.len());
    if let Some(first) = segments.next() {
        key.push_str(first);
    }
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(head) = chars.next() {
            key.extend(head.to_uppercase());
            key.push_str(chars.as_str());
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_keys() {
        assert_eq!(normalize_key("address_historic"), "addressHistoric");
        assert_eq!(normalize_key("reverse_status"), "reverseStatus");
        assert_eq!(normalize_key("donation_period_percent_rank"), "donationPeriodPercentRank");
    }

    #[test]
    fn test_camel_case_passes_through() {
        assert_eq!(normalize_key("pledgeCurrency"), "pledgeCurrency");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_doubled_underscores_collapse() {
        assert_eq!(normalize_key("next__ask"), "nextAsk");
    }
}
