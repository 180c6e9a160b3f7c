use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating dotted region codes
    /// Segment count encodes the level: province, city, district, village
    /// - Valid: "35", "35.14", "35.14.18", "35.14.18.2007"
    /// - Invalid: "35.", "3", "35.1", "35.14.18.200", "35.1234"
    pub static ref REGION_CODE_REGEX: Regex =
        Regex::new(r"^\d{2}$|^\d{2}\.\d{2}$|^\d{2}\.\d{2}\.\d{2}$|^\d{2}\.\d{2}\.\d{2}\.\d{4}$")
            .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_code_regex_valid() {
        assert!(REGION_CODE_REGEX.is_match("35"));
        assert!(REGION_CODE_REGEX.is_match("35.14"));
        assert!(REGION_CODE_REGEX.is_match("35.14.18"));
        assert!(REGION_CODE_REGEX.is_match("35.14.18.2007"));
        assert!(REGION_CODE_REGEX.is_match("11.01.01.2001"));
    }

    #[test]
    fn test_region_code_regex_invalid() {
        assert!(!REGION_CODE_REGEX.is_match("")); // empty
        assert!(!REGION_CODE_REGEX.is_match("3")); // too short
        assert!(!REGION_CODE_REGEX.is_match("35.")); // trailing dot
        assert!(!REGION_CODE_REGEX.is_match("35.1")); // short segment
        assert!(!REGION_CODE_REGEX.is_match("35.14.18.200")); // village needs 4 digits
        assert!(!REGION_CODE_REGEX.is_match("35.1234")); // village segment without district
        assert!(!REGION_CODE_REGEX.is_match("35.14.18.2007.01")); // too deep
        assert!(!REGION_CODE_REGEX.is_match("kode")); // header row
    }
}
