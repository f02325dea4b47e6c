//! Fuzzy matching of a detected place name against known districts.

/// Match a reverse-geocoded place name against the loaded district names.
///
/// Case-insensitive substring containment in either direction (the detected
/// name may embed a district, or a district may embed the detected name);
/// first match in iteration order wins. This is an approximate, convenience
/// match — false positives are accepted.
pub fn match_district<'a>(detected: &str, known: &'a [String]) -> Option<&'a str> {
    let needle = detected.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    known
        .iter()
        .find(|candidate| {
            let hay = candidate.trim().to_lowercase();
            !hay.is_empty() && (hay.contains(&needle) || needle.contains(&hay))
        })
        .map(|s| s.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detected_name_contained_in_known_district() {
        let known = names(&["New Delhi", "Mumbai"]);
        assert_eq!(match_district("Delhi", &known), Some("New Delhi"));
    }

    #[test]
    fn known_district_contained_in_detected_name() {
        let known = names(&["Delhi", "Mumbai"]);
        assert_eq!(match_district("New Delhi District", &known), Some("Delhi"));
    }

    #[test]
    fn match_is_case_insensitive_and_first_wins() {
        let known = names(&["Kollam", "Kolkata"]);
        assert_eq!(match_district("KOL", &known), Some("Kollam"));
    }

    #[test]
    fn no_substring_relation_means_no_match() {
        let known = names(&["Delhi East", "Mumbai"]);
        // "East Delhi" vs "Delhi East": neither contains the other.
        assert_eq!(match_district("East Delhi", &known), None);
    }

    #[test]
    fn empty_inputs_never_match() {
        assert_eq!(match_district("", &names(&["Delhi"])), None);
        assert_eq!(match_district("  ", &names(&["Delhi"])), None);
        assert_eq!(match_district("Delhi", &names(&[""])), None);
    }
}
