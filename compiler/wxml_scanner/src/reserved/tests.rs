use super::*;
use pretty_assertions::assert_eq;

#[test]
fn every_reserved_word_resolves() {
    for word in ReservedWord::ALL {
        assert_eq!(lookup(word.as_str()), Some(word));
        assert!(is_reserved(word.as_str()));
    }
}

#[test]
fn max_len_matches_longest_word() {
    let longest = ReservedWord::ALL
        .iter()
        .map(|w| w.as_str().len())
        .max()
        .unwrap_or(0);
    assert_eq!(longest, MAX_RESERVED_LEN);
}

#[test]
fn lookup_is_case_sensitive() {
    for text in ["Wxs", "WXS", "Template", "SLOT", "Block"] {
        assert_eq!(lookup(text), None, "{text} should not be reserved");
    }
}

#[test]
fn lookup_requires_exact_length() {
    for text in ["wxss", "wx", "templates", "slots", "blocky", "imports", "includes"] {
        assert_eq!(lookup(text), None, "{text} should not be reserved");
    }
}

#[test]
fn ordinary_tag_names_are_not_reserved() {
    for text in ["view", "text", "button", "scroll-view", "my:comp", ""] {
        assert!(!is_reserved(text), "{text:?} should not be reserved");
    }
}
