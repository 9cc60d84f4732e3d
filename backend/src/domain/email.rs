//! Email address format check shared by user and order validation.

use std::sync::OnceLock;

use regex::Regex;

fn email_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
            .ok()
    })
    .as_ref()
}

/// Whether `candidate` looks like a deliverable `local@domain.tld` address.
pub fn is_well_formed(candidate: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ana@example.com", true)]
    #[case("first.last+tag@mail.example.co", true)]
    #[case("no-at-sign.example.com", false)]
    #[case("trailing@", false)]
    #[case("spaces in@example.com", false)]
    #[case("single@label", false)]
    fn recognises_addresses(#[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(is_well_formed(candidate), expected);
    }
}
