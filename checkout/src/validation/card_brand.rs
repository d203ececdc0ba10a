//! Offline card-network detection from leading digits.

use regex::Regex;
use std::sync::LazyLock;

// Order matters where prefixes overlap: maestro's catch-all `6` comes last.
static BRANDS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("visa", r"^4"),
        (
            "master-card",
            r"^(5[1-5]|222[1-9]|22[3-9][0-9]|2[3-6][0-9]{2}|27[01][0-9]|2720)",
        ),
        ("american-express", r"^3[47]"),
        ("diners-club", r"^(30[0-5]|36|3[89])"),
        ("discover", r"^(6011|64[4-9]|65)"),
        ("jcb", r"^(2131|1800|35(2[89]|[3-8][0-9]))"),
        ("unionpay", r"^(62|81)"),
        (
            "maestro",
            r"^(493698|50[0-5][0-9]{3}|506[0-5][0-9]{2}|5066[0-8][0-9]|50669[0-8]|506779|5067[89][0-9]|506[89][0-9]{2}|50[78][0-9]{3}|5[6-9]|63|67|6)",
        ),
    ]
    .into_iter()
    .map(|(brand, pattern)| {
        let regex = Regex::new(pattern).expect("card prefix pattern is valid");
        (brand, regex)
    })
    .collect()
});

/// Brand of a digits-only card number, in the hyphenated form used by allowed-card rules.
pub fn detect_brand(digits: &str) -> Option<&'static str> {
    BRANDS
        .iter()
        .find(|(_, prefix)| prefix.is_match(digits))
        .map(|(brand, _)| *brand)
}
