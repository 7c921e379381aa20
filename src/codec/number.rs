/// Parses a locale-formatted count by discarding every non-digit character
///
/// `"1,234"` and `"1.234"` both become `1234`. Returns `None` when nothing
/// numeric remains or the value overflows.
pub fn parse_int(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
