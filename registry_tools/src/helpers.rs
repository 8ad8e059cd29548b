/// Strip everything but ASCII digits from a user-supplied document or postal code.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}
