//! CPF document validation.
//!
//! A CPF is an 11 digit Brazilian personal tax id whose last two digits are check digits computed with a
//! weighted modulo-11 scheme. Validation is entirely local; CNPJ (company) documents require a registry lookup and
//! are handled by the `registry_tools` crate instead.

/// Strip everything but ASCII digits from a user-supplied document.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a CPF check string. Accepts formatted input ("111.444.777-35") or bare digits.
///
/// A CPF is rejected when it does not have 11 digits, when all digits are identical (these pass the checksum but
/// are reserved), or when either check digit does not match.
pub fn is_valid_cpf(cpf: &str) -> bool {
    let cpf = digits_only(cpf);
    if cpf.len() != 11 {
        return false;
    }
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }
    let check = |count: u32| -> u32 {
        let sum: u32 = digits.iter().take(count as usize).zip((2..=count).rev()).map(|(d, w)| d * w).sum();
        let rest = sum % 11;
        if rest < 2 {
            0
        } else {
            11 - rest
        }
    };
    digits[9] == check(10) && digits[10] == check(11)
}
