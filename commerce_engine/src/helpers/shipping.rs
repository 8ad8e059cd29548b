use cs_common::Money;

/// Flat shipping fee for a destination state (UF). States outside the discounted south-east table pay the
/// default long-haul rate. Unknown or malformed state codes also fall through to the default.
pub fn shipping_fee(estado: &str) -> Money {
    match estado.trim().to_ascii_uppercase().as_str() {
        "SP" => Money::from_cents(1500),
        "RJ" => Money::from_cents(1800),
        "MG" => Money::from_cents(2000),
        _ => Money::from_cents(3000),
    }
}
