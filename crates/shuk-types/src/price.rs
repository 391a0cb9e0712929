//! Prices are decimals with two fraction digits on the wire and whole
//! cents in storage. Bound conversions round towards the inside of the
//! range so that integer-cent comparisons agree with decimal ones.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub const SCALE: u32 = 2;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn normalize(price: Decimal) -> Decimal {
    price.round_dp(SCALE)
}

pub fn to_cents(price: Decimal) -> Option<i64> {
    normalize(price).checked_mul(HUNDRED)?.to_i64()
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, SCALE)
}

/// Smallest cent value `c` with `c / 100 >= min`.
pub fn min_bound_cents(min: Decimal) -> i64 {
    saturate(min.checked_mul(HUNDRED).map(|d| d.ceil()), min)
}

/// Largest cent value `c` with `c / 100 <= max`.
pub fn max_bound_cents(max: Decimal) -> i64 {
    saturate(max.checked_mul(HUNDRED).map(|d| d.floor()), max)
}

fn saturate(scaled: Option<Decimal>, original: Decimal) -> i64 {
    match scaled.and_then(|d| d.to_i64()) {
        Some(cents) => cents,
        None if original.is_sign_negative() => i64::MIN,
        None => i64::MAX,
    }
}
