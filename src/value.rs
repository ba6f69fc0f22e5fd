//! Seeded primitive value pools.
//!
//! Literal values mix uniform draws with curated edge cases (integer
//! boundaries, IEEE specials, strings with NUL/multibyte/control bytes) so
//! that generated programs keep hitting the values implementations disagree
//! on. Purely random values alone almost never land on `i64::MIN` or an
//! embedded NUL.

use rand::{Rng, RngCore};

/// Integer edge cases that every program batch should exercise.
const INT_EDGE_CASES: &[i64] = &[
    0,
    -1,
    0xff,
    -0xff,
    0xffff,
    -0xffff,
    i64::MAX,
    i64::MIN,
    1 << 31,
    -(1 << 31),
];

/// Curated float pool; specials (NaN, infinities) are drawn separately.
const FLOAT_POOL: &[f64] = &[
    0.0,
    -1.0,
    1.0,
    0.5,
    -0.5,
    1.5,
    2.25,
    1e10,
    -1e10,
    0.001,
    4503599627370496.0, // 2^52, the float/int precision boundary
    -4503599627370496.0,
    f64::MAX,
    f64::MIN_POSITIVE,
    f64::EPSILON,
];

/// Curated string pool: empty, embedded NUL, multibyte, newlines, quoting
/// hazards, raw control bytes.
const STRING_POOL: &[&str] = &[
    "",
    "\0",
    "a\0b",
    "x",
    "hello",
    "php",
    "0",
    "-1",
    "3.14",
    " ",
    "line1\nline2",
    "\r\n",
    "tab\there",
    "quote\"inside",
    "back\\slash",
    "\u{7}bell",
    "\u{1}\u{2}\u{3}",
    "こんにちは",
    "héllo wörld",
    "αβγ",
];

const RANDOM_STRING_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_";

/// Uniform boolean.
pub fn bool_value(rng: &mut dyn RngCore) -> bool {
    rng.gen_bool(0.5)
}

/// Mixed integer distribution: 2/8 small positive, 2/8 small negative,
/// 1/8 full 63-bit positive, 3/8 curated edge cases.
pub fn int_value(rng: &mut dyn RngCore) -> i64 {
    match rng.gen_range(0..8) {
        0 | 1 => rng.gen_range(0..=0xffff),
        2 | 3 => -rng.gen_range(0..=0xffff),
        4 => (rng.next_u64() >> 1) as i64,
        _ => INT_EDGE_CASES[rng.gen_range(0..INT_EDGE_CASES.len())],
    }
}

/// Float distribution: 3/16 IEEE specials, 3/16 small random dyadic
/// fractions (so enum generation always finds enough distinct values),
/// otherwise the curated pool.
pub fn float_value(rng: &mut dyn RngCore) -> f64 {
    match rng.gen_range(0..16) {
        0 => f64::NAN,
        1 => f64::INFINITY,
        2 => f64::NEG_INFINITY,
        3..=5 => rng.gen_range(-1000..=1000) as f64 / 8.0,
        _ => FLOAT_POOL[rng.gen_range(0..FLOAT_POOL.len())],
    }
}

/// String distribution: 1/4 short random identifiers, otherwise the
/// curated pool.
pub fn string_value(rng: &mut dyn RngCore) -> String {
    if rng.gen_range(0..4) == 0 {
        let len = rng.gen_range(1..=8);
        (0..len)
            .map(|_| RANDOM_STRING_ALPHABET[rng.gen_range(0..RANDOM_STRING_ALPHABET.len())] as char)
            .collect()
    } else {
        STRING_POOL[rng.gen_range(0..STRING_POOL.len())].to_string()
    }
}
