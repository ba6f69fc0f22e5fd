//! Embedded PHP runtime library.
//!
//! Generated programs `require_once` this file. It defines the safe
//! arithmetic helpers the printer emits in place of raw `/`, `%`, and float
//! equality, plus the literal stand-ins for IEEE specials and the `tuple`
//! constructor. All helpers are total: no division traps, no exceptions.

use std::fs;
use std::io;
use std::path::Path;

/// File name the generated programs expect next to themselves.
pub const RUNTIME_LIB_FILE: &str = "lib.php";

/// The helper library source.
///
/// `intdiv(PHP_INT_MIN, -1)` raises, so both int helpers guard that pair
/// along with zero divisors. The float helpers build on `fdiv`/`fmod`,
/// which are total by definition. Float equality is tolerance-based so
/// that implementations differing in the last ulp still agree.
pub const RUNTIME_LIB: &str = r#"<?php

function _safe_int_div($x, $y) {
  $x = (int)$x;
  $y = (int)$y;
  if ($y === 0 || ($x === PHP_INT_MIN && $y === -1)) {
    return 0;
  }
  return intdiv($x, $y);
}

function _safe_int_mod($x, $y) {
  $x = (int)$x;
  $y = (int)$y;
  if ($y === 0 || ($x === PHP_INT_MIN && $y === -1)) {
    return 0;
  }
  return $x % $y;
}

function _safe_float_div($x, $y) {
  return fdiv((float)$x, (float)$y);
}

function _safe_float_mod($x, $y) {
  return fmod((float)$x, (float)$y);
}

function float_eq2($x, $y) {
  $x = (float)$x;
  $y = (float)$y;
  if (is_nan($x) || is_nan($y)) {
    return is_nan($x) && is_nan($y);
  }
  if (is_infinite($x) || is_infinite($y)) {
    return $x === $y;
  }
  return abs($x - $y) < 1.0e-9;
}

function float_eq3($x, $y) {
  if (!is_float($x) || !is_float($y)) {
    return false;
  }
  return float_eq2($x, $y);
}

function float_neq2($x, $y) {
  return !float_eq2($x, $y);
}

function float_neq3($x, $y) {
  return !float_eq3($x, $y);
}

function make_nan() {
  return NAN;
}

function make_positive_inf() {
  return INF;
}

function make_negative_inf() {
  return -INF;
}

function tuple(...$args) {
  return $args;
}
"#;

/// Write the runtime library into a run directory.
pub fn write_runtime_lib(dir: &Path) -> io::Result<()> {
    fs::write(dir.join(RUNTIME_LIB_FILE), RUNTIME_LIB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_defines_every_expected_helper() {
        for helper in [
            "_safe_int_div",
            "_safe_int_mod",
            "_safe_float_div",
            "_safe_float_mod",
            "float_eq2",
            "float_eq3",
            "float_neq2",
            "float_neq3",
            "make_nan",
            "make_positive_inf",
            "make_negative_inf",
            "tuple",
        ] {
            assert!(
                RUNTIME_LIB.contains(&format!("function {helper}(")),
                "missing helper {helper}"
            );
        }
    }

    #[test]
    fn library_is_a_php_file() {
        assert!(RUNTIME_LIB.starts_with("<?php\n"));
        assert!(RUNTIME_LIB.ends_with("\n"));
    }
}
