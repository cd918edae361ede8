//! Escaping of values placed into generated CMake.
//!
//! Templates wrap user values in `"..."`, and per-configuration values also
//! sit inside `$<IF:...>` generator expressions. `${VAR}` references are left
//! alone so values can still refer to other variables.

use std::borrow::Cow;

/// Escape `value` for a quoted CMake argument: `\` and `"` get a backslash.
pub fn quoted_argument(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Escape `value` for a quoted argument inside a generator expression.
/// Characters that end or split the expression are written as
/// `$<ANGLE-R>`, `$<COMMA>` and `$<SEMICOLON>`.
pub fn generator_expression_argument(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    for c in quoted_argument(value).chars() {
        match c {
            '>' => out.push_str("$<ANGLE-R>"),
            ',' => out.push_str("$<COMMA>"),
            ';' => out.push_str("$<SEMICOLON>"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_are_borrowed() {
        assert!(matches!(quoted_argument("Release"), Cow::Borrowed("Release")));
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(quoted_argument(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(quoted_argument(r"C:\sdk"), r"C:\\sdk");
        assert_eq!(quoted_argument("${CMAKE_BINARY_DIR}/x"), "${CMAKE_BINARY_DIR}/x");
    }

    #[test]
    fn generator_expression_separators_are_escaped() {
        assert_eq!(
            generator_expression_argument("x>y,z;w"),
            "x$<ANGLE-R>y$<COMMA>z$<SEMICOLON>w"
        );
        assert_eq!(generator_expression_argument(r#"a"b"#), r#"a\"b"#);
    }
}
