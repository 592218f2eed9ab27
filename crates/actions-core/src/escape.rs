// Escaping rules for the `::command::` wire format.
// The runner decodes these substitutions on the other side, so both the
// character set and the substitution order are load-bearing.

/// Escape a command message ("data" position) for the command stream.
///
/// Substitutions, in order: `%` → `%25`, `\r` → `%0D`, `\n` → `%0A`.
/// Percent goes first so the percent signs introduced by the later
/// substitutions are never re-escaped.
///
/// This is a single pass over the original input: escaping is total but
/// NOT idempotent (`%25` escapes to `%2525`).
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value.
///
/// Applies all of [`escape_data`]'s substitutions, then additionally
/// `:` → `%3A` and `,` → `%2C` so a value can never be mistaken for the
/// `key=value` separator or the `,` pair delimiter.
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_data_substitutions() {
        assert_eq!(escape_data("100% a\nb\r"), "100%25 a%0Ab%0D");
    }

    #[test]
    fn escape_data_leaves_plain_text() {
        assert_eq!(escape_data("hello world"), "hello world");
        assert_eq!(escape_data(""), "");
    }

    #[test]
    fn escape_data_percent_is_escaped_first() {
        // A literal "%0A" in the input must come out as "%250A", not survive
        // as an encoded newline.
        assert_eq!(escape_data("%0A"), "%250A");
    }

    #[test]
    fn escape_data_is_not_idempotent() {
        let once = escape_data("%");
        assert_eq!(once, "%25");
        assert_eq!(escape_data(&once), "%2525");
    }

    #[test]
    fn escape_property_substitutions() {
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }

    #[test]
    fn escape_property_includes_data_substitutions() {
        assert_eq!(escape_property("50%\r\n:,"), "50%25%0D%0A%3A%2C");
    }

    #[test]
    fn escape_property_is_not_idempotent() {
        let once = escape_property(":");
        assert_eq!(once, "%3A");
        assert_eq!(escape_property(&once), "%253A");
    }
}
