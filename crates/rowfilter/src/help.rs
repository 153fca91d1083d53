//! Plain-text help for the filter language.

use crate::filter::{
    NAME_QUOTE_PATTERN, NAME_WORD_PATTERN, NOT_PATTERN, QUOTE_PATTERN, REGEX_PATTERN,
    WORD_PATTERN,
};

/// Example queries with a one-line explanation each.
pub const EXAMPLES: &str = "\
Examples:

foo           - Any column contains \"foo\"
foo bar       - Any column contains \"foo\" followed by \"bar\"
/^foo/        - Any column starts with \"foo\"
:a bar        - Column \"a\" contains \"bar\"
:a \"bar\"      - Column \"a\" is \"bar\"
:2 bar        - Column with index 2 contains \"bar\"
foo NOT bar   - Contains \"foo\" and does not contain \"bar\"
NOT :a /^x/   - Column \"a\" does not start with \"x\"
";

/// Returns the grammar summary, listing the token patterns the parser
/// actually uses.
pub fn syntax() -> String {
    let rules: [(&str, &str); 12] = [
        ("<filter>", "<match> +"),
        ("<match>", "<all> | <column>"),
        ("<all>", "<not>? <pattern>"),
        ("<column>", "<not>? <name> <pattern> | <name> <not>? <pattern>"),
        ("<pattern>", "<quote> | <rx> | <word>"),
        ("<name>", "<name-quote> | <name-word>"),
        ("<name-quote>", NAME_QUOTE_PATTERN),
        ("<name-word>", NAME_WORD_PATTERN),
        ("<word>", WORD_PATTERN),
        ("<rx>", REGEX_PATTERN),
        ("<quote>", QUOTE_PATTERN),
        ("<not>", NOT_PATTERN),
    ];

    let mut out = String::from("Syntax:\n\n");
    for (name, rule) in rules {
        out.push_str(&format!("{:<14}= {}\n", name, rule));
    }
    out
}

/// Returns the examples followed by the grammar summary.
pub fn full() -> String {
    format!("{}\n{}", EXAMPLES, syntax())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_embeds_token_patterns() {
        let text = syntax();
        assert!(text.starts_with("Syntax:"));
        assert!(text.contains(&format!("<word>        = {}", WORD_PATTERN)));
        assert!(text.contains(QUOTE_PATTERN));
        assert!(text.contains(REGEX_PATTERN));
        assert!(text.contains(NAME_WORD_PATTERN));
    }

    #[test]
    fn test_full_contains_both_sections() {
        let text = full();
        assert!(text.contains("Examples:"));
        assert!(text.contains("Syntax:"));
    }
}
