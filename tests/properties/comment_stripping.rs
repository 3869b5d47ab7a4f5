//! Property tests for comment stripping.

use proptest::prelude::*;

use appbuild::domain::services::strip_comments;

fn line_count(text: &str) -> usize {
    text.matches('\n').count()
}

/// Comment-free statements mixing division with regex literals whose
/// escaped slashes look like `//` to a naive scanner.
const CODE_SNIPPETS: &[&str] = &[
    "function isUrl(u) { return /^https?:\\/\\//.test(u); }",
    "const re = /a\\/b/g;",
    "check(/x\\/\\/y/);",
    "const half = total / 2;",
    "const r = a / b / c;",
    "let n = (width / 2) / scale;",
    "x = y / 2 + /z\\/\\//.source.length;",
    "switch (p) { case /a\\/\\/b/.source: break; }",
    "if (typeof x === 'string') { y = x; }",
    "const s = \"http://example.com/*x*/\";",
    "const t = `a // b`;",
    "throw new Error('a/b');",
    "const m = await /q\\/\\//.exec(s);",
    "const list = [/\\/\\//, /[/]/];",
    "const ratio = returns / input;",
];

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: stripping never panics on arbitrary input.
    #[test]
    fn property_strip_never_panics(
        s in "(?s).{0,512}"
    ) {
        let _ = strip_comments(&s);
    }

    /// PROPERTY: the number of lines is preserved, so diagnostics keep their line numbers.
    #[test]
    fn property_strip_preserves_line_count(
        s in "[a-z/*'\"`\\\\ \n=(;]{0,256}"
    ) {
        prop_assert_eq!(line_count(&strip_comments(&s)), line_count(&s));
    }

    /// PROPERTY: text without any slash is returned unchanged.
    #[test]
    fn property_slash_free_text_is_untouched(
        s in "[^/]{0,256}"
    ) {
        prop_assert_eq!(strip_comments(&s), s);
    }

    /// PROPERTY: code without comments passes through unchanged.
    #[test]
    fn property_comment_free_code_is_untouched(
        picks in prop::collection::vec(0..CODE_SNIPPETS.len(), 1..12),
        separators in prop::collection::vec(prop::sample::select(vec![" ", "\n", "\n\n  "]), 12),
    ) {
        let mut source = String::new();
        for (i, pick) in picks.iter().enumerate() {
            source.push_str(CODE_SNIPPETS[*pick]);
            source.push_str(separators[i]);
        }
        prop_assert_eq!(strip_comments(&source), source);
    }

    /// PROPERTY: a trailing line comment never survives.
    #[test]
    fn property_line_comment_is_removed(
        code in "[a-z]{1,8}\\(\\);",
        comment in "[a-zA-Z0-9 ]{0,32}",
    ) {
        let source = format!("{code} //{comment}\nnext();\n");
        prop_assert_eq!(strip_comments(&source), format!("{code}\nnext();\n"));
    }
}
