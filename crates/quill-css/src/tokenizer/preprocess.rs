/// [§ 3.3 Preprocessing the input stream](https://www.w3.org/TR/css-syntax-3/#input-preprocessing)
///
/// "Replace any U+000D CARRIAGE RETURN (CR) code points, U+000C FORM FEED (FF)
/// code points, or pairs of U+000D CARRIAGE RETURN (CR) followed by U+000A
/// LINE FEED (LF) in input by a single U+000A LINE FEED (LF) code point."
///
/// "Replace any U+0000 NULL or surrogate code points in input with U+FFFD
/// REPLACEMENT CHARACTER (�)."
///
/// A `str` cannot contain surrogates, so only NULL needs replacing.
#[must_use]
pub fn preprocess(input: &str) -> Vec<char> {
    let mut output = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                let _ = chars.next_if_eq(&'\n');
                output.push('\n');
            }
            '\x0C' => output.push('\n'),
            '\0' => output.push('\u{FFFD}'),
            c => output.push(c),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::preprocess;

    fn run(input: &str) -> String {
        preprocess(input).into_iter().collect()
    }

    #[test]
    fn test_newlines_are_normalized() {
        assert_eq!(run("a\r\nb\rc\x0Cd\ne"), "a\nb\nc\nd\ne");
    }

    #[test]
    fn test_crlf_becomes_one_newline() {
        assert_eq!(run("\r\n\r\n"), "\n\n");
        assert_eq!(run("\r\r\n"), "\n\n");
    }

    #[test]
    fn test_null_is_replaced() {
        assert_eq!(run("a\0b"), "a\u{FFFD}b");
    }
}
