//! Comment stripping.
//!
//! Block comments (`/* */`) are removed before any other parsing so the nom
//! parsers never see them. Quoted strings are copied through untouched.

/// Returns `source` with every block comment removed.
pub fn strip_comments(source: &str) -> String {
    let mut clean = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            clean.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
            clean.push(c);
            continue;
        }
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            while let Some(inner) = chars.next() {
                if inner == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    break;
                }
            }
            // Comments separate tokens.
            clean.push(' ');
            continue;
        }
        clean.push(c);
    }
    clean
}
