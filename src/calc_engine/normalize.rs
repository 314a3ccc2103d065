//! Expression-level rewrites that run before tokenization.

/// Canonicalizes visual glyphs and rewrites percent suffixes.
///
/// `×`/`÷`/`−` become `*`/`/`/`-`, and any `<number>%` (whitespace allowed
/// before the `%`) becomes `(<number>/100)`, so by the time the lexer runs a
/// percentage is just a parenthesized division. Total: never fails, and a
/// whitespace-only input comes back empty.
pub fn normalize(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '×' => {
                out.push('*');
                i += 1;
            }
            '÷' => {
                out.push('/');
                i += 1;
            }
            '−' => {
                out.push('-');
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                let mut seen_dot = false;
                while i < chars.len() {
                    match chars[i] {
                        '0'..='9' => i += 1,
                        '.' if !seen_dot => {
                            seen_dot = true;
                            i += 1;
                        }
                        _ => break,
                    }
                }
                let literal: String = chars[start..i].iter().collect();

                let mut j = i;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if j < chars.len() && chars[j] == '%' {
                    out.push('(');
                    out.push_str(&literal);
                    out.push_str("/100)");
                    i = j + 1;
                } else {
                    out.push_str(&literal);
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn replaces_visual_glyphs() {
        assert_eq!(normalize("6×7"), "6*7");
        assert_eq!(normalize("8÷2"), "8/2");
        assert_eq!(normalize("5−3"), "5-3");
    }

    #[test]
    fn rewrites_percent_suffix() {
        assert_eq!(normalize("5%"), "(5/100)");
        assert_eq!(normalize("12.5 %"), "(12.5/100)");
        assert_eq!(normalize("100+5%"), "100+(5/100)");
    }

    #[test]
    fn leaves_everything_else_alone() {
        assert_eq!(normalize("sin(30)+2^10"), "sin(30)+2^10");
        assert_eq!(normalize("(1+2)*3"), "(1+2)*3");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
    }

    #[test]
    fn percent_without_a_number_is_untouched() {
        assert_eq!(normalize("%5"), "%5");
        assert_eq!(normalize("(2+3)%"), "(2+3)%");
    }
}
