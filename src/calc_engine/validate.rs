//! Cheap plausibility check run on every keystroke.
//!
//! Intentionally looser than the parser: its only job is to let the UI skip
//! evaluation while the user is obviously mid-edit. It must never reject an
//! expression the evaluator would accept.

/// Parenthesis depth must stay non-negative and end at zero, and the last
/// non-whitespace character must not be a binary operator.
pub fn is_syntactically_plausible(expression: &str) -> bool {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return false;
    }

    let mut depth: i32 = 0;
    for c in trimmed.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return false;
    }

    // trimmed is non-empty, so there is a last character
    let last = trimmed.chars().next_back().unwrap_or(' ');
    !matches!(last, '+' | '-' | '×' | '*' | '÷' | '/' | '^' | '%')
}

#[cfg(test)]
mod tests {
    use super::is_syntactically_plausible;

    #[test]
    fn balanced_input_passes() {
        assert!(is_syntactically_plausible("1+2"));
        assert!(is_syntactically_plausible("sin(30)"));
        assert!(is_syntactically_plausible("((1+2)*3)"));
    }

    #[test]
    fn unbalanced_counts_fail() {
        assert!(!is_syntactically_plausible("(1+2"));
        assert!(!is_syntactically_plausible("1+2)"));
        assert!(!is_syntactically_plausible("((1)"));
    }

    #[test]
    fn negative_depth_fails_even_if_counts_match() {
        assert!(!is_syntactically_plausible(")1+2("));
    }

    #[test]
    fn trailing_operator_fails() {
        for s in ["1+", "2-", "3*", "4/", "5^", "6×", "7÷", "8%"] {
            assert!(!is_syntactically_plausible(s), "{s} should be implausible");
        }
        assert!(!is_syntactically_plausible("1+2 * "));
    }

    #[test]
    fn empty_input_fails() {
        assert!(!is_syntactically_plausible(""));
        assert!(!is_syntactically_plausible("   "));
    }
}
