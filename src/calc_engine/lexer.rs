//! Token stream production.

use super::functions;
use super::Failure;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Op(char),
    Function(&'static str),
    Constant(&'static str),
    LParen,
    RParen,
}

/// Scans left to right. Digit runs with at most one `.` become numbers,
/// function and constant names are matched greedily (longest first,
/// case-insensitive), single-character operators and parentheses become
/// their own tokens, and anything else is an error.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, Failure> {
    let chars: Vec<char> = expression.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '+' | '-' | '*' | '/' | '^' | '%' => {
                tokens.push(Token::Op(c));
                i += 1;
            }
            'π' => {
                tokens.push(Token::Constant("pi"));
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
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| Failure::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            _ if c.is_ascii_alphabetic() => {
                let (token, len) =
                    match_name(&chars[i..]).ok_or(Failure::UnrecognizedCharacter(c))?;
                tokens.push(token);
                i += len;
            }
            _ => return Err(Failure::UnrecognizedCharacter(c)),
        }
    }

    Ok(tokens)
}

/// Longest-prefix match against the function table, then the constants.
/// `asin` is listed before `sin`, so the prefix can never be mis-taken;
/// a bare `e` always denotes Euler's number (there are no identifiers in
/// this grammar it could belong to).
fn match_name(rest: &[char]) -> Option<(Token, usize)> {
    for def in functions::FUNCTIONS {
        if matches_ignore_case(rest, def.name) {
            return Some((Token::Function(def.name), def.name.len()));
        }
    }
    for (name, _) in functions::CONSTANTS {
        if matches_ignore_case(rest, name) {
            return Some((Token::Constant(name), name.len()));
        }
    }
    None
}

fn matches_ignore_case(rest: &[char], name: &str) -> bool {
    name.len() <= rest.len()
        && name
            .chars()
            .zip(rest.iter())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}
