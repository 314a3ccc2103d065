use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wraps `text` to `width` columns, splitting overlong words by
/// display width so history lines never overflow the pane.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }
            let mut remaining = word;
            while !remaining.is_empty() {
                let mut chunk_width = 0;
                let mut chunk_byte_len = 0;
                for c in remaining.chars() {
                    let char_width = UnicodeWidthChar::width(c).unwrap_or(1);
                    if chunk_width + char_width > width {
                        break;
                    }
                    chunk_width += char_width;
                    chunk_byte_len += c.len_utf8();
                }
                lines.push(remaining[..chunk_byte_len].to_string());
                remaining = &remaining[chunk_byte_len..];
            }
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }
        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::wrap_text;

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("1 + 2", 20), vec!["1 + 2"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(wrap_text("10 + 20 + 30", 7), vec!["10 + 20", "+ 30"]);
    }

    #[test]
    fn splits_words_longer_than_the_width() {
        assert_eq!(
            wrap_text("123456789", 4),
            vec!["1234", "5678", "9"]
        );
    }

    #[test]
    fn zero_width_does_not_loop_forever() {
        assert_eq!(wrap_text("anything", 0), vec![""]);
    }
}
