// Text utils

use std::ops::Range;

/// Bullet separator that commonly precedes a hashtag block.
pub const BULLET: char = '\u{2022}';

/// Letters, digits, and underscore (Unicode aware).
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte ranges of every hashtag token in `text`, left to right.
///
/// A hashtag token is a `#` followed by one or more word characters, where the
/// `#` is not itself preceded by a word character. Tokens are maximal and do
/// not overlap.
pub fn find_hashtag_tokens(text: &str) -> Vec<Range<usize>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut prev: Option<char> = None;

    while let Some((start, c)) = chars.next() {
        let attached = prev.is_some_and(is_word_char);
        prev = Some(c);
        if c != '#' || attached {
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            if !is_word_char(next) {
                break;
            }
            end = idx + next.len_utf8();
            prev = Some(next);
            chars.next();
        }
        if end > start + c.len_utf8() {
            tokens.push(start..end);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        find_hashtag_tokens(text)
            .into_iter()
            .map(|range| &text[range])
            .collect()
    }

    #[test]
    fn test_simple_tags() {
        assert_eq!(tokens("Hi #one #two_2 and #Three"), vec!["#one", "#two_2", "#Three"]);
    }

    #[test]
    fn test_tag_at_start() {
        assert_eq!(tokens("#first thing"), vec!["#first"]);
    }

    #[test]
    fn test_hash_inside_word_is_not_a_tag() {
        assert_eq!(tokens("issue#12 and C#"), Vec::<&str>::new());
    }

    #[test]
    fn test_adjacent_tags() {
        // the second `#` follows a word character, so it is part of nothing
        assert_eq!(tokens("#one#two"), vec!["#one"]);
        // the second `#` follows `#`, a non-word character
        assert_eq!(tokens("##two"), vec!["#two"]);
    }

    #[test]
    fn test_bare_hash_and_punctuation() {
        assert_eq!(tokens("# nope #! #ok."), vec!["#ok"]);
    }

    #[test]
    fn test_unicode_word_chars() {
        let text = "café #crème #日本 ok";
        assert_eq!(tokens(text), vec!["#crème", "#日本"]);
    }
}
