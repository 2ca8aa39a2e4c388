// Utils

pub mod text;

pub use text::{find_hashtag_tokens, is_word_char, BULLET};
