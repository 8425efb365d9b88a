//! Markup around lossy substrings

use std::collections::HashMap;

use crate::LossChunk;

/// Wrap every occurrence of each lost substring in `pre` and `post`
///
/// Replacement is keyed by chunk content, not position: if the same lossy
/// substring appears several times in `text`, every occurrence is wrapped.
/// All substitutions happen in one left-to-right pass where the longest
/// matching substring wins and inserted markup is never rescanned.
///
/// ```rust
/// use encoding_loss::{LossChunk, sub_string_wrap};
///
/// let chunks = vec![LossChunk { start_pos: 3, characters: "é".into(), length: 1 }];
/// let marked = sub_string_wrap("café latte", &chunks, "<mark>", "</mark>");
/// assert_eq!(marked, "caf<mark>é</mark> latte");
/// ```
pub fn sub_string_wrap(text: &str, chunks: &[LossChunk], pre: &str, post: &str) -> String {
    let mut replacements: HashMap<&str, String> = HashMap::new();
    for chunk in chunks {
        if !chunk.characters.is_empty() {
            replacements
                .entry(chunk.characters.as_str())
                .or_insert_with(|| format!("{pre}{}{post}", chunk.characters));
        }
    }

    if replacements.is_empty() {
        return text.to_string();
    }

    // Candidates per leading character, longest first so overlapping keys
    // resolve to the longer match
    let mut by_first_char: HashMap<char, Vec<&str>> = HashMap::new();
    for key in replacements.keys().copied() {
        if let Some(first) = key.chars().next() {
            by_first_char.entry(first).or_default().push(key);
        }
    }
    for candidates in by_first_char.values_mut() {
        candidates.sort_by(|a, b| b.len().cmp(&a.len()));
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        let matched = by_first_char
            .get(&ch)
            .and_then(|candidates| candidates.iter().find(|key| rest.starts_with(**key)));
        match matched {
            Some(key) => {
                output.push_str(&replacements[key]);
                rest = &rest[key.len()..];
            }
            None => {
                output.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(start_pos: usize, characters: &str) -> LossChunk {
        LossChunk {
            start_pos,
            characters: characters.to_string(),
            length: characters.chars().count(),
        }
    }

    #[test]
    fn test_wrap_single_chunk() {
        let marked = sub_string_wrap("café latte", &[chunk(3, "é")], "<mark>", "</mark>");
        assert_eq!(marked, "caf<mark>é</mark> latte");
    }

    #[test]
    fn test_empty_result_leaves_text_unchanged() {
        assert_eq!(sub_string_wrap("café latte", &[], "[", "]"), "café latte");
    }

    #[test]
    fn test_every_occurrence_is_wrapped() {
        // Only the first é was diagnosed, both get marked
        let marked = sub_string_wrap("café, thé", &[chunk(3, "é")], "[", "]");
        assert_eq!(marked, "caf[é], th[é]");
    }

    #[test]
    fn test_duplicate_chunks_wrap_once() {
        let chunks = [chunk(0, "ñ"), chunk(4, "ñ")];
        assert_eq!(sub_string_wrap("ñandú ñ", &chunks, "<", ">"), "<ñ>andú <ñ>");
    }

    #[test]
    fn test_longest_match_wins() {
        let chunks = [chunk(0, "日"), chunk(3, "日本")];
        assert_eq!(sub_string_wrap("日本 日", &chunks, "{", "}"), "{日本} {日}");
    }

    #[test]
    fn test_markup_is_not_rescanned() {
        // The inserted marker contains a lossy character itself
        let marked = sub_string_wrap("é", &[chunk(0, "é")], "é(", ")");
        assert_eq!(marked, "é(é)");
    }

    #[test]
    fn test_many_distinct_chunks() {
        // Every CJK character is its own chunk once diagnosed to ASCII
        let lost: Vec<char> = (0x4E00u32..0x4E00 + 3000)
            .filter_map(char::from_u32)
            .collect();
        let text: String = lost.iter().map(|ch| format!("{ch} ")).collect();
        let chunks: Vec<LossChunk> = lost
            .iter()
            .enumerate()
            .map(|(i, ch)| chunk(i * 2, &ch.to_string()))
            .collect();

        let marked = sub_string_wrap(&text, &chunks, "<", ">");

        let expected: String = lost.iter().map(|ch| format!("<{ch}> ")).collect();
        assert_eq!(marked, expected);
    }

    #[test]
    fn test_keys_sharing_a_first_character() {
        let chunks = [chunk(0, "é"), chunk(2, "éà"), chunk(5, "éàü")];
        assert_eq!(
            sub_string_wrap("éàü éà é", &chunks, "[", "]"),
            "[éàü] [éà] [é]"
        );
    }

    #[test]
    fn test_empty_characters_are_skipped() {
        let empty = LossChunk {
            start_pos: 0,
            characters: String::new(),
            length: 0,
        };
        assert_eq!(sub_string_wrap("abc", &[empty], "<", ">"), "abc");
    }
}
