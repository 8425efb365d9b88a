//! Property-based tests for the structure of loss chunks

use encoding_loss::{Diagnoser, LossChunk, chunked_diff, sub_string_wrap};
use proptest::prelude::*;

/// Text mixing ASCII with characters outside Latin-1
fn mixed_text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            3 => proptest::char::range('a', 'z'),
            1 => Just(' '),
            1 => Just('?'),
            1 => Just('é'),
            1 => Just('€'),
            1 => proptest::char::range('\u{3040}', '\u{309F}'),
        ],
        0..60,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Two equal-length strings over a tiny alphabet so matches are common
fn aligned_pair_strategy() -> impl Strategy<Value = (String, String)> {
    proptest::collection::vec((0u8..3, 0u8..3), 0..80).prop_map(|pairs| {
        let letter = |n: u8| char::from(b'a' + n);
        pairs
            .into_iter()
            .map(|(a, b)| (letter(a), letter(b)))
            .unzip()
    })
}

fn assert_well_formed(original: &str, chunks: &[LossChunk]) {
    let chars: Vec<char> = original.chars().collect();

    for chunk in chunks {
        assert!(chunk.length >= 1);
        assert_eq!(chunk.characters.chars().count(), chunk.length);
        let expected: String = chars[chunk.start_pos..chunk.end_pos()].iter().collect();
        assert_eq!(chunk.characters, expected);
    }

    // Ordered, non-overlapping, and never touching
    for pair in chunks.windows(2) {
        assert!(pair[0].end_pos() < pair[1].start_pos);
    }
}

proptest! {
    #[test]
    fn unicode_targets_never_lose(text in any::<String>()) {
        for target in ["UTF-8", "UTF-16LE", "UTF-16BE"] {
            let diagnoser = Diagnoser::new("UTF-8", target).unwrap();
            prop_assert!(diagnoser.diagnose(&text).unwrap().is_empty());
        }
    }

    #[test]
    fn ascii_chunks_cover_exactly_the_non_ascii(text in mixed_text_strategy()) {
        let diagnoser = Diagnoser::new("UTF-8", "ASCII").unwrap();
        let chunks = diagnoser.diagnose(&text).unwrap();

        assert_well_formed(&text, &chunks);

        let lost: String = chunks.iter().map(|c| c.characters.as_str()).collect();
        let non_ascii: String = text.chars().filter(|c| !c.is_ascii()).collect();
        prop_assert_eq!(lost, non_ascii);
    }

    #[test]
    fn latin1_chunks_are_well_formed(text in mixed_text_strategy()) {
        let diagnoser = Diagnoser::new("UTF-8", "ISO-8859-1").unwrap();
        let chunks = diagnoser.diagnose(&text).unwrap();

        assert_well_formed(&text, &chunks);
        prop_assert!(chunks.iter().all(|c| !c.characters.contains('é')));
    }

    #[test]
    fn chunks_mark_exactly_the_mismatches((original, double) in aligned_pair_strategy()) {
        let chunks = chunked_diff(&original, &double);
        assert_well_formed(&original, &chunks);

        let mut lost = vec![false; original.chars().count()];
        for chunk in &chunks {
            for flag in &mut lost[chunk.start_pos..chunk.end_pos()] {
                *flag = true;
            }
        }

        for (pos, (a, b)) in original.chars().zip(double.chars()).enumerate() {
            prop_assert_eq!(lost[pos], a != b);
        }
    }

    #[test]
    fn wrap_without_chunks_is_identity(text in any::<String>()) {
        prop_assert_eq!(sub_string_wrap(&text, &[], "<mark>", "</mark>"), text);
    }

    #[test]
    fn wrap_with_empty_markers_is_identity(text in mixed_text_strategy()) {
        let chunks = Diagnoser::new("UTF-8", "ASCII").unwrap().diagnose(&text).unwrap();
        prop_assert_eq!(sub_string_wrap(&text, &chunks, "", ""), text);
    }
}
