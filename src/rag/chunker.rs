//! Boundary-aware text splitter.
//!
//! Splits arbitrary-length documents into overlapping chunks suitable for
//! independent embedding and retrieval. Windows prefer to end at a natural
//! separator (space, period, newline) instead of mid-word, as long as the
//! separator is not too close to the window start.

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Split `text` into overlapping chunks of at most `chunk_size` characters.
///
/// Offsets are in characters, not bytes, so multibyte text never splits
/// inside a code point. Empty and whitespace-only candidates are dropped;
/// the relative order of the remaining chunks matches their order in `text`.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < total {
        // The tentative end stays unclamped: the advance below must step from
        // `start + chunk_size` even when the window runs past the text, or a
        // final window shorter than the overlap would be re-emitted as
        // shrinking suffix chunks. Only the slice is clamped.
        let mut end = start + chunk_size;

        // Only look for a natural cut when the window stops short of the end
        // of the text; the final window keeps whatever is left.
        if end < total {
            if let Some(cut) = rightmost_separator(&chars[start..end]) {
                // A cut too close to the window start would produce
                // pathologically tiny chunks; keep the hard cut instead.
                if cut > chunk_size / 2 {
                    end = start + cut + 1;
                }
            }
        }

        let candidate: String = chars[start..end.min(total)].iter().collect();
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        // The `start + 1` floor guarantees forward progress even when
        // `overlap >= end - start`.
        start = end.saturating_sub(overlap).max(start + 1);
    }

    chunks
}

/// Split with the default window and overlap.
pub fn split_default(text: &str) -> Vec<String> {
    split(text, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
}

/// Index of the rightmost natural separator in `window`, if any.
fn rightmost_separator(window: &[char]) -> Option<usize> {
    window.iter().rposition(|c| matches!(c, ' ' | '.' | '\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_yields_single_trimmed_chunk() {
        let chunks = split("  hello world  ", 1000, 200);
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn empty_and_whitespace_inputs_yield_nothing() {
        assert!(split("", 1000, 200).is_empty());
        assert!(split("   \n\n   ", 1000, 200).is_empty());
    }

    #[test]
    fn no_separators_fall_back_to_hard_cuts() {
        let text = "x".repeat(250);
        let chunks = split(&text, 100, 0);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 100);
        assert_eq!(chunks[1].len(), 100);
        assert_eq!(chunks[2].len(), 50);
    }

    #[test]
    fn every_chunk_respects_the_size_limit() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        for (chunk_size, overlap) in [(50, 10), (120, 30)] {
            let chunks = split(&text, chunk_size, overlap);
            assert!(!chunks.is_empty());
            for chunk in &chunks {
                assert!(chunk.chars().count() <= chunk_size);
                assert!(!chunk.trim().is_empty());
            }
        }
    }

    #[test]
    fn chunks_end_on_word_boundaries_when_separators_exist() {
        let words = ["lorem", "ipsum", "dolor", "sit", "amet"];
        let text = words.join(" ").repeat(5).replace("ametlorem", "amet lorem");
        let chunks = split(&text, 50, 10);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let last = chunk.split_whitespace().last().unwrap();
            let last = last.trim_end_matches('.');
            assert!(
                words.contains(&last),
                "chunk ended mid-word: {:?}",
                chunk
            );
        }
    }

    #[test]
    fn terminates_when_overlap_reaches_chunk_size() {
        let text = "a b c d e f g h i j k l m n o p q r s t u v w x y z";
        let total = text.chars().count();

        let chunks = split(text, 10, 10);
        assert!(!chunks.is_empty());
        // Forward progress is one character per window here, so the chunk
        // count is bounded by the text length.
        assert!(chunks.len() <= total);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 10);
        }

        // Even more extreme: overlap larger than the window.
        let chunks = split(text, 5, 50);
        assert!(!chunks.is_empty());
        assert!(chunks.len() <= total);
    }

    #[test]
    fn tail_shorter_than_overlap_is_not_reemitted() {
        // The last full window leaves a tail shorter than the overlap. The
        // advance must step from the tentative window end, not the clamped
        // one, or the tail comes back as shrinking suffix chunks
        // ("efghij", "ghij", "hij", ...).
        let chunks = split("abcdefghij", 8, 4);
        assert_eq!(chunks, vec!["abcdefgh", "efghij", "ij"]);
    }

    #[test]
    fn chunk_order_follows_the_source_text() {
        let text = "alpha. beta. gamma. delta. epsilon. zeta. eta. theta.";
        let chunks = split(text, 20, 5);

        // Each chunk's first word must appear no earlier than the previous
        // chunk's first word in the source.
        let mut last_pos = 0;
        for chunk in &chunks {
            let first = chunk.split_whitespace().next().unwrap();
            let pos = text[last_pos..].find(first).map(|p| p + last_pos);
            assert!(pos.is_some(), "chunk out of order: {:?}", chunk);
            last_pos = pos.unwrap();
        }
    }

    #[test]
    fn multibyte_text_splits_without_panicking() {
        let text = "La programación en Español: años, señales y camiones. ".repeat(30);
        let chunks = split(&text, 80, 20);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 80);
        }
    }

    #[test]
    fn tiny_leading_separator_does_not_shrink_the_window() {
        // Single space right at the start of the window; the natural cut is
        // below chunk_size / 2 so the hard cut must win.
        let text = format!("a {}", "b".repeat(200));
        let chunks = split(&text, 100, 0);
        assert_eq!(chunks[0].chars().count(), 100);
    }
}
