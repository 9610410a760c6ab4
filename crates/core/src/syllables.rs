//! Vowel-group syllable estimation.
//!
//! The counter only looks at the ASCII letters of a token, lower-cased:
//!
//! 1. no letters: 0 syllables (punctuation, numbers);
//! 2. each run of vowels (`aeiouy`) counts one;
//! 3. a trailing `e` is silent and subtracts one;
//! 4. a trailing consonant + `le` (`table`, `simple`) adds one back;
//! 5. any word with letters has at least one syllable.
//!
//! The rules are fixed: the Fog Index and complex-word counts depend on them.

const VOWELS: &[u8] = b"aeiouy";

fn is_vowel(b: u8) -> bool {
    VOWELS.contains(&b)
}

/// Estimates the number of syllables in a word.
///
/// # Example
///
/// ```rust
/// use sententia_core::syllables::count_syllables;
///
/// assert_eq!(count_syllables("beautiful"), 3);
/// assert_eq!(count_syllables("table"), 2);
/// assert_eq!(count_syllables("."), 0);
/// ```
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<u8> = word
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_lowercase())
        .collect();

    if letters.is_empty() {
        return 0;
    }

    let mut count: isize = 0;
    let mut previous_vowel = false;
    for &b in &letters {
        let vowel = is_vowel(b);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    if letters.ends_with(b"e") {
        count -= 1;
    }

    let n = letters.len();
    if n > 2 && letters.ends_with(b"le") && !is_vowel(letters[n - 3]) {
        count += 1;
    }

    count.max(1) as usize
}

/// A word is complex when it has more than two syllables.
pub fn is_complex(word: &str) -> bool {
    count_syllables(word) > 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("love", 1)]
    #[case("the", 1)]
    #[case("good", 1)]
    #[case("I", 1)]
    #[case("yes", 1)]
    #[case("table", 2)]
    #[case("product", 2)]
    #[case("people", 2)]
    #[case("beautiful", 3)]
    #[case("computer", 3)]
    #[case("Every", 3)]
    #[case("analysis", 4)]
    #[case("communication", 5)]
    #[case("n't", 1)]
    #[case("2024", 0)]
    #[case(",", 0)]
    #[case("", 0)]
    fn test_count_syllables(#[case] word: &str, #[case] expected: usize) {
        assert_eq!(count_syllables(word), expected);
    }

    #[rstest]
    #[case("beautiful", true)]
    #[case("table", false)]
    #[case("...", false)]
    fn test_is_complex(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(is_complex(word), expected);
    }

    #[test]
    fn test_counter_is_deterministic() {
        let words = ["internationalization", "readability", "sentiment"];
        let first: Vec<usize> = words.iter().map(|w| count_syllables(w)).collect();
        let second: Vec<usize> = words.iter().map(|w| count_syllables(w)).collect();
        assert_eq!(first, second);
    }
}
