//! Masked hints for the character being guessed.
//!
//! Every letter of the name is revealed with probability one half. A word
//! that ends up fully concealed gets one letter forced back into view, so the
//! player always sees at least one letter per word. Word boundaries and word
//! lengths are never hidden.
//!
//! Randomness is supplied through [`HintRng`] so callers decide between a
//! seeded generator, the thread generator, or a scripted sequence in tests.

use rand::Rng;

/// Source of randomness for hint generation.
pub trait HintRng {
    /// Uniform draw from `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. Only called with `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> HintRng for R {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Builds the masked form of `name`.
///
/// Words are split on single spaces and joined back the same way, so the
/// output has exactly the word count and per-word length (in chars) of the
/// input.
pub fn generate_hint<R>(name: &str, mask: char, rng: &mut R) -> String
where
    R: HintRng + ?Sized,
{
    name.split(' ')
        .map(|word| mask_word(word, mask, rng))
        .collect::<Vec<_>>()
        .join(" ")
}

fn mask_word<R>(word: &str, mask: char, rng: &mut R) -> String
where
    R: HintRng + ?Sized,
{
    let letters: Vec<char> = word.chars().collect();
    let mut shown: Vec<bool> = letters.iter().map(|_| rng.next_unit() > 0.5).collect();

    // Empty words (double spaces) have nothing to reveal.
    if !letters.is_empty() && !shown.contains(&true) {
        let forced = rng.pick_index(letters.len());
        shown[forced] = true;
    }

    letters
        .iter()
        .zip(shown)
        .map(|(&letter, visible)| if visible { letter } else { mask })
        .collect()
}
