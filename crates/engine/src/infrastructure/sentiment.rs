//! Word-list sentiment classifier.
//!
//! Stands in for a trained model behind [`SentimentPort`]. Counts positive and
//! negative cue words (with a one-word negation window) and picks the sign of
//! the total.

use async_trait::async_trait;
use pitlane_domain::Sentiment;

use crate::infrastructure::ports::SentimentPort;

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "best", "brilliant", "cool", "enjoy", "excellent", "excited", "fantastic",
    "fast", "fun", "glad", "good", "great", "happy", "like", "love", "nice", "perfect", "thanks",
    "thank", "win", "winning", "wonderful", "yes",
];

const NEGATIVE_WORDS: &[&str] = &[
    "angry", "annoying", "awful", "bad", "broken", "crash", "crashed", "hate", "horrible", "lose",
    "losing", "lost", "mad", "sad", "slow", "stupid", "terrible", "upset", "useless", "worse",
    "worst", "wrong",
];

const NEGATIONS: &[&str] = &["not", "no", "never", "don't", "isn't", "wasn't", "can't", "won't"];

#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn score(text: &str) -> i32 {
        let words: Vec<String> = text
            .to_lowercase()
            .replace('\u{2019}', "'")
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        let mut score = 0;
        for (i, word) in words.iter().enumerate() {
            let polarity = if POSITIVE_WORDS.contains(&word.as_str()) {
                1
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                -1
            } else {
                0
            };
            let negated = i > 0 && NEGATIONS.contains(&words[i - 1].as_str());
            score += if negated { -polarity } else { polarity };
        }
        score
    }

    pub fn label(text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::Neutral;
        }
        match Self::score(text) {
            s if s > 0 => Sentiment::Positive,
            s if s < 0 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

#[async_trait]
impl SentimentPort for LexiconSentiment {
    async fn classify(&self, text: &str) -> Sentiment {
        Self::label(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_text_is_neutral() {
        assert_eq!(LexiconSentiment.classify("   ").await, Sentiment::Neutral);
    }

    #[test]
    fn cue_words_set_the_label() {
        assert_eq!(LexiconSentiment::label("This car is AWESOME!"), Sentiment::Positive);
        assert_eq!(LexiconSentiment::label("my engine is broken and slow"), Sentiment::Negative);
        assert_eq!(LexiconSentiment::label("Which tires for rain?"), Sentiment::Neutral);
    }

    #[test]
    fn negation_flips_the_next_word() {
        assert_eq!(LexiconSentiment::label("this is not good"), Sentiment::Negative);
        assert_eq!(LexiconSentiment::label("I don\u{2019}t hate it"), Sentiment::Positive);
    }
}
