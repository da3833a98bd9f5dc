//! Keyword relevance scoring

use crate::models::RelevanceScore;

/// `relevance_reason` attached to every keyword-scored article
pub const KEYWORD_REASON: &str = "Keyword match score";

const NO_TEXT: RelevanceScore = RelevanceScore::new_unchecked(0.0);
const TICKER_MENTIONED: RelevanceScore = RelevanceScore::new_unchecked(1.0);
const TICKER_ABSENT: RelevanceScore = RelevanceScore::new_unchecked(0.3);

/// Score an article by whether its text mentions the ticker
///
/// Blank text scores 0.0, a case-insensitive substring hit scores 1.0, and
/// anything else scores 0.3.
pub fn score(ticker: &str, title: &str, summary: &str) -> RelevanceScore {
    let text = format!("{title} {summary}").to_lowercase();
    if text.trim().is_empty() {
        return NO_TEXT;
    }

    if text.contains(&ticker.to_lowercase()) {
        TICKER_MENTIONED
    } else {
        TICKER_ABSENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_in_title() {
        assert_eq!(score("AAPL", "AAPL beats estimates", "").value(), 1.0);
    }

    #[test]
    fn test_ticker_in_summary_case_insensitive() {
        assert_eq!(score("msft", "Cloud growth", "Analysts lift MSFT target").value(), 1.0);
    }

    #[test]
    fn test_no_mention() {
        assert_eq!(score("TSLA", "Oil prices climb", "Brent up 2%").value(), 0.3);
    }

    #[test]
    fn test_blank_text() {
        assert_eq!(score("TSLA", "", "").value(), 0.0);
        assert_eq!(score("TSLA", "  ", "\n\t").value(), 0.0);
    }

    #[test]
    fn test_substring_match_is_not_word_bound() {
        // Plain substring match, so short tickers hit inside other words
        assert_eq!(score("F", "Profits rise", "").value(), 1.0);
    }
}
