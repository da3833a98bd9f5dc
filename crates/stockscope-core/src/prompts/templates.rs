//! Prompt templates for the news and question-answering pipeline

use stockscope_prompt::{JinjaTemplate, Result};

/// Registry name of the news summary prompt
pub const SUMMARIZE_NEWS: &str = "news.summarize";

/// Registry name of the news ranking prompt
pub const RERANK_NEWS: &str = "news.rerank";

/// Registry name of the question answering prompt
pub const ANSWER_QUESTION: &str = "ask.answer";

/// Summarize curated headlines
///
/// Expects `ticker` and `articles` (each with `title` and `summary`).
pub fn summarize_news_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        SUMMARIZE_NEWS,
        "Summarize the most important themes in these news headlines and summaries for {{ ticker }} in 2-3 sentences.

{% for article in articles %}
- {{ article.title }}: {{ article.summary }}
{% endfor %}",
    )
}

/// Rank candidate articles by relevance
///
/// Expects `ticker`, `limit` and `candidates` (each with `index`, `title`
/// and `summary`).
pub fn rerank_news_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        RERANK_NEWS,
        "You are ranking news articles by how relevant they are to the stock {{ ticker }}.
Reply with only a JSON array of candidate numbers, most relevant first, with at most {{ limit }} entries and no repeats. Leave out articles that are not about {{ ticker }}.
Example reply: [2, 0, 1]

Candidates:
{% for candidate in candidates %}
[{{ candidate.index }}] {{ candidate.title }}: {{ candidate.summary }}
{% endfor %}",
    )
}

/// Answer a question from the latest close and recent headlines
///
/// Expects `ticker`, `question`, `range`, `close`, `date` and `headlines`
/// (each with `title` and `url`).
pub fn answer_question_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        ANSWER_QUESTION,
        "You are a concise stock market assistant. Answer the question about {{ ticker }} in 2-4 sentences using only the context below. If the context is not enough to answer, say so plainly.

Question: {{ question }}
Range: {{ range }}
Latest close: ${{ close | price }} on {{ date }}

Recent headlines:
{% for headline in headlines %}
- {{ headline.title }}{{ \" (\" ~ headline.url ~ \")\" if headline.url else \"\" }}
{% endfor %}
{% if not headlines %}
- No recent headlines available.
{% endif %}",
    )
}
