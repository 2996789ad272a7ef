use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

lazy_static! {
    static ref FORBIDDEN_RESPONSE_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

fn sanitize(text: &str) -> String {
    let text = unidecode(text);
    FORBIDDEN_RESPONSE_CHARACTERS_REGEX
        .replace_all(&text.to_lowercase(), "")
        .into()
}

/// Correctness verdict for an open ended response. Implementations must be
/// pure so that grading stays deterministic.
pub trait OpenEndedEvaluator {
    fn evaluate(&self, expected_keywords: &[String], response: &str) -> bool;
}

/// Placeholder evaluator that never awards credit.
pub struct NoEvaluator;

impl OpenEndedEvaluator for NoEvaluator {
    fn evaluate(&self, _expected_keywords: &[String], _response: &str) -> bool {
        false
    }
}

/// Awards credit when the sanitized response contains at least `min_matches`
/// of the expected keywords.
pub struct KeywordEvaluator {
    pub min_matches: usize,
}

impl Default for KeywordEvaluator {
    fn default() -> Self {
        KeywordEvaluator { min_matches: 1 }
    }
}

impl OpenEndedEvaluator for KeywordEvaluator {
    fn evaluate(&self, expected_keywords: &[String], response: &str) -> bool {
        let response = sanitize(response);
        let matches = expected_keywords
            .iter()
            .map(|keyword| sanitize(keyword))
            .filter(|keyword| !keyword.is_empty() && response.contains(keyword.as_str()))
            .count();
        matches >= self.min_matches.max(1)
    }
}
