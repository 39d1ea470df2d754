//! The fixed question set and keyword emphasis.

use serde::Serialize;

/// A single survey question. Order in [`QUESTIONS`] is the survey order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
}

pub const QUESTIONS: [Question; 10] = [
    Question { id: 1, text: "Who do you trust more with decisions?" },
    Question { id: 2, text: "Who understands emotions better?" },
    Question { id: 3, text: "Who should create art?" },
    Question { id: 4, text: "Who learns faster?" },
    Question { id: 5, text: "Who should lead teams?" },
    Question { id: 6, text: "Who makes fewer mistakes?" },
    Question { id: 7, text: "Who adapts better to change?" },
    Question { id: 8, text: "Who should teach children?" },
    Question { id: 9, text: "Who should diagnose problems?" },
    Question { id: 10, text: "Who shapes the future?" },
];

/// Words that get the pulsing underline in the question panel.
pub const KEYWORDS: [&str; 13] = [
    "trust", "emotions", "art", "learns", "lead", "mistakes", "adapts", "teach", "diagnose",
    "shapes", "decides", "creates", "future",
];

/// One space-separated word of a question, tagged with whether it is emphasized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub word: &'a str,
    pub keyword: bool,
}

/// Normalize a word for keyword lookup: drop `?`, `.` and `,`, lowercase.
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| !matches!(c, '?' | '.' | ','))
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn is_keyword(word: &str) -> bool {
    let cleaned = clean_word(word);
    KEYWORDS.contains(&cleaned.as_str())
}

/// Split question text into words, marking keywords. The original word
/// (punctuation included) is kept for display.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    text.split(' ')
        .filter(|w| !w.is_empty())
        .map(|word| Segment {
            word,
            keyword: is_keyword(word),
        })
        .collect()
}

impl Question {
    pub fn segments(&self) -> Vec<Segment<'static>> {
        segments(self.text)
    }

    /// Keywords present in this question, in text order, cleaned.
    pub fn keywords(&self) -> Vec<String> {
        self.segments()
            .into_iter()
            .filter(|s| s.keyword)
            .map(|s| clean_word(s.word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_ids_are_sequential() {
        for (i, q) in QUESTIONS.iter().enumerate() {
            assert_eq!(q.id as usize, i + 1);
        }
    }

    #[test]
    fn keyword_match_strips_punctuation_and_case() {
        assert!(is_keyword("Trust"));
        assert!(is_keyword("future?"));
        assert!(is_keyword("ART,"));
        assert!(!is_keyword("who"));
        assert!(!is_keyword("trusted"));
    }

    #[test]
    fn segments_keep_original_words() {
        let segs = segments("Who shapes the future?");
        let words: Vec<&str> = segs.iter().map(|s| s.word).collect();
        assert_eq!(words, ["Who", "shapes", "the", "future?"]);
        let flags: Vec<bool> = segs.iter().map(|s| s.keyword).collect();
        assert_eq!(flags, [false, true, false, true]);
    }

    #[test]
    fn every_question_has_a_keyword() {
        for q in &QUESTIONS {
            assert!(!q.keywords().is_empty(), "no keyword in {:?}", q.text);
        }
    }

    #[test]
    fn keywords_of_first_question() {
        assert_eq!(QUESTIONS[0].keywords(), ["trust"]);
    }

    #[test]
    fn question_serializes_with_id_and_text() {
        let json = serde_json::to_value(QUESTIONS[3]).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["text"], "Who learns faster?");
    }
}
