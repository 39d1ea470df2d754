//! The `questions` subcommand: the question set with its highlighted keywords.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use survey_core::question::{KEYWORDS, QUESTIONS, Question};

use crate::format::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionEntry {
    pub id: u32,
    pub text: &'static str,
    pub keywords: Vec<String>,
}

impl From<&Question> for QuestionEntry {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text,
            keywords: q.keywords(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionSet {
    pub questions: Vec<QuestionEntry>,
    pub keywords: &'static [&'static str],
}

impl QuestionSet {
    pub fn current() -> Self {
        Self {
            questions: QUESTIONS.iter().map(QuestionEntry::from).collect(),
            keywords: &KEYWORDS,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => format.serialize(self),
            OutputFormat::Text => {
                let mut out = String::new();
                for q in &self.questions {
                    writeln!(out, "{:>2}. {}  [{}]", q.id, q.text, q.keywords.join(", "))?;
                }
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lists_every_question() {
        let out = QuestionSet::current().render(OutputFormat::Text).unwrap();
        assert_eq!(out.lines().count(), 10);
        assert!(out.starts_with(" 1. Who do you trust more with decisions?  [trust]"));
    }

    #[test]
    fn json_has_ids_and_keywords() {
        let out = QuestionSet::current().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["questions"].as_array().unwrap().len(), 10);
        assert_eq!(value["questions"][0]["keywords"][0], "trust");
        assert_eq!(value["keywords"].as_array().unwrap().len(), KEYWORDS.len());
    }
}
