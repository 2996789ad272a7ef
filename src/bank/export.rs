use anyhow::*;
use itertools::Itertools;

use super::{QuestionBank, QuestionDetail};

const HEADER: [&str; 8] = [
    "question",
    "type",
    "optionA",
    "optionB",
    "optionC",
    "optionD",
    "correctAnswer",
    "points",
];

const TEMPLATE: &str = r#"question,type,optionA,optionB,optionC,optionD,correctAnswer,points
"What is the first step of a discovery call?","multiple_choice","Pitch the product","Build rapport","Discuss pricing","Close the deal","B",2
"Which objection comes up most often late in a deal?","multiple_choice","Price","Timing","Authority","Need","A",1
"Discounting early in a negotiation strengthens your position.","true_false",,,,,"false",1
"How would you respond to a prospect who says the price is too high?","open_ended","value","budget","roi",,,3
"#;

/// Example CSV handed out as a starting point for question authors.
/// Importing it yields every row with zero skips.
pub fn template() -> &'static str {
    TEMPLATE
}

impl QuestionBank {
    /// Serializes the bank back to the 8-column CSV contract. Only the first
    /// four options or keywords fit the column layout, and content containing
    /// double quotes will not survive a round-trip through the importer,
    /// which has no quote escape.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&HEADER)?;

        for question in self.questions() {
            let (kind, choices, correct_answer): (&str, Vec<&str>, &str) = match &question.detail {
                QuestionDetail::MultipleChoice {
                    options,
                    correct_answer,
                } => (
                    "multiple_choice",
                    options.iter().map(String::as_str).collect(),
                    correct_answer,
                ),
                QuestionDetail::TrueFalse { correct_answer } => {
                    ("true_false", Vec::new(), correct_answer.as_str())
                }
                QuestionDetail::OpenEnded { expected_keywords } => (
                    "open_ended",
                    expected_keywords.iter().map(String::as_str).collect(),
                    "",
                ),
            };

            let choices: Vec<&str> = choices.into_iter().take(4).pad_using(4, |_| "").collect();
            let points = question.points.to_string();
            let record = [
                question.text.as_str(),
                kind,
                choices[0],
                choices[1],
                choices[2],
                choices[3],
                correct_answer,
                points.as_str(),
            ];
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Could not flush CSV writer: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }
}
