//! Questionnaire answers and the immutable session parameters built from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Answers
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    #[default]
    Unsure,
}

impl Answer {
    pub const ALL: [Answer; 3] = [Answer::Yes, Answer::No, Answer::Unsure];

    /// Value sent in the `q1`..`q8` form fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Unsure => "unsure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
            Answer::Unsure => "Unsure",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Questions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Question {
    PreviousMelanoma,
    PreviousCarcinoma,
    ManyMoles,
    FamilyHistory,
    FairSkin,
    Sunburns,
    Parkinsons,
    Immunocompromised,
}

impl Question {
    /// Questions in the order they are asked and submitted.
    pub const ALL: [Question; 8] = [
        Question::PreviousMelanoma,
        Question::PreviousCarcinoma,
        Question::ManyMoles,
        Question::FamilyHistory,
        Question::FairSkin,
        Question::Sunburns,
        Question::Parkinsons,
        Question::Immunocompromised,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Question::PreviousMelanoma => "q1",
            Question::PreviousCarcinoma => "q2",
            Question::ManyMoles => "q3",
            Question::FamilyHistory => "q4",
            Question::FairSkin => "q5",
            Question::Sunburns => "q6",
            Question::Parkinsons => "q7",
            Question::Immunocompromised => "q8",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Question::PreviousMelanoma => {
                "Have you previously been diagnosed with invasive melanoma or melanoma in situ?"
            }
            Question::PreviousCarcinoma => {
                "Have you previously been diagnosed with basal cell or squamous cell carcinoma?"
            }
            Question::ManyMoles => "Would you say you have a lot of moles on your body?",
            Question::FamilyHistory => "Does your family have a history of skin cancer?",
            Question::FairSkin => "Are you a fair-skinned person?",
            Question::Sunburns => "Do you have a history of sunburns?",
            Question::Parkinsons => "Have you previously been diagnosed with Parkinson's disease?",
            Question::Immunocompromised => "Is your immune system compromised?",
        }
    }
}

/// The eight answers, indexed by [`Question::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Answers([Answer; 8]);

impl Answers {
    pub fn get(&self, question: Question) -> Answer {
        self.0[question.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Question, Answer)> + '_ {
        Question::ALL.iter().map(move |q| (*q, self.get(*q)))
    }
}

impl From<[Answer; 8]> for Answers {
    fn from(values: [Answer; 8]) -> Self {
        Answers(values)
    }
}

// =============================================================================
// Questionnaire (mutable, local to the questionnaire screen)
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Questionnaire {
    age: String,
    answers: Answers,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    /// Stored exactly as typed; the server interprets it.
    pub fn set_age(&mut self, input: &str) {
        self.age = input.to_string();
    }

    pub fn answer(&self, question: Question) -> Answer {
        self.answers.get(question)
    }

    pub fn set_answer(&mut self, question: Question, answer: Answer) {
        self.answers.0[question.index()] = answer;
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn freeze(self) -> SessionParams {
        SessionParams {
            age: self.age,
            answers: self.answers,
        }
    }
}

// =============================================================================
// Session parameters (immutable, forwarded by value)
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    age: String,
    answers: Answers,
}

impl SessionParams {
    pub fn new(age: impl Into<String>, answers: impl Into<Answers>) -> Self {
        Self {
            age: age.into(),
            answers: answers.into(),
        }
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Text fields of the upload in wire order: `age`, then `q1`..`q8`.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        std::iter::once(("age", self.age.clone()))
            .chain(
                self.answers
                    .iter()
                    .map(|(q, a)| (q.field_name(), a.as_str().to_string())),
            )
            .collect()
    }

    pub fn with_photo(self, photo: PathBuf) -> CapturedSession {
        CapturedSession {
            params: self,
            photo,
        }
    }
}

/// Session parameters plus the cropped photo, as handed to the preview screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedSession {
    pub params: SessionParams,
    pub photo: PathBuf,
}

impl CapturedSession {
    /// Drops the photo reference for a retake. The file itself is left on disk.
    pub fn discard_photo(self) -> SessionParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_default_to_unsure() {
        let q = Questionnaire::new();
        for question in Question::ALL {
            assert_eq!(q.answer(question), Answer::Unsure);
        }
        assert_eq!(q.age(), "");
    }

    #[test]
    fn selecting_an_answer_replaces_the_previous_one() {
        let mut q = Questionnaire::new();
        q.set_answer(Question::FairSkin, Answer::Yes);
        q.set_answer(Question::FairSkin, Answer::No);
        assert_eq!(q.answer(Question::FairSkin), Answer::No);
        assert_eq!(q.answer(Question::Sunburns), Answer::Unsure);
    }

    #[test]
    fn age_is_submitted_as_typed() {
        for typed in ["45", "45.5", "", " 7", "forty"] {
            let mut q = Questionnaire::new();
            q.set_age(typed);
            assert_eq!(q.age(), typed);
            assert_eq!(q.freeze().form_fields()[0], ("age", typed.to_string()));
        }
    }

    #[test]
    fn form_fields_preserve_order_and_values() {
        let mut q = Questionnaire::new();
        q.set_age("45");
        q.set_answer(Question::PreviousMelanoma, Answer::Yes);
        q.set_answer(Question::Immunocompromised, Answer::No);
        let fields = q.freeze().form_fields();

        let names: Vec<_> = fields.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            ["age", "q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8"]
        );
        assert_eq!(fields[0].1, "45");
        assert_eq!(fields[1].1, "yes");
        assert_eq!(fields[2].1, "unsure");
        assert_eq!(fields[8].1, "no");
    }

    #[test]
    fn answers_serialize_lowercase() {
        let json = serde_json::to_string(&Answer::Unsure).unwrap();
        assert_eq!(json, "\"unsure\"");
    }

    #[test]
    fn retake_keeps_parameters() {
        let params = SessionParams::new("30", [Answer::No; 8]);
        let captured = params.clone().with_photo(PathBuf::from("/tmp/a.jpg"));
        assert_eq!(captured.discard_photo(), params);
    }
}
