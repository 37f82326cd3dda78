//! Classification returned by the inference service and the result screens it selects.

use crate::error::{MoleScanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Positive,
    Negative,
    Unsure,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Positive => "positive",
            Classification::Negative => "negative",
            Classification::Unsure => "unsure",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Classification::Positive => "Important Notice",
            Classification::Negative => "Good News",
            Classification::Unsure => "Inconclusive Result",
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            Classification::Positive => {
                "Please consult a healthcare professional as soon as possible. \
                 This is not a definitive diagnosis, but your case requires \
                 immediate medical attention."
            }
            Classification::Negative => {
                "While this result is encouraging, remember to maintain regular \
                 skin checks and consult a healthcare provider if you notice any \
                 changes in the future."
            }
            Classification::Unsure => {
                "The analysis could not reach a clear conclusion. Consider retaking \
                 the photo in better lighting, and ask a healthcare provider to \
                 examine the lesion."
            }
        }
    }
}

impl FromStr for Classification {
    type Err = MoleScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "positive" => Ok(Classification::Positive),
            "negative" => Ok(Classification::Negative),
            "unsure" => Ok(Classification::Unsure),
            other => Err(MoleScanError::UnrecognizedClassification(other.to_string())),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body returned by `POST /check`.
///
/// `prediction` stays a plain string here so an unknown value is reported as
/// [`MoleScanError::UnrecognizedClassification`] rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub prediction: String,
    pub sensitive_response: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub classification: Classification,
    pub message: String,
}

impl TryFrom<CheckResponse> for SubmissionResult {
    type Error = MoleScanError;

    fn try_from(response: CheckResponse) -> Result<Self> {
        Ok(Self {
            classification: response.prediction.parse()?,
            message: response.sensitive_response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_closed_set() {
        for c in [
            Classification::Positive,
            Classification::Negative,
            Classification::Unsure,
        ] {
            assert_eq!(c.as_str().parse::<Classification>().unwrap(), c);
        }
    }

    #[test]
    fn unknown_prediction_is_an_error() {
        let response = CheckResponse {
            prediction: "maybe".into(),
            sensitive_response: "?".into(),
        };
        assert_eq!(
            SubmissionResult::try_from(response).unwrap_err(),
            MoleScanError::UnrecognizedClassification("maybe".into())
        );
    }

    #[test]
    fn response_json_maps_to_result() {
        let body = r#"{"prediction":"negative","sensitive_response":"No concerning features detected."}"#;
        let response: CheckResponse = serde_json::from_str(body).unwrap();
        let result = SubmissionResult::try_from(response).unwrap();
        assert_eq!(result.classification, Classification::Negative);
        assert_eq!(result.message, "No concerning features detected.");
    }
}
