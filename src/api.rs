use std::env::var;
use std::fmt;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::opentdb::{Category, CategoryListResponse, QuestionListResponse, QuestionRecord};
use crate::text::decode_entities;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

/// The trivia API embeds its own success/failure indicator in the body,
/// separate from the HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    NoResults,
    InvalidParameter,
    TokenNotFound,
    TokenExhausted,
    Unknown(u8),
}

impl ResponseCode {
    pub fn from_code(code: u8) -> ResponseCode {
        match code {
            0 => Self::Success,
            1 => Self::NoResults,
            2 => Self::InvalidParameter,
            3 => Self::TokenNotFound,
            4 => Self::TokenExhausted,
            other => Self::Unknown(other),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Success => "Success.".to_string(),
            Self::NoResults => {
                "Not enough questions exist for this filter combination. Try fewer questions or broader filters.".to_string()
            }
            Self::InvalidParameter => "The API rejected one of the request parameters.".to_string(),
            Self::TokenNotFound => "The API session token was not found.".to_string(),
            Self::TokenExhausted => {
                "The API session token has returned every question it has.".to_string()
            }
            Self::Unknown(code) => format!("The API returned an unknown response code ({code})."),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Connectivity or transport failure.
    Network(String),
    /// Well-formed HTTP response with a malformed or unexpected JSON body.
    Decode(String),
    /// Well-formed response carrying a nonzero trivia response code.
    Api(ResponseCode),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Decode(message) => write!(f, "failed to decode response: {message}"),
            Self::Api(code) => write!(f, "{}", code.message()),
        }
    }
}

impl std::error::Error for ApiError {}

/// A question as the rest of the app sees it: entity escapes already decoded,
/// so scoring compares decoded-to-decoded and rendering never re-decodes.
#[derive(Debug, Clone)]
pub struct Question {
    pub category: String,
    pub kind: String,
    pub difficulty: String,
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl From<QuestionRecord> for Question {
    fn from(record: QuestionRecord) -> Question {
        Question {
            category: decode_entities(&record.category),
            kind: record.kind,
            difficulty: record.difficulty,
            text: decode_entities(&record.question),
            correct_answer: decode_entities(&record.correct_answer),
            incorrect_answers: record
                .incorrect_answers
                .iter()
                .map(|answer| decode_entities(answer))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuestionRequest {
    pub amount: u8,
    pub category: Option<u32>,
    pub difficulty: Option<&'static str>,
    pub question_type: Option<&'static str>,
}

impl QuestionRequest {
    /// `amount` is always sent; the filters only when a concrete value is set.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("amount", self.amount.to_string())];
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            params.push(("difficulty", difficulty.to_string()));
        }
        if let Some(question_type) = self.question_type {
            params.push(("type", question_type.to_string()));
        }
        params
    }
}

#[derive(Clone)]
pub struct TriviaClient {
    http: reqwest::Client,
    base_url: String,
}

impl TriviaClient {
    pub fn new(http: reqwest::Client, base_url: String) -> TriviaClient {
        TriviaClient { http, base_url }
    }

    /// Reads `TRIVIA_API_URL` (useful for pointing at a local stub), falling
    /// back to the public endpoint.
    pub fn from_env(http: reqwest::Client) -> TriviaClient {
        let base_url = var("TRIVIA_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        TriviaClient::new(http, base_url)
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        info!("Fetching category list");
        let response: CategoryListResponse = self.get_json("/api_category.php", &[]).await?;
        debug!("Received {} categories", response.trivia_categories.len());
        Ok(response.trivia_categories)
    }

    pub async fn fetch_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<Question>, ApiError> {
        let params = request.query_params();
        info!("Fetching {} questions", request.amount);
        let response: QuestionListResponse = self.get_json("/api.php", &params).await?;

        match ResponseCode::from_code(response.response_code) {
            ResponseCode::Success => {
                debug!("Received {} questions", response.results.len());
                Ok(response.results.into_iter().map(Question::from).collect())
            }
            code => Err(ApiError::Api(code)),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_always_present_and_passed_through() {
        let request = QuestionRequest {
            amount: 37,
            category: None,
            difficulty: None,
            question_type: None,
        };
        assert_eq!(request.query_params(), vec![("amount", "37".to_string())]);
    }

    #[test]
    fn concrete_filters_are_included() {
        let request = QuestionRequest {
            amount: 10,
            category: Some(18),
            difficulty: Some("hard"),
            question_type: Some("boolean"),
        };
        assert_eq!(
            request.query_params(),
            vec![
                ("amount", "10".to_string()),
                ("category", "18".to_string()),
                ("difficulty", "hard".to_string()),
                ("type", "boolean".to_string()),
            ]
        );
    }

    #[test]
    fn response_code_taxonomy() {
        assert_eq!(ResponseCode::from_code(0), ResponseCode::Success);
        assert_eq!(ResponseCode::from_code(1), ResponseCode::NoResults);
        assert_eq!(ResponseCode::from_code(2), ResponseCode::InvalidParameter);
        assert_eq!(ResponseCode::from_code(3), ResponseCode::TokenNotFound);
        assert_eq!(ResponseCode::from_code(4), ResponseCode::TokenExhausted);
        assert_eq!(ResponseCode::from_code(9), ResponseCode::Unknown(9));

        // every failure code carries its own message
        let codes = [1u8, 2, 3, 4, 9];
        let messages: Vec<String> = codes
            .iter()
            .map(|&c| ResponseCode::from_code(c).message())
            .collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn questions_are_decoded_at_ingestion() {
        let record = QuestionRecord {
            category: "Entertainment: Film".to_string(),
            kind: "multiple".to_string(),
            difficulty: "easy".to_string(),
            question: "Who said &quot;I&#039;ll be back&quot;?".to_string(),
            correct_answer: "Arnold &amp; co".to_string(),
            incorrect_answers: vec!["Beyonc&eacute;".to_string()],
        };
        let question = Question::from(record);
        assert_eq!(question.text, "Who said \"I'll be back\"?");
        assert_eq!(question.correct_answer, "Arnold & co");
        assert_eq!(question.incorrect_answers[0], "Beyoncé");
    }
}
