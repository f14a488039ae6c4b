use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CategoryListResponse {
    pub trivia_categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionListResponse {
    pub response_code: u8,
    pub results: Vec<QuestionRecord>,
}

// `type` is a keyword, the wire name is mapped to `kind`
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}
