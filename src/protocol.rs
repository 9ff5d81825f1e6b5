//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Category, Lang};
use crate::question::{Blank, Question};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewQuestion {
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        direction: Option<String>,
        #[serde(default)]
        seed: Option<u64>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question { question: QuestionOut },
    Error { code: String, message: String },
}

/// DTO used by both WS and HTTP for question delivery.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    /// Fresh per served question; for client-side correlation only.
    pub id: String,
    pub category: Category,
    pub prompt: String,
    pub blanks: Vec<Blank>,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<Lang>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<Lang>,
}

/// Convert a synthesized `Question` to the public DTO.
pub fn to_out(category: Category, q: &Question) -> QuestionOut {
    let langs = q.langs();
    QuestionOut {
        id: Uuid::new_v4().to_string(),
        category,
        prompt: q.prompt().to_string(),
        blanks: q.blanks().to_vec(),
        explanation: q.explanation().to_string(),
        source_lang: langs.map(|l| l.source),
        target_lang: langs.map(|l| l.target),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub category: Option<String>,
    pub direction: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub code: String,
    pub error: String,
}

#[derive(Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub records: usize,
}

#[derive(Serialize)]
pub struct CategoriesOut {
    pub categories: Vec<CategoryCount>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
