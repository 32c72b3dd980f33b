//! Question generation backed by Claude

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::mpsc;

use super::auth::ApiKeyManager;
use super::client::ClaudeClient;
use super::error::ClaudeError;
use super::models::{ClaudeModel, CreateMessageRequest, Message};
use crate::quiz::{Question, TestType};
use crate::supply::{QuestionSupply, SupplyError, SupplyRequest, parse_questions};

/// Output budget per requested question
const TOKENS_PER_QUESTION: u32 = 400;
/// Upper bound on the output budget
const MAX_OUTPUT_TOKENS: u32 = 48_000;

const SYSTEM_PROMPT: &str = "You are an expert NEET paper setter. You write accurate, \
NCERT-aligned multiple-choice questions and reply with JSON only.";

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(\[.*\])\s*```").expect("valid regex"));

/// Build the user prompt for a batch
pub fn build_prompt(request: &SupplyRequest) -> String {
    let subject = request.subject.label();
    let mut prompt = format!(
        "Generate {count} high-quality NEET {subject} questions for the following configuration:\n\
         Type: {kind}\n\
         Subject: {subject}\n\
         Target Chapters: {chapters}\n\n\
         Rules:\n\
         1. STRICTLY NCERT BASED. For Physics/Chemistry, include numericals and theory.\n\
         2. Variety is key: Conceptual, Diagram-based description, Application, Match the following.\n",
        count = request.count,
        kind = request.test_type.wire_name(),
        chapters = request.chapter_summary(),
    );

    match request.test_type {
        TestType::Pyq => prompt.push_str(
            "3. These are previous year questions: set \"year\" to the NEET year (2010-2024).\n",
        ),
        TestType::StatementBased => prompt.push_str(
            "3. Every question presents statements to judge as correct or incorrect, NTA style.\n",
        ),
        TestType::ChapterWise | TestType::Mixed => {
            prompt.push_str("3. Omit \"year\" unless the question is a real previous year question.\n")
        }
    }

    prompt.push_str(&format!(
        "4. Return exactly {count} items.\n\
         5. Ensure randomized sub-topics for infinite variety.\n\n\
         Respond with a JSON array only. Each item is an object with fields:\n\
         \"id\" (string), \"question\" (string), \"options\" (array of exactly 4 strings), \
         \"correctAnswer\" (integer index 0-3), \"explanation\" (string), \
         \"ncertReference\" (string), \"year\" (integer, optional), \"chapter\" (string).",
        count = request.count,
    ));

    prompt
}

/// Pull the JSON array out of a model reply
///
/// Handles a Markdown code fence and stray prose around the array.
pub fn extract_json_array(text: &str) -> Option<&str> {
    if let Some(caps) = FENCED_JSON.captures(text) {
        return caps.get(1).map(|m| m.as_str());
    }
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Generates questions through the Claude API
pub struct ClaudeSupply {
    client: ClaudeClient,
    model: ClaudeModel,
    progress: Option<mpsc::UnboundedSender<usize>>,
}

impl ClaudeSupply {
    /// Build a supply using the configured API key
    pub fn from_env(model: ClaudeModel) -> Result<Self, ClaudeError> {
        let client = ClaudeClient::new(ApiKeyManager::get_api_key()?)?;
        Ok(Self { client, model, progress: None })
    }

    /// Report generated characters on `tx` while streaming
    pub fn with_progress(mut self, tx: mpsc::UnboundedSender<usize>) -> Self {
        self.progress = Some(tx);
        self
    }

    async fn generate(&self, request: &SupplyRequest) -> Result<Vec<Question>, SupplyError> {
        let max_tokens =
            (request.count as u32).saturating_mul(TOKENS_PER_QUESTION).clamp(1024, MAX_OUTPUT_TOKENS);
        let message = CreateMessageRequest::new(self.model, vec![Message::user(build_prompt(request))])
            .with_system(SYSTEM_PROMPT)
            .with_max_tokens(max_tokens);

        tracing::info!("Generating questions with {}", self.model.display_name());
        let text = self.client.generate_text(message, self.progress.clone()).await?;

        let json = extract_json_array(&text).ok_or_else(|| {
            tracing::error!("Reply did not contain a JSON array ({} chars)", text.len());
            SupplyError::Failed("the model reply did not contain a question list".to_string())
        })?;

        let mut questions = parse_questions(json, request)?;
        if questions.len() > request.count {
            questions.truncate(request.count);
        }
        tracing::info!("Generated {} of {} requested questions", questions.len(), request.count);
        Ok(questions)
    }
}

#[async_trait]
impl QuestionSupply for ClaudeSupply {
    async fn request(&self, request: &SupplyRequest) -> Result<Vec<Question>, SupplyError> {
        self.generate(request).await
    }
}
