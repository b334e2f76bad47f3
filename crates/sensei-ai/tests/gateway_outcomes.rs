/// Drives `AiGateway` with a scripted model to check that every failure mode
/// still produces a payload of the declared shape.
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use sensei_ai::{AiGateway, AiOutcome, FailureKind, ModelClient, ModelError};

enum Script {
    Reply(&'static str),
    Status(u16, &'static str),
    Blocked,
}

struct ScriptedModel {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self { script, prompts: Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn generate_json(&self, prompt: &str, _schema: &Value) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.script {
            Script::Reply(body) => Ok(body.to_string()),
            Script::Status(status, message) => Err(ModelError::Status {
                status: *status,
                message: message.to_string(),
            }),
            Script::Blocked => Err(ModelError::Blocked("SAFETY".into())),
        }
    }
}

const GOOD_TRANSLATION: &str =
    r#"{"hanzi":"你好","pinyin":"nǐ hǎo","translation_fr":"Bonjour","translation_mg":"Manao ahoana"}"#;

const GOOD_QUIZ: &str = r#"[
  {"question":"Comment dit-on bonjour ?","options":["你好","谢谢","再见","对不起"],"correctAnswerIndex":0,"explanation":"你好 = bonjour"},
  {"question":"Que veut dire 谢谢 ?","options":["Merci","Pardon","Salut","Oui"],"correctAnswerIndex":0,"explanation":"谢谢 = merci"}
]"#;

fn assert_single_sentinel_question(outcome: &AiOutcome<Vec<sensei_types::models::QuizQuestion>>) {
    let questions = outcome.value();
    assert_eq!(questions.len(), 1);
    assert!(questions[0].is_well_formed());
    assert_eq!(questions[0].correct_answer_index, 0);
    assert!(questions[0].question.starts_with("Erreur de génération"));
}

#[tokio::test]
async fn translation_passes_through_on_success() {
    let model = ScriptedModel::new(Script::Reply(GOOD_TRANSLATION));
    let gateway = AiGateway::new(model.clone());

    let outcome = gateway.translate_text("bonjour").await;
    assert!(!outcome.is_degraded());
    assert_eq!(outcome.value().hanzi, "你好");

    let prompts = model.prompts.lock().unwrap();
    assert!(prompts[0].contains("\"bonjour\""));
}

#[tokio::test]
async fn quota_error_degrades_translation() {
    let gateway = AiGateway::new(ScriptedModel::new(Script::Status(429, "RESOURCE_EXHAUSTED")));

    let outcome = gateway.translate_text("bonjour").await;
    assert_eq!(outcome.reason(), Some(FailureKind::RateLimited));

    let t = outcome.into_inner();
    assert_eq!(t.hanzi, "ERROR");
    assert_eq!(t.pinyin, "FAILED");
    assert_eq!(t.translation_fr, "System overloaded (429).");
    assert_eq!(t.translation_mg, "Nisy olana.");
}

#[tokio::test]
async fn bad_key_and_safety_are_classified() {
    let gateway = AiGateway::new(ScriptedModel::new(Script::Status(
        400,
        "INVALID_ARGUMENT: API key not valid. Please pass a valid API key.",
    )));
    let outcome = gateway.translate_text("x").await;
    assert_eq!(outcome.reason(), Some(FailureKind::InvalidCredential));
    assert_eq!(outcome.value().translation_fr, "Invalid API Key.");

    let gateway = AiGateway::new(ScriptedModel::new(Script::Blocked));
    let outcome = gateway.translate_text("x").await;
    assert_eq!(outcome.reason(), Some(FailureKind::SafetyBlocked));
    assert_eq!(outcome.value().translation_fr, "Safety Block.");
}

#[tokio::test]
async fn unparseable_translation_degrades() {
    // A missing required field is a parse failure, not a partial success
    let gateway = AiGateway::new(ScriptedModel::new(Script::Reply(r#"{"hanzi":"你"}"#)));
    let outcome = gateway.translate_text("x").await;
    assert_eq!(outcome.reason(), Some(FailureKind::Unknown));
    assert_eq!(outcome.value().translation_fr, "Error.");
}

#[tokio::test]
async fn quiz_passes_through_on_success() {
    let model = ScriptedModel::new(Script::Reply(GOOD_QUIZ));
    let gateway = AiGateway::new(model.clone());

    let outcome = gateway.generate_quiz("salutations", "HSK1").await;
    assert!(!outcome.is_degraded());
    assert_eq!(outcome.value().len(), 2);

    let prompts = model.prompts.lock().unwrap();
    assert!(prompts[0].contains("\"salutations\""));
    assert!(prompts[0].contains("\"HSK1\""));
}

#[tokio::test]
async fn quiz_failures_return_one_sentinel_question() {
    for script in [
        Script::Status(429, "quota"),
        Script::Blocked,
        Script::Reply("not json"),
        Script::Reply("[]"),
        Script::Reply(
            r#"[{"question":"Q","options":["a","b"],"correctAnswerIndex":0,"explanation":"E"}]"#,
        ),
        Script::Reply(
            r#"[{"question":"Q","options":["a","b","c","d"],"correctAnswerIndex":7,"explanation":"E"}]"#,
        ),
    ] {
        let gateway = AiGateway::new(ScriptedModel::new(script));
        let outcome = gateway.generate_quiz("t", "HSK1").await;
        assert!(outcome.is_degraded());
        assert_single_sentinel_question(&outcome);
    }
}

#[tokio::test]
async fn missing_key_degrades_real_client_without_network() {
    let gateway = AiGateway::gemini(sensei_ai::AiConfig::new(""));

    let t = gateway.translate_text("x").await;
    assert_eq!(t.reason(), Some(FailureKind::InvalidCredential));

    let q = gateway.generate_quiz("t", "HSK1").await;
    assert_eq!(q.reason(), Some(FailureKind::InvalidCredential));
    assert_single_sentinel_question(&q);
}
