use serde_json::{Value, json};

use sensei_types::models::{QuizQuestion, Translation};

use crate::error::{FailureKind, ModelError};

// -- Translation --

pub fn translation_prompt(text: &str) -> String {
    format!(
        "Analyze the following text: \"{text}\".

Tasks:
1. Identify the Hanzi (Chinese characters). If the input is not Chinese, translate it to Chinese Hanzi.
2. Provide the Pinyin.
3. Translate the meaning to French (Français).
4. Translate the meaning to Malagasy (Malagasy).
"
    )
}

pub fn translation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "hanzi": { "type": "STRING", "description": "Chinese characters" },
            "pinyin": { "type": "STRING", "description": "Pinyin pronunciation" },
            "translation_fr": { "type": "STRING", "description": "French translation" },
            "translation_mg": { "type": "STRING", "description": "Malagasy translation" },
        },
        "required": ["hanzi", "pinyin", "translation_fr", "translation_mg"],
    })
}

pub fn fallback_translation(kind: FailureKind) -> Translation {
    Translation {
        hanzi: "ERROR".to_string(),
        pinyin: "FAILED".to_string(),
        translation_fr: kind.message().to_string(),
        translation_mg: "Nisy olana.".to_string(),
    }
}

// -- Quiz --

/// Questions requested per generated quiz.
pub const QUIZ_LENGTH: usize = 5;

pub fn quiz_prompt(topic: &str, difficulty: &str) -> String {
    format!(
        "Génère {QUIZ_LENGTH} questions à choix multiples (QCM) pour apprendre le Mandarin.

Sujet : \"{topic}\"
Niveau de difficulté : \"{difficulty}\" (Standard HSK)

Consignes :
1. Les questions et les explications DOIVENT être en Français.
2. Les options doivent contenir du Mandarin (Hanzi) ou du Pinyin pertinent pour l'exercice.
3. Adapte le vocabulaire au niveau demandé.
4. Chaque question a exactement 4 options et correctAnswerIndex est compris entre 0 et 3."
    )
}

pub fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING", "description": "La question en Français" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "4 choix possibles",
                },
                "correctAnswerIndex": {
                    "type": "INTEGER",
                    "description": "Index 0-3 de la bonne réponse",
                },
                "explanation": { "type": "STRING", "description": "Explication courte en Français" },
            },
            "required": ["question", "options", "correctAnswerIndex", "explanation"],
        },
    })
}

/// One-question stand-in so quiz traversal never sees an empty array.
pub fn fallback_quiz(err: &ModelError) -> Vec<QuizQuestion> {
    vec![QuizQuestion {
        question: format!("Erreur de génération: {}", err),
        options: ["Erreur", "Réessayer", "Vérifier Logs", "Contact Admin"]
            .into_iter()
            .map(String::from)
            .collect(),
        correct_answer_index: 0,
        explanation: "Le service IA a rencontré un problème.".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_their_inputs() {
        assert!(translation_prompt("你好").contains("\"你好\""));

        let prompt = quiz_prompt("les couleurs", "HSK2");
        assert!(prompt.contains("\"les couleurs\""));
        assert!(prompt.contains("\"HSK2\""));
        assert!(prompt.starts_with("Génère 5 questions"));
    }

    #[test]
    fn schemas_require_every_field() {
        let t = translation_schema();
        assert_eq!(t["required"].as_array().unwrap().len(), 4);

        let q = quiz_schema();
        assert_eq!(q["type"], "ARRAY");
        assert_eq!(q["items"]["required"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn fallbacks_keep_the_output_shape() {
        let t = fallback_translation(FailureKind::RateLimited);
        assert_eq!(t.hanzi, "ERROR");
        assert_eq!(t.translation_fr, "System overloaded (429).");

        let quiz = fallback_quiz(&ModelError::EmptyResponse);
        assert_eq!(quiz.len(), 1);
        assert!(quiz[0].is_well_formed());
        assert!(quiz[0].question.starts_with("Erreur de génération: "));
    }
}
