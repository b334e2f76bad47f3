use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Priority;

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `role` is free text on purpose: anything but "teacher" registers a student.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub user_id: Uuid,
    pub content: String,
}

// -- Announcements --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAnnouncementRequest {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub priority: Priority,
}

// -- Schedule --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateScheduleItemRequest {
    pub user_id: Uuid,
    pub day: String,
    pub time: String,
    pub subject: String,
    pub room: String,
}

// -- Quiz results --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveQuizResultRequest {
    pub user_id: Uuid,
    pub score: u32,
    pub total: u32,
    pub topic: String,
}

// -- AI --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateQuizRequest {
    pub topic: String,
    pub difficulty: String,
}

// -- Errors --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
