//! Conversation session: chat history plus the specification it produced.

use std::time::SystemTime;

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    llm::ChatMessage,
    services::spec_format::yaml_to_json,
    state::language::Language,
};

/// Whether a completion is currently running for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No turn running.
    #[default]
    Idle,
    /// A completion is in flight.
    Generating,
}

/// Rejections raised by session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A turn is already in flight.
    #[error("a specification is already being generated for this session")]
    Busy,
    /// The user message has no content.
    #[error("message content must not be empty")]
    EmptyMessage,
    /// Imported content is not a YAML document.
    #[error("imported file is not valid YAML: {0}")]
    InvalidYaml(String),
}

/// Everything needed to run one generation turn outside the session lock.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// Full conversation including the new user message.
    pub history: Vec<ChatMessage>,
    /// Specification being edited, if any.
    pub current_spec: Option<String>,
    /// Language requested for the reply.
    pub language: Language,
    /// Revision the turn started from; stale results are dropped.
    pub revision: u64,
}

/// In-memory conversation owned by one designer.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub language: Language,
    /// User messages and assistant explanations, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Current YAML document; empty until generated or imported.
    pub specification: String,
    /// Last turn failure, cleared by the next turn or import.
    pub error: Option<String>,
    pub status: SessionStatus,
    /// Bumped on clear so late results are discarded.
    pub revision: u64,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

impl Session {
    /// Start an empty session.
    pub fn new(language: Language) -> Self {
        let now = SystemTime::now();
        Self {
            id: Uuid::new_v4(),
            language,
            messages: Vec::new(),
            specification: String::new(),
            error: None,
            status: SessionStatus::Idle,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the user's message and hand back what the generator needs.
    ///
    /// The specification in effect when the turn starts is sent as context.
    pub fn begin_turn(&mut self, content: String) -> Result<TurnRequest, SessionError> {
        if self.status == SessionStatus::Generating {
            return Err(SessionError::Busy);
        }
        if content.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        self.messages.push(ChatMessage::user(content));
        self.error = None;
        self.status = SessionStatus::Generating;
        self.touch();

        Ok(TurnRequest {
            history: self.messages.clone(),
            current_spec: self.current_specification().map(str::to_owned),
            language: self.language,
            revision: self.revision,
        })
    }

    /// Apply the outcome of a turn started at `revision`.
    ///
    /// Returns `false` when the session was cleared meanwhile and the outcome was dropped.
    /// On failure the previous specification is kept and the error is stored verbatim.
    pub fn finish_turn(&mut self, revision: u64, outcome: Result<TurnOutput, String>) -> bool {
        if revision != self.revision {
            return false;
        }

        match outcome {
            Ok(output) => {
                self.specification = output.specification;
                self.messages.push(ChatMessage::assistant(output.explanation));
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        self.status = SessionStatus::Idle;
        self.touch();
        true
    }

    /// Replace the specification with an imported YAML document.
    pub fn import(&mut self, content: &str) -> Result<(), SessionError> {
        if self.status == SessionStatus::Generating {
            return Err(SessionError::Busy);
        }

        let normalized = normalize_line_endings(content);
        match yaml_to_json(&normalized) {
            Ok(Value::Null) => return Err(SessionError::InvalidYaml("document is empty".into())),
            Ok(_) => {}
            Err(err) => return Err(SessionError::InvalidYaml(err.to_string())),
        }

        self.specification = normalized;
        self.error = None;
        self.touch();
        Ok(())
    }

    /// Drop history, specification and error; in-flight turns become stale.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.specification.clear();
        self.error = None;
        self.status = SessionStatus::Idle;
        self.revision += 1;
        self.touch();
    }

    /// Switch the language used by subsequent turns.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.touch();
    }

    /// Current specification, if any was generated or imported.
    pub fn current_specification(&self) -> Option<&str> {
        Some(self.specification.as_str()).filter(|spec| !spec.trim().is_empty())
    }

    fn touch(&mut self) {
        self.updated_at = SystemTime::now();
    }
}

/// Successful turn result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutput {
    /// YAML specification.
    pub specification: String,
    /// Assistant explanation appended to the history.
    pub explanation: String,
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatRole;

    const PETSTORE_YAML: &str = "openapi: 3.0.0\ninfo:\n  title: Pets\n  version: 1.0.0\npaths: {}\n";

    fn output(spec: &str, explanation: &str) -> TurnOutput {
        TurnOutput {
            specification: spec.into(),
            explanation: explanation.into(),
        }
    }

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = Session::new(Language::Zh);
        assert_eq!(session.status, SessionStatus::Idle);
        assert!(session.messages.is_empty());
        assert!(session.current_specification().is_none());
        assert_eq!(session.language, Language::Zh);
    }

    #[test]
    fn successful_turn_updates_spec_and_history() {
        let mut session = Session::new(Language::En);

        let turn = session.begin_turn("A pet store".into()).unwrap();
        assert_eq!(turn.history, vec![ChatMessage::user("A pet store")]);
        assert!(turn.current_spec.is_none());
        assert_eq!(session.status, SessionStatus::Generating);

        assert!(session.finish_turn(turn.revision, Ok(output(PETSTORE_YAML, "Created pets"))));
        assert_eq!(session.specification, PETSTORE_YAML);
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[1].role, ChatRole::Assistant);
        assert_eq!(session.messages[1].content, "Created pets");
        assert_eq!(session.status, SessionStatus::Idle);
    }

    #[test]
    fn follow_up_turn_sends_current_spec() {
        let mut session = Session::new(Language::En);
        let turn = session.begin_turn("A pet store".into()).unwrap();
        session.finish_turn(turn.revision, Ok(output(PETSTORE_YAML, "Created pets")));

        let turn = session.begin_turn("Add owners".into()).unwrap();
        assert_eq!(turn.current_spec.as_deref(), Some(PETSTORE_YAML));
        assert_eq!(turn.history.len(), 3);
    }

    #[test]
    fn concurrent_turn_is_rejected() {
        let mut session = Session::new(Language::En);
        session.begin_turn("first".into()).unwrap();

        assert_eq!(session.begin_turn("second".into()).unwrap_err(), SessionError::Busy);
        assert_eq!(session.messages.len(), 1);
    }

    #[test]
    fn empty_message_is_rejected_without_side_effects() {
        let mut session = Session::new(Language::En);
        assert_eq!(
            session.begin_turn("   ".into()).unwrap_err(),
            SessionError::EmptyMessage
        );
        assert!(session.messages.is_empty());
        assert_eq!(session.status, SessionStatus::Idle);
    }

    #[test]
    fn failed_turn_keeps_previous_spec_and_records_error() {
        let mut session = Session::new(Language::En);
        session.import(PETSTORE_YAML).unwrap();

        let turn = session.begin_turn("Break it".into()).unwrap();
        session.finish_turn(turn.revision, Err("Invalid response format".into()));

        assert_eq!(session.specification, PETSTORE_YAML);
        assert_eq!(session.error.as_deref(), Some("Invalid response format"));
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.status, SessionStatus::Idle);

        let turn = session.begin_turn("Try again".into()).unwrap();
        assert!(session.error.is_none());
        assert_eq!(turn.history.len(), 2);
    }

    #[test]
    fn clearing_drops_in_flight_results() {
        let mut session = Session::new(Language::En);
        let turn = session.begin_turn("A pet store".into()).unwrap();

        session.clear();
        assert_eq!(session.revision, 1);
        assert!(!session.finish_turn(turn.revision, Ok(output(PETSTORE_YAML, "late"))));
        assert!(session.messages.is_empty());
        assert!(session.specification.is_empty());
        assert_eq!(session.status, SessionStatus::Idle);
    }

    #[test]
    fn import_round_trips_content() {
        let mut session = Session::new(Language::En);
        session.import(PETSTORE_YAML).unwrap();
        assert_eq!(session.current_specification(), Some(PETSTORE_YAML));
    }

    #[test]
    fn import_normalizes_windows_line_endings() {
        let mut session = Session::new(Language::En);
        session.import(&PETSTORE_YAML.replace('\n', "\r\n")).unwrap();
        assert_eq!(session.specification, PETSTORE_YAML);
    }

    #[test]
    fn import_rejects_invalid_yaml_and_busy_sessions() {
        let mut session = Session::new(Language::En);
        assert!(matches!(
            session.import("openapi: [3.0.0"),
            Err(SessionError::InvalidYaml(_))
        ));

        session.begin_turn("A pet store".into()).unwrap();
        assert_eq!(session.import(PETSTORE_YAML).unwrap_err(), SessionError::Busy);
    }

    #[test]
    fn import_rejects_empty_documents() {
        let mut session = Session::new(Language::En);
        session.import(PETSTORE_YAML).unwrap();

        for content in ["", "   \n", "# nothing here yet\n"] {
            assert_eq!(
                session.import(content).unwrap_err(),
                SessionError::InvalidYaml("document is empty".into())
            );
        }
        assert_eq!(session.current_specification(), Some(PETSTORE_YAML));
    }
}
