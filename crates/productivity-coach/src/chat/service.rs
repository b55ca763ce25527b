use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::store::{SessionId, SessionStore, StoreError};
use crate::analysis::TextAnalyzer;
use crate::recommendations::Tier;
use crate::session::{AssessmentOutcome, AssessmentSession, SessionError, Stage, Step};

pub const GREETING: &str = "Hello! I'm here to help you understand your productivity patterns. \
Let's start with a few questions. Type 'start' or anything else to begin.";

pub const INVALID_CHOICE_WARNING: &str = "⚠️ Please enter a valid number from 1 to 4.";

/// Times `post` reloads a session after losing a write race.
pub const MAX_POST_ATTEMPTS: usize = 3;

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A questionnaire wizard plus the transcript shown to the user.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: SessionId,
    assessment: AssessmentSession,
    messages: Vec<ChatMessage>,
    revision: u64,
}

impl ChatSession {
    fn new(id: SessionId, analyzer: Arc<TextAnalyzer>) -> Self {
        Self {
            id,
            assessment: AssessmentSession::new(analyzer),
            messages: vec![ChatMessage::assistant(GREETING)],
            revision: 0,
        }
    }

    /// Bumped on every stored change; stores compare it before replacing.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stage(&self) -> Stage {
        self.assessment.stage()
    }

    pub fn view(&self) -> ChatSessionView {
        ChatSessionView {
            session_id: self.id.clone(),
            stage: self.stage().label(),
            messages: self.messages.clone(),
            outcome: self.assessment.outcome().cloned(),
        }
    }

    fn handle(&mut self, content: &str) -> Result<(), SessionError> {
        self.messages.push(ChatMessage::user(content));
        match self.assessment.respond(content) {
            Ok(Step::Ask(prompt)) => self.messages.push(ChatMessage::assistant(prompt.render())),
            Ok(Step::Completed) => {
                if let Some(outcome) = self.assessment.outcome() {
                    let results = render_results(outcome);
                    self.messages.push(ChatMessage::assistant(results));
                }
            }
            Err(SessionError::InvalidChoice(_)) => {
                self.messages
                    .push(ChatMessage::assistant(INVALID_CHOICE_WARNING));
            }
            Err(err @ SessionError::Finished) => {
                self.messages.pop();
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Serializable snapshot returned by the chat endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSessionView {
    pub session_id: SessionId,
    pub stage: &'static str,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AssessmentOutcome>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error("session {0} already finished; start over to take the assessment again")]
    Finished(SessionId),
    #[error("session {0} is busy; retry the message")]
    Busy(SessionId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service driving chat sessions stored behind a [`SessionStore`].
pub struct ChatService<S> {
    store: Arc<S>,
    analyzer: Arc<TextAnalyzer>,
}

impl<S> ChatService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, analyzer: Arc<TextAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    /// Open a new session holding only the greeting.
    pub fn start(&self) -> Result<ChatSessionView, ChatError> {
        let session = ChatSession::new(next_session_id(), self.analyzer.clone());
        let view = session.view();
        self.store.insert(session)?;
        info!(session_id = %view.session_id, "chat session started");
        Ok(view)
    }

    /// Record a user message and append the assistant's reply.
    pub fn post(&self, id: &SessionId, content: &str) -> Result<ChatSessionView, ChatError> {
        for attempt in 1..=MAX_POST_ATTEMPTS {
            let mut session = self.load(id)?;
            session
                .handle(content)
                .map_err(|_| ChatError::Finished(id.clone()))?;

            let expected = session.revision;
            session.revision += 1;
            let view = session.view();
            match self.store.update(session, expected) {
                Ok(()) => {
                    debug!(session_id = %id, stage = view.stage, "chat message handled");
                    return Ok(view);
                }
                Err(StoreError::Conflict) => {
                    debug!(session_id = %id, attempt, "session changed underneath, reloading");
                }
                Err(StoreError::NotFound) => return Err(ChatError::NotFound(id.clone())),
                Err(other) => return Err(other.into()),
            }
        }
        warn!(session_id = %id, attempts = MAX_POST_ATTEMPTS, "gave up on contended session");
        Err(ChatError::Busy(id.clone()))
    }

    pub fn get(&self, id: &SessionId) -> Result<ChatSessionView, ChatError> {
        self.load(id).map(|session| session.view())
    }

    /// Drop the session so the user can start over.
    pub fn reset(&self, id: &SessionId) -> Result<(), ChatError> {
        match self.store.remove(id) {
            Ok(()) => {
                info!(session_id = %id, "chat session reset");
                Ok(())
            }
            Err(StoreError::NotFound) => Err(ChatError::NotFound(id.clone())),
            Err(other) => Err(other.into()),
        }
    }

    fn load(&self, id: &SessionId) -> Result<ChatSession, ChatError> {
        self.store
            .fetch(id)?
            .ok_or_else(|| ChatError::NotFound(id.clone()))
    }
}

/// Final markdown message listing the profile and tips.
pub fn render_results(outcome: &AssessmentOutcome) -> String {
    let tags = &outcome.nlp_analysis.all_tags;
    let mut intro = format!(
        "Your results show you're in the **'{}'** category. ",
        outcome.profile
    );
    if tags.is_empty() {
        intro.push_str("You seem to have a solid foundation. Here are some general tips.");
    } else {
        let labels: Vec<&str> = tags.iter().map(|tag| tag.label()).collect();
        let _ = write!(
            intro,
            "We noticed patterns related to **{}**. Based on this, here are some personalized recommendations.",
            labels.join(", ")
        );
    }

    let mut text = format!(
        "Great, thank you! I've analyzed your responses. Here is your personalized productivity analysis:\n\n\
         ### 👤 Your Productivity Profile: {}\n\n*{intro}*",
        outcome.profile
    );

    for tier in [Tier::Basic, Tier::Premium] {
        let entries = outcome.recommendations.tier(tier);
        if entries.is_empty() {
            continue;
        }
        let _ = write!(text, "\n\n#### {} Recommendations", tier.label());
        for entry in entries {
            let _ = write!(text, "\n- {entry}");
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Store that lets queued competing writes land just before each update.
    #[derive(Default)]
    struct RacingStore {
        sessions: Mutex<HashMap<SessionId, ChatSession>>,
        competing: Mutex<Vec<String>>,
    }

    impl RacingStore {
        fn compete_with(&self, inputs: &[&str]) {
            let mut queue = self.competing.lock().expect("queue lock");
            queue.extend(inputs.iter().rev().map(|input| input.to_string()));
        }
    }

    impl SessionStore for RacingStore {
        fn insert(&self, session: ChatSession) -> Result<(), StoreError> {
            let mut sessions = self.sessions.lock().expect("store lock");
            sessions.insert(session.id.clone(), session);
            Ok(())
        }

        fn update(&self, session: ChatSession, expected_revision: u64) -> Result<(), StoreError> {
            let mut sessions = self.sessions.lock().expect("store lock");
            let stored = sessions.get_mut(&session.id).ok_or(StoreError::NotFound)?;
            if let Some(input) = self.competing.lock().expect("queue lock").pop() {
                stored.handle(&input).expect("competing write accepted");
                stored.revision += 1;
            }
            if stored.revision != expected_revision {
                return Err(StoreError::Conflict);
            }
            *stored = session;
            Ok(())
        }

        fn fetch(&self, id: &SessionId) -> Result<Option<ChatSession>, StoreError> {
            let sessions = self.sessions.lock().expect("store lock");
            Ok(sessions.get(id).cloned())
        }

        fn remove(&self, id: &SessionId) -> Result<(), StoreError> {
            let mut sessions = self.sessions.lock().expect("store lock");
            sessions.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
        }
    }

    fn service(store: &Arc<RacingStore>) -> ChatService<RacingStore> {
        ChatService::new(store.clone(), Arc::new(TextAnalyzer::default()))
    }

    fn recorded_choices(store: &RacingStore, id: &SessionId) -> Vec<u8> {
        let session = store.fetch(id).expect("fetch").expect("session stored");
        session
            .assessment
            .choices()
            .iter()
            .map(|recorded| recorded.choice.value())
            .collect()
    }

    #[test]
    fn concurrent_answers_are_both_kept() {
        let store = Arc::new(RacingStore::default());
        let service = service(&store);
        let id = service.start().expect("start").session_id;
        service.post(&id, "start").expect("begin");

        store.compete_with(&["2"]);
        let view = service.post(&id, "3").expect("retried post succeeds");

        assert_eq!(recorded_choices(&store, &id), vec![2, 3]);
        assert_eq!(view.stage, "multiple_choice");
        assert!(view.messages.iter().any(|message| message.content.starts_with("**Question 3/10:**")));
        let stored = store.fetch(&id).expect("fetch").expect("session stored");
        assert_eq!(stored.revision(), 3);
    }

    #[test]
    fn sustained_contention_reports_busy() {
        let store = Arc::new(RacingStore::default());
        let service = service(&store);
        let id = service.start().expect("start").session_id;
        service.post(&id, "start").expect("begin");

        store.compete_with(&["1"; MAX_POST_ATTEMPTS]);
        let err = service.post(&id, "4").expect_err("every attempt loses");

        assert!(matches!(err, ChatError::Busy(ref busy) if busy == &id));
        assert_eq!(recorded_choices(&store, &id), vec![1; MAX_POST_ATTEMPTS]);
    }
}
