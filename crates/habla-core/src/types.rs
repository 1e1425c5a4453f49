use serde::Serialize;

/// One hypothesis set from a speech recognizer for a single utterance.
///
/// `transcript` is the best hypothesis; `alternatives` are tried in order by
/// the drill session until one matches. Interim (non-final) results are
/// surfaced for display only and are never graded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub transcript: String,
    pub alternatives: Vec<String>,
    pub source_id: String,
    pub timestamp: f64,
    pub is_final: bool,
}

/// A single flashcard: the Spanish word to elicit, plus prompt material.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCard {
    pub word: String,
    pub article: Option<String>,
    pub translation: String,
    pub audio_key: Option<String>,
}

impl WordCard {
    /// The word as shown on the card, article included when present.
    pub fn display_word(&self) -> String {
        match &self.article {
            Some(article) => format!("{} {}", article, self.word),
            None => self.word.clone(),
        }
    }
}

/// One graded answer within a drill session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedAnswer {
    pub session_id: String,
    pub word: String,
    pub spoken: String,
    pub correct: bool,
    /// Label of the grading rule that fired, when the answer matched.
    pub rule: Option<String>,
    pub attempt: u32,
    pub timestamp: f64,
}

/// A badge crossing, emitted once per badge per session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeAward {
    pub session_id: String,
    pub badge_id: String,
    pub badge_name: String,
    pub threshold: u32,
    pub timestamp: f64,
}

/// End-of-session totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub words_total: u32,
    pub words_correct: u32,
    pub attempts_total: u32,
}

/// Events routed from the drill loop to progress sinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DrillEvent {
    Graded(GradedAnswer),
    Badge(BadgeAward),
    Summary(SessionSummary),
}

impl DrillEvent {
    pub fn session_id(&self) -> &str {
        match self {
            DrillEvent::Graded(g) => &g.session_id,
            DrillEvent::Badge(b) => &b.session_id,
            DrillEvent::Summary(s) => &s.session_id,
        }
    }
}
