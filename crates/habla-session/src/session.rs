use crate::prompt_cache::PromptCache;
use habla_core::{
    DrillEvent, GradedAnswer, RecognitionResult, SessionError, SessionSummary, WordCard,
};
use habla_grader::MatchRule;

/// What the caller should do after submitting one recognition result.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Interim hypothesis — display only, nothing was graded.
    Interim,
    /// The answer matched; the session advanced to the next card.
    Correct { rule: MatchRule },
    /// No match, attempts remain on the current card.
    TryAgain { attempts_left: u32 },
    /// Attempts exhausted; show the expected word and move on.
    Reveal { expected: String },
    /// All cards done.
    Finished(SessionSummary),
}

/// One learner's run through a deck of flashcards.
///
/// Grading is delegated to `habla-grader`; the session supplies the
/// alternative-hypothesis loop, attempt accounting, and the event stream
/// consumed by progress sinks.
pub struct DrillSession {
    session_id: String,
    cards: Vec<WordCard>,
    cursor: usize,
    attempts_on_card: u32,
    max_attempts: u32,
    use_alternatives: bool,
    words_correct: u32,
    attempts_total: u32,
    events: Vec<DrillEvent>,
}

impl DrillSession {
    pub fn new(
        session_id: &str,
        cards: Vec<WordCard>,
        max_attempts: u32,
        use_alternatives: bool,
    ) -> Result<Self, SessionError> {
        if cards.is_empty() {
            return Err(SessionError::EmptyDeck(session_id.to_string()));
        }
        Ok(Self {
            session_id: session_id.to_string(),
            cards,
            cursor: 0,
            attempts_on_card: 0,
            max_attempts: max_attempts.max(1),
            use_alternatives,
            words_correct: 0,
            attempts_total: 0,
            events: Vec::new(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The card currently being drilled, or `None` once the deck is done.
    pub fn current_card(&self) -> Option<&WordCard> {
        self.cards.get(self.cursor)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.cards.len()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            words_total: self.cards.len() as u32,
            words_correct: self.words_correct,
            attempts_total: self.attempts_total,
        }
    }

    /// Prompt audio for the current card, looked up in the caller's cache.
    pub fn prompt_audio<'a>(&self, cache: &'a PromptCache) -> Option<&'a [u8]> {
        self.current_card()
            .and_then(|card| card.audio_key.as_deref())
            .and_then(|key| cache.get(key))
    }

    /// Events accumulated since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<DrillEvent> {
        std::mem::take(&mut self.events)
    }

    /// Grade one recognition result against the current card.
    ///
    /// The final transcript is tried first, then each alternative hypothesis
    /// in recognizer order until one matches. Interim results are not graded.
    pub fn submit(&mut self, result: &RecognitionResult) -> Outcome {
        if self.is_finished() {
            return Outcome::Finished(self.summary());
        }
        if !result.is_final {
            return Outcome::Interim;
        }

        let card = &self.cards[self.cursor];
        let expected = card.word.clone();
        let expected_display = card.display_word();

        self.attempts_on_card += 1;
        self.attempts_total += 1;

        let mut hypotheses: Vec<&str> = vec![result.transcript.as_str()];
        if self.use_alternatives {
            hypotheses.extend(result.alternatives.iter().map(|s| s.as_str()));
        }

        let mut matched: Option<(&str, MatchRule)> = None;
        for hypothesis in hypotheses {
            let report = habla_grader::grade(hypothesis, &expected);
            if let Some(rule) = report.rule {
                matched = Some((hypothesis, rule));
                break;
            }
        }

        match matched {
            Some((spoken, rule)) => {
                tracing::debug!(
                    session_id = %self.session_id,
                    word = %expected,
                    rule = rule.label(),
                    "answer accepted"
                );
                self.words_correct += 1;
                self.push_graded(spoken, true, Some(rule), result.timestamp);
                self.advance();
                Outcome::Correct { rule }
            }
            None if self.attempts_on_card >= self.max_attempts => {
                tracing::debug!(
                    session_id = %self.session_id,
                    word = %expected,
                    "attempts exhausted, revealing answer"
                );
                self.push_graded(&result.transcript, false, None, result.timestamp);
                self.advance();
                Outcome::Reveal {
                    expected: expected_display,
                }
            }
            None => Outcome::TryAgain {
                attempts_left: self.max_attempts - self.attempts_on_card,
            },
        }
    }

    fn push_graded(&mut self, spoken: &str, correct: bool, rule: Option<MatchRule>, timestamp: f64) {
        let card = &self.cards[self.cursor];
        self.events.push(DrillEvent::Graded(GradedAnswer {
            session_id: self.session_id.clone(),
            word: card.word.clone(),
            spoken: spoken.to_string(),
            correct,
            rule: rule.map(|r| r.label().to_string()),
            attempt: self.attempts_on_card,
            timestamp,
        }));
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.attempts_on_card = 0;
        if self.is_finished() {
            self.events.push(DrillEvent::Summary(self.summary()));
        }
    }
}
