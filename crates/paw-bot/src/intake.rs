//! Intake State Machine: one submission assembled across several turns.
//!
//! ```text
//! awaiting_location --location--> awaiting_description --text--> awaiting_schedule
//! awaiting_schedule --text--> awaiting_photo --image | skip word--> complete
//!                         \-> complete (photo step off)
//! ```
//!
//! Transitions are pure. A rejected turn leaves the session exactly as it was;
//! the dispatcher owns the session map and the commit.

use chrono::{DateTime, Utc};

use paw_config::IntakeConfig;
use paw_core::entities::PointDraft;
use paw_core::enums::IntakeStage;
use paw_core::errors::CoreError;
use paw_core::geo::Coordinate;
use paw_core::policy::{Identity, UserId};
use paw_core::responses::Prompt;
use paw_core::turns::Turn;

/// Deployment knobs for the intake flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeRules {
    pub photo_step: bool,
    pub skip_words: Vec<String>,
    pub max_text_len: usize,
}

impl IntakeRules {
    /// Whether `text` skips the photo stage. Trimmed, case-insensitive.
    #[must_use]
    pub fn is_skip_word(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        self.skip_words.iter().any(|w| w.trim().to_lowercase() == text)
    }

    /// Trim `text` and enforce the non-empty and length limits.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the trimmed text is empty or longer
    /// than `max_text_len` characters.
    pub fn check_text(&self, field: &str, text: &str) -> Result<String, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::Validation(format!("{field} must not be empty")));
        }
        let len = text.chars().count();
        if len > self.max_text_len {
            return Err(CoreError::Validation(format!(
                "{field} is {len} characters, the limit is {}",
                self.max_text_len
            )));
        }
        Ok(text.to_string())
    }
}

impl Default for IntakeRules {
    fn default() -> Self {
        Self::from(&IntakeConfig::default())
    }
}

impl From<&IntakeConfig> for IntakeRules {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            photo_step: config.photo_step,
            skip_words: config.skip_words.clone(),
            max_text_len: config.max_text_len,
        }
    }
}

/// What the user is asked for while a stage is live.
#[must_use]
pub const fn prompt_for(stage: IntakeStage) -> Prompt {
    match stage {
        IntakeStage::AwaitingLocation | IntakeStage::Complete => Prompt::ShareLocation,
        IntakeStage::AwaitingDescription => Prompt::Description,
        IntakeStage::AwaitingSchedule => Prompt::Schedule,
        IntakeStage::AwaitingPhoto => Prompt::Photo,
    }
}

/// Result of an accepted turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The stage advanced and the session waits for `Prompt`.
    Next(Prompt),
    /// Every field is collected; the session is ready to commit.
    Complete,
}

/// Per-user scratch state for a submission in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeSession {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub stage: IntakeStage,
    pub coordinate: Option<Coordinate>,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub photo_ref: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl IntakeSession {
    #[must_use]
    pub fn start(from: &Identity) -> Self {
        Self {
            user_id: from.user_id,
            display_name: from.display_name.clone(),
            stage: IntakeStage::AwaitingLocation,
            coordinate: None,
            description: None,
            schedule: None,
            photo_ref: None,
            started_at: Utc::now(),
        }
    }

    /// Whole seconds since the submission was started.
    #[must_use]
    pub fn elapsed_secs(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// The prompt for the current stage.
    #[must_use]
    pub const fn prompt(&self) -> Prompt {
        prompt_for(self.stage)
    }

    /// Feed one turn to the current stage.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the turn kind does not match the
    /// stage or its value is invalid. The session is not modified.
    pub fn advance(&mut self, turn: &Turn, rules: &IntakeRules) -> Result<Step, CoreError> {
        match (self.stage, turn) {
            (IntakeStage::AwaitingLocation, Turn::Location { lat, lon }) => {
                self.coordinate = Some(Coordinate::new(*lat, *lon)?);
                Ok(self.enter(IntakeStage::AwaitingDescription))
            }
            (IntakeStage::AwaitingDescription, Turn::Text { text }) => {
                self.description = Some(rules.check_text("description", text)?);
                Ok(self.enter(IntakeStage::AwaitingSchedule))
            }
            (IntakeStage::AwaitingSchedule, Turn::Text { text }) => {
                self.schedule = Some(rules.check_text("schedule", text)?);
                if rules.photo_step {
                    Ok(self.enter(IntakeStage::AwaitingPhoto))
                } else {
                    Ok(self.enter(IntakeStage::Complete))
                }
            }
            (IntakeStage::AwaitingPhoto, Turn::Image { photo_ref }) => {
                let photo_ref = photo_ref.trim();
                if photo_ref.is_empty() {
                    return Err(CoreError::Validation("photo reference is empty".into()));
                }
                self.photo_ref = Some(photo_ref.to_string());
                Ok(self.enter(IntakeStage::Complete))
            }
            (IntakeStage::AwaitingPhoto, Turn::Text { text }) if rules.is_skip_word(text) => {
                Ok(self.enter(IntakeStage::Complete))
            }
            (IntakeStage::AwaitingPhoto, Turn::Text { .. }) => Err(CoreError::Validation(
                format!("send a photo or one of: {}", rules.skip_words.join(", ")),
            )),
            (IntakeStage::Complete, _) => Err(CoreError::Validation(
                "submission is already complete".into(),
            )),
            (stage, turn) => Err(CoreError::Validation(format!(
                "expected a {} turn, got {}",
                stage
                    .expected_turn()
                    .map_or("different", |kind| kind.as_str()),
                turn.kind()
            ))),
        }
    }

    fn enter(&mut self, next: IntakeStage) -> Step {
        tracing::debug!(
            user_id = self.user_id,
            from = %self.stage,
            to = %next,
            "intake stage transition"
        );
        self.stage = next;
        if next == IntakeStage::Complete {
            Step::Complete
        } else {
            Step::Next(prompt_for(next))
        }
    }

    /// Turn a complete session into a draft for the store.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the session has not reached
    /// `Complete`.
    pub fn into_draft(self) -> Result<PointDraft, CoreError> {
        let (IntakeStage::Complete, Some(coordinate), Some(description), Some(schedule)) =
            (self.stage, self.coordinate, self.description, self.schedule)
        else {
            return Err(CoreError::Validation(format!(
                "submission for user {} is incomplete",
                self.user_id
            )));
        };
        Ok(PointDraft {
            owner_id: self.user_id,
            owner_display_name: self.display_name,
            coordinate,
            description,
            schedule,
            photo_ref: self.photo_ref,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn session() -> IntakeSession {
        IntakeSession::start(&Identity::new(7, Some("ayse".into())))
    }

    fn location() -> Turn {
        Turn::Location {
            lat: 38.487,
            lon: 27.132,
        }
    }

    fn text(s: &str) -> Turn {
        Turn::Text { text: s.into() }
    }

    fn image(r: &str) -> Turn {
        Turn::Image {
            photo_ref: r.into(),
        }
    }

    fn session_at(stage: IntakeStage) -> IntakeSession {
        let rules = IntakeRules::default();
        let mut s = session();
        let script = [location(), text("Park entrance"), text("daily 18:00")];
        for turn in &script {
            if s.stage == stage {
                break;
            }
            s.advance(turn, &rules).unwrap();
        }
        assert_eq!(s.stage, stage);
        s
    }

    #[test]
    fn full_flow_with_photo() {
        let rules = IntakeRules::default();
        let mut s = session();

        assert_eq!(
            s.advance(&location(), &rules).unwrap(),
            Step::Next(Prompt::Description)
        );
        assert_eq!(
            s.advance(&text("  Park entrance "), &rules).unwrap(),
            Step::Next(Prompt::Schedule)
        );
        assert_eq!(
            s.advance(&text("daily 18:00"), &rules).unwrap(),
            Step::Next(Prompt::Photo)
        );
        assert_eq!(s.advance(&image("file-42"), &rules).unwrap(), Step::Complete);

        let draft = s.into_draft().unwrap();
        assert_eq!(draft.owner_id, 7);
        assert_eq!(draft.owner_display_name.as_deref(), Some("ayse"));
        assert_eq!(draft.description, "Park entrance");
        assert_eq!(draft.schedule, "daily 18:00");
        assert_eq!(draft.photo_ref.as_deref(), Some("file-42"));
    }

    #[rstest]
    #[case("skip")]
    #[case(" SKIP ")]
    #[case("geç")]
    #[case("-")]
    fn skip_words_complete_without_photo(#[case] word: &str) {
        let rules = IntakeRules::default();
        let mut s = session_at(IntakeStage::AwaitingPhoto);
        assert_eq!(s.advance(&text(word), &rules).unwrap(), Step::Complete);
        assert_eq!(s.into_draft().unwrap().photo_ref, None);
    }

    #[test]
    fn other_text_at_photo_stage_is_rejected() {
        let rules = IntakeRules::default();
        let mut s = session_at(IntakeStage::AwaitingPhoto);
        let before = s.clone();
        assert!(matches!(
            s.advance(&text("here is my photo"), &rules),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(s, before);
    }

    #[test]
    fn photo_step_off_completes_at_schedule() {
        let rules = IntakeRules {
            photo_step: false,
            ..IntakeRules::default()
        };
        let mut s = session();
        s.advance(&location(), &rules).unwrap();
        s.advance(&text("Park entrance"), &rules).unwrap();
        assert_eq!(s.advance(&text("daily 18:00"), &rules).unwrap(), Step::Complete);
        assert_eq!(s.stage, IntakeStage::Complete);
    }

    #[rstest]
    #[case(IntakeStage::AwaitingLocation, text("hello"))]
    #[case(IntakeStage::AwaitingLocation, image("file-1"))]
    #[case(IntakeStage::AwaitingDescription, location())]
    #[case(IntakeStage::AwaitingDescription, image("file-1"))]
    #[case(IntakeStage::AwaitingSchedule, location())]
    #[case(IntakeStage::AwaitingPhoto, location())]
    fn mismatched_turns_keep_stage_and_data(#[case] stage: IntakeStage, #[case] turn: Turn) {
        let rules = IntakeRules::default();
        let mut s = session_at(stage);
        let before = s.clone();
        assert!(matches!(
            s.advance(&turn, &rules),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(s, before);
    }

    #[rstest]
    #[case(95.0, 27.0)]
    #[case(38.0, -181.0)]
    #[case(f64::NAN, 0.0)]
    fn invalid_coordinates_are_rejected(#[case] lat: f64, #[case] lon: f64) {
        let rules = IntakeRules::default();
        let mut s = session();
        assert!(s.advance(&Turn::Location { lat, lon }, &rules).is_err());
        assert_eq!(s.stage, IntakeStage::AwaitingLocation);
        assert_eq!(s.coordinate, None);
    }

    #[test]
    fn blank_and_oversized_text_is_rejected() {
        let rules = IntakeRules {
            max_text_len: 10,
            ..IntakeRules::default()
        };
        let mut s = session();
        s.advance(&location(), &rules).unwrap();
        assert!(s.advance(&text("   "), &rules).is_err());
        assert!(s.advance(&text("a description that is too long"), &rules).is_err());
        assert_eq!(s.stage, IntakeStage::AwaitingDescription);
        assert_eq!(s.advance(&text("short"), &rules).unwrap(), Step::Next(Prompt::Schedule));
    }

    #[test]
    fn elapsed_counts_from_start() {
        let mut s = session();
        assert!(s.elapsed_secs() < 5);
        s.started_at -= chrono::TimeDelta::seconds(90);
        assert!(s.elapsed_secs() >= 90);
    }

    #[test]
    fn incomplete_session_has_no_draft() {
        let s = session_at(IntakeStage::AwaitingSchedule);
        assert!(matches!(s.into_draft(), Err(CoreError::Validation(_))));
    }
}
