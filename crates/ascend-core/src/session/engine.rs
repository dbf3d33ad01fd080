//! Session lifecycle engine.
//!
//! Operates on wall-clock timestamps injected by the caller -- no internal
//! clock reads. Evidence confirmation is an explicit suspension point: the
//! `EvidencePending` stage persists independently, and finalize only
//! proceeds once a confirmed evidence reference is attached.
//!
//! ## Transitions
//!
//! ```text
//! Idle -> Active -> EvidencePending -> (study) ReflectionPending -> Finalized
//!                                   -> (mock)                    -> Finalized
//! Active | EvidencePending | ReflectionPending -> Failed (cancel)
//! ```
//!
//! Finalize is also where the minimum-time rule fires: a too-short session
//! registers a failure penalty and is discarded.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    EvidenceInput, EvidenceKind, EvidenceRecord, MockKind, MockScore, Session, SessionKind,
    SessionStage, StudyPhase, StudyReflection, Subject, EVIDENCE_AUDIT_CHANCE,
    MIN_AFFIRMATION_CHARS, MIN_NOTES_CHARS, MIN_STUDY_MINUTES,
};
use crate::error::{CoreError, Result, SessionError, ValidationError};
use crate::policy::{FailureReason, FailureSummary};
use crate::profile::{ProfileState, Protection, ProtectionKind};
use crate::progression::{tables, Rank};
use crate::quest;
use crate::session::SessionRecord;

/// Result of a successful finalize, for display by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeSummary {
    pub xp_earned: u64,
    pub gold_earned: u64,
    pub duration_min: u64,
    /// Credited quest reward, when this session completed today's quest.
    #[serde(default)]
    pub quest_bonus: Option<u64>,
    /// Protection granted by a mock finalize.
    #[serde(default)]
    pub protection_granted: Option<ProtectionKind>,
    pub level: u32,
    pub rank: Rank,
    pub study_streak: u32,
}

impl ProfileState {
    /// Begin a study session. Fails with `SessionInProgress` when a session
    /// is already in flight -- callers must finish or cancel it first.
    ///
    /// The random source decides whether this session is flagged for a
    /// mandatory photo audit.
    pub fn start_study(
        &mut self,
        subject: Subject,
        topic: String,
        phase: StudyPhase,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Result<&Session> {
        self.start_session(
            SessionKind::Study {
                subject,
                topic,
                phase,
            },
            now_ms,
            rng,
        )
    }

    /// Begin a mock session. Same exclusivity rule as [`start_study`].
    ///
    /// [`start_study`]: ProfileState::start_study
    pub fn start_mock(
        &mut self,
        kind: MockKind,
        subject: Subject,
        source: String,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Result<&Session> {
        self.start_session(
            SessionKind::Mock {
                kind,
                subject,
                source,
            },
            now_ms,
            rng,
        )
    }

    fn start_session(
        &mut self,
        kind: SessionKind,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Result<&Session> {
        if let Some(existing) = &self.active_session {
            return Err(SessionError::SessionInProgress {
                started_at: existing.start_time,
            }
            .into());
        }

        let session = Session {
            id: now_ms,
            kind,
            start_time: now_ms,
            stage: SessionStage::Active,
            duration_min: None,
            evidence: None,
            audit_required: rng.gen_bool(EVIDENCE_AUDIT_CHANCE),
        };
        Ok(self.active_session.insert(session))
    }

    /// Stop the timer: `Active -> EvidencePending`, fixing the capped
    /// duration. Returns the counted minutes.
    pub fn stop_session(&mut self, now_ms: i64) -> Result<u64> {
        let session = self
            .active_session
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        if session.stage != SessionStage::Active {
            return Err(SessionError::InvalidStage {
                expected: SessionStage::Active.as_str(),
                actual: session.stage.as_str(),
            }
            .into());
        }
        let duration = session.capped_duration_min(now_ms);
        session.duration_min = Some(duration);
        session.stage = SessionStage::EvidencePending;
        Ok(duration)
    }

    /// Attach confirmed evidence: `EvidencePending -> ReflectionPending`
    /// for study sessions; mocks stay in `EvidencePending`, ready for
    /// [`finalize_mock`].
    ///
    /// Affirmation evidence is validated here (length, weekly allowance,
    /// audit flag, study-only) and rejected without touching state.
    ///
    /// [`finalize_mock`]: ProfileState::finalize_mock
    pub fn attach_evidence(&mut self, input: EvidenceInput, now_ms: i64) -> Result<()> {
        let (is_study, audit_required, stage) = {
            let session = self
                .active_session
                .as_ref()
                .ok_or(SessionError::NoActiveSession)?;
            (
                session.kind.is_study(),
                session.audit_required,
                session.stage,
            )
        };
        if stage != SessionStage::EvidencePending {
            return Err(SessionError::InvalidStage {
                expected: SessionStage::EvidencePending.as_str(),
                actual: stage.as_str(),
            }
            .into());
        }

        let record = match input {
            EvidenceInput::Photo { image_id } => EvidenceRecord {
                kind: EvidenceKind::Photo,
                image_id: Some(image_id),
                affirmation: None,
                attached_at: now_ms,
            },
            EvidenceInput::Screenshot { image_id } => EvidenceRecord {
                kind: EvidenceKind::Screenshot,
                image_id: Some(image_id),
                affirmation: None,
                attached_at: now_ms,
            },
            EvidenceInput::Affirmation { text } => {
                if !is_study || audit_required {
                    return Err(ValidationError::PhotoEvidenceRequired.into());
                }
                let len = text.chars().count();
                if len < MIN_AFFIRMATION_CHARS {
                    return Err(ValidationError::AffirmationTooShort {
                        min: MIN_AFFIRMATION_CHARS,
                        len,
                    }
                    .into());
                }
                if !self.can_use_affirmation(now_ms) {
                    return Err(ValidationError::AffirmationLimitReached {
                        limit: super::MAX_AFFIRMATIONS_PER_WEEK,
                    }
                    .into());
                }
                EvidenceRecord {
                    kind: EvidenceKind::Affirmation,
                    image_id: None,
                    affirmation: Some(text),
                    attached_at: now_ms,
                }
            }
        };

        let session = self
            .active_session
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        session.evidence = Some(record);
        if is_study {
            session.stage = SessionStage::ReflectionPending;
        }
        Ok(())
    }

    /// Finalize the active study session.
    ///
    /// A duration under the study minimum registers a failure, discards
    /// the session, and surfaces `MinimumTimeNotMet` -- the one error path
    /// that mutates state. Validation errors leave everything untouched.
    pub fn finalize_study(
        &mut self,
        reflection: StudyReflection,
        now_ms: i64,
    ) -> Result<FinalizeSummary> {
        let (subject, phase, evidence, duration) = {
            let session = self
                .active_session
                .as_ref()
                .ok_or(SessionError::NoActiveSession)?;
            let (subject, phase) = match &session.kind {
                SessionKind::Study { subject, phase, .. } => (*subject, *phase),
                SessionKind::Mock { .. } => {
                    return Err(SessionError::WrongKind {
                        expected: "study",
                        actual: "mock",
                    }
                    .into())
                }
            };
            if session.stage != SessionStage::ReflectionPending {
                return Err(SessionError::InvalidStage {
                    expected: SessionStage::ReflectionPending.as_str(),
                    actual: session.stage.as_str(),
                }
                .into());
            }
            let evidence = session
                .evidence
                .clone()
                .ok_or(SessionError::EvidenceMissing)?;
            (subject, phase, evidence, session.duration_min.unwrap_or(0))
        };

        let notes_len = reflection.notes.chars().count();
        if notes_len < MIN_NOTES_CHARS {
            return Err(ValidationError::NotesTooShort {
                min: MIN_NOTES_CHARS,
                len: notes_len,
            }
            .into());
        }

        if duration < MIN_STUDY_MINUTES {
            self.register_failure(FailureReason::MinimumTime);
            self.active_session = None;
            return Err(SessionError::MinimumTimeNotMet {
                required_min: MIN_STUDY_MINUTES,
                actual_min: duration,
            }
            .into());
        }

        if evidence.kind == EvidenceKind::Affirmation {
            self.weekly_affirmations += 1;
        }

        let raw_xp = tables::study_xp(duration, phase, self.level);
        let credited = self.add_xp(raw_xp);
        let gold = tables::gold_reward(credited, evidence.kind);
        self.add_gold(gold);

        self.total_study_minutes += duration;
        self.total_sessions += 1;
        self.skills.add(subject, credited);
        self.habits.daily_study += 1;
        if phase == StudyPhase::Revision {
            self.habits.daily_revision += 1;
        }

        self.update_study_streak(now_ms);
        self.clear_failure_streak();

        let quest_bonus = quest::check_completion(self, subject, phase, now_ms);

        let session = self
            .active_session
            .take()
            .ok_or(SessionError::NoActiveSession)?;
        self.push_history(SessionRecord {
            id: session.id,
            kind: session.kind,
            started_at: session.start_time,
            completed_at: now_ms,
            duration_min: duration,
            evidence_kind: Some(evidence.kind),
            image_id: evidence.image_id,
            notes: Some(reflection.notes),
            difficulty: Some(reflection.difficulty),
            mistakes: Some(reflection.mistakes),
            revision_needed: Some(reflection.revision_needed),
            confidence: Some(reflection.confidence),
            score: None,
            total_questions: None,
            correct: None,
            analysis: None,
            xp_earned: credited,
            gold_earned: gold,
        });

        Ok(FinalizeSummary {
            xp_earned: credited,
            gold_earned: gold,
            duration_min: duration,
            quest_bonus,
            protection_granted: None,
            level: self.level,
            rank: self.rank(),
            study_streak: self.study_streak,
        })
    }

    /// Finalize the active mock session.
    ///
    /// Requires confirmed evidence. A duration under the mock-kind minimum
    /// follows the same failure-and-discard path as study sessions. Success
    /// grants a 24-hour protection window -- `full` for full mocks,
    /// `partial` for sectionals (same window length; intended policy).
    pub fn finalize_mock(&mut self, score: MockScore, now_ms: i64) -> Result<FinalizeSummary> {
        let (kind, evidence, duration) = {
            let session = self
                .active_session
                .as_ref()
                .ok_or(SessionError::NoActiveSession)?;
            let kind = match &session.kind {
                SessionKind::Mock { kind, .. } => *kind,
                SessionKind::Study { .. } => {
                    return Err(SessionError::WrongKind {
                        expected: "mock",
                        actual: "study",
                    }
                    .into())
                }
            };
            if session.stage != SessionStage::EvidencePending {
                return Err(SessionError::InvalidStage {
                    expected: SessionStage::EvidencePending.as_str(),
                    actual: session.stage.as_str(),
                }
                .into());
            }
            let evidence = session
                .evidence
                .clone()
                .ok_or(SessionError::EvidenceMissing)?;
            (kind, evidence, session.duration_min.unwrap_or(0))
        };

        let required = kind.min_minutes();
        if duration < required {
            self.register_failure(FailureReason::MinimumTime);
            self.active_session = None;
            return Err(SessionError::MinimumTimeNotMet {
                required_min: required,
                actual_min: duration,
            }
            .into());
        }

        let raw_xp = tables::mock_xp(kind, self.level);
        let credited = self.add_xp(raw_xp);
        let gold = tables::gold_reward(credited, evidence.kind);
        self.add_gold(gold);

        let granted = match kind {
            MockKind::Full => ProtectionKind::Full,
            MockKind::Sectional => ProtectionKind::Partial,
        };
        self.protection = Protection::grant(granted, now_ms);

        self.last_mock_date = Some(now_ms);
        self.total_mocks += 1;
        self.habits.weekly_mock += 1;

        self.clear_failure_streak();

        let session = self
            .active_session
            .take()
            .ok_or(SessionError::NoActiveSession)?;
        self.push_history(SessionRecord {
            id: session.id,
            kind: session.kind,
            started_at: session.start_time,
            completed_at: now_ms,
            duration_min: duration,
            evidence_kind: Some(evidence.kind),
            image_id: evidence.image_id,
            notes: None,
            difficulty: None,
            mistakes: None,
            revision_needed: None,
            confidence: None,
            score: Some(score.score),
            total_questions: Some(score.total_questions),
            correct: Some(score.correct),
            analysis: Some(score.analysis),
            xp_earned: credited,
            gold_earned: gold,
        });

        Ok(FinalizeSummary {
            xp_earned: credited,
            gold_earned: gold,
            duration_min: duration,
            quest_bonus: None,
            protection_granted: Some(granted),
            level: self.level,
            rank: self.rank(),
            study_streak: self.study_streak,
        })
    }

    /// Abandon the active session from any live stage. Terminal: the
    /// failure penalty applies and the session is discarded, regardless of
    /// any evidence already attached.
    pub fn cancel_session(&mut self) -> Result<FailureSummary> {
        if self.active_session.is_none() {
            return Err(CoreError::Session(SessionError::NoActiveSession));
        }
        let summary = self.register_failure(FailureReason::Cancelled);
        self.active_session = None;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Confidence;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn ms(d: u32, h: u32, mi: u32) -> i64 {
        Utc.with_ymd_and_hms(2026, 3, d, h, mi, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn rng() -> Mcg128Xsl64 {
        // Seed chosen so the audit draw stays false for the draws below.
        Mcg128Xsl64::seed_from_u64(1)
    }

    fn reflection() -> StudyReflection {
        StudyReflection {
            notes: "Worked through ratio shortcuts and timed two exercise sets.".into(),
            difficulty: 3,
            mistakes: "Misread two ratio statements".into(),
            revision_needed: false,
            confidence: Confidence::Medium,
        }
    }

    fn start_study(p: &mut ProfileState, at: i64) {
        p.start_study(
            Subject::Quant,
            "ratios".into(),
            StudyPhase::Learning,
            at,
            &mut rng(),
        )
        .unwrap();
        p.active_session.as_mut().unwrap().audit_required = false;
    }

    #[test]
    fn only_one_session_at_a_time() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        start_study(&mut p, ms(2, 9, 0));
        let err = p
            .start_mock(
                MockKind::Full,
                Subject::Quant,
                "series".into(),
                ms(2, 9, 5),
                &mut rng(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Session(SessionError::SessionInProgress { .. })
        ));
    }

    #[test]
    fn full_study_flow_credits_xp_gold_streak() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        start_study(&mut p, ms(2, 9, 0));
        let duration = p.stop_session(ms(2, 10, 0)).unwrap();
        assert_eq!(duration, 60);
        p.attach_evidence(EvidenceInput::Photo { image_id: 11 }, ms(2, 10, 1))
            .unwrap();
        let summary = p.finalize_study(reflection(), ms(2, 10, 2)).unwrap();
        // 60 min learning at level 1: 20 XP, 2 gold.
        assert_eq!(summary.xp_earned, 20);
        assert_eq!(summary.gold_earned, 2);
        assert_eq!(summary.study_streak, 1);
        assert_eq!(p.skills.quant, 20);
        assert_eq!(p.total_study_minutes, 60);
        assert_eq!(p.session_history.len(), 1);
        assert!(p.active_session.is_none());
        assert_eq!(p.failure_streak, 0);
    }

    #[test]
    fn short_study_fails_with_penalty_and_discard() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        p.add_xp(150);
        let xp_before = p.xp;
        start_study(&mut p, ms(2, 9, 0));
        p.stop_session(ms(2, 9, 15)).unwrap();
        p.attach_evidence(EvidenceInput::Photo { image_id: 1 }, ms(2, 9, 15))
            .unwrap();
        let err = p.finalize_study(reflection(), ms(2, 9, 16)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Session(SessionError::MinimumTimeNotMet {
                required_min: 20,
                actual_min: 15,
            })
        ));
        assert_eq!(p.failure_streak, 1);
        assert_eq!(p.xp, xp_before - 40);
        assert!(p.active_session.is_none());
        assert!(p.session_history.is_empty());
    }

    #[test]
    fn short_notes_are_rejected_without_side_effects() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        start_study(&mut p, ms(2, 9, 0));
        p.stop_session(ms(2, 10, 0)).unwrap();
        p.attach_evidence(EvidenceInput::Photo { image_id: 1 }, ms(2, 10, 0))
            .unwrap();
        let short = StudyReflection {
            notes: "too short".into(),
            ..reflection()
        };
        let err = p.finalize_study(short, ms(2, 10, 1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotesTooShort { .. })
        ));
        // Session still live, no penalty: the caller re-prompts.
        assert!(p.active_session.is_some());
        assert_eq!(p.failure_streak, 0);
    }

    #[test]
    fn affirmation_rules_enforced_at_attach() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        start_study(&mut p, ms(2, 9, 0));
        p.stop_session(ms(2, 10, 0)).unwrap();

        let too_short = p.attach_evidence(
            EvidenceInput::Affirmation {
                text: "did the work".into(),
            },
            ms(2, 10, 0),
        );
        assert!(matches!(
            too_short.unwrap_err(),
            CoreError::Validation(ValidationError::AffirmationTooShort { .. })
        ));

        p.weekly_affirmations = 3;
        let capped = p.attach_evidence(
            EvidenceInput::Affirmation {
                text: "I completed a focused hour on quant ratios and reviewed my notes.".into(),
            },
            ms(2, 10, 0),
        );
        assert!(matches!(
            capped.unwrap_err(),
            CoreError::Validation(ValidationError::AffirmationLimitReached { limit: 3 })
        ));

        p.weekly_affirmations = 0;
        p.active_session.as_mut().unwrap().audit_required = true;
        let audited = p.attach_evidence(
            EvidenceInput::Affirmation {
                text: "I completed a focused hour on quant ratios and reviewed my notes.".into(),
            },
            ms(2, 10, 0),
        );
        assert!(matches!(
            audited.unwrap_err(),
            CoreError::Validation(ValidationError::PhotoEvidenceRequired)
        ));

        // Session untouched through all three rejections.
        assert_eq!(
            p.active_session.as_ref().unwrap().stage,
            SessionStage::EvidencePending
        );
    }

    #[test]
    fn affirmation_evidence_halves_gold_and_counts_usage() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        p.level = 4; // 1.1 multiplier
        start_study(&mut p, ms(2, 9, 0));
        p.stop_session(ms(2, 11, 0)).unwrap();
        p.attach_evidence(
            EvidenceInput::Affirmation {
                text: "Two full hours on percentage problems with every mistake written up."
                    .into(),
            },
            ms(2, 11, 0),
        )
        .unwrap();
        let summary = p.finalize_study(reflection(), ms(2, 11, 1)).unwrap();
        // 120 min learning at level 4: floor(2 * 20 * 1.1) = 44 XP, gold 4/2 = 2.
        assert_eq!(summary.xp_earned, 44);
        assert_eq!(summary.gold_earned, 2);
        assert_eq!(p.weekly_affirmations, 1);
    }

    #[test]
    fn mock_flow_grants_protection() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        p.start_mock(
            MockKind::Full,
            Subject::Reasoning,
            "mock series 2".into(),
            ms(2, 9, 0),
            &mut rng(),
        )
        .unwrap();
        p.stop_session(ms(2, 10, 5)).unwrap();
        p.attach_evidence(EvidenceInput::Screenshot { image_id: 7 }, ms(2, 10, 6))
            .unwrap();
        let summary = p
            .finalize_mock(
                MockScore {
                    score: 61.5,
                    total_questions: 100,
                    correct: 61,
                    analysis: "Weak on puzzles, strong on series.".into(),
                },
                ms(2, 10, 7),
            )
            .unwrap();
        assert_eq!(summary.xp_earned, 75);
        assert_eq!(summary.protection_granted, Some(ProtectionKind::Full));
        assert!(p.protection.active);
        assert_eq!(p.protection.kind, Some(ProtectionKind::Full));
        assert_eq!(
            p.protection.expires_at,
            Some(ms(2, 10, 7) + Protection::WINDOW_MS)
        );
        assert_eq!(p.total_mocks, 1);
        assert_eq!(p.last_mock_date, Some(ms(2, 10, 7)));
        // Mock success does not advance the study streak.
        assert_eq!(p.study_streak, 0);
    }

    #[test]
    fn sectional_mock_grants_partial_protection() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        p.start_mock(
            MockKind::Sectional,
            Subject::English,
            "topic test".into(),
            ms(2, 9, 0),
            &mut rng(),
        )
        .unwrap();
        p.stop_session(ms(2, 9, 20)).unwrap();
        p.attach_evidence(EvidenceInput::Screenshot { image_id: 3 }, ms(2, 9, 21))
            .unwrap();
        let summary = p
            .finalize_mock(
                MockScore {
                    score: 18.0,
                    total_questions: 25,
                    correct: 18,
                    analysis: "Solid grammar section.".into(),
                },
                ms(2, 9, 22),
            )
            .unwrap();
        assert_eq!(summary.protection_granted, Some(ProtectionKind::Partial));
    }

    #[test]
    fn short_mock_takes_the_failure_path() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        p.start_mock(
            MockKind::Full,
            Subject::Quant,
            "mock".into(),
            ms(2, 9, 0),
            &mut rng(),
        )
        .unwrap();
        p.stop_session(ms(2, 9, 45)).unwrap();
        p.attach_evidence(EvidenceInput::Screenshot { image_id: 4 }, ms(2, 9, 45))
            .unwrap();
        let err = p
            .finalize_mock(
                MockScore {
                    score: 0.0,
                    total_questions: 100,
                    correct: 0,
                    analysis: String::new(),
                },
                ms(2, 9, 46),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Session(SessionError::MinimumTimeNotMet {
                required_min: 60,
                ..
            })
        ));
        assert_eq!(p.failure_streak, 1);
        assert!(p.active_session.is_none());
    }

    #[test]
    fn cancel_is_terminal_from_any_stage() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        start_study(&mut p, ms(2, 9, 0));
        p.stop_session(ms(2, 10, 0)).unwrap();
        p.attach_evidence(EvidenceInput::Photo { image_id: 9 }, ms(2, 10, 0))
            .unwrap();
        let summary = p.cancel_session().unwrap();
        assert_eq!(summary.reason, FailureReason::Cancelled);
        assert_eq!(p.failure_streak, 1);
        assert!(p.active_session.is_none());
    }

    #[test]
    fn finalize_requires_the_right_stage() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        start_study(&mut p, ms(2, 9, 0));
        // Still Active: no evidence step yet.
        let err = p.finalize_study(reflection(), ms(2, 10, 0)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Session(SessionError::InvalidStage { .. })
        ));
        // Evidence before stop is also out of order.
        let err = p
            .attach_evidence(EvidenceInput::Photo { image_id: 2 }, ms(2, 10, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Session(SessionError::InvalidStage { .. })
        ));
    }

    #[test]
    fn study_finalize_completes_matching_quest() {
        let mut p = ProfileState::new(ms(2, 9, 0));
        p.daily_quest = Some(crate::profile::DailyQuest {
            date: "2026-03-02".into(),
            subject: Subject::Quant,
            phase: StudyPhase::Learning,
            xp: 30,
            completed: false,
        });
        start_study(&mut p, ms(2, 9, 0));
        p.stop_session(ms(2, 10, 0)).unwrap();
        p.attach_evidence(EvidenceInput::Photo { image_id: 5 }, ms(2, 10, 0))
            .unwrap();
        let summary = p.finalize_study(reflection(), ms(2, 10, 1)).unwrap();
        assert_eq!(summary.quest_bonus, Some(30));
        // Session XP plus quest reward, quest XP not in skills.
        assert_eq!(p.xp, 50);
        assert_eq!(p.skills.quant, 20);
    }
}
