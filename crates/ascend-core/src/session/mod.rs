//! Study and mock session types.
//!
//! A session is transient state owned by `ProfileState::active_session`
//! until it is finalized into a `SessionRecord` or discarded by a failure.
//! The lifecycle engine lives in [`engine`](self::engine).

pub mod engine;

use serde::{Deserialize, Serialize};

use crate::calendar;

/// Hard ceiling on a single session's counted duration.
pub const MAX_SESSION_MINUTES: u64 = 120;
/// Minimum duration for a study session to count.
pub const MIN_STUDY_MINUTES: u64 = 20;
/// Minimum duration for a sectional mock to count.
pub const MIN_SECTIONAL_MOCK_MINUTES: u64 = 18;
/// Minimum duration for a full mock to count.
pub const MIN_FULL_MOCK_MINUTES: u64 = 60;

/// Minimum reflection-notes length.
pub const MIN_NOTES_CHARS: usize = 30;
/// Minimum affirmation-evidence length.
pub const MIN_AFFIRMATION_CHARS: usize = 50;
/// Affirmation evidence allowance per week.
pub const MAX_AFFIRMATIONS_PER_WEEK: u32 = 3;
/// Probability that a session is flagged for a mandatory photo audit.
pub const EVIDENCE_AUDIT_CHANCE: f64 = 0.125;

/// The four tracked subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Quant,
    Reasoning,
    English,
    Gk,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::Quant,
        Subject::Reasoning,
        Subject::English,
        Subject::Gk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Quant => "quant",
            Subject::Reasoning => "reasoning",
            Subject::English => "english",
            Subject::Gk => "gk",
        }
    }
}

/// Study phase; determines the base XP rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyPhase {
    Learning,
    Revision,
    MockAnalysis,
}

impl StudyPhase {
    pub const ALL: [StudyPhase; 3] = [
        StudyPhase::Learning,
        StudyPhase::Revision,
        StudyPhase::MockAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyPhase::Learning => "learning",
            StudyPhase::Revision => "revision",
            StudyPhase::MockAnalysis => "mock-analysis",
        }
    }
}

/// Mock test variant; determines base XP and the minimum duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockKind {
    Sectional,
    Full,
}

impl MockKind {
    pub fn min_minutes(&self) -> u64 {
        match self {
            MockKind::Sectional => MIN_SECTIONAL_MOCK_MINUTES,
            MockKind::Full => MIN_FULL_MOCK_MINUTES,
        }
    }
}

/// Proof-of-work category attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Photo,
    Screenshot,
    Affirmation,
}

/// Self-reported confidence in a finished study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Confidence {
    VeryWeak,
    Weak,
    Medium,
    Strong,
}

impl Confidence {
    /// Weak self-reports drag the readiness index down.
    pub fn is_weak(&self) -> bool {
        matches!(self, Confidence::VeryWeak | Confidence::Weak)
    }
}

/// What kind of work a session tracks, with its kind-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SessionKind {
    Study {
        subject: Subject,
        topic: String,
        phase: StudyPhase,
    },
    Mock {
        kind: MockKind,
        subject: Subject,
        source: String,
    },
}

impl SessionKind {
    pub fn is_study(&self) -> bool {
        matches!(self, SessionKind::Study { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Study { .. } => "study",
            SessionKind::Mock { .. } => "mock",
        }
    }
}

/// Lifecycle stage of an in-flight session.
///
/// ```text
/// Active -> EvidencePending -> (study) ReflectionPending -> finalized
///                           -> (mock)                     -> finalized
/// any live stage -> cancelled (failure)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    /// Timer running.
    Active,
    /// Timer stopped; waiting for the evidence store to confirm a reference.
    EvidencePending,
    /// Evidence confirmed; waiting for the reflection form (study only).
    ReflectionPending,
}

impl SessionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStage::Active => "active",
            SessionStage::EvidencePending => "evidence_pending",
            SessionStage::ReflectionPending => "reflection_pending",
        }
    }
}

/// Confirmed evidence reference. `image_id` is an opaque blob-store key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub kind: EvidenceKind,
    #[serde(default)]
    pub image_id: Option<i64>,
    #[serde(default)]
    pub affirmation: Option<String>,
    pub attached_at: i64,
}

/// Evidence input before the store has been consulted.
#[derive(Debug, Clone)]
pub enum EvidenceInput {
    Photo { image_id: i64 },
    Screenshot { image_id: i64 },
    Affirmation { text: String },
}

/// An in-flight session. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Creation timestamp doubles as the session id.
    pub id: i64,
    pub kind: SessionKind,
    pub start_time: i64,
    pub stage: SessionStage,
    /// Fixed (capped) duration, set when the timer stops.
    #[serde(default)]
    pub duration_min: Option<u64>,
    #[serde(default)]
    pub evidence: Option<EvidenceRecord>,
    /// Random audit draw: affirmation evidence is rejected when set.
    #[serde(default)]
    pub audit_required: bool,
}

impl Session {
    /// Uncapped elapsed seconds, for live display.
    pub fn elapsed_secs(&self, now_ms: i64) -> u64 {
        ((now_ms - self.start_time).max(0) / 1000) as u64
    }

    /// True once the capped duration threshold has been reached.
    pub fn max_time_reached(&self, now_ms: i64) -> bool {
        self.elapsed_secs(now_ms) >= MAX_SESSION_MINUTES * 60
    }

    /// Whole minutes since start, capped at [`MAX_SESSION_MINUTES`].
    pub fn capped_duration_min(&self, now_ms: i64) -> u64 {
        let minutes = ((now_ms - self.start_time).max(0) / 60_000) as u64;
        minutes.min(MAX_SESSION_MINUTES)
    }
}

/// Reflection form submitted when finalizing a study session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyReflection {
    pub notes: String,
    /// 1..=5 self-rating.
    pub difficulty: u8,
    pub mistakes: String,
    pub revision_needed: bool,
    pub confidence: Confidence,
}

/// Score form submitted when finalizing a mock session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockScore {
    pub score: f64,
    pub total_questions: u32,
    pub correct: u32,
    pub analysis: String,
}

/// A finalized session, as retained in history (most-recent-first, capped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub kind: SessionKind,
    pub started_at: i64,
    pub completed_at: i64,
    pub duration_min: u64,
    #[serde(default)]
    pub evidence_kind: Option<EvidenceKind>,
    #[serde(default)]
    pub image_id: Option<i64>,
    // Study reflection fields.
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub mistakes: Option<String>,
    #[serde(default)]
    pub revision_needed: Option<bool>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    // Mock score fields.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub total_questions: Option<u32>,
    #[serde(default)]
    pub correct: Option<u32>,
    #[serde(default)]
    pub analysis: Option<String>,
    pub xp_earned: u64,
    pub gold_earned: u64,
}

impl SessionRecord {
    pub fn is_study(&self) -> bool {
        self.kind.is_study()
    }

    /// Date key of the completion day.
    pub fn completed_day(&self) -> String {
        calendar::date_key(self.completed_at)
    }
}
