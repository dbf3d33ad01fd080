use std::path::PathBuf;

use ascend_core::storage::BlobStore;
use ascend_core::{
    Confidence, Database, EvidenceInput, MockKind, MockScore, StudyPhase, StudyReflection, Subject,
};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use super::common;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SubjectArg {
    Quant,
    Reasoning,
    English,
    Gk,
}

impl From<SubjectArg> for Subject {
    fn from(arg: SubjectArg) -> Self {
        match arg {
            SubjectArg::Quant => Subject::Quant,
            SubjectArg::Reasoning => Subject::Reasoning,
            SubjectArg::English => Subject::English,
            SubjectArg::Gk => Subject::Gk,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PhaseArg {
    Learning,
    Revision,
    MockAnalysis,
}

impl From<PhaseArg> for StudyPhase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Learning => StudyPhase::Learning,
            PhaseArg::Revision => StudyPhase::Revision,
            PhaseArg::MockAnalysis => StudyPhase::MockAnalysis,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MockKindArg {
    Sectional,
    Full,
}

impl From<MockKindArg> for MockKind {
    fn from(arg: MockKindArg) -> Self {
        match arg {
            MockKindArg::Sectional => MockKind::Sectional,
            MockKindArg::Full => MockKind::Full,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfidenceArg {
    VeryWeak,
    Weak,
    Medium,
    Strong,
}

impl From<ConfidenceArg> for Confidence {
    fn from(arg: ConfidenceArg) -> Self {
        match arg {
            ConfidenceArg::VeryWeak => Confidence::VeryWeak,
            ConfidenceArg::Weak => Confidence::Weak,
            ConfidenceArg::Medium => Confidence::Medium,
            ConfidenceArg::Strong => Confidence::Strong,
        }
    }
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a study session
    StartStudy {
        #[arg(long)]
        subject: SubjectArg,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        phase: PhaseArg,
        /// Seed for the evidence-audit draw (reproducible runs)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Start a mock test session
    StartMock {
        #[arg(long)]
        kind: MockKindArg,
        #[arg(long)]
        subject: SubjectArg,
        /// Mock paper or series name
        #[arg(long)]
        source: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Stop the timer and move to the evidence step
    Stop,
    /// Attach evidence: a photo/screenshot file or an affirmation text
    Evidence {
        #[arg(long, conflicts_with_all = ["screenshot", "affirmation"])]
        photo: Option<PathBuf>,
        #[arg(long, conflicts_with = "affirmation")]
        screenshot: Option<PathBuf>,
        #[arg(long)]
        affirmation: Option<String>,
    },
    /// Finalize the active study session with a reflection
    FinishStudy {
        #[arg(long)]
        notes: String,
        /// 1..=5 difficulty self-rating
        #[arg(long)]
        difficulty: u8,
        #[arg(long, default_value = "")]
        mistakes: String,
        #[arg(long)]
        revision_needed: bool,
        #[arg(long)]
        confidence: ConfidenceArg,
    },
    /// Finalize the active mock session with its score
    FinishMock {
        #[arg(long)]
        score: f64,
        #[arg(long)]
        total: u32,
        #[arg(long)]
        correct: u32,
        #[arg(long, default_value = "")]
        analysis: String,
    },
    /// Abandon the active session (failure penalty applies)
    Cancel,
    /// Print the active session state as JSON
    Status,
}

/// Live view of the active session.
#[derive(Serialize)]
struct SessionStatus<'a> {
    session: &'a ascend_core::Session,
    elapsed_secs: u64,
    max_time_reached: bool,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let now = common::now_ms();

    match action {
        SessionAction::StartStudy {
            subject,
            topic,
            phase,
            seed,
        } => {
            let mut rng = common::make_rng(seed);
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            let session =
                profile.start_study(subject.into(), topic, phase.into(), now, &mut rng)?;
            println!("{}", serde_json::to_string_pretty(session)?);
            common::save_profile(&db, &profile)?;
        }
        SessionAction::StartMock {
            kind,
            subject,
            source,
            seed,
        } => {
            let mut rng = common::make_rng(seed);
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            let session =
                profile.start_mock(kind.into(), subject.into(), source, now, &mut rng)?;
            println!("{}", serde_json::to_string_pretty(session)?);
            common::save_profile(&db, &profile)?;
        }
        SessionAction::Stop => {
            let mut rng = common::make_rng(None);
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            let duration = profile.stop_session(now)?;
            println!("{{\"duration_min\": {duration}}}");
            common::save_profile(&db, &profile)?;
        }
        SessionAction::Evidence {
            photo,
            screenshot,
            affirmation,
        } => {
            let mut rng = common::make_rng(None);
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            let session_id = profile
                .active_session
                .as_ref()
                .map(|s| s.id)
                .unwrap_or_default();

            // Persist the blob first; attach only once the store has
            // confirmed the reference.
            let input = if let Some(path) = photo {
                let bytes = std::fs::read(path)?;
                let image_id = db.put(&bytes, session_id, "photo", now)?;
                EvidenceInput::Photo { image_id }
            } else if let Some(path) = screenshot {
                let bytes = std::fs::read(path)?;
                let image_id = db.put(&bytes, session_id, "screenshot", now)?;
                EvidenceInput::Screenshot { image_id }
            } else if let Some(text) = affirmation {
                EvidenceInput::Affirmation { text }
            } else {
                return Err("provide --photo, --screenshot, or --affirmation".into());
            };

            profile.attach_evidence(input, now)?;
            println!("{{\"evidence\": \"attached\"}}");
            common::save_profile(&db, &profile)?;
        }
        SessionAction::FinishStudy {
            notes,
            difficulty,
            mistakes,
            revision_needed,
            confidence,
        } => {
            let mut rng = common::make_rng(None);
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            let result = profile.finalize_study(
                StudyReflection {
                    notes,
                    difficulty,
                    mistakes,
                    revision_needed,
                    confidence: confidence.into(),
                },
                now,
            );
            // The minimum-time failure path mutates state; persist either way.
            common::save_profile(&db, &profile)?;
            let summary = result?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        SessionAction::FinishMock {
            score,
            total,
            correct,
            analysis,
        } => {
            let mut rng = common::make_rng(None);
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            let result = profile.finalize_mock(
                MockScore {
                    score,
                    total_questions: total,
                    correct,
                    analysis,
                },
                now,
            );
            common::save_profile(&db, &profile)?;
            let summary = result?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        SessionAction::Cancel => {
            let mut rng = common::make_rng(None);
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            let summary = profile.cancel_session()?;
            common::save_profile(&db, &profile)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        SessionAction::Status => {
            let mut rng = common::make_rng(None);
            let (profile, _) = common::load_profile(&db, now, &mut rng)?;
            match &profile.active_session {
                Some(session) => {
                    let status = SessionStatus {
                        session,
                        elapsed_secs: session.elapsed_secs(now),
                        max_time_reached: session.max_time_reached(now),
                    };
                    println!("{}", serde_json::to_string_pretty(&status)?);
                }
                None => println!("{{\"session\": null}}"),
            }
        }
    }

    Ok(())
}
