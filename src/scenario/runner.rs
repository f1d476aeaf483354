//! Sequential scenario runner and the report it produces.

use super::{Expectation, Scenario, ScenarioContext, ScenarioError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed { reason: String },
    /// The documented defect reproduced: the correct-behavior check failed.
    KnownDefect { note: String, observed: String },
    /// A known-defect scenario passed; the service may have been fixed.
    UnexpectedPass { note: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "FAILED",
            Self::KnownDefect { .. } => "known defect",
            Self::UnexpectedPass { .. } => "unexpected pass",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed { reason } => Some(reason),
            Self::KnownDefect { note, .. } | Self::UnexpectedPass { note } => Some(note),
        }
    }

    fn classify(expectation: Expectation, result: Result<(), ScenarioError>) -> Self {
        match (expectation, result) {
            (Expectation::Pass, Ok(())) => Self::Passed,
            (Expectation::KnownDefect(note), Ok(())) => Self::UnexpectedPass {
                note: note.to_string(),
            },
            (Expectation::KnownDefect(note), Err(ScenarioError::Check(observed))) => {
                Self::KnownDefect {
                    note: note.to_string(),
                    observed,
                }
            }
            (_, Err(e)) => Self::Failed {
                reason: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub known_defects: usize,
    pub unexpected_passes: usize,
    /// Scenarios not run because `fail_fast` stopped the suite.
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub results: Vec<ScenarioResult>,
    pub summary: Summary,
}

impl Report {
    /// True when nothing failed; known defects and unexpected passes are tolerated.
    pub fn is_success(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn result(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub fail_fast: bool,
}

pub async fn run_scenario(ctx: &ScenarioContext, scenario: &Scenario) -> ScenarioResult {
    info!(scenario = scenario.name, "running scenario");
    let start = Instant::now();
    let result = scenario.execute(ctx).await;
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let outcome = Outcome::classify(scenario.expectation, result);
    match &outcome {
        Outcome::Failed { reason } => warn!(scenario = scenario.name, %reason, "scenario failed"),
        other => info!(scenario = scenario.name, outcome = other.label(), duration_ms, "scenario finished"),
    }

    ScenarioResult {
        name: scenario.name.to_string(),
        description: scenario.description.to_string(),
        outcome,
        duration_ms,
    }
}

pub async fn run_all(ctx: &ScenarioContext, scenarios: &[Scenario], options: RunOptions) -> Report {
    run_all_with(ctx, scenarios, options, |_| {}).await
}

/// Run scenarios one at a time, calling `on_start` before each.
pub async fn run_all_with<F>(
    ctx: &ScenarioContext,
    scenarios: &[Scenario],
    options: RunOptions,
    mut on_start: F,
) -> Report
where
    F: FnMut(&Scenario),
{
    let started_at = Utc::now();
    let mut results = Vec::with_capacity(scenarios.len());
    let mut summary = Summary {
        total: scenarios.len(),
        ..Summary::default()
    };

    for scenario in scenarios {
        on_start(scenario);
        let result = run_scenario(ctx, scenario).await;
        match result.outcome {
            Outcome::Passed => summary.passed += 1,
            Outcome::Failed { .. } => summary.failed += 1,
            Outcome::KnownDefect { .. } => summary.known_defects += 1,
            Outcome::UnexpectedPass { .. } => summary.unexpected_passes += 1,
        }
        let stop = options.fail_fast && result.outcome.is_failure();
        results.push(result);
        if stop {
            break;
        }
    }
    summary.skipped = summary.total - results.len();

    Report {
        run_id: Uuid::new_v4(),
        started_at,
        base_url: ctx.client.base_url().to_string(),
        results,
        summary,
    }
}
