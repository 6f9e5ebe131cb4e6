use super::*;

use crate::test_support::{sample_prediction, CallCounts, ScriptedApi, BASE_FEEDBACK_TOTAL};

fn draft(accepted: Option<Acceptance>, final_score: f64) -> FeedbackDraft {
    FeedbackDraft {
        accepted,
        user_feedback: "walk helped".into(),
        final_score,
    }
}

fn orchestrator(api: &Arc<ScriptedApi>) -> FeedbackOrchestrator {
    FeedbackOrchestrator::new(Arc::clone(api) as Arc<dyn DashboardApi>)
}

#[test]
fn record_copies_prediction_identity_and_draft() {
    let prediction = sample_prediction();
    let record = draft(Some(Acceptance::Yes), 80.0)
        .to_record(Some(&prediction))
        .expect("record");

    assert_eq!(record.user_id, "user-42");
    assert_eq!(record.predicted_productivity_score, 73.5);
    assert_eq!(record.accepted, Acceptance::Yes);
    assert_eq!(record.user_feedback, "walk helped");
    assert_eq!(record.final_score, 80.0);
}

#[test]
fn gate_requires_prediction_acceptance_and_positive_score() {
    let prediction = sample_prediction();

    assert_eq!(
        draft(Some(Acceptance::Yes), 80.0).to_record(None),
        Err(FeedbackGateError::NoPrediction)
    );
    assert_eq!(
        draft(None, 80.0).to_record(Some(&prediction)),
        Err(FeedbackGateError::MissingAcceptance)
    );
    assert_eq!(
        draft(Some(Acceptance::Yes), 0.0).to_record(Some(&prediction)),
        Err(FeedbackGateError::NonPositiveFinalScore(0.0))
    );
    assert_eq!(
        draft(Some(Acceptance::No), 101.0).to_record(Some(&prediction)),
        Err(FeedbackGateError::FinalScoreOutOfRange(101.0))
    );
    assert!(draft(Some(Acceptance::Neutral), f64::NAN)
        .to_record(Some(&prediction))
        .is_err());
    assert!(draft(Some(Acceptance::Neutral), 1.0)
        .to_record(Some(&prediction))
        .is_ok());
}

#[tokio::test]
async fn submit_refreshes_stats_exactly_once() {
    let api = ScriptedApi::healthy().into_arc();
    let feedback = orchestrator(&api);
    let before = feedback.refresh_stats().await.expect("initial stats");

    let record = draft(Some(Acceptance::Yes), 90.0)
        .to_record(Some(&sample_prediction()))
        .expect("record");
    let outcome = feedback.submit(&record).await.expect("submit");

    assert_eq!(CallCounts::get(&api.calls.submit), 1);
    assert_eq!(CallCounts::get(&api.calls.stats), 2);
    assert_eq!(before.total_feedback, BASE_FEEDBACK_TOTAL);
    assert_eq!(outcome.stats.total_feedback, before.total_feedback + 1);
    assert_eq!(outcome.stats.accepted_count, 1);
    assert_eq!(api.submitted().await, vec![record]);
}

#[tokio::test]
async fn failed_post_skips_stats_refresh() {
    let api = ScriptedApi::healthy().failing_submit().into_arc();
    let record = draft(Some(Acceptance::No), 40.0)
        .to_record(Some(&sample_prediction()))
        .expect("record");

    let err = orchestrator(&api).submit(&record).await.expect_err("must fail");

    assert_eq!(err.message(), "final_score out of range");
    assert_eq!(CallCounts::get(&api.calls.stats), 0);
}

#[tokio::test]
async fn stats_failure_after_post_fails_the_submission() {
    let api = ScriptedApi::healthy().failing_stats().into_arc();
    let record = draft(Some(Acceptance::Neutral), 55.0)
        .to_record(Some(&sample_prediction()))
        .expect("record");

    let err = orchestrator(&api).submit(&record).await.expect_err("must fail");

    assert_eq!(err.status(), Some(500));
    assert_eq!(CallCounts::get(&api.calls.submit), 1);
    assert_eq!(CallCounts::get(&api.calls.stats), 1);
}

#[test]
fn panel_discards_draft_only_on_success() {
    let mut panel = FeedbackPanel {
        draft: draft(Some(Acceptance::Yes), 70.0),
        ..FeedbackPanel::default()
    };

    panel.begin();
    assert!(panel.submitting);
    panel.fail("Failed to submit feedback");
    assert!(!panel.submitting);
    assert_eq!(panel.draft, draft(Some(Acceptance::Yes), 70.0));

    panel.begin();
    assert_eq!(panel.error, None);
    panel.submitted();
    assert_eq!(panel.draft, FeedbackDraft::default());
    assert_eq!(panel.notice.as_deref(), Some(FEEDBACK_SUBMITTED));
}
