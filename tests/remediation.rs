mod common;

use common::{candidate, Behavior, Fakes};
use interview_gate::remediation::{DialogState, RemediationDialog};
use interview_gate::types::RequirementStatus;
use interview_gate::ValidationResult;

fn stale_dialog(auto_close: bool) -> RemediationDialog {
    RemediationDialog::opened_with(
        ValidationResult::from_status(RequirementStatus::new(true, false, true, true)),
        auto_close,
    )
}

#[tokio::test]
async fn test_retry_that_now_passes_closes_dialog() {
    let fakes = Fakes::all_met();
    let validator = fakes.validator();
    let mut dialog = stale_dialog(true);

    let fresh = dialog
        .retry(&validator, Some(&candidate("linkedin.com/in/ana")))
        .await;
    assert!(fresh.is_valid());
    assert_eq!(dialog.state(), DialogState::Closed);
    assert_eq!(dialog.progress().completed, 4);
}

#[tokio::test]
async fn test_retry_keeps_dialog_open_without_auto_close() {
    let fakes = Fakes::all_met();
    let validator = fakes.validator();
    let mut dialog = stale_dialog(false);

    dialog
        .retry(&validator, Some(&candidate("linkedin.com/in/ana")))
        .await;
    assert_eq!(dialog.state(), DialogState::Open);
    assert_eq!(dialog.headline().0, "Requisitos Atendidos!");

    dialog.close();
    assert!(!dialog.is_open());
}

#[tokio::test]
async fn test_retry_with_remaining_gaps_shows_fresh_result() {
    let fakes = Fakes::new(
        Behavior::Answer(true),
        Behavior::Fail,
        Behavior::Answer(true),
    );
    let validator = fakes.validator();
    let mut dialog = stale_dialog(true);

    let fresh = dialog.retry(&validator, Some(&candidate(""))).await;
    assert_eq!(
        fresh.missing_requirements(),
        ["Completar teste DISC", "Preencher perfil do LinkedIn"]
    );
    assert_eq!(dialog.state(), DialogState::Open);
    assert_eq!(fakes.disc.calls(), 1);

    let routes: Vec<_> = dialog
        .items()
        .into_iter()
        .filter_map(|item| item.action.map(|a| a.route))
        .collect();
    assert_eq!(routes, ["/teste-disc", "/profile"]);
}
