mod common;

use clarity_assistant::rehearsal::{
    NUDGE_FALLBACK, SIMULATION_FALLBACK, TherapyApproach, nudge_request,
    simulate_patient_response, simulation_request, therapy_nudge,
};
use common::{ScriptedProvider, patient};

#[test]
fn approach_parsing_falls_back_to_mindfulness() {
    assert_eq!(TherapyApproach::parse_lenient("CBT"), TherapyApproach::Cbt);
    assert_eq!(
        TherapyApproach::parse_lenient(" psychodynamic "),
        TherapyApproach::Psychodynamic
    );
    assert_eq!(
        TherapyApproach::parse_lenient("gestalt"),
        TherapyApproach::Mindfulness
    );
}

#[test]
fn simulation_prompt_describes_patient_and_approach() {
    let request = simulation_request(&patient(Vec::new()), "How was your week?", TherapyApproach::Cbt);
    assert_eq!(request.temperature, 0.7);
    assert_eq!(request.max_tokens, 300);
    assert!(request.system_prompt.contains("patient named Jordan Avery"));
    assert!(request.system_prompt.contains("34 years old, Non-binary"));
    assert!(request.system_prompt.contains("Cognitive Behavioral Therapy"));
    assert_eq!(request.messages[0].content, "How was your week?");
}

#[test]
fn nudge_focus_points_are_optional() {
    let without = nudge_request("I can't sleep.", TherapyApproach::Mindfulness, None);
    assert!(!without.system_prompt.contains("Focus areas"));
    assert!(without.system_prompt.contains("aligned with mindfulness therapy"));

    let blank = nudge_request("I can't sleep.", TherapyApproach::Mindfulness, Some("  "));
    assert!(!blank.system_prompt.contains("Focus areas"));

    let with = nudge_request("I can't sleep.", TherapyApproach::Cbt, Some("sleep hygiene"));
    assert!(with.system_prompt.ends_with("Focus areas for this session: sleep hygiene"));
    assert_eq!(with.max_tokens, 150);
    assert!(with.messages[0].content.contains("\"I can't sleep.\""));
}

#[tokio::test]
async fn failures_yield_fixed_replies() {
    let provider = ScriptedProvider::failing();
    let reply = simulate_patient_response(
        &provider,
        &patient(Vec::new()),
        "Hello",
        TherapyApproach::Psychodynamic,
    )
    .await;
    assert_eq!(reply, SIMULATION_FALLBACK);

    let nudge = therapy_nudge(&provider, "Hello", TherapyApproach::Cbt, None).await;
    assert_eq!(nudge, NUDGE_FALLBACK);
}

#[tokio::test]
async fn replies_pass_through() {
    let provider = ScriptedProvider::replying("Try asking what the worry predicts.");
    let nudge = therapy_nudge(&provider, "Hello", TherapyApproach::Cbt, Some("worry")).await;
    assert_eq!(nudge, "Try asking what the worry predicts.");
}
