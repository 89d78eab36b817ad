//! Tests for the chat, ask and profile command handlers.
#![cfg(feature = "cli")]

mod common;

use common::{input_verdict, output_verdict, Harness};
use tripguard::agent::Speaker;
use tripguard::cli::session::{handle_ask, handle_chat, handle_profile, EXIT_BLOCKED, EXIT_REPLY};
use tripguard::profile::ProfileContext;

#[tokio::test]
async fn ask_prints_reply_and_exits_zero() {
    let h = Harness::new();
    h.guardrail.queue_response(&input_verdict(false, "ok"));
    h.main.queue_response("Peach flies to Seoul for $95.");
    h.guardrail.queue_response(&output_verdict(false, "ok"));

    let mut out = Vec::new();
    let code = handle_ask(&h.orchestrator, "Cheapest flight to Seoul?", &mut out)
        .await
        .unwrap();

    assert_eq!(code, EXIT_REPLY);
    assert_eq!(String::from_utf8(out).unwrap(), "Peach flies to Seoul for $95.\n");
}

#[tokio::test]
async fn ask_blocked_exits_two() {
    let h = Harness::new();
    h.guardrail.queue_response(&input_verdict(true, "Not a travel request."));

    let mut out = Vec::new();
    let code = handle_ask(&h.orchestrator, "Write me a poem", &mut out)
        .await
        .unwrap();

    assert_eq!(code, EXIT_BLOCKED);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Request Blocked: Not a travel request.\n"
    );
}

#[test]
fn profile_lists_the_traveller() {
    let mut out = Vec::new();
    handle_profile(&ProfileContext::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Traveller profile:"));
    assert!(text.contains("Mark Willson"));
}

#[tokio::test]
async fn chat_keeps_a_transcript_until_quit() {
    let h = Harness::new();
    h.guardrail.queue_response(&input_verdict(false, "ok"));
    h.main.queue_response("Thai Airways flies to Bangkok for $170.");
    h.guardrail.queue_response(&output_verdict(false, "ok"));
    h.guardrail.queue_response(&input_verdict(true, "Not a travel request."));

    let input: &[u8] = b"Flights to Bangkok?\n\n/profile\nTell me a joke\n/quit\nnever read\n";
    let mut out = Vec::new();
    let transcript = handle_chat(&h.orchestrator, input, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Agent: Thai Airways flies to Bangkok for $170."));
    assert!(text.contains("Departure city: Tokyo"));
    assert!(text.contains("Agent: Request Blocked: Not a travel request."));

    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript.entries()[2].speaker, Speaker::User);
    assert_eq!(transcript.entries()[2].text, "Tell me a joke");
    assert_eq!(h.main.calls(), 1);
}

#[tokio::test]
async fn chat_reset_clears_history() {
    let h = Harness::new();
    h.guardrail.queue_response(&input_verdict(false, "ok"));
    h.main.queue_response("Hotels in Seoul start at $110.");
    h.guardrail.queue_response(&output_verdict(false, "ok"));

    let input: &[u8] = b"Hotels in Seoul?\n/reset\n";
    let mut out = Vec::new();
    let transcript = handle_chat(&h.orchestrator, input, &mut out).await.unwrap();

    assert!(transcript.is_empty());
    assert!(String::from_utf8(out).unwrap().contains("Conversation cleared."));
}
