//! End-to-end tests for the solve/reconcile/follow-up flow against a
//! scripted in-memory provider (no network, no API keys).

use dsolve::{ChatProvider, Conversation, Engine, EngineError, Sanitizer, SessionStore, UpstreamError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Queued replies plus a log of (conversation id, prompt) for assertions.
#[derive(Default)]
struct Script {
    replies: VecDeque<Result<String, String>>,
    sent: Vec<(usize, String)>,
}

#[derive(Default, Clone)]
struct ScriptedProvider {
    script: Rc<RefCell<Script>>,
    opened: Rc<RefCell<usize>>,
}

impl ScriptedProvider {
    fn push_reply(&self, text: &str) {
        self.script
            .borrow_mut()
            .replies
            .push_back(Ok(text.to_string()));
    }

    fn push_failure(&self, details: &str) {
        self.script
            .borrow_mut()
            .replies
            .push_back(Err(details.to_string()));
    }

    fn sent(&self) -> Vec<(usize, String)> {
        self.script.borrow().sent.clone()
    }
}

struct ScriptedConversation {
    id: usize,
    script: Rc<RefCell<Script>>,
}

impl ChatProvider for ScriptedProvider {
    type Conversation = ScriptedConversation;

    fn new_conversation(&self) -> ScriptedConversation {
        let mut opened = self.opened.borrow_mut();
        *opened += 1;
        ScriptedConversation {
            id: *opened,
            script: self.script.clone(),
        }
    }
}

impl Conversation for ScriptedConversation {
    async fn send(&mut self, prompt: &str) -> Result<String, UpstreamError> {
        let mut script = self.script.borrow_mut();
        script.sent.push((self.id, prompt.to_string()));
        match script.replies.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(details)) => Err(UpstreamError::Request(details)),
            None => Err(UpstreamError::Request("script exhausted".to_string())),
        }
    }
}

fn languages(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn scenario_a_partial_reply_triggers_reconciliation() {
    let provider = ScriptedProvider::default();
    provider.push_reply("**Logic:**\nDoes X\n**Time Complexity:**\nO(n)\n```\ncode1\n```");
    provider.push_reply("O(log n) from recursion.");
    provider.push_reply("Pick a random pivot.");

    let engine = Engine::new(provider.clone(), Sanitizer::default());
    let mut store = SessionStore::new();

    let bundle = engine
        .solve(&mut store, "Implement quicksort.", &languages(&["python"]))
        .await
        .unwrap();

    assert_eq!(bundle.logic, "Does X");
    assert_eq!(bundle.time_complexity, "O(n)");
    assert_eq!(bundle.codes["python"], "```python\ncode1\n```");

    // The two omitted fields were each backfilled by exactly one
    // supplementary call on the primary conversation.
    assert_eq!(bundle.space_complexity, "O(log n) from recursion.");
    assert_eq!(bundle.improvements, "Pick a random pivot.");

    let sent = provider.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|(id, _)| *id == 1));
    assert!(sent[1].1.contains("Space_Complexity"));
    assert!(sent[2].1.contains("Improvements"));
}

#[tokio::test]
async fn scenario_b_collapse_takes_first_nonempty_without_repair() {
    let provider = ScriptedProvider::default();
    // Only python's reply carries a Logic section; java's carries the rest.
    provider.push_reply("**Logic:**\nDoes X\n```\npy code\n```");
    provider.push_reply(
        "**Time Complexity:**\nO(n)\n**Space Complexity:**\nO(1)\n\
         **Improvements/Alternatives:**\nNone needed.\n```\njava code\n```",
    );

    let engine = Engine::new(provider.clone(), Sanitizer::default());
    let mut store = SessionStore::new();

    let bundle = engine
        .solve(
            &mut store,
            "Implement quicksort.",
            &languages(&["python", "java"]),
        )
        .await
        .unwrap();

    assert_eq!(bundle.logic, "Does X");
    assert_eq!(bundle.time_complexity, "O(n)");
    assert_eq!(bundle.space_complexity, "O(1)");
    assert_eq!(bundle.improvements, "None needed.");
    assert_eq!(bundle.codes["python"], "```python\npy code\n```");
    assert_eq!(bundle.codes["java"], "```java\njava code\n```");

    // Every field was supplied by some language: no supplementary call.
    let sent = provider.sent();
    assert_eq!(sent.len(), 2);
    assert!(!sent.iter().any(|(_, p)| p.contains("Can you discuss")));
}

#[tokio::test]
async fn collapse_prefers_request_order() {
    let provider = ScriptedProvider::default();
    provider.push_reply(
        "**Logic:**\npython logic\n**Time Complexity:**\nO(n)\n\
         **Space Complexity:**\nO(1)\n**Improvements/Alternatives:**\nnone\n```\na\n```",
    );
    provider.push_reply("**Logic:**\njava logic\n```\nb\n```");

    let engine = Engine::new(provider.clone(), Sanitizer::default());
    let mut store = SessionStore::new();

    let bundle = engine
        .solve(&mut store, "Do it.", &languages(&["python", "java"]))
        .await
        .unwrap();

    assert_eq!(bundle.logic, "python logic");
}

#[tokio::test]
async fn scenario_c_follow_up_uses_only_that_languages_conversation() {
    let provider = ScriptedProvider::default();
    provider.push_reply(
        "**Logic:**\nL\n**Time Complexity:**\nO(n)\n**Space Complexity:**\nO(1)\n\
         **Improvements/Alternatives:**\nnone\n```\npy\n```",
    );
    provider.push_reply("```\njava\n```");

    let engine = Engine::new(provider.clone(), Sanitizer::default());
    let mut store = SessionStore::new();

    engine
        .solve(&mut store, "Quicksort.", &languages(&["python", "java"]))
        .await
        .unwrap();

    provider.push_reply("Because the first element is a simple pivot choice. I hope this helps");

    let answer = engine
        .follow_up(&mut store, "python", "why pivot=arr[0]?")
        .await
        .unwrap();

    // Sanitized: the filler closing remark is stripped.
    assert_eq!(answer, "Because the first element is a simple pivot choice.");

    // The question went to python's conversation (opened first); java's
    // conversation saw nothing after its solution prompt.
    let sent = provider.sent();
    let last = sent.last().unwrap();
    assert_eq!(last.0, 1);
    assert_eq!(last.1, "why pivot=arr[0]?");
    assert_eq!(sent.iter().filter(|(id, _)| *id == 2).count(), 1);
}

#[tokio::test]
async fn refresh_reuses_the_solve_conversation() {
    let provider = ScriptedProvider::default();
    provider.push_reply(
        "**Logic:**\nL\n**Time Complexity:**\nO(n)\n**Space Complexity:**\nO(1)\n\
         **Improvements/Alternatives:**\nnone\n```\npy\n```",
    );

    let engine = Engine::new(provider.clone(), Sanitizer::default());
    let mut store = SessionStore::new();

    engine
        .solve(&mut store, "Quicksort.", &languages(&["python"]))
        .await
        .unwrap();

    provider.push_reply("A sharper Logic section.");
    let text = engine.refresh(&mut store, "python", "Logic").await.unwrap();
    assert_eq!(text, "A sharper Logic section.");

    let sent = provider.sent();
    // Same conversation for solve and refresh: it is never recreated.
    assert!(sent.iter().all(|(id, _)| *id == 1));
    assert!(sent.last().unwrap().1.contains("the Logic section"));
}

#[tokio::test]
async fn solve_replaces_previous_session_for_the_language() {
    let provider = ScriptedProvider::default();
    let full_reply = "**Logic:**\nL\n**Time Complexity:**\nO(n)\n**Space Complexity:**\nO(1)\n\
                      **Improvements/Alternatives:**\nnone\n```\npy\n```";
    provider.push_reply(full_reply);
    provider.push_reply(full_reply);

    let engine = Engine::new(provider.clone(), Sanitizer::default());
    let mut store = SessionStore::new();

    engine
        .solve(&mut store, "First problem.", &languages(&["python"]))
        .await
        .unwrap();
    engine
        .solve(&mut store, "Second problem.", &languages(&["python"]))
        .await
        .unwrap();

    provider.push_reply("answer");
    engine
        .follow_up(&mut store, "python", "question")
        .await
        .unwrap();

    // The follow-up lands on the conversation from the second solve.
    assert_eq!(provider.sent().last().unwrap().0, 2);
}

#[tokio::test]
async fn upstream_failure_on_solve_propagates() {
    let provider = ScriptedProvider::default();
    provider.push_failure("connection reset");

    let engine = Engine::new(provider, Sanitizer::default());
    let mut store = SessionStore::new();

    let result = engine
        .solve(&mut store, "Quicksort.", &languages(&["python"]))
        .await;

    assert!(matches!(result, Err(EngineError::Upstream(_))));
}
