use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use visualsearch::{
    update, Citation, Container, DomainError, GeminiClient, GeminiConfig, GroundedAnswer,
    GroundedSearchClient, LifecycleState, Msg, SearchImagesUseCase, SearchQuery, SessionState,
    Source, MISSING_API_KEY_MESSAGE,
};

/// Records prompts and replays a fixed outcome.
struct ScriptedClient {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    outcome: Result<GroundedAnswer, String>,
}

impl ScriptedClient {
    fn answering(answer: GroundedAnswer) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            outcome: Ok(answer),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            outcome: Err(message.to_string()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GroundedSearchClient for ScriptedClient {
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedAnswer, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcome.clone().map_err(DomainError::provider)
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn citation(title: &str, uri: &str) -> Citation {
    Citation::new(Some(title.to_string()), Some(uri.to_string()))
}

#[tokio::test]
async fn sunset_scenario_drops_citation_with_empty_title() {
    let client = ScriptedClient::answering(GroundedAnswer::new(
        "Look for warm-toned landscape photography...",
        vec![
            citation("A", "https://a.example"),
            citation("", "https://b.example"),
        ],
    ));
    let use_case = SearchImagesUseCase::new(client.clone());
    let query = SearchQuery::new("sunset over mountains").unwrap();

    let result = use_case.execute(&query).await.expect("search succeeds");

    assert_eq!(result.text(), "Look for warm-toned landscape photography...");
    assert_eq!(result.sources(), &[Source::new("A", "https://a.example")]);
    assert_eq!(client.calls(), 1);

    let prompts = client.prompts.lock().unwrap();
    assert!(prompts[0].contains("\"sunset over mountains\""));
}

#[tokio::test]
async fn answer_without_citations_is_a_success() {
    let client = ScriptedClient::answering(GroundedAnswer::new("Just text", vec![]));
    let use_case = SearchImagesUseCase::new(client);

    let result = use_case
        .execute(&SearchQuery::new("cats").unwrap())
        .await
        .expect("missing grounding is not an error");

    assert_eq!(result.text(), "Just text");
    assert!(result.sources().is_empty());
}

#[tokio::test]
async fn provider_error_is_passed_through() {
    let client = ScriptedClient::failing("Resource has been exhausted (e.g. check quota).");
    let use_case = SearchImagesUseCase::new(client.clone());

    let err = use_case
        .execute(&SearchQuery::new("cats").unwrap())
        .await
        .unwrap_err();

    assert!(err.is_provider());
    assert_eq!(err.to_string(), "Resource has been exhausted (e.g. check quota).");
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn missing_credential_fails_with_configuration_error() {
    let use_case = SearchImagesUseCase::new(Arc::new(GeminiClient::new(GeminiConfig::default())));

    let err = use_case
        .execute(&SearchQuery::new("cats").unwrap())
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn missing_credential_ends_session_in_failed_state() {
    let use_case = SearchImagesUseCase::new(Arc::new(GeminiClient::new(GeminiConfig::default())));

    let (state, _) = update(SessionState::new(), Msg::InputChanged("cats".to_string()));
    let (state, effects) = update(state, Msg::SubmitPressed);
    assert_eq!(effects.len(), 1);

    let outcome = use_case
        .execute(&SearchQuery::new("cats").unwrap())
        .await
        .map_err(|e| e.to_string());
    let (state, _) = update(state, Msg::SearchFinished(outcome));

    match state.lifecycle() {
        LifecycleState::Failed(message) => assert!(message.contains(MISSING_API_KEY_MESSAGE)),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn container_wraps_injected_client() {
    let client = ScriptedClient::answering(GroundedAnswer::new("ok", vec![]));
    let container = Container::with_client(client.clone());

    assert_eq!(container.model_name(), "scripted");
    let result = container
        .search_use_case()
        .execute(&SearchQuery::new("cats").unwrap())
        .await
        .unwrap();
    assert_eq!(result.text(), "ok");
    assert_eq!(client.calls(), 1);
}
