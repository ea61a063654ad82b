//! End-to-end pipeline tests: question in, rendered answer out.

use std::sync::Arc;

use serde_json::json;
use tokio::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vecinal_chatbot::directory::{DirectoryData, InMemoryDirectory};
use vecinal_chatbot::gateway::{CompletionConfig, CompletionGateway, GatewayState};
use vecinal_chatbot::service::ChatbotService;
use vecinal_core::{CommonSpace, RoleName, UserContext};

fn space(community_id: Uuid, name: &str) -> CommonSpace {
    CommonSpace {
        id: Uuid::new_v4(),
        community_id,
        name: name.to_string(),
        capacity: None,
        requires_reservation: true,
        open_hours: None,
        active: true,
    }
}

fn resident_of(community_id: Uuid) -> UserContext {
    UserContext {
        id: Uuid::new_v4(),
        name: "Marta Fuentes".to_string(),
        roles: [RoleName::Resident].into_iter().collect(),
        community_ids: vec![community_id],
        admin_community_ids: vec![],
        unit_ids: vec![Uuid::new_v4()],
    }
}

fn service_with(
    data: DirectoryData,
    base_url: &str,
    api_key: Option<&str>,
) -> (ChatbotService, Arc<GatewayState>) {
    let store: Arc<InMemoryDirectory> = Arc::new(InMemoryDirectory::new(data));
    let state = Arc::new(GatewayState::new(
        Duration::from_secs(300),
        8,
        Duration::from_millis(0),
    ));
    let config = CompletionConfig {
        base_url: base_url.to_string(),
        api_key: api_key.map(str::to_string),
        ..CompletionConfig::default()
    };
    let gateway = CompletionGateway::new(config, state.clone(), store.clone()).unwrap();
    (ChatbotService::new(store, gateway), state)
}

#[tokio::test]
async fn matched_topic_with_no_records_never_reaches_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (service, _) = service_with(DirectoryData::default(), &server.uri(), Some("test-key"));

    let answer = service.answer("espacios comunes", None).await;
    assert_eq!(answer, "No hay espacios comunes registrados para tu comunidad.");
}

#[tokio::test]
async fn resident_only_sees_their_own_community() {
    let mine = Uuid::new_v4();
    let other = Uuid::new_v4();

    let mut data = DirectoryData::default();
    data.common_spaces.push(space(mine, "Quincho"));
    data.common_spaces.push(space(other, "Piscina Norte"));

    let (service, _) = service_with(data, "http://127.0.0.1:9", None);

    let user = resident_of(mine);
    let answer = service.answer("¿qué espacios comunes hay?", Some(&user)).await;

    assert!(answer.contains("Quincho"));
    assert!(!answer.contains("Piscina Norte"));
    // Resident-facing copy includes the reservation hint.
    assert!(answer.contains("Reservas"));
}

#[tokio::test]
async fn anonymous_sees_all_communities_without_hints() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    let mut data = DirectoryData::default();
    data.common_spaces.push(space(a, "Quincho"));
    data.common_spaces.push(space(b, "Piscina Norte"));

    let (service, _) = service_with(data, "http://127.0.0.1:9", None);

    let answer = service.answer("espacios comunes", None).await;
    assert!(answer.contains("Quincho"));
    assert!(answer.contains("Piscina Norte"));
    assert!(!answer.contains("Reservas"));
}

#[tokio::test]
async fn unmatched_question_is_answered_by_the_provider_and_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-test",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "París"},
                "finish_reason": "stop"
            }],
            "usage": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, state) = service_with(DirectoryData::default(), &server.uri(), Some("test-key"));

    let answer = service.answer("¿Cuál es la capital de Francia?", None).await;
    assert_eq!(answer, "París");
    assert_eq!(state.cache.len().await, 1);

    // Asking again is served from the cache (the mock's expect(1) holds).
    let again = service.answer("¿cuál es la capital de francia?", None).await;
    assert_eq!(again, "París");
}

#[tokio::test]
async fn greeting_with_topic_keyword_is_a_data_request() {
    let community = Uuid::new_v4();
    let mut data = DirectoryData::default();
    data.common_spaces.push(space(community, "Gimnasio"));

    let (service, _) = service_with(data, "http://127.0.0.1:9", None);

    let answer = service.answer("hola, ¿qué espacios comunes tienen?", None).await;
    assert!(
        answer.contains("Gimnasio"),
        "greeting must not mask the data request: {answer}"
    );
}
