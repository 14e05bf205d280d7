use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceResponse {
    id: String,
    user_id: String,
    newsletter_enabled: bool,
    contact_data: String,
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn upsert_preference_returns_the_created_record() {
    let client = reqwest::Client::new();

    let response = client
        .post("http://localhost:8000/api/v1/notifications/preferences")
        .json(&json!({
            "userId": "01J1H3YV4N6GJ8B3VX1K2Q0T7D",
            "notificationType": "EMAIL",
            "newsletterEnabled": true,
            "contactData": "a@b.com"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let body = response.json::<PreferenceResponse>().await.unwrap();
    assert!(!body.id.is_empty());
    assert_eq!(body.user_id, "01J1H3YV4N6GJ8B3VX1K2Q0T7D");
    assert!(body.newsletter_enabled);
    assert_eq!(body.contact_data, "a@b.com");
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn fetching_a_missing_preference_returns_not_found() {
    let client = reqwest::Client::new();

    let response = client
        .get("http://localhost:8000/api/v1/notifications/preferences")
        .query(&[("userId", "no-such-user")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
