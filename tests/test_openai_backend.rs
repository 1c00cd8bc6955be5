use recipe_nusantara::config::{AppConfig, ProviderConfig};
use recipe_nusantara::{AnalysisError, AppShell, Notice, Provider};
use std::io::Write;
use std::time::Duration;

fn config_for(server_url: String) -> AppConfig {
    let mut config = AppConfig::default();
    config.providers.insert(
        "openai".to_string(),
        ProviderConfig {
            enabled: true,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 1500,
            api_key: Some("test_key".to_string()),
            base_url: Some(server_url),
        },
    );
    config
}

fn shell_for(config: AppConfig) -> AppShell {
    AppShell::builder()
        .config(config)
        .provider(Provider::OpenAI)
        .in_memory_theme()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_backend_recipe_reaches_the_shell() {
    let mut server = mockito::Server::new_async().await;
    let content = serde_json::json!({
        "name": "Soto Ayam",
        "description": "Turmeric chicken soup",
        "origin": "Lamongan, East Java",
        "cookingTime": "1 hour",
        "servings": 4,
        "difficulty": "Medium",
        "ingredients": [{"name": "Chicken", "amount": "1 kg", "notes": "whole"}],
        "instructions": ["Boil the chicken with turmeric.", "Shred and serve in broth."],
        "history": "Every town has its own soto.",
        "interestingFacts": ["Koya powder is made from prawn crackers."],
        "nutritionalHighlights": ["High Protein"]
    })
    .to_string();
    let body = serde_json::json!({"choices": [{"message": {"content": content}}]}).to_string();

    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4o-mini",
            "response_format": {"type": "json_object"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let mut shell = shell_for(config_for(server.url()));
    shell.set_text("Soto ayam soup");
    shell.generate_recipe().await;

    let recipe = shell.current_recipe().unwrap();
    assert_eq!(recipe.name, "Soto Ayam");
    assert_eq!(recipe.ingredients[0].notes.as_deref(), Some("whole"));
    assert!(shell.notice().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_backend_outage_surfaces_try_again() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let mut shell = shell_for(config_for(server.url()));
    shell.set_text("Gado-gado salad");
    shell.generate_recipe().await;

    assert!(shell.current_recipe().is_none());
    assert!(!shell.is_loading());
    assert!(matches!(shell.notice(), Some(Notice::TryAgain(_))));
    assert!(shell.render_page().contains("notice try-again"));
}

#[tokio::test]
async fn test_incomplete_recipe_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let content = serde_json::json!({
        "name": "Mystery",
        "description": "",
        "origin": "",
        "cookingTime": "",
        "servings": 2,
        "difficulty": "Easy",
        "instructions": [],
        "history": ""
    })
    .to_string();
    let body = serde_json::json!({"choices": [{"message": {"content": content}}]}).to_string();
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let provider = recipe_nusantara::OpenAIProvider::with_base_url(
        "test_key".to_string(),
        server.url(),
        "gpt-4o-mini".to_string(),
    );
    let err = recipe_nusantara::generate_from_text(&provider, "Something sweet")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(2500));
            w.write_all(b"{}")
        })
        .create_async()
        .await;

    let mut shell = AppShell::builder()
        .config(config_for(server.url()))
        .provider(Provider::OpenAI)
        .timeout(Duration::from_secs(1))
        .in_memory_theme()
        .build()
        .unwrap();
    shell.set_text("Rendang beef curry");
    shell.generate_recipe().await;

    assert!(shell.current_recipe().is_none());
    assert!(matches!(shell.notice(), Some(Notice::TryAgain(_))));
}

#[tokio::test]
async fn test_sub_second_timeout_is_honoured() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(1500));
            w.write_all(b"{}")
        })
        .create_async()
        .await;

    let mut shell = AppShell::builder()
        .config(config_for(server.url()))
        .provider(Provider::OpenAI)
        .timeout(Duration::from_millis(200))
        .in_memory_theme()
        .build()
        .unwrap();
    shell.set_text("Rendang beef curry");

    let started = std::time::Instant::now();
    shell.generate_recipe().await;
    assert!(started.elapsed() < Duration::from_millis(900));
    assert!(shell.current_recipe().is_none());
    assert!(matches!(shell.notice(), Some(Notice::TryAgain(_))));
}

#[tokio::test]
async fn test_default_openai_without_fallback_is_used_directly() {
    let mut config = config_for("http://127.0.0.1:9".to_string());
    config.default_provider = "openai".to_string();

    let shell = AppShell::builder()
        .config(config)
        .in_memory_theme()
        .build()
        .unwrap();
    assert_eq!(shell.provider_name(), "openai");
}
