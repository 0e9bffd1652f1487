//! The function host adapter re-reads credentials from the environment on
//! every invocation. Kept as the only test in this binary because it
//! mutates process environment variables.

use speech_token_relay::http::function::relay_for_function_host;
use speech_token_relay::http::{ServeMode, TOKEN_ROUTE};
use speech_token_relay::lifecycle::Shutdown;
use speech_token_relay::relay::{REGION_ENV, SUBSCRIPTION_KEY_ENV};

mod common;

#[tokio::test]
async fn test_credentials_read_per_invocation() {
    std::env::remove_var(SUBSCRIPTION_KEY_ENV);
    std::env::remove_var(REGION_ENV);

    let (issuer_addr, recorded) = common::start_mock_issuer(200, b"fresh-token").await;
    let config = common::config_for(issuer_addr);
    let relay = relay_for_function_host(&config).unwrap();

    let shutdown = Shutdown::new();
    let base = common::start_relay(config, relay, ServeMode::FunctionHost, &shutdown).await;
    let client = common::client();
    let url = format!("{}{}", base, TOKEN_ROUTE);

    // Unset at first: 500 naming both variables, process keeps serving.
    let res = client.post(&url).send().await.unwrap();
    assert_eq!(res.status(), 500);
    let body = res.text().await.unwrap();
    assert!(body.contains(SUBSCRIPTION_KEY_ENV));
    assert!(body.contains(REGION_ENV));
    assert!(recorded.lock().unwrap().is_empty());

    // Settings applied without a restart.
    std::env::set_var(SUBSCRIPTION_KEY_ENV, "rotated-key");
    std::env::set_var(REGION_ENV, "northeurope");

    let res = client.post(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "fresh-token");

    let requests = recorded.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].request_line.contains("/northeurope/"));
    assert_eq!(
        requests[0].header("Ocp-Apim-Subscription-Key"),
        Some("rotated-key")
    );

    shutdown.trigger();
}
