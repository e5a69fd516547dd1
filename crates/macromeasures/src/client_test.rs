use super::*;

#[test]
fn new_client_stores_key_on_both_endpoints() {
    let client = Client::new("test-key", 60).expect("client construction should not fail");
    assert_eq!(client.api_key(), "test-key");
    assert_eq!(client.requests_per_minute(), 60);
    assert_eq!(client.twitter().api_key(), "test-key");
    assert_eq!(client.instagram().api_key(), "test-key");
}

#[test]
fn endpoints_are_bound_to_their_provider() {
    let client = Client::new("test-key", 60).unwrap();
    assert_eq!(client.twitter().provider(), Provider::Twitter);
    assert_eq!(client.instagram().provider(), Provider::Instagram);
    for provider in Provider::ALL {
        assert_eq!(client.endpoint(provider).provider(), provider);
    }
}

#[test]
fn default_base_url_is_production() {
    let client = Client::new("test-key", 0).unwrap();
    assert_eq!(client.base_url().as_str(), "http://api.macromeasures.com/");
}

#[test]
fn base_url_gains_single_trailing_slash() {
    let config = ClientConfig {
        base_url: "http://localhost:8080/v1//".to_owned(),
        ..ClientConfig::default()
    };
    let client = Client::with_config("test-key", 60, config).unwrap();
    assert_eq!(client.base_url().as_str(), "http://localhost:8080/v1/");
}

#[test]
fn rejects_relative_base_url() {
    let config = ClientConfig {
        base_url: "api.macromeasures.com".to_owned(),
        ..ClientConfig::default()
    };
    let err = Client::with_config("test-key", 60, config).unwrap_err();
    assert!(matches!(err, MacromeasuresError::InvalidBaseUrl(_)), "got: {err:?}");
}

#[test]
fn rejects_base_url_that_cannot_hold_a_path() {
    let config = ClientConfig {
        base_url: "mailto:ops@example.com".to_owned(),
        ..ClientConfig::default()
    };
    assert!(matches!(
        Client::with_config("test-key", 60, config),
        Err(MacromeasuresError::InvalidBaseUrl(_))
    ));
}

#[test]
fn debug_output_hides_api_key() {
    let client = Client::new("super-secret", 60).unwrap();
    assert!(!format!("{client:?}").contains("super-secret"));
}
