use std::collections::HashMap;
use std::time::Duration;

use secrecy::ExposeSecret;

use formrelay::config::Config;

fn load(pairs: &[(&str, &str)]) -> Result<Config, String> {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| env.get(key).cloned())
}

const REQUIRED: [(&str, &str); 2] = [
    ("AIRTABLE_API_KEY", "key123"),
    ("AIRTABLE_ENDPOINT", "https://api.airtable.com/v0/appX/Subscribers"),
];

#[test]
fn defaults_apply_when_only_required_values_are_set() {
    let config = load(&REQUIRED).unwrap();

    assert_eq!(config.host.to_string(), "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.max_body_size, 65536);
    assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    assert_eq!(config.log_level, "info");
    assert_eq!(config.airtable.api_key.expose_secret(), "key123");
    assert_eq!(
        config.airtable.endpoint.as_str(),
        "https://api.airtable.com/v0/appX/Subscribers"
    );
    assert!(config.zapier.subscribe.is_none());
    assert!(config.zapier.unsubscribe.is_none());
}

#[test]
fn missing_required_values_are_named() {
    let err = load(&[("AIRTABLE_API_KEY", "key123")]).unwrap_err();
    assert!(err.contains("AIRTABLE_ENDPOINT"), "{err}");

    let err = load(&[
        ("AIRTABLE_API_KEY", "  "),
        ("AIRTABLE_ENDPOINT", "https://api.airtable.com/v0/appX/Subscribers"),
    ])
    .unwrap_err();
    assert!(err.contains("AIRTABLE_API_KEY"), "{err}");
}

#[test]
fn per_event_webhooks_override_the_shared_one() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("ZAPIER_ENDPOINT", "https://hooks.zapier.com/hooks/catch/1/shared/"));
    pairs.push((
        "ZAPIER_ENDPOINT_UNSUBSCRIBE",
        "https://hooks.zapier.com/hooks/catch/1/unsub/",
    ));

    let config = load(&pairs).unwrap();

    assert_eq!(
        config.zapier.subscribe.unwrap().as_str(),
        "https://hooks.zapier.com/hooks/catch/1/shared/"
    );
    assert_eq!(
        config.zapier.unsubscribe.unwrap().as_str(),
        "https://hooks.zapier.com/hooks/catch/1/unsub/"
    );
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        ("AIRTABLE_ENDPOINT", "not a url"),
        ("AIRTABLE_ENDPOINT", "ftp://files.example.com/table"),
        ("ZAPIER_ENDPOINT_SUBSCRIBE", "hooks.zapier.com/no-scheme"),
        ("RELAY_HOST", "localhost"),
        ("RELAY_PORT", "70000"),
        ("RELAY_MAX_BODY_SIZE", "-1"),
        ("RELAY_UPSTREAM_TIMEOUT_SECS", "0"),
    ];

    for (key, value) in cases {
        let mut pairs: Vec<(&str, &str)> =
            REQUIRED.iter().copied().filter(|(k, _)| *k != key).collect();
        pairs.push((key, value));

        let err = load(&pairs).unwrap_err();
        assert!(err.contains(key), "{key}={value}: {err}");
    }
}

#[test]
fn api_key_is_redacted_in_debug_output() {
    let config = load(&REQUIRED).unwrap();
    assert!(!format!("{config:?}").contains("key123"));
}
