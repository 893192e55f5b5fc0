use std::sync::Arc;

use request_gate::{
    credential_fn, AuthorizationError, Authorizer, ClientConfig, ClientError, Credential,
    CredentialStore, Decision, EndpointRule, HttpMethod, OutgoingRequest, RecordingTransport,
    Session, Whitelist, AUTHORIZATION,
};

#[test]
fn other_endpoint_gets_bearer_header() {
    let authorizer = Authorizer::new(
        Whitelist::site_default(),
        credential_fn(|| Some(Credential::new("tok1"))),
    );

    let cleared = authorizer
        .authorize(OutgoingRequest::get("/api/other/endpoint"))
        .expect("credential present");

    assert_eq!(cleared.headers().get(AUTHORIZATION), Some("Bearer tok1"));
}

#[test]
fn other_endpoint_without_credential_is_refused() {
    let authorizer = Authorizer::new(Whitelist::site_default(), credential_fn(|| None));

    let err = authorizer
        .authorize(OutgoingRequest::get("/api/other/endpoint"))
        .unwrap_err();

    assert_eq!(
        err,
        AuthorizationError::MissingCredential {
            path: "/api/other/endpoint".to_string()
        }
    );
}

#[test]
fn penalty_detail_is_public_but_its_update_is_not() {
    let whitelist = Whitelist::site_default();

    assert!(whitelist.is_public("/api/penalty/detail/abc123"));
    assert!(!whitelist.is_public("/api/penalty/detail/abc123/update"));
}

#[test]
fn paged_penalty_list_needs_a_credential() {
    let (client, session) = ClientConfig::new().connect(RecordingTransport::new());

    let err = client.get("/api/penalty/list?page=2").unwrap_err();
    assert!(matches!(
        err,
        ClientError::Authorization(AuthorizationError::MissingCredential { ref path })
            if path == "/api/penalty/list"
    ));
    assert_eq!(client.transport().request_count(), 0);

    session.login("tok1");
    let record = client.get("/api/penalty/list?page=2").expect("logged in");
    assert!(record.authenticated);
    assert_eq!(record.url, "/api/penalty/list?page=2");
}

#[test]
fn video_list_prefix_covers_sub_paths() {
    let whitelist = Whitelist::site_default();

    assert_eq!(
        whitelist.matching_rule("/api/video/list"),
        Some(&EndpointRule::prefix("/api/video/list"))
    );
    assert_eq!(
        whitelist.matching_rule("/api/video/list/recent"),
        Some(&EndpointRule::prefix("/api/video/list"))
    );
}

#[test]
fn login_flow_through_configured_client() {
    let (client, session) = ClientConfig::new()
        .with_base_url("https://vod.example.com")
        .connect(RecordingTransport::new());

    // Anonymous visitors can browse public listings.
    let record = client.get("/api/penalty/list").expect("public");
    assert!(!record.authenticated);

    // Protected calls abort before transmission.
    let err = client
        .post_json("/api/penalty/insert", r#"{"name":"x"}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Authorization(AuthorizationError::MissingCredential { .. })
    ));
    assert_eq!(client.transport().request_count(), 1);

    // The login endpoint itself is public.
    client
        .post_json("/api/auth/login", r#"{"code":"123456"}"#)
        .expect("login is whitelisted");
    session.login("issued-token");

    let record = client
        .post_json("/api/penalty/insert", r#"{"name":"x"}"#)
        .expect("logged in");
    assert_eq!(record.method, HttpMethod::Post);
    assert_eq!(record.url, "https://vod.example.com/api/penalty/insert");
    assert!(record.authenticated);

    // After logout, the same call is refused again.
    session.logout();
    assert!(client.get("/api/setting/config").is_err());
    assert_eq!(client.transport().request_count(), 3);
}

#[test]
fn public_endpoint_ignores_login_state() {
    let store = Arc::new(CredentialStore::default());
    let session = Session::new(Arc::clone(&store));
    let authorizer = Authorizer::new(Whitelist::site_default(), Arc::clone(&store));

    let before = authorizer
        .authorize(OutgoingRequest::get("/api/leaderboard"))
        .unwrap();
    session.login("tok");
    let after = authorizer
        .authorize(OutgoingRequest::get("/api/leaderboard"))
        .unwrap();

    assert_eq!(before, after);
    assert_eq!(
        after.decision(),
        &Decision::Public(EndpointRule::prefix("/api/leaderboard"))
    );
}

#[test]
fn custom_rule_table_from_config() {
    let table = "
        # read-only endpoints
        /api/ping
        /api/image/get/{name}
    ";
    let (client, _session) = ClientConfig::new()
        .with_whitelist_table(table)
        .expect("valid table")
        .connect(RecordingTransport::new());

    assert!(client.get("/api/ping").is_ok());
    assert!(client.get("/api/image/get/banner").is_ok());
    assert!(client.get("/api/penalty/list").is_err());
}

#[test]
fn authorizer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Authorizer<Arc<CredentialStore>>>();
    assert_send_sync::<Session>();
    assert_send_sync::<Whitelist>();

    let store = Arc::new(CredentialStore::default());
    store.store("tok");
    let authorizer = Arc::new(Authorizer::new(Whitelist::site_default(), store));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let authorizer = Arc::clone(&authorizer);
            std::thread::spawn(move || {
                authorizer
                    .authorize(OutgoingRequest::get(format!("/api/wheel/{}", i)))
                    .map(|r| r.is_authenticated())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(true));
    }
}
