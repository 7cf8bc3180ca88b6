use live_client::{ClientError, Endpoint};
use pretty_assertions::assert_eq;

#[test]
fn scheme_follows_the_page() {
    let plain = Endpoint::from_page_url("http://localhost:3087/downloads", None).unwrap();
    assert_eq!(plain.url().unwrap().as_str(), "ws://localhost:3087/");

    let secure = Endpoint::from_page_url("https://tube.example.com/", None).unwrap();
    assert_eq!(secure.url().unwrap().as_str(), "wss://tube.example.com/");
}

#[test]
fn dev_port_overrides_the_page_port() {
    let endpoint = Endpoint::from_page_url("http://localhost:3000/", Some(3011)).unwrap();
    assert_eq!(endpoint.port, Some(3011));
    assert_eq!(endpoint.url().unwrap().as_str(), "ws://localhost:3011/");
}

#[test]
fn custom_paths_gain_a_leading_slash() {
    let endpoint = Endpoint::from_page_url("http://nas.local:8080", None)
        .unwrap()
        .with_path("socket");
    assert_eq!(endpoint.url().unwrap().as_str(), "ws://nas.local:8080/socket");
}

#[test]
fn unsupported_schemes_are_rejected() {
    let err = Endpoint::from_page_url("ftp://localhost/", None).unwrap_err();
    assert!(matches!(err, ClientError::InvalidEndpoint(_)));
    assert!(matches!(
        Endpoint::from_page_url("not a url", None),
        Err(ClientError::Url(_))
    ));
}
