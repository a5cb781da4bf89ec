use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use crate::prelude::*;
use crate::transport::{PreparedRequest, RawResponse, Transport};

struct StubTransport {
    status_code: i32,
    body: String,
    requests: Rc<RefCell<Vec<PreparedRequest>>>
}

impl Transport for StubTransport {
    fn execute(&self, request: &PreparedRequest) -> Result<RawResponse, minreq::Error> {
        self.requests.borrow_mut().push(request.clone());

        Ok(RawResponse {
            status_code: self.status_code,
            reason_phrase: String::new(),
            body: self.body.clone().into_bytes()
        })
    }
}

fn fixture() -> SchemaDocument {
    SchemaDocument::new(json!({
        "swagger": "2.0",
        "host": "esi.evetech.net",
        "basePath": "/latest",
        "parameters": {
            "datasource": {
                "name": "datasource",
                "in": "query",
                "enum": ["tranquility"]
            }
        },
        "paths": {
            "/characters/{character_id}/assets/": {
                "get": {
                    "operationId": "get_characters_character_id_assets",
                    "parameters": [
                        { "name": "character_id", "in": "path" },
                        { "$ref": "#/parameters/datasource" },
                        { "name": "page", "in": "query" }
                    ]
                }
            }
        }
    }))
}

fn config() -> ProxyConfig {
    ProxyConfig::new("neucore.tld", AppToken::encode(1, "secret"), 96061222)
        .with_scheme(HttpScheme::Http)
        .with_eve_login(DEFAULT_EVE_LOGIN)
}

fn client(status_code: i32, body: &str) -> (EsiClient, Rc<RefCell<Vec<PreparedRequest>>>) {
    let mut document = fixture();

    document.patch("neucore.tld", "/api/app/v2/esi/latest").unwrap();

    let requests = Rc::new(RefCell::new(Vec::new()));

    let client = EsiClient::new(&document, config()).unwrap()
        .with_transport(StubTransport {
            status_code,
            body: body.to_string(),
            requests: requests.clone()
        });

    (client, requests)
}

#[test]
fn test_operation_table() {
    let (client, _) = client(200, "[]");

    let operation = client.operation("get_characters_character_id_assets").unwrap();

    assert_eq!(operation.method, Method::Get);
    assert_eq!(operation.path, "/characters/{character_id}/assets/");
    assert_eq!(operation.parameters, ["character_id", "datasource", "page"]);

    assert!(client.operation("get_status").is_none());
}

#[test]
fn test_configuration_errors() {
    let config = config();

    let document = SchemaDocument::new(json!({
        "host": "neucore.tld",
        "basePath": "/api/app/v2/esi/latest"
    }));

    assert!(matches!(
        EsiClient::new(&document, config.clone()),
        Err(ConfigurationError::MissingPaths)
    ));

    let document = SchemaDocument::new(json!({
        "host": "neucore.tld",
        "basePath": "/api/app/v2/esi/latest",
        "paths": {}
    }));

    assert!(matches!(
        EsiClient::new(&document, config.clone()),
        Err(ConfigurationError::NoOperations)
    ));

    let document = SchemaDocument::new(json!({
        "host": "neucore.tld",
        "basePath": "/api/app/v2/esi/latest",
        "paths": {
            "/status/": {
                "get": {}
            }
        }
    }));

    assert!(matches!(
        EsiClient::new(&document, config),
        Err(ConfigurationError::MissingOperationId { .. })
    ));
}

#[test]
fn test_descriptor_holds_exactly_the_supplied_parameters() {
    let request = RequestDescriptor::new()
        .with_parameter("character_id", 96061222)
        .with_parameter("datasource", 96061222)
        .with_parameter("page", 1);

    assert_eq!(request.parameters().len(), 3);
    assert_eq!(request.get("character_id"), Some("96061222"));
    assert_eq!(request.get("datasource"), Some("96061222"));
    assert_eq!(request.get("page"), Some("1"));
    assert_eq!(request.get("language"), None);

    // Building the same descriptor again yields the same mapping
    let rebuilt = RequestDescriptor::new()
        .with_parameter("page", 1)
        .with_parameter("datasource", 96061222)
        .with_parameter("character_id", 96061222);

    assert_eq!(request, rebuilt);
}

#[test]
fn test_invoke_builds_the_proxied_request() {
    let (client, requests) = client(200, "[]");

    client.invoke("get_characters_character_id_assets", RequestDescriptor::new()
        .with_parameter("character_id", 96061222)
        .with_parameter("datasource", 96061222)
        .with_parameter("page", 1)).unwrap();

    let requests = requests.borrow();
    let request = &requests[0];

    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "http://neucore.tld/api/app/v2/esi/latest/characters/96061222/assets/");

    assert_eq!(request.params, [
        (String::from("datasource"), String::from("96061222")),
        (String::from("page"), String::from("1"))
    ]);

    assert!(request.headers.contains(&(String::from("Authorization"), String::from("Bearer MTpzZWNyZXQ="))));
    assert!(request.headers.contains(&(String::from(EVE_CHARACTER_HEADER), String::from("96061222"))));
    assert!(request.headers.contains(&(String::from(EVE_LOGIN_HEADER), String::from(DEFAULT_EVE_LOGIN))));

    assert_eq!(request.body, None);
}

#[test]
fn test_invoke_requires_path_parameters() {
    let (client, _) = client(200, "[]");

    let result = client.invoke("get_characters_character_id_assets", RequestDescriptor::new()
        .with_parameter("page", 1));

    assert!(matches!(
        result,
        Err(RequestError::MissingPathParameter { name, .. }) if name == "character_id"
    ));
}

#[test]
fn test_invoke_unknown_operation() {
    let (client, _) = client(200, "[]");

    assert!(matches!(
        client.invoke("get_status", RequestDescriptor::new()),
        Err(RequestError::UnknownOperation(_))
    ));
}

#[test]
fn test_invoke_reads_the_first_result() {
    let (client, _) = client(200, r#"[{"item_id": 1000000016835, "type_id": 3516}]"#);

    let response = client.invoke("get_characters_character_id_assets", RequestDescriptor::new()
        .with_parameter("character_id", 96061222)
        .with_parameter("datasource", 96061222)).unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.first().unwrap()["item_id"], 1000000016835u64);
}

#[test]
fn test_empty_data_is_an_error() {
    let (client, _) = client(200, r#"{"data": []}"#);

    let response = client.invoke("get_characters_character_id_assets", RequestDescriptor::new()
        .with_parameter("character_id", 96061222)
        .with_parameter("datasource", 96061222)).unwrap();

    assert_eq!(response.first(), Err(ResponseFormatError::EmptyData));

    let (client, _) = self::client(200, "{}");

    let response = client.invoke("get_characters_character_id_assets", RequestDescriptor::new()
        .with_parameter("character_id", 96061222)
        .with_parameter("datasource", 96061222)).unwrap();

    assert_eq!(response.data(), Err(ResponseFormatError::MissingData));
    assert_eq!(response.first(), Err(ResponseFormatError::MissingData));
}

#[test]
fn test_non_success_status_surfaces_the_message() {
    let (client, _) = client(403, "Public ESI routes are not passed through");

    let result = client.invoke("get_characters_character_id_assets", RequestDescriptor::new()
        .with_parameter("character_id", 96061222)
        .with_parameter("datasource", 96061222));

    assert!(matches!(
        result,
        Err(RequestError::Status { status: 403, message }) if message == "Public ESI routes are not passed through"
    ));
}

#[test]
fn test_invoke_raw_targets_the_proxy_endpoint() {
    let (client, requests) = client(200, r#"[{"name": "Hurricane"}]"#);

    let response = client.invoke_raw(
        Method::Post,
        "/latest/characters/96061222/assets/names/",
        Some(json!([1000000016835u64]))
    ).unwrap();

    assert_eq!(response.first().unwrap()["name"], "Hurricane");

    let requests = requests.borrow();
    let request = &requests[0];

    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "http://neucore.tld/api/app/v2/esi");

    assert_eq!(request.params, [
        (String::from(ESI_PATH_QUERY_PARAMETER), String::from("/latest/characters/96061222/assets/names/")),
        (String::from(DATASOURCE_PARAMETER), String::from("96061222"))
    ]);

    assert_eq!(request.body, Some(json!([1000000016835u64])));
}
