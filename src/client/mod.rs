pub mod auth;
pub mod operation;

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use auth::AppAuthentication;
use operation::{Method, Operation, RequestDescriptor};

use crate::config::ProxyConfig;
use crate::consts::{DATASOURCE_PARAMETER, ESI_PATH_QUERY_PARAMETER, EVE_CHARACTER_HEADER, EVE_LOGIN_HEADER, PROXY_ESI_PATH};
use crate::response::ApiResponse;
use crate::schema::{self, SchemaDocument};
use crate::transport::{MinreqTransport, PreparedRequest, Transport};

#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Document has no `paths` object to build an operation table from
    #[error("definition document has no paths")]
    MissingPaths,

    #[error("definition document declares no operations")]
    NoOperations,

    /// Operation node is not shaped like a swagger operation
    #[error("malformed operation under `{path}`")]
    MalformedOperation { path: String },

    /// Operation has no id to address it by
    #[error("operation under `{path}` has no operationId")]
    MissingOperationId { path: String },

    /// Patched documents always carry these; an unpatched
    /// or hand-edited document may not
    #[error("definition document has no host")]
    MissingHost,

    #[error("definition document has no basePath")]
    MissingBasePath
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Operation path declares a placeholder the descriptor doesn't fill
    #[error("missing path parameter `{name}` for operation {operation}")]
    MissingPathParameter {
        operation: String,
        name: String
    },

    /// Network or transport level failure
    #[error("minreq error: {0}")]
    Minreq(#[from] minreq::Error),

    /// Proxy responded with a non-success status
    ///
    /// The message is whatever the proxy put into the response body,
    /// e.g. "Public ESI routes are not passed through"
    #[error("request failed with status {status}: {message}")]
    Status {
        status: i32,
        message: String
    },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error)
}

/// Request building client for the proxied ESI API
///
/// Built from a patched definition document, so every request it
/// produces targets the proxy endpoint instead of the origin API
pub struct EsiClient {
    operations: HashMap<String, Operation>,
    host: String,
    base_path: String,
    config: ProxyConfig,
    authentication: AppAuthentication,
    transport: Box<dyn Transport>
}

impl EsiClient {
    pub fn new(document: &SchemaDocument, config: ProxyConfig) -> Result<Self, ConfigurationError> {
        let operations = parse_operations(document)?;

        let host = document.host()
            .ok_or(ConfigurationError::MissingHost)?
            .to_string();

        let base_path = document.base_path()
            .ok_or(ConfigurationError::MissingBasePath)?
            .to_string();

        let authentication = AppAuthentication::static_token(config.app_token.clone());

        Ok(Self {
            operations,
            host,
            base_path,
            config,
            authentication,
            transport: Box::new(MinreqTransport)
        })
    }

    /// Run the whole bootstrap pipeline: fetch the definition file,
    /// patch it for the proxy, store it, and build the client
    /// from the stored copy
    #[tracing::instrument(level = "debug", skip(config), fields(domain = %config.domain))]
    pub fn bootstrap(config: ProxyConfig) -> anyhow::Result<Self> {
        tracing::debug!("Bootstrapping proxy client");

        let mut document = schema::fetch(config.schema_uri.clone())?;

        // The proxy forwards requests below its own API path, so the
        // original base path (the ESI version prefix) is kept behind it
        let base_path = format!("{PROXY_ESI_PATH}{}", document.base_path().unwrap_or("/latest"));

        document.patch(&config.domain, base_path)?;
        document.store(&config.schema_path)?;

        let document = SchemaDocument::load(&config.schema_path)?;

        Ok(Self::new(&document, config)?)
    }

    /// Replace the default blocking transport
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);

        self
    }

    #[inline]
    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.get(id)
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    #[inline]
    pub fn authentication(&self) -> &AppAuthentication {
        &self.authentication
    }

    #[inline]
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Build and execute one request for a declared operation
    ///
    /// The descriptor's parameters are used as-is. In particular the
    /// `datasource` value the proxy requires (normally the character id
    /// again) must be supplied by the caller and is never rewritten
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn invoke(&self, operation_id: &str, request: RequestDescriptor) -> Result<ApiResponse, RequestError> {
        tracing::debug!("Invoking operation");

        let Some(operation) = self.operations.get(operation_id) else {
            return Err(RequestError::UnknownOperation(operation_id.to_string()));
        };

        let (path, params) = operation.resolve(&request)?;

        self.execute(PreparedRequest {
            method: operation.method,
            url: format!("{}://{}{}{path}", self.config.scheme.as_str(), self.host, self.base_path),
            headers: self.default_headers(),
            params,
            body: None
        })
    }

    /// Raw passthrough against the proxy endpoint itself
    ///
    /// Sends the ESI path and query string in the `esi-path-query`
    /// parameter, with an optional JSON body for POST requests
    #[tracing::instrument(level = "debug", skip(self, body))]
    pub fn invoke_raw(&self, method: Method, esi_path_query: &str, body: Option<Value>) -> Result<ApiResponse, RequestError> {
        tracing::debug!("Invoking raw ESI path");

        self.execute(PreparedRequest {
            method,
            url: format!("{}{PROXY_ESI_PATH}", self.config.origin()),
            headers: self.default_headers(),

            params: vec![
                (ESI_PATH_QUERY_PARAMETER.to_string(), esi_path_query.to_string()),
                (DATASOURCE_PARAMETER.to_string(), self.config.character_id.to_string())
            ],

            body
        })
    }

    fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            (String::from("Authorization"), self.authentication.header_value()),
            (String::from(EVE_CHARACTER_HEADER), self.config.character_id.to_string())
        ];

        if let Some(eve_login) = &self.config.eve_login {
            headers.push((String::from(EVE_LOGIN_HEADER), eve_login.clone()));
        }

        headers
    }

    fn execute(&self, request: PreparedRequest) -> Result<ApiResponse, RequestError> {
        let response = self.transport.execute(&request)?;

        if !(200..300).contains(&response.status_code) {
            tracing::error!("Proxy request failed with status {}", response.status_code);

            return Err(RequestError::Status {
                status: response.status_code,
                message: String::from_utf8_lossy(&response.body).trim().to_string()
            });
        }

        let body = if response.body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&response.body)?
        };

        Ok(ApiResponse::new(response.status_code, body))
    }
}

fn parse_operations(document: &SchemaDocument) -> Result<HashMap<String, Operation>, ConfigurationError> {
    let Some(paths) = document.paths() else {
        return Err(ConfigurationError::MissingPaths);
    };

    let mut operations = HashMap::new();

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            return Err(ConfigurationError::MalformedOperation {
                path: path.clone()
            });
        };

        // Parameters shared by every operation under this path
        let shared = parameter_names(item.get("parameters"));

        for (field, node) in item {
            let Ok(method) = Method::try_from(field.as_str()) else {
                // `parameters`, vendor extensions and the like
                continue;
            };

            let Some(node) = node.as_object() else {
                return Err(ConfigurationError::MalformedOperation {
                    path: path.clone()
                });
            };

            let Some(id) = node.get("operationId").and_then(Value::as_str) else {
                return Err(ConfigurationError::MissingOperationId {
                    path: path.clone()
                });
            };

            let mut parameters = shared.clone();

            parameters.extend(parameter_names(node.get("parameters")));

            operations.insert(id.to_string(), Operation {
                id: id.to_string(),
                method,
                path: path.clone(),
                parameters
            });
        }
    }

    if operations.is_empty() {
        return Err(ConfigurationError::NoOperations);
    }

    Ok(operations)
}

/// Names of the parameters declared by a swagger parameters array
///
/// References to the document's shared parameters (`#/parameters/<name>`)
/// are resolved by their last path segment, which is how the ESI
/// definition file names them
fn parameter_names(node: Option<&Value>) -> Vec<String> {
    let Some(parameters) = node.and_then(Value::as_array) else {
        return Vec::new();
    };

    parameters.iter()
        .filter_map(|parameter| {
            parameter.get("name")
                .and_then(Value::as_str)
                .or_else(|| parameter.get("$ref")
                    .and_then(Value::as_str)
                    .and_then(|reference| reference.rsplit('/').next()))
                .map(str::to_string)
        })
        .collect()
}
