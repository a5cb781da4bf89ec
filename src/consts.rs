/// Public ESI swagger definition file
pub const ESI_SWAGGER_URI: &str = "https://esi.evetech.net/latest/swagger.json";

/// Path under the proxy domain that forwards protected ESI requests
pub const PROXY_ESI_PATH: &str = "/api/app/v2/esi";

/// Name of the shared swagger parameter the proxy repurposes
/// to carry the id of the character whose ESI token should be used
pub const DATASOURCE_PARAMETER: &str = "datasource";

/// Header selecting the EVE character whose token the proxy should use
///
/// Has priority over the datasource parameter on the proxy side
pub const EVE_CHARACTER_HEADER: &str = "Neucore-EveCharacter";

/// Header selecting the EVE login the character's token was stored under
pub const EVE_LOGIN_HEADER: &str = "Neucore-EveLogin";

/// EVE login the proxy falls back to when no login header is sent
pub const DEFAULT_EVE_LOGIN: &str = "core.default";

/// Query parameter carrying a url-encoded ESI path and query string
/// for raw passthrough requests against the proxy endpoint itself
pub const ESI_PATH_QUERY_PARAMETER: &str = "esi-path-query";

/// Where the patched definition file is stored between runs
pub const DEFAULT_SCHEMA_PATH: &str = "esi-swagger-proxy.json";

/// Default requests timeout, in seconds
pub const DEFAULT_REQUESTS_TIMEOUT: u64 = 8;
