//! HTTP client for the Zabbix JSON-RPC API

use crate::api::{ItemFilter, MonitoringApi};
use crate::config::ApiConfig;
use crate::error::{ApiError, RpcError};
use crate::rpc::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};
use zbxtrim_core::{ItemRecord, TemplateRecord};

const TEMPLATE_FIELDS: [&str; 2] = ["templateid", "name"];
const ITEM_FIELDS: [&str; 5] = ["itemid", "name", "key_", "history", "trends"];

/// How the token travels with authenticated requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    /// `Authorization: Bearer` header, Zabbix 6.4 and later
    Header,
    /// `auth` request field, Zabbix 5.4 to 6.2
    BodyField,
}

impl AuthMode {
    /// Pick the mode for a server version; API tokens exist since 5.4.
    ///
    /// Versions that do not parse are assumed to be current.
    fn for_version(version: &str) -> Result<Self, RpcError> {
        let mut parts = version.split('.').map(|p| p.parse::<u32>());
        let (Some(Ok(major)), Some(Ok(minor))) = (parts.next(), parts.next()) else {
            return Ok(AuthMode::Header);
        };
        match (major, minor) {
            (m, n) if (m, n) >= (6, 4) => Ok(AuthMode::Header),
            (m, n) if (m, n) >= (5, 4) => Ok(AuthMode::BodyField),
            _ => Err(RpcError::Unsupported(format!(
                "API tokens need Zabbix 5.4 or later, server runs {version}"
            ))),
        }
    }

    /// Params for `user.checkAuthentication`
    fn check_params(self, token: &str) -> Value {
        match self {
            AuthMode::Header => json!({ "token": token }),
            AuthMode::BodyField => json!({ "sessionid": token }),
        }
    }
}

/// Authenticated session against one Zabbix frontend
#[derive(Debug)]
pub struct ZabbixClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    api_version: String,
    auth_mode: AuthMode,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct UpdatedItems {
    #[serde(default)]
    itemids: Vec<Value>,
}

impl ZabbixClient {
    /// Connect and verify the token.
    ///
    /// Fails with [`ApiError::Connection`] when the server is unreachable,
    /// predates API tokens (5.4) or rejects the token.
    pub async fn connect(config: &ApiConfig) -> Result<Self, ApiError> {
        let endpoint = config.endpoint();
        let connection_error = |source: RpcError| ApiError::Connection {
            url: endpoint.clone(),
            source,
        };

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| connection_error(RpcError::Transport(e)))?;

        let mut client = Self {
            http,
            endpoint: endpoint.clone(),
            token: config.token.clone(),
            api_version: String::new(),
            auth_mode: AuthMode::Header,
            next_id: AtomicU64::new(1),
        };

        client.api_version = client
            .call("apiinfo.version", json!({}), false)
            .await
            .map_err(connection_error)?;
        client.auth_mode = AuthMode::for_version(&client.api_version).map_err(connection_error)?;

        let _: Value = client
            .call(
                "user.checkAuthentication",
                client.auth_mode.check_params(&client.token),
                false,
            )
            .await
            .map_err(connection_error)?;

        info!(
            endpoint = %client.endpoint,
            version = %client.api_version,
            auth = ?client.auth_mode,
            "connected to Zabbix API"
        );
        Ok(client)
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        authenticated: bool,
    ) -> Result<R, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "sending JSON-RPC request");

        let mut body = Request::new(method, params, id);
        let mut request = self.http.post(&self.endpoint);
        if authenticated {
            match self.auth_mode {
                AuthMode::Header => request = request.bearer_auth(&self.token),
                AuthMode::BodyField => body = body.with_auth(&self.token),
            }
        }

        let response: Response = request
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_result()
    }
}

impl MonitoringApi for ZabbixClient {
    async fn list_templates(&self, include_items: bool) -> Result<Vec<TemplateRecord>, ApiError> {
        let mut params = json!({ "output": TEMPLATE_FIELDS });
        if include_items {
            params["selectItems"] = json!(ITEM_FIELDS);
        }

        self.call("template.get", params, true)
            .await
            .map_err(|source| ApiError::Query {
                method: "template.get",
                source,
            })
    }

    async fn list_items(
        &self,
        template_id: &str,
        filter: Option<&ItemFilter>,
    ) -> Result<Vec<ItemRecord>, ApiError> {
        let mut params = json!({
            "templateids": [template_id],
            "output": ITEM_FIELDS,
        });
        if let Some(filter) = filter {
            params["filter"] = json!(filter);
        }

        self.call("item.get", params, true)
            .await
            .map_err(|source| ApiError::Query {
                method: "item.get",
                source,
            })
    }

    async fn update_item(
        &self,
        item_id: &str,
        history: Option<&str>,
        trends: Option<&str>,
    ) -> Result<(), ApiError> {
        if history.is_none() && trends.is_none() {
            debug!(item_id, "nothing to update");
            return Ok(());
        }

        let mut params = Map::new();
        params.insert("itemid".into(), json!(item_id));
        if let Some(history) = history {
            params.insert("history".into(), json!(history));
        }
        if let Some(trends) = trends {
            params.insert("trends".into(), json!(trends));
        }

        let mutation_error = |source: RpcError| ApiError::Mutation {
            item_id: item_id.to_string(),
            source,
        };

        let updated: UpdatedItems = self
            .call("item.update", Value::Object(params), true)
            .await
            .map_err(mutation_error)?;

        let applied = updated
            .itemids
            .iter()
            .any(|id| id.as_str() == Some(item_id) || id.to_string() == item_id);
        if applied {
            Ok(())
        } else {
            Err(mutation_error(RpcError::Decode(format!(
                "item.update did not report item {item_id}"
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_mode_by_version() {
        assert_eq!(AuthMode::for_version("7.0.5").unwrap(), AuthMode::Header);
        assert_eq!(AuthMode::for_version("6.4.0").unwrap(), AuthMode::Header);
        assert_eq!(AuthMode::for_version("6.0.30").unwrap(), AuthMode::BodyField);
        assert_eq!(AuthMode::for_version("5.4.12").unwrap(), AuthMode::BodyField);
        assert!(matches!(
            AuthMode::for_version("5.2.7"),
            Err(RpcError::Unsupported(_))
        ));
        assert_eq!(AuthMode::for_version("trunk").unwrap(), AuthMode::Header);
    }

    #[test]
    fn test_check_params_follow_mode() {
        assert_eq!(AuthMode::Header.check_params("t"), json!({"token": "t"}));
        assert_eq!(AuthMode::BodyField.check_params("t"), json!({"sessionid": "t"}));
    }
}
