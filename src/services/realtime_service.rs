use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::configs::settings::Realtime;
use crate::errors::RealtimeError;

/// Path-scoped access to the hierarchical realtime store.
#[async_trait]
pub trait RealtimeStore: Send + Sync {
    /// Read the value at `path`, `Value::Null` when absent.
    async fn get(&self, path: &str) -> Result<Value, RealtimeError>;

    /// Overwrite the value at `path`.
    async fn set(&self, path: &str, value: &Value) -> Result<(), RealtimeError>;

    /// Merge the children of `value` into the node at `path` in one call.
    async fn update(&self, path: &str, value: &Value) -> Result<(), RealtimeError>;
}

/// REST client for a Firebase-style realtime database.
#[derive(Clone)]
pub struct FirebaseClient {
    client: reqwest::Client,
    base_url: String,
    auth: Option<String>,
}

impl FirebaseClient {
    pub fn new(realtime: Realtime) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: realtime.url.trim_end_matches('/').to_string(),
            auth: realtime.auth,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }
}

#[async_trait]
impl RealtimeStore for FirebaseClient {
    async fn get(&self, path: &str) -> Result<Value, RealtimeError> {
        let response = self
            .with_auth(self.client.get(self.endpoint(path)))
            .send()
            .await?
            .error_for_status()?;

        let value = response.json().await?;
        debug!(path, "realtime store read");

        Ok(value)
    }

    async fn set(&self, path: &str, value: &Value) -> Result<(), RealtimeError> {
        self.with_auth(self.client.put(self.endpoint(path)))
            .json(value)
            .send()
            .await?
            .error_for_status()?;

        debug!(path, "realtime store write");

        Ok(())
    }

    async fn update(&self, path: &str, value: &Value) -> Result<(), RealtimeError> {
        self.with_auth(self.client.patch(self.endpoint(path)))
            .json(value)
            .send()
            .await?
            .error_for_status()?;

        debug!(path, "realtime store merge");

        Ok(())
    }
}

/// In-memory stand-in for the realtime store, for tests.
#[cfg(feature = "mock")]
#[derive(Default)]
pub struct MemoryRealtime {
    root: std::sync::RwLock<Value>,
}

#[cfg(feature = "mock")]
impl MemoryRealtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Value {
        self.root.read().unwrap().clone()
    }

    fn node<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(root, |node, segment| node.get(segment))
    }

    fn ensure<'a>(root: &'a mut Value, path: &str) -> &'a mut Value {
        let mut node = root;
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            if !matches!(node, Value::Object(_)) {
                *node = Value::Object(serde_json::Map::new());
            }
            let Value::Object(map) = node else {
                unreachable!()
            };
            node = map.entry(segment.to_string()).or_insert(Value::Null);
        }
        node
    }
}

#[cfg(feature = "mock")]
#[async_trait]
impl RealtimeStore for MemoryRealtime {
    async fn get(&self, path: &str) -> Result<Value, RealtimeError> {
        let root = self.root.read().unwrap();

        Ok(Self::node(&root, path).cloned().unwrap_or(Value::Null))
    }

    async fn set(&self, path: &str, value: &Value) -> Result<(), RealtimeError> {
        let mut root = self.root.write().unwrap();
        *Self::ensure(&mut root, path) = value.clone();

        Ok(())
    }

    async fn update(&self, path: &str, value: &Value) -> Result<(), RealtimeError> {
        let mut root = self.root.write().unwrap();
        let node = Self::ensure(&mut root, path);

        match value {
            Value::Object(entries) => {
                if !matches!(node, Value::Object(_)) {
                    *node = Value::Object(serde_json::Map::new());
                }
                let Value::Object(map) = node else {
                    unreachable!()
                };
                for (key, child) in entries {
                    map.insert(key.clone(), child.clone());
                }
            }
            other => *node = other.clone(),
        }

        Ok(())
    }
}
