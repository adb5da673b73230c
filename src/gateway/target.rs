//! Backend target identifiers and attempt ordering.

use serde::Serialize;
use std::fmt;

/// Base URL of one analysis backend replica.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BackendTarget(String);

impl BackendTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join `path` onto the base URL, e.g. `endpoint("analyze/")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, de-duplicated set of interchangeable backend replicas.
#[derive(Debug, Clone)]
pub struct BackendTargets {
    targets: Vec<BackendTarget>,
}

impl BackendTargets {
    /// Build from configured URLs. Duplicates collapse onto their first
    /// occurrence, so two identical URLs yield a single attempt.
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut targets: Vec<BackendTarget> = Vec::new();
        for url in urls {
            let target = BackendTarget::new(url);
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        Self { targets }
    }

    pub fn primary(&self) -> Option<&BackendTarget> {
        self.targets.first()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackendTarget> {
        self.targets.iter()
    }

    /// Attempt order for one request.
    ///
    /// A `preferred` URL that exactly matches a configured target is moved to
    /// the front; anything else (including no hint) keeps configured order.
    pub fn ordered(&self, preferred: Option<&str>) -> Vec<BackendTarget> {
        let mut order = self.targets.clone();
        if let Some(hint) = preferred {
            match order.iter().position(|t| t.as_str() == hint) {
                Some(pos) => {
                    let chosen = order.remove(pos);
                    order.insert(0, chosen);
                }
                None => {
                    tracing::debug!(preferred = %hint, "Preferred backend not configured, using default order");
                }
            }
        }
        order
    }
}
