use async_trait::async_trait;
use registry_detail::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock TagSecurityGateway reporting a configurable number of
/// vulnerabilities per tag
#[derive(Default)]
pub struct MockTagSecurityGateway {
    vulnerabilities: HashMap<String, usize>,
    failing_tags: Vec<String>,
    requested: Mutex<Vec<String>>,
}

impl MockTagSecurityGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vulnerabilities(mut self, tag_name: &str, count: usize) -> Self {
        self.vulnerabilities.insert(tag_name.to_string(), count);
        self
    }

    pub fn failing_for(mut self, tag_name: &str) -> Self {
        self.failing_tags.push(tag_name.to_string());
        self
    }

    pub fn requested_tags(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TagSecurityGateway for MockTagSecurityGateway {
    async fn fetch_tag_security(
        &self,
        _name: &RepositoryName,
        tag_name: &str,
    ) -> Result<SecuritySummary> {
        self.requested.lock().unwrap().push(tag_name.to_string());
        if self.failing_tags.iter().any(|t| t == tag_name) {
            anyhow::bail!("Mock scanner error for {}", tag_name);
        }

        let count = self.vulnerabilities.get(tag_name).copied().unwrap_or(0);
        let vulnerabilities: Vec<_> = (0..count)
            .map(|i| json!({"Name": format!("CVE-2024-{:04}", i), "Severity": "High"}))
            .collect();
        Ok(SecuritySummary::new(json!({
            "status": "scanned",
            "data": {"Layer": {"Features": [{"Name": "openssl", "Vulnerabilities": vulnerabilities}]}}
        })))
    }
}
