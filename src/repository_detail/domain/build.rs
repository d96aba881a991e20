use chrono::{DateTime, Utc};

/// Build phase as reported by the registry's build state machine.
///
/// Only compared for equality here; the set of values belongs to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildPhase(String);

impl BuildPhase {
    pub fn new(phase: impl Into<String>) -> Self {
        Self(phase.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build record as delivered by the build history gateway
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRecord {
    pub id: String,
    pub phase: BuildPhase,
    pub started: DateTime<Utc>,
}

impl BuildRecord {
    pub fn new(id: impl Into<String>, phase: BuildPhase, started: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            phase,
            started,
        }
    }
}

/// Build record exposed to the view, with its display timestamp computed once
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    id: String,
    phase: BuildPhase,
    started: DateTime<Utc>,
    formatted_started: String,
}

impl Build {
    pub fn new(record: BuildRecord, formatted_started: String) -> Self {
        Self {
            id: record.id,
            phase: record.phase,
            started: record.started,
            formatted_started,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> &BuildPhase {
        &self.phase
    }

    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }

    pub fn formatted_started(&self) -> &str {
        &self.formatted_started
    }
}
