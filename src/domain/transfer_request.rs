use super::Fidelity;

pub const TRANSFORMED_TITLE_SUFFIX: &str = "_compressed";

/// What a job does with the fetched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Re-render at reduced fidelity and write back to the source system.
    Compress,
    /// Copy as-is to the document drive.
    Relay,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Compress => "compress",
            JobKind::Relay => "relay",
        }
    }
}

/// Caller-supplied placement for the stored copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationHints {
    pub container_id: Option<String>,
    pub owner_id: Option<String>,
    pub title: Option<String>,
}

/// Immutable snapshot of an inbound transfer. Captured into the job record so
/// the background run never depends on request-scoped state.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub source_ref: String,
    pub fidelity: Option<Fidelity>,
    pub hints: DestinationHints,
}

impl TransferRequest {
    pub fn compress(
        source_ref: impl Into<String>,
        fidelity: Fidelity,
        hints: DestinationHints,
    ) -> Self {
        Self {
            source_ref: source_ref.into(),
            fidelity: Some(fidelity),
            hints,
        }
    }

    pub fn relay(source_ref: impl Into<String>, hints: DestinationHints) -> Self {
        Self {
            source_ref: source_ref.into(),
            fidelity: None,
            hints,
        }
    }

    pub fn kind(&self) -> JobKind {
        match self.fidelity {
            Some(_) => JobKind::Compress,
            None => JobKind::Relay,
        }
    }

    /// Title of the stored copy. An explicit title hint wins; transformed
    /// documents otherwise get a fixed suffix on the source title.
    pub fn output_title(&self, source_title: &str) -> String {
        if let Some(title) = self.hints.title.as_deref().filter(|t| !t.trim().is_empty()) {
            return title.to_string();
        }
        match self.kind() {
            JobKind::Compress => format!("{source_title}{TRANSFORMED_TITLE_SUFFIX}"),
            JobKind::Relay => source_title.to_string(),
        }
    }
}

/// Where the destination should file the stored copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerTarget {
    /// Explicit container from the caller.
    Parent(String),
    /// The container the source document already lives in.
    Inherited(String),
}

impl ContainerTarget {
    pub fn resolve(hint: Option<&str>, source_container: Option<&str>) -> Option<Self> {
        match (hint, source_container) {
            (Some(parent), _) if !parent.is_empty() => Some(Self::Parent(parent.to_string())),
            (_, Some(inherited)) if !inherited.is_empty() => {
                Some(Self::Inherited(inherited.to_string()))
            }
            _ => None,
        }
    }
}
