use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// Which backing store a deployment writes signups to.
///
/// Resolved once at start-up, in priority order: privileged remote,
/// restricted remote, local fallback file, then nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StoreKind {
    PrivilegedRemote,
    RestrictedRemote,
    LocalFallback,
    Unconfigured,
}

impl StoreKind {
    /// Whether writes are actually persisted somewhere.
    pub fn is_persistent(&self) -> bool {
        !matches!(self, StoreKind::Unconfigured)
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, StoreKind::PrivilegedRemote | StoreKind::RestrictedRemote)
    }
}
