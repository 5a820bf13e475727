use std::fmt;

/// Whether regeneration may replace a file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Written only when absent; afterwards the file belongs to the user.
    CreateOnce,
    /// Rendered and overwritten on every run.
    AlwaysRegenerate,
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WritePolicy::CreateOnce => "created once, then yours to edit",
            WritePolicy::AlwaysRegenerate => "regenerated on every run",
        })
    }
}

/// Every file a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    ModuleDescriptor,
    EntryPoint,
    HandlerStub,
    HandlerContract,
    Models,
    Router,
    Guide,
}

/// One row of the artifact table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// Path relative to the output directory, `/`-separated.
    pub path: &'static str,
    pub policy: WritePolicy,
}

/// The artifact table, in emission order. Indexed by `ArtifactKind as usize`.
pub static ARTIFACTS: [Artifact; 7] = [
    Artifact {
        kind: ArtifactKind::ModuleDescriptor,
        path: "go.mod",
        policy: WritePolicy::CreateOnce,
    },
    Artifact {
        kind: ArtifactKind::EntryPoint,
        path: "main.go",
        policy: WritePolicy::CreateOnce,
    },
    Artifact {
        kind: ArtifactKind::HandlerStub,
        path: "handlers/api.go",
        policy: WritePolicy::CreateOnce,
    },
    Artifact {
        kind: ArtifactKind::HandlerContract,
        path: "generated/api/interfaces.go",
        policy: WritePolicy::AlwaysRegenerate,
    },
    Artifact {
        kind: ArtifactKind::Models,
        path: "generated/models/models.go",
        policy: WritePolicy::AlwaysRegenerate,
    },
    Artifact {
        kind: ArtifactKind::Router,
        path: "generated/server/router.go",
        policy: WritePolicy::AlwaysRegenerate,
    },
    Artifact {
        kind: ArtifactKind::Guide,
        path: "README.md",
        policy: WritePolicy::AlwaysRegenerate,
    },
];

/// Directories created before anything is written.
pub const LAYOUT_DIRS: [&str; 4] = [
    "generated/api",
    "generated/models",
    "generated/server",
    "handlers",
];

impl ArtifactKind {
    pub fn artifact(self) -> &'static Artifact {
        &ARTIFACTS[self as usize]
    }

    pub fn path(self) -> &'static str {
        self.artifact().path
    }

    pub fn policy(self) -> WritePolicy {
        self.artifact().policy
    }
}
