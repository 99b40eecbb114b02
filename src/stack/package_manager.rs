crate::define_id_enum! {
    /// JavaScript package manager managing a project
    PackageManagerId {
        Npm => "npm" : "npm",
        Yarn => "yarn" : "Yarn",
        Pnpm => "pnpm" : "pnpm",
        Bun => "bun" : "Bun",
    }
}

/// Lock file whose presence identifies a package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockFile {
    pub filename: &'static str,
    pub package_manager: PackageManagerId,
}

/// Recognized lock files in priority order. Newer/faster tools come first so an
/// alternate-runtime lock file wins over a leftover default one.
pub const LOCK_FILES: &[LockFile] = &[
    LockFile {
        filename: "bun.lockb",
        package_manager: PackageManagerId::Bun,
    },
    LockFile {
        filename: "bun.lock",
        package_manager: PackageManagerId::Bun,
    },
    LockFile {
        filename: "pnpm-lock.yaml",
        package_manager: PackageManagerId::Pnpm,
    },
    LockFile {
        filename: "yarn.lock",
        package_manager: PackageManagerId::Yarn,
    },
    LockFile {
        filename: "package-lock.json",
        package_manager: PackageManagerId::Npm,
    },
];

impl PackageManagerId {
    /// Command that runs the manifest's `build` script
    pub fn run_build(&self) -> String {
        match self {
            PackageManagerId::Npm => "npm run build".to_string(),
            PackageManagerId::Yarn => "yarn build".to_string(),
            other => format!("{} run build", other.as_str()),
        }
    }

    /// Always the explicit `<pm> run build` form
    pub fn run_script(&self, script: &str) -> String {
        format!("{} run {}", self.as_str(), script)
    }

    /// Prefix that executes a locally installed binary
    pub fn exec_prefix(&self) -> &'static str {
        match self {
            PackageManagerId::Npm => "npx",
            PackageManagerId::Yarn => "yarn",
            PackageManagerId::Pnpm => "pnpm exec",
            PackageManagerId::Bun => "bunx",
        }
    }
}
