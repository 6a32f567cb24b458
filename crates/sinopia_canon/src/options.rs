//! Matcher settings.

use sinopia_carton::CompactString;

/// Functions that mount a component under test by default: Vue Test Utils,
/// Testing Library and the Nuxt test utils.
pub const DEFAULT_MOUNT_FUNCTIONS: &[&str] = &[
    "mount",
    "shallowMount",
    "render",
    "mountSuspended",
    "renderSuspended",
];

/// Coverage matching settings.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Callees whose second argument is a mount options object.
    pub mount_functions: Vec<CompactString>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            mount_functions: DEFAULT_MOUNT_FUNCTIONS
                .iter()
                .map(|name| CompactString::new(name))
                .collect(),
        }
    }
}

impl MatchOptions {
    #[inline]
    pub fn is_mount_function(&self, name: &str) -> bool {
        self.mount_functions.iter().any(|f| f == name)
    }

    /// Add a project-specific mount helper (`mountWithPlugins`).
    pub fn with_mount_function(mut self, name: impl Into<CompactString>) -> Self {
        let name = name.into();
        if !self.is_mount_function(&name) {
            self.mount_functions.push(name);
        }
        self
    }
}
