use crate::error::EmbedError;
use crate::options::GuiBackend;

/// One GUI backend known to the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendEntry {
    /// Backend selector used in [`WindowOptions`](crate::options::WindowOptions).
    pub backend: GuiBackend,
    /// Display name.
    pub name: &'static str,
    /// Cargo feature that compiles the backend in, empty if always present.
    pub feature: &'static str,
    /// Compiled into this build.
    pub available: bool,
}

static REGISTRY: [BackendEntry; 2] = [
    BackendEntry {
        backend: GuiBackend::Egui,
        name: "egui",
        feature: "egui",
        available: cfg!(feature = "egui"),
    },
    BackendEntry {
        backend: GuiBackend::Custom,
        name: "custom",
        feature: "",
        available: true,
    },
];

/// Every known backend, available or not.
#[must_use]
pub fn backends() -> &'static [BackendEntry] {
    &REGISTRY
}

/// Entry for `backend`.
///
/// # Errors
///
/// [`EmbedError::BackendUnavailable`] if the backend's feature was not
/// compiled in.
pub fn lookup(backend: GuiBackend) -> Result<&'static BackendEntry, EmbedError> {
    REGISTRY
        .iter()
        .find(|entry| entry.backend == backend && entry.available)
        .ok_or_else(|| {
            let entry = REGISTRY.iter().find(|entry| entry.backend == backend);
            EmbedError::BackendUnavailable {
                backend: entry.map_or("unknown", |e| e.name),
                feature: entry.map_or("", |e| e.feature),
            }
        })
}
