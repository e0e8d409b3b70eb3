use std::path::{Path, PathBuf};

use cornice_core::{CompatResult, PickerFilter, WindowHandle};

/// Shows the native open-file dialog, parented to `parent` if given.
///
/// Returns `Ok(None)` when the user dismisses the dialog without
/// choosing a file.
pub fn pick_file(
    parent: Option<WindowHandle>,
    title: &str,
    filters: &[PickerFilter],
) -> CompatResult<Option<PathBuf>> {
    #[cfg(windows)]
    {
        cornice_windows::dialog::pick_file(parent, title, filters)
    }
    #[cfg(target_os = "linux")]
    {
        cornice_x11::dialog::pick_file(parent, title, filters)
    }
}

/// Opens `path` with its default application, detached from the host.
pub fn launch_file(path: &Path) -> CompatResult<()> {
    open::that_detached(path)?;
    Ok(())
}
