//! File-open dialog through the XDG Desktop Portal.
//!
//! The portal call is async D-Bus; `pollster` bridges it to the shim's
//! synchronous boundary. Portal dialogs run out of process, so blocking
//! the calling thread here is safe.

use std::path::PathBuf;

use ashpd::WindowIdentifier;
use ashpd::desktop::file_chooser::{FileFilter, SelectedFiles};
use cornice_core::{CompatResult, PickerFilter, WindowHandle};

/// Shows the portal open-file dialog, parented to `parent` if given.
///
/// Returns `Ok(None)` when the user cancels.
pub fn pick_file(
    parent: Option<WindowHandle>,
    title: &str,
    filters: &[PickerFilter],
) -> CompatResult<Option<PathBuf>> {
    let response = pollster::block_on(async {
        let mut request = SelectedFiles::open_file()
            .title(title)
            .modal(true)
            .multiple(false);

        if let Some(xid) = parent {
            request = request.identifier(WindowIdentifier::from_xid(xid as u64));
        }
        for filter in filters {
            request = request.filter(portal_filter(filter));
        }

        request.send().await?.response()
    });

    match response {
        Ok(files) => Ok(files
            .uris()
            .first()
            .and_then(|uri| uri.to_file_path().ok())),
        // The user dismissing the dialog is not an error.
        Err(ashpd::Error::Response(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn portal_filter(filter: &PickerFilter) -> FileFilter {
    let mut portal = FileFilter::new(&filter.name);
    for ext in &filter.extensions {
        if ext != "*" {
            portal = portal.glob(&format!("*.{ext}"));
        }
    }
    portal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_convert_without_panicking() {
        let filter = PickerFilter::new("Configs", &["yaml", "toml", "*"]);

        // FileFilter has no inspection API; conversion succeeding is
        // the whole contract here.
        let _ = portal_filter(&filter);
    }
}
