//! Native file-open dialog through the common item dialog.

use std::path::PathBuf;

use cornice_core::{CompatResult, PickerFilter, WindowHandle};
use windows::Win32::Foundation::HWND;
use windows::Win32::System::Com::{
    CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx,
    CoTaskMemFree,
};
use windows::Win32::UI::Shell::Common::COMDLG_FILTERSPEC;
use windows::Win32::UI::Shell::{
    FOS_FILEMUSTEXIST, FOS_FORCEFILESYSTEM, FileOpenDialog, IFileOpenDialog, SIGDN_FILESYSPATH,
};
use windows::core::PCWSTR;

/// Shows the open-file dialog, parented to `parent` if given.
///
/// Returns `Ok(None)` when the user cancels.
pub fn pick_file(
    parent: Option<WindowHandle>,
    title: &str,
    filters: &[PickerFilter],
) -> CompatResult<Option<PathBuf>> {
    // SAFETY: standard common-item-dialog COM sequence. All raw
    // pointers handed to the dialog (title, filter specs) point into
    // buffers that outlive the Show call below.
    unsafe {
        // Repeat initialization on an already-initialized thread is
        // harmless; the dialog only needs an apartment to exist.
        let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED);

        let dialog: IFileOpenDialog =
            CoCreateInstance(&FileOpenDialog, None, CLSCTX_INPROC_SERVER)?;

        let mut options = dialog.GetOptions()?;
        options |= FOS_FORCEFILESYSTEM | FOS_FILEMUSTEXIST;
        dialog.SetOptions(options)?;

        let wide_title = wide(title);
        dialog.SetTitle(PCWSTR(wide_title.as_ptr()))?;

        let filter_data: Vec<(Vec<u16>, Vec<u16>)> = filters
            .iter()
            .map(|f| (wide(&f.name), wide(&spec_pattern(f))))
            .collect();
        let specs: Vec<COMDLG_FILTERSPEC> = filter_data
            .iter()
            .map(|(name, spec)| COMDLG_FILTERSPEC {
                pszName: PCWSTR(name.as_ptr()),
                pszSpec: PCWSTR(spec.as_ptr()),
            })
            .collect();
        if !specs.is_empty() {
            dialog.SetFileTypes(&specs)?;
        }

        let owner = parent.map(|handle| HWND(handle as *mut _));
        if dialog.Show(owner).is_err() {
            // Dismissed; not an error at this boundary.
            return Ok(None);
        }

        let item = dialog.GetResult()?;
        let raw = item.GetDisplayName(SIGDN_FILESYSPATH)?;
        let path = raw.to_string();
        CoTaskMemFree(Some(raw.as_ptr() as *const _));

        Ok(Some(PathBuf::from(path?)))
    }
}

/// NUL-terminated UTF-16 for the dialog APIs.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Renders a filter's extensions into dialog pattern syntax.
fn spec_pattern(filter: &PickerFilter) -> String {
    if filter.extensions.iter().any(|e| e == "*") {
        return "*.*".to_string();
    }
    filter
        .extensions
        .iter()
        .map(|e| format!("*.{e}"))
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_join_extensions() {
        let filter = PickerFilter::new("Configs", &["yaml", "toml"]);

        assert_eq!(spec_pattern(&filter), "*.yaml;*.toml");
    }

    #[test]
    fn wildcard_extension_collapses_to_match_all() {
        let filter = PickerFilter::new("All files", &["*"]);

        assert_eq!(spec_pattern(&filter), "*.*");
    }

    #[test]
    fn wide_strings_are_nul_terminated() {
        let buffer = wide("ab");

        assert_eq!(buffer, vec![97, 98, 0]);
    }
}
