/// A file-type filter offered by the native open dialog.
///
/// `extensions` are bare extensions without dot or glob ("json", "yaml");
/// each backend renders them into its own pattern syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl PickerFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}
