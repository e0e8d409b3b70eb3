/// A boxed error type for shim operations.
///
/// Any error type that implements the `Error` trait can be boxed into
/// this, including the plain string errors the OS-facing crates produce.
pub type CompatResult<T> = Result<T, Box<dyn std::error::Error>>;
