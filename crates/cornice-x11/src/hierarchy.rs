use std::sync::Arc;

use cornice_core::{WindowContext, WindowHandle, WindowRegistry};
use x11rb::protocol::xproto::{ConnectionExt as _, Window};
use x11rb::rust_connection::RustConnection;

/// Registers `root` and every window below it under one shared context.
///
/// Discovery walks the live tree with `QueryTree` at registration time.
/// A failed query is best-effort: windows discovered so far stay
/// registered, the missing subtree simply has no chrome behavior.
pub fn register(
    conn: &RustConnection,
    registry: &WindowRegistry,
    root: WindowHandle,
) -> Arc<WindowContext> {
    registry.register_hierarchy(root, |handle| children_of(conn, handle))
}

fn children_of(conn: &RustConnection, handle: WindowHandle) -> Vec<WindowHandle> {
    let reply = match conn.query_tree(handle as Window) {
        Ok(cookie) => cookie.reply(),
        Err(err) => Err(err.into()),
    };

    match reply {
        Ok(reply) => reply
            .children
            .iter()
            .map(|&child| child as WindowHandle)
            .collect(),
        Err(err) => {
            cornice_core::log_warn!("query_tree on 0x{handle:X} failed: {err}");
            Vec::new()
        }
    }
}
