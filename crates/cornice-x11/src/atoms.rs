//! Atoms interned once per connection at pump installation.

x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        _NET_WM_MOVERESIZE,
        _GTK_SHOW_WINDOW_MENU,
        _MOTIF_WM_HINTS,
    }
}

/// `_NET_WM_MOVERESIZE` action: interactive move of the whole window.
pub const MOVE_RESIZE_MOVE: u32 = 8;

/// `_NET_WM_MOVERESIZE` source indication: a normal application.
pub const MOVE_RESIZE_SOURCE_NORMAL: u32 = 1;

/// Motif hints flag selecting the decorations field.
pub const MWM_HINTS_DECORATIONS: u32 = 1 << 1;
