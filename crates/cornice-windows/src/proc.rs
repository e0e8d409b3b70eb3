use cornice_core::{HitRegion, Rect, ResizeEdge};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallWindowProcW, DefWindowProcW, GWLP_WNDPROC, GetSystemMenu, GetWindowRect, HTBOTTOM,
    HTBOTTOMLEFT, HTBOTTOMRIGHT, HTCAPTION, HTCLIENT, HTLEFT, HTRIGHT, HTTOP, HTTOPLEFT,
    HTTOPRIGHT, HTTRANSPARENT, NCCALCSIZE_PARAMS, SendMessageW, SetWindowLongPtrW,
    TRACK_POPUP_MENU_FLAGS, TrackPopupMenu, WM_COMMAND, WM_DESTROY, WM_MOVE, WM_NCCALCSIZE,
    WM_NCHITTEST, WM_NCRBUTTONDOWN, WM_NCRBUTTONUP, WM_SIZE, WM_SYSCOMMAND, WNDPROC,
};

use crate::attach::{original_proc, remove_original_proc};
use crate::backend::registry;
use crate::frame;

/// Mask selecting system-command identifiers inside `WM_COMMAND`.
const SYSCOMMAND_MASK: usize = 0xF000;

/// The subclass procedure installed on every hierarchy member.
///
/// Chrome messages are answered from the shared context; everything
/// else goes to the procedure that owned the window before adaptation.
pub(crate) unsafe extern "system" fn delegate_window_procedure(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let previous = original_proc(hwnd);
    let handle = hwnd.0 as usize;

    let Some(context) = registry().lookup(handle) else {
        // Not (or no longer) part of a borderless hierarchy.
        return forward(previous, hwnd, msg, wparam, lparam);
    };
    let root = HWND(context.root() as *mut _);

    match msg {
        WM_NCHITTEST => {
            // Screen coordinates; the context tracks the root's bounds,
            // so translation to window space happens here.
            let state = context.snapshot();
            let bounds = state.bounds();
            let region = cornice_core::classify(
                &state,
                x_lparam(lparam) - bounds.x,
                y_lparam(lparam) - bounds.y,
            );
            let code = hit_code(region);

            if !context.is_root(handle) && code != HTCLIENT {
                // Let chrome input fall through the child onto the root;
                // ordinary client hits still reach the child normally.
                return LRESULT(HTTRANSPARENT as isize);
            }
            LRESULT(code as isize)
        }
        WM_NCCALCSIZE if context.is_root(handle) && wparam.0 != 0 => {
            // SAFETY: for WM_NCCALCSIZE with a non-zero wparam, lparam
            // points to NCCALCSIZE_PARAMS owned by the sender.
            unsafe {
                let params = &mut *(lparam.0 as *mut NCCALCSIZE_PARAMS);
                params.rgrc[0].top += frame::caption_padding(hwnd);
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            registry().unregister(handle);

            // Restore the original procedure so the dying window never
            // re-enters this one.
            if let Some(proc) = previous {
                // SAFETY: proc came out of GetWindowLongPtrW for this
                // window; putting it back is the documented unhook.
                unsafe {
                    SetWindowLongPtrW(hwnd, GWLP_WNDPROC, proc as usize as isize);
                }
            }
            remove_original_proc(hwnd);

            forward(previous, hwnd, msg, wparam, lparam)
        }
        WM_SIZE | WM_MOVE if context.is_root(handle) => {
            let mut rect = RECT::default();
            // SAFETY: GetWindowRect fills the RECT for a valid handle.
            if unsafe { GetWindowRect(hwnd, &mut rect) }.is_ok() {
                // Maximized windows hang past the monitor edge by the
                // padded border; track the visible top instead.
                let top = rect.top + frame::caption_padding(hwnd);
                context.update_bounds(Rect::from_edges(rect.left, top, rect.right, rect.bottom));
            }

            forward(previous, hwnd, msg, wparam, lparam)
        }
        WM_NCRBUTTONDOWN if wparam.0 == HTCAPTION as usize => LRESULT(0),
        WM_NCRBUTTONUP if wparam.0 == HTCAPTION as usize => {
            // SAFETY: GetSystemMenu/TrackPopupMenu operate on the root
            // handle; TrackPopupMenu runs its own modal message loop.
            unsafe {
                let menu = GetSystemMenu(root, false);
                let _ = TrackPopupMenu(
                    menu,
                    TRACK_POPUP_MENU_FLAGS(0),
                    x_lparam(lparam),
                    y_lparam(lparam),
                    0,
                    root,
                    None,
                );
            }
            LRESULT(0)
        }
        WM_COMMAND if wparam.0 & SYSCOMMAND_MASK != 0 => {
            // A system-menu command arriving as WM_COMMAND (e.g. from a
            // descendant's menu) is replayed as the real thing.
            unsafe { SendMessageW(hwnd, WM_SYSCOMMAND, Some(wparam), Some(lparam)) }
        }
        WM_SYSCOMMAND => {
            // System commands are always the root's business.
            unsafe { DefWindowProcW(root, msg, wparam, lparam) }
        }
        _ => forward(previous, hwnd, msg, wparam, lparam),
    }
}

/// Hands a message to the pre-adaptation procedure.
///
/// A window that somehow lost its stored procedure falls back to the
/// default procedure rather than jumping through null.
fn forward(previous: WNDPROC, hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if previous.is_some() {
        // SAFETY: the stored procedure was read from this window before
        // the subclass replaced it.
        unsafe { CallWindowProcW(previous, hwnd, msg, wparam, lparam) }
    } else {
        // SAFETY: DefWindowProcW accepts any valid window handle.
        unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
    }
}

/// Maps a symbolic hit region onto the Win32 `WM_NCHITTEST` codes.
///
/// Control regions answer `HTCLIENT`: the buttons are caller-drawn, so
/// the caller must receive their mouse input.
fn hit_code(region: HitRegion) -> i32 {
    match region {
        HitRegion::Client | HitRegion::Control(_) => HTCLIENT,
        HitRegion::Caption => HTCAPTION,
        HitRegion::Edge(ResizeEdge::Left) => HTLEFT,
        HitRegion::Edge(ResizeEdge::Right) => HTRIGHT,
        HitRegion::Edge(ResizeEdge::Top) => HTTOP,
        HitRegion::Edge(ResizeEdge::Bottom) => HTBOTTOM,
        HitRegion::Edge(ResizeEdge::TopLeft) => HTTOPLEFT,
        HitRegion::Edge(ResizeEdge::TopRight) => HTTOPRIGHT,
        HitRegion::Edge(ResizeEdge::BottomLeft) => HTBOTTOMLEFT,
        HitRegion::Edge(ResizeEdge::BottomRight) => HTBOTTOMRIGHT,
    }
}

/// Low word of an lparam as a signed coordinate.
fn x_lparam(lparam: LPARAM) -> i32 {
    i32::from((lparam.0 & 0xFFFF) as u16 as i16)
}

/// High word of an lparam as a signed coordinate.
fn y_lparam(lparam: LPARAM) -> i32 {
    i32::from(((lparam.0 >> 16) & 0xFFFF) as u16 as i16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornice_core::ControlKind;

    #[test]
    fn controls_and_client_answer_htclient() {
        assert_eq!(hit_code(HitRegion::Client), HTCLIENT);
        assert_eq!(hit_code(HitRegion::Control(ControlKind::Close)), HTCLIENT);
        assert_eq!(hit_code(HitRegion::Control(ControlKind::Minimize)), HTCLIENT);
    }

    #[test]
    fn caption_and_edges_answer_their_codes() {
        assert_eq!(hit_code(HitRegion::Caption), HTCAPTION);
        assert_eq!(hit_code(HitRegion::Edge(ResizeEdge::Left)), HTLEFT);
        assert_eq!(hit_code(HitRegion::Edge(ResizeEdge::TopLeft)), HTTOPLEFT);
        assert_eq!(hit_code(HitRegion::Edge(ResizeEdge::BottomRight)), HTBOTTOMRIGHT);
    }

    #[test]
    fn lparam_coordinates_sign_extend() {
        // (-5, -10) packed as two 16-bit words.
        let packed = LPARAM(((-10i16 as u16 as isize) << 16) | (-5i16 as u16 as isize));

        assert_eq!(x_lparam(packed), -5);
        assert_eq!(y_lparam(packed), -10);
    }
}
