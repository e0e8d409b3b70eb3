use std::process;
use std::sync::OnceLock;

use cornice_core::{CompatResult, HitRegion, Rect, WindowContext, WindowHandle, WindowRegistry};
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::{
    ButtonPressEvent, ClientMessageEvent, ConfigureNotifyEvent, ConnectionExt as _, EventMask,
    Window,
};
use x11rb::rust_connection::RustConnection;

use crate::atoms::{Atoms, MOVE_RESIZE_MOVE, MOVE_RESIZE_SOURCE_NORMAL};

static PUMP: OnceLock<EventPump> = OnceLock::new();

const BUTTON_PRIMARY: u8 = 1;
const BUTTON_SECONDARY: u8 = 3;

/// What the interceptor does with a button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChromeAction {
    /// Ask the window manager to start an interactive move of the root.
    BeginMove,
    /// Pop up the system window menu at the event position.
    ShowMenu,
    /// Swallow the event without further action.
    Consume,
    /// Hand the event to the host toolkit unchanged.
    Forward,
}

/// The process-wide intercepting event pump.
///
/// The host toolkit must drain X events through [`EventPump::next_event`]
/// instead of its own blocking read. Events belonging to borderless
/// chrome are consumed (or turned into window-manager requests) inside;
/// every other event is returned to the toolkit unchanged.
pub struct EventPump {
    conn: RustConnection,
    screen_root: Window,
    atoms: Atoms,
    registry: WindowRegistry,
}

impl EventPump {
    /// Returns the process-wide pump, connecting on first use.
    ///
    /// A missing display is fatal: callers rely on borderless mode
    /// having taken effect, so the process aborts rather than degrade
    /// silently.
    pub fn install() -> &'static EventPump {
        PUMP.get_or_init(|| match Self::connect() {
            Ok(pump) => pump,
            Err(err) => {
                cornice_core::log_error!("unable to open X display: {err}");
                eprintln!("cornice: unable to open X display: {err}");
                process::abort();
            }
        })
    }

    /// Returns the pump if it has been installed.
    pub fn instance() -> Option<&'static EventPump> {
        PUMP.get()
    }

    fn connect() -> CompatResult<EventPump> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let screen_root = conn.setup().roots[screen_num].root;
        let atoms = Atoms::new(&conn)?.reply()?;

        Ok(EventPump {
            conn,
            screen_root,
            atoms,
            registry: WindowRegistry::new(),
        })
    }

    pub fn connection(&self) -> &RustConnection {
        &self.conn
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    /// Blocks until an event the host toolkit should see arrives.
    ///
    /// Chrome events are handled here and never surface to the caller.
    pub fn next_event(&self) -> CompatResult<Event> {
        loop {
            let event = self.conn.wait_for_event()?;
            if !self.intercept(&event) {
                return Ok(event);
            }
        }
    }

    /// Returns `true` when the event was consumed by chrome handling.
    fn intercept(&self, event: &Event) -> bool {
        match event {
            Event::DestroyNotify(e) => {
                // Forwarded after cleanup: the toolkit still needs to
                // observe its own window going away.
                self.registry.unregister(e.window as WindowHandle);
                false
            }
            Event::ConfigureNotify(e) => {
                self.track_bounds(e);
                false
            }
            Event::ButtonPress(e) => self.on_button_press(e),
            Event::ButtonRelease(e) => self.on_button_release(e),
            _ => false,
        }
    }

    /// Records new root-window bounds from a configure event.
    ///
    /// Configure events on descendants are ignored: only the root's
    /// geometry drives hit-testing.
    fn track_bounds(&self, e: &ConfigureNotifyEvent) {
        let Some(context) = self.registry.lookup(e.window as WindowHandle) else {
            return;
        };
        if !context.is_root(e.window as WindowHandle) {
            return;
        }
        context.update_bounds(Rect::new(
            i32::from(e.x),
            i32::from(e.y),
            i32::from(e.width),
            i32::from(e.height),
        ));
    }

    fn on_button_press(&self, e: &ButtonPressEvent) -> bool {
        let Some(context) = self.registry.lookup(e.event as WindowHandle) else {
            return false;
        };
        let region = context.classify(i32::from(e.event_x), i32::from(e.event_y));

        match press_action(region, e.detail) {
            ChromeAction::BeginMove => {
                if let Err(err) = self.request_move(&context, e) {
                    cornice_core::log_warn!("move request for 0x{:X} failed: {err}", context.root());
                }
                true
            }
            ChromeAction::Consume => true,
            ChromeAction::Forward => false,
            // Menus only pop on release.
            ChromeAction::ShowMenu => true,
        }
    }

    fn on_button_release(&self, e: &ButtonPressEvent) -> bool {
        let Some(context) = self.registry.lookup(e.event as WindowHandle) else {
            return false;
        };
        let region = context.classify(i32::from(e.event_x), i32::from(e.event_y));

        match release_action(region, e.detail) {
            ChromeAction::ShowMenu => {
                if let Err(err) = self.request_menu(&context, e) {
                    cornice_core::log_warn!("menu request for 0x{:X} failed: {err}", context.root());
                }
                true
            }
            ChromeAction::Consume => true,
            _ => false,
        }
    }

    /// Sends `_NET_WM_MOVERESIZE` so the window manager performs the
    /// move (and any snapping) natively.
    fn request_move(&self, context: &WindowContext, e: &ButtonPressEvent) -> CompatResult<()> {
        let data = move_resize_data(i32::from(e.root_x), i32::from(e.root_y));
        let message = ClientMessageEvent::new(
            32,
            context.root() as Window,
            self.atoms._NET_WM_MOVERESIZE,
            data,
        );

        self.conn.send_event(
            false,
            self.screen_root,
            EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
            message,
        )?;
        self.conn.flush()?;
        Ok(())
    }

    /// Sends `_GTK_SHOW_WINDOW_MENU` to pop the system menu for the root.
    fn request_menu(&self, context: &WindowContext, e: &ButtonPressEvent) -> CompatResult<()> {
        let data = window_menu_data(i32::from(e.root_x), i32::from(e.root_y));
        let message = ClientMessageEvent::new(
            32,
            context.root() as Window,
            self.atoms._GTK_SHOW_WINDOW_MENU,
            data,
        );

        self.conn.send_event(
            false,
            self.screen_root,
            EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
            message,
        )?;
        self.conn.flush()?;
        Ok(())
    }
}

/// Decides what a button press does, given its hit classification.
fn press_action(region: HitRegion, button: u8) -> ChromeAction {
    match (region, button) {
        (HitRegion::Caption, BUTTON_PRIMARY) => ChromeAction::BeginMove,
        (HitRegion::Caption, BUTTON_SECONDARY) => ChromeAction::Consume,
        _ => ChromeAction::Forward,
    }
}

/// Decides what a button release does, given its hit classification.
fn release_action(region: HitRegion, button: u8) -> ChromeAction {
    match (region, button) {
        (HitRegion::Caption, BUTTON_PRIMARY) => ChromeAction::Consume,
        (HitRegion::Caption, BUTTON_SECONDARY) => ChromeAction::ShowMenu,
        _ => ChromeAction::Forward,
    }
}

/// `_NET_WM_MOVERESIZE` payload: anchor, action, button, source.
fn move_resize_data(x_root: i32, y_root: i32) -> [u32; 5] {
    [
        x_root as u32,
        y_root as u32,
        MOVE_RESIZE_MOVE,
        u32::from(BUTTON_PRIMARY),
        MOVE_RESIZE_SOURCE_NORMAL,
    ]
}

/// `_GTK_SHOW_WINDOW_MENU` payload: device, position.
fn window_menu_data(x_root: i32, y_root: i32) -> [u32; 5] {
    [0, x_root as u32, y_root as u32, 0, 0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornice_core::{ControlKind, ResizeEdge};

    #[test]
    fn primary_press_in_caption_begins_move() {
        assert_eq!(
            press_action(HitRegion::Caption, BUTTON_PRIMARY),
            ChromeAction::BeginMove
        );
    }

    #[test]
    fn primary_release_in_caption_is_consumed_without_second_move() {
        // The press already issued the move request; the release must
        // not issue another one.
        assert_eq!(
            release_action(HitRegion::Caption, BUTTON_PRIMARY),
            ChromeAction::Consume
        );
    }

    #[test]
    fn secondary_click_in_caption_menus_on_release_only() {
        assert_eq!(
            press_action(HitRegion::Caption, BUTTON_SECONDARY),
            ChromeAction::Consume
        );
        assert_eq!(
            release_action(HitRegion::Caption, BUTTON_SECONDARY),
            ChromeAction::ShowMenu
        );
    }

    #[test]
    fn clicks_outside_the_caption_are_forwarded() {
        for region in [
            HitRegion::Client,
            HitRegion::Edge(ResizeEdge::Left),
            HitRegion::Control(ControlKind::Close),
        ] {
            assert_eq!(press_action(region, BUTTON_PRIMARY), ChromeAction::Forward);
            assert_eq!(release_action(region, BUTTON_PRIMARY), ChromeAction::Forward);
        }
    }

    #[test]
    fn other_buttons_are_forwarded_even_in_caption() {
        assert_eq!(press_action(HitRegion::Caption, 2), ChromeAction::Forward);
        assert_eq!(release_action(HitRegion::Caption, 2), ChromeAction::Forward);
    }

    #[test]
    fn move_resize_payload_carries_anchor_and_action() {
        let data = move_resize_data(640, 480);

        assert_eq!(data, [640, 480, MOVE_RESIZE_MOVE, 1, MOVE_RESIZE_SOURCE_NORMAL]);
    }

    #[test]
    fn window_menu_payload_carries_position() {
        let data = window_menu_data(320, 200);

        assert_eq!(data, [0, 320, 200, 0, 0]);
    }
}
