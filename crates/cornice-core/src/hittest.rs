use crate::context::ContextState;
use crate::kinds::{ControlKind, FrameKind, HitRegion, ResizeEdge};

/// Classifies a window-relative point against a context's layout state.
///
/// Precedence: control regions, then resize corners, then resize edges,
/// then the caption band, then ordinary client area. Pure function; the
/// unit boundary for the whole engine.
pub fn classify(state: &ContextState, x: i32, y: i32) -> HitRegion {
    for control in ControlKind::ALL {
        if state.control(control).contains(x, y) {
            return HitRegion::Control(control);
        }
    }

    let bounds = state.bounds();
    let inset = state.frame_size(FrameKind::EdgeInset);

    let in_left = x < inset;
    let in_top = y < inset;
    let in_right = x > bounds.width - inset;
    let in_bottom = y > bounds.height - inset;

    if in_top {
        if in_left {
            return HitRegion::Edge(ResizeEdge::TopLeft);
        }
        if in_right {
            return HitRegion::Edge(ResizeEdge::TopRight);
        }
        return HitRegion::Edge(ResizeEdge::Top);
    }
    if in_bottom {
        if in_left {
            return HitRegion::Edge(ResizeEdge::BottomLeft);
        }
        if in_right {
            return HitRegion::Edge(ResizeEdge::BottomRight);
        }
        return HitRegion::Edge(ResizeEdge::Bottom);
    }
    if in_left {
        return HitRegion::Edge(ResizeEdge::Left);
    }
    if in_right {
        return HitRegion::Edge(ResizeEdge::Right);
    }

    if y < state.frame_size(FrameKind::TitleBar) {
        return HitRegion::Caption;
    }

    HitRegion::Client
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::WindowContext;
    use crate::rect::Rect;

    /// 800x600 window with a 4px resize inset and a 32px caption band.
    fn context() -> WindowContext {
        let ctx = WindowContext::new(0x1000);
        ctx.update_bounds(Rect::new(0, 0, 800, 600));
        ctx.set_frame_size(FrameKind::EdgeInset, 4);
        ctx.set_frame_size(FrameKind::TitleBar, 32);
        ctx
    }

    #[test]
    fn left_edge_band() {
        let ctx = context();

        assert_eq!(ctx.classify(2, 300), HitRegion::Edge(ResizeEdge::Left));
        // One pixel past the inset is no longer an edge.
        assert_eq!(ctx.classify(5, 300), HitRegion::Client);
    }

    #[test]
    fn corners_take_precedence_over_single_edges() {
        let ctx = context();

        assert_eq!(ctx.classify(2, 2), HitRegion::Edge(ResizeEdge::TopLeft));
        assert_eq!(ctx.classify(798, 2), HitRegion::Edge(ResizeEdge::TopRight));
        assert_eq!(ctx.classify(2, 598), HitRegion::Edge(ResizeEdge::BottomLeft));
        assert_eq!(ctx.classify(798, 598), HitRegion::Edge(ResizeEdge::BottomRight));
    }

    #[test]
    fn remaining_edges() {
        let ctx = context();

        assert_eq!(ctx.classify(400, 2), HitRegion::Edge(ResizeEdge::Top));
        assert_eq!(ctx.classify(400, 598), HitRegion::Edge(ResizeEdge::Bottom));
        assert_eq!(ctx.classify(798, 300), HitRegion::Edge(ResizeEdge::Right));
    }

    #[test]
    fn caption_band_below_edge_inset() {
        let ctx = context();

        assert_eq!(ctx.classify(400, 10), HitRegion::Caption);
        assert_eq!(ctx.classify(400, 31), HitRegion::Caption);
        assert_eq!(ctx.classify(400, 33), HitRegion::Client);
    }

    #[test]
    fn client_area_everywhere_else() {
        let ctx = context();

        assert_eq!(ctx.classify(400, 100), HitRegion::Client);
    }

    #[test]
    fn controls_win_over_caption() {
        let ctx = context();
        ctx.set_control_position(ControlKind::Close, 770, 0, 800, 32);

        assert_eq!(ctx.classify(785, 10), HitRegion::Control(ControlKind::Close));
        // Outside the control the caption band still applies.
        assert_eq!(ctx.classify(400, 10), HitRegion::Caption);
    }

    #[test]
    fn controls_win_over_edges() {
        let ctx = context();
        ctx.set_control_position(ControlKind::Back, 0, 0, 40, 40);

        // (2, 20) sits in the left edge band but also inside the control.
        assert_eq!(ctx.classify(2, 20), HitRegion::Control(ControlKind::Back));
    }

    #[test]
    fn zero_frame_sizes_classify_everything_as_client() {
        let ctx = WindowContext::new(0x1000);
        ctx.update_bounds(Rect::new(0, 0, 800, 600));

        assert_eq!(ctx.classify(0, 0), HitRegion::Client);
        assert_eq!(ctx.classify(400, 10), HitRegion::Client);
    }
}
