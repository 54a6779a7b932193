//! The content-stream interpreter.
//!
//! Consumes a decoded operator list plus a page-to-device viewport matrix,
//! maintains a graphics-state stack, and emits device-space pending draws.
//! Every point is mapped user space → device space at record time, so the
//! live segment buffer is always device-space.
//!
//! Unknown or malformed operations are skipped without touching state; the
//! interpreter itself never fails.

use smallvec::SmallVec;

use super::graphics_state::GraphicsState;
use super::operator::{OpCode, Operation, OperatorList, PathOp, Value};
use crate::geometry::{Matrix, PendingPath, Point, VectorSegment};
use crate::scene::{
    FillRule, FillStyle, LineCap, LineJoin, PendingClip, PendingDraw, StrokeStyle, VectorStyle,
};
use crate::style::{ColorScheme, Rgb, format_color};

/// Stack-based graphics-state machine over a content-stream operator list.
pub struct ContentStreamInterpreter {
    /// Page-to-device transform from the viewport.
    viewport: Matrix,
    scheme: ColorScheme,
    custom_color: Option<Rgb>,

    state: GraphicsState,
    state_stack: Vec<GraphicsState>,

    /// Live path buffer, device space.
    segments: Vec<VectorSegment>,
    /// Device-space current point.
    current_point: Point,
    /// Device-space start of the current subpath (target of `closePath`).
    subpath_start: Point,

    draws: Vec<PendingDraw>,
}

impl ContentStreamInterpreter {
    pub fn new(viewport: Matrix, scheme: ColorScheme, custom_color: Option<Rgb>) -> Self {
        ContentStreamInterpreter {
            viewport,
            scheme,
            custom_color,
            state: GraphicsState::default(),
            state_stack: Vec::new(),
            segments: Vec::new(),
            current_point: Point::default(),
            subpath_start: Point::default(),
            draws: Vec::new(),
        }
    }

    /// Interpret a whole operator list and return the pending draws.
    pub fn run(mut self, list: &OperatorList) -> Vec<PendingDraw> {
        for op in &list.operations {
            self.process_operation(op);
        }
        self.draws
    }

    /// Consume the interpreter, returning the draws emitted so far.
    pub fn finish(self) -> Vec<PendingDraw> {
        self.draws
    }

    /// The full user-space → device-space matrix.
    fn device_matrix(&self) -> Matrix {
        Matrix::multiply(self.state.ctm, self.viewport)
    }

    fn map(&self, x: f64, y: f64) -> Point {
        self.device_matrix().apply_xy(x, y)
    }

    /// Dispatch one operation. Exhaustive over the closed operator set.
    pub fn process_operation(&mut self, op: &Operation) {
        match op.op {
            OpCode::Save => self.save(),
            OpCode::Restore => self.restore(),
            OpCode::Transform => self.transform(op),

            OpCode::SetLineWidth => {
                if let Some(w) = op.number(0) {
                    self.state.set_line_width(w);
                }
            }
            OpCode::SetLineCap => {
                if let Some(v) = op.number(0) {
                    self.state.line_cap = LineCap::from_pdf(v as i64);
                }
            }
            OpCode::SetLineJoin => {
                if let Some(v) = op.number(0) {
                    self.state.line_join = LineJoin::from_pdf(v as i64);
                }
            }
            OpCode::SetMiterLimit => {
                if let Some(v) = op.number(0) {
                    self.state.miter_limit = v;
                }
            }
            OpCode::SetDash => self.set_dash(op),
            OpCode::SetGState => self.set_gstate(op),

            OpCode::SetStrokeColor
            | OpCode::SetStrokeGray
            | OpCode::SetStrokeRGBColor
            | OpCode::SetStrokeCMYKColor => self.set_stroke_color(op),
            OpCode::SetFillColor
            | OpCode::SetFillGray
            | OpCode::SetFillRGBColor
            | OpCode::SetFillCMYKColor => self.set_fill_color(op),

            OpCode::ConstructPath => self.construct_path(op),

            OpCode::Clip => self.clip(FillRule::NonZero),
            OpCode::EOClip => self.clip(FillRule::EvenOdd),
            OpCode::EndPath => self.clear_path(),

            OpCode::Stroke => self.paint(false, false, true, false),
            OpCode::CloseStroke => self.paint(true, false, true, false),
            OpCode::Fill => self.paint(false, true, false, false),
            OpCode::EOFill => self.paint(false, true, false, true),
            OpCode::FillStroke => self.paint(false, true, true, false),
            OpCode::EOFillStroke => self.paint(false, true, true, true),
            OpCode::CloseFillStroke => self.paint(true, true, true, false),
            OpCode::CloseEOFillStroke => self.paint(true, true, true, true),
        }
    }

    // === Graphics state ===

    fn save(&mut self) {
        self.state_stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        // Restoring past the outermost save leaves state unchanged.
        if let Some(prev) = self.state_stack.pop() {
            self.state = prev;
        }
    }

    fn transform(&mut self, op: &Operation) {
        let mut m = [0.0; 6];
        for (i, slot) in m.iter_mut().enumerate() {
            match op.number(i) {
                Some(n) => *slot = n,
                None => {
                    log::debug!("transform with missing operand {}; skipped", i);
                    return;
                }
            }
        }
        self.state.ctm = Matrix::multiply(Matrix(m), self.state.ctm);
    }

    fn set_dash(&mut self, op: &Operation) {
        match op.args.first() {
            Some(Value::Array(pattern)) => {
                self.state.dash = SmallVec::from_slice(pattern);
            }
            _ => self.state.dash.clear(),
        }
        self.state.dash_offset = op.number(1).unwrap_or(0.0);
    }

    fn set_gstate(&mut self, op: &Operation) {
        // One or many parameter dictionaries; only ca/CA are consumed.
        for arg in &op.args {
            if let Value::Dict(params) = arg {
                for (key, value) in params {
                    match key.as_str() {
                        "ca" => self.state.set_fill_alpha(*value),
                        "CA" => self.state.set_stroke_alpha(*value),
                        _ => {}
                    }
                }
            }
        }
    }

    // === Color ===

    fn color_components(op: &Operation) -> SmallVec<[f64; 4]> {
        op.args.iter().filter_map(Value::as_number).collect()
    }

    fn set_stroke_color(&mut self, op: &Operation) {
        let resolved = format_color(&Self::color_components(op));
        self.state.stroke_color = self.scheme.apply(Some(resolved), self.custom_color);
    }

    fn set_fill_color(&mut self, op: &Operation) {
        let resolved = format_color(&Self::color_components(op));
        // Near-white fills are page background; suppress to transparent.
        let filtered = if resolved.is_near_white() {
            None
        } else {
            Some(resolved)
        };
        self.state.fill_color = self.scheme.apply(filtered, self.custom_color);
    }

    // === Path construction ===

    fn construct_path(&mut self, op: &Operation) {
        let (ops, data) = match (op.args.first(), op.args.get(1)) {
            (Some(Value::Ops(ops)), Some(Value::Array(data))) => (ops, data),
            _ => {
                log::debug!("constructPath with malformed operands; skipped");
                return;
            }
        };

        // PDF allows a path to continue implicitly: when the buffer is empty
        // and the first sub-op is not a move or rectangle, start a subpath
        // at the current point.
        if self.segments.is_empty()
            && !matches!(ops.first(), Some(PathOp::MoveTo) | Some(PathOp::Rectangle) | None)
        {
            self.segments.push(VectorSegment::Move {
                to: self.current_point,
            });
            self.subpath_start = self.current_point;
        }

        let mut cursor = 0usize;
        // Reading past the buffer coerces to 0.0: a truncated operator
        // degrades to degenerate geometry instead of crashing.
        let mut next = |cursor: &mut usize| -> f64 {
            let v = data.get(*cursor).copied().unwrap_or(0.0);
            *cursor += 1;
            v
        };

        for path_op in ops {
            match path_op {
                PathOp::MoveTo => {
                    let p = self.map(next(&mut cursor), next(&mut cursor));
                    self.segments.push(VectorSegment::Move { to: p });
                    self.current_point = p;
                    self.subpath_start = p;
                }
                PathOp::LineTo => {
                    let p = self.map(next(&mut cursor), next(&mut cursor));
                    self.segments.push(VectorSegment::Line { to: p });
                    self.current_point = p;
                }
                PathOp::CurveTo => {
                    let c1 = self.map(next(&mut cursor), next(&mut cursor));
                    let c2 = self.map(next(&mut cursor), next(&mut cursor));
                    let to = self.map(next(&mut cursor), next(&mut cursor));
                    self.segments.push(VectorSegment::Cubic {
                        ctrl1: c1,
                        ctrl2: c2,
                        to,
                    });
                    self.current_point = to;
                }
                PathOp::CurveTo2 => {
                    // v: first control point is the current point.
                    let c2 = self.map(next(&mut cursor), next(&mut cursor));
                    let to = self.map(next(&mut cursor), next(&mut cursor));
                    self.segments.push(VectorSegment::Cubic {
                        ctrl1: self.current_point,
                        ctrl2: c2,
                        to,
                    });
                    self.current_point = to;
                }
                PathOp::CurveTo3 => {
                    // y: second control point coincides with the endpoint.
                    let c1 = self.map(next(&mut cursor), next(&mut cursor));
                    let to = self.map(next(&mut cursor), next(&mut cursor));
                    self.segments.push(VectorSegment::Cubic {
                        ctrl1: c1,
                        ctrl2: to,
                        to,
                    });
                    self.current_point = to;
                }
                PathOp::Rectangle => {
                    let x = next(&mut cursor);
                    let y = next(&mut cursor);
                    let w = next(&mut cursor);
                    let h = next(&mut cursor);
                    let p0 = self.map(x, y);
                    let p1 = self.map(x + w, y);
                    let p2 = self.map(x + w, y + h);
                    let p3 = self.map(x, y + h);
                    self.segments.push(VectorSegment::Move { to: p0 });
                    self.segments.push(VectorSegment::Line { to: p1 });
                    self.segments.push(VectorSegment::Line { to: p2 });
                    self.segments.push(VectorSegment::Line { to: p3 });
                    self.segments.push(VectorSegment::Close);
                    self.subpath_start = p0;
                    self.current_point = p0;
                }
                PathOp::ClosePath => {
                    self.segments.push(VectorSegment::Close);
                    self.current_point = self.subpath_start;
                }
            }
        }
    }

    // === Clipping ===

    fn clip(&mut self, fill_rule: FillRule) {
        if self.segments.is_empty() {
            return;
        }
        // Snapshot without clearing; the following paint or endPath still
        // owns the live path. Clipping affects only draws painted after
        // this op in the same state scope.
        let path = PendingPath::from_segments(self.segments.clone(), false);
        self.state.clip_stack.push(PendingClip { path, fill_rule });
    }

    fn clear_path(&mut self) {
        self.segments.clear();
    }

    // === Painting ===

    fn paint(&mut self, close: bool, fill: bool, stroke: bool, even_odd: bool) {
        if self.segments.is_empty() {
            return;
        }

        let mut segments = self.segments.clone();
        if close && !matches!(segments.last(), Some(VectorSegment::Close)) {
            segments.push(VectorSegment::Close);
        }
        let path = PendingPath::from_segments(segments, close);

        let fill_rule = if even_odd {
            FillRule::EvenOdd
        } else {
            FillRule::NonZero
        };
        let device_scale = self.device_matrix().average_scale();

        if fill {
            if let Some(color) = self.state.fill_color {
                self.draws.push(PendingDraw {
                    path: path.clone(),
                    style: VectorStyle {
                        stroke: None,
                        fill: Some(FillStyle { color }),
                        fill_rule,
                        opacity: self.state.fill_alpha,
                    },
                    clip_stack: self.state.clip_stack.clone(),
                });
            }
        }

        if stroke {
            let width = self.state.line_width * device_scale;
            if let Some(color) = self.state.stroke_color {
                if width > 0.0 {
                    let dash = if self.state.dash.is_empty() {
                        None
                    } else {
                        Some(self.state.dash.iter().map(|d| d * device_scale).collect())
                    };
                    let dash_offset = dash
                        .as_ref()
                        .map(|_| self.state.dash_offset * device_scale);
                    self.draws.push(PendingDraw {
                        path,
                        style: VectorStyle {
                            stroke: Some(StrokeStyle {
                                color,
                                width,
                                cap: self.state.line_cap,
                                join: self.state.line_join,
                                miter_limit: self.state.miter_limit,
                                dash,
                                dash_offset,
                            }),
                            fill: None,
                            fill_rule,
                            opacity: self.state.stroke_alpha,
                        },
                        clip_stack: self.state.clip_stack.clone(),
                    });
                }
            }
        }

        self.clear_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> ContentStreamInterpreter {
        ContentStreamInterpreter::new(Matrix::IDENTITY, ColorScheme::Normal, None)
    }

    fn simple_path() -> Operation {
        Operation::construct_path(
            vec![PathOp::MoveTo, PathOp::LineTo],
            vec![0.0, 0.0, 10.0, 10.0],
        )
    }

    fn first_point(draw: &PendingDraw) -> Point {
        match draw.path.segments[0] {
            VectorSegment::Move { to } => to,
            other => panic!("expected leading move, got {:?}", other),
        }
    }

    #[test]
    fn test_stroke_emits_single_draw() {
        let mut i = interp();
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        let draws = i.finish();
        assert_eq!(draws.len(), 1);
        assert!(draws[0].style.stroke.is_some());
        assert!(draws[0].style.fill.is_none());
        assert!(!draws[0].path.closed);
    }

    #[test]
    fn test_fill_stroke_emits_fill_then_stroke() {
        let mut i = interp();
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::FillStroke, &[]));
        let draws = i.finish();
        assert_eq!(draws.len(), 2);
        assert!(draws[0].style.fill.is_some());
        assert!(draws[1].style.stroke.is_some());
    }

    #[test]
    fn test_close_stroke_forces_closed_path() {
        let mut i = interp();
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::CloseStroke, &[]));
        let draws = i.finish();
        assert!(draws[0].path.closed);
        assert!(matches!(
            draws[0].path.segments.last(),
            Some(VectorSegment::Close)
        ));
    }

    #[test]
    fn test_eo_variants_map_to_even_odd() {
        for (op, rule) in [
            (OpCode::Fill, FillRule::NonZero),
            (OpCode::EOFill, FillRule::EvenOdd),
            (OpCode::FillStroke, FillRule::NonZero),
            (OpCode::EOFillStroke, FillRule::EvenOdd),
            (OpCode::CloseEOFillStroke, FillRule::EvenOdd),
        ] {
            let mut i = interp();
            i.process_operation(&simple_path());
            i.process_operation(&Operation::numeric(op, &[]));
            let draws = i.finish();
            assert!(!draws.is_empty(), "{:?} emitted nothing", op);
            assert_eq!(draws[0].style.fill_rule, rule, "for {:?}", op);
        }
    }

    #[test]
    fn test_transform_is_applied_incoming_first() {
        // translate(100,100) then scale(2): the scale must not touch the
        // translation already in the CTM.
        let mut i = interp();
        i.process_operation(&Operation::numeric(OpCode::Save, &[]));
        i.process_operation(&Operation::numeric(
            OpCode::Transform,
            &[1.0, 0.0, 0.0, 1.0, 100.0, 100.0],
        ));
        i.process_operation(&Operation::numeric(
            OpCode::Transform,
            &[2.0, 0.0, 0.0, 2.0, 0.0, 0.0],
        ));
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        i.process_operation(&Operation::numeric(OpCode::Restore, &[]));
        let draws = i.finish();

        let start = first_point(&draws[0]);
        assert_eq!((start.x, start.y), (100.0, 100.0));
        match draws[0].path.segments[1] {
            VectorSegment::Line { to } => assert_eq!((to.x, to.y), (120.0, 120.0)),
            ref other => panic!("unexpected segment {:?}", other),
        }
    }

    #[test]
    fn test_viewport_applied_after_ctm() {
        let viewport = Matrix::scaling(2.0, 2.0);
        let mut i = ContentStreamInterpreter::new(viewport, ColorScheme::Normal, None);
        i.process_operation(&Operation::numeric(
            OpCode::Transform,
            &[1.0, 0.0, 0.0, 1.0, 10.0, 0.0],
        ));
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        let draws = i.finish();
        // CTM translation scales through the viewport.
        assert_eq!(first_point(&draws[0]).x, 20.0);
    }

    #[test]
    fn test_save_restore_scopes_state() {
        let mut i = interp();
        i.process_operation(&Operation::numeric(OpCode::SetLineWidth, &[4.0]));
        i.process_operation(&Operation::numeric(OpCode::Save, &[]));
        i.process_operation(&Operation::numeric(OpCode::SetLineWidth, &[9.0]));
        i.process_operation(&Operation::numeric(OpCode::Restore, &[]));
        assert_eq!(i.state.line_width, 4.0);
    }

    #[test]
    fn test_restore_on_empty_stack_is_noop() {
        let mut i = interp();
        i.process_operation(&Operation::numeric(OpCode::SetLineWidth, &[4.0]));
        i.process_operation(&Operation::numeric(OpCode::Restore, &[]));
        assert_eq!(i.state.line_width, 4.0);
    }

    #[test]
    fn test_clip_snapshot_and_scope() {
        let mut i = interp();
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));

        i.process_operation(&Operation::numeric(OpCode::Save, &[]));
        i.process_operation(&Operation::construct_path(
            vec![PathOp::Rectangle],
            vec![0.0, 0.0, 5.0, 5.0],
        ));
        i.process_operation(&Operation::numeric(OpCode::EOClip, &[]));
        i.process_operation(&Operation::numeric(OpCode::EndPath, &[]));
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        i.process_operation(&Operation::numeric(OpCode::Restore, &[]));

        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));

        let draws = i.finish();
        assert_eq!(draws.len(), 3);
        assert!(draws[0].clip_stack.is_empty());
        assert_eq!(draws[1].clip_stack.len(), 1);
        assert_eq!(draws[1].clip_stack[0].fill_rule, FillRule::EvenOdd);
        // Restore discards the clip added inside the save scope.
        assert!(draws[2].clip_stack.is_empty());
    }

    #[test]
    fn test_clip_snapshot_is_immutable() {
        let mut i = interp();
        i.process_operation(&Operation::construct_path(
            vec![PathOp::Rectangle],
            vec![0.0, 0.0, 5.0, 5.0],
        ));
        i.process_operation(&Operation::numeric(OpCode::Clip, &[]));
        // Keep building the live path after the clip op.
        i.process_operation(&Operation::construct_path(
            vec![PathOp::LineTo],
            vec![99.0, 99.0],
        ));
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));

        let draws = i.finish();
        let clip = &draws[0].clip_stack[0];
        // Move + 3 lines + close only; the later lineTo never leaked in.
        assert_eq!(clip.path.segments.len(), 5);
    }

    #[test]
    fn test_implicit_move_for_continuing_path() {
        let mut i = interp();
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        // Next path starts with a bare lineTo; a synthetic move at the
        // current point is inserted.
        i.process_operation(&Operation::construct_path(
            vec![PathOp::LineTo],
            vec![20.0, 0.0],
        ));
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        let draws = i.finish();
        let start = first_point(&draws[1]);
        assert_eq!((start.x, start.y), (10.0, 10.0));
    }

    #[test]
    fn test_rectangle_expansion() {
        let mut i = interp();
        i.process_operation(&Operation::construct_path(
            vec![PathOp::Rectangle],
            vec![1.0, 2.0, 10.0, 20.0],
        ));
        i.process_operation(&Operation::numeric(OpCode::Fill, &[]));
        let draws = i.finish();
        let segs = &draws[0].path.segments;
        assert_eq!(segs.len(), 5);
        assert!(matches!(segs[0], VectorSegment::Move { .. }));
        assert!(matches!(segs[4], VectorSegment::Close));
        assert!(draws[0].path.closed);
        match segs[2] {
            VectorSegment::Line { to } => assert_eq!((to.x, to.y), (11.0, 22.0)),
            ref other => panic!("unexpected segment {:?}", other),
        }
    }

    #[test]
    fn test_truncated_path_data_reads_zero() {
        let mut i = interp();
        // lineTo needs 2 numbers; only one is present.
        i.process_operation(&Operation::construct_path(
            vec![PathOp::MoveTo, PathOp::LineTo],
            vec![1.0, 2.0, 7.0],
        ));
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        let draws = i.finish();
        match draws[0].path.segments[1] {
            VectorSegment::Line { to } => assert_eq!((to.x, to.y), (7.0, 0.0)),
            ref other => panic!("unexpected segment {:?}", other),
        }
    }

    #[test]
    fn test_curve_variants_replicate_control_points() {
        let mut i = interp();
        i.process_operation(&Operation::construct_path(
            vec![PathOp::MoveTo, PathOp::CurveTo2, PathOp::CurveTo3],
            vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0, 3.0, 1.0, 4.0, 0.0],
        ));
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        let draws = i.finish();
        match draws[0].path.segments[1] {
            VectorSegment::Cubic { ctrl1, .. } => {
                // v replicates the current point as the first control.
                assert_eq!((ctrl1.x, ctrl1.y), (0.0, 0.0));
            }
            ref other => panic!("unexpected segment {:?}", other),
        }
        match draws[0].path.segments[2] {
            VectorSegment::Cubic { ctrl2, to, .. } => {
                // y replicates the endpoint as the second control.
                assert_eq!((ctrl2.x, ctrl2.y), (to.x, to.y));
            }
            ref other => panic!("unexpected segment {:?}", other),
        }
    }

    #[test]
    fn test_stroke_width_scales_with_ctm() {
        let mut i = interp();
        i.process_operation(&Operation::numeric(OpCode::SetLineWidth, &[3.0]));
        i.process_operation(&Operation::numeric(
            OpCode::Transform,
            &[2.0, 0.0, 0.0, 2.0, 0.0, 0.0],
        ));
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        let draws = i.finish();
        let stroke = draws[0].style.stroke.as_ref().unwrap();
        assert_eq!(stroke.width, 6.0);
    }

    #[test]
    fn test_dash_scales_with_device_space() {
        let mut i = interp();
        i.process_operation(&Operation::new(
            OpCode::SetDash,
            vec![Value::Array(vec![4.0, 2.0]), Value::Number(1.0)],
        ));
        i.process_operation(&Operation::numeric(
            OpCode::Transform,
            &[2.0, 0.0, 0.0, 2.0, 0.0, 0.0],
        ));
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        let draws = i.finish();
        let stroke = draws[0].style.stroke.as_ref().unwrap();
        assert_eq!(stroke.dash.as_deref(), Some(&[8.0, 4.0][..]));
        assert_eq!(stroke.dash_offset, Some(2.0));
    }

    #[test]
    fn test_gstate_alphas() {
        let mut i = interp();
        i.process_operation(&Operation::new(
            OpCode::SetGState,
            vec![Value::Dict(vec![
                ("ca".to_string(), 0.5),
                ("CA".to_string(), 1.5),
                ("SMask".to_string(), 0.0),
            ])],
        ));
        assert_eq!(i.state.fill_alpha, 0.5);
        assert_eq!(i.state.stroke_alpha, 1.0);

        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::FillStroke, &[]));
        let draws = i.finish();
        assert_eq!(draws[0].style.opacity, 0.5);
        assert_eq!(draws[1].style.opacity, 1.0);
    }

    #[test]
    fn test_near_white_fill_suppressed() {
        let mut i = interp();
        i.process_operation(&Operation::numeric(
            OpCode::SetFillRGBColor,
            &[0.99, 0.99, 0.99],
        ));
        i.process_operation(&Operation::construct_path(
            vec![PathOp::Rectangle],
            vec![0.0, 0.0, 100.0, 100.0],
        ));
        i.process_operation(&Operation::numeric(OpCode::Fill, &[]));
        assert!(i.finish().is_empty());
    }

    #[test]
    fn test_near_white_stroke_survives() {
        let mut i = interp();
        i.process_operation(&Operation::numeric(
            OpCode::SetStrokeRGBColor,
            &[0.99, 0.99, 0.99],
        ));
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        assert_eq!(i.finish().len(), 1);
    }

    #[test]
    fn test_monochrome_scheme_tints_colors() {
        let tint = Rgb::new(10, 20, 30);
        let mut i =
            ContentStreamInterpreter::new(Matrix::IDENTITY, ColorScheme::Monochrome, Some(tint));
        i.process_operation(&Operation::numeric(OpCode::SetStrokeRGBColor, &[1.0, 0.0, 0.0]));
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        let draws = i.finish();
        assert_eq!(draws[0].style.stroke.as_ref().unwrap().color, tint);
    }

    #[test]
    fn test_end_path_discards_without_draw() {
        let mut i = interp();
        i.process_operation(&simple_path());
        i.process_operation(&Operation::numeric(OpCode::EndPath, &[]));
        i.process_operation(&Operation::numeric(OpCode::Stroke, &[]));
        assert!(i.finish().is_empty());
    }

    #[test]
    fn test_cmyk_and_gray_color_operators() {
        let mut i = interp();
        i.process_operation(&Operation::numeric(OpCode::SetStrokeCMYKColor, &[1.0, 0.0, 0.0, 0.0]));
        assert_eq!(i.state.stroke_color, Some(Rgb::new(0, 255, 255)));
        i.process_operation(&Operation::numeric(OpCode::SetFillGray, &[0.5]));
        assert_eq!(i.state.fill_color, Some(Rgb::new(128, 128, 128)));
    }
}
