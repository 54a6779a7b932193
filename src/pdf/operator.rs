//! PDF content-stream operator model.
//!
//! The upstream collaborator delivers a decoded operator list (the PDF.js
//! `fnArray`/`argsArray` shape); here it is modeled as a sequence of
//! `Operation`s over a closed `OpCode` enum so dispatch is an exhaustive
//! match instead of a numeric switch.

use std::fmt;

/// The consumed subset of content-stream operator codes.
///
/// Names follow the PDF.js operator-list enumeration; the doc comments give
/// the raw PDF operator each corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    // Graphics state
    /// q - Save graphics state
    Save,
    /// Q - Restore graphics state
    Restore,
    /// cm - Concatenate matrix to current transformation matrix
    Transform,
    /// w - Set line width
    SetLineWidth,
    /// J - Set line cap style
    SetLineCap,
    /// j - Set line join style
    SetLineJoin,
    /// M - Set miter limit
    SetMiterLimit,
    /// d - Set line dash pattern
    SetDash,
    /// gs - Set parameters from a graphics state dictionary
    SetGState,

    // Color
    /// SC/SCN - Set stroke color components
    SetStrokeColor,
    /// G - Set stroke gray level
    SetStrokeGray,
    /// RG - Set stroke RGB color
    SetStrokeRGBColor,
    /// K - Set stroke CMYK color
    SetStrokeCMYKColor,
    /// sc/scn - Set fill color components
    SetFillColor,
    /// g - Set fill gray level
    SetFillGray,
    /// rg - Set fill RGB color
    SetFillRGBColor,
    /// k - Set fill CMYK color
    SetFillCMYKColor,

    // Path construction (aggregated sub-operator form)
    /// m/l/c/v/y/re/h - Append path sub-operators against a shared buffer
    ConstructPath,

    // Clipping
    /// W - Set clipping path (nonzero winding rule)
    Clip,
    /// W* - Set clipping path (even-odd rule)
    EOClip,
    /// n - End path without filling or stroking
    EndPath,

    // Path painting
    /// S - Stroke path
    Stroke,
    /// s - Close and stroke path
    CloseStroke,
    /// f or F - Fill path (nonzero winding rule)
    Fill,
    /// f* - Fill path (even-odd rule)
    EOFill,
    /// B - Fill and stroke path (nonzero winding rule)
    FillStroke,
    /// B* - Fill and stroke path (even-odd rule)
    EOFillStroke,
    /// b - Close, fill, and stroke path (nonzero winding rule)
    CloseFillStroke,
    /// b* - Close, fill, and stroke path (even-odd rule)
    CloseEOFillStroke,
}

impl OpCode {
    /// Looks up an operator-list name (e.g. "setLineWidth").
    ///
    /// Returns `None` for names outside the consumed subset; the caller is
    /// expected to skip those, matching the interpreter's silent handling
    /// of unknown codes.
    pub fn from_name(name: &str) -> Option<OpCode> {
        match name {
            "save" => Some(OpCode::Save),
            "restore" => Some(OpCode::Restore),
            "transform" => Some(OpCode::Transform),
            "setLineWidth" => Some(OpCode::SetLineWidth),
            "setLineCap" => Some(OpCode::SetLineCap),
            "setLineJoin" => Some(OpCode::SetLineJoin),
            "setMiterLimit" => Some(OpCode::SetMiterLimit),
            "setDash" => Some(OpCode::SetDash),
            "setGState" => Some(OpCode::SetGState),
            "setStrokeColor" => Some(OpCode::SetStrokeColor),
            "setStrokeGray" => Some(OpCode::SetStrokeGray),
            "setStrokeRGBColor" => Some(OpCode::SetStrokeRGBColor),
            "setStrokeCMYKColor" => Some(OpCode::SetStrokeCMYKColor),
            "setFillColor" => Some(OpCode::SetFillColor),
            "setFillGray" => Some(OpCode::SetFillGray),
            "setFillRGBColor" => Some(OpCode::SetFillRGBColor),
            "setFillCMYKColor" => Some(OpCode::SetFillCMYKColor),
            "constructPath" => Some(OpCode::ConstructPath),
            "clip" => Some(OpCode::Clip),
            "eoClip" => Some(OpCode::EOClip),
            "endPath" => Some(OpCode::EndPath),
            "stroke" => Some(OpCode::Stroke),
            "closeStroke" => Some(OpCode::CloseStroke),
            "fill" => Some(OpCode::Fill),
            "eoFill" => Some(OpCode::EOFill),
            "fillStroke" => Some(OpCode::FillStroke),
            "eoFillStroke" => Some(OpCode::EOFillStroke),
            "closeFillStroke" => Some(OpCode::CloseFillStroke),
            "closeEOFillStroke" => Some(OpCode::CloseEOFillStroke),
            _ => None,
        }
    }

    /// Returns the operator-list name for this opcode.
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::Save => "save",
            OpCode::Restore => "restore",
            OpCode::Transform => "transform",
            OpCode::SetLineWidth => "setLineWidth",
            OpCode::SetLineCap => "setLineCap",
            OpCode::SetLineJoin => "setLineJoin",
            OpCode::SetMiterLimit => "setMiterLimit",
            OpCode::SetDash => "setDash",
            OpCode::SetGState => "setGState",
            OpCode::SetStrokeColor => "setStrokeColor",
            OpCode::SetStrokeGray => "setStrokeGray",
            OpCode::SetStrokeRGBColor => "setStrokeRGBColor",
            OpCode::SetStrokeCMYKColor => "setStrokeCMYKColor",
            OpCode::SetFillColor => "setFillColor",
            OpCode::SetFillGray => "setFillGray",
            OpCode::SetFillRGBColor => "setFillRGBColor",
            OpCode::SetFillCMYKColor => "setFillCMYKColor",
            OpCode::ConstructPath => "constructPath",
            OpCode::Clip => "clip",
            OpCode::EOClip => "eoClip",
            OpCode::EndPath => "endPath",
            OpCode::Stroke => "stroke",
            OpCode::CloseStroke => "closeStroke",
            OpCode::Fill => "fill",
            OpCode::EOFill => "eoFill",
            OpCode::FillStroke => "fillStroke",
            OpCode::EOFillStroke => "eoFillStroke",
            OpCode::CloseFillStroke => "closeFillStroke",
            OpCode::CloseEOFillStroke => "closeEOFillStroke",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Path construction sub-operators, iterated by `constructPath` against a
/// shared numeric buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOp {
    /// m - Begin new subpath
    MoveTo,
    /// l - Append straight line segment
    LineTo,
    /// c - Append cubic Bézier curve
    CurveTo,
    /// v - Append cubic Bézier curve (first control point replicated)
    CurveTo2,
    /// y - Append cubic Bézier curve (final point replicated)
    CurveTo3,
    /// h - Close subpath
    ClosePath,
    /// re - Append rectangle
    Rectangle,
}

impl PathOp {
    /// Number of values this sub-operator consumes from the numeric buffer.
    pub fn arg_count(&self) -> usize {
        match self {
            PathOp::MoveTo | PathOp::LineTo => 2,
            PathOp::CurveTo => 6,
            PathOp::CurveTo2 | PathOp::CurveTo3 => 4,
            PathOp::Rectangle => 4,
            PathOp::ClosePath => 0,
        }
    }
}

/// An operand carried by an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    /// A flat numeric array (dash pattern, path data buffer).
    Array(Vec<f64>),
    /// Path sub-operator codes for `constructPath`.
    Ops(Vec<PathOp>),
    /// Graphics state parameter dictionary (key, numeric value) pairs.
    Dict(Vec<(String, f64)>),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A decoded content-stream operation: an operator code plus its operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub op: OpCode,
    pub args: Vec<Value>,
}

impl Operation {
    pub fn new(op: OpCode, args: Vec<Value>) -> Self {
        Operation { op, args }
    }

    /// An operation whose operands are all plain numbers.
    pub fn numeric(op: OpCode, args: &[f64]) -> Self {
        Operation {
            op,
            args: args.iter().copied().map(Value::Number).collect(),
        }
    }

    /// A `constructPath` operation from its sub-operator and data buffers.
    pub fn construct_path(ops: Vec<PathOp>, data: Vec<f64>) -> Self {
        Operation {
            op: OpCode::ConstructPath,
            args: vec![Value::Ops(ops), Value::Array(data)],
        }
    }

    /// Read the `i`-th operand as a number, or `None`.
    pub fn number(&self, i: usize) -> Option<f64> {
        self.args.get(i).and_then(Value::as_number)
    }
}

/// A decoded operator list, the unit the interpreter consumes.
#[derive(Debug, Clone, Default)]
pub struct OperatorList {
    pub operations: Vec<Operation>,
}

impl OperatorList {
    pub fn new(operations: Vec<Operation>) -> Self {
        OperatorList { operations }
    }

    pub fn push(&mut self, op: Operation) {
        self.operations.push(op);
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
