//! PDF content-stream front-end: operator model, graphics state, and the
//! stack-based interpreter that emits device-space pending draws.

pub mod graphics_state;
pub mod interpreter;
pub mod operator;

pub use graphics_state::GraphicsState;
pub use interpreter::ContentStreamInterpreter;
pub use operator::{OpCode, Operation, OperatorList, PathOp, Value};
