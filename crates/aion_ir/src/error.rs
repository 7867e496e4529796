//! Error type for the IR crate.

/// Errors that can occur while constructing or inspecting [`Expr`](crate::expr::Expr) trees.
#[derive(Debug, thiserror::Error)]
pub enum IrError {
    /// Two operand widths that were required to match did not.
    #[error("width mismatch in {context}: expected {expected}, found {found}")]
    WidthMismatch {
        /// The width expected by the operation.
        expected: u32,
        /// The width actually found.
        found: u32,
        /// What was being constructed when the mismatch was detected.
        context: String,
    },
}
