/// Errors that can occur during Markdown ⇄ document-tree conversion.
///
/// Recoverable conditions (unknown constructs, unfillable nodes, malformed
/// directive syntax) are deliberately *not* errors: they are reported through
/// `tracing` warnings and conversion continues. Only failures of the
/// underlying Markdown parser surface here.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("markdown parse error: {0}")]
    Parse(String),
}
