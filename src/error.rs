use thiserror::Error;

/// The closed set of failure modes the coder can surface.
///
/// None of these are recoverable locally: the first one aborts the call
/// that produced it.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
	#[error("invalid parameters: {0}")]
	InvalidParameters(String),

	#[error("null data: {0}")]
	NullData(String),

	#[error("GF(256) context not initialized; call initialize() first")]
	UninitializedContext,

	#[error("insufficient blocks: need {needed}, have {available}")]
	InsufficientBlocks { needed: usize, available: usize },

	#[error("matrix operation failed: {0}")]
	MatrixOperation(String),

	#[error("block buffer error: {0}")]
	BlockBuffer(String),
}
