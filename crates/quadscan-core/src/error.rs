/// Malformed input frames. This is the only failure a locate call reports as
/// an error; detection failures are ordinary return values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("empty frame (width={width}, height={height})")]
    EmptyFrame { width: usize, height: usize },

    #[error("invalid frame buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },

    #[error("frame dimensions overflow (width={width}, height={height}, channels={channels})")]
    DimensionOverflow {
        width: usize,
        height: usize,
        channels: usize,
    },
}
