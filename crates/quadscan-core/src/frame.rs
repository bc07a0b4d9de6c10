use crate::FrameError;

/// Interleaved 8-bit pixel layout of a [`Frame`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PixelLayout {
    Gray,
    Rgb,
    Rgba,
}

impl PixelLayout {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// Borrowed, read-only video frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub width: usize,
    pub height: usize,
    pub layout: PixelLayout,
    pub data: &'a [u8], // row-major, len = w*h*channels
}

impl<'a> Frame<'a> {
    /// Build a frame view, rejecting empty or mis-sized buffers.
    pub fn new(
        width: usize,
        height: usize,
        layout: PixelLayout,
        data: &'a [u8],
    ) -> Result<Self, FrameError> {
        let frame = Self {
            width,
            height,
            layout,
            data,
        };
        frame.validate()?;
        Ok(frame)
    }

    pub fn gray(width: usize, height: usize, data: &'a [u8]) -> Result<Self, FrameError> {
        Self::new(width, height, PixelLayout::Gray, data)
    }

    pub fn rgb(width: usize, height: usize, data: &'a [u8]) -> Result<Self, FrameError> {
        Self::new(width, height, PixelLayout::Rgb, data)
    }

    /// Expected buffer length for the declared dimensions.
    pub fn expected_len(&self) -> Result<usize, FrameError> {
        let channels = self.layout.channels();
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(FrameError::DimensionOverflow {
                width: self.width,
                height: self.height,
                channels,
            })
    }

    /// Check dimensionality before any processing starts.
    ///
    /// Width and height must also fit the `u32` extents used by the imaging
    /// backend.
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::EmptyFrame {
                width: self.width,
                height: self.height,
            });
        }
        if u32::try_from(self.width).is_err() || u32::try_from(self.height).is_err() {
            return Err(FrameError::DimensionOverflow {
                width: self.width,
                height: self.height,
                channels: self.layout.channels(),
            });
        }
        let expected = self.expected_len()?;
        if self.data.len() != expected {
            return Err(FrameError::BufferLength {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }
}
