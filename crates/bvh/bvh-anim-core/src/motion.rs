//! Motion buffer and frame views.
//!
//! All samples live in one flat row-major `Vec<f32>`: one row per frame, each row
//! as wide as the total channel count of the hierarchy. The row width is fixed when
//! the buffer is built, so slicing a frame is O(1) and never walks the joint tree.

use std::ops::Index;
use std::slice;

use crate::channel::Channel;
use crate::error::{BvhError, OutOfRange};
use crate::iter::Frames;
use crate::joint::Joint;

/// Flat row-major store of every frame's channel samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionBuffer {
    values: Vec<f32>,
    row_width: usize,
    num_frames: usize,
}

impl MotionBuffer {
    pub(crate) fn new(
        values: Vec<f32>,
        row_width: usize,
        num_frames: usize,
    ) -> Result<Self, BvhError> {
        let expected = num_frames
            .checked_mul(row_width)
            .ok_or(BvhError::MotionTooLarge {
                frames: num_frames,
                channels: row_width,
            })?;
        if values.len() != expected {
            return Err(BvhError::MotionLengthMismatch {
                expected,
                found: values.len(),
                frames: num_frames,
                channels: row_width,
            });
        }
        Ok(Self {
            values,
            row_width,
            num_frames,
        })
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Values per frame (total channel count of the hierarchy).
    #[inline]
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// All samples, frame after frame.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_frames == 0
    }

    pub fn row(&self, index: usize) -> Result<&[f32], OutOfRange> {
        if index >= self.num_frames {
            return Err(OutOfRange::Frame {
                index,
                count: self.num_frames,
            });
        }
        let start = index * self.row_width;
        Ok(&self.values[start..start + self.row_width])
    }

    pub fn frame(&self, index: usize) -> Result<Frame<'_>, OutOfRange> {
        self.row(index).map(|values| Frame { values, index })
    }

    #[inline]
    pub fn frames(&self) -> Frames<'_> {
        Frames::new(self)
    }
}

/// View of one row of the motion buffer. Aliases the document's storage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame<'a> {
    values: &'a [f32],
    index: usize,
}

impl<'a> Frame<'a> {
    /// Frame number, 0 for the first frame.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.values
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'a, f32> {
        self.values.iter()
    }

    pub fn get(&self, column: usize) -> Result<f32, OutOfRange> {
        self.values
            .get(column)
            .copied()
            .ok_or(OutOfRange::Column {
                index: column,
                count: self.values.len(),
            })
    }

    /// The part of this row holding `joint`'s channels.
    pub fn joint_values(&self, joint: &Joint<'_>) -> Result<&'a [f32], OutOfRange> {
        let columns = joint.motion_columns();
        if columns.end > self.values.len() {
            return Err(OutOfRange::Column {
                index: columns.end - 1,
                count: self.values.len(),
            });
        }
        Ok(&self.values[columns])
    }

    /// Sample of one of `joint`'s channels in this frame.
    pub fn channel_value(&self, joint: &Joint<'_>, channel: Channel) -> Result<f32, OutOfRange> {
        if channel.index >= joint.num_channels() {
            return Err(OutOfRange::Channel {
                index: channel.index,
                count: joint.num_channels(),
            });
        }
        self.get(joint.motion_columns().start + channel.index)
    }
}

impl Index<usize> for Frame<'_> {
    type Output = f32;

    fn index(&self, column: usize) -> &f32 {
        match self.values.get(column) {
            Some(value) => value,
            None => panic!(
                "{}",
                OutOfRange::Column {
                    index: column,
                    count: self.values.len(),
                }
            ),
        }
    }
}

impl AsRef<[f32]> for Frame<'_> {
    fn as_ref(&self) -> &[f32] {
        self.values
    }
}

impl<'a> IntoIterator for Frame<'a> {
    type Item = &'a f32;
    type IntoIter = slice::Iter<'a, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
