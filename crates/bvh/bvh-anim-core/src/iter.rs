//! Cursors over a document: channels of a joint, children of a joint, the whole
//! joint tree in pre-order, and the frames of the motion buffer.
//!
//! The channel and frame cursors have an explicit end state. Advancing past the end
//! is a no-op rather than a fault, and `is_exhausted()` reports when it is reached.
//! They also implement `Iterator`, so ordinary `for` loops terminate on their own.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;
use std::ptr;
use std::slice;

use crate::channel::{Channel, ChannelType};
use crate::document::Document;
use crate::joint::{Joint, JointIndex};
use crate::motion::{Frame, MotionBuffer};

/// Forward cursor over one joint's channel list.
#[derive(Clone, Debug)]
pub struct Channels<'a> {
    types: &'a [ChannelType],
    position: usize,
}

impl<'a> Channels<'a> {
    pub(crate) fn new(types: &'a [ChannelType]) -> Self {
        Self { types, position: 0 }
    }

    /// Channel under the cursor, or `None` in the end state.
    #[inline]
    pub fn current(&self) -> Option<Channel> {
        self.types
            .get(self.position)
            .map(|&ty| Channel::new(ty, self.position))
    }

    /// Move to the next channel. Saturates at the end state.
    #[inline]
    pub fn advance(&mut self) {
        if self.position < self.types.len() {
            self.position += 1;
        }
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.types.len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for Channels<'_> {
    type Item = Channel;

    fn next(&mut self) -> Option<Channel> {
        let channel = self.current()?;
        self.advance();
        Some(channel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.types.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Channels<'_> {}
impl FusedIterator for Channels<'_> {}

/// Compares cursor position, not the identity of the backing list.
impl PartialEq for Channels<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.types.len() == other.types.len()
    }
}

impl Eq for Channels<'_> {}

/// Immediate children of a joint, in declaration order.
#[derive(Clone)]
pub struct Children<'a> {
    doc: &'a Document,
    indices: slice::Iter<'a, JointIndex>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(doc: &'a Document, indices: &'a [JointIndex]) -> Self {
        Self {
            doc,
            indices: indices.iter(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.len() == 0
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Joint<'a>;

    fn next(&mut self) -> Option<Joint<'a>> {
        self.indices.next().map(|&index| Joint::new(self.doc, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.indices
            .next_back()
            .map(|&index| Joint::new(self.doc, index))
    }
}

impl ExactSizeIterator for Children<'_> {}
impl FusedIterator for Children<'_> {}

impl fmt::Debug for Children<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.indices.as_slice()).finish()
    }
}

/// Every joint of a document in canonical pre-order.
///
/// This is the column order of the motion buffer: summing `num_channels()` over
/// this walk gives the frame width.
#[derive(Clone)]
pub struct Joints<'a> {
    doc: &'a Document,
    range: Range<usize>,
}

impl<'a> Joints<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            range: 0..doc.num_joints(),
        }
    }
}

impl<'a> Iterator for Joints<'a> {
    type Item = Joint<'a>;

    fn next(&mut self) -> Option<Joint<'a>> {
        self.range
            .next()
            .map(|index| Joint::new(self.doc, JointIndex(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Joints<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range
            .next_back()
            .map(|index| Joint::new(self.doc, JointIndex(index)))
    }
}

impl ExactSizeIterator for Joints<'_> {}
impl FusedIterator for Joints<'_> {}

impl fmt::Debug for Joints<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Joints").field("range", &self.range).finish()
    }
}

/// Forward cursor over the frames of a motion buffer, frame 0 first.
#[derive(Clone)]
pub struct Frames<'a> {
    motion: &'a MotionBuffer,
    index: usize,
}

impl<'a> Frames<'a> {
    pub(crate) fn new(motion: &'a MotionBuffer) -> Self {
        Self { motion, index: 0 }
    }

    /// Frame under the cursor, or `None` in the end state.
    #[inline]
    pub fn current(&self) -> Option<Frame<'a>> {
        self.motion.frame(self.index).ok()
    }

    /// Move to the next frame. Saturates at the end state.
    #[inline]
    pub fn advance(&mut self) {
        if self.index < self.motion.num_frames() {
            self.index += 1;
        }
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.motion.num_frames()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        let frame = self.current()?;
        self.advance();
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.motion.num_frames() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
impl FusedIterator for Frames<'_> {}

/// Equal only when both cursors walk the same buffer and sit on the same frame.
impl PartialEq for Frames<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.motion, other.motion) && self.index == other.index
    }
}

impl Eq for Frames<'_> {}

impl fmt::Debug for Frames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frames")
            .field("index", &self.index)
            .field("num_frames", &self.motion.num_frames())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_cursor_saturates() {
        let types = [ChannelType::XPosition, ChannelType::ZRotation];
        let mut cursor = Channels::new(&types);
        assert_eq!(
            cursor.current(),
            Some(Channel::new(ChannelType::XPosition, 0))
        );
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_exhausted());
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn channel_cursor_equality_is_positional() {
        let a = [ChannelType::XPosition, ChannelType::YPosition];
        let b = [ChannelType::XRotation, ChannelType::YRotation];
        let mut left = Channels::new(&a);
        let right = Channels::new(&b);
        assert_eq!(left, right);
        left.advance();
        assert_ne!(left, right);
    }

    #[test]
    fn empty_channel_list_starts_exhausted() {
        let cursor = Channels::new(&[]);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.len(), 0);
    }

    #[test]
    fn frame_cursor_counts_down() {
        let motion = MotionBuffer::new(vec![1.0, 2.0, 3.0], 1, 3).unwrap();
        let mut frames = Frames::new(&motion);
        assert_eq!(frames.len(), 3);
        frames.next();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.current().map(|f| f[0]), Some(2.0));
    }
}
