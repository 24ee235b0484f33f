//! Build a `Document` in code instead of parsing text.
//!
//! ```
//! use bvh_anim_core::{Builder, ChannelType, Offset};
//! use std::time::Duration;
//!
//! let doc = Builder::with_root_joint(
//!     "Hips",
//!     Offset::ZERO,
//!     &[ChannelType::XPosition, ChannelType::YPosition, ChannelType::ZPosition],
//! )
//! .push_child("Spine", Offset::new(0.0, 10.0, 0.0), &[ChannelType::ZRotation])
//! .push_end(Offset::new(0.0, 5.0, 0.0))
//! .with_motion(1, Duration::from_millis(40))
//! .push_frame(&[0.0, 90.0, 0.0, 15.0])
//! .build()
//! .unwrap();
//!
//! assert_eq!(doc.num_channels(), 4);
//! ```

use std::fmt;
use std::time::Duration;

use crate::channel::ChannelType;
use crate::config::Config;
use crate::document::Document;
use crate::error::{BvhError, OutOfRange, Result};
use crate::joint::{JointData, JointIndex};
use crate::offset::Offset;

/// Entry point of the builder chain.
#[derive(Default)]
pub struct Builder {
    _priv: (),
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Builder { .. }")
    }
}

impl Builder {
    /// Start a new document with its root joint.
    pub fn with_root_joint(name: &str, offset: Offset, channels: &[ChannelType]) -> JointsBuilder {
        JointsBuilder {
            joints: vec![JointData::new(name, offset, channels.to_vec(), None, 0)],
            num_channels: channels.len(),
            error: None,
        }
    }
}

/// Accumulates joints. Indices handed out here follow push order; `build()`
/// renumbers the joints in pre-order.
pub struct JointsBuilder {
    joints: Vec<JointData>,
    num_channels: usize,
    error: Option<BvhError>,
}

impl fmt::Debug for JointsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JointsBuilder { .. }")
    }
}

impl JointsBuilder {
    /// Push a joint whose parent is the most recently pushed joint.
    pub fn push_child(self, name: &str, offset: Offset, channels: &[ChannelType]) -> Self {
        let parent = self.last_index();
        self.push_child_with_parent(parent, name, offset, channels)
    }

    /// Push a joint under `parent`, a push-order index returned by `last_index()`.
    pub fn push_child_with_parent(
        mut self,
        parent: JointIndex,
        name: &str,
        offset: Offset,
        channels: &[ChannelType],
    ) -> Self {
        let count = self.joints.len();
        if parent.0 >= count {
            self.record(OutOfRange::Joint {
                index: parent.0,
                count,
            });
            return self;
        }
        let parent_data = &mut self.joints[parent.0];
        parent_data.children.push(JointIndex(count));
        let depth = parent_data.depth + 1;

        self.joints.push(JointData::new(
            name,
            offset,
            channels.to_vec(),
            Some(parent),
            depth,
        ));
        self.num_channels += channels.len();
        self
    }

    /// Cap the most recently pushed joint with an end site.
    pub fn push_end(mut self, offset: Offset) -> Self {
        if let Some(last) = self.joints.last_mut() {
            last.end_site = Some(offset);
        }
        self
    }

    /// Push-order index of the most recently pushed joint.
    pub fn last_index(&self) -> JointIndex {
        JointIndex(self.joints.len() - 1)
    }

    /// Frame width implied by the joints pushed so far.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Begin the motion section.
    pub fn with_motion(mut self, num_frames: usize, frame_time: Duration) -> MotionBuilder {
        let limits = Config::default();
        if num_frames > limits.max_frames {
            self.record(BvhError::MotionTooLarge {
                frames: num_frames,
                channels: self.num_channels,
            });
        }
        let capacity = num_frames
            .saturating_mul(self.num_channels)
            .min(limits.max_preallocated_values);
        MotionBuilder {
            joints: self,
            frame_time,
            num_frames,
            values: Vec::with_capacity(capacity),
        }
    }

    fn record(&mut self, err: impl Into<BvhError>) {
        if self.error.is_none() {
            self.error = Some(err.into());
        }
    }
}

/// Accumulates motion rows and finishes the document.
pub struct MotionBuilder {
    joints: JointsBuilder,
    frame_time: Duration,
    num_frames: usize,
    values: Vec<f32>,
}

impl fmt::Debug for MotionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MotionBuilder { .. }")
    }
}

impl MotionBuilder {
    /// Push one frame of motion values in canonical pre-order column layout.
    pub fn push_frame(mut self, frame: &[f32]) -> Self {
        let width = self.joints.num_channels;
        if frame.len() != width {
            self.joints.record(BvhError::MotionLengthMismatch {
                expected: width,
                found: frame.len(),
                frames: 1,
                channels: width,
            });
        }
        self.values.extend_from_slice(frame);
        self
    }

    /// Build the `Document`, checking every model invariant.
    pub fn build(self) -> Result<Document> {
        let MotionBuilder {
            joints,
            frame_time,
            num_frames,
            values,
        } = self;
        if let Some(err) = joints.error {
            return Err(err);
        }
        log::trace!(
            "building document: {} joints, {} channels, {} frames",
            joints.joints.len(),
            joints.num_channels,
            num_frames
        );
        let arena = into_pre_order(joints.joints);
        Document::from_parts(arena, frame_time, num_frames, values)
    }
}

/// Renumber push-ordered joints into pre-order, keeping children in push order.
fn into_pre_order(pushed: Vec<JointData>) -> Vec<JointData> {
    let mut order = Vec::with_capacity(pushed.len());
    let mut stack = vec![0usize];
    while let Some(old) = stack.pop() {
        order.push(old);
        stack.extend(pushed[old].children.iter().rev().map(|c| c.0));
    }

    let mut renumber = vec![0usize; pushed.len()];
    for (new, &old) in order.iter().enumerate() {
        renumber[old] = new;
    }

    let mut slots: Vec<Option<JointData>> = pushed.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&old| slots[old].take())
        .map(|mut joint| {
            joint.parent = joint.parent.map(|p| JointIndex(renumber[p.0]));
            for child in joint.children.iter_mut() {
                *child = JointIndex(renumber[child.0]);
            }
            joint
        })
        .collect()
}
