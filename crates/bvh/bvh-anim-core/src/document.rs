//! `Document`: the single owner of a parsed BVH file.
//!
//! A document owns the joint arena, the joint-name index and the motion buffer.
//! It is immutable once built; every accessor hands out views that borrow from it.
//! Every constructor ends in [`Document::from_parts`], which enforces the model
//! invariants, so a `Document` value is always valid.

use hashbrown::HashMap;
use std::io::Read;
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;
use crate::error::{BvhError, OutOfRange, Result};
use crate::iter::{Frames, Joints};
use crate::joint::{Joint, JointData, JointIndex};
use crate::motion::{Frame, MotionBuffer};
use crate::parse;
use crate::time::duration_to_fractional_seconds;

/// An in-memory BVH document: joint hierarchy plus motion samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Pre-order arena; `joints[0]` is the root when present.
    joints: Vec<JointData>,
    /// Joint name -> every joint carrying it, in pre-order.
    names: HashMap<String, Vec<JointIndex>>,
    frame_time: Duration,
    motion: MotionBuffer,
}

impl Document {
    /// Parse a document from BVH text.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_config(text, &Config::default())
    }

    pub fn parse_with_config(text: &str, config: &Config) -> Result<Self> {
        parse::parse_document(text, config)
    }

    /// Read a whole stream, then parse it.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_config(reader, &Config::default())
    }

    pub fn from_reader_with_config<R: Read>(mut reader: R, config: &Config) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse_with_config(&text, config)
    }

    /// Validate an arena and motion buffer and assemble a document from them.
    ///
    /// `joints` must be in pre-order with consistent parent/child links.
    /// `first_column` of each joint is recomputed here.
    pub(crate) fn from_parts(
        mut joints: Vec<JointData>,
        frame_time: Duration,
        num_frames: usize,
        values: Vec<f32>,
    ) -> Result<Self> {
        if joints.is_empty() {
            if num_frames != 0 || !values.is_empty() {
                return Err(BvhError::malformed(
                    "a document without joints cannot carry motion data",
                ));
            }
            return Ok(Self {
                frame_time,
                ..Self::default()
            });
        }

        if let Some(joint) = joints.iter().find(|j| !is_single_word(&j.name)) {
            return Err(BvhError::InvalidJointName {
                name: joint.name.clone(),
            });
        }
        let num_channels = link_pre_order(&mut joints)?;
        let motion = MotionBuffer::new(values, num_channels, num_frames)?;

        let mut names: HashMap<String, Vec<JointIndex>> = HashMap::with_capacity(joints.len());
        for (i, joint) in joints.iter().enumerate() {
            names
                .entry(joint.name.clone())
                .or_default()
                .push(JointIndex(i));
        }

        Ok(Self {
            joints,
            names,
            frame_time,
            motion,
        })
    }

    #[inline]
    pub(crate) fn arena(&self) -> &[JointData] {
        &self.joints
    }

    /// Root joint, or `None` for the empty document.
    pub fn root_joint(&self) -> Option<Joint<'_>> {
        if self.joints.is_empty() {
            None
        } else {
            Some(Joint::new(self, JointIndex::ROOT))
        }
    }

    pub fn joint(&self, index: JointIndex) -> std::result::Result<Joint<'_>, OutOfRange> {
        if index.0 < self.joints.len() {
            Ok(Joint::new(self, index))
        } else {
            Err(OutOfRange::Joint {
                index: index.0,
                count: self.joints.len(),
            })
        }
    }

    /// All joints in canonical pre-order (motion column order).
    #[inline]
    pub fn joints(&self) -> Joints<'_> {
        Joints::new(self)
    }

    #[inline]
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    /// First joint in pre-order named `name`.
    pub fn joint_by_name(&self, name: &str) -> Option<Joint<'_>> {
        self.joints_named(name).next()
    }

    /// Every joint named `name`, in pre-order.
    pub fn joints_named<'a>(&'a self, name: &str) -> impl Iterator<Item = Joint<'a>> + 'a {
        let indices: &'a [JointIndex] = self.names.get(name).map(Vec::as_slice).unwrap_or(&[]);
        indices.iter().map(move |&index| Joint::new(self, index))
    }

    /// Time step between consecutive frames.
    #[inline]
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    #[inline]
    pub fn frame_time_secs(&self) -> f64 {
        duration_to_fractional_seconds(self.frame_time)
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.motion.num_frames()
    }

    /// Values per frame: the channel count summed over the whole hierarchy.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.motion.row_width()
    }

    #[inline]
    pub fn motion(&self) -> &MotionBuffer {
        &self.motion
    }

    #[inline]
    pub fn motion_values(&self) -> &[f32] {
        self.motion.values()
    }

    #[inline]
    pub fn frames(&self) -> Frames<'_> {
        self.motion.frames()
    }

    pub fn frame(&self, index: usize) -> std::result::Result<Frame<'_>, OutOfRange> {
        self.motion.frame(index)
    }
}

impl FromStr for Document {
    type Err = BvhError;
    fn from_str(s: &str) -> Result<Self> {
        Document::parse(s)
    }
}

/// Names must survive the word lexer unchanged, or written text would not parse back.
fn is_single_word(name: &str) -> bool {
    !name.is_empty()
        && !name
            .bytes()
            .any(|b| b.is_ascii_whitespace() || b == b'{' || b == b'}')
}

/// Check that `joints` is a pre-order tree rooted at index 0 and assign motion
/// columns. Returns the total channel count.
fn link_pre_order(joints: &mut [JointData]) -> Result<usize> {
    let root = &joints[0];
    if root.parent.is_some() || root.depth != 0 {
        return Err(BvhError::malformed(
            "joint 0 must be the root (no parent, depth 0)",
        ));
    }

    let mut stack = vec![JointIndex::ROOT];
    let mut visited = 0usize;
    let mut column = 0usize;

    while let Some(index) = stack.pop() {
        if index.0 != visited {
            return Err(BvhError::malformed(format!(
                "joint {} is out of pre-order (expected joint {visited})",
                index.0
            )));
        }
        visited += 1;

        let joint = &joints[index.0];
        if joint.end_site.is_some() && !joint.children.is_empty() {
            return Err(BvhError::malformed(format!(
                "joint `{}` has both an end site and children",
                joint.name
            )));
        }
        for &child in joint.children.iter() {
            let Some(child_data) = joints.get(child.0) else {
                return Err(BvhError::malformed(format!(
                    "joint `{}` links to missing child {}",
                    joint.name, child.0
                )));
            };
            if child_data.parent != Some(index) || child_data.depth != joint.depth + 1 {
                return Err(BvhError::malformed(format!(
                    "joint `{}` disagrees with its parent `{}`",
                    child_data.name, joint.name
                )));
            }
        }
        // Push in reverse so the first child is visited next.
        stack.extend(joint.children.iter().rev().copied());

        let joint = &mut joints[index.0];
        joint.first_column = column;
        column += joint.channels.len();
    }

    if visited != joints.len() {
        return Err(BvhError::malformed(format!(
            "{} joints are not reachable from the root",
            joints.len() - visited
        )));
    }
    Ok(column)
}
