//! Joint hierarchy: owned arena nodes and the borrowed `Joint` view.
//!
//! The [`Document`] owns every joint in a single `Vec` laid out in canonical
//! pre-order (root first, then children left-to-right, recursively). Views are
//! `Copy` handles made of a document borrow and an arena index, so they can be
//! passed around freely but never outlive the document they point into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::ptr;

use crate::channel::{Channel, ChannelType};
use crate::document::Document;
use crate::error::OutOfRange;
use crate::iter::{Channels, Children};
use crate::offset::Offset;

/// Position of a joint in its document's pre-order arena. The root is `JointIndex(0)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointIndex(pub usize);

impl JointIndex {
    pub const ROOT: JointIndex = JointIndex(0);

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

/// Owned node stored in the document arena.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct JointData {
    pub(crate) name: String,
    pub(crate) offset: Offset,
    /// Channel tags in declaration order; a `Channel` is rebuilt from the tag and
    /// its position on every read.
    pub(crate) channels: Vec<ChannelType>,
    pub(crate) end_site: Option<Offset>,
    pub(crate) parent: Option<JointIndex>,
    pub(crate) children: Vec<JointIndex>,
    pub(crate) depth: usize,
    /// First motion column of this joint; filled in by `Document::from_parts`.
    pub(crate) first_column: usize,
}

impl JointData {
    pub(crate) fn new(
        name: impl Into<String>,
        offset: Offset,
        channels: Vec<ChannelType>,
        parent: Option<JointIndex>,
        depth: usize,
    ) -> Self {
        Self {
            name: name.into(),
            offset,
            channels,
            end_site: None,
            parent,
            children: Vec::new(),
            depth,
            first_column: 0,
        }
    }
}

/// Borrowed view of one joint in a [`Document`].
#[derive(Copy, Clone)]
pub struct Joint<'a> {
    doc: &'a Document,
    data: &'a JointData,
    index: JointIndex,
}

impl<'a> Joint<'a> {
    /// `index` must be a valid arena index of `doc`.
    pub(crate) fn new(doc: &'a Document, index: JointIndex) -> Self {
        Self {
            doc,
            data: &doc.arena()[index.0],
            index,
        }
    }

    /// Name as declared in the hierarchy. Names are not required to be unique.
    #[inline]
    pub fn name(&self) -> &'a str {
        &self.data.name
    }

    #[inline]
    pub fn offset(&self) -> Offset {
        self.data.offset
    }

    /// End-site offset, present only on childless joints that declare `End Site`.
    #[inline]
    pub fn end_site(&self) -> Option<Offset> {
        self.data.end_site
    }

    #[inline]
    pub fn is_end_joint(&self) -> bool {
        self.data.end_site.is_some()
    }

    /// This joint's own channels in declaration order.
    #[inline]
    pub fn channels(&self) -> Channels<'a> {
        Channels::new(&self.data.channels)
    }

    pub fn channel(&self, index: usize) -> Result<Channel, OutOfRange> {
        self.data
            .channels
            .get(index)
            .map(|&ty| Channel::new(ty, index))
            .ok_or(OutOfRange::Channel {
                index,
                count: self.data.channels.len(),
            })
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.data.channels.len()
    }

    /// Immediate children in declaration order.
    #[inline]
    pub fn children(&self) -> Children<'a> {
        Children::new(self.doc, &self.data.children)
    }

    pub fn parent(&self) -> Option<Joint<'a>> {
        self.data.parent.map(|p| Joint::new(self.doc, p))
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.data.parent.is_none()
    }

    /// Root has depth 0; every child is one deeper than its parent.
    #[inline]
    pub fn depth(&self) -> usize {
        self.data.depth
    }

    #[inline]
    pub fn index(&self) -> JointIndex {
        self.index
    }

    /// Columns of a frame row holding this joint's channel samples.
    #[inline]
    pub fn motion_columns(&self) -> Range<usize> {
        let start = self.data.first_column;
        start..start + self.data.channels.len()
    }

    /// Document this view borrows from.
    #[inline]
    pub fn document(&self) -> &'a Document {
        self.doc
    }
}

impl PartialEq for Joint<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.doc, other.doc) && self.index == other.index
    }
}

impl Eq for Joint<'_> {}

impl fmt::Debug for Joint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Joint")
            .field("index", &self.index.0)
            .field("name", &self.data.name)
            .field("offset", &self.data.offset)
            .field("channels", &self.data.channels)
            .field("end_site", &self.data.end_site)
            .field("depth", &self.data.depth)
            .finish()
    }
}
