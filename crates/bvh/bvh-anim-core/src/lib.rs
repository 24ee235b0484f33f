//! BVH motion-capture documents.
//!
//! A [`Document`] owns a joint hierarchy and a dense frame-major motion buffer.
//! Joints, channels and frames are exposed as cheap borrowed views
//! ([`Joint`], [`Channel`], [`Frame`]) plus cursor-style iterators
//! ([`Joints`], [`Children`], [`Channels`], [`Frames`]).
//!
//! Documents come from [`Document::parse`] / [`Document::from_reader`] or from
//! the [`Builder`] chain, and go back to text through [`WriteOptions`] or
//! `Display`.

pub mod builder;
pub mod channel;
pub mod config;
pub mod document;
pub mod error;
pub mod iter;
pub mod joint;
pub mod motion;
pub mod offset;
mod parse;
pub mod time;
pub mod write;

// Re-exports for consumers
pub use builder::{Builder, JointsBuilder, MotionBuilder};
pub use channel::{Axis, Channel, ChannelType};
pub use config::Config;
pub use document::Document;
pub use error::{BvhError, OutOfRange, Result};
pub use iter::{Channels, Children, Frames, Joints};
pub use joint::{Joint, JointIndex};
pub use motion::{Frame, MotionBuffer};
pub use offset::Offset;
pub use write::{IndentStyle, LineTerminator, WriteOptions};
