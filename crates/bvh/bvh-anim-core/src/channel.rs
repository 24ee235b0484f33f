//! Channel model: the six animated degrees of freedom a joint can declare.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six supported per-joint degrees of freedom.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ChannelType {
    XPosition,
    YPosition,
    ZPosition,
    XRotation,
    YRotation,
    ZRotation,
}

/// Cartesian axis a channel acts along.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along the axis.
    pub fn vector(self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

/// Keyword spelling of every channel type in the text format, in tag order.
/// Both decoding and encoding go through this table.
const CHANNEL_KEYWORDS: [(ChannelType, &str); 6] = [
    (ChannelType::XPosition, "Xposition"),
    (ChannelType::YPosition, "Yposition"),
    (ChannelType::ZPosition, "Zposition"),
    (ChannelType::XRotation, "Xrotation"),
    (ChannelType::YRotation, "Yrotation"),
    (ChannelType::ZRotation, "Zrotation"),
];

impl ChannelType {
    /// All channel types in tag order.
    pub const ALL: [ChannelType; 6] = [
        ChannelType::XPosition,
        ChannelType::YPosition,
        ChannelType::ZPosition,
        ChannelType::XRotation,
        ChannelType::YRotation,
        ChannelType::ZRotation,
    ];

    /// Decode a channel keyword such as `Xrotation`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        CHANNEL_KEYWORDS
            .iter()
            .find(|(_, kw)| *kw == keyword)
            .map(|(ty, _)| *ty)
    }

    /// Decode a discrete tag (`0..6`, in [`ChannelType::ALL`] order).
    pub fn from_tag(tag: u8) -> Option<Self> {
        CHANNEL_KEYWORDS.get(tag as usize).map(|(ty, _)| *ty)
    }

    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Keyword used for this channel in the text format.
    #[inline]
    pub fn as_keyword(self) -> &'static str {
        CHANNEL_KEYWORDS[self as usize].1
    }

    #[inline]
    pub fn is_position(self) -> bool {
        matches!(
            self,
            ChannelType::XPosition | ChannelType::YPosition | ChannelType::ZPosition
        )
    }

    #[inline]
    pub fn is_rotation(self) -> bool {
        !self.is_position()
    }

    pub fn axis(self) -> Axis {
        match self {
            ChannelType::XPosition | ChannelType::XRotation => Axis::X,
            ChannelType::YPosition | ChannelType::YRotation => Axis::Y,
            ChannelType::ZPosition | ChannelType::ZRotation => Axis::Z,
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_keyword())
    }
}

impl FromStr for ChannelType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelType::from_keyword(s).ok_or_else(|| format!("unknown channel `{s}`"))
    }
}

/// A channel of a joint: its type and its position in the joint's channel list.
///
/// Channels are plain values; two channels are the same iff type and index match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Channel {
    pub channel_type: ChannelType,
    /// Position within the owning joint's channel list (0-based).
    pub index: usize,
}

impl Channel {
    #[inline]
    pub fn new(channel_type: ChannelType, index: usize) -> Self {
        Self {
            channel_type,
            index,
        }
    }
}
