//! Options for writing a `Document` back to BVH text.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{self, Write as _};
use std::io;
use std::num::NonZeroUsize;

use crate::document::Document;
use crate::joint::Joint;
use crate::offset::Offset;

/// Formatting options for writing a `Document`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Indentation style for nested joints.
    pub indent: IndentStyle,
    /// Line terminator written after every line.
    pub line_terminator: LineTerminator,
    /// Digits after the decimal point for `OFFSET` values.
    pub offset_significant_figures: usize,
    /// Digits after the decimal point for the `Frame Time` value.
    pub frame_time_significant_figures: usize,
    /// Digits after the decimal point for motion values.
    pub motion_values_significant_figures: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            line_terminator: LineTerminator::default(),
            offset_significant_figures: 5,
            frame_time_significant_figures: 7,
            motion_values_significant_figures: 2,
        }
    }
}

/// Pending work while walking the hierarchy.
enum Step<'a> {
    Open(Joint<'a>),
    Close(Joint<'a>),
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `doc` to `writer`, one line at a time.
    pub fn write<W: io::Write>(&self, doc: &Document, writer: &mut W) -> io::Result<()> {
        self.emit_lines(doc, |line| writer.write_all(line.as_bytes()))?;
        writer.flush()
    }

    pub fn write_to_string(&self, doc: &Document) -> String {
        let mut out = String::new();
        let written = self.emit_lines(doc, |line| {
            out.push_str(line);
            Ok::<(), Infallible>(())
        });
        match written {
            Ok(()) => out,
            Err(never) => match never {},
        }
    }

    #[inline]
    pub fn with_indent(self, indent: IndentStyle) -> Self {
        Self { indent, ..self }
    }

    #[inline]
    pub fn with_line_terminator(self, line_terminator: LineTerminator) -> Self {
        Self {
            line_terminator,
            ..self
        }
    }

    #[inline]
    pub fn with_offset_significant_figures(self, offset_significant_figures: usize) -> Self {
        Self {
            offset_significant_figures,
            ..self
        }
    }

    #[inline]
    pub fn with_frame_time_significant_figures(self, frame_time_significant_figures: usize) -> Self {
        Self {
            frame_time_significant_figures,
            ..self
        }
    }

    #[inline]
    pub fn with_motion_values_significant_figures(
        self,
        motion_values_significant_figures: usize,
    ) -> Self {
        Self {
            motion_values_significant_figures,
            ..self
        }
    }

    /// Produce the text line by line (terminator included), reusing one buffer.
    fn emit_lines<E>(
        &self,
        doc: &Document,
        mut emit: impl FnMut(&str) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut line = String::new();
        let mut flush = |line: &mut String| {
            line.push_str(self.line_terminator.as_str());
            let result = emit(line.as_str());
            line.clear();
            result
        };

        line.push_str("HIERARCHY");
        flush(&mut line)?;

        let mut stack: Vec<Step<'_>> = doc.root_joint().map(Step::Open).into_iter().collect();
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(joint) => {
                    let depth = joint.depth();
                    self.indent.push_prefix(&mut line, depth);
                    line.push_str(if joint.is_root() { "ROOT " } else { "JOINT " });
                    line.push_str(joint.name());
                    flush(&mut line)?;

                    self.indent.push_prefix(&mut line, depth);
                    line.push('{');
                    flush(&mut line)?;

                    self.indent.push_prefix(&mut line, depth + 1);
                    self.push_offset(&mut line, joint.offset());
                    flush(&mut line)?;

                    self.indent.push_prefix(&mut line, depth + 1);
                    let _ = write!(line, "CHANNELS {}", joint.num_channels());
                    for channel in joint.channels() {
                        line.push(' ');
                        line.push_str(channel.channel_type.as_keyword());
                    }
                    flush(&mut line)?;

                    stack.push(Step::Close(joint));
                    stack.extend(joint.children().rev().map(Step::Open));
                }
                Step::Close(joint) => {
                    let depth = joint.depth();
                    if let Some(end_site) = joint.end_site() {
                        self.indent.push_prefix(&mut line, depth + 1);
                        line.push_str("End Site");
                        flush(&mut line)?;

                        self.indent.push_prefix(&mut line, depth + 1);
                        line.push('{');
                        flush(&mut line)?;

                        self.indent.push_prefix(&mut line, depth + 2);
                        self.push_offset(&mut line, end_site);
                        flush(&mut line)?;

                        self.indent.push_prefix(&mut line, depth + 1);
                        line.push('}');
                        flush(&mut line)?;
                    }
                    self.indent.push_prefix(&mut line, depth);
                    line.push('}');
                    flush(&mut line)?;
                }
            }
        }

        line.push_str("MOTION");
        flush(&mut line)?;

        let _ = write!(line, "Frames: {}", doc.num_frames());
        flush(&mut line)?;

        let _ = write!(
            line,
            "Frame Time: {:.*}",
            self.frame_time_significant_figures,
            doc.frame_time_secs()
        );
        flush(&mut line)?;

        for frame in doc.frames() {
            for (i, value) in frame.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                let _ = write!(line, "{:.*}", self.motion_values_significant_figures, value);
            }
            flush(&mut line)?;
        }

        Ok(())
    }

    fn push_offset(&self, line: &mut String, offset: Offset) {
        let precision = self.offset_significant_figures;
        let _ = write!(
            line,
            "OFFSET {:.*} {:.*} {:.*}",
            precision, offset.x, precision, offset.y, precision, offset.z
        );
    }
}

/// Writes the document with the default `WriteOptions`.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        WriteOptions::default().emit_lines(self, |line| f.write_str(line))
    }
}

/// Indentation style for nested joints. Defaults to one tab per level.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum IndentStyle {
    /// Do not indent nested joints.
    NoIndentation,
    /// A single tab (`'\t'`) per level.
    #[default]
    Tabs,
    /// `n` spaces per level.
    Spaces(NonZeroUsize),
}

impl IndentStyle {
    /// `n` spaces per level; `0` means no indentation.
    #[inline]
    pub fn with_spaces(n: usize) -> Self {
        NonZeroUsize::new(n)
            .map(IndentStyle::Spaces)
            .unwrap_or(IndentStyle::NoIndentation)
    }

    fn push_prefix(&self, line: &mut String, depth: usize) {
        match *self {
            IndentStyle::NoIndentation => {}
            IndentStyle::Tabs => line.extend(std::iter::repeat('\t').take(depth)),
            IndentStyle::Spaces(n) => line.extend(std::iter::repeat(' ').take(n.get() * depth)),
        }
    }
}

/// Line terminator style used when writing a `Document`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum LineTerminator {
    /// `"\n"`
    Unix,
    /// `"\r\n"`
    Windows,
}

impl LineTerminator {
    /// Line terminator native to the current OS.
    #[cfg(target_os = "windows")]
    #[inline]
    pub fn native() -> Self {
        LineTerminator::Windows
    }

    /// Line terminator native to the current OS.
    #[cfg(not(target_os = "windows"))]
    #[inline]
    pub fn native() -> Self {
        LineTerminator::Unix
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match *self {
            LineTerminator::Unix => "\n",
            LineTerminator::Windows => "\r\n",
        }
    }
}

impl Default for LineTerminator {
    #[inline]
    fn default() -> Self {
        LineTerminator::native()
    }
}

impl fmt::Display for LineTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
