//! Recursive-descent parser for BVH text.
//!
//! Grammar:
//!   HIERARCHY
//!   ROOT <name> { <joint body> }
//!   MOTION
//!   Frames: <n>
//!   Frame Time: <seconds>
//!   <n * width floats>
//!
//!   <joint body> = OFFSET x y z [CHANNELS k <k channel keywords>]
//!                  (JOINT <name> { <joint body> })* | End Site { OFFSET x y z }
//!
//! The joint arena is filled while descending, which yields pre-order directly.
//! Motion values are read as one whitespace-separated stream; line breaks inside
//! the motion section carry no meaning.

mod lexer;

use std::iter::Peekable;
use std::str::FromStr;

use crate::channel::ChannelType;
use crate::config::Config;
use crate::document::Document;
use crate::error::{BvhError, Result};
use crate::joint::{JointData, JointIndex};
use crate::offset::Offset;
use crate::time::fractional_seconds_to_duration;

use lexer::{Lexer, Token, TokenKind};

/// Parse BVH text into a validated document.
pub(crate) fn parse_document(text: &str, config: &Config) -> Result<Document> {
    Parser::new(text, config).parse()
}

struct Parser<'a, 'c> {
    tokens: Peekable<Lexer<'a>>,
    config: &'c Config,
    joints: Vec<JointData>,
}

impl<'a, 'c> Parser<'a, 'c> {
    fn new(text: &'a str, config: &'c Config) -> Self {
        Self {
            tokens: Lexer::new(text).peekable(),
            config,
            joints: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Document> {
        self.expect_keyword("HIERARCHY")?;
        let root = self.expect_keyword("ROOT")?;
        self.parse_joint(None, 0, root.line)?;

        if let Some(token) = self.tokens.peek() {
            if token.kind == TokenKind::Word("ROOT") {
                return Err(BvhError::MultipleRoots { line: token.line });
            }
        }

        self.expect_keyword("MOTION")?;
        self.expect_label("Frames")?;
        let frames_line = self.tokens.peek().map(|t| t.line).unwrap_or_default();
        let num_frames: usize = self.parse_number("frame count")?;
        if num_frames > self.config.max_frames {
            return Err(BvhError::FrameLimitExceeded {
                line: frames_line,
                frames: num_frames,
                max_frames: self.config.max_frames,
            });
        }
        self.expect_keyword("Frame")?;
        self.expect_label("Time")?;
        let seconds: f64 = self.parse_number("frame time")?;
        let frame_time = fractional_seconds_to_duration(seconds)?;
        if frame_time.is_zero() {
            log::warn!("BVH frame time is zero; frames carry no timing information");
        }

        let width: usize = self.joints.iter().map(|j| j.channels.len()).sum();
        let reserve = num_frames
            .saturating_mul(width)
            .min(self.config.max_preallocated_values);
        let mut values = Vec::with_capacity(reserve);
        for token in self.tokens.by_ref() {
            match token.kind {
                TokenKind::Word(word) => values.push(parse_word(word, token.line)?),
                _ => return Err(unexpected(token, "motion value")),
            }
        }

        log::debug!(
            "parsed BVH document: {} joints, {} channels, {} frames ({} values)",
            self.joints.len(),
            width,
            num_frames,
            values.len()
        );
        Document::from_parts(self.joints, frame_time, num_frames, values)
    }

    /// Parse a joint after its `ROOT`/`JOINT` keyword, pushing it and its subtree.
    fn parse_joint(&mut self, parent: Option<JointIndex>, depth: usize, line: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(BvhError::DepthLimitExceeded {
                line,
                max_depth: self.config.max_depth,
            });
        }

        let name = self.expect_word("joint name")?;
        self.expect_open_brace()?;
        self.expect_keyword("OFFSET")?;
        let offset = self.parse_offset()?;
        let channels = match self.tokens.peek() {
            Some(token) if token.kind == TokenKind::Word("CHANNELS") => {
                self.parse_channels(name)?
            }
            _ => Vec::new(),
        };

        let index = JointIndex(self.joints.len());
        self.joints
            .push(JointData::new(name, offset, channels, parent, depth));
        if let Some(parent) = parent {
            self.joints[parent.0].children.push(index);
        }

        loop {
            let token = self.next_token("JOINT, End Site or `}`")?;
            match token.kind {
                TokenKind::CloseBrace => return Ok(()),
                TokenKind::Word("JOINT") => {
                    if self.joints[index.0].end_site.is_some() {
                        return Err(BvhError::EndSiteWithChildren {
                            line: token.line,
                            joint: name.to_string(),
                        });
                    }
                    self.parse_joint(Some(index), depth + 1, token.line)?;
                }
                TokenKind::Word("End") => {
                    let site = self.expect_word("Site")?;
                    if site != "Site" {
                        return Err(BvhError::UnexpectedToken {
                            line: token.line,
                            expected: "`Site`".to_string(),
                            found: site.to_string(),
                        });
                    }
                    let joint = &self.joints[index.0];
                    if !joint.children.is_empty() || joint.end_site.is_some() {
                        return Err(BvhError::EndSiteWithChildren {
                            line: token.line,
                            joint: name.to_string(),
                        });
                    }
                    self.expect_open_brace()?;
                    self.expect_keyword("OFFSET")?;
                    let end_site = self.parse_offset()?;
                    self.expect_close_brace()?;
                    self.joints[index.0].end_site = Some(end_site);
                }
                _ => return Err(unexpected(token, "JOINT, End Site or `}`")),
            }
        }
    }

    fn parse_channels(&mut self, joint: &str) -> Result<Vec<ChannelType>> {
        let keyword = self.expect_keyword("CHANNELS")?;
        let declared: usize = self.parse_number("channel count")?;
        let mut channels = Vec::new();

        while channels.len() < declared {
            let token = self.next_token("channel name")?;
            let TokenKind::Word(word) = token.kind else {
                return Err(count_mismatch(keyword.line, joint, declared, channels.len()));
            };
            match ChannelType::from_keyword(word) {
                Some(channel) => channels.push(channel),
                None if matches!(word, "JOINT" | "End") => {
                    return Err(count_mismatch(keyword.line, joint, declared, channels.len()));
                }
                None => {
                    return Err(BvhError::UnknownChannel {
                        line: token.line,
                        name: word.to_string(),
                    })
                }
            }
        }

        let mut extra = 0;
        while let Some(Token {
            kind: TokenKind::Word(word),
            ..
        }) = self.tokens.peek()
        {
            if ChannelType::from_keyword(word).is_none() {
                break;
            }
            self.tokens.next();
            extra += 1;
        }
        if extra > 0 {
            return Err(count_mismatch(keyword.line, joint, declared, declared + extra));
        }
        Ok(channels)
    }

    fn parse_offset(&mut self) -> Result<Offset> {
        let x = self.parse_number("offset x")?;
        let y = self.parse_number("offset y")?;
        let z = self.parse_number("offset z")?;
        Ok(Offset::new(x, y, z))
    }

    fn parse_number<T: FromStr>(&mut self, expected: &str) -> Result<T> {
        let token = self.next_token(expected)?;
        match token.kind {
            TokenKind::Word(word) => word.parse().map_err(|_| BvhError::InvalidNumber {
                line: token.line,
                text: word.to_string(),
            }),
            _ => Err(unexpected(token, expected)),
        }
    }

    fn next_token(&mut self, expected: &str) -> Result<Token<'a>> {
        self.tokens.next().ok_or_else(|| BvhError::UnexpectedEof {
            expected: expected.to_string(),
        })
    }

    fn expect_word(&mut self, expected: &str) -> Result<&'a str> {
        let token = self.next_token(expected)?;
        match token.kind {
            TokenKind::Word(word) => Ok(word),
            _ => Err(unexpected(token, expected)),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<Token<'a>> {
        let expected = format!("`{keyword}`");
        let token = self.next_token(&expected)?;
        if token.kind == TokenKind::Word(keyword) {
            Ok(token)
        } else {
            Err(unexpected(token, &expected))
        }
    }

    /// Accept `label:` or `label :`.
    fn expect_label(&mut self, label: &str) -> Result<()> {
        let expected = format!("`{label}:`");
        let token = self.next_token(&expected)?;
        match token.kind {
            TokenKind::Word(word) if word.strip_suffix(':') == Some(label) => Ok(()),
            TokenKind::Word(word) if word == label => {
                let colon = self.next_token("`:`")?;
                if colon.kind == TokenKind::Word(":") {
                    Ok(())
                } else {
                    Err(unexpected(colon, "`:`"))
                }
            }
            _ => Err(unexpected(token, &expected)),
        }
    }

    fn expect_open_brace(&mut self) -> Result<()> {
        let token = self.next_token("`{`")?;
        match token.kind {
            TokenKind::OpenBrace => Ok(()),
            _ => Err(unexpected(token, "`{`")),
        }
    }

    fn expect_close_brace(&mut self) -> Result<()> {
        let token = self.next_token("`}`")?;
        match token.kind {
            TokenKind::CloseBrace => Ok(()),
            _ => Err(unexpected(token, "`}`")),
        }
    }
}

fn parse_word(word: &str, line: usize) -> Result<f32> {
    word.parse().map_err(|_| BvhError::InvalidNumber {
        line,
        text: word.to_string(),
    })
}

fn unexpected(token: Token<'_>, expected: &str) -> BvhError {
    BvhError::UnexpectedToken {
        line: token.line,
        expected: expected.to_string(),
        found: token.text().to_string(),
    }
}

fn count_mismatch(line: usize, joint: &str, declared: usize, found: usize) -> BvhError {
    BvhError::ChannelCountMismatch {
        line,
        joint: joint.to_string(),
        declared,
        found,
    }
}
