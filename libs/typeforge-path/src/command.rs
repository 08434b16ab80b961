//! # Path Commands
//!
//! Typed path-drawing commands and the SVG path-data parser.
//!
//! The parser accepts the move/line/curve/close subset of the SVG path
//! grammar (`M L H V C S Q T Z`, absolute and relative) and resolves every
//! coordinate to absolute form. Elliptical arcs and unknown command letters
//! are rejected as malformed input.

use glam::DVec2;
use thiserror::Error;

/// A single path-drawing command with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at the given point.
    MoveTo(DVec2),
    /// Straight segment to the given point.
    LineTo(DVec2),
    /// Quadratic Bézier segment.
    QuadTo { ctrl: DVec2, to: DVec2 },
    /// Cubic Bézier segment.
    CubicTo { ctrl1: DVec2, ctrl2: DVec2, to: DVec2 },
    /// Close the current subpath back to its starting point.
    Close,
}

/// Errors raised while parsing path data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    /// The path data could not be parsed.
    #[error("malformed path data at byte {offset}: {message}")]
    Malformed { offset: usize, message: String },
}

impl PathError {
    fn at(offset: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            offset,
            message: message.into(),
        }
    }
}

/// An ordered sequence of path-drawing commands, one per source `<path>`
/// element. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutline {
    commands: Vec<PathCommand>,
}

impl PathOutline {
    /// Wraps an already-built command list.
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Parses SVG path data into an outline.
    ///
    /// # Arguments
    ///
    /// * `data` - Path data text, e.g. `"M 0 0 L 10 0 L 10 10 Z"`
    ///
    /// # Errors
    ///
    /// [`PathError::Malformed`] on unknown command letters (including
    /// elliptical arcs), missing coordinates, or bad numeric tokens. The
    /// error carries the byte offset of the offending token.
    ///
    /// # Example
    ///
    /// ```rust
    /// use typeforge_path::PathOutline;
    ///
    /// let outline = PathOutline::parse("M 0 0 h 10 v 10 H 0 Z").unwrap();
    /// assert_eq!(outline.commands().len(), 5);
    /// ```
    pub fn parse(data: &str) -> Result<Self, PathError> {
        Parser::new(data).run()
    }

    /// Returns the command list.
    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns true if the outline contains no commands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

// =============================================================================
// PARSER
// =============================================================================

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    commands: Vec<PathCommand>,
    /// Current pen position.
    cur: DVec2,
    /// Start of the current subpath, for Z and relative moves after close.
    subpath_start: DVec2,
    /// Second control point of the previous cubic segment, for S/s.
    last_cubic_ctrl: Option<DVec2>,
    /// Control point of the previous quadratic segment, for T/t.
    last_quad_ctrl: Option<DVec2>,
}

impl<'a> Parser<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            bytes: data.as_bytes(),
            pos: 0,
            commands: Vec::new(),
            cur: DVec2::ZERO,
            subpath_start: DVec2::ZERO,
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
        }
    }

    fn run(mut self) -> Result<PathOutline, PathError> {
        // Repeated coordinate groups after a command letter implicitly
        // repeat that command; a repeated moveto continues as lineto.
        let mut pending: Option<u8> = None;

        loop {
            self.skip_separators();
            let Some(byte) = self.peek() else { break };

            let cmd = if byte.is_ascii_alphabetic() {
                self.pos += 1;
                pending = Some(byte);
                byte
            } else if let Some(prev) = pending {
                match prev {
                    b'M' => b'L',
                    b'm' => b'l',
                    // A close takes no coordinates, so nothing can repeat it.
                    b'Z' | b'z' => {
                        return Err(PathError::at(
                            self.pos,
                            "coordinates after a close command",
                        ));
                    }
                    other => other,
                }
            } else {
                return Err(PathError::at(self.pos, "expected a command letter"));
            };
            pending = Some(cmd);

            if self.commands.is_empty() && cmd != b'M' && cmd != b'm' {
                return Err(PathError::at(
                    self.pos,
                    "path data must begin with a move-to command",
                ));
            }

            match cmd {
                b'M' | b'm' => self.move_to(cmd == b'm')?,
                b'L' | b'l' => self.line_to(cmd == b'l')?,
                b'H' | b'h' => self.horizontal_to(cmd == b'h')?,
                b'V' | b'v' => self.vertical_to(cmd == b'v')?,
                b'C' | b'c' => self.cubic_to(cmd == b'c')?,
                b'S' | b's' => self.smooth_cubic_to(cmd == b's')?,
                b'Q' | b'q' => self.quad_to(cmd == b'q')?,
                b'T' | b't' => self.smooth_quad_to(cmd == b't')?,
                b'Z' | b'z' => self.close(),
                other => {
                    return Err(PathError::at(
                        self.pos.saturating_sub(1),
                        format!("unsupported path command '{}'", other as char),
                    ));
                }
            }

            // Smooth-curve reflection only reaches back one segment.
            if !matches!(cmd, b'C' | b'c' | b'S' | b's') {
                self.last_cubic_ctrl = None;
            }
            if !matches!(cmd, b'Q' | b'q' | b'T' | b't') {
                self.last_quad_ctrl = None;
            }
        }

        Ok(PathOutline::new(self.commands))
    }

    // --- command handlers ---

    fn move_to(&mut self, relative: bool) -> Result<(), PathError> {
        let p = self.point(relative)?;
        self.cur = p;
        self.subpath_start = p;
        self.commands.push(PathCommand::MoveTo(p));
        Ok(())
    }

    fn line_to(&mut self, relative: bool) -> Result<(), PathError> {
        let p = self.point(relative)?;
        self.cur = p;
        self.commands.push(PathCommand::LineTo(p));
        Ok(())
    }

    fn horizontal_to(&mut self, relative: bool) -> Result<(), PathError> {
        let x = self.number()?;
        let x = if relative { self.cur.x + x } else { x };
        self.cur = DVec2::new(x, self.cur.y);
        self.commands.push(PathCommand::LineTo(self.cur));
        Ok(())
    }

    fn vertical_to(&mut self, relative: bool) -> Result<(), PathError> {
        let y = self.number()?;
        let y = if relative { self.cur.y + y } else { y };
        self.cur = DVec2::new(self.cur.x, y);
        self.commands.push(PathCommand::LineTo(self.cur));
        Ok(())
    }

    fn cubic_to(&mut self, relative: bool) -> Result<(), PathError> {
        let ctrl1 = self.point(relative)?;
        let ctrl2 = self.point(relative)?;
        let to = self.point(relative)?;
        self.cur = to;
        self.last_cubic_ctrl = Some(ctrl2);
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
        Ok(())
    }

    fn smooth_cubic_to(&mut self, relative: bool) -> Result<(), PathError> {
        let ctrl1 = match self.last_cubic_ctrl {
            Some(prev) => self.cur * 2.0 - prev,
            None => self.cur,
        };
        let ctrl2 = self.point(relative)?;
        let to = self.point(relative)?;
        self.cur = to;
        self.last_cubic_ctrl = Some(ctrl2);
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
        Ok(())
    }

    fn quad_to(&mut self, relative: bool) -> Result<(), PathError> {
        let ctrl = self.point(relative)?;
        let to = self.point(relative)?;
        self.cur = to;
        self.last_quad_ctrl = Some(ctrl);
        self.commands.push(PathCommand::QuadTo { ctrl, to });
        Ok(())
    }

    fn smooth_quad_to(&mut self, relative: bool) -> Result<(), PathError> {
        let ctrl = match self.last_quad_ctrl {
            Some(prev) => self.cur * 2.0 - prev,
            None => self.cur,
        };
        let to = self.point(relative)?;
        self.cur = to;
        self.last_quad_ctrl = Some(ctrl);
        self.commands.push(PathCommand::QuadTo { ctrl, to });
        Ok(())
    }

    fn close(&mut self) {
        self.cur = self.subpath_start;
        self.commands.push(PathCommand::Close);
    }

    // --- tokenizer ---

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn point(&mut self, relative: bool) -> Result<DVec2, PathError> {
        let x = self.number()?;
        let y = self.number()?;
        let p = DVec2::new(x, y);
        Ok(if relative { self.cur + p } else { p })
    }

    fn number(&mut self) -> Result<f64, PathError> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }
        let mut saw_digit = false;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
            saw_digit = true;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                saw_digit = true;
            }
        }
        if !saw_digit {
            return Err(PathError::at(start, "expected a coordinate"));
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            let mut saw_exp_digit = false;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                saw_exp_digit = true;
            }
            if !saw_exp_digit {
                return Err(PathError::at(start, "malformed exponent"));
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| PathError::at(start, "non-ASCII numeric token"))?;
        text.parse::<f64>()
            .map_err(|_| PathError::at(start, format!("bad numeric token '{text}'")))
    }
}

// =============================================================================
// TESTS
// =============================================================================
