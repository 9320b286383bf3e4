//! Parser for session scripts.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::circuit::Terminal;
use crate::components::{ComponentKind, PropertyPatch};
use crate::error::{CanvasError, Result};

/// Parser for session scripts.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire script.
    pub fn parse(&mut self) -> Result<Script> {
        let mut script = Script::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            let line = self.current.line;
            let command = self.parse_command()?;
            script.statements.push(Statement { command, line });

            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(CanvasError::parse(
                        self.current.line,
                        format!("unexpected {:?} after command", self.current.text),
                    ))
                }
            }
        }

        Ok(script)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(CanvasError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    /// A bare word.
    fn word(&mut self, what: &str) -> Result<String> {
        if self.current.kind != TokenKind::Word {
            return Err(CanvasError::parse(
                self.current.line,
                format!("expected {}, got {:?}", what, self.current.text),
            ));
        }
        let text = self.current.text.clone();
        self.advance()?;
        Ok(text)
    }

    /// A bare word or a quoted string.
    fn text(&mut self, what: &str) -> Result<String> {
        if self.current.kind == TokenKind::Text {
            let text = self.current.text.clone();
            self.advance()?;
            return Ok(text);
        }
        self.word(what)
    }

    fn number(&mut self, what: &str) -> Result<f64> {
        let line = self.current.line;
        let text = self.word(what)?;
        parse_value(&text)
            .filter(|v| v.is_finite())
            .ok_or_else(|| CanvasError::parse(line, format!("invalid {}: {:?}", what, text)))
    }

    fn terminal_ref(&mut self) -> Result<TerminalRef> {
        let line = self.current.line;
        let text = self.word("<ref>.<terminal>")?;
        let (target, terminal) = text
            .rsplit_once('.')
            .ok_or_else(|| CanvasError::parse(line, format!("expected <ref>.<terminal>, got {:?}", text)))?;
        let terminal: Terminal = terminal
            .parse()
            .map_err(|e: CanvasError| CanvasError::parse(line, e.to_string()))?;
        Ok(TerminalRef {
            target: target.to_string(),
            terminal,
        })
    }

    /// `as <alias>` or nothing.
    fn alias(&mut self) -> Result<Option<String>> {
        if self.current.kind == TokenKind::Word && self.current.text.eq_ignore_ascii_case("as") {
            self.advance()?;
            return self.word("alias").map(Some);
        }
        Ok(None)
    }

    /// `<ref>` or `none`.
    fn optional_target(&mut self) -> Result<Option<String>> {
        let target = self.word("reference or 'none'")?;
        Ok((!target.eq_ignore_ascii_case("none")).then_some(target))
    }

    fn parse_command(&mut self) -> Result<Command> {
        let line = self.current.line;
        let keyword = self.word("command")?;

        let command = match keyword.to_ascii_lowercase().as_str() {
            "add" => {
                let label = self.text("component kind")?;
                let kind: ComponentKind = label
                    .parse()
                    .map_err(|e: CanvasError| CanvasError::parse(line, e.to_string()))?;
                Command::Add {
                    kind,
                    alias: self.alias()?,
                }
            }
            "move" => Command::Move {
                target: self.word("reference")?,
                dx: self.number("dx")?,
                dy: self.number("dy")?,
            },
            "set" => {
                let target = self.word("reference")?;
                let patch = self.parse_patch(line)?;
                Command::Set { target, patch }
            }
            "select" => Command::Select {
                target: self.optional_target()?,
            },
            "select-wire" => Command::SelectWire {
                target: self.optional_target()?,
            },
            "wire" => Command::Wire {
                from: self.terminal_ref()?,
                to: self.terminal_ref()?,
                alias: self.alias()?,
            },
            "start" => Command::Start {
                from: self.terminal_ref()?,
            },
            "draft" => Command::Draft {
                x: self.number("x")?,
                y: self.number("y")?,
            },
            "finish" => Command::Finish {
                to: self.terminal_ref()?,
                alias: self.alias()?,
            },
            "cancel" => Command::Cancel,
            "delete" => Command::Delete {
                target: self.word("reference")?,
            },
            "unwire" => Command::Unwire {
                target: self.word("reference")?,
            },
            "point" => Command::Point {
                at: self.terminal_ref()?,
            },
            "validate" => Command::Validate,
            "analyze" | "analyse" | "simulate" => Command::Analyze,
            _ => {
                return Err(CanvasError::parse(
                    line,
                    format!("unknown command: {}", keyword),
                ))
            }
        };
        Ok(command)
    }

    /// `key=value` pairs up to the end of the line.
    fn parse_patch(&mut self, line: usize) -> Result<PropertyPatch> {
        let mut patch = PropertyPatch::new();

        while !self.at_line_end() {
            let key = self.word("property name")?;
            self.expect(TokenKind::Equals)?;
            let value = self.text("property value")?;

            match key.to_ascii_lowercase().as_str() {
                "label" => patch.label = Some(value),
                "voltage" | "v" => patch.voltage = Some(self.property_value(line, &key, &value)?),
                "resistance" | "r" => {
                    patch.resistance = Some(self.property_value(line, &key, &value)?)
                }
                _ => {
                    return Err(CanvasError::parse(
                        line,
                        format!("unknown property: {}", key),
                    ))
                }
            }
        }

        if patch.is_empty() {
            return Err(CanvasError::parse(line, "set requires at least one key=value"));
        }
        Ok(patch)
    }

    fn property_value(&self, line: usize, key: &str, value: &str) -> Result<f64> {
        parse_value(value)
            .ok_or_else(|| CanvasError::parse(line, format!("invalid value for {}: {:?}", key, value)))
    }
}
