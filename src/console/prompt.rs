//! Line-oriented prompts over arbitrary input and output streams.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, Write};

/// Prompt/response I/O for the console session.
///
/// `None` from a read means the input stream has ended.
pub struct Console<R, W> {
    input: R,
    output: W,
    mask_passwords: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            mask_passwords: false,
        }
    }

    /// Read passwords from the terminal with `*` echo instead of from `input`.
    pub fn with_masked_passwords(mut self, mask: bool) -> Self {
        self.mask_passwords = mask;
        self
    }

    /// Print one line.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Print `label` and read one line with the trailing newline removed.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Like [`Console::prompt`], masking the typed characters when enabled.
    pub fn prompt_password(&mut self, label: &str) -> io::Result<Option<String>> {
        if !self.mask_passwords {
            return self.prompt(label);
        }

        write!(self.output, "{}", label)?;
        self.output.flush()?;

        terminal::enable_raw_mode()?;
        let result = read_masked(&mut self.output);
        terminal::disable_raw_mode()?;
        writeln!(self.output)?;
        result
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn read_masked<W: Write>(output: &mut W) -> io::Result<Option<String>> {
    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }

        match code {
            KeyCode::Enter => return Ok(Some(buf)),
            KeyCode::Char('c') | KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None)
            }
            KeyCode::Char(c) => {
                buf.push(c);
                write!(output, "*")?;
                output.flush()?;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    write!(output, "\u{8} \u{8}")?;
                    output.flush()?;
                }
            }
            _ => {}
        }
    }
}
