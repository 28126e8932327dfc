use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};
use std::str::FromStr;

use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Prompt<'a, T>
where
    T: FromStr,
    T::Err: Display,
{
    /// The value returned on empty input.
    default: Option<T>,
    msg: &'a str,
}

impl<'a, T> Prompt<'a, T>
where
    T: FromStr,
    T::Err: Display,
{
    #[inline]
    pub fn new(msg: &'a str) -> Self {
        Self { default: None, msg }
    }

    #[inline]
    pub fn default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    pub fn read(&mut self) -> io::Result<Result<T, T::Err>> {
        {
            let mut writer = io::stdout();
            writer.write_all(self.msg.as_bytes())?;
            writer.write_all(b": ")?;
            writer.flush()?;
        }

        let mut string = String::new();
        if io::stdin().lock().read_line(&mut string)? == 0 {
            return match self.default.take() {
                Some(value) => Ok(Ok(value)),
                None => Err(ErrorKind::UnexpectedEof.into()),
            };
        }

        let input = string.trim();
        if input.is_empty() {
            if let Some(value) = self.default.take() {
                return Ok(Ok(value));
            }
        }

        Ok(T::from_str(input))
    }

    /// Read until a valid element is input.
    pub fn read_valid(&mut self) -> io::Result<T> {
        loop {
            match self.read()? {
                Ok(val) => return Ok(val),
                Err(err) => {
                    println!("Failed to parse input: {}", err)
                }
            }
        }
    }
}

/// A yes or no answer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Answer(pub bool);

impl FromStr for Answer {
    type Err = InvalidAnswer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(Self(true)),
            "n" | "no" => Ok(Self(false)),
            _ => Err(InvalidAnswer(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("expected \"y\" or \"n\", got {0:?}")]
pub struct InvalidAnswer(String);

/// Asks a yes or no question, defaulting to no.
pub fn confirm(msg: &str) -> io::Result<bool> {
    let msg = format!("{} [y/N]", msg);

    Prompt::new(&msg)
        .default(Answer(false))
        .read_valid()
        .map(|answer| answer.0)
}

/// A 1-based position given on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position(usize);

impl Position {
    /// Returns the 0-based index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl FromStr for Position {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse() {
            Ok(position) if position >= 1 => Ok(Self(position)),
            _ => Err(InvalidPosition(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("expected a position starting at 1, got {0:?}")]
pub struct InvalidPosition(String);

/// Renders rows as a table with left-aligned columns separated by ` | `.
pub fn render_table<K, R>(keys: K, rows: R) -> String
where
    K: IntoIterator,
    K::Item: Display,
    R: IntoIterator<Item = Vec<String>>,
{
    let mut lines: Vec<Vec<String>> = vec![keys.into_iter().map(|k| k.to_string()).collect()];
    lines.extend(rows);

    let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|column| {
            lines
                .iter()
                .filter_map(|line| line.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();

        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }

    out
}
