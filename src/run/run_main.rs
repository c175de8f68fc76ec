use crate::check;
use crate::check::Test;
use crate::is_elem::is_element;
use crate::run::RunOptions;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::io;
use std::io::Write;

/// The run's overall possible error.
#[derive(Debug)]
pub enum Error {
    /// The test, index, or parent arguments were malformed or didn't fit together.
    ///
    /// This comes from [`is_element`] or [`Test::from_value`].
    Check(check::Error),

    /// An input wasn't valid JSON.
    JsonParse(Input, serde_json::Error),

    /// Couldn't read an input file.
    FileReadError(Input, io::Error),
}

impl std::error::Error for Error {}

/// Stdin or an input file by path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    Stdin,
    FilePath(String),
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Stdin => f.write_str("stdin"),
            Input::FilePath(file) => write!(f, "file {file:?}"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Check(err) => {
                writeln!(f, "{err}")
            }
            Error::JsonParse(input, err) => {
                writeln!(f, "JSON parse error in {input}:")?;
                writeln!(f, "{err}")
            }
            Error::FileReadError(file, err) => {
                writeln!(f, "{err} while reading {file}")
            }
        }
    }
}

/// A simple facade for handling I/O.
///
/// This trait lets you do "I/O-y stuff" like mocking out stdin or reading files. The [`run`] method uses it.
pub trait OsFacade {
    /// Read stdin (or your mock of it) to a `String`.
    fn read_stdin(&self) -> io::Result<String>;

    /// Read a file path (or your mock of one) to a `String`.
    fn read_file(&self, path: &str) -> io::Result<String>;

    /// Get a writer for stdout (or your mock of it).
    fn stdout(&mut self) -> impl Write;

    /// Handle an error.
    fn write_error(&mut self, err: Error);

    /// Read a slice of file paths, one `String` per path.
    ///
    /// The default implementation (which you should feel free to use) treats an empty slice as just stdin, and the
    /// file path `"-"` as stdin. The first `"-"` reads all of stdin (via [`Self::read_stdin`]), and subsequent
    /// `"-"`s get silently ignored.
    fn read_each(&self, node_file_paths: &[String]) -> Result<Vec<(Input, String)>, Error> {
        if node_file_paths.is_empty() {
            let contents = self
                .read_stdin()
                .map_err(|err| Error::FileReadError(Input::Stdin, err))?;
            return Ok(vec![(Input::Stdin, contents)]);
        }
        let mut inputs = Vec::with_capacity(node_file_paths.len());
        let mut have_read_stdin = false;
        for path in node_file_paths {
            if path == "-" {
                if !have_read_stdin {
                    let contents = self
                        .read_stdin()
                        .map_err(|err| Error::FileReadError(Input::Stdin, err))?;
                    inputs.push((Input::Stdin, contents));
                    have_read_stdin = true;
                }
            } else {
                let contents = self
                    .read_file(path)
                    .map_err(|err| Error::FileReadError(Input::FilePath(path.to_string()), err))?;
                inputs.push((Input::FilePath(path.to_string()), contents));
            }
        }
        Ok(inputs)
    }
}

/// Runs elq end to end.
///
/// This uses the provided [RunOptions] and [OsFacade] to read each input into a JSON value, checks it against the
/// test in [`RunOptions::test`], and echoes each matching node to the facade's stdout as one line of compact JSON.
/// Returns whether any input matched.
pub fn run(options: &RunOptions, os: &mut impl OsFacade) -> bool {
    match run_or_error(options, os) {
        Ok(ok) => ok,
        Err(err) => {
            os.write_error(err);
            false
        }
    }
}

fn run_or_error(options: &RunOptions, os: &mut impl OsFacade) -> Result<bool, Error> {
    let test = match &options.test {
        None => None,
        Some(test_str) => parse_test(test_str).map_err(Error::Check)?,
    };

    let parent = match &options.parent_file {
        None => None,
        Some(path) => {
            let input = Input::FilePath(path.clone());
            let contents = os
                .read_file(path)
                .map_err(|err| Error::FileReadError(input.clone(), err))?;
            let value: Value = serde_json::from_str(&contents).map_err(|err| Error::JsonParse(input, err))?;
            Some(value)
        }
    };

    let inputs = os.read_each(&options.node_file_paths)?;

    let mut found_any = false;
    let mut stdout = os.stdout();
    for (input, contents) in inputs {
        let node: Value = serde_json::from_str(&contents).map_err(|err| Error::JsonParse(input, err))?;
        let matched =
            is_element(Some(&node), test.as_ref(), options.index, parent.as_ref(), None).map_err(Error::Check)?;
        if matched {
            found_any = true;
            if !options.quiet {
                writeln!(stdout, "{node}").unwrap();
            }
        }
    }

    Ok(found_any)
}

/// Reads the CLI's test argument: JSON if it parses as JSON, otherwise a bare tag name.
fn parse_test(test_str: &str) -> Result<Option<Test>, check::Error> {
    match serde_json::from_str::<Value>(test_str) {
        Ok(value) => Ok(Some(Test::from_value(&value)?)),
        Err(_) => Ok(Some(Test::Tag(test_str.to_string()))),
    }
}
