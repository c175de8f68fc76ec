//! End-to-end runs.
//!
//! This module combines [`crate::is_element`] with input handling into the same workflow the CLI uses, so you can
//! run it within-process.
//!
//! ## Example
//!
//! ```
//! # use elq::run;
//!
//! // First, let's define a mocked I/O. Replace this with whatever you need.
//! #[derive(Default)]
//! struct MockIo {
//!     stdout: Vec<u8>,
//! }
//!
//! impl run::OsFacade for MockIo {
//!     fn read_stdin(&self) -> std::io::Result<String> {
//!         Ok(r#"{"type": "element", "tagName": "div"}"#.to_string())
//!     }
//!
//!     fn read_file(&self, path: &str) -> std::io::Result<String> {
//!         Err(std::io::Error::new(std::io::ErrorKind::NotFound, path))
//!     }
//!
//!     fn stdout(&mut self) -> impl std::io::Write {
//!         &mut self.stdout
//!     }
//!
//!     fn write_error(&mut self, err: run::Error) {
//!         eprintln!("{err}")
//!     }
//! }
//!
//! // Now, use it:
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! // Define our "CLI" options. Use the defaults, but check against a list of tag names.
//! let mut options = run::RunOptions::default();
//! options.test = Some(r#"["div", "span"]"#.to_string());
//!
//! let mut os_facade = MockIo::default();
//! let found_any = run::run(&options, &mut os_facade);
//! let stdout_text = String::from_utf8(os_facade.stdout)?;
//!
//! assert_eq!(found_any, true);
//! assert_eq!(stdout_text, "{\"tagName\":\"div\",\"type\":\"element\"}\n");
//! #
//! #     Ok(())
//! # }
//! ```
mod cli;
mod run_main;

pub use cli::*;
pub use run_main::*;
