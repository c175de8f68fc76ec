use clap::Parser;
use derive_builder::Builder;

#[derive(Clone, Default, Debug, PartialEq, Parser)]
#[command(version, about, long_about = None)]
#[doc(hidden)]
pub struct CliOptions {
    /// The test to apply, as JSON: null matches any element, a string matches elements with exactly that tagName,
    /// and an array matches when any of its entries matches. A bare word is shorthand for a quoted tag name.
    ///
    /// Other JSON values (numbers, booleans, objects) are not tests, and are rejected.
    #[arg(value_name = "test")]
    pub(crate) test: String,

    /// The node's index within its parent. Requires --parent.
    #[arg(long, value_name = "NUMBER", allow_negative_numbers = true)]
    pub(crate) index: Option<f64>,

    /// Path to a JSON file holding the node's parent. Requires --index.
    #[arg(long, value_name = "FILE")]
    pub(crate) parent: Option<String>,

    /// Suppress output; only the exit status reports whether anything matched.
    #[arg(short, long)]
    pub(crate) quiet: bool,

    /// An optional list of JSON files, each holding one node to check. If not provided, standard input will be
    /// used.
    ///
    /// A path of "-" represents standard input; all but the first "-" are ignored. Files are checked in the order
    /// you provide them.
    #[arg(value_name = "nodes")]
    pub(crate) node_file_paths: Vec<String>,
}

/// Options analogous to the elq CLI's switches.
#[derive(Clone, Debug, Default, PartialEq, Builder)]
#[builder(default)]
pub struct RunOptions {
    /// The test to apply, as the CLI would take it. `None` matches any element.
    pub test: Option<String>,

    /// The node's index within its parent. This is analogous to the `--index` option in the CLI arguments.
    pub index: Option<f64>,

    /// Path of a JSON file holding the node's parent. This is analogous to the `--parent` option in the CLI
    /// arguments.
    pub parent_file: Option<String>,

    /// Whether to suppress output.
    pub quiet: bool,

    /// JSON files each holding one node to check; empty means standard input.
    pub node_file_paths: Vec<String>,
}

impl From<CliOptions> for RunOptions {
    fn from(value: CliOptions) -> Self {
        Self {
            test: Some(value.test),
            index: value.index,
            parent_file: value.parent,
            quiet: value.quiet,
            node_file_paths: value.node_file_paths,
        }
    }
}
