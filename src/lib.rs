//! sparkgrep - detect leftover Spark and Databricks debugging actions.
//!
//! Scans Python scripts and Jupyter notebooks line by line for calls such as
//! `display(df)`, `df.show()` or a bare `df.collect()` that are useful while
//! exploring data but should not be committed.
//!
//! # Architecture
//!
//! - `detect`: pattern set, comment/docstring filter, script and notebook
//!   processors, and the `Runner` that ties them together
//! - `report`: text and JSON output, exit status
//! - `config`: optional YAML configuration
//! - `cli`: command-line front end
//!
//! # Example
//!
//! ```no_run
//! use sparkgrep::detect::Runner;
//! use sparkgrep::report;
//!
//! let runner = Runner::with_defaults(&["print\\(:print call"]);
//! let result = runner.run(&["etl/job.py", "notebooks/explore.ipynb"]);
//! let (text, exit_code) = report::render(&result, false);
//! print!("{}", text);
//! std::process::exit(exit_code);
//! ```

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod report;

pub use config::Config;
pub use detect::{FileResult, Finding, Location, Pattern, PatternSet, Runner, ScanResult};
pub use error::{PatternConfigError, ScanError};
