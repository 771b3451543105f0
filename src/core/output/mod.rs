//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV, semicolon delimited by default - requires `csv` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one post per line - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv", feature = "json-output"))]
//! # fn main() -> postsift::Result<()> {
//! use postsift::core::output::{to_csv, write_jsonl};
//! use postsift::core::models::OutputConfig;
//! use postsift::Post;
//!
//! let posts = vec![Post::new("Hola").with_sender("jmilei")];
//!
//! write_jsonl(&posts, "filtered.jsonl", &OutputConfig::new())?;
//! let csv_string = to_csv(&posts, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
