//! The Vigil review pipeline: report reading, review generation, and
//! comment publishing.
//!
//! Three sequential stages glue a static-analysis scan to a pull request
//! comment: [`report`] projects the scanner output down to the fields the
//! model needs, [`llm`] sends it to the model backend with the fixed
//! [`prompt`], and [`github`] posts the generated text. [`pipeline`] drives
//! the stages and maps their failures onto the exit-code contract.

pub mod github;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod report;
