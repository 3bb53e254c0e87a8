//! Library side of the `roadval` binary.

pub mod logging;
pub mod pipeline;
