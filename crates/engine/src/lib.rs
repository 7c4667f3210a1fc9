//! The Promptloom generation engine.
//!
//! The pipeline runs in three steps:
//!
//! 1. **Assemble context** — one content node plus the id→node lookup map
//!    becomes an ordered sequence of role-tagged messages, written into the
//!    node's `meta.messages`
//! 2. **Generate** — the sequence is shaped into a backend request (with
//!    edit-mode prefill and stop sequences where applicable) and sent to a
//!    provider; backend failures degrade to a sentinel result instead of
//!    failing the batch
//! 3. **Extract** — in edit mode, the interior of the first fenced code
//!    block is pulled out of the raw response text

pub mod assembler;
pub mod fence;
pub mod generate;

pub use assembler::{assemble, prepare, AssemblyError};
pub use fence::extract_first_fence;
pub use generate::{
    fence_tag, generate, GenerateDebug, GenerateOptions, GenerateResult, SENTINEL_RESPONSE,
};

#[cfg(test)]
pub(crate) mod test_helpers;
