//! Progress, phases and the wordmark reveal.

pub(crate) mod clock;
pub(crate) mod phase;
pub(crate) mod wordmark;
