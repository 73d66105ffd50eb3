// Suggestion tracking: grouping, progress, completion toggles and the
// all-complete celebration. Everything except `sessions` and `handlers` is pure.

pub mod completion;
pub mod grouping;
pub mod handlers;
pub mod priority;
pub mod progress;
pub mod sessions;
