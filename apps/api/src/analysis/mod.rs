// Resume analysis: turns raw resume text (typed or uploaded) into a suggestion list.
// The analyzer is a pluggable collaborator; the tracker only ever sees its output.

pub mod analyzer;
pub mod catalog;
pub mod extract;
pub mod handlers;
