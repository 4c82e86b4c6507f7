// CV evaluation engine: skill matching, weighted scoring and rating.
// Pure and synchronous; the handlers are the only part that touches I/O.

pub mod handlers;
pub mod scorer;
pub mod signals;
pub mod skill_matcher;
pub mod synonyms;
