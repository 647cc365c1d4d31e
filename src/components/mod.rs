/// Link graph viewer.
pub mod force_graph;
/// Code block highlighting.
pub mod highlight;
/// Search suggestions and scroll-spy.
pub mod search;
