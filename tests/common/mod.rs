pub mod fixtures;
pub mod strategies;

// Each integration test binary uses a different subset of the helpers
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use strategies::*;
