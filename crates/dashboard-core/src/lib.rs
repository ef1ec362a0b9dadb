pub mod enrich;
pub mod error;
pub mod format;
pub mod headers;
pub mod metrics;
pub mod normalize;
pub mod score;
pub mod types;

pub use enrich::*;
pub use error::*;
pub use headers::*;
pub use score::Rating;
pub use types::*;
