pub mod guid;
pub mod split;
pub mod version;

pub use guid::Guid;
pub use version::Version;
