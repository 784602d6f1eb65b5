pub mod error;
pub mod session;
pub mod space;
pub mod volume;
