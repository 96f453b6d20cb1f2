pub mod env;
pub mod jsonc;
pub mod path;

pub use env::HostEnv;
