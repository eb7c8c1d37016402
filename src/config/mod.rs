pub mod settings;

pub use settings::{ProviderConfig, Settings};
