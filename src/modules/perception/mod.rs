pub mod structs;
pub mod news;

pub use structs::{Headline, Summary};
pub use news::NewsClient;
