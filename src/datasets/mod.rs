/// Line-delimited JSON datasets of labeled descriptions
pub mod descriptions;

pub use descriptions::{Dataset, DatasetError, Item};
