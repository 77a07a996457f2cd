pub mod item;

pub use item::{CreateItem, Item};
