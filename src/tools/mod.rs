pub mod tavily;

pub use tavily::{TavilySearch, TavilySearchArgs};
