pub mod cookie;
pub mod index;
pub mod language;
pub mod page;
pub mod tabs;

pub use cookie::{CookieStore, LanguageStore};
pub use language::{Language, LanguageRegistry};
pub use page::PageController;
pub use tabs::{TabController, TabGroup};
