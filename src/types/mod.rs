pub mod drafts;
pub mod page;

pub use drafts::{CustomerDraft, OrderDraft, ProductDraft};
pub use page::{NavAction, Page};
