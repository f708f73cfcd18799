pub mod animation;
pub mod context;
pub mod document;
pub mod router;

pub use context::AppContext;
pub use document::Document;
pub use router::{Disposer, Markup, NavigationOutcome, Routable, Router};
