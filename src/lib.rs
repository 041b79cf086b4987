pub mod ffi;
pub mod index;
pub mod logging;
pub mod model;
pub mod search;
pub mod settings;
pub mod shelf;
pub mod store;

pub use index::{build_facets, Facets};
pub use model::*;
pub use search::{query, Query, SortKey};
pub use settings::Settings;
pub use shelf::{Action, FilterChange, Shelf, ShelfState, ShelfView};
pub use store::{FileStorage, MemoryStorage, RecipeBook, RecipeStore, Storage};

uniffi::setup_scaffolding!();
