mod draft;
pub mod image;
mod recipe;

pub use draft::RecipeDraft;
pub use image::{encode_image_bytes, encode_image_file, ImageError};
pub use recipe::{tokenize_ingredients, Recipe, RecipeId};

pub(crate) use recipe::non_empty;
