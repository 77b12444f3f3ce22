mod assembler;
mod model;

pub use assembler::{CatalogueUrls, render};
pub use model::DeviceCatalogue;
