pub mod color;
pub mod gpu;
pub mod plot;
pub mod raster;
pub mod scene;
pub mod text;
pub mod vertex;
