//! SVG front-end: path-data (`d` attribute) parsing into the shared
//! segment model.

pub mod path_data;

pub use path_data::parse_path_data;
