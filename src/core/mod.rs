pub mod colormap;
pub mod matrix;
pub mod naming;
pub mod panel;
pub mod series;
