pub mod catalog;
pub mod net;
pub mod scene;
pub mod selection;
