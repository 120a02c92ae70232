pub mod build_order;
pub mod skill_order;
pub mod summary;
pub mod timeline;
