pub mod nav_item;
pub mod report_kind;
pub mod summary;
pub mod user;
pub mod venta_detalle;
pub mod weekly;
