mod check;
mod export;
mod import;

pub use check::handle_check;
pub use export::handle_export;
pub use import::handle_import;
