pub mod init;
pub mod maintenance;
pub mod misc;
pub mod notes;

pub use init::handle_init;
pub use maintenance::{handle_check, handle_export, handle_import};
pub use misc::{handle_completions, handle_palette};
pub use notes::{handle_delete, handle_edit, handle_list, handle_show, handle_write};
