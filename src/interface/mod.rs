pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_menu_report_csv;
pub use prompts::{prompt_yes_no, resolve_ingredient};
pub use render::{deviation_verdict, display_escandallo, display_fanout, display_matrix};
