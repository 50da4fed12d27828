pub mod form_panel;
pub mod notice;

pub use form_panel::FormPanel;
pub use notice::{Notice, NoticeBar};
