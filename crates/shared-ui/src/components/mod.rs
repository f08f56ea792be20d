// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod form;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod pagination;
pub mod skeleton;
pub mod textarea;

// Overlays
pub mod confirm_dialog;
pub mod modal;
pub mod toast;

// Forms and charts
pub mod bar_chart;
pub mod stepper;

pub use badge::*;
pub use bar_chart::*;
pub use button::*;
pub use card::*;
pub use confirm_dialog::*;
pub use data_table::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use modal::*;
pub use page_header::*;
pub use pagination::*;
pub use skeleton::*;
pub use stepper::*;
pub use textarea::*;
pub use toast::*;
