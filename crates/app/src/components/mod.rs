pub mod file_picker;
pub mod list_section;
pub mod wizard_nav;

pub use file_picker::FilePicker;
pub use list_section::{ListError, ListSection};
pub use wizard_nav::{WizardNav, WizardSuccess};
