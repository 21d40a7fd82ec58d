pub mod done;
pub mod file_picker;
pub mod home;
pub mod progress;
pub mod settings;
pub mod style;
