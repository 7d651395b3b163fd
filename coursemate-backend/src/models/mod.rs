pub mod app_data;
pub mod notebook;
pub mod settings;
pub mod template;

pub use app_data::AppData;
pub use notebook::{Note, Notebook, Task};
pub use settings::{FontSize, Settings, SettingsPatch, Theme};
pub use template::{Template, TemplateDefinition, TemplateKind, TemplateSection};
