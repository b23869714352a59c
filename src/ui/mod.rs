pub mod dialogs;
pub mod project_editor;
pub mod project_list;
pub mod theme;
pub mod toolbar;
