//! Editor sections, one module per form area

pub mod args_editor;
pub mod classifier_picker;
pub mod export_panel;
pub mod general_settings;
pub mod module_picker;
pub mod overrides_panel;
pub mod template_sidebar;
