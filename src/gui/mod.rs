//! Desktop editor built with egui/eframe

pub mod components;
pub mod constants;
mod editor;

pub use editor::run_gui;

use constants::{STATUS_ERROR, STATUS_INFO, STATUS_SUCCESS, STATUS_WARNING};

/// One-line feedback shown after a user-initiated action
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub color: egui::Color32,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_SUCCESS }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_ERROR }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_WARNING }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_INFO }
    }
}
