//! Binding of a module entry's `name` to catalog descriptors
//!
//! A binding remembers the picker state (known module or custom text) for one
//! section of the document. It is rebuilt from the document whenever the
//! session's reload generation changes, and otherwise survives edits.

use serde_json::Value;

use crate::catalog::{DescriptorMap, ModuleDescriptor, PlatformDescriptor};
use crate::constants::modules::MOCK_CLASSIFIER;
use crate::document::ConfigMap;
use std::collections::BTreeMap;

/// Which entry of the picker is selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleChoice {
    Custom,
    Known(String),
}

#[derive(Debug, Clone)]
pub struct ModuleBinding {
    generation: Option<u64>,
    choice: ModuleChoice,
    custom_name: String,
}

impl ModuleBinding {
    /// Preselect `current` when it names a known module, otherwise offer it as custom text
    pub fn from_name(current: &str, descriptors: &DescriptorMap) -> Self {
        if descriptors.contains_key(current) {
            Self {
                generation: None,
                choice: ModuleChoice::Known(current.to_string()),
                custom_name: String::new(),
            }
        } else {
            Self {
                generation: None,
                choice: ModuleChoice::Custom,
                custom_name: current.to_string(),
            }
        }
    }

    /// Rebuild from the document if `generation` differs from the captured one
    pub fn sync(&mut self, generation: u64, current: &str, descriptors: &DescriptorMap) -> bool {
        if self.generation == Some(generation) {
            return false;
        }
        *self = Self::from_name(current, descriptors);
        self.generation = Some(generation);
        true
    }

    /// Known module names in lexicographic order
    pub fn options(descriptors: &DescriptorMap) -> impl Iterator<Item = &str> {
        descriptors.keys().map(String::as_str)
    }

    pub fn choice(&self) -> &ModuleChoice {
        &self.choice
    }

    pub fn select(&mut self, choice: ModuleChoice) {
        self.choice = choice;
    }

    pub fn custom_name_mut(&mut self) -> &mut String {
        &mut self.custom_name
    }

    /// Name this binding writes into the document
    pub fn selected_name(&self, descriptors: &DescriptorMap) -> String {
        match &self.choice {
            ModuleChoice::Known(name) if descriptors.contains_key(name) => name.clone(),
            _ => self.custom_name.clone(),
        }
    }

    /// Write the selected name into `module`, returning the descriptor of a known choice
    pub fn apply<'d>(&self, module: &mut ConfigMap, descriptors: &'d DescriptorMap) -> Option<&'d ModuleDescriptor> {
        let name = self.selected_name(descriptors);
        let descriptor = match &self.choice {
            ModuleChoice::Known(known) => descriptors.get(known),
            ModuleChoice::Custom => None,
        };
        module.insert("name".to_string(), Value::String(name));
        descriptor
    }
}

/// Composite classifier name: `<mode>` or `<mode>_<platform>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierName {
    pub mode: String,
    /// Upper-case platform key, empty when the name has no platform
    pub platform: String,
}

impl ClassifierName {
    pub fn parse(name: &str) -> Self {
        if name == MOCK_CLASSIFIER {
            return Self { mode: name.to_string(), platform: String::new() };
        }
        match name.split_once('_') {
            Some((mode, platform)) => Self {
                mode: mode.to_string(),
                platform: platform.to_uppercase(),
            },
            None => Self { mode: name.to_string(), platform: String::new() },
        }
    }

    /// Join mode and platform; the platform is written lower-case and dropped for `mock`
    pub fn compose(mode: &str, platform: &str) -> String {
        if mode.is_empty() {
            String::new()
        } else if platform.is_empty() || mode == MOCK_CLASSIFIER {
            mode.to_string()
        } else {
            format!("{mode}_{}", platform.to_lowercase())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformChoice {
    None,
    Custom,
    Known(String),
}

/// Mode and platform pickers for the single `classifier` entry
#[derive(Debug, Clone)]
pub struct ClassifierBinding {
    generation: Option<u64>,
    mode: ModuleBinding,
    platform: PlatformChoice,
    custom_platform: String,
}

impl ClassifierBinding {
    pub fn from_name(
        name: &str,
        modes: &DescriptorMap,
        platforms: &BTreeMap<String, PlatformDescriptor>,
    ) -> Self {
        let parsed = ClassifierName::parse(name);
        let (platform, custom_platform) = if parsed.platform.is_empty() {
            (PlatformChoice::None, String::new())
        } else if platforms.contains_key(&parsed.platform) {
            (PlatformChoice::Known(parsed.platform.clone()), String::new())
        } else {
            (PlatformChoice::Custom, parsed.platform.to_lowercase())
        };
        let mut mode = ModuleBinding::from_name(&parsed.mode, modes);
        mode.custom_name = mode.custom_name.trim().to_string();
        Self {
            generation: None,
            mode,
            platform,
            custom_platform,
        }
    }

    pub fn sync(
        &mut self,
        generation: u64,
        name: &str,
        modes: &DescriptorMap,
        platforms: &BTreeMap<String, PlatformDescriptor>,
    ) -> bool {
        if self.generation == Some(generation) {
            return false;
        }
        *self = Self::from_name(name, modes, platforms);
        self.generation = Some(generation);
        true
    }

    pub fn mode_mut(&mut self) -> &mut ModuleBinding {
        &mut self.mode
    }

    pub fn platform_choice(&self) -> &PlatformChoice {
        &self.platform
    }

    pub fn select_platform(&mut self, choice: PlatformChoice) {
        self.platform = choice;
    }

    pub fn custom_platform_mut(&mut self) -> &mut String {
        &mut self.custom_platform
    }

    pub fn mode_value(&self, modes: &DescriptorMap) -> String {
        self.mode.selected_name(modes).trim().to_string()
    }

    /// `mock` takes no platform, so platform selection is disabled for it
    pub fn platform_disabled(&self, modes: &DescriptorMap) -> bool {
        self.mode_value(modes) == MOCK_CLASSIFIER
    }

    /// Platform as written into the name (lower-case), empty for none
    pub fn platform_value(&self, modes: &DescriptorMap) -> String {
        if self.platform_disabled(modes) {
            return String::new();
        }
        match &self.platform {
            PlatformChoice::None => String::new(),
            PlatformChoice::Custom => self.custom_platform.trim().to_lowercase(),
            PlatformChoice::Known(key) => key.to_lowercase(),
        }
    }

    /// Recompose the classifier name and return the mode descriptor, if known
    pub fn apply<'d>(&self, classifier: &mut ConfigMap, modes: &'d DescriptorMap) -> Option<&'d ModuleDescriptor> {
        let mode = self.mode_value(modes);
        let name = ClassifierName::compose(&mode, &self.platform_value(modes));
        classifier.insert("name".to_string(), Value::String(name));
        modes.get(&mode)
    }

    /// Descriptor of the selected platform, if it is a catalog platform
    pub fn platform_descriptor<'p>(
        &self,
        modes: &DescriptorMap,
        platforms: &'p BTreeMap<String, PlatformDescriptor>,
    ) -> Option<&'p PlatformDescriptor> {
        let value = self.platform_value(modes);
        if value.is_empty() {
            return None;
        }
        platforms.get(&value.to_uppercase())
    }
}
