//! Layer, mode and "all layers" options of the time-series view.

use std::str::FromStr;

use crate::notify::{ListenerId, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Line,
    Map,
}

impl FromStr for DisplayMode {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "line" => Ok(DisplayMode::Line),
            "map" => Ok(DisplayMode::Map),
            other => Err(DisplayError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("no layers to display")]
    NoLayers,

    #[error("unknown layer '{0}'")]
    UnknownLayer(String),

    #[error("unknown display mode '{0}'")]
    UnknownMode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub layer_key: String,
    pub mode: DisplayMode,
    pub all_layers: bool,
}

#[derive(Debug)]
pub struct DisplayOptions {
    layer_keys: Vec<String>,
    current: DisplaySettings,
    notifier: Notifier<DisplaySettings>,
}

impl DisplayOptions {
    /// The first layer key is selected initially.
    pub fn new(
        layer_keys: Vec<String>,
        mode: DisplayMode,
        all_layers: bool,
    ) -> Result<Self, DisplayError> {
        let layer_key = layer_keys.first().cloned().ok_or(DisplayError::NoLayers)?;
        Ok(Self {
            layer_keys,
            current: DisplaySettings {
                layer_key,
                mode,
                all_layers,
            },
            notifier: Notifier::new(),
        })
    }

    pub fn layer_keys(&self) -> &[String] {
        &self.layer_keys
    }

    pub fn current(&self) -> &DisplaySettings {
        &self.current
    }

    pub fn subscribe(&self, listener: impl Fn(&DisplaySettings) + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    pub fn set_layer(&mut self, key: &str) -> Result<(), DisplayError> {
        if !self.layer_keys.iter().any(|k| k == key) {
            return Err(DisplayError::UnknownLayer(key.to_string()));
        }
        self.current.layer_key = key.to_string();
        self.notifier.publish(&self.current);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.current.mode = mode;
        self.notifier.publish(&self.current);
    }

    pub fn set_all_layers(&mut self, all_layers: bool) {
        self.current.all_layers = all_layers;
        self.notifier.publish(&self.current);
    }
}
