//! Property-bag material: a name plus named color and float properties.
use std::collections::BTreeMap;

use crate::material::{Color, SurfaceMaterial, ALPHA_CUTOFF_PROPERTY};

/// Host-independent material used by the in-memory prefab library and by
/// serialized forest descriptions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMaterial {
    pub name: String,
    pub colors: BTreeMap<String, Color>,
    pub floats: BTreeMap<String, f32>,
}

impl PropertyMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds or replaces a color property.
    pub fn with_color(mut self, property: impl Into<String>, color: Color) -> Self {
        self.colors.insert(property.into(), color);
        self
    }

    /// Adds or replaces a float property.
    pub fn with_float(mut self, property: impl Into<String>, value: f32) -> Self {
        self.floats.insert(property.into(), value);
        self
    }

    /// Adds an alpha cutoff property with the given value.
    pub fn with_cutoff(self, value: f32) -> Self {
        self.with_float(ALPHA_CUTOFF_PROPERTY, value)
    }

    pub fn color(&self, property: &str) -> Option<Color> {
        self.colors.get(property).copied()
    }

    pub fn float(&self, property: &str) -> Option<f32> {
        self.floats.get(property).copied()
    }
}

impl SurfaceMaterial for PropertyMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn color_property_mut(&mut self, name: &str) -> Option<&mut Color> {
        self.colors.get_mut(name)
    }

    fn float_property_mut(&mut self, name: &str) -> Option<&mut f32> {
        self.floats.get_mut(name)
    }
}
