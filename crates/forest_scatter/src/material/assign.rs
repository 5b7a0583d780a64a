//! Per-instance material substitution and leaf recoloring.
//!
//! Two passes over an instance's material slots:
//! 1. substitution: slots whose name matches a role with a configured override are
//!    replaced by a fresh copy of that override;
//! 2. color: slots classified as leaf (or every slot, when classification is ignored)
//!    are replaced by an edited copy with the leaf color and alpha cutoff applied.
//!
//! Input materials are never modified in place; edited slots hold new clones.
use crate::forest::{ItemTypeSpec, MaterialOverrides};
use crate::material::{
    is_leaf_material, Color, MaterialRole, SurfaceMaterial, ALPHA_CUTOFF_PROPERTY,
    COLOR_PROPERTY_ALIASES,
};

/// What happened to one material slot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotEdit {
    /// Index of the slot in the instance's material list.
    pub slot: usize,
    /// Role of the final material, by name.
    pub role: MaterialRole,
    /// Replaced by an override material.
    pub substituted: bool,
    /// Received the leaf color and alpha cutoff.
    pub recolored: bool,
}

/// Revised material list plus a record of the slots that changed.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedMaterials<M> {
    pub materials: Vec<M>,
    pub edits: Vec<SlotEdit>,
}

/// Applies one item type's material policy to instance material slots.
#[derive(Debug, Clone, Copy)]
pub struct MaterialColorAssigner<'a, M> {
    overrides: &'a MaterialOverrides<M>,
    alpha_cutoff: f32,
    ignore_classification: bool,
}

impl<'a, M: SurfaceMaterial> MaterialColorAssigner<'a, M> {
    pub fn new(
        overrides: &'a MaterialOverrides<M>,
        alpha_cutoff: f32,
        ignore_classification: bool,
    ) -> Self {
        Self {
            overrides,
            alpha_cutoff,
            ignore_classification,
        }
    }

    pub fn from_spec(spec: &'a ItemTypeSpec<M>) -> Self {
        Self::new(
            &spec.overrides,
            spec.alpha_cutoff,
            spec.ignore_classification,
        )
    }

    /// Override for a material name: the first role (leaf, branch, trunk) that has a
    /// configured override and whose keywords match.
    fn override_for(&self, name: &str) -> Option<&'a M> {
        let lower = name.to_lowercase();
        MaterialRole::PRIORITY.into_iter().find_map(|role| {
            self.overrides
                .for_role(role)
                .filter(|_| role.matches_lowercase(&lower))
        })
    }

    /// Substitution pass. Returns, per slot, whether it was replaced.
    pub fn substitute(&self, slots: &mut [M]) -> Vec<bool> {
        if self.overrides.is_empty() {
            return vec![false; slots.len()];
        }
        slots
            .iter_mut()
            .map(|slot| match self.override_for(slot.name()) {
                Some(replacement) => {
                    *slot = replacement.clone();
                    true
                }
                None => false,
            })
            .collect()
    }

    /// Whether the color pass edits a material with this name.
    pub fn should_recolor(&self, name: &str) -> bool {
        self.ignore_classification || is_leaf_material(name)
    }

    /// Edited copy of `material` with every recognized color property set to `color`
    /// and the alpha cutoff applied, if present.
    pub fn recolor(&self, material: &M, color: Color) -> M {
        let mut edited = material.clone();
        for alias in COLOR_PROPERTY_ALIASES {
            if let Some(c) = edited.color_property_mut(alias) {
                *c = color;
            }
        }
        if let Some(cutoff) = edited.float_property_mut(ALPHA_CUTOFF_PROPERTY) {
            *cutoff = self.alpha_cutoff;
        }
        edited
    }

    /// Runs both passes over an instance's material slots.
    pub fn assign(&self, mut slots: Vec<M>, leaf_color: Color) -> AssignedMaterials<M> {
        let substituted = self.substitute(&mut slots);
        let mut edits = Vec::new();

        for (i, slot) in slots.iter_mut().enumerate() {
            let recolored = self.should_recolor(slot.name());
            if recolored {
                *slot = self.recolor(slot, leaf_color);
            }
            if recolored || substituted[i] {
                edits.push(SlotEdit {
                    slot: i,
                    role: MaterialRole::classify(slot.name()),
                    substituted: substituted[i],
                    recolored,
                });
            }
        }

        AssignedMaterials {
            materials: slots,
            edits,
        }
    }
}
