use crate::data_structures::material::Material;

/// Ordered list of materials, looked up by tag.
///
/// `define` never checks for duplicates: a later material with an existing
/// tag is kept but can never be found.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, material: Material) {
        log::debug!("Material `{}` defined", material.tag);
        self.materials.push(material);
    }

    /// First material registered under `tag`.
    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;

    fn material(tag: &str, shininess: f32) -> Material {
        Material {
            tag: tag.to_string(),
            ambient_strength: 0.1,
            ambient_color: Vector3::new(0.1, 0.1, 0.6),
            diffuse_color: Vector3::new(0.1, 0.1, 0.3),
            specular_color: Vector3::new(0.1, 0.1, 0.3),
            shininess,
        }
    }

    #[test]
    fn finds_by_tag() {
        let mut registry = MaterialRegistry::new();
        registry.define(material("cement", 0.1));
        registry.define(material("blueTile", 0.6));
        assert_eq!(registry.find("blueTile").map(|m| m.shininess), Some(0.6));
    }

    #[test]
    fn first_definition_shadows_later_ones() {
        let mut registry = MaterialRegistry::new();
        registry.define(material("bark", 0.1));
        registry.define(material("bark", 0.9));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("bark").map(|m| m.shininess), Some(0.1));
    }

    #[test]
    fn unknown_tag_is_not_found_even_when_non_empty() {
        let mut registry = MaterialRegistry::new();
        registry.define(material("cement", 0.1));
        assert!(registry.find("glass").is_none());
        assert!(MaterialRegistry::new().find("cement").is_none());
    }
}
