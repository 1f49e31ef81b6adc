//! CPU-side uniform register set and its GPU buffers.
//!
//! [`UniformState`] implements [`ShaderProgram`] by writing each named
//! uniform into one of two `#[repr(C)]` blocks laid out for WGSL uniform
//! buffers: [`ObjectUniform`] (rewritten for every draw) and
//! [`LightsUniform`] (written once while the scene is prepared).

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::light::MAX_LIGHTS,
    pipelines::{ShaderProgram, names},
};

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub object_texture: u32,
    pub material_ambient_color: [f32; 3],
    pub material_ambient_strength: f32,
    pub material_diffuse_color: [f32; 3],
    pub material_shininess: f32,
    pub material_specular_color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    pub _padding: u32,
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightSourceUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    pub ambient_strength: f32,
    pub specular_color: [f32; 3],
    pub _padding: u32,
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub sources: [LightSourceUniform; MAX_LIGHTS],
    pub use_lighting: u32,
    pub _padding: [u32; 3],
}

/// Named-uniform register set backing the scene shader.
///
/// Unknown names, type mismatches and out-of-range light indices are logged
/// and ignored, the way a GL driver ignores a uniform location of -1.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformState {
    object: ObjectUniform,
    lights: LightsUniform,
}

impl UniformState {
    pub fn new() -> Self {
        let object = ObjectUniform {
            model: Matrix4::<f32>::identity().into(),
            object_color: [1.0; 4],
            uv_scale: [1.0, 1.0],
            ..Default::default()
        };
        Self {
            object,
            lights: LightsUniform::default(),
        }
    }

    pub fn object(&self) -> &ObjectUniform {
        &self.object
    }

    pub fn lights(&self) -> &LightsUniform {
        &self.lights
    }

    pub fn model(&self) -> Matrix4<f32> {
        self.object.model.into()
    }

    pub fn uses_texture(&self) -> bool {
        self.object.use_texture != 0
    }

    pub fn texture_slot(&self) -> u32 {
        self.object.object_texture
    }

    pub fn uses_lighting(&self) -> bool {
        self.lights.use_lighting != 0
    }

    fn light_mut(&mut self, name: &str) -> Option<(&mut LightSourceUniform, String)> {
        let (index, field) = names::parse_light(name)?;
        if index >= MAX_LIGHTS {
            log::warn!("Light index {index} in `{name}` exceeds the {MAX_LIGHTS} light slots");
            return None;
        }
        Some((&mut self.lights.sources[index], field.to_string()))
    }

    fn set_flag(&mut self, name: &str, value: bool) -> bool {
        match name {
            names::USE_TEXTURE => self.object.use_texture = value as u32,
            names::USE_LIGHTING => self.lights.use_lighting = value as u32,
            _ => return false,
        }
        true
    }
}

impl Default for UniformState {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown(kind: &str, name: &str) {
    log::warn!("Shader has no {kind} uniform named `{name}`");
}

impl ShaderProgram for UniformState {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        match name {
            names::MODEL => self.object.model = value.into(),
            _ => unknown("mat4", name),
        }
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        match name {
            names::OBJECT_COLOR => self.object.object_color = value.into(),
            _ => unknown("vec4", name),
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        let value: [f32; 3] = value.into();
        match name {
            names::MATERIAL_AMBIENT_COLOR => self.object.material_ambient_color = value,
            names::MATERIAL_DIFFUSE_COLOR => self.object.material_diffuse_color = value,
            names::MATERIAL_SPECULAR_COLOR => self.object.material_specular_color = value,
            _ => match self.light_mut(name) {
                Some((light, field)) => match field.as_str() {
                    names::LIGHT_POSITION => light.position = value,
                    names::LIGHT_AMBIENT_COLOR => light.ambient_color = value,
                    names::LIGHT_DIFFUSE_COLOR => light.diffuse_color = value,
                    names::LIGHT_SPECULAR_COLOR => light.specular_color = value,
                    _ => unknown("vec3", name),
                },
                None => unknown("vec3", name),
            },
        }
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        match name {
            names::UV_SCALE => self.object.uv_scale = value.into(),
            _ => unknown("vec2", name),
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        match name {
            names::MATERIAL_AMBIENT_STRENGTH => self.object.material_ambient_strength = value,
            names::MATERIAL_SHININESS => self.object.material_shininess = value,
            _ => match self.light_mut(name) {
                Some((light, field)) => match field.as_str() {
                    names::LIGHT_FOCAL_STRENGTH => light.focal_strength = value,
                    names::LIGHT_SPECULAR_INTENSITY => light.specular_intensity = value,
                    names::LIGHT_AMBIENT_STRENGTH => light.ambient_strength = value,
                    _ => unknown("float", name),
                },
                None => unknown("float", name),
            },
        }
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        if !self.set_flag(name, value) {
            unknown("bool", name);
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        if name == names::OBJECT_TEXTURE {
            match u32::try_from(value) {
                Ok(slot) => self.object.object_texture = slot,
                Err(_) => log::warn!("Negative texture unit {value} for `{name}` ignored"),
            }
        } else if !self.set_flag(name, value != 0) {
            unknown("int", name);
        }
    }

    fn set_sampler(&mut self, name: &str, slot: u32) {
        match name {
            names::OBJECT_TEXTURE => self.object.object_texture = slot,
            _ => unknown("sampler", name),
        }
    }
}

/// The uniform buffers and bind group the scene shader reads
/// [`UniformState`] from. Binding 0 is the object block, binding 1 the lights.
pub struct UniformBuffers {
    pub object: wgpu::Buffer,
    pub lights: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBuffers {
    pub fn new(device: &wgpu::Device, state: &UniformState) -> Self {
        let object = mk_buffer(device, "Object Uniform Buffer", bytemuck::bytes_of(state.object()));
        let lights = mk_buffer(device, "Lights Uniform Buffer", bytemuck::bytes_of(state.lights()));
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights.as_entire_binding(),
                },
            ],
            label: Some("scene_uniform_bind_group"),
        });
        Self {
            object,
            lights,
            bind_group_layout,
            bind_group,
        }
    }

    /// Copy the current register set into the buffers.
    pub fn write(&self, queue: &wgpu::Queue, state: &UniformState) {
        queue.write_buffer(&self.object, 0, bytemuck::bytes_of(state.object()));
        queue.write_buffer(&self.lights, 0, bytemuck::bytes_of(state.lights()));
    }
}

fn mk_buffer(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let entry = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[entry(0), entry(1)],
        label: Some("scene_uniform_bind_group_layout"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_keep_uniform_alignment() {
        assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightSourceUniform>(), 64);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 64 * MAX_LIGHTS + 16);
    }

    #[test]
    fn starts_untextured_with_identity_model() {
        let state = UniformState::new();
        assert_eq!(state.model(), Matrix4::identity());
        assert!(!state.uses_texture());
        assert_eq!(state.object().uv_scale, [1.0, 1.0]);
    }

    #[test]
    fn named_writes_land_in_their_fields() {
        let mut state = UniformState::new();
        state.set_bool(names::USE_TEXTURE, true);
        state.set_sampler(names::OBJECT_TEXTURE, 5);
        state.set_vec2(names::UV_SCALE, Vector2::new(10.0, 5.0));
        state.set_float(names::MATERIAL_SHININESS, 0.6);
        state.set_vec3(names::MATERIAL_DIFFUSE_COLOR, Vector3::new(0.1, 0.1, 0.3));

        assert!(state.uses_texture());
        assert_eq!(state.texture_slot(), 5);
        assert_eq!(state.object().uv_scale, [10.0, 5.0]);
        assert_eq!(state.object().material_shininess, 0.6);
        assert_eq!(state.object().material_diffuse_color, [0.1, 0.1, 0.3]);
    }

    #[test]
    fn int_flags_behave_like_bools() {
        let mut state = UniformState::new();
        state.set_int(names::USE_TEXTURE, 1);
        assert!(state.uses_texture());
        state.set_int(names::USE_TEXTURE, 0);
        assert!(!state.uses_texture());
    }

    #[test]
    fn light_fields_are_addressed_by_index() {
        let mut state = UniformState::new();
        state.set_vec3(&names::light(2, names::LIGHT_POSITION), Vector3::new(50.0, 11.0, 50.0));
        state.set_float(&names::light(2, names::LIGHT_AMBIENT_STRENGTH), 0.6);
        state.set_bool(names::USE_LIGHTING, true);

        let light = state.lights().sources[2];
        assert_eq!(light.position, [50.0, 11.0, 50.0]);
        assert_eq!(light.ambient_strength, 0.6);
        assert_eq!(state.lights().sources[0], LightSourceUniform::default());
        assert!(state.uses_lighting());
    }

    #[test]
    fn unknown_and_out_of_range_names_are_ignored() {
        let mut state = UniformState::new();
        let before = state.clone();
        state.set_vec3(&names::light(MAX_LIGHTS, names::LIGHT_POSITION), Vector3::new(1.0, 1.0, 1.0));
        state.set_vec3("objectColor", Vector3::new(1.0, 0.0, 0.0));
        state.set_float("material.roughness", 0.5);
        state.set_int(names::OBJECT_TEXTURE, -1);
        assert_eq!(state, before);
    }
}
