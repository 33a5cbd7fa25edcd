use std::collections::HashMap;

use ultraviolet::vec::{
	Vec2,
	Vec3
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatPropValueID {
	Ambient,
	Diffuse,
	DiffuseMap,
	Dissolve,
	Illumination,
	Specular,
	SpecularExponent,
	Transparency,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MatPropValue {
	Float(f32),
	Integer(u32),
	Text(String),
	Vector3(Vec3),
}

/// [`HashMap`] type alias for material properties
pub type MaterialPropertyMap = HashMap<MatPropValueID, MatPropValue>;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
	pub name: String,
	pub properties: MaterialPropertyMap,
}

impl Material {
	pub fn new(name: &str) -> Material {
		Material {
			name: name.to_string(),
			properties: MaterialPropertyMap::new(),
		}
	}

	/// Sets a property, returning the material for chaining
	pub fn with(mut self, id: MatPropValueID, value: MatPropValue) -> Material {
		self.properties.insert(id, value);
		self
	}

	pub fn get(&self, id: MatPropValueID) -> Option<&MatPropValue> {
		self.properties.get(&id)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpAxis {
	Y,
	Z,
}

/// Per-corner attribute indices of a face, all 0-based
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaceVertex {
	pub position: usize,
	pub uv: Option<usize>,
	pub normal: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Face {
	Triangle([FaceVertex; 3]),
	Ngon(Vec<FaceVertex>),
}

impl Face {
	pub fn corners(&self) -> &[FaceVertex] {
		match self {
			Face::Triangle(t) => &t[..],
			Face::Ngon(n) => &n[..],
		}
	}
}

/// Indexed mesh with independent attribute streams, as referenced by [`FaceVertex`]
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
	pub name: String,
	pub material: Option<String>,
	pub up: UpAxis,
	pub positions: Vec<Vec3>,
	pub uvs: Vec<Vec2>,
	pub normals: Vec<Vec3>,
	pub faces: Vec<Face>,
}

impl Mesh {
	pub fn new(name: &str) -> Mesh {
		Mesh {
			name: name.to_string(),
			material: None,
			up: UpAxis::Z,
			positions: vec![],
			uvs: vec![],
			normals: vec![],
			faces: vec![],
		}
	}
}
