#[cfg(feature = "export")]
pub mod export {
	use std::io::{
		Result,
		Write
	};

	use meshio_core::scene::Mesh;

	/// Writes `mesh` as OBJ. Face indices are written 1-based, as `p/t`, `p/t/n`, `p//n` or `p`
	/// depending on which attributes each corner carries.
	pub fn write_obj<W>(w: &mut W, material_lib: Option<&str>, mesh: &Mesh) -> Result<()>
	where
		W: Write,
	{
		if let Some(lib) = material_lib {
			writeln!(w, "mtllib {}", lib)?;
		}

		if let Some(mat) = &mesh.material {
			writeln!(w, "usemtl {}", mat)?;
		}

		for p in mesh.positions.iter() {
			writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
		}

		for uv in mesh.uvs.iter() {
			writeln!(w, "vt {} {}", uv.x, uv.y)?;
		}

		for n in mesh.normals.iter() {
			writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
		}

		for face in mesh.faces.iter() {
			write!(w, "f")?;

			for c in face.corners() {
				write!(w, " {}", c.position + 1)?;
				match (c.uv, c.normal) {
					(Some(t), Some(n)) => write!(w, "/{}/{}", t + 1, n + 1)?,
					(Some(t), None) => write!(w, "/{}", t + 1)?,
					(None, Some(n)) => write!(w, "//{}", n + 1)?,
					(None, None) => (),
				}
			}

			writeln!(w)?;
		}

		Ok(())
	}

}

#[cfg(feature = "import")]
pub mod import {
	use nom::{
		branch::alt,
		character::complete::{
			char,
			u32
		},
		combinator::{
			eof,
			map,
			opt,
			verify
		},
		error::{
			ErrorKind,
			ParseError
		},
		IResult,
		multi::{
			many0,
			many1
		},
		sequence::preceded
	};

	use thiserror::Error;
	use ultraviolet::vec::Vec3;

	use meshio_core::{
		nom_ext::{
			sp,
			vec3sp
		},
		scene::{
			Face,
			FaceVertex
		}
	};

	use crate::parser::{
		etc,
		identifier,
		keyword,
		uvw
	};

	#[derive(Clone, Debug, Error, PartialEq)]
	pub enum ObjImportError {
		#[error("Unexpected statement: {0}")]
		Unexpected(String),
		#[error("Unknown import error")]
		Unknown,
	}

	impl<I> ParseError<I> for ObjImportError {
		fn from_error_kind(_: I, _: ErrorKind) -> Self {
			ObjImportError::Unknown
		}

		fn append(_: I, _: ErrorKind, other: Self) -> Self {
			other
		}
	}

	/// Parsed contents of an OBJ file. Texture coordinates keep their optional third component.
	#[derive(Clone, Debug, Default, PartialEq)]
	pub struct ObjDocument {
		pub material_libs: Vec<String>,
		pub objects: Vec<String>,
		pub material: Option<String>,
		pub positions: Vec<Vec3>,
		pub uvs: Vec<Vec3>,
		pub normals: Vec<Vec3>,
		pub faces: Vec<Face>,
	}

	#[derive(Clone, Debug, PartialEq)]
	enum Statement<'a> {
		MaterialLib(&'a str),
		UseMaterial(&'a str),
		Object(&'a str),
		Position(Vec3),
		TexCoord(Vec3),
		Normal(Vec3),
		Face(Vec<FaceVertex>),
	}

	/// Parses a 1-based index into a 0-based one
	fn index(input: &str) -> IResult<&str, usize, ObjImportError> {
		map(verify(u32, |i: &u32| *i > 0), |i| i as usize - 1)(input)
	}

	/// Parses a face corner, `p`, `p/t`, `p//n` or `p/t/n`
	fn face_vertex(input: &str) -> IResult<&str, FaceVertex, ObjImportError> {
		let (input, position) = index(input)?;
		let (input, uv) = opt(preceded(char('/'), opt(index)))(input)?;
		let (input, normal) = opt(preceded(char('/'), index))(input)?;

		Ok((input, FaceVertex {
			position: position,
			uv: uv.flatten(),
			normal: normal,
		}))
	}

	fn statement(input: &str) -> IResult<&str, Statement, ObjImportError> {
		alt((
			map(preceded(keyword("mtllib"), identifier), Statement::MaterialLib),
			map(preceded(keyword("usemtl"), identifier), Statement::UseMaterial),
			map(preceded(keyword("o"), identifier), Statement::Object),
			map(preceded(keyword("vt"), uvw), Statement::TexCoord),
			map(preceded(keyword("vn"), vec3sp), Statement::Normal),
			map(preceded(keyword("v"), vec3sp), Statement::Position),
			map(preceded(keyword("f"), many1(sp(face_vertex))), Statement::Face),
		))(input)
	}

	/// Parses an OBJ document
	pub fn obj(input: &str) -> Result<ObjDocument, ObjImportError> {
		let (rest, statements) = many0(etc(statement))(input).map_err(|_| ObjImportError::Unknown)?;
		if etc::<_, _, ObjImportError>(eof)(rest).is_err() {
			let line = rest.trim_start().lines().next().unwrap_or_default();
			return Err(ObjImportError::Unexpected(line.to_string()));
		}

		let mut doc = ObjDocument::default();
		for st in statements {
			match st {
				Statement::MaterialLib(lib) => doc.material_libs.push(lib.to_string()),
				Statement::UseMaterial(mat) => doc.material = Some(mat.to_string()),
				Statement::Object(name) => doc.objects.push(name.to_string()),
				Statement::Position(v) => doc.positions.push(v),
				Statement::TexCoord(vt) => doc.uvs.push(vt),
				Statement::Normal(vn) => doc.normals.push(vn),
				Statement::Face(corners) => doc.faces.push(match corners.as_slice() {
					[a, b, c] => Face::Triangle([*a, *b, *c]),
					_ => Face::Ngon(corners),
				}),
			}
		}

		Ok(doc)
	}

}
