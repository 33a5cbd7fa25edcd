use meshio_core::scene::MatPropValueID;

/// Statement keywords of the material properties handled here, in the order they're written
pub const PROPERTY_KEYWORDS: [(MatPropValueID, &str); 8] = [
	(MatPropValueID::Ambient, "Ka"),
	(MatPropValueID::Diffuse, "Kd"),
	(MatPropValueID::Specular, "Ks"),
	(MatPropValueID::Transparency, "Tr"),
	(MatPropValueID::Dissolve, "d"),
	(MatPropValueID::Illumination, "illum"),
	(MatPropValueID::SpecularExponent, "Ns"),
	(MatPropValueID::DiffuseMap, "map_Kd"),
];

#[cfg(feature = "export")]
pub mod export {
	use std::io::{
		Result,
		Write
	};

	use meshio_core::scene::{
		Material,
		MatPropValue
	};

	use super::PROPERTY_KEYWORDS;

	/// Writes `materials` as MTL, separated by blank lines
	pub fn write_mtl<W>(w: &mut W, materials: &[Material]) -> Result<()>
	where
		W: Write,
	{
		for (i, mat) in materials.iter().enumerate() {
			if i > 0 {
				writeln!(w)?;
			}

			writeln!(w, "newmtl {}", mat.name)?;

			for (id, key) in PROPERTY_KEYWORDS.iter() {
				match mat.get(*id) {
					Some(MatPropValue::Float(f)) => writeln!(w, "{} {}", key, f)?,
					Some(MatPropValue::Integer(i)) => writeln!(w, "{} {}", key, i)?,
					Some(MatPropValue::Text(s)) => writeln!(w, "{} {}", key, s)?,
					Some(MatPropValue::Vector3(v)) => writeln!(w, "{} {} {} {}", key, v.x, v.y, v.z)?,
					None => (),
				}
			}
		}

		Ok(())
	}

}

#[cfg(feature = "import")]
pub mod import {
	use nom::{
		branch::alt,
		character::complete::u32,
		combinator::{
			eof,
			map
		},
		error::{
			ErrorKind,
			ParseError
		},
		IResult,
		multi::many0,
		number::complete::float,
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
			Material,
			MatPropValue,
			MatPropValueID
		}
	};

	use crate::parser::{
		etc,
		identifier,
		keyword
	};

	#[derive(Clone, Debug, Error, PartialEq)]
	pub enum MtlImportError {
		#[error("Property given before any newmtl")]
		NoMaterial,
		#[error("Unexpected statement: {0}")]
		Unexpected(String),
		#[error("Unknown import error")]
		Unknown,
	}

	impl<I> ParseError<I> for MtlImportError {
		fn from_error_kind(_: I, _: ErrorKind) -> Self {
			MtlImportError::Unknown
		}

		fn append(_: I, _: ErrorKind, other: Self) -> Self {
			other
		}
	}

	enum Statement<'a> {
		NewMtl(&'a str),
		Property(MatPropValueID, MatPropValue),
	}

	fn d(input: &str) -> IResult<&str, f32, MtlImportError> {
		preceded(keyword("d"), sp(float))(input)
	}

	fn illum(input: &str) -> IResult<&str, u32, MtlImportError> {
		preceded(keyword("illum"), sp(u32))(input)
	}

	fn ka(input: &str) -> IResult<&str, Vec3, MtlImportError> {
		preceded(keyword("Ka"), vec3sp)(input)
	}

	fn kd(input: &str) -> IResult<&str, Vec3, MtlImportError> {
		preceded(keyword("Kd"), vec3sp)(input)
	}

	fn ks(input: &str) -> IResult<&str, Vec3, MtlImportError> {
		preceded(keyword("Ks"), vec3sp)(input)
	}

	/// Parses a filename used for the material's diffuse map
	fn map_kd<'a>(input: &'a str) -> IResult<&'a str, &'a str, MtlImportError> {
		preceded(keyword("map_Kd"), identifier)(input)
	}

	/// Parses a material's name
	fn newmtl<'a>(input: &'a str) -> IResult<&'a str, &'a str, MtlImportError> {
		preceded(keyword("newmtl"), identifier)(input)
	}

	fn ns(input: &str) -> IResult<&str, f32, MtlImportError> {
		preceded(keyword("Ns"), sp(float))(input)
	}

	fn tr(input: &str) -> IResult<&str, f32, MtlImportError> {
		preceded(keyword("Tr"), sp(float))(input)
	}

	fn statement(input: &str) -> IResult<&str, Statement, MtlImportError> {
		use MatPropValueID::*;

		alt((
			map(newmtl, Statement::NewMtl),
			map(ka, |v| Statement::Property(Ambient, MatPropValue::Vector3(v))),
			map(kd, |v| Statement::Property(Diffuse, MatPropValue::Vector3(v))),
			map(ks, |v| Statement::Property(Specular, MatPropValue::Vector3(v))),
			map(tr, |f| Statement::Property(Transparency, MatPropValue::Float(f))),
			map(d, |f| Statement::Property(Dissolve, MatPropValue::Float(f))),
			map(illum, |i| Statement::Property(Illumination, MatPropValue::Integer(i))),
			map(ns, |f| Statement::Property(SpecularExponent, MatPropValue::Float(f))),
			map(map_kd, |s| Statement::Property(DiffuseMap, MatPropValue::Text(s.to_string()))),
		))(input)
	}

	/// Parses an MTL document into its materials
	pub fn materials(input: &str) -> Result<Vec<Material>, MtlImportError> {
		let (rest, statements) = many0(etc(statement))(input).map_err(|_| MtlImportError::Unknown)?;
		if etc::<_, _, MtlImportError>(eof)(rest).is_err() {
			let line = rest.trim_start().lines().next().unwrap_or_default();
			return Err(MtlImportError::Unexpected(line.to_string()));
		}

		let mut mats: Vec<Material> = vec![];
		for st in statements {
			match st {
				Statement::NewMtl(name) => mats.push(Material::new(name)),
				Statement::Property(id, value) => {
					let mat = mats.last_mut().ok_or(MtlImportError::NoMaterial)?;
					mat.properties.insert(id, value);
				},
			}
		}

		Ok(mats)
	}

}
