pub mod mtl;
pub mod obj;

#[cfg(feature = "import")]
pub(crate) mod parser {
	use nom::{
		branch::alt,
		bytes::complete::{
			tag,
			take_while1
		},
		character::complete::{
			multispace1,
			space1
		},
		combinator::{
			opt,
			value
		},
		error::ParseError,
		IResult,
		multi::many0,
		number::complete::float,
		Parser,
		sequence::{
			preceded,
			terminated,
			tuple
		}
	};

	use ultraviolet::vec::Vec3;

	use meshio_core::nom_ext::{
		hash_comment,
		sp
	};

	/// Parses discardable content (comment, whitespace, line feeds)
	pub(crate) fn etc<'a, F, O, E>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
	where
		E: ParseError<&'a str>,
		F: Parser<&'a str, O, E>,
	{
		preceded(
			many0(alt((
				hash_comment,
				value((), multispace1)
			))),
			inner
		)
	}

	/// Parses a statement keyword, which must be followed by at least one space
	pub(crate) fn keyword<'a, E>(k: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str, E>
	where
		E: ParseError<&'a str>
	{
		terminated(tag(k), space1)
	}

	/// Parses an identifier (object/group/material name, filename)
	pub(crate) fn identifier<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
	where
		E: ParseError<&'a str>
	{
		take_while1(|c: char| !c.is_whitespace())(input)
	}

	/// Parses a 3D vector, with the last element optional, defaulting to `0`, used for UVWs
	pub(crate) fn uvw<'a, E>(input: &'a str) -> IResult<&'a str, Vec3, E>
	where
		E: ParseError<&'a str>
	{
		let (input, f3vec) = tuple((sp(float), sp(float), opt(sp(float))))(input)?;

		Ok((input, Vec3::new(f3vec.0, f3vec.1, f3vec.2.unwrap_or(0.0))))
	}

}
