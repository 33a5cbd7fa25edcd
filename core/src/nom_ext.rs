use nom::{
	character::complete::{
		char,
		not_line_ending,
		space0
	},
	combinator::value,
	error::ParseError,
	IResult,
	multi::count,
	number::complete::float,
	Parser,
	sequence::{
		delimited,
		pair
	}
};

use ultraviolet::vec::Vec3;

/// Parses a hash-prefixed ('#') line comment
pub fn hash_comment<'a, E>(input: &'a str) -> IResult<&'a str, (), E>
where
	E: ParseError<&'a str>
{
	value((), pair(char('#'), not_line_ending))(input)
}

/// Parses a [`Vec3`] of space-delimited floats, never crossing a line ending
pub fn vec3sp<'a, E>(input: &'a str) -> IResult<&'a str, Vec3, E>
where
	E: ParseError<&'a str>
{
	let (input, f3vec) = count(sp(float), 3)(input)?;

	Ok((input, Vec3::new(f3vec[0], f3vec[1], f3vec[2])))
}

/// Wraps `inner`, also consuming spaces and tabs around it
pub fn sp<'a, F, O, E>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
	E: ParseError<&'a str>,
	F: Parser<&'a str, O, E>,
{
	delimited(space0, inner, space0)
}
