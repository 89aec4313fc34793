/// STL file parser for binary and ASCII formats
use std::path::Path;

use nalgebra::Vector3;
use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::StlError;
use crate::geometry::Mesh;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh, StlError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(StlError::TooSmall(data.len()));
    }

    let body = &data[HEADER_LEN..];
    let (mut input, triangle_count) =
        le_u32::<_, nom::error::Error<&[u8]>>(body).map_err(|_| StlError::TooSmall(data.len()))?;
    let triangle_count = triangle_count as usize;

    // Guard the allocation against a lying header.
    if input.len() < triangle_count.saturating_mul(FACET_LEN) {
        return Err(StlError::Truncated {
            facet: input.len() / FACET_LEN,
        });
    }

    let mut mesh = Mesh::with_capacity(triangle_count);
    for facet in 0..triangle_count {
        let (rest, [v0, v1, v2]) =
            parse_binary_facet(input).map_err(|_| StlError::Truncated { facet })?;
        mesh.add_triangle(v0, v1, v2);
        input = rest;
    }

    Ok(mesh)
}

fn parse_binary_facet(input: &[u8]) -> IResult<&[u8], [Vector3<f32>; 3]> {
    // Stored normals are recomputed from winding when needed.
    let (input, _normal) = take(12usize)(input)?;
    let (input, v0) = parse_binary_vector(input)?;
    let (input, v1) = parse_binary_vector(input)?;
    let (input, v2) = parse_binary_vector(input)?;
    let (input, _attribute_bytes) = le_u16(input)?;
    Ok((input, [v0, v1, v2]))
}

fn parse_binary_vector(input: &[u8]) -> IResult<&[u8], Vector3<f32>> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh, StlError> {
    match parse_ascii_stl_impl(input) {
        Ok((_, mesh)) => Ok(mesh),
        Err(e) => Err(StlError::Ascii(format!("{:?}", e))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Mesh> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    let mut mesh = Mesh::with_capacity(facets.len());
    for [v0, v1, v2] in facets {
        mesh.add_triangle(v0, v1, v2);
    }

    Ok((input, mesh))
}

fn parse_facet(input: &str) -> IResult<&str, [Vector3<f32>; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v0) = parse_vertex(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, [v0, v1, v2]))
}

fn parse_vertex(input: &str) -> IResult<&str, Vector3<f32>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vector3(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3<f32>> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh, StlError> {
    // Binary files may also start with "solid", so fall back on failure.
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            match parse_ascii_stl(text) {
                Ok(mesh) => return Ok(mesh),
                Err(e) => log::debug!("ASCII STL parse failed, trying binary: {}", e),
            }
        }
    }

    parse_binary_stl(data)
}

/// Read and parse an STL file from disk
pub fn load_stl(path: impl AsRef<Path>) -> Result<Mesh, StlError> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let mesh = parse_stl(&data)?;
    log::info!(
        "Loaded {} triangles from {}",
        mesh.triangle_count(),
        path.display()
    );
    Ok(mesh)
}
