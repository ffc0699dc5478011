/// Wireframe import from a small OBJ subset.
///
/// Supported statements, one per line:
///   v <x> <y> <z>        vertex
///   l <i> <j> [<k> ...]  polyline through 1-based vertex indices
///   # ...                comment, also allowed after a statement
/// Blank lines are ignored. Anything else is rejected with its line number.
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, not_line_ending, space0, space1},
    combinator::{all_consuming, map, map_res, opt, value},
    multi::many1,
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::{EditorError, Result};
use crate::mesh::Mesh;

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Vertex([f32; 3]),
    Polyline(Vec<usize>),
    Blank,
}

/// Parse a wireframe description into a mesh
pub fn parse_wireframe(input: &str) -> Result<Mesh> {
    let mut vertices = Vec::new();
    let mut edges = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let line_number = number + 1;
        let statement = match parse_line(line) {
            Ok((_, statement)) => statement,
            Err(_) => {
                return Err(EditorError::Parse {
                    line: line_number,
                    message: format!("unrecognized statement {:?}", line.trim()),
                })
            }
        };

        match statement {
            Statement::Vertex(position) => vertices.push(position),
            Statement::Polyline(indices) => {
                if indices.len() < 2 {
                    return Err(EditorError::Parse {
                        line: line_number,
                        message: "a line needs at least two vertex indices".to_string(),
                    });
                }
                if indices.contains(&0) {
                    return Err(EditorError::Parse {
                        line: line_number,
                        message: "vertex indices start at 1".to_string(),
                    });
                }
                edges.extend(indices.windows(2).map(|pair| (pair[0] - 1, pair[1] - 1)));
            }
            Statement::Blank => {}
        }
    }

    Mesh::from_lists(&vertices, &edges)
}

fn parse_line(input: &str) -> IResult<&str, Statement> {
    all_consuming(terminated(
        preceded(space0, alt((parse_vertex, parse_polyline, parse_comment, parse_blank))),
        tuple((space0, opt(parse_comment))),
    ))(input)
}

fn parse_vertex(input: &str) -> IResult<&str, Statement> {
    map(
        preceded(
            tag("v"),
            tuple((preceded(space1, float), preceded(space1, float), preceded(space1, float))),
        ),
        |(x, y, z)| Statement::Vertex([x, y, z]),
    )(input)
}

fn parse_polyline(input: &str) -> IResult<&str, Statement> {
    map(
        preceded(tag("l"), many1(preceded(space1, parse_index))),
        Statement::Polyline,
    )(input)
}

fn parse_index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
}

fn parse_comment(input: &str) -> IResult<&str, Statement> {
    value(Statement::Blank, preceded(char('#'), not_line_ending))(input)
}

fn parse_blank(input: &str) -> IResult<&str, Statement> {
    value(Statement::Blank, space0)(input)
}
