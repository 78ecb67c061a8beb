//! Parser for the triangulated Wavefront OBJ subset.
//!
//! # Supported Syntax
//!
//! - `v x y z` - vertex position
//! - `vt u v` - texture coordinate, stored as `(u, 1 - v)` so that it
//!   addresses the texture raster top-down
//! - `f a b c` - triangle; each corner is `vertex` or `vertex/uv`
//!   (1-based). A bare `vertex` uses the same number for the uv index.
//! - `# ...` - comment
//!
//! Blank lines are skipped. Everything else is rejected. Face indices may
//! only refer to records declared on earlier lines.

use std::io::BufRead;

use isotrace_math::{DVec2, DVec3};
use thiserror::Error;

use crate::mesh::{Mesh, Triangle, UvTriangle};

/// Errors that can occur during OBJ parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: unsupported command `{command}`")]
    UnsupportedCommand { line: usize, command: String },

    #[error("Parse error at line {line}: `{kind}` expects {expected} values, found {found}")]
    Arity {
        line: usize,
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Parse error at line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },

    #[error("Parse error at line {line}: invalid index `{token}`")]
    InvalidIndex { line: usize, token: String },

    #[error("Parse error at line {line}: unsupported face vertex format `{token}`")]
    UnsupportedFaceFormat { line: usize, token: String },

    #[error("Parse error at line {line}: {kind} index {index} out of range ({count} declared so far)")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        count: usize,
    },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse an OBJ mesh from a buffered reader.
pub fn parse_obj(reader: impl BufRead) -> ParseResult<Mesh> {
    let mut parser = ObjParser::default();
    for (i, line) in reader.lines().enumerate() {
        parser.parse_line(i + 1, &line?)?;
    }
    Ok(parser.finish())
}

/// Parse an OBJ mesh held in memory.
pub fn parse_obj_str(content: &str) -> ParseResult<Mesh> {
    parse_obj(content.as_bytes())
}

/// Line-at-a-time OBJ parser state.
#[derive(Default)]
struct ObjParser {
    positions: Vec<DVec3>,
    tex_coords: Vec<DVec2>,
    mesh: Mesh,
}

impl ObjParser {
    fn parse_line(&mut self, line: usize, text: &str) -> ParseResult<()> {
        let mut tokens = text.split_whitespace();
        let Some(command) = tokens.next() else {
            return Ok(());
        };
        let args: Vec<&str> = tokens.collect();

        match command {
            "v" => {
                let [x, y, z] = numbers::<3>(line, "v", &args)?;
                self.positions.push(DVec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = numbers::<2>(line, "vt", &args)?;
                self.tex_coords.push(DVec2::new(u, 1.0 - v));
            }
            "f" => {
                if args.len() != 3 {
                    return Err(ParseError::Arity {
                        line,
                        kind: "f",
                        expected: 3,
                        found: args.len(),
                    });
                }
                let mut vertices = [DVec3::ZERO; 3];
                let mut coords = [DVec2::ZERO; 3];
                for (corner, token) in args.iter().enumerate() {
                    let (vi, ti) = face_vertex(line, token)?;
                    vertices[corner] = resolve(line, "vertex", vi, &self.positions)?;
                    coords[corner] = resolve(line, "texture coordinate", ti, &self.tex_coords)?;
                }
                self.mesh.push_face(Triangle { vertices }, UvTriangle { coords });
            }
            c if c.starts_with('#') => {}
            other => {
                return Err(ParseError::UnsupportedCommand {
                    line,
                    command: other.to_string(),
                })
            }
        }
        Ok(())
    }

    fn finish(self) -> Mesh {
        log::debug!(
            "Parsed OBJ: {} vertices, {} texture coordinates, {} faces",
            self.positions.len(),
            self.tex_coords.len(),
            self.mesh.triangle_count()
        );
        self.mesh
    }
}

/// Parse exactly `N` floating-point arguments.
fn numbers<const N: usize>(
    line: usize,
    kind: &'static str,
    args: &[&str],
) -> ParseResult<[f64; N]> {
    if args.len() != N {
        return Err(ParseError::Arity {
            line,
            kind,
            expected: N,
            found: args.len(),
        });
    }
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = token.parse().map_err(|_| ParseError::InvalidNumber {
            line,
            token: token.to_string(),
        })?;
    }
    Ok(out)
}

/// Split a face corner into its (vertex, uv) index pair, still 1-based.
fn face_vertex(line: usize, token: &str) -> ParseResult<(i64, i64)> {
    let parts: Vec<&str> = token.split('/').collect();
    match parts.as_slice() {
        [v] => {
            let v = index(line, v)?;
            Ok((v, v))
        }
        [v, t] => Ok((index(line, v)?, index(line, t)?)),
        _ => Err(ParseError::UnsupportedFaceFormat {
            line,
            token: token.to_string(),
        }),
    }
}

fn index(line: usize, token: &str) -> ParseResult<i64> {
    token.parse().map_err(|_| ParseError::InvalidIndex {
        line,
        token: token.to_string(),
    })
}

/// Look up a 1-based index among the records declared so far.
fn resolve<T: Copy>(
    line: usize,
    kind: &'static str,
    index: i64,
    declared: &[T],
) -> ParseResult<T> {
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| declared.get(i))
        .copied()
        .ok_or(ParseError::IndexOutOfRange {
            line,
            kind,
            index,
            count: declared.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
# unit square facing +z
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1

f 1/1 2/2 3/3
f 1/1 3/3 4/4
";

    #[test]
    fn test_parse_square() {
        let mesh = parse_obj_str(SQUARE).unwrap();

        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().len(), mesh.uvs().len());

        let tri = mesh.triangles()[1];
        assert_eq!(tri.v0(), DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(tri.v1(), DVec3::new(1.0, 1.0, 0.0));
        assert_eq!(tri.v2(), DVec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_vt_is_flipped() {
        let mesh = parse_obj_str(SQUARE).unwrap();
        let uv = mesh.uvs()[0];

        // vt 0 0 / 1 0 / 1 1 become (0,1) (1,1) (1,0)
        assert_eq!(uv.coords[0], DVec2::new(0.0, 1.0));
        assert_eq!(uv.coords[1], DVec2::new(1.0, 1.0));
        assert_eq!(uv.coords[2], DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_bare_index_reuses_vertex_number_for_uv() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.1 0\nvt 0.2 0\nvt 0.3 0\nf 1 2 3\n";
        let mesh = parse_obj_str(src).unwrap();

        let uv = mesh.uvs()[0];
        assert_eq!(uv.coords[0].x, 0.1);
        assert_eq!(uv.coords[1].x, 0.2);
        assert_eq!(uv.coords[2].x, 0.3);
    }

    #[test]
    fn test_empty_input() {
        let mesh = parse_obj_str("").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_crlf_and_extra_spacing() {
        let src = "v 0 0 0\r\nv  1 0 0\r\nv 0 1 0\r\nvt 0 0\r\nf 1/1 2/1 3/1\r\n";
        let mesh = parse_obj_str(src).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_unsupported_command() {
        let err = parse_obj_str("v 0 0 0\nvn 0 0 1\n").unwrap_err();
        match err {
            ParseError::UnsupportedCommand { line, command } => {
                assert_eq!(line, 2);
                assert_eq!(command, "vn");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_too_many_vertex_coordinates() {
        let err = parse_obj_str("v 0 0 0 1\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Arity { line: 1, kind: "v", expected: 3, found: 4 }
        ));
    }

    #[test]
    fn test_too_few_texture_coordinates() {
        let err = parse_obj_str("vt 0.5\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Arity { kind: "vt", expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_quad_face_rejected() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/1 4/1\n";
        let err = parse_obj_str(src).unwrap_err();
        assert!(matches!(err, ParseError::Arity { line: 6, kind: "f", .. }));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_obj_str("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { ref token, .. } if token == "zero"));
    }

    #[test]
    fn test_non_numeric_face_index() {
        let base = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\n";

        let err = parse_obj_str(&format!("{base}f a/1 2/1 3/1\n")).unwrap_err();
        match err {
            ParseError::InvalidIndex { line, token } => {
                assert_eq!(line, 5);
                assert_eq!(token, "a");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_obj_str(&format!("{base}f 1/1 2/x 3/1\n")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidIndex { line: 5, ref token } if token == "x"));
    }

    #[test]
    fn test_empty_face_index_component() {
        let base = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\n";

        let err = parse_obj_str(&format!("{base}f 1/ 2/1 3/1\n")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidIndex { line: 5, ref token } if token.is_empty()));

        let err = parse_obj_str(&format!("{base}f 1/1 /1 3/1\n")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidIndex { line: 5, ref token } if token.is_empty()));
    }

    #[test]
    fn test_three_component_face_vertex_rejected() {
        let src = "v 0 0 0\nvt 0 0\nf 1/1/1 1/1/1 1/1/1\n";
        let err = parse_obj_str(src).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFaceFormat { line: 3, .. }));
    }

    #[test]
    fn test_forward_reference_rejected() {
        let src = "v 0 0 0\nv 1 0 0\nvt 0 0\nf 1/1 2/1 3/1\nv 0 1 0\n";
        let err = parse_obj_str(src).unwrap_err();
        match err {
            ParseError::IndexOutOfRange { line, kind, index, count } => {
                assert_eq!(line, 4);
                assert_eq!(kind, "vertex");
                assert_eq!(index, 3);
                assert_eq!(count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_and_negative_indices_rejected() {
        let base = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\n";

        let err = parse_obj_str(&format!("{base}f 0/1 1/1 2/1\n")).unwrap_err();
        assert!(matches!(err, ParseError::IndexOutOfRange { index: 0, .. }));

        let err = parse_obj_str(&format!("{base}f 1/1 2/1 -1/1\n")).unwrap_err();
        assert!(matches!(err, ParseError::IndexOutOfRange { index: -1, .. }));
    }

    #[test]
    fn test_missing_uv_rejected() {
        let err = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IndexOutOfRange { kind: "texture coordinate", count: 0, .. }
        ));
    }
}
