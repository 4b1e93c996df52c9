use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use glam::Vec3;

use crate::error::{Result, ViewerError};
use crate::mesh::{StlMesh, Triangle};

pub fn load_stl(path: &Path) -> Result<StlMesh> {
    let file = File::open(path).map_err(|source| ViewerError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mesh = read_stl_mesh(&mut reader).map_err(|source| ViewerError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("loaded {} ({} triangles)", path.display(), mesh.len());
    Ok(mesh)
}

/// Parses binary or ASCII STL. `stl_io` deduplicates vertices into an indexed
/// mesh; this expands it back into one triangle per facet.
pub fn read_stl_mesh<R: Read + Seek>(reader: &mut R) -> std::io::Result<StlMesh> {
    let indexed = stl_io::read_stl(reader)?;

    let to_vec3 = |v: &stl_io::Vector<f32>| Vec3::new(v[0], v[1], v[2]);

    let triangles = indexed
        .faces
        .iter()
        .map(|face| Triangle {
            normal: to_vec3(&face.normal),
            vertices: [
                to_vec3(&indexed.vertices[face.vertices[0]]),
                to_vec3(&indexed.vertices[face.vertices[1]]),
                to_vec3(&indexed.vertices[face.vertices[2]]),
            ],
        })
        .collect();

    Ok(StlMesh::new(triangles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use stl_io::{Normal, Vertex};

    fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Cursor<Vec<u8>> {
        let facets: Vec<stl_io::Triangle> = triangles
            .iter()
            .map(|[a, b, c]| stl_io::Triangle {
                normal: Normal::new([0.0, 0.0, 1.0]),
                vertices: [Vertex::new(*a), Vertex::new(*b), Vertex::new(*c)],
            })
            .collect();

        let mut cursor = Cursor::new(Vec::new());
        stl_io::write_stl(&mut cursor, facets.iter()).unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn reads_binary_stl_in_facet_order() {
        let mut data = binary_stl(&[
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[-1.0, -2.0, -3.0], [4.0, 5.0, 6.0], [0.0, 1.0, 0.0]],
        ]);

        let mesh = read_stl_mesh(&mut data).unwrap();

        assert_eq!(mesh.len(), 2);
        assert_eq!(
            mesh.triangles[0].vertices,
            [Vec3::ZERO, Vec3::X, Vec3::Y]
        );
        assert_eq!(
            mesh.triangles[1].vertices,
            [
                Vec3::new(-1.0, -2.0, -3.0),
                Vec3::new(4.0, 5.0, 6.0),
                Vec3::Y
            ]
        );
        assert_eq!(mesh.triangles[1].normal, Vec3::Z);
    }

    #[test]
    fn reads_ascii_stl() {
        let text = "solid tri\n\
            facet normal 0 0 1\n\
            outer loop\n\
            vertex 0 0 0\n\
            vertex 1 0 0\n\
            vertex 0 1 0\n\
            endloop\n\
            endfacet\n\
            endsolid tri\n";
        let mut data = Cursor::new(text.as_bytes().to_vec());

        let mesh = read_stl_mesh(&mut data).unwrap();

        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.triangles[0].vertices, [Vec3::ZERO, Vec3::X, Vec3::Y]);
    }

    #[test]
    fn rejects_garbage() {
        let mut data = Cursor::new(b"definitely not a mesh".to_vec());
        assert!(read_stl_mesh(&mut data).is_err());
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let path = Path::new("this/path/does/not/exist.stl");
        match load_stl(path) {
            Err(ViewerError::Open { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected open error, got {other:?}"),
        }
    }
}
