use std::fs;
use std::path::Path;

use nalgebra::Point3;
use tracing::info;

use crate::astro::ReferenceFrame;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{BodyInfo, OrbitalParams, Orrery, OrreryBuilder};

/// Loads a body table. See `solar-system.txt` for the layout.
pub fn read_file(filename: impl AsRef<Path>, frame: ReferenceFrame) -> ConfigResult<Orrery> {
    let path = filename.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;

    let orrery = parse_bodies(&text, frame)?;
    info!(
        "Loaded {} bodies from {}",
        orrery.bodies().count(),
        path.display()
    );
    Ok(orrery)
}

/// Parses the contents of a body table. The first line is a header and is
/// skipped, as are blank lines and lines starting with `#`. A `-` in a
/// numeric column means "not applicable", which is zero for inclination and
/// eccentricity.
pub fn parse_bodies(text: &str, frame: ReferenceFrame) -> ConfigResult<Orrery> {
    let mut builder = OrreryBuilder::new(frame);

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_ascii_whitespace();

        macro_rules! next_string {
            ($column:expr) => {
                fields.next().ok_or(ConfigError::MissingColumn {
                    line: line_no,
                    column: $column,
                })?
            };
        }

        macro_rules! next_optional_f64 {
            ($column:expr) => {
                match next_string!($column) {
                    "-" => None,
                    s => Some(parse_f64(line_no, $column, s)?),
                }
            };
        }

        macro_rules! required {
            ($value:expr, $column:expr) => {
                $value.ok_or(ConfigError::MissingColumn {
                    line: line_no,
                    column: $column,
                })?
            };
        }

        let name = next_string!("name");
        let asset = next_string!("asset");
        let radius = parse_f64(line_no, "radius", next_string!("radius"))?;
        if !(radius > 0.0) {
            return Err(ConfigError::InvalidNumber {
                line: line_no,
                column: "radius",
                value: radius.to_string(),
            });
        }
        let body_info = BodyInfo {
            name: name.to_owned(),
            asset: asset.to_owned(),
            radius: radius as f32,
            color: parse_color(line_no, next_string!("color"))?,
        };

        let parent = next_string!("parent");
        let semimajor_axis = next_optional_f64!("semimajor");
        let orbital_period = next_optional_f64!("period");
        let rotation_period = required!(next_optional_f64!("rotation"), "rotation");
        let inclination = next_optional_f64!("inclination");
        let eccentricity = next_optional_f64!("eccentricity");
        let is_reference = match fields.next().unwrap_or("-") {
            "-" => false,
            "ref" => true,
            other => {
                return Err(ConfigError::UnknownFlag {
                    line: line_no,
                    value: other.to_owned(),
                })
            }
        };

        let id = if parent == "-" {
            for (column, value) in [
                ("semimajor", semimajor_axis),
                ("period", orbital_period),
                ("inclination", inclination),
                ("eccentricity", eccentricity),
            ] {
                if let Some(value) = value {
                    return Err(ConfigError::FixedBodyOrbit {
                        line: line_no,
                        name: body_info.name,
                        column,
                        value,
                    });
                }
            }
            builder.add_fixed_body(body_info, rotation_period)?
        } else {
            let parent_id = builder
                .find_body(parent)
                .ok_or_else(|| ConfigError::UnknownParent {
                    line: line_no,
                    name: parent.to_owned(),
                })?;

            let params = OrbitalParams {
                semimajor_axis: required!(semimajor_axis, "semimajor"),
                orbital_period: required!(orbital_period, "period"),
                rotation_period,
                inclination_degrees: inclination.unwrap_or(0.0),
                eccentricity: eccentricity.unwrap_or(0.0),
            };
            builder.add_body(body_info, params, parent_id)?
        };

        if is_reference {
            builder.set_reference_body(id)?;
        }
    }

    builder.build()
}

fn parse_f64(line: usize, column: &'static str, s: &str) -> ConfigResult<f64> {
    s.parse::<f64>().map_err(|_| ConfigError::InvalidNumber {
        line,
        column,
        value: s.to_owned(),
    })
}

fn parse_color(line: usize, s: &str) -> ConfigResult<Point3<f32>> {
    let invalid = || ConfigError::InvalidColor {
        line,
        value: s.to_owned(),
    };
    if s.len() != 6 || !s.is_ascii() {
        return Err(invalid());
    }

    let channel =
        |range: std::ops::Range<usize>| u8::from_str_radix(&s[range], 16).map_err(|_| invalid());
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;

    Ok(Point3::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
    ))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::model::BodyState;

    const HEADER: &str = "name asset radius color parent semimajor period rotation inclination eccentricity flags\n";

    fn frame() -> ReferenceFrame {
        ReferenceFrame::new(60.0, 365.25)
    }

    fn parse(rows: &str) -> ConfigResult<Orrery> {
        parse_bodies(&format!("{}{}", HEADER, rows), frame())
    }

    #[test]
    fn test_parse() {
        let orrery = parse(
            "
# the middle
Sun   sun.gltf   30  ffcc33  -      -    -      25.38  -     -
Venus venus.gltf 7   e6c27a  Sun    200  0.615  -243   3.39  0.0068
Earth earth.gltf 8   3366ff  Sun    300  1      0.997  0     0.0167  ref
Moon  moon.gltf  2.5 cccccc  Earth  40   0.0748 27.32  -     -
",
        )
        .unwrap();

        assert_eq!(orrery.bodies().count(), 4);
        assert_eq!(orrery.reference_body().info.name, "Earth");

        let sun = orrery.find_body("sun").unwrap();
        assert!(matches!(sun.state, BodyState::FixedAtOrigin { .. }));
        assert_relative_eq!(sun.info.color.x, 1.0);
        assert_relative_eq!(sun.info.color.y, 0.8);
        assert_relative_eq!(sun.info.color.z, 0.2);

        let venus = orrery.find_body("Venus").unwrap();
        assert_eq!(venus.info.asset, "venus.gltf");
        let orbit = venus.orbit().unwrap();
        assert_relative_eq!(orbit.semimajor_axis(), 200.0);
        assert_relative_eq!(orbit.eccentricity(), 0.0068);
        assert_relative_eq!(orbit.inclination_degrees(), 3.39);
        assert!(orbit.speeds().rotation < 0.0);

        let moon = orrery.find_body("Moon").unwrap();
        match moon.state {
            BodyState::Satellite {
                primary_id, radius, ..
            } => {
                assert_eq!(primary_id, orrery.find_body("Earth").unwrap().id);
                assert_relative_eq!(radius, 40.0);
            }
            _ => panic!("Moon should be a satellite, was {:?}", moon.state),
        }
    }

    #[test]
    fn test_parse_errors() {
        let sun = "Sun sun.gltf 30 ffcc33 - - - 25.38 - -\n";

        let err = parse(&format!("{}Earth earth.gltf 8 3366ff Sun 300\n", sun)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingColumn { line: 3, column: "period" }));

        let err = parse(&format!("{}Earth earth.gltf 8 3366ff Sun 300 one 1 0 0 ref\n", sun))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { column: "period", .. }));

        let err = parse(&format!("{}Earth earth.gltf 8 blue Sun 300 1 1 0 0 ref\n", sun))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { .. }));

        let err = parse(&format!("{}Earth earth.gltf 8 3366ff Sol 300 1 1 0 0 ref\n", sun))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParent { .. }));

        let err = parse(&format!("{}Earth earth.gltf 8 3366ff Sun 300 1 1 0 0 main\n", sun))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFlag { .. }));

        let err = parse(&format!("{}Earth earth.gltf 8 3366ff Sun 300 1 1 0 1.0 ref\n", sun))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEccentricity { .. }));

        let err = parse(&format!("{}Earth earth.gltf 8 3366ff Sun 300 1 0 0 0 ref\n", sun))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRotationPeriod { .. }));

        let err = parse(&format!("{}Earth earth.gltf 8 3366ff Sun 300 1 1 0 0\n", sun))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoReferenceBody));

        let err = parse(&format!("{}Earth earth.gltf 0 3366ff Sun 300 1 1 0 0 ref\n", sun))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { column: "radius", .. }));

        let err = parse("Sun sun.gltf 30 ffcc33 - 100 - 25.38 - -\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FixedBodyOrbit { line: 2, column: "semimajor", .. }
        ));
        let err = parse("Sun sun.gltf 30 ffcc33 - - - 25.38 - 0.1\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FixedBodyOrbit { column: "eccentricity", .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_file("does/not/exist.txt", frame()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
