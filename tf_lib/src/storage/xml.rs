//! XML form of a stored curve
//!
//! ```xml
//! <transferfunction version="1.0">
//!     <leftend> <tfPoint> .. </tfPoint> </leftend>
//!     <normal> <tfPoint> .. </tfPoint> .. </normal>
//!     <rightend> <tfPoint> .. </tfPoint> </rightend>
//! </transferfunction>
//! ```
//!
//! Each `tfPoint` carries `controlPointsLinked` attribute and elements
//! `point`, `leftControlPoint`, `rightControlPoint` (`x`, `y` attributes),
//! `color` (`r`, `g`, `b`) and one element with `value` attribute per material multiplier.

use nalgebra::{point, Point2};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use super::{CurveData, PointRecord};
use crate::{
    error::{TfError, TfResult},
    transfer::{Location, PointValue},
};

const FORMAT_VERSION: &str = "1.0";

/// Serialize curve to XML document
pub fn write_curve_xml(data: &CurveData) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    output.push_str(&format!(
        "<transferfunction version=\"{}\">\n",
        FORMAT_VERSION
    ));

    for (tag, location) in [
        ("leftend", Location::LeftEnd),
        ("normal", Location::Normal),
        ("rightend", Location::RightEnd),
    ] {
        output.push_str(&format!("    <{}>\n", tag));
        for record in data.points.iter().filter(|p| p.location == location) {
            write_point(&mut output, record);
        }
        output.push_str(&format!("    </{}>\n", tag));
    }

    output.push_str("</transferfunction>\n");
    output
}

fn write_point(output: &mut String, record: &PointRecord) {
    let indent = "            ";
    output.push_str(&format!(
        "        <tfPoint controlPointsLinked=\"{}\">\n",
        if record.linked { "TRUE" } else { "FALSE" }
    ));

    let mut coord = |tag: &str, p: &Point2<f32>| {
        output.push_str(&format!(
            "{}<{} x=\"{}\" y=\"{}\"/>\n",
            indent, tag, p.x, p.y
        ));
    };
    coord("point", &record.position);
    if let Some(left) = &record.left_control {
        coord("leftControlPoint", left);
    }
    if let Some(right) = &record.right_control {
        coord("rightControlPoint", right);
    }

    let v = &record.value;
    output.push_str(&format!(
        "{}<color r=\"{}\" g=\"{}\" b=\"{}\"/>\n",
        indent, v.color.x, v.color.y, v.color.z
    ));
    for (tag, value) in [
        ("ambientMultiplier", v.ambient_multiplier),
        ("specularMultiplier", v.specular_multiplier),
        ("specularSaturation", v.specular_saturation),
        ("specularPower", v.specular_power),
        ("gradientAlphaMultiplier", v.gradient_alpha_multiplier),
        ("fresnelAlphaMultiplier", v.fresnel_alpha_multiplier),
        ("reflectionColorMultiplier", v.reflection_color_multiplier),
        ("emissionColorMultiplier", v.emission_color_multiplier),
    ] {
        output.push_str(&format!("{}<{} value=\"{}\"/>\n", indent, tag, value));
    }

    output.push_str("        </tfPoint>\n");
}

/// Point being read
struct PartialPoint {
    location: Location,
    position: Option<Point2<f32>>,
    left_control: Option<Point2<f32>>,
    right_control: Option<Point2<f32>>,
    linked: bool,
    value: PointValue,
}

impl PartialPoint {
    fn finish(self) -> TfResult<PointRecord> {
        let position = self
            .position
            .ok_or_else(|| TfError::Format("tfPoint without point element".into()))?;

        Ok(PointRecord {
            location: self.location,
            position,
            left_control: self.left_control,
            right_control: self.right_control,
            linked: self.linked,
            value: self.value,
        })
    }
}

/// Parse XML document into curve data named `name`
///
/// Elements are matched by name, missing value elements keep their defaults.
pub fn parse_curve_xml(name: &str, xml: &str) -> TfResult<CurveData> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut seen_root = false;
    let mut group: Option<Location> = None;
    let mut current: Option<PartialPoint> = None;
    let mut points = Vec::new();

    loop {
        buffer.clear();
        let (e, empty) = match reader.read_event_into(&mut buffer)? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(e) => {
                match e.name().as_ref() {
                    b"tfPoint" => {
                        if let Some(p) = current.take() {
                            points.push(p.finish()?);
                        }
                    }
                    b"leftend" | b"normal" | b"rightend" => group = None,
                    _ => {}
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        match e.name().as_ref() {
            b"transferfunction" => seen_root = true,
            _ if !seen_root => {
                return Err(TfError::Format(format!(
                    "'{}' is not a transfer function document",
                    name
                )));
            }
            b"leftend" if !empty => group = Some(Location::LeftEnd),
            b"normal" if !empty => group = Some(Location::Normal),
            b"rightend" if !empty => group = Some(Location::RightEnd),
            b"tfPoint" => {
                let location = group.ok_or_else(|| {
                    TfError::Format("tfPoint outside of point group".into())
                })?;
                let linked = attr(&e, "controlPointsLinked")?
                    .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                    .unwrap_or(false);
                let partial = PartialPoint {
                    location,
                    position: None,
                    left_control: None,
                    right_control: None,
                    linked,
                    value: PointValue::default(),
                };
                if empty {
                    points.push(partial.finish()?);
                } else {
                    current = Some(partial);
                }
            }
            tag => {
                if let Some(p) = current.as_mut() {
                    read_point_element(p, tag, &e)?;
                }
            }
        }
    }

    if !seen_root {
        return Err(TfError::Format(format!("'{}' is empty", name)));
    }

    for (location, tag) in [(Location::LeftEnd, "leftend"), (Location::RightEnd, "rightend")] {
        let count = points.iter().filter(|p| p.location == location).count();
        if count != 1 {
            return Err(TfError::Format(format!(
                "'{}' has {} points in <{}>, expected one",
                name, count, tag
            )));
        }
    }

    Ok(CurveData {
        name: name.to_string(),
        points,
    })
}

fn read_point_element(p: &mut PartialPoint, tag: &[u8], e: &BytesStart) -> TfResult<()> {
    let v = &mut p.value;
    match tag {
        b"point" => p.position = Some(coord_attrs(e)?),
        b"leftControlPoint" => p.left_control = Some(coord_attrs(e)?),
        b"rightControlPoint" => p.right_control = Some(coord_attrs(e)?),
        b"color" => {
            v.color.x = float_attr(e, "r")?;
            v.color.y = float_attr(e, "g")?;
            v.color.z = float_attr(e, "b")?;
        }
        b"ambientMultiplier" => v.ambient_multiplier = float_attr(e, "value")?,
        b"specularMultiplier" => v.specular_multiplier = float_attr(e, "value")?,
        b"specularSaturation" => v.specular_saturation = float_attr(e, "value")?,
        b"specularPower" => v.specular_power = float_attr(e, "value")?,
        b"gradientAlphaMultiplier" => v.gradient_alpha_multiplier = float_attr(e, "value")?,
        b"fresnelAlphaMultiplier" => v.fresnel_alpha_multiplier = float_attr(e, "value")?,
        b"reflectionColorMultiplier" => v.reflection_color_multiplier = float_attr(e, "value")?,
        b"emissionColorMultiplier" => v.emission_color_multiplier = float_attr(e, "value")?,
        _ => {}
    }
    Ok(())
}

fn attr(e: &BytesStart, key: &str) -> TfResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = std::str::from_utf8(&attr.value)
                .map_err(|_| TfError::Format(format!("attribute '{}' is not utf-8", key)))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

fn float_attr(e: &BytesStart, key: &str) -> TfResult<f32> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let value = attr(e, key)?
        .ok_or_else(|| TfError::Format(format!("<{}> is missing attribute '{}'", tag, key)))?;

    value.trim().parse::<f32>().map_err(|_| {
        TfError::Format(format!(
            "<{}> attribute '{}' is not a number: '{}'",
            tag, key, value
        ))
    })
}

fn coord_attrs(e: &BytesStart) -> TfResult<Point2<f32>> {
    Ok(point![float_attr(e, "x")?, float_attr(e, "y")?])
}

#[cfg(test)]
mod test {

    use super::*;
    use nalgebra::vector;

    fn record(location: Location, x: f32, y: f32) -> PointRecord {
        PointRecord {
            location,
            position: point![x, y],
            left_control: (location != Location::LeftEnd).then(|| point![x - 0.025, y]),
            right_control: (location != Location::RightEnd).then(|| point![x + 0.025, y]),
            linked: false,
            value: PointValue::default(),
        }
    }

    fn sample_data() -> CurveData {
        let mut middle = record(Location::Normal, 0.3333333, 0.7);
        middle.linked = true;
        middle.value.color = vector![0.1, 0.2, 0.3];
        middle.value.specular_power = 42.5;
        middle.value.emission_color_multiplier = 0.125;

        CurveData {
            name: "bone".into(),
            points: vec![
                record(Location::LeftEnd, 0.0, 0.0),
                middle,
                record(Location::RightEnd, 1.0, 0.9),
            ],
        }
    }

    #[test]
    fn document_layout() {
        let xml = write_curve_xml(&sample_data());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<transferfunction version=\"1.0\">"));
        assert!(xml.contains("<tfPoint controlPointsLinked=\"TRUE\">"));
        assert!(xml.contains("<specularPower value=\"42.5\"/>"));

        let left = xml.find("<leftend>").unwrap();
        let normal = xml.find("<normal>").unwrap();
        let right = xml.find("<rightend>").unwrap();
        assert!(left < normal && normal < right);
        // Left end has no left handle
        assert_eq!(xml.matches("<leftControlPoint").count(), 2);
        assert_eq!(xml.matches("<rightControlPoint").count(), 2);
    }

    #[test]
    fn written_document_reads_back() {
        let data = sample_data();
        let parsed = parse_curve_xml("bone", &write_curve_xml(&data)).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn missing_values_keep_defaults() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <transferfunction version="1.0">
                <leftend>
                    <tfPoint controlPointsLinked="FALSE">
                        <point x="0" y="0.25"/>
                        <rightControlPoint x="0.1" y="0.25"/>
                    </tfPoint>
                </leftend>
                <normal/>
                <rightend>
                    <tfPoint controlPointsLinked="FALSE">
                        <point x="1" y="1"/>
                        <color r="1" g="0" b="0"/>
                    </tfPoint>
                </rightend>
            </transferfunction>"#;

        let data = parse_curve_xml("red", xml).unwrap();

        assert_eq!(data.name, "red");
        assert_eq!(data.points.len(), 2);
        assert_eq!(data.points[0].location, Location::LeftEnd);
        assert_eq!(data.points[0].value, PointValue::default());
        assert_eq!(data.points[1].value.color, vector![1.0, 0.0, 0.0]);
        assert_eq!(data.points[1].value.specular_power, 16.0);
        assert!(data.points[1].left_control.is_none());
    }

    #[test]
    fn rejects_foreign_documents() {
        assert!(matches!(
            parse_curve_xml("x", "<volume><tfPoint/></volume>"),
            Err(TfError::Format(_))
        ));
        assert!(matches!(parse_curve_xml("x", ""), Err(TfError::Format(_))));

        let bad_number = r#"<transferfunction><leftend><tfPoint>
            <point x="zero" y="0"/></tfPoint></leftend></transferfunction>"#;
        assert!(matches!(
            parse_curve_xml("x", bad_number),
            Err(TfError::Format(_))
        ));
    }

    #[test]
    fn end_groups_required() {
        let no_right = r#"<transferfunction><leftend><tfPoint>
            <point x="0" y="0"/></tfPoint></leftend><normal/></transferfunction>"#;
        assert!(matches!(
            parse_curve_xml("x", no_right),
            Err(TfError::Format(_))
        ));

        let two_left = r#"<transferfunction>
            <leftend><tfPoint><point x="0" y="0"/></tfPoint>
            <tfPoint><point x="0" y="1"/></tfPoint></leftend>
            <rightend><tfPoint><point x="1" y="1"/></tfPoint></rightend>
            </transferfunction>"#;
        assert!(matches!(
            parse_curve_xml("x", two_left),
            Err(TfError::Format(_))
        ));
    }
}
