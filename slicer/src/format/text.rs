use std::io::{self, Write};

use crate::section::CrossSection;

/// Writes one segment per line as `x1 y1 z1 x2 y2 z2`, in the same order as
/// the cross-section.
pub fn write<W: Write>(section: &CrossSection, writer: &mut W) -> io::Result<()> {
    for segment in section {
        let (a, b) = (segment.start, segment.end);
        writeln!(writer, "{} {} {} {} {} {}", a.x, a.y, a.z, b.x, b.y, b.z)?;
    }

    Ok(())
}

/// Writes several cross-sections, each preceded by a `# z = <height>` header
/// line giving the plane origin's height.
pub fn write_layers<W: Write>(sections: &[CrossSection], writer: &mut W) -> io::Result<()> {
    for section in sections {
        writeln!(writer, "# z = {}", section.plane.origin().z)?;
        write(section, writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::{write, write_layers};
    use crate::{
        plane::Plane,
        section::{CrossSection, Segment},
        Pos,
    };

    #[test]
    fn test_write() {
        let section = CrossSection::new(
            Plane::horizontal(1.0),
            vec![
                Segment::new([Pos::new(0.0, 0.0, 1.0), Pos::new(1.5, 0.0, 1.0)], 3),
                Segment::new([Pos::new(1.5, 0.0, 1.0), Pos::new(1.5, 2.0, 1.0)], 4),
            ],
        );

        let mut out = Vec::new();
        write(&section, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0 0 1 1.5 0 1\n1.5 0 1 1.5 2 1\n"
        );

        let mut out = Vec::new();
        write_layers(&[section], &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("# z = 1\n0 0 1"));
    }
}
