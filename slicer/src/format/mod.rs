use std::path::Path;

pub mod svg;
pub mod text;

/// Ways a cross-section can be written out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Svg,
    Text,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Svg, Format::Text];

    pub fn from_extension(extension: &str) -> Option<Self> {
        Some(match extension.to_lowercase().as_str() {
            "svg" => Format::Svg,
            "txt" => Format::Text,
            _ => return None,
        })
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Svg => "svg",
            Format::Text => "txt",
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::Format;

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path(Path::new("out/a.SVG")), Some(Format::Svg));
        assert_eq!(Format::from_path(Path::new("b.txt")), Some(Format::Text));
        assert_eq!(Format::from_path(Path::new("c.goo")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);

        for format in Format::ALL {
            assert_eq!(Format::from_extension(format.extension()), Some(format));
        }
    }
}
