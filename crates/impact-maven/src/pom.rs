//! Project POM reading: the `artifactId` of the build root.

use std::path::Path;

use impact_util::errors::{ImpactError, ImpactResult};
use quick_xml::events::Event;
use quick_xml::Reader;

/// The part of a `pom.xml` that names the module a build runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPom {
    pub artifact_id: Option<String>,
}

/// Read and parse `<dir>/pom.xml`.
pub fn read_project_pom(dir: &Path) -> ImpactResult<ProjectPom> {
    let path = dir.join("pom.xml");
    let xml = std::fs::read_to_string(&path).map_err(|e| ImpactError::Generic {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;
    parse_pom(&xml)
}

/// Parse POM XML.
pub fn parse_pom(xml: &str) -> ImpactResult<ProjectPom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = ProjectPom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                if path_context(&path) == "project>artifactId" {
                    pom.artifact_id = Some(text_buf.clone());
                }
                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ImpactError::Generic {
                    message: format!("Failed to parse POM XML: {e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    Ok(pom)
}

fn path_context(path: &[String]) -> String {
    path.join(">")
}
