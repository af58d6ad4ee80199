use serde::{Deserialize, Serialize};

/// A license a collection can be published under.
///
/// `alternative_url`/`alternative_type` point at a machine-readable rendition
/// (RDF for the Creative Commons licenses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub title: String,
    pub url: String,
    #[serde(rename = "type", default = "default_media_type")]
    pub media_type: String,
    #[serde(default)]
    pub alternative_url: Option<String>,
    #[serde(default)]
    pub alternative_type: Option<String>,
}

/// Entry of the `/collections/licenses` listing; the dashboard only needs titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseTitle {
    pub title: String,
}

fn default_media_type() -> String {
    "text/html".to_string()
}

const CREATIVE_COMMONS: [(&str, &str); 7] = [
    ("CC0-1.0", "https://creativecommons.org/publicdomain/zero/1.0/"),
    ("CC-BY-4.0", "https://creativecommons.org/licenses/by/4.0/"),
    ("CC-BY-SA-4.0", "https://creativecommons.org/licenses/by-sa/4.0/"),
    ("CC-BY-NC-4.0", "https://creativecommons.org/licenses/by-nc/4.0/"),
    ("CC-BY-NC-SA-4.0", "https://creativecommons.org/licenses/by-nc-sa/4.0/"),
    ("CC-BY-ND-4.0", "https://creativecommons.org/licenses/by-nd/4.0/"),
    ("CC-BY-NC-ND-4.0", "https://creativecommons.org/licenses/by-nc-nd/4.0/"),
];

impl License {
    /// The Creative Commons licenses seeded into a fresh database.
    pub fn defaults() -> Vec<License> {
        CREATIVE_COMMONS
            .iter()
            .map(|(title, url)| License {
                title: title.to_string(),
                url: url.to_string(),
                media_type: default_media_type(),
                alternative_url: Some(format!("{url}rdf")),
                alternative_type: Some("application/rdf+xml".to_string()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_to_rdf_renditions() {
        let licenses = License::defaults();
        assert_eq!(licenses.len(), 7);

        let by = licenses.iter().find(|l| l.title == "CC-BY-4.0").unwrap();
        assert_eq!(
            by.alternative_url.as_deref(),
            Some("https://creativecommons.org/licenses/by/4.0/rdf")
        );
        assert_eq!(by.media_type, "text/html");
    }

    #[test]
    fn media_type_is_serialized_as_type() {
        let json = serde_json::to_value(&License::defaults()[0]).unwrap();
        assert_eq!(json["type"], "text/html");
    }
}
