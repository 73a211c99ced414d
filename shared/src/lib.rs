use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Outcome classes of the false smut classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    #[strum(serialize = "false_smut")]
    FalseSmut,
    #[strum(serialize = "fs_absent")]
    FsAbsent,
}

impl Label {
    pub fn display_name(&self) -> &'static str {
        match self {
            Label::FalseSmut => "False Smut Detected",
            Label::FsAbsent => "No False Smut",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Label::FalseSmut => "Images showing signs of the disease.",
            Label::FsAbsent => "Images without any signs of the disease.",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Label::FalseSmut)
    }
}

/// Distance of the raw score from the decision boundary, as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display(fmt = "{:.2}%", _0)]
pub struct Confidence(pub f64);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResponse {
    pub request_id: String,
    pub label: Label,
    pub label_text: String,
    pub confidence: Confidence,
    pub score: f32,
    pub image_hash: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClassInfo {
    pub key: Label,
    pub display_name: String,
    pub description: String,
}

impl From<Label> for ClassInfo {
    fn from(label: Label) -> Self {
        Self {
            key: label,
            display_name: label.display_name().to_string(),
            description: label.description().to_string(),
        }
    }
}

/// Known classes, positive class first.
pub fn classes() -> Vec<ClassInfo> {
    Label::iter().map(ClassInfo::from).collect()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelInfo {
    pub backend: String,
    pub input_width: u32,
    pub input_height: u32,
    pub channels: u32,
    pub threshold: f32,
    pub classes: Vec<ClassInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn label_keys_match_wire_format() {
        assert_eq!(serde_json::to_string(&Label::FalseSmut).unwrap(), "\"false_smut\"");
        assert_eq!(serde_json::to_string(&Label::FsAbsent).unwrap(), "\"fs_absent\"");
        assert_eq!(Label::FalseSmut.to_string(), "false_smut");
        assert_eq!(Label::from_str("fs_absent").unwrap(), Label::FsAbsent);
        assert!(Label::from_str("smut").is_err());
    }

    #[test]
    fn every_label_has_a_class_entry() {
        let classes = classes();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].display_name, "False Smut Detected");
        assert_eq!(classes[1].display_name, "No False Smut");
    }

    #[test]
    fn confidence_is_transparent_and_formats_as_percent() {
        let confidence = Confidence(95.0);
        assert_eq!(serde_json::to_string(&confidence).unwrap(), "95.0");
        assert_eq!(confidence.to_string(), "95.00%");
    }
}
