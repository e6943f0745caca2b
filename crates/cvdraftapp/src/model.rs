//! # Domain Model: The Resume Draft
//!
//! This module defines [`Document`], the value the editor session owns and persists,
//! together with the small vocabulary used to address parts of it ([`PersonalField`],
//! [`Section`]) and to mutate it partially ([`DocumentPatch`]).
//!
//! ## Storage Representation
//!
//! Documents are serialized as JSON with camelCase keys, matching what the resume
//! forms produce:
//!
//! ```text
//! {
//!   "personalInfo": { "name": "...", "email": "...", ... },
//!   "experience":   [ {...}, ... ],
//!   "education":    [ ... ],
//!   "skills":       [ ... ],
//!   "certificates": [ ... ],
//!   "courses":      [ ... ],
//!   "templateId":   "modern",
//!   "lastModified": "2026-01-05T10:00:00Z"
//! }
//! ```
//!
//! Section entries are opaque records (`serde_json::Value`). The forms decide their
//! shape; this crate only stores and compares them.
//!
//! ## `lastModified`
//!
//! `last_modified` is the time of the last **successful explicit save**. It is never
//! touched by mutations or autosave ticks, and [`DocumentPatch`] cannot set it.
//! Missing fields deserialize to their defaults so drafts written by older forms
//! still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Scalar personal details shown at the top of the resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    /// External profile link (LinkedIn or similar).
    pub linkedin: String,
    pub nationality: String,
    pub birth_date: String,
    pub marital_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Value>,
    pub education: Vec<Value>,
    pub skills: Vec<Value>,
    pub certificates: Vec<Value>,
    pub courses: Vec<Value>,
    pub template_id: String,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            ..Default::default()
        }
    }

    pub fn section(&self, section: Section) -> &[Value] {
        match section {
            Section::Experience => &self.experience,
            Section::Education => &self.education,
            Section::Skills => &self.skills,
            Section::Certificates => &self.certificates,
            Section::Courses => &self.courses,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Value> {
        match section {
            Section::Experience => &mut self.experience,
            Section::Education => &mut self.education,
            Section::Skills => &mut self.skills,
            Section::Certificates => &mut self.certificates,
            Section::Courses => &mut self.courses,
        }
    }

    /// Number of entries across all list sections.
    pub fn entry_count(&self) -> usize {
        Section::ALL.iter().map(|s| self.section(*s).len()).sum()
    }
}

/// Error returned when a field or section name does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.name)
    }
}

impl std::error::Error for UnknownName {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Location,
    Summary,
    Linkedin,
    Nationality,
    BirthDate,
    MaritalStatus,
}

impl PersonalField {
    pub const ALL: [PersonalField; 9] = [
        PersonalField::Name,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Summary,
        PersonalField::Linkedin,
        PersonalField::Nationality,
        PersonalField::BirthDate,
        PersonalField::MaritalStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalField::Name => "name",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Summary => "summary",
            PersonalField::Linkedin => "linkedin",
            PersonalField::Nationality => "nationality",
            PersonalField::BirthDate => "birth-date",
            PersonalField::MaritalStatus => "marital-status",
        }
    }

    pub fn get<'a>(&self, info: &'a PersonalInfo) -> &'a str {
        match self {
            PersonalField::Name => &info.name,
            PersonalField::Email => &info.email,
            PersonalField::Phone => &info.phone,
            PersonalField::Location => &info.location,
            PersonalField::Summary => &info.summary,
            PersonalField::Linkedin => &info.linkedin,
            PersonalField::Nationality => &info.nationality,
            PersonalField::BirthDate => &info.birth_date,
            PersonalField::MaritalStatus => &info.marital_status,
        }
    }

    pub fn set(&self, info: &mut PersonalInfo, value: String) {
        let slot = match self {
            PersonalField::Name => &mut info.name,
            PersonalField::Email => &mut info.email,
            PersonalField::Phone => &mut info.phone,
            PersonalField::Location => &mut info.location,
            PersonalField::Summary => &mut info.summary,
            PersonalField::Linkedin => &mut info.linkedin,
            PersonalField::Nationality => &mut info.nationality,
            PersonalField::BirthDate => &mut info.birth_date,
            PersonalField::MaritalStatus => &mut info.marital_status,
        };
        *slot = value;
    }
}

impl fmt::Display for PersonalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalField {
    type Err = UnknownName;

    /// Accepts kebab-case, snake_case and the camelCase storage names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], "");
        match normalized.as_str() {
            "name" | "fullname" => Ok(PersonalField::Name),
            "email" => Ok(PersonalField::Email),
            "phone" => Ok(PersonalField::Phone),
            "location" | "city" => Ok(PersonalField::Location),
            "summary" => Ok(PersonalField::Summary),
            "linkedin" | "profile" => Ok(PersonalField::Linkedin),
            "nationality" => Ok(PersonalField::Nationality),
            "birthdate" => Ok(PersonalField::BirthDate),
            "maritalstatus" => Ok(PersonalField::MaritalStatus),
            _ => Err(UnknownName {
                kind: "field",
                name: s.to_string(),
            }),
        }
    }
}

/// The ordered list sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Experience,
    Education,
    Skills,
    Certificates,
    Courses,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Certificates,
        Section::Courses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Certificates => "certificates",
            Section::Courses => "courses",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "experience" | "exp" => Ok(Section::Experience),
            "education" | "edu" => Ok(Section::Education),
            "skills" | "skill" => Ok(Section::Skills),
            "certificates" | "certificate" | "certs" => Ok(Section::Certificates),
            "courses" | "course" => Ok(Section::Courses),
            _ => Err(UnknownName {
                kind: "section",
                name: s.to_string(),
            }),
        }
    }
}

/// A partial update to a [`Document`].
///
/// Only the parts named in the patch are replaced; everything else is left as is.
/// `last_modified` is deliberately not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    fields: Vec<(PersonalField, String)>,
    sections: Vec<(Section, Vec<Value>)>,
    template_id: Option<String>,
}

impl DocumentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: PersonalField, value: impl Into<String>) -> Self {
        self.fields.push((field, value.into()));
        self
    }

    pub fn section(mut self, section: Section, entries: Vec<Value>) -> Self {
        self.sections.push((section, entries));
        self
    }

    pub fn template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.sections.is_empty() && self.template_id.is_none()
    }

    /// Apply the patch in insertion order; later entries win.
    pub fn apply(self, doc: &mut Document) {
        for (field, value) in self.fields {
            field.set(&mut doc.personal_info, value);
        }
        for (section, entries) in self.sections {
            *doc.section_mut(section) = entries;
        }
        if let Some(template_id) = self.template_id {
            doc.template_id = template_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let mut doc = Document::with_template("modern");
        doc.personal_info.birth_date = "1990-01-01".to_string();

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["templateId"], "modern");
        assert_eq!(value["personalInfo"]["birthDate"], "1990-01-01");
        assert!(value["lastModified"].is_null());
        assert!(value["experience"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_missing_fields_default_on_load() {
        let doc: Document =
            serde_json::from_str(r#"{"personalInfo":{"name":"Ali"},"skills":["Rust"]}"#).unwrap();
        assert_eq!(doc.personal_info.name, "Ali");
        assert_eq!(doc.personal_info.email, "");
        assert_eq!(doc.skills, vec![json!("Rust")]);
        assert_eq!(doc.template_id, "");
        assert_eq!(doc.last_modified, None);
    }

    #[test]
    fn test_arabic_text_survives_serialization() {
        let mut doc = Document::new();
        doc.personal_info.name = "سارة أحمد".to_string();
        doc.personal_info.location = "الرياض".to_string();

        let raw = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_patch_only_touches_named_parts() {
        let mut doc = Document::with_template("classic");
        doc.personal_info.name = "Ali".to_string();
        doc.personal_info.email = "ali@example.com".to_string();
        doc.skills = vec![json!("SQL")];

        DocumentPatch::new()
            .field(PersonalField::Name, "Sara")
            .section(Section::Skills, vec![json!("Rust"), json!("Go")])
            .apply(&mut doc);

        assert_eq!(doc.personal_info.name, "Sara");
        assert_eq!(doc.personal_info.email, "ali@example.com");
        assert_eq!(doc.skills, vec![json!("Rust"), json!("Go")]);
        assert_eq!(doc.template_id, "classic");
    }

    #[test]
    fn test_patch_later_entries_win() {
        let mut doc = Document::new();
        DocumentPatch::new()
            .field(PersonalField::Phone, "1")
            .field(PersonalField::Phone, "2")
            .apply(&mut doc);
        assert_eq!(doc.personal_info.phone, "2");
    }

    #[test]
    fn test_empty_patch() {
        assert!(DocumentPatch::new().is_empty());
        assert!(!DocumentPatch::new().template("x").is_empty());
    }

    #[test]
    fn test_personal_field_parsing() {
        assert_eq!("name".parse::<PersonalField>(), Ok(PersonalField::Name));
        assert_eq!(
            "birth-date".parse::<PersonalField>(),
            Ok(PersonalField::BirthDate)
        );
        assert_eq!(
            "birthDate".parse::<PersonalField>(),
            Ok(PersonalField::BirthDate)
        );
        assert_eq!(
            "marital_status".parse::<PersonalField>(),
            Ok(PersonalField::MaritalStatus)
        );
        assert!("salary".parse::<PersonalField>().is_err());
    }

    #[test]
    fn test_personal_field_roundtrips_through_display() {
        for field in PersonalField::ALL {
            assert_eq!(field.to_string().parse::<PersonalField>(), Ok(field));
        }
    }

    #[test]
    fn test_section_parsing_and_access() {
        assert_eq!("Education".parse::<Section>(), Ok(Section::Education));
        assert_eq!("certs".parse::<Section>(), Ok(Section::Certificates));
        let err = "hobbies".parse::<Section>().unwrap_err();
        assert_eq!(err.to_string(), "unknown section: 'hobbies'");

        let mut doc = Document::new();
        doc.section_mut(Section::Courses).push(json!({"title": "Rust 101"}));
        assert_eq!(doc.section(Section::Courses).len(), 1);
        assert_eq!(doc.entry_count(), 1);
    }
}
