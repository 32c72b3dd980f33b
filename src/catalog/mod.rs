//! Static NCERT chapter catalog and chapter selection

use serde::Serialize;

use crate::quiz::Subject::{self, Biology, Chemistry, Physics};

/// A syllabus chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub id: &'static str,
    pub name: &'static str,
    /// 11 or 12
    pub class_level: u8,
    pub unit: &'static str,
    pub subject: Subject,
}

const fn chapter(
    id: &'static str,
    name: &'static str,
    class_level: u8,
    unit: &'static str,
    subject: Subject,
) -> Chapter {
    Chapter { id, name, class_level, unit, subject }
}

/// The full catalog in display order
pub const CHAPTERS: &[Chapter] = &[
    // Biology
    chapter("b11-1", "The Living World", 11, "Diversity", Biology),
    chapter("b11-2", "Biological Classification", 11, "Diversity", Biology),
    chapter("b11-8", "Cell: Unit of Life", 11, "Cell", Biology),
    chapter("b11-10", "Cell Cycle & Division", 11, "Cell", Biology),
    chapter("b11-18", "Body Fluids & Circulation", 11, "Physiology", Biology),
    chapter("b12-5", "Genetics & Variation", 12, "Genetics", Biology),
    chapter("b12-6", "Molecular Inheritance", 12, "Genetics", Biology),
    chapter("b12-11", "Biotech Principles", 12, "Biotech", Biology),
    // Physics
    chapter("p11-1", "Units & Measurements", 11, "General", Physics),
    chapter("p11-3", "Motion in Straight Line", 11, "Mechanics", Physics),
    chapter("p11-5", "Laws of Motion", 11, "Mechanics", Physics),
    chapter("p11-13", "Kinetic Theory", 11, "Thermodynamics", Physics),
    chapter("p12-1", "Electric Charges & Fields", 12, "Electrostatics", Physics),
    chapter("p12-3", "Current Electricity", 12, "Electricity", Physics),
    chapter("p12-9", "Ray Optics", 12, "Optics", Physics),
    // Chemistry
    chapter("c11-1", "Some Basic Concepts", 11, "Physical", Chemistry),
    chapter("c11-2", "Structure of Atom", 11, "Physical", Chemistry),
    chapter("c11-12", "Organic Chem Basics", 11, "Organic", Chemistry),
    chapter("c12-3", "Electrochemistry", 12, "Physical", Chemistry),
    chapter("c12-10", "Haloalkanes", 12, "Organic", Chemistry),
    chapter("c12-7", "p-Block Elements", 12, "Inorganic", Chemistry),
];

/// Chapters of one subject, in catalog order
pub fn chapters_for(subject: Subject) -> Vec<&'static Chapter> {
    CHAPTERS.iter().filter(|c| c.subject == subject).collect()
}

pub fn find_by_id(id: &str) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|c| c.id == id)
}

/// Case-insensitive exact name lookup
pub fn find_by_name(name: &str) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Chapters picked for a chapter-wise test, in the order they were picked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterSelection {
    names: Vec<String>,
}

impl ChapterSelection {
    /// Select `name`, or deselect it if already selected
    pub fn toggle(&mut self, name: &str) {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
        } else {
            self.names.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Chapter filter for a question request; empty means entire syllabus
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
