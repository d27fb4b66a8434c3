use std::fmt;

use serde::{Deserialize, Serialize};

use super::Education;

/// Source column whose value decides a row's respondent category
pub const CATEGORY_COLUMN: &str = "Please choose the option that's most relevant to you";

/// Respondent category, one per survey form section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    UbcStudent,
    UniversityStudent,
    HighSchoolStudent,
    Other,
}

impl Category {
    /// All categories in emission order. Concatenation and id assignment
    /// follow this order.
    pub const ALL: [Category; 4] = [
        Category::UbcStudent,
        Category::UniversityStudent,
        Category::HighSchoolStudent,
        Category::Other,
    ];

    /// The exact discriminant value the survey uses for this category
    pub fn discriminant(&self) -> &'static str {
        match self {
            Category::UbcStudent => "I am a current/prospective UBC student",
            Category::UniversityStudent => "I am a current/prospective university student",
            Category::HighSchoolStudent => "I am a high school student",
            Category::Other => "None of the above",
        }
    }

    /// Classify a discriminant cell. Anything that is not one of the three
    /// student values falls into `Other`, so no row is ever dropped.
    pub fn from_discriminant(value: &str) -> Category {
        match value {
            "I am a current/prospective UBC student" => Category::UbcStudent,
            "I am a current/prospective university student" => Category::UniversityStudent,
            "I am a high school student" => Category::HighSchoolStudent,
            _ => Category::Other,
        }
    }

    /// Education tag stored on the emitted record
    pub fn education(&self) -> Education {
        match self {
            Category::UbcStudent => Education::Ubc,
            Category::UniversityStudent => Education::Uni,
            Category::HighSchoolStudent => Education::Hs,
            Category::Other => Education::Na,
        }
    }

    /// Rename table mapping this category's source columns to unified fields
    pub fn rename_table(&self) -> &'static [(&'static str, Field)] {
        match self {
            // The survey reuses the UBC form section for "none of the above"
            // respondents, so both categories read the same columns.
            Category::UbcStudent | Category::Other => UBC_RENAMES,
            Category::UniversityStudent => UNIVERSITY_RENAMES,
            Category::HighSchoolStudent => HIGH_SCHOOL_RENAMES,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::UbcStudent => "UBC student",
            Category::UniversityStudent => "university student",
            Category::HighSchoolStudent => "high school student",
            Category::Other => "other",
        };
        write!(f, "{}", label)
    }
}

/// Unified target field, category-independent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Timestamp,
    Email,
    FirstName,
    LastName,
    Pronouns,
    StudentNumber,
    University,
    HighSchool,
    Year,
    Faculty,
    Major,
    PrevMember,
    International,
    Topics,
    HeardFrom,
}

impl Field {
    /// Emitted key name for this field
    pub fn name(&self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::Email => "email",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Pronouns => "pronouns",
            Field::StudentNumber => "student_number",
            Field::University => "university",
            Field::HighSchool => "high_school",
            Field::Year => "year",
            Field::Faculty => "faculty",
            Field::Major => "major",
            Field::PrevMember => "prev_member",
            Field::International => "international",
            Field::Topics => "topics",
            Field::HeardFrom => "heard_from",
        }
    }
}

// Repeated column names carry a `.1`/`.2` suffix from header
// disambiguation (see `io::input`); the form repeats most questions once
// per category section. The topics question keeps its trailing space from
// the export verbatim.
const UBC_RENAMES: &[(&str, Field)] = &[
    ("Timestamp", Field::Timestamp),
    ("Username", Field::Email),
    ("First Name", Field::FirstName),
    ("Last Name", Field::LastName),
    ("What are your preferred pronouns?", Field::Pronouns),
    ("UBC Student Number", Field::StudentNumber),
    ("Academic Year Level", Field::Year),
    ("Faculty", Field::Faculty),
    ("Major", Field::Major),
    ("Were you a BizTech member last year?", Field::PrevMember),
    ("Are you an international student?", Field::International),
    (
        "What topics did you want to see the most discussed in the future? ",
        Field::Topics,
    ),
    ("How did you hear about us?", Field::HeardFrom),
];

const UNIVERSITY_RENAMES: &[(&str, Field)] = &[
    ("Timestamp", Field::Timestamp),
    ("Username", Field::Email),
    ("First Name.1", Field::FirstName),
    ("Last Name.1", Field::LastName),
    ("What are your preferred pronouns?.1", Field::Pronouns),
    ("What university do you currently attend?", Field::University),
    ("Academic Year Level.1", Field::Year),
    ("Faculty.1", Field::Faculty),
    ("Major.1", Field::Major),
    ("Were you a BizTech member last year?.1", Field::PrevMember),
    ("Are you an international student?.1", Field::International),
    (
        "What topics did you want to see the most discussed in the future? .1",
        Field::Topics,
    ),
    ("How did you hear about us?.1", Field::HeardFrom),
];

const HIGH_SCHOOL_RENAMES: &[(&str, Field)] = &[
    ("Timestamp", Field::Timestamp),
    ("Username", Field::Email),
    ("First Name.2", Field::FirstName),
    ("Last Name.2", Field::LastName),
    ("What are your preferred pronouns?.2", Field::Pronouns),
    ("What high-school do you currently attend?", Field::HighSchool),
    ("Academic Grade", Field::Year),
    ("How did you hear about us?.2", Field::HeardFrom),
];
