//! # Resume
//!
//! Plain resume data and its assembly into a [`Document`].
//!
//! The structs are what a data-entry form would bind to: public fields,
//! explicit setters, and list edits by position. Nothing here knows about
//! pages; [`Resume::to_document`] produces the block sequence and the
//! paginator takes it from there.
//!
//! Block order:
//!
//! ```text
//! name, title, location, email, phone,
//! linkedin, portfolio, github             (5pt between lines)
//! 20pt, "Summary", 5pt, summary
//! 20pt, "Skills", 5pt, one line per skill (5pt after each)
//! 20pt, "Work Experience", 5pt, per job:
//!       position | dates        (borderless 2x2 table)
//!       company  | location
//!       5pt, description, 10pt
//! 20pt, "Education", 5pt, per school: the same table shape
//! 20pt, "Certifications", 5pt, per certificate: the same table shape
//! 20pt, "Languages", 5pt, one bullet per language
//! 20pt, "Projects", 5pt, per project:
//!       the same table shape, 5pt, description,
//!       technologies and highlight bullets (5pt apart), 10pt
//! 20pt, "References", 5pt, per reference: the same table shape
//! 20pt, <title>, 5pt, one bullet per item        (each additional section)
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    Document, Edges, Metadata, PageConfig, PageSize, StyledBlock, TableCell, TableContent, TextContent,
};
use crate::style::{Color, TextAlign, TextStyle};

const LINE_GAP: f64 = 5.0;
const SECTION_GAP: f64 = 20.0;
const ENTRY_GAP: f64 = 10.0;
const DATE_FORMAT: &str = "%b %Y";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub additional_sections: Vec<AdditionalSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "linkedIn")]
    pub linkedin: String,
    pub portfolio: String,
    pub github: String,
}

impl PersonalInfo {
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = location.into();
        self
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.email = email.into();
        self
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> &mut Self {
        self.phone = phone.into();
        self
    }

    pub fn set_linkedin(&mut self, linkedin: impl Into<String>) -> &mut Self {
        self.linkedin = linkedin.into();
        self
    }

    pub fn set_portfolio(&mut self, portfolio: impl Into<String>) -> &mut Self {
        self.portfolio = portfolio.into();
        self
    }

    pub fn set_github(&mut self, github: impl Into<String>) -> &mut Self {
        self.github = github.into();
        self
    }
}

/// A skill category and its comma-separated values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub category: String,
    pub values: String,
}

impl Skill {
    pub fn new(category: &str, values: &str) -> Self {
        Self {
            category: category.to_string(),
            values: values.to_string(),
        }
    }

    /// "Category: values", or just the values when there is no category.
    pub fn line(&self) -> String {
        if self.category.is_empty() {
            self.values.clone()
        } else {
            format!("{}: {}", self.category, self.values)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub company_name: String,
    pub position: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: String,
}

impl WorkExperience {
    pub fn new(company_name: &str, position: &str, location: &str) -> Self {
        Self {
            company_name: company_name.to_string(),
            position: position.to_string(),
            location: location.to_string(),
            ..Default::default()
        }
    }

    pub fn set_dates(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> &mut Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn set_current(&mut self, is_current: bool) -> &mut Self {
        self.is_current = is_current;
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// "Mar 2022 - Present", "Jun 2019 - Mar 2022", or "" without a start date.
    pub fn date_range(&self) -> String {
        let Some(start) = self.start_date else {
            return String::new();
        };
        let mut range = start.format(DATE_FORMAT).to_string();
        if self.is_current {
            range.push_str(" - Present");
        } else if let Some(end) = self.end_date {
            range.push_str(" - ");
            range.push_str(&end.format(DATE_FORMAT).to_string());
        }
        range
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Education {
    /// "Sep 2018 - Jun 2020"; an open end reads "Present".
    pub fn date_range(&self) -> String {
        let end = match self.end_date {
            Some(end) => end.format(DATE_FORMAT).to_string(),
            None => "Present".to_string(),
        };
        format!("{} - {}", self.start_date.format(DATE_FORMAT), end)
    }

    /// "Master of Science, Computer Science"
    pub fn heading(&self) -> String {
        if self.field_of_study.is_empty() {
            self.degree.clone()
        } else {
            format!("{}, {}", self.degree, self.field_of_study)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, alias = "credentialID")]
    pub credential_id: Option<String>,
    #[serde(default, alias = "credentialURL")]
    pub credential_url: Option<String>,
}

impl Certification {
    /// "Mar 2021", or "Mar 2021 - Mar 2024" with an expiration date.
    pub fn dates(&self) -> String {
        let issued = self.issue_date.format(DATE_FORMAT).to_string();
        match self.expiration_date {
            Some(end) => format!("{} - {}", issued, end.format(DATE_FORMAT)),
            None => issued,
        }
    }

    /// "ID: ABC-123", or "" without a credential id.
    pub fn credential_line(&self) -> String {
        self.credential_id
            .as_deref()
            .map(|id| format!("ID: {id}"))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    #[default]
    Elementary,
    #[serde(rename = "Limited Working")]
    LimitedWorking,
    #[serde(rename = "Professional Working")]
    ProfessionalWorking,
    #[serde(rename = "Full Professional")]
    FullProfessional,
    #[serde(rename = "Native/Bilingual")]
    Native,
}

impl Proficiency {
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Elementary => "Elementary",
            Proficiency::LimitedWorking => "Limited Working",
            Proficiency::ProfessionalWorking => "Professional Working",
            Proficiency::FullProfessional => "Full Professional",
            Proficiency::Native => "Native/Bilingual",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub name: String,
    #[serde(default, rename = "proficiencyLevel")]
    pub proficiency: Proficiency,
}

impl Language {
    pub fn new(name: &str, proficiency: Proficiency) -> Self {
        Self {
            name: name.to_string(),
            proficiency,
        }
    }

    /// "Spanish (Professional Working)"
    pub fn line(&self) -> String {
        format!("{} ({})", self.name, self.proficiency.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub url: Option<String>,
    pub technologies: Vec<String>,
    pub highlights: Vec<String>,
}

impl Project {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// "Jan 2021 - Present" for an open project; `None` without a start date.
    pub fn date_range(&self) -> Option<String> {
        let start = self.start_date?;
        let end = match self.end_date {
            Some(end) => end.format(DATE_FORMAT).to_string(),
            None => "Present".to_string(),
        };
        Some(format!("{} - {}", start.format(DATE_FORMAT), end))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub name: String,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub relationship: String,
}

impl Reference {
    /// "CTO at Acme"
    pub fn role(&self) -> String {
        match (self.position.is_empty(), self.company.is_empty()) {
            (false, false) => format!("{} at {}", self.position, self.company),
            (false, true) => self.position.clone(),
            _ => self.company.clone(),
        }
    }

    /// Email and phone joined by " · ", skipping whichever is missing.
    pub fn contact(&self) -> String {
        [self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" \u{b7} ")
    }
}

/// A free-form titled list, e.g. "Volunteering" or "Awards".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalSection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

// ── List edits ──────────────────────────────────────────────

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Result<T> {
    if index >= items.len() {
        return Err(Error::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

/// Move the item at `from` so it ends up at `to`, shifting the rest.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

impl Resume {
    pub fn new(personal_info: PersonalInfo) -> Self {
        Self {
            personal_info,
            ..Default::default()
        }
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.summary = summary.into();
        self
    }

    pub fn add_skill(&mut self, skill: Skill) -> &mut Self {
        self.skills.push(skill);
        self
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<Skill> {
        remove_at(&mut self.skills, index)
    }

    pub fn move_skill(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.skills, from, to)
    }

    pub fn add_experience(&mut self, experience: WorkExperience) -> &mut Self {
        self.work_experience.push(experience);
        self
    }

    pub fn remove_experience(&mut self, index: usize) -> Result<WorkExperience> {
        remove_at(&mut self.work_experience, index)
    }

    pub fn move_experience(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.work_experience, from, to)
    }

    pub fn add_education(&mut self, education: Education) -> &mut Self {
        self.education.push(education);
        self
    }

    pub fn remove_education(&mut self, index: usize) -> Result<Education> {
        remove_at(&mut self.education, index)
    }

    pub fn move_education(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.education, from, to)
    }

    pub fn add_certification(&mut self, certification: Certification) -> &mut Self {
        self.certifications.push(certification);
        self
    }

    pub fn remove_certification(&mut self, index: usize) -> Result<Certification> {
        remove_at(&mut self.certifications, index)
    }

    pub fn move_certification(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.certifications, from, to)
    }

    pub fn add_language(&mut self, language: Language) -> &mut Self {
        self.languages.push(language);
        self
    }

    pub fn remove_language(&mut self, index: usize) -> Result<Language> {
        remove_at(&mut self.languages, index)
    }

    pub fn move_language(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.languages, from, to)
    }

    pub fn add_project(&mut self, project: Project) -> &mut Self {
        self.projects.push(project);
        self
    }

    pub fn remove_project(&mut self, index: usize) -> Result<Project> {
        remove_at(&mut self.projects, index)
    }

    pub fn move_project(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.projects, from, to)
    }

    pub fn add_reference(&mut self, reference: Reference) -> &mut Self {
        self.references.push(reference);
        self
    }

    pub fn remove_reference(&mut self, index: usize) -> Result<Reference> {
        remove_at(&mut self.references, index)
    }

    pub fn move_reference(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.references, from, to)
    }

    pub fn add_section(&mut self, section: AdditionalSection) -> &mut Self {
        self.additional_sections.push(section);
        self
    }

    pub fn remove_section(&mut self, index: usize) -> Result<AdditionalSection> {
        remove_at(&mut self.additional_sections, index)
    }

    pub fn move_section(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.additional_sections, from, to)
    }

    /// A frozen copy to lay out while editing continues on `self`.
    pub fn snapshot(&self) -> Resume {
        self.clone()
    }

    /// Assemble the resume into a paginatable document.
    ///
    /// Empty fields and empty sections are left out.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new(PageConfig {
            size: PageSize::A4,
            margin: Edges::uniform(50.0),
        });
        doc.metadata = Metadata {
            title: non_empty(&self.personal_info.name).map(|n| format!("{} - Resume", n)),
            author: non_empty(&self.personal_info.name).map(str::to_string),
            subject: non_empty(&self.personal_info.title).map(str::to_string),
            creator: Some("pageflow".to_string()),
        };

        self.push_personal_info(&mut doc);

        if !self.summary.is_empty() {
            section_header(&mut doc, "summary", "Summary");
            doc.push(text_block("summary", &self.summary, TextStyle::Body));
        }

        if !self.skills.is_empty() {
            section_header(&mut doc, "skills", "Skills");
            for (i, skill) in self.skills.iter().enumerate() {
                doc.push(text_block(&format!("skill-{i}"), &skill.line(), TextStyle::Body));
                doc.space(LINE_GAP);
            }
        }

        if !self.work_experience.is_empty() {
            section_header(&mut doc, "experience", "Work Experience");
            for (i, job) in self.work_experience.iter().enumerate() {
                let table = two_by_two(
                    &job.position,
                    &job.date_range(),
                    &job.company_name,
                    &job.location,
                );
                doc.push(StyledBlock::table(table).with_id(format!("experience-{i}")));
                if !job.description.is_empty() {
                    doc.space(LINE_GAP);
                    doc.push(text_block(
                        &format!("experience-{i}-description"),
                        &job.description,
                        TextStyle::Body,
                    ));
                }
                doc.space(ENTRY_GAP);
            }
        }

        if !self.education.is_empty() {
            section_header(&mut doc, "education", "Education");
            for (i, school) in self.education.iter().enumerate() {
                let table = two_by_two(
                    &school.heading(),
                    &school.date_range(),
                    &school.institution,
                    &school.location,
                );
                doc.push(StyledBlock::table(table).with_id(format!("education-{i}")));
                doc.space(ENTRY_GAP);
            }
        }

        if !self.certifications.is_empty() {
            section_header(&mut doc, "certifications", "Certifications");
            for (i, cert) in self.certifications.iter().enumerate() {
                let table = two_by_two(
                    &cert.name,
                    &cert.dates(),
                    &cert.issuing_organization,
                    &cert.credential_line(),
                );
                doc.push(StyledBlock::table(table).with_id(format!("certification-{i}")));
                doc.space(ENTRY_GAP);
            }
        }

        if !self.languages.is_empty() {
            section_header(&mut doc, "languages", "Languages");
            for (i, language) in self.languages.iter().enumerate() {
                doc.push(bullet(&format!("language-{i}"), &language.line()));
                doc.space(LINE_GAP);
            }
        }

        if !self.projects.is_empty() {
            section_header(&mut doc, "projects", "Projects");
            for (i, project) in self.projects.iter().enumerate() {
                push_project(&mut doc, i, project);
            }
        }

        if !self.references.is_empty() {
            section_header(&mut doc, "references", "References");
            for (i, reference) in self.references.iter().enumerate() {
                let table = two_by_two(
                    &reference.name,
                    &reference.relationship,
                    &reference.role(),
                    &reference.contact(),
                );
                doc.push(StyledBlock::table(table).with_id(format!("reference-{i}")));
                doc.space(ENTRY_GAP);
            }
        }

        for (i, section) in self.additional_sections.iter().enumerate() {
            if section.items.is_empty() {
                continue;
            }
            section_header(&mut doc, &format!("section-{i}"), &section.title);
            for (j, item) in section.items.iter().enumerate() {
                doc.push(bullet(&format!("section-{i}-{j}"), item));
                doc.space(LINE_GAP);
            }
        }

        log::debug!("assembled resume into {} blocks", doc.blocks.len());
        doc
    }

    fn push_personal_info(&self, doc: &mut Document) {
        let info = &self.personal_info;
        let profile = |label: &str, value: &str| {
            non_empty(value).map(|v| format!("{label}: {v}")).unwrap_or_default()
        };
        let lines = [
            ("name", info.name.clone(), TextStyle::Title1, Color::BLACK),
            ("title", info.title.clone(), TextStyle::Title2, Color::BLACK),
            ("location", info.location.clone(), TextStyle::Body, Color::BLACK),
            ("email", info.email.clone(), TextStyle::Body, Color::BLACK),
            ("phone", info.phone.clone(), TextStyle::Body, Color::BLACK),
            ("linkedin", profile("LinkedIn", &info.linkedin), TextStyle::Body, Color::LINK),
            ("portfolio", profile("Portfolio", &info.portfolio), TextStyle::Body, Color::LINK),
            ("github", profile("GitHub", &info.github), TextStyle::Body, Color::LINK),
        ];
        let mut first = true;
        for (id, value, style, color) in lines {
            if value.is_empty() {
                continue;
            }
            if !first {
                doc.space(LINE_GAP);
            }
            doc.push(StyledBlock::text(TextContent::styled(&value, style).color(color)).with_id(id));
            first = false;
        }
    }

    /// The resume the CLI's `--example` flag renders.
    pub fn sample() -> Resume {
        let mut resume = Resume::default();
        resume
            .personal_info
            .set_name("John Doe")
            .set_title("Software Developer")
            .set_location("San Francisco")
            .set_email("john.doe@example.com")
            .set_phone("555-123-4567")
            .set_linkedin("linkedin.com/in/johndoe")
            .set_github("github.com/johndoe");
        resume.set_summary(
            "Senior Software Developer with 10+ years of experience architecting scalable \
             applications and leading high-performance engineering teams. Expertise in \
             full-stack development, cloud infrastructure, and delivering enterprise solutions \
             that drive business growth.",
        );

        for (category, values) in [
            ("Frontend", "JavaScript, TypeScript, React, Vue.js, Angular, CSS3, HTML5, Webpack"),
            ("Backend", "Node.js, Express, Django, Ruby on Rails, REST APIs, GraphQL"),
            ("Database", "MongoDB, PostgreSQL, MySQL, Redis, Elasticsearch, ORM tools"),
            ("DevOps", "Docker, Kubernetes, AWS, CI/CD, GitHub Actions, Netlify, Vercel"),
            ("Tools", "Git, VSCode, npm, Yarn, Jest, Cypress, Storybook, Figma"),
        ] {
            resume.add_skill(Skill::new(category, values));
        }

        let jobs = [
            (
                "Tech Innovations Inc.",
                "Senior Software Engineer",
                "San Francisco, CA",
                date(2022, 3, 15),
                None,
                "Leading a team of 5 engineers developing iOS applications. Implemented CI/CD \
                 pipelines that reduced deployment time by 40%. Architected and developed a new \
                 feature that increased user engagement by 25%.",
            ),
            (
                "Mobile Solutions Ltd.",
                "iOS Developer",
                "Austin, TX",
                date(2019, 6, 1),
                date(2022, 3, 1),
                "Developed and maintained multiple iOS applications using Swift and UIKit. \
                 Collaborated with design team to implement user-friendly interfaces. Reduced \
                 app crash rate by 75% through comprehensive testing and debugging.",
            ),
            (
                "StartUp Ventures",
                "Junior Developer",
                "Boston, MA",
                date(2017, 9, 12),
                date(2019, 5, 15),
                "Assisted in the development of iOS and Android applications. Implemented \
                 RESTful API integrations. Participated in daily scrums and bi-weekly sprint \
                 planning meetings.",
            ),
            (
                "Code Academy",
                "Intern",
                "Remote",
                date(2017, 1, 10),
                date(2017, 8, 30),
                "Assisted senior developers with bug fixes and testing. Learned Swift \
                 programming and iOS development principles. Created a small utility \
                 application as a final project.",
            ),
        ];
        for (company, position, location, start, end, description) in jobs {
            let mut job = WorkExperience::new(company, position, location);
            job.set_dates(start, end)
                .set_current(end.is_none())
                .set_description(description);
            resume.add_experience(job);
        }

        let schools = [
            (
                "Bachelor of Science",
                "Computer Engineering",
                "University of California, Berkeley",
                "Berkeley, CA",
                date(2014, 8, 20),
                date(2018, 5, 12),
            ),
            (
                "Master of Science",
                "Computer Science",
                "Stanford University",
                "Stanford, CA",
                date(2018, 9, 1),
                date(2020, 6, 15),
            ),
            (
                "PhD",
                "Artificial Intelligence",
                "MIT",
                "Cambridge, MA",
                date(2020, 9, 1),
                None,
            ),
        ];
        for (degree, field, institution, location, start, end) in schools {
            if let Some(start_date) = start {
                resume.add_education(Education {
                    degree: degree.to_string(),
                    field_of_study: field.to_string(),
                    institution: institution.to_string(),
                    location: location.to_string(),
                    start_date,
                    end_date: end,
                });
            }
        }

        if let Some(issue_date) = date(2021, 3, 10) {
            resume.add_certification(Certification {
                name: "AWS Certified Solutions Architect".to_string(),
                issuing_organization: "Amazon Web Services".to_string(),
                issue_date,
                expiration_date: date(2024, 3, 10),
                credential_id: Some("AWS-SA-123456".to_string()),
                credential_url: None,
            });
        }

        resume
            .add_language(Language::new("English", Proficiency::Native))
            .add_language(Language::new("Spanish", Proficiency::ProfessionalWorking))
            .add_language(Language::new("French", Proficiency::Elementary));

        let mut project = Project::new(
            "Open Source Task Manager",
            "A cross-platform task manager with offline sync and shared boards.",
        );
        project.start_date = date(2021, 1, 1);
        project.url = Some("github.com/johndoe/taskmanager".to_string());
        project.technologies = vec!["Swift".to_string(), "SwiftUI".to_string(), "CloudKit".to_string()];
        project.highlights = vec![
            "Over 5,000 stars on GitHub".to_string(),
            "Featured in a developer newsletter".to_string(),
        ];
        resume.add_project(project);

        resume.add_reference(Reference {
            name: "Jane Smith".to_string(),
            company: "Tech Innovations Inc.".to_string(),
            position: "CTO".to_string(),
            email: Some("jane.smith@example.com".to_string()),
            phone: None,
            relationship: "Former Manager".to_string(),
        });

        resume.add_section(AdditionalSection {
            title: "Volunteering".to_string(),
            items: vec![
                "Code mentor at a local coding bootcamp".to_string(),
                "Organizer of the city's mobile developers meetup".to_string(),
            ],
        });

        resume
    }
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn text_block(id: &str, text: &str, style: TextStyle) -> StyledBlock {
    StyledBlock::text(TextContent::styled(text, style)).with_id(id)
}

fn push_project(doc: &mut Document, i: usize, project: &Project) {
    let table = two_by_two(
        &project.name,
        &project.date_range().unwrap_or_default(),
        project.url.as_deref().unwrap_or_default(),
        "",
    );
    doc.push(StyledBlock::table(table).with_id(format!("project-{i}")));

    if !project.description.is_empty() {
        doc.space(LINE_GAP);
        doc.push(text_block(
            &format!("project-{i}-description"),
            &project.description,
            TextStyle::Body,
        ));
    }
    if !project.technologies.is_empty() {
        doc.space(LINE_GAP);
        doc.push(text_block(
            &format!("project-{i}-technologies"),
            &format!("Technologies: {}", project.technologies.join(", ")),
            TextStyle::Callout,
        ));
    }
    for (j, highlight) in project.highlights.iter().enumerate() {
        doc.space(LINE_GAP);
        doc.push(bullet(&format!("project-{i}-highlight-{j}"), highlight));
    }
    doc.space(ENTRY_GAP);
}

fn bullet(id: &str, text: &str) -> StyledBlock {
    text_block(id, &format!("\u{2022} {text}"), TextStyle::Body)
}

fn section_header(doc: &mut Document, id: &str, title: &str) {
    doc.space(SECTION_GAP);
    doc.push(text_block(&format!("{id}-header"), title, TextStyle::Title2));
    doc.space(LINE_GAP);
}

/// The entry header: headline left, dates right, place name left, location right.
fn two_by_two(heading: &str, dates: &str, place: &str, location: &str) -> TableContent {
    let secondary = |text: &str| {
        TableCell::new(
            TextContent::styled(text, TextStyle::Subheadline).color(Color::SECONDARY),
            TextAlign::Right,
        )
    };

    let mut table = TableContent::grid(2, 2);
    table.set(
        0,
        0,
        TableCell::new(TextContent::styled(heading, TextStyle::Headline), TextAlign::Left),
    );
    table.set(0, 1, secondary(dates));
    table.set(
        1,
        0,
        TableCell::new(TextContent::styled(place, TextStyle::Body), TextAlign::Left),
    );
    table.set(1, 1, secondary(location));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockContent;

    fn ids(doc: &Document) -> Vec<String> {
        doc.blocks.iter().map(|b| b.id.0.clone()).collect()
    }

    fn job(start: Option<NaiveDate>, end: Option<NaiveDate>, current: bool) -> WorkExperience {
        let mut job = WorkExperience::new("Acme", "Engineer", "Remote");
        job.set_dates(start, end).set_current(current);
        job
    }

    #[test]
    fn date_ranges() {
        assert_eq!(
            job(date(2022, 3, 15), None, true).date_range(),
            "Mar 2022 - Present"
        );
        assert_eq!(
            job(date(2019, 6, 1), date(2022, 3, 1), false).date_range(),
            "Jun 2019 - Mar 2022"
        );
        assert_eq!(job(date(2019, 6, 1), None, false).date_range(), "Jun 2019");
        assert_eq!(job(None, date(2022, 3, 1), false).date_range(), "");
        // Current wins over an end date
        assert_eq!(
            job(date(2019, 6, 1), date(2022, 3, 1), true).date_range(),
            "Jun 2019 - Present"
        );
    }

    #[test]
    fn setters_chain() {
        let mut info = PersonalInfo::default();
        info.set_name("Ada").set_email("ada@example.com");
        assert_eq!(info.name, "Ada");
        assert_eq!(info.email, "ada@example.com");
        assert!(info.phone.is_empty());
    }

    #[test]
    fn remove_and_move_skills() {
        let mut resume = Resume::default();
        resume
            .add_skill(Skill::new("A", "a"))
            .add_skill(Skill::new("B", "b"))
            .add_skill(Skill::new("C", "c"));

        resume.move_skill(2, 0).unwrap();
        let order: Vec<&str> = resume.skills.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);

        let removed = resume.remove_skill(1).unwrap();
        assert_eq!(removed.category, "A");
        assert_eq!(resume.skills.len(), 2);
    }

    #[test]
    fn out_of_range_edits_fail() {
        let mut resume = Resume::default();
        resume.add_experience(WorkExperience::default());
        assert!(matches!(
            resume.remove_experience(3),
            Err(Error::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(matches!(
            resume.move_experience(0, 1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(resume.move_education(0, 0).is_err());
        assert_eq!(resume.work_experience.len(), 1);
    }

    #[test]
    fn snapshot_is_independent() {
        let mut resume = Resume::sample();
        let snap = resume.snapshot();
        resume.personal_info.set_name("Changed");
        assert_eq!(snap.personal_info.name, "John Doe");
        assert_ne!(snap, resume);
    }

    #[test]
    fn personal_info_lines_are_separated_by_spacers() {
        let mut resume = Resume::default();
        resume.personal_info.set_name("Ada").set_email("ada@example.com");
        let doc = resume.to_document();
        assert_eq!(ids(&doc), vec!["name", "b1", "email"]);
        assert!(matches!(doc.blocks[1].content, BlockContent::Spacer { height } if height == 5.0));
        assert_eq!(doc.metadata.title.as_deref(), Some("Ada - Resume"));
    }

    #[test]
    fn experience_becomes_table_then_description() {
        let mut resume = Resume::default();
        let mut j = job(date(2022, 3, 15), None, true);
        j.set_description("Did things.");
        resume.add_experience(j);
        let doc = resume.to_document();

        let table_pos = doc.blocks.iter().position(|b| b.id.0 == "experience-0").unwrap();
        let BlockContent::Table(table) = &doc.blocks[table_pos].content else {
            panic!("expected a table");
        };
        assert_eq!(table.rows[0][0].text.text, "Engineer");
        assert_eq!(table.rows[0][1].text.text, "Mar 2022 - Present");
        assert_eq!(table.rows[0][1].alignment, TextAlign::Right);
        assert_eq!(table.rows[1][0].text.text, "Acme");
        assert_eq!(table.rows[1][1].text.color, Color::SECONDARY);
        assert_eq!(table.border, crate::style::BorderStyle::None);
        assert_eq!(table.cell_padding, 0.0);

        assert!(matches!(doc.blocks[table_pos + 1].content, BlockContent::Spacer { .. }));
        assert_eq!(doc.blocks[table_pos + 2].id.0, "experience-0-description");
    }

    #[test]
    fn sections_appear_in_order() {
        let doc = Resume::sample().to_document();
        let headers: Vec<String> = ids(&doc)
            .into_iter()
            .filter(|id| id.ends_with("-header"))
            .collect();
        assert_eq!(
            headers,
            vec![
                "summary-header",
                "skills-header",
                "experience-header",
                "education-header",
                "certifications-header",
                "languages-header",
                "projects-header",
                "references-header",
                "section-0-header",
            ]
        );
        assert_eq!(ids(&doc)[0], "name");
    }

    fn text_of(doc: &Document, id: &str) -> String {
        let block = doc.blocks.iter().find(|b| b.id.0 == id).unwrap();
        match &block.content {
            BlockContent::Text(t) => t.text.clone(),
            other => panic!("{id} is a {}", other.kind_name()),
        }
    }

    fn table_of<'a>(doc: &'a Document, id: &str) -> &'a TableContent {
        let block = doc.blocks.iter().find(|b| b.id.0 == id).unwrap();
        match &block.content {
            BlockContent::Table(t) => t,
            other => panic!("{id} is a {}", other.kind_name()),
        }
    }

    #[test]
    fn profiles_follow_contact_lines_in_link_color() {
        let mut resume = Resume::default();
        resume
            .personal_info
            .set_name("Ada")
            .set_phone("555")
            .set_github("github.com/ada");
        let doc = resume.to_document();
        assert_eq!(ids(&doc), vec!["name", "b1", "phone", "b3", "github"]);
        assert_eq!(text_of(&doc, "github"), "GitHub: github.com/ada");
        let BlockContent::Text(github) = &doc.blocks[4].content else {
            panic!("expected text");
        };
        assert_eq!(github.color, Color::LINK);
    }

    #[test]
    fn certification_dates_and_credential() {
        let mut cert = Certification {
            name: "CKA".to_string(),
            issuing_organization: "CNCF".to_string(),
            issue_date: date(2021, 3, 10).unwrap(),
            expiration_date: date(2024, 3, 10),
            credential_id: Some("LF-1".to_string()),
            credential_url: None,
        };
        assert_eq!(cert.dates(), "Mar 2021 - Mar 2024");
        assert_eq!(cert.credential_line(), "ID: LF-1");

        cert.expiration_date = None;
        cert.credential_id = None;
        assert_eq!(cert.dates(), "Mar 2021");
        assert_eq!(cert.credential_line(), "");

        let mut resume = Resume::default();
        resume.add_certification(cert);
        let doc = resume.to_document();
        let table = table_of(&doc, "certification-0");
        assert_eq!(table.rows[0][0].text.text, "CKA");
        assert_eq!(table.rows[0][1].text.text, "Mar 2021");
        assert_eq!(table.rows[1][0].text.text, "CNCF");
    }

    #[test]
    fn languages_render_as_bullets_with_proficiency() {
        let mut resume = Resume::default();
        resume
            .add_language(Language::new("English", Proficiency::Native))
            .add_language(Language::new("Spanish", Proficiency::LimitedWorking));
        resume.move_language(1, 0).unwrap();

        let doc = resume.to_document();
        assert_eq!(text_of(&doc, "language-0"), "\u{2022} Spanish (Limited Working)");
        assert_eq!(text_of(&doc, "language-1"), "\u{2022} English (Native/Bilingual)");
    }

    #[test]
    fn project_blocks_follow_the_heading_table() {
        let mut project = Project::new("Pager", "Lays out pages.");
        assert_eq!(project.date_range(), None);
        project.start_date = date(2021, 1, 5);
        assert_eq!(project.date_range().as_deref(), Some("Jan 2021 - Present"));
        project.end_date = date(2022, 7, 1);
        project.technologies = vec!["Rust".to_string(), "PDF".to_string()];
        project.highlights = vec!["Fast".to_string()];

        let mut resume = Resume::default();
        resume.add_project(project);
        let doc = resume.to_document();

        let table = table_of(&doc, "project-0");
        assert_eq!(table.rows[0][1].text.text, "Jan 2021 - Jul 2022");
        assert_eq!(table.rows[1][0].text.text, "");
        let entry: Vec<String> = ids(&doc)
            .into_iter()
            .filter(|id| id.starts_with("project-0"))
            .collect();
        assert_eq!(
            entry,
            vec![
                "project-0",
                "project-0-description",
                "project-0-technologies",
                "project-0-highlight-0",
            ]
        );
        assert_eq!(text_of(&doc, "project-0-technologies"), "Technologies: Rust, PDF");
    }

    #[test]
    fn references_and_additional_sections() {
        let mut resume = Resume::default();
        resume.add_reference(Reference {
            name: "Jane".to_string(),
            company: "Acme".to_string(),
            position: "CTO".to_string(),
            email: Some("jane@acme.test".to_string()),
            phone: Some("555".to_string()),
            relationship: "Former Manager".to_string(),
        });
        resume
            .add_section(AdditionalSection {
                title: "Awards".to_string(),
                items: vec!["Best Paper".to_string()],
            })
            .add_section(AdditionalSection {
                title: "Empty".to_string(),
                items: vec![],
            });

        let doc = resume.to_document();
        let table = table_of(&doc, "reference-0");
        assert_eq!(table.rows[0][1].text.text, "Former Manager");
        assert_eq!(table.rows[1][0].text.text, "CTO at Acme");
        assert_eq!(table.rows[1][1].text.text, "jane@acme.test \u{b7} 555");

        assert_eq!(text_of(&doc, "section-0-header"), "Awards");
        assert_eq!(text_of(&doc, "section-0-0"), "\u{2022} Best Paper");
        assert!(!ids(&doc).contains(&"section-1-header".to_string()));
    }

    #[test]
    fn new_section_edits_check_bounds() {
        let mut resume = Resume::sample();
        assert!(matches!(
            resume.remove_certification(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(resume.move_project(0, 2).is_err());
        assert!(resume.remove_reference(4).is_err());
        assert!(resume.move_section(3, 0).is_err());

        let removed = resume.remove_language(0).unwrap();
        assert_eq!(removed.name, "English");
        assert_eq!(resume.languages.len(), 2);
    }

    #[test]
    fn empty_resume_has_no_blocks() {
        assert!(Resume::default().to_document().blocks.is_empty());
    }

    #[test]
    fn parses_camel_case_json() {
        let json = r#"{
            "personalInfo": { "name": "Ada", "title": "Engineer" },
            "workExperience": [
                { "companyName": "Acme", "position": "Lead", "startDate": "2020-01-01", "isCurrent": true }
            ],
            "education": [
                { "degree": "BSc", "institution": "Uni", "startDate": "2010-09-01" }
            ]
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.work_experience[0].date_range(), "Jan 2020 - Present");
        assert_eq!(resume.education[0].date_range(), "Sep 2010 - Present");
        assert!(resume.skills.is_empty());
        assert!(resume.certifications.is_empty());
    }

    #[test]
    fn parses_added_sections_from_json() {
        let json = r#"{
            "personalInfo": { "name": "Ada", "linkedIn": "linkedin.com/in/ada" },
            "certifications": [
                { "name": "CKA", "issuingOrganization": "CNCF", "issueDate": "2021-03-10", "credentialID": "X1" }
            ],
            "languages": [ { "name": "German", "proficiencyLevel": "Full Professional" } ],
            "projects": [ { "name": "Pager", "startDate": "2020-02-01", "technologies": ["Rust"] } ],
            "additionalSections": [ { "title": "Awards", "items": ["Best Paper"] } ]
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.personal_info.linkedin, "linkedin.com/in/ada");
        assert_eq!(resume.certifications[0].credential_id.as_deref(), Some("X1"));
        assert_eq!(resume.languages[0].proficiency, Proficiency::FullProfessional);
        assert_eq!(resume.projects[0].date_range().as_deref(), Some("Feb 2020 - Present"));
        assert_eq!(resume.additional_sections[0].items, vec!["Best Paper"]);
        assert!(resume.references.is_empty());
    }
}
