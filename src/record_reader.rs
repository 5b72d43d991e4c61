use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fs::File, io::BufReader, path::Path};

use crate::utils::{is_present, Degree, Job, ResumeRecord};

const SKILL_SLOTS: usize = 10;
const JOB_SLOTS: usize = 2;
const PROJECT_SLOTS: usize = 2;

/// The fixed-slot shape a saved resume has on the wire.
///
/// Every field accepts any JSON value: strings pass through, numbers become
/// their decimal text, anything else becomes an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatResumeRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub user_email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub job_description: String,

    #[serde(deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: String,

    #[serde(deserialize_with = "lenient_string")]
    pub skill1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill2: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill3: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill4: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill5: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill6: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill7: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill8: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill9: String,
    #[serde(deserialize_with = "lenient_string")]
    pub skill10: String,

    #[serde(deserialize_with = "lenient_string")]
    pub company1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub position1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub duration1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company2: String,
    #[serde(deserialize_with = "lenient_string")]
    pub position2: String,
    #[serde(deserialize_with = "lenient_string")]
    pub duration2: String,

    #[serde(deserialize_with = "lenient_string")]
    pub degree1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub university1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub graduation_year1: String,

    #[serde(deserialize_with = "lenient_string")]
    pub project1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub project2: String,

    #[serde(deserialize_with = "lenient_string")]
    pub cover_letter: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

impl FlatResumeRecord {
    fn skill_slots(&self) -> [&String; SKILL_SLOTS] {
        [
            &self.skill1,
            &self.skill2,
            &self.skill3,
            &self.skill4,
            &self.skill5,
            &self.skill6,
            &self.skill7,
            &self.skill8,
            &self.skill9,
            &self.skill10,
        ]
    }

    fn skill_slots_mut(&mut self) -> [&mut String; SKILL_SLOTS] {
        [
            &mut self.skill1,
            &mut self.skill2,
            &mut self.skill3,
            &mut self.skill4,
            &mut self.skill5,
            &mut self.skill6,
            &mut self.skill7,
            &mut self.skill8,
            &mut self.skill9,
            &mut self.skill10,
        ]
    }
}

impl From<FlatResumeRecord> for ResumeRecord {
    fn from(flat: FlatResumeRecord) -> Self {
        let skills = flat
            .skill_slots()
            .into_iter()
            .filter(|s| is_present(s))
            .cloned()
            .collect();

        let experience = [
            (&flat.company1, &flat.position1, &flat.duration1),
            (&flat.company2, &flat.position2, &flat.duration2),
        ]
        .into_iter()
        .filter(|(company, _, _)| is_present(company))
        .map(|(company, position, duration)| Job {
            company: company.clone(),
            position: position.clone(),
            duration: duration.clone(),
        })
        .collect();

        let education = if is_present(&flat.degree1) {
            vec![Degree {
                degree: flat.degree1.clone(),
                university: flat.university1.clone(),
                graduation_year: flat.graduation_year1.clone(),
            }]
        } else {
            Vec::new()
        };

        let projects = [&flat.project1, &flat.project2]
            .into_iter()
            .filter(|p| is_present(p))
            .cloned()
            .collect();

        ResumeRecord {
            full_name: flat.full_name,
            email: flat.email,
            phone: flat.phone,
            location: flat.location,
            summary: flat.summary,
            skills,
            experience,
            education,
            projects,
            cover_letter: flat.cover_letter,
        }
    }
}

impl From<&ResumeRecord> for FlatResumeRecord {
    fn from(record: &ResumeRecord) -> Self {
        let mut flat = FlatResumeRecord {
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            location: record.location.clone(),
            summary: record.summary.clone(),
            cover_letter: record.cover_letter.clone(),
            ..Default::default()
        };

        warn_dropped("skills", record.skills.len(), SKILL_SLOTS);
        for (slot, skill) in flat.skill_slots_mut().into_iter().zip(&record.skills) {
            *slot = skill.clone();
        }

        warn_dropped("jobs", record.experience.len(), JOB_SLOTS);
        let mut jobs = record.experience.iter();
        if let Some(job) = jobs.next() {
            flat.company1 = job.company.clone();
            flat.position1 = job.position.clone();
            flat.duration1 = job.duration.clone();
        }
        if let Some(job) = jobs.next() {
            flat.company2 = job.company.clone();
            flat.position2 = job.position.clone();
            flat.duration2 = job.duration.clone();
        }

        warn_dropped("degrees", record.education.len(), 1);
        if let Some(degree) = record.education.first() {
            flat.degree1 = degree.degree.clone();
            flat.university1 = degree.university.clone();
            flat.graduation_year1 = degree.graduation_year.clone();
        }

        warn_dropped("projects", record.projects.len(), PROJECT_SLOTS);
        let mut projects = record.projects.iter();
        if let Some(project) = projects.next() {
            flat.project1 = project.clone();
        }
        if let Some(project) = projects.next() {
            flat.project2 = project.clone();
        }

        flat
    }
}

fn warn_dropped(what: &str, len: usize, capacity: usize) {
    if len > capacity {
        warn!(
            "Only {} {} fit the stored record, dropping {}",
            capacity,
            what,
            len - capacity
        );
    }
}

pub fn parse_record(json: &str) -> Result<ResumeRecord> {
    let flat: FlatResumeRecord =
        serde_json::from_str(json).context("Resume record is not a JSON object")?;
    Ok(flat.into())
}

pub fn read_record(path: impl AsRef<Path>) -> Result<ResumeRecord> {
    let path = path.as_ref();
    debug!("Opening resume record: {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open resume record: {}", path.display()))?;
    let flat: FlatResumeRecord = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse resume record: {}", path.display()))?;
    debug!("Resume record loaded for '{}'", flat.full_name);
    Ok(flat.into())
}
