//! CSV dumps of both tables, used by the cli to move data between databases.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: &Path, data: &[impl Serialize]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record?;
        out.push(record);
    }
    Ok(out)
}

pub fn export_to(dir: &Path, categories: &[Category], questions: &[Question]) -> anyhow::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?
    }
    write_to(&dir.join(CATEGORIES_FILE), categories)?;
    write_to(&dir.join(QUESTIONS_FILE), questions)?;
    Ok(())
}

pub fn import_from(dir: &Path) -> anyhow::Result<(Vec<Category>, Vec<Question>)> {
    let categories = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions = read_from(&dir.join(QUESTIONS_FILE))?;
    Ok((categories, questions))
}
